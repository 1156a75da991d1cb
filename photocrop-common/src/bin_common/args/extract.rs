use image::{DynamicImage, RgbImage};

use crate::{
    subject::{
        bounds::{bounds, Bounds},
        check_color_type, check_dimensions,
        components::select_largest,
        crop::crop,
        edge_trim::trim_edges,
        ExtractError, Extraction,
    },
    utils::imgutils::Mask,
};

use super::{
    args_helper::args,
    classify::{ClassifyArgs, ClassifyCli},
    refine::{RefineArgs, RefineCli},
};

args! {
    #[derive(Copy, Clone, Debug, PartialEq)]
    Extract {
        "Grow the found bounds by this many pixels on every side, or shrink them if negative"
        margin: i32 = 0;

        "Peel lines off the edges of the subject while more than this fraction of them is \
         background (negative to disable)"
        edge_trim_max_background: f64 = -1.0;

        classify_args: Classify;
        refine_args: Refine;
    }
}

impl ExtractArgs {
    /// The pixels of the subject, without any margin
    pub fn subject_mask(&self, img: &RgbImage) -> Result<Mask, ExtractError> {
        check_dimensions(img)?;

        let classified = self.classify_args.classify(img);
        let refined = self.refine_args.refine(classified);
        let mut subject = select_largest(&refined)?;
        if self.edge_trim_max_background >= 0.0 {
            trim_edges(&mut subject, self.edge_trim_max_background);
        }

        Ok(subject)
    }

    /// Where the subject is, with the margin applied
    pub fn locate(&self, img: &RgbImage) -> Result<Bounds, ExtractError> {
        let subject = self.subject_mask(img)?;
        self.bounds_of(&subject)
    }

    /// The bounds of an already found subject, with the margin applied
    pub fn bounds_of(&self, subject: &Mask) -> Result<Bounds, ExtractError> {
        let exact = bounds(subject)?;
        let with_margin = exact.with_margin(self.margin, subject.width(), subject.height());
        log::debug!("found the subject at {exact}, {with_margin} with the margin");
        Ok(with_margin)
    }

    /// Finds the subject and crops the image to it
    pub fn extract(&self, img: &RgbImage) -> Result<Extraction, ExtractError> {
        let subject = self.subject_mask(img)?;
        self.extract_with_mask(img, &subject)
    }

    /// Crops the image to a subject mask from [`subject_mask`](Self::subject_mask)
    pub fn extract_with_mask(
        &self,
        img: &RgbImage,
        subject: &Mask,
    ) -> Result<Extraction, ExtractError> {
        let bounds = self.bounds_of(subject)?;
        Ok(Extraction {
            bounds,
            image: crop(img, bounds),
        })
    }

    /// Like [`extract`](Self::extract), but refuses anything that isn't 8-bit RGB
    pub fn extract_dynamic(&self, img: &DynamicImage) -> Result<Extraction, ExtractError> {
        self.extract(check_color_type(img)?)
    }
}

#[cfg(test)]
mod test {
    use image::{GrayImage, Rgb};

    use crate::{
        subject::InvalidImage,
        utils::imgutils::{fill_rect, filled},
    };

    use super::*;

    fn square_on_paper() -> RgbImage {
        let mut img = filled(60, 50, 255, 255, 255);
        fill_rect(&mut img, 20, 10, 20, 20, Rgb([40, 30, 20]));
        img
    }

    #[test]
    fn defaults() {
        let args = ExtractArgs::default();
        assert_eq!(0, args.margin);
        assert!(args.edge_trim_max_background < 0.0);
        assert_eq!(ClassifyArgs::default(), args.classify_args);
        assert_eq!(
            RefineArgs::default()
                .refine_erode_iterations(1)
                .refine_dilate_iterations(1),
            args.refine_args
        );
    }

    #[test]
    fn extract_includes_the_halo() {
        let img = square_on_paper();
        let extraction = ExtractArgs::default().extract(&img).unwrap();
        assert_eq!(
            Bounds {
                x_min: 18,
                y_min: 8,
                x_max: 41,
                y_max: 31
            },
            extraction.bounds
        );
        assert_eq!((24, 24), extraction.image.dimensions());
    }

    #[test]
    fn negative_margin_removes_the_halo() {
        let img = square_on_paper();
        let extraction = ExtractArgs::default().margin(-2).extract(&img).unwrap();
        assert_eq!(
            Bounds {
                x_min: 20,
                y_min: 10,
                x_max: 39,
                y_max: 29
            },
            extraction.bounds
        );
        assert!(extraction
            .image
            .pixels()
            .all(|p| *p == Rgb([40, 30, 20])));
    }

    #[test]
    fn edge_trim_peels_the_halo_rows() {
        let img = square_on_paper();
        let trimmed = ExtractArgs::default()
            .edge_trim_max_background(0.1)
            .extract(&img)
            .unwrap();
        // the halo is thinner near the corners, so its rows go but one column stays
        assert_eq!(
            Bounds {
                x_min: 19,
                y_min: 10,
                x_max: 40,
                y_max: 29
            },
            trimmed.bounds
        );
        let ink = trimmed
            .image
            .pixels()
            .filter(|p| **p == Rgb([40, 30, 20]))
            .count();
        assert_eq!(20 * 20, ink);
    }

    #[test]
    fn mask_has_no_margin() {
        let img = square_on_paper();
        let mask = ExtractArgs::default().margin(10).subject_mask(&img).unwrap();
        assert_eq!((60, 50), mask.dimensions());
        assert!(!mask.get(17, 20));
        assert!(mask.get(18, 20));
    }

    #[test]
    fn reusing_the_mask() {
        let img = square_on_paper();
        let args = ExtractArgs::default().margin(-1);
        let mask = args.subject_mask(&img).unwrap();
        assert_eq!(args.extract(&img), args.extract_with_mask(&img, &mask));
        assert_eq!(
            Err(ExtractError::NoSubjectFound),
            args.extract_with_mask(&img, &Mask::new(60, 50))
        );
    }

    #[test]
    fn nothing_on_the_page() {
        let img = filled(30, 30, 255, 255, 255);
        assert_eq!(
            Err(ExtractError::NoSubjectFound),
            ExtractArgs::default().extract(&img)
        );
    }

    #[test]
    fn rejects_bad_images() {
        assert_eq!(
            Err(ExtractError::InvalidImage(InvalidImage::Empty {
                width: 5,
                height: 0
            })),
            ExtractArgs::default().locate(&RgbImage::new(5, 0))
        );

        let gray = DynamicImage::ImageLuma8(GrayImage::new(5, 5));
        assert!(matches!(
            ExtractArgs::default().extract_dynamic(&gray),
            Err(ExtractError::InvalidImage(InvalidImage::ColorType(_)))
        ));

        let rgb = DynamicImage::ImageRgb8(square_on_paper());
        assert!(ExtractArgs::default().extract_dynamic(&rgb).is_ok());
    }
}
