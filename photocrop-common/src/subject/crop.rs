use image::{imageops::crop_imm, RgbImage, SubImage};

use super::bounds::Bounds;

/// A view of the pixels inside the bounds. Both corners of the bounds are included.
pub fn crop_view(img: &RgbImage, bounds: Bounds) -> SubImage<&RgbImage> {
    let rect = bounds.to_rect();
    crop_imm(img, rect.x, rect.y, rect.width, rect.height)
}

/// A copy of the pixels inside the bounds. Both corners of the bounds are included.
pub fn crop(img: &RgbImage, bounds: Bounds) -> RgbImage {
    crop_view(img, bounds).to_image()
}

#[cfg(test)]
mod test {
    use image::{GenericImageView, Rgb};

    use super::*;

    fn gradient(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| Rgb([x as u8, y as u8, 7]))
    }

    #[test]
    fn corners_are_inclusive() {
        let img = gradient(10, 8);
        let bounds = Bounds {
            x_min: 2,
            y_min: 3,
            x_max: 5,
            y_max: 7,
        };
        let cropped = crop(&img, bounds);
        assert_eq!((4, 5), cropped.dimensions());
        assert_eq!(&Rgb([2, 3, 7]), cropped.get_pixel(0, 0));
        assert_eq!(&Rgb([5, 7, 7]), cropped.get_pixel(3, 4));
    }

    #[test]
    fn single_pixel() {
        let img = gradient(3, 3);
        let bounds = Bounds {
            x_min: 1,
            y_min: 2,
            x_max: 1,
            y_max: 2,
        };
        let cropped = crop(&img, bounds);
        assert_eq!((1, 1), cropped.dimensions());
        assert_eq!(&Rgb([1, 2, 7]), cropped.get_pixel(0, 0));
    }

    #[test]
    fn view_matches_copy() {
        let img = gradient(6, 6);
        let bounds = Bounds {
            x_min: 0,
            y_min: 0,
            x_max: 5,
            y_max: 5,
        };
        let view = crop_view(&img, bounds);
        assert_eq!((6, 6), view.dimensions());
        assert_eq!(img, crop(&img, bounds));
    }
}
