use image::{Rgb, RgbImage};
use rayon::prelude::*;

use crate::utils::imgutils::{is_img_empty, Mask, BLACK, WHITE};

/// A neighbor must reach this on all channels to not count as content next to a white
/// pixel.
pub const CLEARLY_WHITE: u8 = 240;

/// Printed blue text is always at least this blue.
pub const BLUE_TEXT_MINIMUM: u8 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRules {
    pub white_threshold: u8,
    pub blue_threshold: u8,
    pub neighbor_radius: u32,
    pub neighbor_nonwhite_minimum: u32,
    /// Let blue text count as content around white pixels
    pub blue_text_is_content: bool,
}

impl PixelRules {
    /// Candidate paper background
    pub fn is_white(&self, Rgb(rgb): Rgb<u8>) -> bool {
        rgb.iter().all(|c| *c >= self.white_threshold)
    }

    pub fn is_blue_text(&self, Rgb(rgb): Rgb<u8>) -> bool {
        let [r, g, b] = rgb.map(i32::from);
        let threshold = i32::from(self.blue_threshold);
        b > r + threshold && b > g + threshold && b > i32::from(BLUE_TEXT_MINIMUM)
    }

    /// Something that is clearly not paper, and unless configured otherwise not printed
    /// text either. Only used to judge the neighborhood of white pixels.
    pub fn is_content(&self, pixel: Rgb<u8>) -> bool {
        !pixel.0.iter().all(|c| *c >= CLEARLY_WHITE)
            && (self.blue_text_is_content || !self.is_blue_text(pixel))
    }

    /// `content_around` is only called for white pixels and should count the content
    /// pixels in the neighborhood, the pixel itself included.
    pub fn is_subject(&self, pixel: Rgb<u8>, content_around: impl FnOnce() -> u32) -> bool {
        if self.is_white(pixel) {
            content_around() > self.neighbor_nonwhite_minimum
        } else {
            !self.is_blue_text(pixel)
        }
    }
}

/// Summed-area table of content pixels, to count them in any rectangle in constant time.
struct ContentCounts {
    width: u32,
    height: u32,
    sums: Vec<u32>,
}

impl ContentCounts {
    fn new(img: &RgbImage, rules: &PixelRules) -> Self {
        let (width, height) = img.dimensions();
        let stride = width as usize + 1;
        let mut sums = vec![0u32; stride * (height as usize + 1)];

        for (x, y, pixel) in img.enumerate_pixels() {
            let (x, y) = (x as usize, y as usize);
            let here = u32::from(rules.is_content(*pixel));
            sums[(y + 1) * stride + x + 1] =
                here + sums[y * stride + x + 1] + sums[(y + 1) * stride + x] - sums[y * stride + x];
        }

        Self {
            width,
            height,
            sums,
        }
    }

    /// Content pixels in the square centered at (x, y), clipped to the image
    fn around(&self, x: u32, y: u32, radius: u32) -> u32 {
        let stride = self.width as usize + 1;
        let x0 = x.saturating_sub(radius) as usize;
        let y0 = y.saturating_sub(radius) as usize;
        let x1 = x.saturating_add(radius).min(self.width - 1) as usize + 1;
        let y1 = y.saturating_add(radius).min(self.height - 1) as usize + 1;

        let at = |x: usize, y: usize| self.sums[y * stride + x];
        (at(x1, y1) + at(x0, y0)) - (at(x1, y0) + at(x0, y1))
    }
}

/// Decides for every pixel if it is part of the subject. Rows are processed in parallel.
pub fn classify(img: &RgbImage, rules: &PixelRules) -> Mask {
    let (width, height) = img.dimensions();
    let mut mask = Mask::new(width, height);
    if is_img_empty(img) {
        return mask;
    }

    let counts = ContentCounts::new(img, rules);
    mask.0
        .par_chunks_mut(width as usize)
        .enumerate()
        .for_each(|(y, row)| {
            let y = y as u32;
            for (x, out) in row.iter_mut().enumerate() {
                let x = x as u32;
                let subject = rules.is_subject(*img.get_pixel(x, y), || {
                    counts.around(x, y, rules.neighbor_radius)
                });
                *out = if subject { WHITE } else { BLACK };
            }
        });

    log::trace!(
        "classified {} of {} pixels as subject",
        mask.count(),
        u64::from(width) * u64::from(height)
    );

    mask
}
