use image::{GenericImageView, GrayImage, ImageBuffer, Luma, Rgb, RgbImage};

pub const WHITE: u8 = u8::MAX;
pub const BLACK: u8 = u8::MIN;

/// A black and white image of the same size as the image it was derived from. White
/// pixels belong to the subject, black pixels to the background.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask(pub GrayImage);

impl Mask {
    /// A mask of only background
    pub fn new(width: u32, height: u32) -> Self {
        Mask(GrayImage::new(width, height))
    }

    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> bool) -> Self {
        Mask(GrayImage::from_fn(width, height, |x, y| {
            Luma([if f(x, y) { WHITE } else { BLACK }])
        }))
    }

    pub fn width(&self) -> u32 {
        self.0.width()
    }

    pub fn height(&self) -> u32 {
        self.0.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.0.dimensions()
    }

    pub fn get(&self, x: u32, y: u32) -> bool {
        self.0.get_pixel(x, y)[0] == WHITE
    }

    pub fn set(&mut self, x: u32, y: u32, subject: bool) {
        self.0.put_pixel(x, y, Luma([if subject { WHITE } else { BLACK }]));
    }

    /// Number of subject pixels
    pub fn count(&self) -> usize {
        self.0.as_raw().iter().filter(|p| **p == WHITE).count()
    }

    /// True if there isn't a single subject pixel
    pub fn is_empty(&self) -> bool {
        self.0.as_raw().iter().all(|p| *p != WHITE)
    }
}

pub fn filled(width: u32, height: u32, red: u8, green: u8, blue: u8) -> RgbImage {
    let mut buf = ImageBuffer::new(width, height);
    buf.enumerate_pixels_mut()
        .for_each(|(_, _, pixel)| *pixel = Rgb([red, green, blue]));
    buf
}

/// Paints a solid rectangle, the parts outside of the image are ignored
pub fn fill_rect(img: &mut RgbImage, x: u32, y: u32, width: u32, height: u32, color: Rgb<u8>) {
    let x_end = x.saturating_add(width).min(img.width());
    let y_end = y.saturating_add(height).min(img.height());
    for yy in y..y_end {
        for xx in x..x_end {
            img.put_pixel(xx, yy, color);
        }
    }
}

/// Builds a mask from rows of zeros (background) and non-zeros (subject)
pub fn construct_mask(raw: &[&[u8]]) -> Mask {
    assert!(raw.windows(2).all(|w| w[0].len() == w[1].len()));
    let height = raw.len() as u32;
    let width = raw.first().map(|row| row.len()).unwrap_or(0) as u32;
    Mask::from_fn(width, height, |x, y| raw[y as usize][x as usize] != 0)
}

pub fn is_img_empty<T>(img: &T) -> bool
where
    T: GenericImageView,
{
    img.width() == 0 || img.height() == 0
}
