//! Finding the subject, usually a portrait photo, on an image of a white paper page.
//!
//! The pipeline is strictly linear:
//! [`classify`] -> [`refine`] -> [`components`] -> [`bounds`] -> [`crop`], optionally with
//! an [`edge_trim`] pass before the bounds are computed. The stages are glued together
//! by [`ExtractArgs`](crate::bin_common::args::extract::ExtractArgs).
//!
//! All morphology and labeling uses 4-connectivity, i.e., a pixel's neighbors are the
//! ones directly above, below, left and right of it.
//!
//! NOTE: the white-clothing rule in [`classify`] also claims the paper just outside of a
//! solid subject, up to the neighborhood radius away from it. Zero margin therefore
//! gives bounds that are `clothing_neighbor_radius` pixels too large on every side, and
//! a margin of minus the radius cancels that out.

use image::{ColorType, DynamicImage, GenericImageView, RgbImage};

use crate::utils::imgutils::is_img_empty;

use self::bounds::Bounds;

pub mod bounds;
pub mod classify;
pub mod components;
pub mod crop;
pub mod edge_trim;
pub mod refine;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("no subject was found")]
    NoSubjectFound,
    #[error("invalid image: {0}")]
    InvalidImage(#[from] InvalidImage),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InvalidImage {
    #[error("the image is empty ({width}x{height})")]
    Empty { width: u32, height: u32 },
    #[error("expected 8-bit RGB, got {0:?}")]
    ColorType(ColorType),
}

/// A found subject
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Extraction {
    /// Where in the source image the subject is, after the margin was applied
    pub bounds: Bounds,
    /// A copy of the pixels inside `bounds`
    pub image: RgbImage,
}

pub fn check_dimensions<I: GenericImageView>(img: &I) -> Result<(), InvalidImage> {
    if is_img_empty(img) {
        return Err(InvalidImage::Empty {
            width: img.width(),
            height: img.height(),
        });
    }
    Ok(())
}

/// Gets the image as RGB, without converting it from any other color type
pub fn check_color_type(img: &DynamicImage) -> Result<&RgbImage, InvalidImage> {
    img.as_rgb8().ok_or(InvalidImage::ColorType(img.color()))
}
