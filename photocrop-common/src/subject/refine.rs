use image::{
    imageops::{crop_imm, replace},
    GrayImage, Luma,
};
use imageproc::{
    distance_transform::Norm,
    morphology,
    region_labelling::{connected_components, Connectivity},
};

use crate::utils::imgutils::{is_img_empty, Mask, WHITE};

/// Fills holes, then erodes and dilates the given number of times.
pub fn refine(mut mask: Mask, erode_iterations: u32, dilate_iterations: u32) -> Mask {
    fill_holes(&mut mask);
    for _ in 0..erode_iterations {
        mask = erode(&mask);
    }
    for _ in 0..dilate_iterations {
        mask = dilate(&mask);
    }
    log::trace!("{} subject pixels after refinement", mask.count());
    mask
}

/// Turns all background that can't reach the border of the mask into subject.
pub fn fill_holes(mask: &mut Mask) {
    let (width, height) = mask.dimensions();
    if is_img_empty(&mask.0) {
        return;
    }

    // subject pixels are the background of this labeling
    let regions = connected_components(&mask.0, Connectivity::Four, Luma([WHITE]));
    let count = regions.iter().copied().max().unwrap_or(0) as usize;

    let mut touches_border = vec![false; count + 1];
    for (x, y, Luma([label])) in regions.enumerate_pixels() {
        if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
            touches_border[*label as usize] = true;
        }
    }

    for (pixel, Luma([label])) in mask.0.pixels_mut().zip(regions.pixels()) {
        if *label != 0 && !touches_border[*label as usize] {
            *pixel = Luma([WHITE]);
        }
    }
}

/// Keeps only the subject pixels whose 4-connected neighbors are all subject. Everything
/// outside the mask counts as background.
pub fn erode(mask: &Mask) -> Mask {
    let (width, height) = mask.dimensions();
    if is_img_empty(&mask.0) {
        return mask.clone();
    }

    // imageproc only measures the distance to background inside the image
    let mut padded = GrayImage::new(width + 2, height + 2);
    replace(&mut padded, &mask.0, 1, 1);
    let eroded = morphology::erode(&padded, Norm::L1, 1);
    Mask(crop_imm(&eroded, 1, 1, width, height).to_image())
}

/// Makes every pixel 4-connected to a subject pixel part of the subject.
pub fn dilate(mask: &Mask) -> Mask {
    if is_img_empty(&mask.0) {
        return mask.clone();
    }
    Mask(morphology::dilate(&mask.0, Norm::L1, 1))
}
