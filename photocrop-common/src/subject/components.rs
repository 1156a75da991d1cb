use image::Luma;
use imageproc::{
    definitions::Image,
    region_labelling::{connected_components, Connectivity},
};

use crate::utils::imgutils::{Mask, BLACK};

use super::ExtractError;

/// 4-connected regions of subject pixels. Labels are handed out in the order the regions
/// are first seen when scanning row by row from the top left, starting at 1. Background
/// has label 0.
pub struct Components {
    labels: Image<Luma<u32>>,
    /// `sizes[i]` is the number of pixels labeled `i + 1`
    sizes: Vec<usize>,
}

impl Components {
    pub fn label(mask: &Mask) -> Self {
        let labels = connected_components(&mask.0, Connectivity::Four, Luma([BLACK]));

        let count = labels.iter().copied().max().unwrap_or(0) as usize;
        let mut sizes = vec![0; count];
        for label in labels.iter().filter(|label| **label != 0) {
            sizes[*label as usize - 1] += 1;
        }

        Self { labels, sizes }
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    pub fn label_at(&self, x: u32, y: u32) -> u32 {
        self.labels.get_pixel(x, y)[0]
    }

    pub fn size(&self, label: u32) -> Option<usize> {
        let i = usize::try_from(label).ok()?.checked_sub(1)?;
        self.sizes.get(i).copied()
    }

    /// The label of the biggest region, the lowest label wins ties
    pub fn largest(&self) -> Option<u32> {
        self.sizes
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, usize)>, (i, &size)| match best {
                Some((_, best_size)) if best_size >= size => best,
                _ => Some((i, size)),
            })
            .map(|(i, _)| i as u32 + 1)
    }

    /// A mask with only the region with the given label
    pub fn only(&self, label: u32) -> Mask {
        let (width, height) = self.labels.dimensions();
        Mask::from_fn(width, height, |x, y| self.label_at(x, y) == label)
    }
}

/// Keeps the largest region of the mask and drops everything else.
pub fn select_largest(mask: &Mask) -> Result<Mask, ExtractError> {
    let components = Components::label(mask);
    let largest = components.largest().ok_or(ExtractError::NoSubjectFound)?;
    log::trace!(
        "kept region {largest} of {} with {:?} pixels",
        components.len(),
        components.size(largest)
    );
    Ok(components.only(largest))
}
