use std::{cmp::Ordering, fmt};

use image::math::Rect;

use crate::utils::imgutils::Mask;

use super::ExtractError;

/// An axis aligned rectangle where both corners are inclusive. It is never empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Bounds {
    pub x_min: u32,
    pub y_min: u32,
    pub x_max: u32,
    pub y_max: u32,
}

impl Bounds {
    pub fn width(&self) -> u32 {
        self.x_max - self.x_min + 1
    }

    pub fn height(&self) -> u32 {
        self.y_max - self.y_min + 1
    }

    /// The same area, but with an exclusive size instead of an inclusive corner
    pub fn to_rect(self) -> Rect {
        Rect {
            x: self.x_min,
            y: self.y_min,
            width: self.width(),
            height: self.height(),
        }
    }

    pub fn contains(&self, other: &Bounds) -> bool {
        self.x_min <= other.x_min
            && self.y_min <= other.y_min
            && self.x_max >= other.x_max
            && self.y_max >= other.y_max
    }

    pub fn translate(self, dx: u32, dy: u32) -> Bounds {
        Bounds {
            x_min: self.x_min + dx,
            y_min: self.y_min + dy,
            x_max: self.x_max + dx,
            y_max: self.y_max + dy,
        }
    }

    /// Grows the bounds by `margin` pixels on every side when positive, and shrinks them
    /// when negative. The result is clamped to an image of the given size. Shrinking so
    /// much that nothing, or only a line, would remain returns the bounds unchanged.
    pub fn with_margin(self, margin: i32, width: u32, height: u32) -> Bounds {
        let m = margin.unsigned_abs();
        let last_x = width.saturating_sub(1);
        let last_y = height.saturating_sub(1);

        match margin.cmp(&0) {
            Ordering::Equal => self,
            Ordering::Greater => Bounds {
                x_min: self.x_min.saturating_sub(m),
                y_min: self.y_min.saturating_sub(m),
                x_max: self.x_max.saturating_add(m).min(last_x),
                y_max: self.y_max.saturating_add(m).min(last_y),
            },
            Ordering::Less => {
                let shrunk = Bounds {
                    x_min: self.x_min.saturating_add(m).min(last_x),
                    y_min: self.y_min.saturating_add(m).min(last_y),
                    x_max: self.x_max.saturating_sub(m),
                    y_max: self.y_max.saturating_sub(m),
                };
                if shrunk.x_max <= shrunk.x_min || shrunk.y_max <= shrunk.y_min {
                    log::debug!("margin {margin} is too much for {self}, not shrinking");
                    self
                } else {
                    shrunk
                }
            }
        }
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {})..=({}, {})",
            self.x_min, self.y_min, self.x_max, self.y_max
        )
    }
}

/// The smallest bounds containing every subject pixel
pub fn bounds(mask: &Mask) -> Result<Bounds, ExtractError> {
    let mut columns = vec![false; mask.width() as usize];
    let mut rows = vec![false; mask.height() as usize];
    mask.0.enumerate_pixels().for_each(|(x, y, _)| {
        if mask.get(x, y) {
            columns[x as usize] = true;
            rows[y as usize] = true;
        }
    });

    let first = |axle: &[bool]| axle.iter().position(|&any| any).map(|i| i as u32);
    let last = |axle: &[bool]| axle.iter().rposition(|&any| any).map(|i| i as u32);

    let (Some(x_min), Some(x_max), Some(y_min), Some(y_max)) =
        (first(&columns), last(&columns), first(&rows), last(&rows))
    else {
        return Err(ExtractError::NoSubjectFound);
    };

    Ok(Bounds {
        x_min,
        y_min,
        x_max,
        y_max,
    })
}
