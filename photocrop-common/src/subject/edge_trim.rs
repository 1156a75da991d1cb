use std::ops::RangeInclusive;

use crate::utils::imgutils::Mask;

use super::bounds::{bounds, Bounds};

#[derive(Clone, Copy, Debug)]
enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    /// Indices of the lines inside the bounds, starting from this side and going inward
    fn lines(self, b: &Bounds) -> Box<dyn Iterator<Item = u32>> {
        match self {
            Side::Top => Box::new(b.y_min..=b.y_max),
            Side::Bottom => Box::new((b.y_min..=b.y_max).rev()),
            Side::Left => Box::new(b.x_min..=b.x_max),
            Side::Right => Box::new((b.x_min..=b.x_max).rev()),
        }
    }

    /// The part of the line that is across the bounds
    fn across(self, b: &Bounds) -> RangeInclusive<u32> {
        match self {
            Side::Top | Side::Bottom => b.x_min..=b.x_max,
            Side::Left | Side::Right => b.y_min..=b.y_max,
        }
    }

    fn at(self, i: u32, j: u32) -> (u32, u32) {
        match self {
            Side::Top | Side::Bottom => (j, i),
            Side::Left | Side::Right => (i, j),
        }
    }
}

/// Peels off lines of mostly background from the edges of the subject. Starting from
/// each side of the subject's bounds, the outermost line with any subject in it is
/// removed if one of its ends is background and more than `max_background` (a fraction)
/// of it is background. This is repeated until a line is kept. The sides are handled
/// top, bottom, left, right, and each side sees the bounds left by the previous ones.
///
/// NOTE: the halo the clothing rule leaves around a solid subject has rounded corners, so
/// its rows are peeled but its outermost full column survives. The trim therefore
/// replaces a negative margin rather than being combined with one, which would cut into
/// the subject.
pub fn trim_edges(mask: &mut Mask, max_background: f64) {
    for side in [Side::Top, Side::Bottom, Side::Left, Side::Right] {
        let Ok(current) = bounds(mask) else {
            return;
        };

        let mut trimmed = 0;
        for i in side.lines(&current) {
            let line: Vec<bool> = side
                .across(&current)
                .map(|j| {
                    let (x, y) = side.at(i, j);
                    mask.get(x, y)
                })
                .collect();
            if !line.contains(&true) {
                continue;
            }

            let ends_in_background = !line[0] || !line[line.len() - 1];
            let background = line.iter().filter(|p| !**p).count();
            if ends_in_background && background as f64 > max_background * line.len() as f64
            {
                for j in side.across(&current) {
                    let (x, y) = side.at(i, j);
                    mask.set(x, y, false);
                }
                trimmed += 1;
            } else {
                break;
            }
        }
        log::trace!("trimmed {trimmed} lines from the {side:?}");
    }
}
