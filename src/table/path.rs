//! Resamples a traced drawing path onto a lookup-table pair.
//!
//! The traced points are sparse and irregularly spaced, so the builder
//! inserts linearly interpolated points between each adjacent pair until the
//! forward traversal uses as much of the configured table capacity as
//! possible, then mirrors the whole traversal into the back half. The mirror
//! guarantees the signal returns to its start value: the table's midpoint
//! repeats the final traced point, and its last entry repeats the first, so
//! the loop is continuous at both seams.

use tracing::info;

use super::{LookupTable, TablePair};
use crate::error::{Error, Result};
use crate::geometry::Point;

/// Per-axis trend between two adjacent traced points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Rising,
    Falling,
    Flat,
}

impl Direction {
    fn between(current: f64, next: f64) -> Self {
        if next > current {
            Self::Rising
        } else if next < current {
            Self::Falling
        } else {
            Self::Flat
        }
    }
}

/// Builds the X and Y tables for a normalized path.
///
/// # Errors
///
/// Fails with [`Error::InsufficientPoints`] when the path has fewer than two
/// points; interpolation between fewer is undefined.
pub(crate) fn build(points: &[Point], table_size: usize) -> Result<TablePair> {
    if points.len() < 2 {
        return Err(Error::InsufficientPoints(points.len()));
    }

    let (factor, table_len) = geometry(points.len(), table_size);
    info!(
        interpolation_factor = factor,
        table_len,
        points = points.len(),
        "sized path lookup table"
    );

    let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
    let x = fill_axis(&xs, factor);
    let y = fill_axis(&ys, factor);
    debug_assert_eq!(x.len(), table_len);
    debug_assert_eq!(y.len(), table_len);

    Ok(TablePair {
        x: LookupTable::from_samples(x),
        y: LookupTable::from_samples(y),
    })
}

/// Derives the interpolation factor and the resulting table length.
///
/// The table must hold the forward traversal and its mirror. If the
/// configured capacity cannot even hold the raw points twice, the table grows
/// to exactly `2 * n` with no interpolation. Otherwise the factor is the
/// largest number of synthetic points per adjacent pair that still fits the
/// forward half into `capacity / 2`, and the length shrinks to exactly what
/// that traversal needs. The result is always even and never exceeds
/// `max(capacity, 2 * n)`.
fn geometry(point_count: usize, capacity: usize) -> (usize, usize) {
    if capacity <= 2 * point_count {
        (0, 2 * point_count)
    } else {
        let factor = (capacity / 2 - point_count) / (point_count - 1);
        (factor, 2 * (point_count + factor * (point_count - 1)))
    }
}

/// Fills one axis: the forward traversal with `factor` interpolated points
/// per adjacent pair, followed by the exact mirror.
///
/// Each pair contributes `factor + 1` entries. The first is the traced point
/// itself; each following entry moves one per-step increment
/// (`|current - next| / (factor + 1)`) in the pair's direction, accumulated
/// in `f64` and truncated to `i16` on store. The final traced point is
/// appended once to close the forward half. Caller guarantees at least two
/// values.
fn fill_axis(values: &[f64], factor: usize) -> Vec<i16> {
    let forward_len = (values.len() - 1) * (factor + 1) + 1;
    let mut table = Vec::with_capacity(forward_len * 2);

    for pair in values.windows(2) {
        let (current, next) = (pair[0], pair[1]);
        let step = (current - next).abs() / (factor + 1) as f64;
        let direction = Direction::between(current, next);

        let mut value = current;
        table.push(value as i16);
        for _ in 0..factor {
            match direction {
                Direction::Rising => value += step,
                Direction::Falling => value -= step,
                Direction::Flat => value = current,
            }
            table.push(value as i16);
        }
    }
    table.push(values[values.len() - 1] as i16);
    debug_assert_eq!(table.len(), forward_len);

    for i in (0..forward_len).rev() {
        let sample = table[i];
        table.push(sample);
    }
    table
}
