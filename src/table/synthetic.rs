//! Analytic table fills for the calibration waveforms.

use std::f64::consts::PI;

use super::LookupTable;

/// High level of the rectangle wave.
pub(crate) const RECT_LEVEL: i16 = 30_000;

/// One full-scale sine cycle: `round(i16::MAX * sin(2*pi*i/len))`.
pub(crate) fn sine(table_size: usize) -> LookupTable {
    let samples = (0..table_size)
        .map(|i| {
            let phase = 2.0 * PI * i as f64 / table_size as f64;
            (i16::MAX as f64 * phase.sin()).round() as i16
        })
        .collect();
    LookupTable::from_samples(samples)
}

/// One rectangle cycle: first half 0, second half [`RECT_LEVEL`].
pub(crate) fn rectangle(table_size: usize) -> LookupTable {
    let samples = (0..table_size)
        .map(|i| if i < table_size / 2 { 0 } else { RECT_LEVEL })
        .collect();
    LookupTable::from_samples(samples)
}
