//! Phase-accumulator rendering of lookup tables into sample buffers.
//!
//! This is direct digital synthesis: each output sample reads the table under
//! the integer part of a fractional phase, then the phase advances by
//! `frequency * table_len / sample_rate`. The ratio of frequency to sample
//! rate fixes how many table cycles complete per second of audio, so a table
//! holding one full closed drawing played at that step rate traverses the
//! drawing exactly `frequency` times per second.
//!
//! The per-sample increment is below one table length for any valid
//! frequency, so a single conditional subtraction is enough to wrap the
//! phase.
//!
//! Path renders additionally overwrite a fixed prefix window of both channels
//! with a constant-then-inverted pulse, giving an oscilloscope a sharp
//! falling edge at a known sample offset to trigger on.

use crate::config::SampleRate;
use crate::error::{Error, Result};
use crate::table::TableSet;

/// Trigger pulse level; the window ends with its negation.
const TRIGGER_LEVEL: i16 = 32_500;
/// Samples `[0, TRIGGER_FALL)` hold the level, `[TRIGGER_FALL, TRIGGER_WINDOW)`
/// its negation.
const TRIGGER_FALL: usize = 90;
const TRIGGER_WINDOW: usize = 100;

/// Two equal-length channels of 16-bit samples (left = X, right = Y).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StereoBuffer {
    pub left: Vec<i16>,
    pub right: Vec<i16>,
}

impl StereoBuffer {
    fn zeroed(num_samples: usize) -> Self {
        Self {
            left: vec![0; num_samples],
            right: vec![0; num_samples],
        }
    }

    /// Number of sample frames per channel.
    pub fn len(&self) -> usize {
        self.left.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }
}

/// Renders `num_samples` frames from a table set.
///
/// Synthetic sets walk one shared table with two independently offset
/// accumulators; path sets walk both axis tables with a single shared
/// accumulator, then receive the trigger pulse over their prefix window.
///
/// # Errors
///
/// A path table longer than the requested signal cannot complete even one
/// traversal, so rendering fails with [`Error::TableExceedsSignal`] before
/// any sample is produced.
pub fn render(
    tables: &TableSet,
    frequency: f64,
    sample_rate: SampleRate,
    num_samples: usize,
) -> Result<StereoBuffer> {
    let table_len = tables.table_len();
    if tables.is_path() && table_len > num_samples {
        return Err(Error::TableExceedsSignal {
            table_len,
            num_samples,
        });
    }

    let increment = frequency * table_len as f64 / sample_rate.as_f64();
    let mut buffer = StereoBuffer::zeroed(num_samples);

    match tables {
        TableSet::Quadrature {
            table,
            right_offset,
        } => {
            let mut phase_left = 0.0;
            let mut phase_right = *right_offset as f64;
            for i in 0..num_samples {
                buffer.left[i] = table.at(phase_left);
                phase_left += increment;
                if phase_left >= table_len as f64 {
                    phase_left -= table_len as f64;
                }

                buffer.right[i] = table.at(phase_right);
                phase_right += increment;
                if phase_right >= table_len as f64 {
                    phase_right -= table_len as f64;
                }
            }
        }
        TableSet::Locked(pair) => {
            let mut phase = 0.0;
            for i in 0..num_samples {
                buffer.left[i] = pair.x.at(phase);
                buffer.right[i] = pair.y.at(phase);
                phase += increment;
                if phase >= table_len as f64 {
                    phase -= table_len as f64;
                }
            }
            inject_trigger(&mut buffer);
        }
    }

    Ok(buffer)
}

/// Overwrites the prefix window of both channels with the trigger pulse.
fn inject_trigger(buffer: &mut StereoBuffer) {
    let window = TRIGGER_WINDOW.min(buffer.len());
    for i in 0..window {
        let level = if i < TRIGGER_FALL {
            TRIGGER_LEVEL
        } else {
            -TRIGGER_LEVEL
        };
        buffer.left[i] = level;
        buffer.right[i] = level;
    }
}
