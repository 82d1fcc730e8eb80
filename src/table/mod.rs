//! Lookup-table construction.
//!
//! Every signal this crate produces, calibration waveform or traced drawing,
//! is played back from a precomputed cyclic table of 16-bit samples that a
//! phase accumulator walks at a fractional step rate. This module builds
//! those tables:
//!
//! - [`synthetic`] fills a table analytically (sine, rectangle), and the
//!   paired channel reads the same table at a fixed quadrature offset;
//! - [`path`] resamples a normalized drawing path onto a pair of tables (one
//!   per axis), inserting linearly interpolated points between the traced
//!   ones and mirroring the whole traversal so the loop closes without a
//!   discontinuity.
//!
//! The table length is chosen by the builder and is always even: it stores
//! the path traversed forward and then reversed, so the last sample of the
//! forward half equals the first of the backward half, and the final sample
//! wraps back to the start value.

mod path;
mod synthetic;

use crate::config::RenderConfig;
use crate::error::Result;
use crate::geometry::Point;

/// A fixed-length, conceptually circular array of 16-bit samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTable {
    samples: Vec<i16>,
}

impl LookupTable {
    pub(crate) fn from_samples(samples: Vec<i16>) -> Self {
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Reads the sample under a fractional phase: the integer part indexes
    /// the table, wrapping at the table length.
    pub fn at(&self, phase: f64) -> i16 {
        self.samples[phase as usize % self.samples.len()]
    }

    pub fn as_slice(&self) -> &[i16] {
        &self.samples
    }
}

/// The signal to synthesize: a calibration waveform or a traced drawing.
///
/// `Path` carries the already-normalized point path (drawing order = temporal
/// order in the signal).
#[derive(Debug, Clone)]
pub enum Waveform {
    /// Full-scale sine, with a cosine companion on the right channel.
    Sine,
    /// 50%-duty rectangle (0 / 30000), with an antiphase companion.
    Rectangle,
    /// A traced drawing; X drives the left channel, Y the right.
    Path(Vec<Point>),
}

/// One lookup table per axis of a traced drawing.
#[derive(Debug, Clone)]
pub struct TablePair {
    pub x: LookupTable,
    pub y: LookupTable,
}

/// The tables a render run plays from, together with how the two channels
/// walk them.
#[derive(Debug, Clone)]
pub enum TableSet {
    /// One shared table; the right channel's accumulator starts
    /// `right_offset` samples ahead (synthetic waveforms).
    Quadrature {
        table: LookupTable,
        right_offset: usize,
    },
    /// Two tables driven by a single shared accumulator, so X and Y move
    /// through the drawing in lockstep (path mode).
    Locked(TablePair),
}

impl TableSet {
    /// Builds the lookup table(s) for a waveform.
    ///
    /// # Errors
    ///
    /// Path mode fails with [`crate::Error::InsufficientPoints`] when the
    /// path has fewer than two points.
    pub fn build(waveform: &Waveform, config: &RenderConfig) -> Result<Self> {
        match waveform {
            Waveform::Sine => Ok(Self::Quadrature {
                table: synthetic::sine(config.table_size),
                right_offset: config.table_size / 4,
            }),
            Waveform::Rectangle => Ok(Self::Quadrature {
                table: synthetic::rectangle(config.table_size),
                right_offset: config.table_size / 2,
            }),
            Waveform::Path(points) => Ok(Self::Locked(path::build(points, config.table_size)?)),
        }
    }

    /// Length of the table(s); both tables of a pair are always equal-length.
    pub fn table_len(&self) -> usize {
        match self {
            Self::Quadrature { table, .. } => table.len(),
            Self::Locked(pair) => pair.x.len(),
        }
    }

    /// Whether this set came from a traced drawing.
    pub fn is_path(&self) -> bool {
        matches!(self, Self::Locked(_))
    }
}
