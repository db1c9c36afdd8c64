// Copyright 2026 the Dendro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by sequence operations.

use thiserror::Error;

/// Why a sequence operation was rejected.
///
/// Every rejection happens before any mutation: a failed operation leaves
/// the sequence exactly as it was, so callers can surface the message and
/// carry on.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum SeriesError {
    /// No existing point was close enough to anchor the operation.
    #[error("no measurable point near the picked coordinate")]
    NoNearbyPoint,
    /// The index does not name a point.
    #[error("point index {0} is out of bounds")]
    OutOfBounds(usize),
    /// A neighboring dated point the operation needs does not exist.
    #[error("the operation needs a neighboring dated point that does not exist")]
    MissingNeighbor,
    /// Cut endpoints must differ.
    #[error("cut endpoints must name two different points")]
    DegenerateCut,
    /// The operation only applies to measurement points.
    #[error("point index {0} is not a measurement")]
    NotAMeasurement(usize),
    /// Zero-growth years can only be inserted at a year boundary.
    #[error("zero-growth years can only be inserted at a year boundary")]
    ZeroGrowthMidYear,
    /// A user-supplied year lies in the future.
    #[error("year {year} is later than the current year {current}")]
    YearBeyondPresent {
        /// The rejected year.
        year: i32,
        /// The newest acceptable year.
        current: i32,
    },
}
