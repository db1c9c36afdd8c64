// Copyright 2026 the Dendro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dendro Series: the measurement sequence model for tree-ring annotation.
//!
//! A user measuring a scanned specimen clicks along the sample, and each
//! click becomes a point in an ordered sequence: a [`RingPoint::Start`]
//! opening a measured run, dated [`RingPoint::Measurement`] boundaries, and
//! [`RingPoint::Break`] markers where the specimen is physically
//! discontinuous. Consecutive point distances are the ring widths; this
//! crate owns the sequence and the chronological bookkeeping, while
//! rendering, toolbars, and export formatting live with the embedding
//! viewer.
//!
//! The core type is [`MeasurementSeries`]. It tracks:
//! - The compacted point array (`index()` is always its length).
//! - A [`DatingCursor`] describing the *next* measurement to create.
//! - The [`MeasurementPrefs`] — measuring [`Direction`] and
//!   [`Granularity`] — that every operation consults.
//! - A revision counter that bumps on every successful mutation.
//!
//! Operations cover the full editing vocabulary: append, delete (with the
//! break/start adjacency rules), insert at a picked coordinate, zero-growth
//! years, range cuts, conversion to start points, whole-series re-dating,
//! and read-only time reversal ([`reverse_points`]) for export. Every
//! operation either fully applies or returns a [`SeriesError`] with the
//! sequence untouched.
//!
//! Dating arithmetic is concentrated in two chain primitives,
//! [`MeasurementPrefs::next_date`] and [`MeasurementPrefs::prev_date`],
//! rather than scattered across call sites; re-dating after a structural
//! edit is always some walk of that chain.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use dendro_series::{Direction, Granularity, MeasurementPrefs, MeasurementSeries};
//!
//! let prefs = MeasurementPrefs::new(Direction::Forward, Granularity::SubAnnual);
//! let mut series = MeasurementSeries::new(prefs);
//! series.set_next_year(2000);
//!
//! series.append_start(Point::new(0.0, 0.0));
//! series.append(Point::new(1.0, 0.0)); // 2000 earlywood
//! series.append(Point::new(2.0, 0.0)); // 2000 latewood
//!
//! assert_eq!(series.year(), 2001);
//! assert!(series.earlywood());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod point;
mod prefs;
mod reverse;
mod series;

pub use error::SeriesError;
pub use point::RingPoint;
pub use prefs::{DatingCursor, Direction, Granularity, MeasurementPrefs};
pub use reverse::reverse_points;
pub use series::{MeasurementSeries, SeriesSnapshot};
