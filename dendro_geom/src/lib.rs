// Copyright 2026 the Dendro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dendro Geom: geometry helpers for tree-ring measurement tools.
//!
//! This crate provides the small geometric vocabulary the measurement core
//! needs when a user picks coordinates on a scanned-specimen map:
//!
//! - [`Ruler`]: converts between map coordinates and real-world lengths by
//!   projecting through a caller-supplied [`MapProjection`] at a fixed
//!   native zoom level and dividing by a pixels-per-unit calibration.
//! - [`nearest_index`]: the closest existing point to a picked coordinate.
//! - [`insertion_slot`]: where a newly picked point belongs in an ordered
//!   point sequence, using a law-of-cosines included-angle comparison to
//!   decide which side of the closest point (or of a stack of coincident
//!   points) the pick falls on.
//!
//! The crate does **not** know anything about the measurement sequence
//! itself; callers hand in a slice of optional coordinates in sequence
//! order. Holes (`None`) are skipped by every query, so sparse storage can
//! be queried directly.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use dendro_geom::{insertion_slot, nearest_index};
//!
//! let points = [
//!     Some(Point::new(0.0, 0.0)),
//!     Some(Point::new(10.0, 0.0)),
//!     Some(Point::new(20.0, 0.0)),
//! ];
//!
//! // A pick near the middle point resolves to it.
//! assert_eq!(nearest_index(&points, Point::new(9.0, 1.0)), Some(1));
//!
//! // A pick between the middle and last points belongs in slot 2.
//! assert_eq!(insertion_slot(&points, Point::new(14.0, 0.5)), Some(2));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod nearest;
mod ruler;

pub use nearest::{insertion_slot, nearest_index, planar_distance};
pub use ruler::{MapProjection, Ruler};
