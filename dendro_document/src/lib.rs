// Copyright 2026 the Dendro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dendro Document: persisted state and the editing session.
//!
//! This crate composes the Dendro building blocks into the two things a
//! hosting viewer actually holds:
//!
//! - [`TreeRingDocument`]: the per-specimen state that round-trips through
//!   the persisted JSON form — the measurement sequence with its dating
//!   cursor and preferences, the annotation store, the configured
//!   [`AttributeGroup`]s, the pixels-per-millimeter calibration, and the
//!   save date. The wire format keeps the legacy encoding existing
//!   documents use: flag-triple point records, `latLng` coordinates, and
//!   sparse integer-keyed objects.
//! - [`Session`]: the editing contract around the document. Every mutation
//!   pushes an undo snapshot first, and every success refreshes the
//!   annotations' derived years and notifies the [`SequenceObserver`] so
//!   year labels, markers, and plots can redraw.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use dendro_document::{Session, TreeRingDocument};
//! use dendro_series::{Direction, Granularity, MeasurementPrefs};
//!
//! let prefs = MeasurementPrefs::new(Direction::Forward, Granularity::Annual);
//! let mut document = TreeRingDocument::new(prefs);
//! document.series_mut().set_next_year(1900);
//!
//! let mut session = Session::new(document, ());
//! session.append_start(Point::new(0.0, 0.0));
//! session.append(Point::new(1.0, 0.0));
//!
//! assert_eq!(session.series().year(), 1901);
//! assert!(session.undo());
//! assert_eq!(session.series().year(), 1900);
//!
//! let json = session.save_json("2026-08-07").unwrap();
//! let reloaded = TreeRingDocument::from_json(&json).unwrap();
//! assert_eq!(reloaded.series().index(), session.series().index());
//! ```

mod document;
mod record;
mod session;

pub use document::{DocumentError, TreeRingDocument};
pub use record::{AttributeGroup, AttributeOption};
pub use session::{SequenceObserver, Session};
