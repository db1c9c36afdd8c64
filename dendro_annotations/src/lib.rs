// Copyright 2026 the Dendro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dendro Annotations: spatial notes over a measured specimen.
//!
//! Annotations are positioned by map coordinate, not by sequence index;
//! they live in their own sparse, integer-keyed [`AnnotationStore`] with a
//! lifecycle independent of the measurement points. What *is* derived from
//! the sequence is each annotation's year: [`nearest_year`] resolves the
//! dated point closest to the annotation's coordinate, and
//! [`refresh_years`] recomputes every annotation after the sequence
//! changes. Points never delete annotations; they only refresh their
//! derived years.
//!
//! Deleting an annotation leaves a hole in the keyspace on purpose: keys
//! are stable handles that outlive neighboring deletions, and the next
//! created annotation takes a fresh key rather than reusing one.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use dendro_annotations::{Annotation, AnnotationStore};
//!
//! let mut store = AnnotationStore::new();
//! let key = store.create(Annotation::new(Point::new(3.0, 1.0), "frost ring"));
//! assert_eq!(store.get(key).map(|a| a.text.as_str()), Some("frost ring"));
//!
//! store.delete(key);
//! assert!(store.get(key).is_none());
//!
//! // Keys are never reused.
//! let next = store.create(Annotation::new(Point::ZERO, "bark"));
//! assert_eq!(next, key + 1);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::Point;

use dendro_geom::planar_distance;
use dendro_series::MeasurementSeries;

/// A spatial note attached to the specimen image.
#[derive(Clone, Debug, PartialEq)]
pub struct Annotation {
    /// Map coordinate the annotation is pinned to.
    pub location: Point,
    /// Free-form note text.
    pub text: String,
    /// Codes of the structured attributes assigned to this annotation.
    pub attribute_codes: Vec<String>,
    /// Display color tag, if one was chosen.
    pub color_tag: Option<String>,
    /// Year derived from the nearest dated point, with
    /// [`Annotation::year_adjustment`] applied. Refreshed whenever the
    /// sequence changes.
    pub calculated_year: Option<i32>,
    /// Manual offset applied on top of the derived year.
    pub year_adjustment: i32,
}

impl Annotation {
    /// Creates an annotation at `location` with the given text and no
    /// attributes, color, or derived year.
    #[must_use]
    pub fn new(location: Point, text: impl Into<String>) -> Self {
        Self {
            location,
            text: text.into(),
            attribute_codes: Vec::new(),
            color_tag: None,
            calculated_year: None,
            year_adjustment: 0,
        }
    }
}

/// Sparse integer-keyed collection of annotations.
///
/// Keys are handed out by a monotone counter and never reused; deletion
/// leaves the keyspace sparse.
#[derive(Clone, Debug, Default)]
pub struct AnnotationStore {
    entries: HashMap<usize, Annotation>,
    next_key: usize,
}

impl AnnotationStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a store from persisted `(key, annotation)` entries.
    ///
    /// The next created annotation takes a key past the largest loaded one,
    /// so persisted holes stay holes.
    #[must_use]
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (usize, Annotation)>,
    {
        let entries: HashMap<usize, Annotation> = entries.into_iter().collect();
        let next_key = entries.keys().max().map_or(0, |k| k + 1);
        Self { entries, next_key }
    }

    /// Number of live annotations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no annotations exist.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Adds an annotation at the next integer key, returning the key.
    pub fn create(&mut self, annotation: Annotation) -> usize {
        let key = self.next_key;
        self.entries.insert(key, annotation);
        self.next_key += 1;
        key
    }

    /// Removes and returns the annotation at `key`.
    ///
    /// Remaining entries keep their keys; the keyspace is not compacted.
    pub fn delete(&mut self, key: usize) -> Option<Annotation> {
        self.entries.remove(&key)
    }

    /// Returns the annotation at `key`, if present.
    #[must_use]
    pub fn get(&self, key: usize) -> Option<&Annotation> {
        self.entries.get(&key)
    }

    /// Returns the annotation at `key` mutably, if present.
    #[must_use]
    pub fn get_mut(&mut self, key: usize) -> Option<&mut Annotation> {
        self.entries.get_mut(&key)
    }

    /// Iterates over `(key, annotation)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Annotation)> {
        self.entries.iter().map(|(k, a)| (*k, a))
    }

    /// The live keys in ascending order, for deterministic output.
    #[must_use]
    pub fn sorted_keys(&self) -> Vec<usize> {
        let mut keys: Vec<usize> = self.entries.keys().copied().collect();
        keys.sort_unstable();
        keys
    }
}

/// Resolves the year of the dated point nearest to `query`.
///
/// The scan starts from the point closest to the coordinate. A dated point
/// answers directly; a start or break walks outward to the nearest dated
/// neighbor on each side and the closer one (by literal coordinate
/// distance) wins, with single-sided fallbacks at the sequence ends.
/// Returns `None` when the sequence holds no dated point at all.
#[must_use]
pub fn nearest_year(series: &MeasurementSeries, query: Point) -> Option<i32> {
    let coords = series.coordinates();
    let idx = dendro_geom::nearest_index(&coords, query)?;
    let points = series.points();
    if let Some(year) = points[idx].year() {
        return Some(year);
    }

    let left = points[..idx]
        .iter()
        .rev()
        .find_map(|p| p.year().map(|y| (y, p.location())));
    let right = points[idx + 1..]
        .iter()
        .find_map(|p| p.year().map(|y| (y, p.location())));

    match (left, right) {
        (Some((ly, lloc)), Some((ry, rloc))) => {
            if planar_distance(lloc, query) <= planar_distance(rloc, query) {
                Some(ly)
            } else {
                Some(ry)
            }
        }
        (Some((y, _)), None) | (None, Some((y, _))) => Some(y),
        (None, None) => None,
    }
}

/// Recomputes the derived year of every annotation against the live
/// sequence, applying each annotation's manual adjustment.
pub fn refresh_years(store: &mut AnnotationStore, series: &MeasurementSeries) {
    for (_, annotation) in store.entries.iter_mut() {
        annotation.calculated_year =
            nearest_year(series, annotation.location).map(|y| y + annotation.year_adjustment);
    }
}
