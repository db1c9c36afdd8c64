// Copyright 2026 the Dendro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The editing session: undo snapshots and change notification around
//! every sequence mutation.

use kurbo::Point;

use dendro_annotations::{Annotation, nearest_year, refresh_years};
use dendro_history::History;
use dendro_series::{MeasurementSeries, SeriesError, SeriesSnapshot};

use crate::document::{DocumentError, TreeRingDocument};

/// Callback sink invoked after every successful sequence mutation.
///
/// This is where the hosting viewer hangs its year-label refresh, marker
/// re-render, and plot update. The unit implementation ignores the signal,
/// for embedders that poll the series revision instead.
pub trait SequenceObserver {
    /// The sequence changed; derived displays should refresh.
    fn sequence_changed(&mut self);
}

impl SequenceObserver for () {
    fn sequence_changed(&mut self) {}
}

/// One editing session over a document.
///
/// `Session` is the concrete form of the contract the sequence model
/// assumes of its caller. Every mutating entry point:
///
/// 1. pushes an undo snapshot (clearing redo — a new edit invalidates
///    forward history),
/// 2. applies the sequence operation,
/// 3. on success refreshes the annotations' derived years and notifies the
///    observer,
/// 4. on failure discards the just-pushed snapshot: the model was never
///    touched, so the failed attempt must not appear as an undo step.
///
/// Annotation creation and deletion do not participate in undo history;
/// snapshots cover the dated sequence state only.
#[derive(Debug)]
pub struct Session<O = ()> {
    document: TreeRingDocument,
    history: History<SeriesSnapshot>,
    observer: O,
}

impl<O: SequenceObserver> Session<O> {
    /// Starts a session over `document`, reporting changes to `observer`.
    #[must_use]
    pub fn new(document: TreeRingDocument, observer: O) -> Self {
        Self {
            document,
            history: History::new(),
            observer,
        }
    }

    /// The document under edit.
    #[must_use]
    pub fn document(&self) -> &TreeRingDocument {
        &self.document
    }

    /// Ends the session, handing the document back.
    #[must_use]
    pub fn into_document(self) -> TreeRingDocument {
        self.document
    }

    /// The measurement sequence under edit.
    #[must_use]
    pub fn series(&self) -> &MeasurementSeries {
        self.document.series()
    }

    /// Returns `true` if undo is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Returns `true` if redo is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Appends a start point.
    pub fn append_start(&mut self, location: Point) -> usize {
        self.history.push(self.document.series().snapshot());
        let index = self.document.series_mut().append_start(location);
        self.after_success();
        index
    }

    /// Appends a break point.
    pub fn append_break(&mut self, location: Point) -> usize {
        self.history.push(self.document.series().snapshot());
        let index = self.document.series_mut().append_break(location);
        self.after_success();
        index
    }

    /// Appends a measurement at the cursor date.
    pub fn append(&mut self, location: Point) -> usize {
        self.history.push(self.document.series().snapshot());
        let index = self.document.series_mut().append(location);
        self.after_success();
        index
    }

    /// Deletes the point at `i`.
    pub fn delete_point(&mut self, i: usize) -> Result<(), SeriesError> {
        self.mutate(|series| series.delete_point(i))
    }

    /// Inserts a measurement at a picked coordinate.
    pub fn insert_point(&mut self, location: Point) -> Result<usize, SeriesError> {
        self.mutate(|series| series.insert_point(location))
    }

    /// Inserts a zero-growth year after the measurement at `i`.
    pub fn insert_zero_growth(&mut self, i: usize, location: Point) -> Result<usize, SeriesError> {
        self.mutate(|series| series.insert_zero_growth(i, location))
    }

    /// Removes the inclusive range between two picked indices.
    pub fn cut(&mut self, i: usize, j: usize) -> Result<(), SeriesError> {
        self.mutate(|series| series.cut(i, j))
    }

    /// Converts the measurement at `i` into a start point.
    pub fn convert_to_start(&mut self, i: usize) -> Result<(), SeriesError> {
        self.mutate(|series| series.convert_to_start(i))
    }

    /// Dates the measurement at `i` to `year`, re-chaining the sequence
    /// around it.
    ///
    /// `current_year` is the newest acceptable year (the caller's calendar
    /// year); later years are rejected before anything is touched.
    pub fn date_point(&mut self, i: usize, year: i32, current_year: i32) -> Result<(), SeriesError> {
        if year > current_year {
            return Err(SeriesError::YearBeyondPresent {
                year,
                current: current_year,
            });
        }
        self.mutate(|series| series.set_year_at(i, year))
    }

    /// Restores the most recent undo snapshot. Returns `false` when there
    /// is none.
    pub fn undo(&mut self) -> bool {
        let current = self.document.series().snapshot();
        match self.history.undo(current) {
            Some(snapshot) => {
                self.document.series_mut().restore(snapshot);
                self.after_success();
                true
            }
            None => false,
        }
    }

    /// Restores the most recent redo snapshot. Returns `false` when there
    /// is none.
    pub fn redo(&mut self) -> bool {
        let current = self.document.series().snapshot();
        match self.history.redo(current) {
            Some(snapshot) => {
                self.document.series_mut().restore(snapshot);
                self.after_success();
                true
            }
            None => false,
        }
    }

    /// Creates an annotation at `location`, deriving its year from the
    /// nearest dated point. Returns the new key.
    pub fn create_annotation(&mut self, location: Point, text: impl Into<String>) -> usize {
        let mut annotation = Annotation::new(location, text);
        annotation.calculated_year = nearest_year(self.document.series(), location);
        self.document.annotations_mut().create(annotation)
    }

    /// Deletes the annotation at `key`, leaving the keyspace sparse.
    pub fn delete_annotation(&mut self, key: usize) -> Option<Annotation> {
        self.document.annotations_mut().delete(key)
    }

    /// Serializes the document, stamping `save_date` first.
    ///
    /// A failure leaves the in-memory state untouched so the save can be
    /// retried.
    pub fn save_json(&mut self, save_date: &str) -> Result<String, DocumentError> {
        self.document.set_save_date(save_date);
        self.document.to_json()
    }

    fn mutate<T>(
        &mut self,
        op: impl FnOnce(&mut MeasurementSeries) -> Result<T, SeriesError>,
    ) -> Result<T, SeriesError> {
        self.history.push(self.document.series().snapshot());
        match op(self.document.series_mut()) {
            Ok(value) => {
                self.after_success();
                Ok(value)
            }
            Err(err) => {
                let _ = self.history.discard_last_push();
                Err(err)
            }
        }
    }

    fn after_success(&mut self) {
        let (series, annotations) = self.document.series_and_annotations_mut();
        refresh_years(annotations, series);
        self.observer.sequence_changed();
    }
}
