// Copyright 2026 the Dendro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The in-memory document and its JSON round-trip.

use std::collections::BTreeMap;

use thiserror::Error;

use dendro_annotations::AnnotationStore;
use dendro_series::{
    DatingCursor, Direction, Granularity, MeasurementPrefs, MeasurementSeries, RingPoint,
};

use crate::record::{AnnotationRecord, AttributeGroup, DocumentRecord, PointRecord};

/// Why a document failed to load or save.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The JSON itself could not be parsed or written.
    #[error("malformed document JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A point record carried no usable variant.
    #[error("point {index} is neither a start, a break, nor a dated measurement")]
    MalformedPoint {
        /// Persisted key of the offending point.
        index: usize,
    },
}

/// Everything one measured specimen persists: the measurement sequence,
/// its annotations, the configured attribute groups, and the
/// pixels-per-millimeter calibration.
///
/// The document is a plain composition; all sequence editing goes through
/// [`MeasurementSeries`]'s operations (usually via [`crate::Session`],
/// which adds the undo/notify contract on top).
#[derive(Clone, Debug)]
pub struct TreeRingDocument {
    series: MeasurementSeries,
    annotations: AnnotationStore,
    attributes: Vec<AttributeGroup>,
    pixels_per_millimeter: Option<f64>,
    save_date: Option<String>,
}

impl TreeRingDocument {
    /// Creates an empty document measured with `prefs`.
    #[must_use]
    pub fn new(prefs: MeasurementPrefs) -> Self {
        Self {
            series: MeasurementSeries::new(prefs),
            annotations: AnnotationStore::new(),
            attributes: Vec::new(),
            pixels_per_millimeter: None,
            save_date: None,
        }
    }

    /// The measurement sequence.
    #[must_use]
    pub fn series(&self) -> &MeasurementSeries {
        &self.series
    }

    /// The measurement sequence, mutably.
    #[must_use]
    pub fn series_mut(&mut self) -> &mut MeasurementSeries {
        &mut self.series
    }

    /// The annotation store.
    #[must_use]
    pub fn annotations(&self) -> &AnnotationStore {
        &self.annotations
    }

    /// The annotation store, mutably.
    #[must_use]
    pub fn annotations_mut(&mut self) -> &mut AnnotationStore {
        &mut self.annotations
    }

    /// Split borrow of the sequence and the annotation store, for
    /// refreshing derived annotation state against the live sequence.
    #[must_use]
    pub fn series_and_annotations_mut(&mut self) -> (&MeasurementSeries, &mut AnnotationStore) {
        (&self.series, &mut self.annotations)
    }

    /// The configured annotation attribute groups.
    #[must_use]
    pub fn attributes(&self) -> &[AttributeGroup] {
        &self.attributes
    }

    /// The configured annotation attribute groups, mutably.
    #[must_use]
    pub fn attributes_mut(&mut self) -> &mut Vec<AttributeGroup> {
        &mut self.attributes
    }

    /// The pixels-per-millimeter calibration, if one has been set.
    #[must_use]
    pub fn calibration(&self) -> Option<f64> {
        self.pixels_per_millimeter
    }

    /// Sets or clears the pixels-per-millimeter calibration.
    pub fn set_calibration(&mut self, pixels_per_millimeter: Option<f64>) {
        self.pixels_per_millimeter = pixels_per_millimeter;
    }

    /// The save date recorded by the most recent save, if any.
    #[must_use]
    pub fn save_date(&self) -> Option<&str> {
        self.save_date.as_deref()
    }

    /// Stamps the save date recorded in subsequent saves.
    pub fn set_save_date(&mut self, save_date: impl Into<String>) {
        self.save_date = Some(save_date.into());
    }

    /// Serializes the document to its persisted JSON form.
    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string(&self.encode())?)
    }

    /// Loads a document from its persisted JSON form.
    ///
    /// Sparse point keyspaces are compacted in key order; records flagged
    /// `skip` are dropped the same way holes are. The dating cursor is
    /// restored verbatim so measuring resumes where it left off.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let record: DocumentRecord = serde_json::from_str(json)?;
        Self::decode(record)
    }

    fn encode(&self) -> DocumentRecord {
        let points: BTreeMap<usize, PointRecord> = self
            .series
            .points()
            .iter()
            .enumerate()
            .map(|(i, p)| (i, PointRecord::from_point(p)))
            .collect();
        let annotations: BTreeMap<usize, AnnotationRecord> = self
            .annotations
            .iter()
            .map(|(k, a)| (k, AnnotationRecord::from_annotation(a)))
            .collect();

        DocumentRecord {
            year: self.series.year(),
            earlywood: self.series.earlywood(),
            index: self.series.index(),
            points,
            forward_direction: self.series.prefs().direction.is_forward(),
            sub_annual: self.series.prefs().granularity.is_sub_annual(),
            annotations,
            attributes_object_array: self.attributes.clone(),
            ppm: self.pixels_per_millimeter,
            save_date: self.save_date.clone(),
        }
    }

    fn decode(record: DocumentRecord) -> Result<Self, DocumentError> {
        let prefs = MeasurementPrefs::new(
            if record.forward_direction {
                Direction::Forward
            } else {
                Direction::Backward
            },
            if record.sub_annual {
                Granularity::SubAnnual
            } else {
                Granularity::Annual
            },
        );

        // BTreeMap iteration is key-ascending, so sparse keyspaces compact
        // in sequence order.
        let mut points: Vec<RingPoint> = Vec::with_capacity(record.points.len());
        for (key, point) in record.points {
            if point.skip {
                continue;
            }
            points.push(point.into_point(key)?);
        }

        let cursor = DatingCursor {
            year: record.year,
            earlywood: record.earlywood,
        };
        let series = MeasurementSeries::from_parts(prefs, points, cursor);
        let annotations = AnnotationStore::from_entries(
            record
                .annotations
                .into_iter()
                .map(|(k, a)| (k, a.into_annotation())),
        );

        Ok(Self {
            series,
            annotations,
            attributes: record.attributes_object_array,
            pixels_per_millimeter: record.ppm,
            save_date: record.save_date,
        })
    }
}
