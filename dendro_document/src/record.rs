// Copyright 2026 the Dendro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Serde records mirroring the persisted JSON shapes.
//!
//! The on-disk format keeps the legacy encoding the hosting viewers already
//! produce: point variants as a `start`/`skip`/`break` flag triple with
//! optional date fields, coordinates as `latLng` objects, and sparse
//! collections as objects keyed by stringified integers. The records here
//! are transport shapes only; conversion into the typed model happens in
//! [`crate::TreeRingDocument`].

use kurbo::Point;
use serde::{Deserialize, Serialize};

use dendro_annotations::Annotation;
use dendro_series::RingPoint;

/// A map coordinate in the persisted `{lat, lng}` form.
///
/// The in-memory model uses `kurbo::Point` with `x = lng` and `y = lat`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct LatLngRecord {
    pub(crate) lat: f64,
    pub(crate) lng: f64,
}

impl From<Point> for LatLngRecord {
    fn from(point: Point) -> Self {
        Self {
            lat: point.y,
            lng: point.x,
        }
    }
}

impl From<LatLngRecord> for Point {
    fn from(record: LatLngRecord) -> Self {
        Self::new(record.lng, record.lat)
    }
}

/// One point slot in the legacy flag-triple encoding.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct PointRecord {
    #[serde(default)]
    pub(crate) start: bool,
    #[serde(default)]
    pub(crate) skip: bool,
    #[serde(rename = "break", default)]
    pub(crate) gap: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) earlywood: Option<bool>,
    #[serde(rename = "latLng")]
    pub(crate) lat_lng: LatLngRecord,
}

impl PointRecord {
    pub(crate) fn from_point(point: &RingPoint) -> Self {
        let lat_lng = LatLngRecord::from(point.location());
        match point {
            RingPoint::Start { .. } => Self {
                start: true,
                skip: false,
                gap: false,
                year: None,
                earlywood: None,
                lat_lng,
            },
            RingPoint::Break { .. } => Self {
                start: false,
                skip: false,
                gap: true,
                year: None,
                earlywood: None,
                lat_lng,
            },
            RingPoint::Measurement {
                year, earlywood, ..
            } => Self {
                start: false,
                skip: false,
                gap: false,
                year: Some(*year),
                earlywood: Some(*earlywood),
                lat_lng,
            },
        }
    }

    /// Decodes into the typed model. Flags win over stray date fields, the
    /// way the legacy truthiness checks behaved; a plain record without a
    /// year is malformed.
    pub(crate) fn into_point(self, index: usize) -> Result<RingPoint, crate::DocumentError> {
        let location = Point::from(self.lat_lng);
        if self.start {
            return Ok(RingPoint::Start { location });
        }
        if self.gap {
            return Ok(RingPoint::Break { location });
        }
        let year = self
            .year
            .ok_or(crate::DocumentError::MalformedPoint { index })?;
        Ok(RingPoint::Measurement {
            year,
            earlywood: self.earlywood.unwrap_or(true),
            location,
        })
    }
}

/// One annotation in the persisted form.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct AnnotationRecord {
    #[serde(rename = "latLng")]
    pub(crate) lat_lng: LatLngRecord,
    #[serde(default)]
    pub(crate) text: String,
    #[serde(rename = "attributeCodes", default)]
    pub(crate) attribute_codes: Vec<String>,
    #[serde(rename = "colorTag", default, skip_serializing_if = "Option::is_none")]
    pub(crate) color_tag: Option<String>,
    #[serde(
        rename = "calculatedYear",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) calculated_year: Option<i32>,
    #[serde(rename = "yearAdjustment", default)]
    pub(crate) year_adjustment: i32,
}

impl AnnotationRecord {
    pub(crate) fn from_annotation(annotation: &Annotation) -> Self {
        Self {
            lat_lng: LatLngRecord::from(annotation.location),
            text: annotation.text.clone(),
            attribute_codes: annotation.attribute_codes.clone(),
            color_tag: annotation.color_tag.clone(),
            calculated_year: annotation.calculated_year,
            year_adjustment: annotation.year_adjustment,
        }
    }

    pub(crate) fn into_annotation(self) -> Annotation {
        Annotation {
            location: Point::from(self.lat_lng),
            text: self.text,
            attribute_codes: self.attribute_codes,
            color_tag: self.color_tag,
            calculated_year: self.calculated_year,
            year_adjustment: self.year_adjustment,
        }
    }
}

/// A group of structured annotation attributes, as configured per document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeGroup {
    /// Display title of the group.
    #[serde(default)]
    pub title: String,
    /// The selectable options in this group.
    #[serde(default)]
    pub options: Vec<AttributeOption>,
}

/// One selectable attribute option.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeOption {
    /// Display title of the option.
    #[serde(default)]
    pub title: String,
    /// Short code recorded on annotations that carry this attribute.
    #[serde(default)]
    pub code: String,
}

/// The whole persisted document.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct DocumentRecord {
    pub(crate) year: i32,
    pub(crate) earlywood: bool,
    pub(crate) index: usize,
    pub(crate) points: std::collections::BTreeMap<usize, PointRecord>,
    #[serde(rename = "forwardDirection")]
    pub(crate) forward_direction: bool,
    #[serde(rename = "subAnnual")]
    pub(crate) sub_annual: bool,
    #[serde(default)]
    pub(crate) annotations: std::collections::BTreeMap<usize, AnnotationRecord>,
    #[serde(rename = "attributesObjectArray", default)]
    pub(crate) attributes_object_array: Vec<AttributeGroup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) ppm: Option<f64>,
    #[serde(rename = "saveDate", default, skip_serializing_if = "Option::is_none")]
    pub(crate) save_date: Option<String>,
}
