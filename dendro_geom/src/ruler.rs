// Copyright 2026 the Dendro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Calibrated real-world distance between map coordinates.

use kurbo::Point;

/// Projection from map coordinates into pixel space at a given zoom level.
///
/// This is the seam to the hosting map widget: implementations wrap whatever
/// coordinate/projection service the viewer exposes. The contract is only
/// that projecting two coordinates at the *same* zoom level yields pixel
/// positions whose Euclidean distance scales linearly with on-image length.
pub trait MapProjection {
    /// Projects `coord` into pixel space at `zoom`.
    fn project(&self, coord: Point, zoom: f64) -> Point;
}

impl<F> MapProjection for F
where
    F: Fn(Point, f64) -> Point,
{
    fn project(&self, coord: Point, zoom: f64) -> Point {
        self(coord, zoom)
    }
}

/// Converts map-coordinate pairs into real-world lengths.
///
/// Both endpoints are projected at one fixed `native_zoom` (the maximal
/// resolution of the scanned image), so measured lengths do not depend on
/// the zoom level the viewer happens to be displaying. The projected pixel
/// distance is divided by the pixels-per-unit calibration.
///
/// When no calibration has been set, the ruler falls back to a factor of
/// `1.0` and reports raw pixel distances rather than failing.
#[derive(Clone, Debug)]
pub struct Ruler<P> {
    projection: P,
    native_zoom: f64,
    pixels_per_unit: Option<f64>,
}

impl<P: MapProjection> Ruler<P> {
    /// Creates an uncalibrated ruler projecting at `native_zoom`.
    #[must_use]
    pub fn new(projection: P, native_zoom: f64) -> Self {
        Self {
            projection,
            native_zoom,
            pixels_per_unit: None,
        }
    }

    /// Creates a ruler with a pixels-per-unit calibration.
    #[must_use]
    pub fn with_calibration(projection: P, native_zoom: f64, pixels_per_unit: f64) -> Self {
        Self {
            projection,
            native_zoom,
            pixels_per_unit: Some(pixels_per_unit),
        }
    }

    /// Returns the current pixels-per-unit calibration, if any.
    #[must_use]
    pub fn calibration(&self) -> Option<f64> {
        self.pixels_per_unit
    }

    /// Sets or clears the pixels-per-unit calibration.
    pub fn set_calibration(&mut self, pixels_per_unit: Option<f64>) {
        self.pixels_per_unit = pixels_per_unit;
    }

    /// Returns the fixed zoom level used for projection.
    #[must_use]
    pub fn native_zoom(&self) -> f64 {
        self.native_zoom
    }

    /// Real-world distance between two map coordinates.
    ///
    /// Uncalibrated rulers report raw projected pixel distance.
    #[must_use]
    pub fn distance(&self, a: Point, b: Point) -> f64 {
        let pa = self.projection.project(a, self.native_zoom);
        let pb = self.projection.project(b, self.native_zoom);
        pa.distance(pb) / self.pixels_per_unit.unwrap_or(1.0)
    }
}
