// Copyright 2026 the Dendro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The typed point stored at each slot of a measurement sequence.

use kurbo::Point;

use crate::prefs::DatingCursor;

/// One slot of a measurement sequence.
///
/// The legacy flag encoding (`start`/`break` booleans plus optional year
/// fields) permitted nonsense combinations such as a dated start point;
/// the enum makes exactly the three meaningful shapes representable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RingPoint {
    /// The beginning of a continuously measured run. Carries no date.
    Start {
        /// Map coordinate of the pick.
        location: Point,
    },
    /// A physical discontinuity (crack or gap) in the specimen.
    ///
    /// The distance traversed up to a break belongs to the next real
    /// measurement rather than forming its own ring width. Carries no date.
    Break {
        /// Map coordinate of the pick.
        location: Point,
    },
    /// A dated ring boundary.
    Measurement {
        /// Calendar year of the boundary.
        year: i32,
        /// Growth phase; meaningful only in sub-annual mode. Annual
        /// measurements store the fixed default `true`.
        earlywood: bool,
        /// Map coordinate of the pick.
        location: Point,
    },
}

impl RingPoint {
    /// The map coordinate of this point.
    #[must_use]
    pub const fn location(&self) -> Point {
        match self {
            Self::Start { location } | Self::Break { location } => *location,
            Self::Measurement { location, .. } => *location,
        }
    }

    /// Returns `true` for [`RingPoint::Start`].
    #[must_use]
    pub const fn is_start(&self) -> bool {
        matches!(self, Self::Start { .. })
    }

    /// Returns `true` for [`RingPoint::Break`].
    #[must_use]
    pub const fn is_break(&self) -> bool {
        matches!(self, Self::Break { .. })
    }

    /// Returns `true` for [`RingPoint::Measurement`].
    #[must_use]
    pub const fn is_measurement(&self) -> bool {
        matches!(self, Self::Measurement { .. })
    }

    /// The date of a measurement; `None` for starts and breaks.
    #[must_use]
    pub const fn date(&self) -> Option<DatingCursor> {
        match self {
            Self::Measurement {
                year, earlywood, ..
            } => Some(DatingCursor {
                year: *year,
                earlywood: *earlywood,
            }),
            _ => None,
        }
    }

    /// The year of a measurement; `None` for starts and breaks.
    #[must_use]
    pub const fn year(&self) -> Option<i32> {
        match self {
            Self::Measurement { year, .. } => Some(*year),
            _ => None,
        }
    }

    /// The growth phase of a measurement; `None` for starts and breaks.
    #[must_use]
    pub const fn earlywood(&self) -> Option<bool> {
        match self {
            Self::Measurement { earlywood, .. } => Some(*earlywood),
            _ => None,
        }
    }

    /// Overwrites the date of a measurement. No-op on starts and breaks.
    pub(crate) const fn set_date(&mut self, date: DatingCursor) {
        if let Self::Measurement {
            year, earlywood, ..
        } = self
        {
            *year = date.year;
            *earlywood = date.earlywood;
        }
    }
}
