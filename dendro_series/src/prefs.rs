// Copyright 2026 the Dendro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Measurement preferences and the dating chain they induce.

/// Which way years run along the point sequence.
///
/// Forward measurement starts at the pith (oldest ring) and moves outward,
/// so years ascend; backward measurement starts at the bark and moves
/// inward, so years descend.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Direction {
    /// Years ascend along the sequence.
    #[default]
    Forward,
    /// Years descend along the sequence.
    Backward,
}

impl Direction {
    /// The signed year increment between consecutive measured years.
    #[must_use]
    pub const fn year_step(self) -> i32 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }

    /// The other direction.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }

    /// Returns `true` for [`Direction::Forward`].
    #[must_use]
    pub const fn is_forward(self) -> bool {
        matches!(self, Self::Forward)
    }
}

/// Measurement granularity: one point per year, or one per growth phase.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Granularity {
    /// One measurement per year (total ring width).
    #[default]
    Annual,
    /// Two measurements per year: earlywood, then latewood.
    SubAnnual,
}

impl Granularity {
    /// Returns `true` for [`Granularity::SubAnnual`].
    #[must_use]
    pub const fn is_sub_annual(self) -> bool {
        matches!(self, Self::SubAnnual)
    }
}

/// Global measurement configuration consulted by every sequence operation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct MeasurementPrefs {
    /// Which way years run along the sequence.
    pub direction: Direction,
    /// Annual or sub-annual point pairing.
    pub granularity: Granularity,
}

/// A position in the dating chain: the year and growth phase of one
/// measurement slot.
///
/// On the sequence model this doubles as the cursor describing the *next*
/// point to be created, not the last one created.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct DatingCursor {
    /// Calendar year.
    pub year: i32,
    /// `true` for the earlywood phase. Fixed at `true` in annual mode.
    pub earlywood: bool,
}

impl DatingCursor {
    /// A cursor at the earlywood phase of `year`.
    #[must_use]
    pub const fn year_start(year: i32) -> Self {
        Self {
            year,
            earlywood: true,
        }
    }
}

impl MeasurementPrefs {
    /// Convenience constructor.
    #[must_use]
    pub const fn new(direction: Direction, granularity: Granularity) -> Self {
        Self {
            direction,
            granularity,
        }
    }

    /// The date of the measurement slot that follows `date` in measuring
    /// order.
    ///
    /// Sub-annual: earlywood is followed by the same year's latewood, and
    /// latewood by the next year's earlywood, where "next" is one
    /// [`Direction::year_step`] away. Annual: the year steps every time and
    /// the phase stays at its fixed default.
    #[must_use]
    pub const fn next_date(self, date: DatingCursor) -> DatingCursor {
        match self.granularity {
            Granularity::SubAnnual => {
                if date.earlywood {
                    DatingCursor {
                        year: date.year,
                        earlywood: false,
                    }
                } else {
                    DatingCursor {
                        year: date.year + self.direction.year_step(),
                        earlywood: true,
                    }
                }
            }
            Granularity::Annual => DatingCursor {
                year: date.year + self.direction.year_step(),
                earlywood: true,
            },
        }
    }

    /// The date of the measurement slot that precedes `date` in measuring
    /// order. Inverse of [`MeasurementPrefs::next_date`].
    #[must_use]
    pub const fn prev_date(self, date: DatingCursor) -> DatingCursor {
        match self.granularity {
            Granularity::SubAnnual => {
                if date.earlywood {
                    DatingCursor {
                        year: date.year - self.direction.year_step(),
                        earlywood: false,
                    }
                } else {
                    DatingCursor {
                        year: date.year,
                        earlywood: true,
                    }
                }
            }
            Granularity::Annual => DatingCursor {
                year: date.year - self.direction.year_step(),
                earlywood: true,
            },
        }
    }
}
