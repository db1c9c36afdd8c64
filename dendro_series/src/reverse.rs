// Copyright 2026 the Dendro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time-reversal of a measurement sequence.
//!
//! Exporters want ascending years regardless of how the specimen was
//! measured; a backward-measured sequence is reversed on the way out. The
//! transform is pure: it returns a new point vector and never touches the
//! live sequence.

use alloc::vec::Vec;

use crate::point::RingPoint;
use crate::prefs::{DatingCursor, Granularity, MeasurementPrefs};

/// Returns the time-reversal of `points`.
///
/// `prefs` describes the sequence *as given*: its direction is the
/// direction the input runs in, and the output runs the opposite way.
/// Reversing a boundary sequence is a fencepost shift, not a plain
/// `reverse()`:
///
/// - annual years step once along the input direction (each boundary takes
///   the year of the ring on its other side); sub-annual compensates by
///   flipping every phase instead;
/// - adjacent break-then-start pairs exchange roles in place beforehand, so
///   the adjacency comes out break-then-start again after the reversal with
///   every coordinate still in spatial order;
/// - the array order is reversed;
/// - the new first element is stripped to a [`RingPoint::Start`];
/// - the element that became the terminal (the input's start) is re-labeled
///   as a measurement, chain-advanced from its predecessor's date in the
///   output direction.
///
/// Applying the transform twice — the second time with the opposite
/// direction, since that is what the first output runs in — restores the
/// original sequence exactly.
#[must_use]
pub fn reverse_points(points: &[RingPoint], prefs: MeasurementPrefs) -> Vec<RingPoint> {
    let mut pts: Vec<RingPoint> = points.to_vec();
    if pts.is_empty() {
        return pts;
    }

    let step = prefs.direction.year_step();
    for p in &mut pts {
        if let Some(d) = p.date() {
            match prefs.granularity {
                Granularity::Annual => p.set_date(DatingCursor {
                    year: d.year + step,
                    earlywood: d.earlywood,
                }),
                Granularity::SubAnnual => p.set_date(DatingCursor {
                    year: d.year,
                    earlywood: !d.earlywood,
                }),
            }
        }
    }

    let mut k = 0;
    while k + 1 < pts.len() {
        if pts[k].is_break() && pts[k + 1].is_start() {
            // Roles swap in place; the coordinates stay in spatial order.
            pts[k] = RingPoint::Start {
                location: pts[k].location(),
            };
            pts[k + 1] = RingPoint::Break {
                location: pts[k + 1].location(),
            };
            k += 2;
        } else {
            k += 1;
        }
    }

    pts.reverse();

    if let Some(first) = pts.first_mut() {
        *first = RingPoint::Start {
            location: first.location(),
        };
    }

    let last = pts.len() - 1;
    if last > 0 && pts[last].is_start() {
        let reversed = MeasurementPrefs::new(prefs.direction.opposite(), prefs.granularity);
        if let Some(pred) = pts[..last].iter().rev().find_map(RingPoint::date) {
            let d = reversed.next_date(pred);
            pts[last] = RingPoint::Measurement {
                year: d.year,
                earlywood: d.earlywood,
                location: pts[last].location(),
            };
        }
    }

    pts
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use kurbo::Point;

    use super::*;
    use crate::prefs::Direction;

    fn start(x: f64) -> RingPoint {
        RingPoint::Start {
            location: Point::new(x, 0.0),
        }
    }

    fn brk(x: f64) -> RingPoint {
        RingPoint::Break {
            location: Point::new(x, 0.0),
        }
    }

    fn m(year: i32, earlywood: bool, x: f64) -> RingPoint {
        RingPoint::Measurement {
            year,
            earlywood,
            location: Point::new(x, 0.0),
        }
    }

    #[test]
    fn backward_annual_reversal() {
        let prefs = MeasurementPrefs::new(Direction::Backward, Granularity::Annual);
        let input = [start(0.0), m(2000, true, 1.0), m(1999, true, 2.0)];

        let out = reverse_points(&input, prefs);
        assert_eq!(
            out,
            vec![start(2.0), m(1999, true, 1.0), m(2000, true, 0.0)]
        );
    }

    #[test]
    fn backward_sub_annual_reversal_flips_phases() {
        let prefs = MeasurementPrefs::new(Direction::Backward, Granularity::SubAnnual);
        let input = [
            start(0.0),
            m(2000, true, 1.0),
            m(2000, false, 2.0),
            m(1999, true, 3.0),
        ];

        let out = reverse_points(&input, prefs);
        assert_eq!(
            out,
            vec![
                start(3.0),
                m(2000, true, 2.0),
                m(2000, false, 1.0),
                m(2001, true, 0.0),
            ]
        );
    }

    #[test]
    fn break_adjacency_survives_reversal() {
        let prefs = MeasurementPrefs::new(Direction::Backward, Granularity::Annual);
        let input = [
            start(0.0),
            m(2000, true, 1.0),
            brk(2.0),
            start(3.0),
            m(1999, true, 4.0),
        ];

        let out = reverse_points(&input, prefs);
        assert_eq!(
            out,
            vec![
                start(4.0),
                brk(3.0),
                start(2.0),
                m(1999, true, 1.0),
                m(2000, true, 0.0),
            ]
        );
    }

    #[test]
    fn reversal_is_an_involution_across_directions() {
        for granularity in [Granularity::Annual, Granularity::SubAnnual] {
            let prefs = MeasurementPrefs::new(Direction::Backward, granularity);
            // A chain-consistent backward input for each granularity.
            let input = match granularity {
                Granularity::Annual => vec![
                    start(0.0),
                    m(2000, true, 1.0),
                    m(1999, true, 2.0),
                    m(1998, true, 3.0),
                ],
                Granularity::SubAnnual => vec![
                    start(0.0),
                    m(2000, true, 1.0),
                    m(2000, false, 2.0),
                    m(1999, true, 3.0),
                ],
            };

            let once = reverse_points(&input, prefs);
            let twice = reverse_points(
                &once,
                MeasurementPrefs::new(Direction::Forward, granularity),
            );
            assert_eq!(twice, input, "involution failed for {granularity:?}");
        }
    }

    #[test]
    fn trivial_sequences_are_returned_safely() {
        let prefs = MeasurementPrefs::new(Direction::Backward, Granularity::Annual);
        assert!(reverse_points(&[], prefs).is_empty());

        let only_start = [start(0.0)];
        assert_eq!(reverse_points(&only_start, prefs), vec![start(0.0)]);
    }
}
