// Copyright 2026 the Dendro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The ordered measurement sequence and its edit operations.

use alloc::vec::Vec;

use kurbo::Point;
use smallvec::SmallVec;

use crate::error::SeriesError;
use crate::point::RingPoint;
use crate::prefs::{DatingCursor, Granularity, MeasurementPrefs};

/// A restorable deep copy of the dated sequence state.
///
/// `index` is recorded for parity with the persisted document shape; it is
/// always the length of `points` because the live sequence is kept
/// compacted.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesSnapshot {
    /// Cursor year at capture time.
    pub year: i32,
    /// Cursor phase at capture time.
    pub earlywood: bool,
    /// Next write position at capture time.
    pub index: usize,
    /// Deep copy of the point array.
    pub points: Vec<RingPoint>,
}

/// The ordered, typed-point measurement sequence.
///
/// `MeasurementSeries` owns the chronological bookkeeping of a ring-width
/// series: the compacted point array, the dating cursor describing the
/// *next* measurement to create, and the [`MeasurementPrefs`] every
/// operation consults for direction and granularity.
///
/// All mutation goes through the operation methods; each one either fully
/// applies (array updated, cursor consistent, revision bumped) or returns a
/// [`SeriesError`] having touched nothing. The revision counter is the
/// change signal for embedders: it bumps exactly once per successful
/// mutation, so observers can cheaply notice "did anything change?" without
/// comparing contents.
///
/// ## Minimal example
///
/// ```rust
/// use kurbo::Point;
/// use dendro_series::{Direction, Granularity, MeasurementPrefs, MeasurementSeries};
///
/// let prefs = MeasurementPrefs::new(Direction::Forward, Granularity::Annual);
/// let mut series = MeasurementSeries::new(prefs);
/// series.set_next_year(1900);
///
/// series.append_start(Point::new(0.0, 0.0));
/// series.append(Point::new(1.0, 0.0));
/// series.append(Point::new(2.0, 0.0));
///
/// assert_eq!(series.index(), 3);
/// assert_eq!(series.year(), 1902); // the next year to be measured
/// ```
#[derive(Clone, Debug)]
pub struct MeasurementSeries {
    points: Vec<RingPoint>,
    cursor: DatingCursor,
    prefs: MeasurementPrefs,
    revision: u64,
}

impl MeasurementSeries {
    /// Creates an empty sequence. The cursor starts at the earlywood phase
    /// of year zero; call [`MeasurementSeries::set_next_year`] before the
    /// first measurement.
    #[must_use]
    pub const fn new(prefs: MeasurementPrefs) -> Self {
        Self {
            points: Vec::new(),
            cursor: DatingCursor::year_start(0),
            prefs,
            revision: 0,
        }
    }

    /// Rebuilds a sequence from persisted parts.
    ///
    /// The point array is taken as-is (callers compact holes away while
    /// decoding); the cursor is taken verbatim rather than rederived so a
    /// document saved mid-measurement resumes exactly where it left off.
    #[must_use]
    pub fn from_parts(prefs: MeasurementPrefs, points: Vec<RingPoint>, cursor: DatingCursor) -> Self {
        Self {
            points,
            cursor,
            prefs,
            revision: 0,
        }
    }

    /// The points in sequence order. Always compacted: no holes.
    #[must_use]
    pub fn points(&self) -> &[RingPoint] {
        &self.points
    }

    /// The next write position, equal to the compacted length.
    #[must_use]
    pub fn index(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` when no points have been placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The year of the next measurement to be created.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.cursor.year
    }

    /// The phase of the next measurement to be created.
    #[must_use]
    pub const fn earlywood(&self) -> bool {
        self.cursor.earlywood
    }

    /// The full dating cursor for the next measurement.
    #[must_use]
    pub const fn cursor(&self) -> DatingCursor {
        self.cursor
    }

    /// The measurement preferences this sequence was built with.
    #[must_use]
    pub const fn prefs(&self) -> MeasurementPrefs {
        self.prefs
    }

    /// Monotonically increasing change counter; bumps once per successful
    /// mutation.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// The last dated point, if any.
    #[must_use]
    pub fn last_measurement(&self) -> Option<DatingCursor> {
        self.points.iter().rev().find_map(RingPoint::date)
    }

    /// The coordinate of every slot, in sequence order.
    ///
    /// Shaped for the `dendro_geom` queries, which accept optional slots;
    /// a live sequence is compacted so every entry is `Some`.
    #[must_use]
    pub fn coordinates(&self) -> Vec<Option<Point>> {
        self.points.iter().map(|p| Some(p.location())).collect()
    }

    /// Moves the cursor to the earlywood phase of `year`.
    ///
    /// Used when dating the first measurement of a new sequence.
    pub fn set_next_year(&mut self, year: i32) {
        self.set_next_date(DatingCursor::year_start(year));
    }

    /// Moves the cursor to an explicit date.
    pub fn set_next_date(&mut self, date: DatingCursor) {
        if self.cursor != date {
            self.cursor = date;
            self.bump_revision();
        }
    }

    /// Captures a restorable deep copy of the dated state.
    #[must_use]
    pub fn snapshot(&self) -> SeriesSnapshot {
        SeriesSnapshot {
            year: self.cursor.year,
            earlywood: self.cursor.earlywood,
            index: self.points.len(),
            points: self.points.clone(),
        }
    }

    /// Restores a snapshot captured by [`MeasurementSeries::snapshot`].
    pub fn restore(&mut self, snapshot: SeriesSnapshot) {
        self.points = snapshot.points;
        self.cursor = DatingCursor {
            year: snapshot.year,
            earlywood: snapshot.earlywood,
        };
        self.bump_revision();
    }

    /// Appends a start point. The cursor is untouched: a start carries no
    /// date.
    pub fn append_start(&mut self, location: Point) -> usize {
        self.points.push(RingPoint::Start { location });
        self.bump_revision();
        self.points.len() - 1
    }

    /// Appends a break point. The cursor is untouched; the distance
    /// measured across the break belongs to the next real measurement.
    pub fn append_break(&mut self, location: Point) -> usize {
        self.points.push(RingPoint::Break { location });
        self.bump_revision();
        self.points.len() - 1
    }

    /// Appends a measurement dated from the cursor, then advances the
    /// cursor along the dating chain.
    pub fn append(&mut self, location: Point) -> usize {
        let date = self.cursor;
        let earlywood = match self.prefs.granularity {
            Granularity::SubAnnual => date.earlywood,
            Granularity::Annual => true,
        };
        self.points.push(RingPoint::Measurement {
            year: date.year,
            earlywood,
            location,
        });
        self.cursor = self.prefs.next_date(date);
        self.bump_revision();
        self.points.len() - 1
    }

    /// Deletes the point at `i`.
    ///
    /// The removal is variant-dependent:
    /// - a `Start` preceded by a `Break` takes the break with it;
    /// - the leading `Start` of the sequence promotes its successor to the
    ///   new start, discarding that point's date;
    /// - a `Break` takes its following `Start` with it;
    /// - a `Measurement` closes the dating chain over the gap: every later
    ///   measurement takes the date its predecessor held.
    ///
    /// The cursor is recomputed from the new last dated point.
    pub fn delete_point(&mut self, i: usize) -> Result<(), SeriesError> {
        let point = *self.points.get(i).ok_or(SeriesError::OutOfBounds(i))?;
        match point {
            RingPoint::Start { .. } => {
                if i > 0 && self.points[i - 1].is_break() {
                    self.points.drain(i - 1..=i);
                } else {
                    self.points.remove(i);
                    if i == 0 {
                        if let Some(next) = self.points.first_mut() {
                            *next = RingPoint::Start {
                                location: next.location(),
                            };
                        }
                    }
                }
            }
            RingPoint::Break { .. } => {
                if self.points.get(i + 1).is_some_and(RingPoint::is_start) {
                    self.points.drain(i..=i + 1);
                } else {
                    self.points.remove(i);
                }
            }
            RingPoint::Measurement { .. } => {
                self.points.remove(i);
                let prefs = self.prefs;
                for p in &mut self.points[i..] {
                    if let Some(date) = p.date() {
                        p.set_date(prefs.prev_date(date));
                    }
                }
            }
        }
        self.recompute_cursor();
        self.bump_revision();
        Ok(())
    }

    /// Inserts a measurement at the picked coordinate, resolving the slot
    /// through the nearest-point geometry query.
    ///
    /// Fails with [`SeriesError::NoNearbyPoint`] on an empty sequence and
    /// with [`SeriesError::MissingNeighbor`] when the resolved slot lacks
    /// the dated neighbor context the case analysis needs. Returns the
    /// inserted index.
    pub fn insert_point(&mut self, location: Point) -> Result<usize, SeriesError> {
        let coords = self.coordinates();
        let slot =
            dendro_geom::insertion_slot(&coords, location).ok_or(SeriesError::NoNearbyPoint)?;
        self.insert_point_at(slot, location)
    }

    /// Inserts a measurement into an explicit slot (between `slot - 1` and
    /// `slot`), for callers that already resolved the pick geometrically.
    ///
    /// The new point's date comes from neighbor case analysis; every later
    /// point is re-dated by continuing the chain forward from the new
    /// point, and the cursor is recomputed.
    pub fn insert_point_at(&mut self, slot: usize, location: Point) -> Result<usize, SeriesError> {
        let date = self.insertion_date(slot)?;
        self.points.insert(
            slot,
            RingPoint::Measurement {
                year: date.year,
                earlywood: date.earlywood,
                location,
            },
        );
        self.redate_following(slot, date);
        self.recompute_cursor();
        self.bump_revision();
        Ok(slot)
    }

    /// Inserts a zero-growth year immediately after the measurement at `i`.
    ///
    /// The phantom measurement (both phases of the year, in sub-annual
    /// mode) reuses the anchor's coordinate so it plots on top of it, and
    /// is dated one year along the configured direction. Later points move
    /// one further year along; the cursor is recomputed. Valid only at a
    /// year boundary: in sub-annual mode the anchor must be latewood.
    ///
    /// Returns the index of the last inserted phantom.
    pub fn insert_zero_growth(&mut self, i: usize, location: Point) -> Result<usize, SeriesError> {
        let anchor = *self.points.get(i).ok_or(SeriesError::OutOfBounds(i))?;
        let date = anchor.date().ok_or(SeriesError::NotAMeasurement(i))?;
        let sub = self.prefs.granularity.is_sub_annual();
        if sub && date.earlywood {
            return Err(SeriesError::ZeroGrowthMidYear);
        }

        let step = self.prefs.direction.year_step();
        let year = date.year + step;
        let mut phantoms: SmallVec<[RingPoint; 2]> = SmallVec::new();
        phantoms.push(RingPoint::Measurement {
            year,
            earlywood: true,
            location,
        });
        if sub {
            phantoms.push(RingPoint::Measurement {
                year,
                earlywood: false,
                location,
            });
        }

        let count = phantoms.len();
        for (offset, phantom) in phantoms.into_iter().enumerate() {
            self.points.insert(i + 1 + offset, phantom);
        }
        for p in &mut self.points[i + 1 + count..] {
            if let Some(d) = p.date() {
                p.set_date(DatingCursor {
                    year: d.year + step,
                    earlywood: d.earlywood,
                });
            }
        }
        self.recompute_cursor();
        self.bump_revision();
        Ok(i + count)
    }

    /// Removes the inclusive range between two picked indices.
    ///
    /// Endpoint order does not matter; equal endpoints are rejected. The
    /// surviving sequence is re-dated from the first remaining
    /// measurement's original date, and the cursor recomputed, so
    /// subsequent appends continue correctly.
    pub fn cut(&mut self, i: usize, j: usize) -> Result<(), SeriesError> {
        if i == j {
            return Err(SeriesError::DegenerateCut);
        }
        let (lo, hi) = if i < j { (i, j) } else { (j, i) };
        if hi >= self.points.len() {
            return Err(SeriesError::OutOfBounds(hi));
        }
        self.points.drain(lo..=hi);
        self.redate_from_first();
        self.recompute_cursor();
        self.bump_revision();
        Ok(())
    }

    /// Converts the measurement at `i` into a start point.
    ///
    /// The date is dropped and the remainder of the sequence is re-chained
    /// from the first surviving measurement, closing the one-year gap the
    /// dropped date leaves. When the converted point sat immediately after
    /// the sequence's sole original start, that start is now redundant and
    /// is removed.
    pub fn convert_to_start(&mut self, i: usize) -> Result<(), SeriesError> {
        let point = *self.points.get(i).ok_or(SeriesError::OutOfBounds(i))?;
        if !point.is_measurement() {
            return Err(SeriesError::NotAMeasurement(i));
        }
        self.points[i] = RingPoint::Start {
            location: point.location(),
        };
        if i == 1 && self.points.first().is_some_and(RingPoint::is_start) {
            self.points.remove(0);
        }
        self.redate_from_first();
        self.recompute_cursor();
        self.bump_revision();
        Ok(())
    }

    /// Anchors the measurement at `i` to `year` and re-dates the whole
    /// sequence around it, walking the chain backward before the anchor
    /// and forward after it.
    pub fn set_year_at(&mut self, i: usize, year: i32) -> Result<(), SeriesError> {
        let point = *self.points.get(i).ok_or(SeriesError::OutOfBounds(i))?;
        let date = point.date().ok_or(SeriesError::NotAMeasurement(i))?;
        let anchor = DatingCursor {
            year,
            earlywood: date.earlywood,
        };
        self.points[i].set_date(anchor);

        let prefs = self.prefs;
        let mut walk = anchor;
        for p in self.points[..i].iter_mut().rev() {
            if p.is_measurement() {
                walk = prefs.prev_date(walk);
                p.set_date(walk);
            }
        }
        self.redate_following(i, anchor);
        self.recompute_cursor();
        self.bump_revision();
        Ok(())
    }

    /// A read-only time-reversal of the current points.
    ///
    /// The returned sequence runs opposite to the configured direction; the
    /// live series is not touched. See [`crate::reverse_points`].
    #[must_use]
    pub fn reversed(&self) -> Vec<RingPoint> {
        crate::reverse::reverse_points(&self.points, self.prefs)
    }

    /// The date a point inserted into `slot` should carry, by case
    /// analysis on its neighbors.
    fn insertion_date(&self, slot: usize) -> Result<DatingCursor, SeriesError> {
        let left = slot
            .checked_sub(1)
            .and_then(|k| self.points.get(k))
            .copied()
            .ok_or(SeriesError::MissingNeighbor)?;
        let right = self
            .points
            .get(slot)
            .copied()
            .ok_or(SeriesError::MissingNeighbor)?;
        let sub = self.prefs.granularity.is_sub_annual();
        let forward = self.prefs.direction.is_forward();

        // Left neighbor is an earlywood measurement: the pick splits a
        // year, so the new point is that year's latewood.
        if sub && left.earlywood() == Some(true) {
            let year = if forward {
                left.year().ok_or(SeriesError::MissingNeighbor)?
            } else {
                right.year().or(left.year()).ok_or(SeriesError::MissingNeighbor)?
            };
            return Ok(DatingCursor {
                year,
                earlywood: false,
            });
        }

        // A flanking start: the year comes from the first dated point on
        // the right; the phase continues the alternation recorded before
        // the start when such a point exists.
        if left.is_start() || right.is_start() {
            let year = self.points[slot..]
                .iter()
                .find_map(RingPoint::year)
                .ok_or(SeriesError::MissingNeighbor)?;
            let earlywood = if sub {
                match slot
                    .checked_sub(2)
                    .and_then(|k| self.points.get(k))
                    .and_then(RingPoint::earlywood)
                {
                    Some(phase) => !phase,
                    None => forward,
                }
            } else {
                true
            };
            return Ok(DatingCursor { year, earlywood });
        }

        // Plain case: left latewood (sub-annual) or any annual
        // measurement. Forward continues past the left year; backward
        // inherits the right year.
        let year = if forward {
            left.year().ok_or(SeriesError::MissingNeighbor)? + 1
        } else {
            right.year().ok_or(SeriesError::MissingNeighbor)?
        };
        Ok(DatingCursor {
            year,
            earlywood: true,
        })
    }

    /// Re-dates every measurement after `from` by continuing the chain
    /// from `base`.
    fn redate_following(&mut self, from: usize, base: DatingCursor) {
        let prefs = self.prefs;
        let mut date = base;
        for p in &mut self.points[from + 1..] {
            if p.is_measurement() {
                date = prefs.next_date(date);
                p.set_date(date);
            }
        }
    }

    /// Re-chains the whole sequence from its first measurement's date.
    fn redate_from_first(&mut self) {
        let Some((first, base)) = self
            .points
            .iter()
            .enumerate()
            .find_map(|(i, p)| p.date().map(|d| (i, d)))
        else {
            return;
        };
        self.redate_following(first, base);
    }

    /// Rederives the cursor from the last dated point.
    ///
    /// Called after every structural mutation instead of patching the
    /// cursor incrementally at each call site. A sequence with no remaining
    /// measurements keeps its cursor.
    fn recompute_cursor(&mut self) {
        if let Some(date) = self.last_measurement() {
            self.cursor = self.prefs.next_date(date);
        }
    }

    fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::prefs::Direction;

    fn pt(x: f64) -> Point {
        Point::new(x, 0.0)
    }

    fn series(direction: Direction, granularity: Granularity, year: i32) -> MeasurementSeries {
        let mut s = MeasurementSeries::new(MeasurementPrefs::new(direction, granularity));
        s.set_next_year(year);
        s
    }

    fn years(s: &MeasurementSeries) -> Vec<Option<i32>> {
        s.points().iter().map(RingPoint::year).collect()
    }

    #[test]
    fn annual_forward_append_scenario() {
        let mut s = series(Direction::Forward, Granularity::Annual, 1900);
        s.append_start(pt(0.0));
        s.append(pt(1.0));
        s.append(pt(2.0));

        assert!(s.points()[0].is_start());
        assert_eq!(years(&s), vec![None, Some(1900), Some(1901)]);
        assert_eq!(s.index(), 3);
        assert_eq!(s.year(), 1902);
    }

    #[test]
    fn sub_annual_append_pairs_phases() {
        let mut s = series(Direction::Forward, Granularity::SubAnnual, 2000);
        s.append_start(pt(0.0));
        s.append(pt(1.0));
        s.append(pt(2.0));
        s.append(pt(3.0));

        let dates: Vec<_> = s.points().iter().filter_map(RingPoint::date).collect();
        assert_eq!(
            dates,
            vec![
                DatingCursor {
                    year: 2000,
                    earlywood: true
                },
                DatingCursor {
                    year: 2000,
                    earlywood: false
                },
                DatingCursor {
                    year: 2001,
                    earlywood: true
                },
            ]
        );
        assert_eq!(s.cursor(), DatingCursor {
            year: 2001,
            earlywood: false
        });
    }

    #[test]
    fn backward_append_descends() {
        let mut s = series(Direction::Backward, Granularity::Annual, 2020);
        s.append_start(pt(0.0));
        s.append(pt(1.0));
        s.append(pt(2.0));
        assert_eq!(years(&s), vec![None, Some(2020), Some(2019)]);
        assert_eq!(s.year(), 2018);
    }

    #[test]
    fn delete_measurement_closes_the_chain() {
        let mut s = series(Direction::Forward, Granularity::Annual, 1900);
        s.append_start(pt(0.0));
        for x in 1..=4 {
            s.append(pt(f64::from(x)));
        }
        // [Start, 1900, 1901, 1902, 1903], cursor 1904.

        s.delete_point(2).unwrap();
        assert_eq!(years(&s), vec![None, Some(1900), Some(1901), Some(1902)]);
        assert_eq!(s.year(), 1903);
        assert_eq!(s.index(), 4);
    }

    #[test]
    fn sub_annual_backward_delete_scenario() {
        // [Start, 2000 EW, 2000 LW, 1999 EW], backward + sub-annual.
        let mut s = series(Direction::Backward, Granularity::SubAnnual, 2000);
        s.append_start(pt(0.0));
        s.append(pt(1.0));
        s.append(pt(2.0));
        s.append(pt(3.0));

        s.delete_point(2).unwrap();

        assert_eq!(s.index(), 3);
        let shifted = s.points()[2].date().unwrap();
        // The shifted point takes the date its old predecessor held.
        assert_eq!((shifted.year, shifted.earlywood), (2000, false));
        // Cursor flips phase and rederives its year from the new last point.
        assert_eq!(s.cursor(), DatingCursor {
            year: 1999,
            earlywood: true
        });
    }

    #[test]
    fn delete_leading_start_promotes_successor() {
        let mut s = series(Direction::Forward, Granularity::Annual, 1900);
        s.append_start(pt(0.0));
        s.append(pt(1.0));
        s.append(pt(2.0));

        s.delete_point(0).unwrap();
        assert!(s.points()[0].is_start());
        assert_eq!(years(&s), vec![None, Some(1901)]);
        assert_eq!(s.index(), 2);
    }

    #[test]
    fn delete_break_takes_following_start() {
        let mut s = series(Direction::Forward, Granularity::Annual, 1900);
        s.append_start(pt(0.0));
        s.append(pt(1.0));
        s.append_break(pt(2.0));
        s.append_start(pt(3.0));
        s.append(pt(4.0));

        s.delete_point(2).unwrap();
        assert_eq!(s.index(), 3);
        assert_eq!(years(&s), vec![None, Some(1900), Some(1901)]);
    }

    #[test]
    fn delete_start_after_break_takes_the_break() {
        let mut s = series(Direction::Forward, Granularity::Annual, 1900);
        s.append_start(pt(0.0));
        s.append(pt(1.0));
        s.append_break(pt(2.0));
        s.append_start(pt(3.0));
        s.append(pt(4.0));

        s.delete_point(3).unwrap();
        assert_eq!(s.index(), 3);
        assert!(s.points()[1].is_measurement());
        assert!(s.points()[2].is_measurement());
    }

    #[test]
    fn delete_out_of_bounds_is_rejected_untouched() {
        let mut s = series(Direction::Forward, Granularity::Annual, 1900);
        s.append_start(pt(0.0));
        let before = s.snapshot();
        let revision = s.revision();

        assert_eq!(s.delete_point(5), Err(SeriesError::OutOfBounds(5)));
        assert_eq!(s.snapshot(), before);
        assert_eq!(s.revision(), revision);
    }

    #[test]
    fn insert_between_start_and_first_measurement() {
        let mut s = series(Direction::Forward, Granularity::Annual, 1900);
        s.append_start(pt(0.0));
        s.append(pt(10.0));
        s.append(pt(20.0));

        // Slot 1 sits between the start and the 1900 point; the probe at
        // slot - 2 must not be attempted.
        let idx = s.insert_point_at(1, pt(5.0)).unwrap();
        assert_eq!(idx, 1);
        assert_eq!(
            years(&s),
            vec![None, Some(1900), Some(1901), Some(1902)]
        );
        assert_eq!(s.year(), 1903);
    }

    #[test]
    fn insert_resolves_slot_from_coordinate() {
        let mut s = series(Direction::Forward, Granularity::Annual, 1900);
        s.append_start(pt(0.0));
        s.append(pt(10.0));
        s.append(pt(20.0));

        let idx = s.insert_point(Point::new(14.0, 0.5)).unwrap();
        assert_eq!(idx, 2);
        assert_eq!(
            years(&s),
            vec![None, Some(1900), Some(1901), Some(1902)]
        );
    }

    #[test]
    fn insert_into_empty_sequence_is_rejected() {
        let mut s = series(Direction::Forward, Granularity::Annual, 1900);
        assert_eq!(s.insert_point(pt(1.0)), Err(SeriesError::NoNearbyPoint));
        assert!(s.is_empty());
    }

    #[test]
    fn insert_without_left_neighbor_is_rejected() {
        let mut s = series(Direction::Forward, Granularity::Annual, 1900);
        s.append_start(pt(0.0));
        s.append(pt(10.0));
        assert_eq!(
            s.insert_point_at(0, pt(-5.0)),
            Err(SeriesError::MissingNeighbor)
        );
        assert_eq!(s.index(), 2);
    }

    #[test]
    fn sub_annual_insert_after_earlywood_is_same_year_latewood() {
        let mut s = series(Direction::Forward, Granularity::SubAnnual, 2000);
        s.append_start(pt(0.0));
        s.append(pt(10.0)); // 2000 EW
        s.append(pt(20.0)); // 2000 LW
        s.append(pt(30.0)); // 2001 EW

        let idx = s.insert_point_at(2, pt(15.0)).unwrap();
        let inserted = s.points()[idx].date().unwrap();
        assert_eq!((inserted.year, inserted.earlywood), (2000, false));

        // The tail re-chains from the inserted point.
        let dates: Vec<_> = s.points().iter().filter_map(RingPoint::date).collect();
        assert_eq!(
            dates,
            vec![
                DatingCursor {
                    year: 2000,
                    earlywood: true
                },
                DatingCursor {
                    year: 2000,
                    earlywood: false
                },
                DatingCursor {
                    year: 2001,
                    earlywood: true
                },
                DatingCursor {
                    year: 2001,
                    earlywood: false
                },
            ]
        );
    }

    #[test]
    fn zero_growth_annual_inserts_one_phantom() {
        let mut s = series(Direction::Forward, Granularity::Annual, 1900);
        s.append_start(pt(0.0));
        s.append(pt(1.0));
        s.append(pt(2.0));
        // [Start, 1900, 1901]

        let last = s.insert_zero_growth(2, pt(2.0)).unwrap();
        assert_eq!(last, 3);
        assert_eq!(years(&s), vec![None, Some(1900), Some(1901), Some(1902)]);
        assert_eq!(s.points()[3].location(), pt(2.0));
        assert_eq!(s.year(), 1903);
    }

    #[test]
    fn zero_growth_mid_sequence_shifts_the_tail() {
        let mut s = series(Direction::Forward, Granularity::Annual, 1900);
        s.append_start(pt(0.0));
        s.append(pt(1.0));
        s.append(pt(2.0));
        s.append(pt(3.0));
        // [Start, 1900, 1901, 1902]

        s.insert_zero_growth(1, pt(1.0)).unwrap();
        assert_eq!(
            years(&s),
            vec![None, Some(1900), Some(1901), Some(1902), Some(1903)]
        );
    }

    #[test]
    fn zero_growth_sub_annual_inserts_both_phases() {
        let mut s = series(Direction::Forward, Granularity::SubAnnual, 2000);
        s.append_start(pt(0.0));
        s.append(pt(1.0)); // 2000 EW
        s.append(pt(2.0)); // 2000 LW

        let last = s.insert_zero_growth(2, pt(2.0)).unwrap();
        assert_eq!(last, 4);
        let dates: Vec<_> = s.points().iter().filter_map(RingPoint::date).collect();
        assert_eq!(
            dates,
            vec![
                DatingCursor {
                    year: 2000,
                    earlywood: true
                },
                DatingCursor {
                    year: 2000,
                    earlywood: false
                },
                DatingCursor {
                    year: 2001,
                    earlywood: true
                },
                DatingCursor {
                    year: 2001,
                    earlywood: false
                },
            ]
        );
        assert_eq!(s.cursor(), DatingCursor {
            year: 2002,
            earlywood: true
        });
    }

    #[test]
    fn zero_growth_rejects_mid_year_anchor() {
        let mut s = series(Direction::Forward, Granularity::SubAnnual, 2000);
        s.append_start(pt(0.0));
        s.append(pt(1.0)); // 2000 EW
        let before = s.snapshot();

        assert_eq!(
            s.insert_zero_growth(1, pt(1.0)),
            Err(SeriesError::ZeroGrowthMidYear)
        );
        assert_eq!(s.snapshot(), before);
    }

    #[test]
    fn zero_growth_backward_descends() {
        let mut s = series(Direction::Backward, Granularity::Annual, 2020);
        s.append_start(pt(0.0));
        s.append(pt(1.0));
        s.append(pt(2.0));
        // [Start, 2020, 2019]

        s.insert_zero_growth(1, pt(1.0)).unwrap();
        assert_eq!(years(&s), vec![None, Some(2020), Some(2019), Some(2018)]);
        assert_eq!(s.year(), 2017);
    }

    #[test]
    fn cut_rejects_equal_endpoints() {
        let mut s = series(Direction::Forward, Granularity::Annual, 1900);
        s.append_start(pt(0.0));
        s.append(pt(1.0));
        s.append(pt(2.0));
        let before = s.snapshot();

        assert_eq!(s.cut(2, 2), Err(SeriesError::DegenerateCut));
        assert_eq!(s.snapshot(), before);
    }

    #[test]
    fn cut_removes_range_and_redates_remainder() {
        let mut s = series(Direction::Forward, Granularity::Annual, 1900);
        s.append_start(pt(0.0));
        for x in 1..=5 {
            s.append(pt(f64::from(x)));
        }
        // [Start, 1900..1904]

        // Endpoints may arrive in either order.
        s.cut(4, 2).unwrap();
        assert_eq!(years(&s), vec![None, Some(1900), Some(1901)]);
        assert_eq!(s.year(), 1902);
    }

    #[test]
    fn convert_to_start_drops_date_and_closes_chain() {
        let mut s = series(Direction::Forward, Granularity::Annual, 1900);
        s.append_start(pt(0.0));
        for x in 1..=4 {
            s.append(pt(f64::from(x)));
        }
        // [Start, 1900, 1901, 1902, 1903]

        s.convert_to_start(2).unwrap();
        assert!(s.points()[2].is_start());
        assert_eq!(
            years(&s),
            vec![None, Some(1900), None, Some(1901), Some(1902)]
        );
        assert_eq!(s.year(), 1903);
    }

    #[test]
    fn convert_first_measurement_removes_redundant_start() {
        let mut s = series(Direction::Forward, Granularity::Annual, 1900);
        s.append_start(pt(0.0));
        s.append(pt(1.0));
        s.append(pt(2.0));

        s.convert_to_start(1).unwrap();
        assert_eq!(s.index(), 2);
        assert!(s.points()[0].is_start());
        assert_eq!(years(&s), vec![None, Some(1901)]);
    }

    #[test]
    fn set_year_at_redates_both_directions() {
        let mut s = series(Direction::Forward, Granularity::Annual, 1900);
        s.append_start(pt(0.0));
        for x in 1..=4 {
            s.append(pt(f64::from(x)));
        }
        // [Start, 1900, 1901, 1902, 1903]

        s.set_year_at(3, 1950).unwrap();
        assert_eq!(
            years(&s),
            vec![None, Some(1948), Some(1949), Some(1950), Some(1951)]
        );
        assert_eq!(s.year(), 1952);
    }

    #[test]
    fn snapshot_restore_round_trips() {
        let mut s = series(Direction::Forward, Granularity::Annual, 1900);
        s.append_start(pt(0.0));
        s.append(pt(1.0));
        let before = s.snapshot();

        s.append(pt(2.0));
        s.delete_point(1).unwrap();
        assert_ne!(s.snapshot(), before);

        s.restore(before.clone());
        assert_eq!(s.snapshot(), before);
        assert_eq!(s.index(), before.index);
    }

    #[test]
    fn index_tracks_compacted_length() {
        let mut s = series(Direction::Forward, Granularity::SubAnnual, 2000);
        s.append_start(pt(0.0));
        for x in 1..=6 {
            s.append(pt(f64::from(x)));
        }
        s.delete_point(3).unwrap();
        s.insert_point_at(2, pt(1.5)).unwrap();
        s.cut(4, 5).unwrap();
        assert_eq!(s.index(), s.points().len());
    }

    #[test]
    fn monotonic_dating_holds_across_edits() {
        let mut s = series(Direction::Forward, Granularity::SubAnnual, 2000);
        s.append_start(pt(0.0));
        for x in 1..=8 {
            s.append(pt(f64::from(x)));
        }
        s.delete_point(4).unwrap();
        s.insert_point_at(3, pt(2.5)).unwrap();

        let prefs = s.prefs();
        let dates: Vec<_> = s.points().iter().filter_map(RingPoint::date).collect();
        for pair in dates.windows(2) {
            assert_eq!(pair[1], prefs.next_date(pair[0]), "chain broken at {pair:?}");
        }
    }
}
