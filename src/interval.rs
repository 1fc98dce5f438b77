//! Interval overlap arithmetic.
//!
//! A [`Span`] is a dated interval (the work span). A [`DailyBreak`] has no date
//! and is pinned to a day before it can be compared against a span. Overlaps
//! are never negative; a span whose end precedes its start simply overlaps
//! nothing.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::format;

/// A dated interval `start..end`. `end >= start` is expected but not enforced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    #[serde(with = "format::timestamp")]
    pub start: NaiveDateTime,
    #[serde(with = "format::timestamp")]
    pub end: NaiveDateTime,
}

impl Span {
    pub const fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Elapsed time; negative when `end < start`.
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }
}

/// A break that recurs every day, stored as a time-of-day pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyBreak {
    #[serde(with = "format::time_of_day")]
    pub start: NaiveTime,
    #[serde(with = "format::time_of_day")]
    pub end: NaiveTime,
}

impl DailyBreak {
    pub const fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }
}

/// Anything that can be compared against a [`Span`] once pinned to a calendar date.
pub trait Interval {
    /// Concrete span of this interval on `date`. Dated intervals ignore `date`.
    fn on_date(&self, date: NaiveDate) -> Span;
}

impl Interval for Span {
    fn on_date(&self, _date: NaiveDate) -> Span {
        *self
    }
}

/// Both bounds land on the same date, so a break crossing midnight
/// (`end < start`) overlaps nothing.
impl Interval for DailyBreak {
    fn on_date(&self, date: NaiveDate) -> Span {
        Span::new(date.and_time(self.start), date.and_time(self.end))
    }
}

/// Time shared by `first` and `second`. A dateless `second` is pinned to the
/// date of `first.start`, so the result is not symmetric for breaks.
pub fn overlap<I: Interval + ?Sized>(first: &Span, second: &I) -> TimeDelta {
    let second = second.on_date(first.start.date());
    let start = first.start.max(second.start);
    let end = first.end.min(second.end);
    if end > start {
        end - start
    } else {
        TimeDelta::zero()
    }
}

/// Sum of each break's overlap with `work`, in list order. Breaks that overlap
/// each other are counted once per break.
pub fn sum_overlaps<I: Interval>(work: &Span, breaks: &[I]) -> TimeDelta {
    breaks
        .iter()
        .fold(TimeDelta::zero(), |total, b| total + overlap(work, b))
}

/// Elapsed work time net of breaks. Not clamped: a reversed span yields a negative value.
pub fn presence<I: Interval>(work: &Span, breaks: &[I]) -> TimeDelta {
    work.duration() - sum_overlaps(work, breaks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2000, 1, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn span(sh: u32, sm: u32, eh: u32, em: u32) -> Span {
        Span::new(at(sh, sm), at(eh, em))
    }

    fn daily(sh: u32, sm: u32, eh: u32, em: u32) -> DailyBreak {
        DailyBreak::new(
            NaiveTime::from_hms_opt(sh, sm, 0).unwrap(),
            NaiveTime::from_hms_opt(eh, em, 0).unwrap(),
        )
    }

    #[test]
    fn test_overlap_full_containment() {
        assert_eq!(overlap(&span(7, 0, 9, 30), &span(9, 0, 9, 15)), TimeDelta::minutes(15));
    }

    #[test]
    fn test_overlap_first_ends_during_second() {
        assert_eq!(overlap(&span(7, 0, 9, 5), &span(9, 0, 9, 15)), TimeDelta::minutes(5));
    }

    #[test]
    fn test_overlap_first_starts_during_second() {
        assert_eq!(overlap(&span(9, 10, 9, 30), &span(9, 0, 9, 15)), TimeDelta::minutes(5));
    }

    #[test]
    fn test_overlap_first_inside_second() {
        assert_eq!(overlap(&span(9, 5, 9, 10), &span(9, 0, 9, 15)), TimeDelta::minutes(5));
    }

    #[test]
    fn test_overlap_disjoint_is_zero() {
        assert_eq!(overlap(&span(7, 0, 7, 30), &span(9, 0, 9, 15)), TimeDelta::zero());
        assert_eq!(overlap(&span(9, 0, 9, 15), &span(7, 0, 7, 30)), TimeDelta::zero());
        // touching bounds share no time
        assert_eq!(overlap(&span(7, 0, 9, 0), &span(9, 0, 9, 15)), TimeDelta::zero());
    }

    #[test]
    fn test_overlap_reversed_span_is_zero() {
        assert_eq!(overlap(&span(10, 0, 8, 0), &span(9, 0, 9, 15)), TimeDelta::zero());
    }

    #[test]
    fn test_overlap_with_daily_break() {
        assert_eq!(overlap(&span(9, 5, 9, 10), &daily(9, 0, 9, 15)), TimeDelta::minutes(5));
    }

    #[test]
    fn test_daily_break_pinned_to_first_start_date() {
        // Work runs from the evening of Jan 1 into Jan 2; the break is pinned
        // to Jan 1 only, so the 09:00 break on Jan 2 is not subtracted.
        let late = Span::new(
            at(22, 0),
            NaiveDate::from_ymd_opt(2000, 1, 2).unwrap().and_hms_opt(10, 0, 0).unwrap(),
        );
        assert_eq!(overlap(&late, &daily(9, 0, 9, 15)), TimeDelta::zero());
    }

    #[test]
    fn test_overlap_asymmetric_for_daily_break() {
        // Dated span vs break on another day: the break takes the span's date.
        let other_day = Span::new(
            NaiveDate::from_ymd_opt(2000, 1, 5).unwrap().and_hms_opt(9, 0, 0).unwrap(),
            NaiveDate::from_ymd_opt(2000, 1, 5).unwrap().and_hms_opt(9, 15, 0).unwrap(),
        );
        let work = span(7, 0, 17, 0);
        assert_eq!(overlap(&work, &other_day), TimeDelta::zero());
        assert_eq!(overlap(&work, &daily(9, 0, 9, 15)), TimeDelta::minutes(15));
    }

    #[test]
    fn test_midnight_crossing_break_overlaps_nothing() {
        assert_eq!(overlap(&span(0, 0, 23, 59), &daily(23, 0, 1, 0)), TimeDelta::zero());
    }

    #[test]
    fn test_sum_overlaps_all_breaks_covered() {
        let breaks = [span(9, 0, 9, 15), span(12, 30, 13, 0)];
        assert_eq!(sum_overlaps(&span(7, 0, 17, 0), &breaks), TimeDelta::minutes(45));
    }

    #[test]
    fn test_sum_overlaps_no_break_covered() {
        let breaks = [span(9, 0, 9, 15), span(12, 30, 13, 0)];
        assert_eq!(sum_overlaps(&span(9, 30, 12, 0), &breaks), TimeDelta::zero());
    }

    #[test]
    fn test_sum_overlaps_empty() {
        let breaks: [DailyBreak; 0] = [];
        assert_eq!(sum_overlaps(&span(9, 30, 12, 0), &breaks), TimeDelta::zero());
    }

    #[test]
    fn test_sum_overlaps_double_counts_overlapping_breaks() {
        let breaks = [daily(12, 0, 13, 0), daily(12, 30, 13, 30)];
        assert_eq!(sum_overlaps(&span(7, 0, 17, 0), &breaks), TimeDelta::minutes(120));
    }

    #[test]
    fn test_presence_full_work_day() {
        let breaks = [daily(9, 0, 9, 15), daily(12, 30, 13, 0)];
        assert_eq!(presence(&span(7, 0, 17, 0), &breaks), TimeDelta::minutes(9 * 60 + 15));
    }

    #[test]
    fn test_presence_no_break_in_span() {
        let breaks = [daily(9, 0, 9, 15), daily(12, 30, 13, 0)];
        assert_eq!(presence(&span(9, 30, 12, 0), &breaks), TimeDelta::minutes(150));
    }

    #[test]
    fn test_presence_without_breaks_is_duration() {
        let breaks: [DailyBreak; 0] = [];
        let work = span(8, 12, 16, 47);
        assert_eq!(presence(&work, &breaks), work.duration());
    }

    #[test]
    fn test_presence_reversed_span_is_negative() {
        let breaks = [daily(9, 0, 9, 15)];
        assert_eq!(presence(&span(10, 0, 8, 0), &breaks), TimeDelta::minutes(-120));
    }
}
