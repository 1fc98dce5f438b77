//! Target time projection.
//!
//! Finds the clock time at which presence since `start` reaches a target when
//! breaks may fall inside the remaining window. Pushing the end out past one
//! break can uncover the next, so the end is advanced by the shortfall until
//! no shortfall remains.

use chrono::{NaiveDateTime, TimeDelta};
use log::warn;

use crate::interval::{presence, Interval, Span};

/// Upper bound on loop checks for minute-resolution input.
///
/// Each advance is at least one minute and never overshoots the answer, which
/// lies at most the total break length past the naive end. An end that lands
/// inside a long break walks through it in steps of the remaining shortfall,
/// hence the break minutes on top of one check per break.
fn iteration_cap<I: Interval>(start: NaiveDateTime, breaks: &[I]) -> usize {
    let break_minutes: i64 = breaks
        .iter()
        .map(|b| b.on_date(start.date()).duration().num_minutes().max(0))
        .sum();
    (breaks.len() + 1).saturating_add(usize::try_from(break_minutes).unwrap_or(usize::MAX))
}

/// Instant `t` with `presence(start..t, breaks) == target`.
///
/// A non-positive target returns `start + target` after the first check.
/// Past the end of chrono's calendar the last representable end is returned:
/// `start` itself, or the end reached before the next step would overflow.
pub fn project_target_time<I: Interval>(
    start: NaiveDateTime,
    breaks: &[I],
    target: TimeDelta,
) -> NaiveDateTime {
    let cap = iteration_cap(start, breaks);
    let Some(naive_end) = start.checked_add_signed(target) else {
        warn!("target {} from {} is out of range", target, start);
        return start;
    };
    let mut window = Span::new(start, naive_end);
    for _ in 0..cap {
        let missing = target - presence(&window, breaks);
        if missing <= TimeDelta::zero() {
            return window.end;
        }
        match window.end.checked_add_signed(missing) {
            Some(end) => window.end = end,
            None => {
                warn!("target projection from {} overflowed at {}", start, window.end);
                return window.end;
            }
        }
    }
    warn!(
        "target projection from {} stopped after {} iterations at {}",
        start, cap, window.end
    );
    window.end
}
