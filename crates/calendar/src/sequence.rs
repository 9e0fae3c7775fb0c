//! Equidistant timestamp grids.

use chrono::NaiveDateTime;

use crate::error::CalendarError;
use crate::step::Step;

/// Generates the grid `start, start + step, ...` up to and including `end`.
///
/// Each point is derived from the previous one, so with [`Step::Month`] a
/// clamped day of month carries forward (Jan 31, Feb 28, Mar 28, ...).
/// Returns an empty grid when `end < start`.
///
/// # Errors
///
/// Returns [`CalendarError::OutOfRange`] if stepping leaves the representable
/// date range before passing `end`.
///
/// # Example
///
/// ```ignore
/// let grid = step_sequence(jan1, jan1 + TimeDelta::days(3), Step::Day)?;
/// assert_eq!(grid.len(), 4);
/// ```
pub fn step_sequence(
    start: NaiveDateTime,
    end: NaiveDateTime,
    step: Step,
) -> Result<Vec<NaiveDateTime>, CalendarError> {
    let mut grid = Vec::new();
    let mut current = start;
    while current <= end {
        grid.push(current);
        current = step.advance(current)?;
    }
    Ok(grid)
}
