//! Gap filling and missing-value maintenance.

use hydrots_calendar::{Step, step_sequence};
use tracing::debug;

use crate::error::SeriesError;
use crate::series::Series;

impl Series {
    /// Inserts a `NaN` node at every point of the regular grid from `start`
    /// to `end` that has no node yet. Existing nodes are left untouched.
    ///
    /// Only [`Step::Day`] and [`Step::Month`] are supported. An empty series
    /// is left unchanged. Returns the number of inserted nodes.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::UnsupportedStep`] for [`Step::Hour`] and
    /// [`SeriesError::Calendar`] if the grid leaves the representable range.
    pub fn fill_gaps(&mut self, step: Step) -> Result<usize, SeriesError> {
        if step == Step::Hour {
            return Err(SeriesError::UnsupportedStep {
                step,
                operation: "fill_gaps",
            });
        }
        let (Ok(start), Ok(end)) = (self.start(), self.end()) else {
            return Ok(0);
        };

        let mut inserted = 0;
        for ts in step_sequence(start, end, step)? {
            if !self.contains(&ts) {
                self.set(ts, f64::NAN);
                inserted += 1;
            }
        }
        debug!(title = %self.title, inserted, step = %step, "filled gaps");
        Ok(inserted)
    }

    /// Removes every node holding the missing-value sentinel.
    ///
    /// Returns the number of removed nodes.
    pub fn delete_nan_nodes(&mut self) -> usize {
        let before = self.len();
        self.retain(|_, value| !crate::is_missing(value));
        before - self.len()
    }

    /// Number of nodes holding a real (non-missing) value.
    pub fn count_value_nodes(&self) -> usize {
        self.iter()
            .filter(|(_, value)| !crate::is_missing(*value))
            .count()
    }
}
