//! # hydrots-calendar
//!
//! Gregorian date arithmetic shared by the hydrots crates.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["NaiveDateTime"] -->|"add_months()"| A
//!     A -->|"Step::advance()"| A
//!     A -->|"step_sequence()"| B["Vec of NaiveDateTime"]
//!     A -->|"date_to_double()"| C["hours since 1601 (f64)"]
//!     C -->|"double_to_date()"| A
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use chrono::NaiveDate;
//! use hydrots_calendar::{Step, add_months, date_to_double, step_sequence};
//!
//! let jan31 = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let feb = add_months(jan31, 1)?; // 2024-02-29
//!
//! let grid = step_sequence(jan31, feb, Step::Day)?;
//! assert_eq!(grid.len(), 30);
//!
//! let hours = date_to_double(feb);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `month` | Leap years, month lengths and clamped month addition |
//! | `step` | Hour/day/month step enumeration |
//! | `sequence` | Equidistant grid generation |
//! | `epoch` | Hours-since-1601 encoding used by binary formats |
//! | `error` | Error types |

mod epoch;
mod error;
mod month;
mod sequence;
mod step;

pub use epoch::{date_to_double, double_to_date, epoch};
pub use error::CalendarError;
pub use month::{add_months, days_in_month, is_leap_year};
pub use sequence::step_sequence;
pub use step::Step;
