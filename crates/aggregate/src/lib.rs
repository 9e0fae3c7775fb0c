//! # hydrots-aggregate
//!
//! Resampling of irregular series onto a coarser regular step.
//!
//! [`aggregate`] makes one left-to-right pass over the nodes. Each node falls
//! into exactly one bucket `[t, t + step)`; buckets are reduced with a
//! [`Method`] and stored at their left edge. There is no time weighting:
//! a block value that straddles a boundary is counted where its timestamp
//! lies.
//!
//! | Method | Bucket value |
//! |--------|--------------|
//! | [`Method::Sum`] | sum of the values |
//! | [`Method::LinearInterpolation`] | arithmetic mean |
//!
//! ```ignore
//! use hydrots_aggregate::{aggregate, Method};
//! use hydrots_calendar::Step;
//!
//! let monthly = aggregate(&daily, Step::Month, start, Method::Sum, false)?;
//! ```

mod aggregate;
mod error;
mod method;

pub use aggregate::aggregate;
pub use error::AggregateError;
pub use method::Method;
