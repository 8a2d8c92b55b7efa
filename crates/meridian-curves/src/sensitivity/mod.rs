//! Point sensitivities.
//!
//! A point sensitivity is the derivative of a value with respect to one node
//! of one curve. Lists of them are merged by sorting on the curve key and
//! summing entries whose keys match.

mod list;
mod point;

pub use list::PointSensitivities;
pub use point::{
    IborRateSensitivity, OvernightRateSensitivity, PointSensitivity, ZeroRateSensitivity,
};
