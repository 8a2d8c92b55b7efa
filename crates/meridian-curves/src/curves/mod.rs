//! Read-only curve implementations.

mod flat;
mod interpolated;

pub use flat::FlatCurve;
pub use interpolated::InterpolatedCurve;
