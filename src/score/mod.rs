//! Normalization of raw metrics onto [0,100] and weighted aggregation into
//! category scores and the composite.

pub mod aggregate;
pub mod normalize;

pub use aggregate::build_report;
pub use normalize::{curve_for, normalize, Curve};
