//! Heuristic quality metrics. Every function here is total over its input,
//! including empty text, and never fails.

pub mod coverage;
pub mod health;
pub mod readiness;
pub mod stats;
