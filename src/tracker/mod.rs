//! Derived queries over the activity table: week resolution, day/week
//! filters and the plain-text report.

pub mod filter;
pub mod report;
pub mod week;
