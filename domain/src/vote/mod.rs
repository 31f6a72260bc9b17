//! Vote evaluation
//!
//! The coordinator treats vote values as opaque strings; this module is the
//! one place where a numeric voting mode parses them.

pub mod approval;

pub use approval::{ApprovalThresholds, evaluate};
