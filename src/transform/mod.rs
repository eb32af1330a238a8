//! Record sanitization transforms
//!
//! Identity/audit fields and null values are stripped before records are
//! persisted to the project tree.

mod null_stripper;
mod sanitizer;

pub use null_stripper::NullStripper;
pub use sanitizer::{IDENTITY_FIELDS, PROJECT_ID_FIELD, Sanitizer};
