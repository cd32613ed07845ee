//! Utility functions for timestamp handling.

pub mod timestamps;

pub use timestamps::{filesystem_safe_timestamp, iso_timestamp, now_utc, Timestamp};
