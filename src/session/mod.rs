//! The animation driver.
//!
//! Owns the carried recurrence state and the frame clock; the kernel stays a
//! pure function underneath it.

/// Session-oriented animation rendering.
pub mod driver;
