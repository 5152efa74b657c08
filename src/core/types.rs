/*!
 * Core Types
 * Common types used across the crate
 */

/// Size type for byte counts and waiter counts
pub type Size = usize;
