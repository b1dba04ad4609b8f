//! Packed 8-bit rows to planar `f32` channels and back.
//!
//! Import widens every byte to the float of the same value, so it is exact.
//! Export clamps each sample to `[0, 255]` and truncates toward zero; NaN
//! becomes 0, `+inf` becomes 255 and `-inf` becomes 0.
//!
//! Both directions work one row at a time over a validated
//! [`PackedRows`]/[`PackedRowsMut`] view and never touch bytes outside the
//! pixel bytes of each row.

mod export;
mod import;

pub use export::{ExportPlan, export, is_valid_pairing};
pub use import::import;
