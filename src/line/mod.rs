//! Delimiter read results.
//!
//! - [`Line`] - Bytes accumulated by a delimiter scan, with completion status

mod data;
mod scan;

pub use data::Line;
pub(crate) use scan::Scan;
