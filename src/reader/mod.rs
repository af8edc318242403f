//! Buffered reading over blocking sources.
//!
//! - [`Reader`] - Fixed-window buffered reader with bounded, byte and delimiter reads
//! - [`Split`] - Iterator over delimiter-terminated lines

mod engine;
mod split;

pub use engine::Reader;
pub use split::Split;
