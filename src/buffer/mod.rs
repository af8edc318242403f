//! Internal fixed-capacity window over the source.
//!
//! Owns the byte arena and the two cursors delimiting its unread region.
//! Not part of the public API.

mod window;

pub(crate) use window::{Fill, Window};
