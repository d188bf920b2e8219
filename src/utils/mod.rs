//! Small helpers shared across the crate.

mod format;

pub use format::format_file_size;
