//! Filesystem abstraction for ve-bootstrap
//!
//! Provides lexical path resolution, search-path manipulation, atomic
//! writes and content checksums.

pub mod checksum;
pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use error::{Error, Result};
pub use path::{absolutize, search_path_contains, prepend_search_path};
