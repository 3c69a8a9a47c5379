//! Change detection for incremental builds
//!
//! This module enumerates candidate source files with their modification
//! instants and partitions them against the persisted build marker into
//! "stale" and "up to date". It is read-only with respect to persisted
//! state; only the build invoker rewrites the marker.

mod error;
mod listing;
mod stale;

pub use error::{DetectError, Result};
pub use listing::{list_source_files, SourceFileRecord};
pub use stale::stale_files;
