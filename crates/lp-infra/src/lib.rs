//! LiveProjector infrastructure adapters
//!
//! Concrete implementations of the lp-core ports: wall clock, file-backed
//! library and the local Bible dataset.

pub mod bible;
pub mod library;
pub mod time;

pub use bible::JsonBibleDataset;
pub use library::JsonLibraryStore;
pub use time::SystemClock;
