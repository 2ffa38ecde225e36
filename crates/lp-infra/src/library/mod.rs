mod json_library;

pub use json_library::{JsonLibraryStore, LibraryFile};
