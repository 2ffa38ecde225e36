//! Port interfaces for the application layer
//!
//! Ports define the contract between the projection use cases and the
//! collaborators that live outside the core: the library store, the display
//! window manager, the Bible text source and the clock.

mod bible;
mod clock;
mod library;
mod surface_window;

pub use bible::BibleTextPort;
pub use clock::ClockPort;
pub use library::LibraryPort;
pub use surface_window::SurfaceWindowPort;
