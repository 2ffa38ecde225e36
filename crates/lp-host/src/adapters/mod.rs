pub mod windows;

pub use windows::DisplayWindowRegistry;
