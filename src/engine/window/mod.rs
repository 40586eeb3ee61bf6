//! Window creation and lifetime.

pub mod manager;

pub use manager::WindowManager;
