//! Console rendering and the console notification sink

pub mod console;
pub mod notifier;
