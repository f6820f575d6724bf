pub mod hooks;
pub mod setup;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use hooks::RecordingHooks;
#[allow(unused_imports)]
pub use setup::{TestSetup, TestSetupBuilder};
