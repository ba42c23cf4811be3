//! Graphics backend implementations
//!
//! Device-backed implementations live with the application that owns the
//! window. The engine ships only the headless recorder.

pub mod headless;

pub use headless::{HeadlessBackend, BackendCall};
