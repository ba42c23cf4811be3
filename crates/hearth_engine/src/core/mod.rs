//! # Core Engine Module
//!
//! Shared configuration types used by the scene, the engine loop and
//! applications.

pub mod config;

pub use config::{
    EngineConfig,
    WindowConfig,
    SceneConfig,
    InitPolicy,
    Config,
    ConfigError,
};
