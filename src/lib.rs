//! Game loop for a 2D vertical shooter: pooled bullets, enemies and
//! explosions, a spawn scheduler, and the per-frame collision sweep.
//!
//! Rendering, audio and input are supplied by the host through the traits in
//! [`engine`]; the terminal front-end in `main.rs` is one such host.

pub mod config;
pub mod emitter;
pub mod engine;
pub mod error;
pub mod math;
pub mod pool;
pub mod pools;
pub mod screen;
pub mod sprite;
pub mod sprites;

pub use config::GameConfig;
pub use error::ConfigError;
pub use screen::{GameScreen, ScreenState};
