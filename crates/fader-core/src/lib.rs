//! Fader Core - overlay compositing and control logic for the volume daemon

pub mod animation;
pub mod assets;
pub mod channel;
pub mod clock;
pub mod compositor;
pub mod config;
pub mod control;
pub mod normalize;
pub mod types;

pub use types::*;
