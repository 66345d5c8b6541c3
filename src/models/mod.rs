//! Core data models shared across the engine

pub mod event;
pub mod indicators;
pub mod market;
pub mod risk;
pub mod signal;

pub use event::*;
pub use market::*;
pub use risk::*;
pub use signal::*;
