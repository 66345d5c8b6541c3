//! External data provider seams

pub mod providers;

pub use providers::*;
