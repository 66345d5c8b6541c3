//! Technical indicators as pure functions over bar windows

pub mod momentum;
pub mod structure;
pub mod trend;
pub mod volatility;
