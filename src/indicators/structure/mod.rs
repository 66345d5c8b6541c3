pub mod support_resistance;
