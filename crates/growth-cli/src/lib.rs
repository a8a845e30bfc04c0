//! CLI library components for the growth chart tool.

pub mod logging;
pub mod pipeline;
