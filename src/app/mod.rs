pub mod api;
pub mod cli;
pub mod commands;
mod context;

pub use context::PipelineContext;
