pub mod callstack;
pub mod color;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod render;
pub mod trace;

pub use error::{Result, VizError};
pub use pipeline::{render_trace, RenderOptions, TraceSummary};

#[cfg(test)]
mod test;
