//! SVG optimization applied to every icon before extraction.
//!
//! Two engines sit behind the [`Optimizer`] trait:
//! - [`BuiltinOptimizer`]: a streaming `quick-xml` pass that drops prologs,
//!   comments, metadata and editor cruft and minifies whitespace
//! - [`CommandOptimizer`]: pipes the markup through an external program such
//!   as `svgo`
//!
//! Both are configured once from `[optimizer]` and applied identically to
//! every icon. An `Err` from either is a per-icon failure, never a run failure.

mod builtin;
mod command;

pub use builtin::BuiltinOptimizer;
pub use command::CommandOptimizer;

use crate::config::{OptimizerConfig, OptimizerEngine};
use crate::error::OptimizeError;
use std::path::Path;

/// Minifies and normalizes one SVG document.
pub trait Optimizer {
    /// `path` identifies the source for diagnostics only.
    fn optimize(&self, svg: &str, path: &Path) -> Result<String, OptimizeError>;
}

/// Builds the optimizer selected by `config.engine`.
pub fn from_config(config: &OptimizerConfig) -> Box<dyn Optimizer> {
    match config.engine {
        OptimizerEngine::Builtin => Box::new(BuiltinOptimizer::new(config.clone())),
        OptimizerEngine::Command => Box::new(CommandOptimizer::new(
            config.command.clone(),
            config.args.clone(),
        )),
    }
}
