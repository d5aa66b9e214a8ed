//! Shader programs.
//!
//! A program is a vertex stage and a fragment stage, each compiled from WGSL
//! and validated on the CPU with naga, then linked against each other:
//! - `compile` parses + validates one stage and surfaces naga's diagnostic
//! - `link` matches the stage interfaces and runs a validation pass
//! - attribute/uniform lookups return `Option`; `None` means "absent"
//!
//! Every failure here is a startup fault. Callers propagate and exit.

mod error;
mod link;
mod reflect;
mod stage;

pub use error::ProgramError;
pub use link::{link, AttributeLocation, Program, UniformLocation};
pub use stage::{compile, CompiledStage, ShaderStage};
