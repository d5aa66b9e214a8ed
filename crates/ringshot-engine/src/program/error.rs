use super::ShaderStage;

/// Program setup failure.
///
/// `log` fields carry the diagnostic text and are never empty.
#[derive(Debug, thiserror::Error)]
pub enum ProgramError {
    #[error("failed to compile {stage} shader:\n{log}")]
    Compile { stage: ShaderStage, log: String },

    #[error("failed to link program:\n{log}")]
    Link { log: String },

    #[error("failed to validate program:\n{log}")]
    Validate { log: String },

    #[error("program has no active attribute `{name}`")]
    MissingAttribute { name: String },

    #[error("program has no active uniform `{name}`")]
    MissingUniform { name: String },
}

impl ProgramError {
    pub(crate) fn compile(stage: ShaderStage, log: impl Into<String>) -> Self {
        Self::Compile {
            stage,
            log: non_empty(log.into()),
        }
    }

    pub(crate) fn link(log: impl Into<String>) -> Self {
        Self::Link {
            log: non_empty(log.into()),
        }
    }

    pub(crate) fn validate(log: impl Into<String>) -> Self {
        Self::Validate {
            log: non_empty(log.into()),
        }
    }
}

fn non_empty(log: String) -> String {
    if log.trim().is_empty() {
        "no diagnostic available".to_string()
    } else {
        log
    }
}
