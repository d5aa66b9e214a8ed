use std::fmt;

use super::ProgramError;

/// Pipeline stage a shader source is compiled for.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn matches(self, stage: naga::ShaderStage) -> bool {
        matches!(
            (self, stage),
            (ShaderStage::Vertex, naga::ShaderStage::Vertex)
                | (ShaderStage::Fragment, naga::ShaderStage::Fragment)
        )
    }

    pub fn to_wgpu(self) -> wgpu::ShaderStages {
        match self {
            ShaderStage::Vertex => wgpu::ShaderStages::VERTEX,
            ShaderStage::Fragment => wgpu::ShaderStages::FRAGMENT,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// A parsed and validated WGSL module with exactly one entry point of `stage`.
#[derive(Debug)]
pub struct CompiledStage {
    stage: ShaderStage,
    source: String,
    module: naga::Module,
    info: naga::valid::ModuleInfo,
    entry_index: usize,
}

impl CompiledStage {
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    /// WGSL text the stage was compiled from; the GPU module is created from it.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn entry_point(&self) -> &str {
        &self.entry().name
    }

    pub(crate) fn module(&self) -> &naga::Module {
        &self.module
    }

    pub(crate) fn entry(&self) -> &naga::EntryPoint {
        &self.module.entry_points[self.entry_index]
    }

    /// Usage info for the entry point's function.
    pub(crate) fn entry_info(&self) -> &naga::valid::FunctionInfo {
        self.info.get_entry_point(self.entry_index)
    }
}

/// Compiles one shader stage.
///
/// Fails with [`ProgramError::Compile`] on a parse error, a validation error,
/// or when the source does not declare exactly one entry point for `stage`.
pub fn compile(stage: ShaderStage, source: &str) -> Result<CompiledStage, ProgramError> {
    let module = naga::front::wgsl::parse_str(source)
        .map_err(|e| ProgramError::compile(stage, e.emit_to_string(source)))?;

    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );
    let info = validator
        .validate(&module)
        .map_err(|e| ProgramError::compile(stage, e.emit_to_string(source)))?;

    let mut entries = module
        .entry_points
        .iter()
        .enumerate()
        .filter(|(_, ep)| stage.matches(ep.stage));

    let entry_index = match (entries.next(), entries.next()) {
        (Some((index, _)), None) => index,
        (None, _) => {
            return Err(ProgramError::compile(
                stage,
                format!("source declares no @{stage} entry point"),
            ));
        }
        (Some(_), Some(_)) => {
            return Err(ProgramError::compile(
                stage,
                format!("source declares more than one @{stage} entry point"),
            ));
        }
    };

    log::debug!(
        "compiled {stage} stage (entry point `{}`)",
        module.entry_points[entry_index].name
    );

    Ok(CompiledStage {
        stage,
        source: source.to_string(),
        module,
        info,
        entry_index,
    })
}
