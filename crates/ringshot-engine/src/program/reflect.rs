//! Entry-point interface reflection over naga modules.

use super::CompiledStage;

/// One user-defined or built-in input/output of an entry point.
#[derive(Debug, Clone)]
pub(crate) struct IoSlot {
    pub name: Option<String>,
    pub binding: naga::Binding,
    pub ty: naga::TypeInner,
}

impl IoSlot {
    pub fn location(&self) -> Option<u32> {
        match self.binding {
            naga::Binding::Location { location, .. } => Some(location),
            _ => None,
        }
    }

    pub fn is_position(&self) -> bool {
        matches!(
            self.binding,
            naga::Binding::BuiltIn(naga::BuiltIn::Position { .. })
        )
    }
}

/// A `var<uniform>` declared by a stage.
#[derive(Debug, Clone)]
pub(crate) struct UniformDecl {
    pub name: String,
    pub group: u32,
    pub binding: u32,
    pub size: u32,
    /// Whether the entry point reads the variable at all.
    pub used: bool,
}

pub(crate) fn inputs(stage: &CompiledStage) -> Vec<IoSlot> {
    let module = stage.module();
    let mut out = Vec::new();
    for arg in &stage.entry().function.arguments {
        flatten(module, arg.name.clone(), arg.ty, arg.binding.as_ref(), &mut out);
    }
    out
}

pub(crate) fn outputs(stage: &CompiledStage) -> Vec<IoSlot> {
    let module = stage.module();
    let mut out = Vec::new();
    if let Some(result) = &stage.entry().function.result {
        flatten(module, None, result.ty, result.binding.as_ref(), &mut out);
    }
    out
}

fn flatten(
    module: &naga::Module,
    name: Option<String>,
    ty: naga::Handle<naga::Type>,
    binding: Option<&naga::Binding>,
    out: &mut Vec<IoSlot>,
) {
    let inner = &module.types[ty].inner;

    if let Some(binding) = binding {
        out.push(IoSlot {
            name,
            binding: binding.clone(),
            ty: inner.clone(),
        });
        return;
    }

    // Unbound arguments/results are structs whose members carry the bindings.
    if let naga::TypeInner::Struct { members, .. } = inner {
        for member in members {
            flatten(
                module,
                member.name.clone(),
                member.ty,
                member.binding.as_ref(),
                out,
            );
        }
    }
}

pub(crate) fn uniforms(stage: &CompiledStage) -> Vec<UniformDecl> {
    let module = stage.module();
    let usage = stage.entry_info();

    module
        .global_variables
        .iter()
        .filter(|(_, var)| var.space == naga::AddressSpace::Uniform)
        .filter_map(|(handle, var)| {
            let name = var.name.clone()?;
            let res = var.binding.as_ref()?;
            Some(UniformDecl {
                name,
                group: res.group,
                binding: res.binding,
                size: module.types[var.ty].inner.size(module.to_ctx()),
                used: !usage[handle].is_empty(),
            })
        })
        .collect()
}
