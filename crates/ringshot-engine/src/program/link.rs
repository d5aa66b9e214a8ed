use std::collections::BTreeMap;

use super::reflect::{self, IoSlot, UniformDecl};
use super::{CompiledStage, ProgramError, ShaderStage};

/// Vertex attribute slot (`@location(n)` on a vertex input).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct AttributeLocation(pub u32);

/// Bind slot of an active uniform.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct UniformLocation {
    pub group: u32,
    pub binding: u32,
    /// Size of the uniform's type in bytes.
    pub size: u32,
    /// Stages whose entry points read the uniform.
    pub visibility: wgpu::ShaderStages,
}

/// A linked and validated vertex/fragment pair.
///
/// Owns both stages. Attribute and uniform tables are resolved at link time.
#[derive(Debug)]
pub struct Program {
    vertex: CompiledStage,
    fragment: CompiledStage,
    attributes: BTreeMap<String, AttributeLocation>,
    uniforms: BTreeMap<String, UniformLocation>,
}

impl Program {
    pub fn vertex(&self) -> &CompiledStage {
        &self.vertex
    }

    pub fn fragment(&self) -> &CompiledStage {
        &self.fragment
    }

    /// Looks up a vertex attribute. `None` if the vertex stage has no such input.
    pub fn attribute(&self, name: &str) -> Option<AttributeLocation> {
        self.attributes.get(name).copied()
    }

    /// Looks up a uniform.
    ///
    /// `None` if no stage declares it, or if it is declared but never read.
    pub fn uniform(&self, name: &str) -> Option<UniformLocation> {
        self.uniforms.get(name).copied()
    }

    pub fn require_attribute(&self, name: &str) -> Result<AttributeLocation, ProgramError> {
        self.attribute(name)
            .ok_or_else(|| ProgramError::MissingAttribute {
                name: name.to_string(),
            })
    }

    pub fn require_uniform(&self, name: &str) -> Result<UniformLocation, ProgramError> {
        self.uniform(name).ok_or_else(|| ProgramError::MissingUniform {
            name: name.to_string(),
        })
    }

    /// Active uniforms ordered by `(group, binding)`.
    pub fn active_uniforms(&self) -> Vec<(&str, UniformLocation)> {
        let mut all: Vec<(&str, UniformLocation)> = self
            .uniforms
            .iter()
            .map(|(name, loc)| (name.as_str(), *loc))
            .collect();
        all.sort_by_key(|(_, loc)| (loc.group, loc.binding));
        all
    }
}

/// Links a vertex and a fragment stage.
///
/// Link errors: stage kinds swapped, or a fragment input location that the
/// vertex stage does not write (or writes with another type). The validation
/// pass then rejects a vertex stage without `@builtin(position)`, a fragment
/// stage without color location 0, and uniforms that both stages declare at
/// one slot with different sizes or names.
pub fn link(vertex: CompiledStage, fragment: CompiledStage) -> Result<Program, ProgramError> {
    if vertex.stage() != ShaderStage::Vertex {
        return Err(ProgramError::link(format!(
            "expected a vertex stage, got {}",
            vertex.stage()
        )));
    }
    if fragment.stage() != ShaderStage::Fragment {
        return Err(ProgramError::link(format!(
            "expected a fragment stage, got {}",
            fragment.stage()
        )));
    }

    let vs_outputs = reflect::outputs(&vertex);
    let fs_inputs = reflect::inputs(&fragment);
    match_varyings(&vs_outputs, &fs_inputs)?;

    validate(&vs_outputs, &reflect::outputs(&fragment))?;

    let attributes = reflect::inputs(&vertex)
        .into_iter()
        .filter_map(|slot| Some((slot.name.clone()?, AttributeLocation(slot.location()?))))
        .collect();

    let uniforms = merge_uniforms(
        &reflect::uniforms(&vertex),
        &reflect::uniforms(&fragment),
    )?;

    let program = Program {
        vertex,
        fragment,
        attributes,
        uniforms,
    };

    for (name, loc) in &program.attributes {
        log::debug!("attribute {name}: location {}", loc.0);
    }
    for (name, loc) in &program.uniforms {
        log::debug!("uniform {name}: group {} binding {}", loc.group, loc.binding);
    }

    Ok(program)
}

fn match_varyings(vs_outputs: &[IoSlot], fs_inputs: &[IoSlot]) -> Result<(), ProgramError> {
    let mut problems = Vec::new();

    for input in fs_inputs {
        let Some(location) = input.location() else {
            continue;
        };
        let label = input.name.as_deref().unwrap_or("<unnamed>");

        match vs_outputs.iter().find(|o| o.location() == Some(location)) {
            None => problems.push(format!(
                "fragment input `{label}` at location {location} is not written by the vertex stage"
            )),
            Some(output) if output.ty != input.ty => problems.push(format!(
                "fragment input `{label}` at location {location} is {:?} but the vertex stage writes {:?}",
                input.ty, output.ty
            )),
            Some(_) => {}
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(ProgramError::link(problems.join("\n")))
    }
}

fn validate(vs_outputs: &[IoSlot], fs_outputs: &[IoSlot]) -> Result<(), ProgramError> {
    if !vs_outputs.iter().any(IoSlot::is_position) {
        return Err(ProgramError::validate(
            "vertex stage does not write @builtin(position)",
        ));
    }
    if !fs_outputs.iter().any(|o| o.location() == Some(0)) {
        return Err(ProgramError::validate(
            "fragment stage does not write color location 0",
        ));
    }
    Ok(())
}

fn merge_uniforms(
    vertex: &[UniformDecl],
    fragment: &[UniformDecl],
) -> Result<BTreeMap<String, UniformLocation>, ProgramError> {
    for v in vertex {
        for f in fragment {
            if (v.group, v.binding) != (f.group, f.binding) {
                continue;
            }
            if v.name != f.name || v.size != f.size {
                return Err(ProgramError::validate(format!(
                    "group {} binding {} is `{}` ({} bytes) in the vertex stage but `{}` ({} bytes) in the fragment stage",
                    v.group, v.binding, v.name, v.size, f.name, f.size
                )));
            }
        }
    }

    let mut merged: BTreeMap<String, UniformLocation> = BTreeMap::new();
    let stages = [
        (ShaderStage::Vertex, vertex),
        (ShaderStage::Fragment, fragment),
    ];

    for (stage, decls) in stages {
        for decl in decls.iter().filter(|d| d.used) {
            let entry = merged
                .entry(decl.name.clone())
                .or_insert(UniformLocation {
                    group: decl.group,
                    binding: decl.binding,
                    size: decl.size,
                    visibility: wgpu::ShaderStages::NONE,
                });

            if (entry.group, entry.binding) != (decl.group, decl.binding) {
                return Err(ProgramError::validate(format!(
                    "uniform `{}` is bound at different slots in the two stages",
                    decl.name
                )));
            }
            entry.visibility |= stage.to_wgpu();
        }
    }

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::compile;

    const VERTEX: &str = r#"
@group(0) @binding(0) var<uniform> u_matrix: mat4x4<f32>;

struct VertexOut {
    @builtin(position) position: vec4<f32>,
    @location(0) v_pos: vec2<f32>,
};

@vertex
fn vs_main(@location(0) a_pos: vec2<i32>) -> VertexOut {
    var out: VertexOut;
    out.position = u_matrix * vec4<f32>(vec2<f32>(a_pos), 0.0, 1.0);
    out.v_pos = vec2<f32>(a_pos);
    return out;
}
"#;

    const FRAGMENT: &str = r#"
@group(0) @binding(1) var<uniform> u_color: vec4<f32>;
@group(0) @binding(2) var<uniform> u_offset: vec2<f32>;

@fragment
fn fs_main(@builtin(position) frag_coord: vec4<f32>, @location(0) v_pos: vec2<f32>) -> @location(0) vec4<f32> {
    let alpha = length(v_pos - frag_coord.xy + u_offset);
    return vec4<f32>(alpha, alpha, alpha, 1.0);
}
"#;

    fn build(vs: &str, fs: &str) -> Result<Program, ProgramError> {
        link(
            compile(ShaderStage::Vertex, vs)?,
            compile(ShaderStage::Fragment, fs)?,
        )
    }

    #[test]
    fn resolves_attributes_and_uniforms() {
        let program = build(VERTEX, FRAGMENT).expect("program links");

        assert_eq!(program.attribute("a_pos"), Some(AttributeLocation(0)));

        let matrix = program.uniform("u_matrix").expect("u_matrix is active");
        assert_eq!((matrix.group, matrix.binding, matrix.size), (0, 0, 64));
        assert_eq!(matrix.visibility, wgpu::ShaderStages::VERTEX);

        let offset = program.uniform("u_offset").expect("u_offset is active");
        assert_eq!((offset.binding, offset.size), (2, 8));
        assert_eq!(offset.visibility, wgpu::ShaderStages::FRAGMENT);
    }

    #[test]
    fn declared_but_unused_uniform_is_absent() {
        let program = build(VERTEX, FRAGMENT).unwrap();
        assert_eq!(program.uniform("u_color"), None);
    }

    #[test]
    fn undeclared_names_are_absent() {
        let program = build(VERTEX, FRAGMENT).unwrap();
        assert_eq!(program.uniform("u_world"), None);
        assert_eq!(program.attribute("a_normal"), None);
    }

    #[test]
    fn require_attribute_fails_on_absence() {
        let program = build(VERTEX, FRAGMENT).unwrap();
        assert!(program.require_attribute("a_pos").is_ok());
        assert!(matches!(
            program.require_attribute("a_missing"),
            Err(ProgramError::MissingAttribute { name }) if name == "a_missing"
        ));
        assert!(matches!(
            program.require_uniform("u_color"),
            Err(ProgramError::MissingUniform { .. })
        ));
    }

    #[test]
    fn active_uniforms_are_ordered_by_binding() {
        let program = build(VERTEX, FRAGMENT).unwrap();
        let names: Vec<&str> = program.active_uniforms().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, ["u_matrix", "u_offset"]);
    }

    #[test]
    fn unmatched_fragment_input_fails_to_link() {
        let fs = r#"
@fragment
fn fs_main(@location(3) v_extra: vec2<f32>) -> @location(0) vec4<f32> {
    return vec4<f32>(v_extra, 0.0, 1.0);
}
"#;
        let err = build(VERTEX, fs).unwrap_err();
        assert!(matches!(err, ProgramError::Link { .. }));
        assert!(err.to_string().contains("location 3"));
    }

    #[test]
    fn mismatched_varying_type_fails_to_link() {
        let fs = r#"
@fragment
fn fs_main(@location(0) v_pos: vec4<f32>) -> @location(0) vec4<f32> {
    return v_pos;
}
"#;
        assert!(matches!(build(VERTEX, fs), Err(ProgramError::Link { .. })));
    }

    #[test]
    fn swapped_stages_fail_to_link() {
        let vs = compile(ShaderStage::Vertex, VERTEX).unwrap();
        let fs = compile(ShaderStage::Fragment, FRAGMENT).unwrap();
        assert!(matches!(link(fs, vs), Err(ProgramError::Link { .. })));
    }

    #[test]
    fn fragment_without_color_output_fails_validation() {
        let fs = r#"
@fragment
fn fs_main(@location(0) v_pos: vec2<f32>) -> @location(1) vec4<f32> {
    return vec4<f32>(v_pos, 0.0, 1.0);
}
"#;
        assert!(matches!(build(VERTEX, fs), Err(ProgramError::Validate { .. })));
    }

    #[test]
    fn conflicting_uniform_slot_fails_validation() {
        let fs = r#"
@group(0) @binding(0) var<uniform> u_tint: vec4<f32>;

@fragment
fn fs_main(@location(0) v_pos: vec2<f32>) -> @location(0) vec4<f32> {
    return u_tint * v_pos.x;
}
"#;
        let err = build(VERTEX, fs).unwrap_err();
        assert!(matches!(err, ProgramError::Validate { .. }));
        assert!(err.to_string().contains("group 0 binding 0"));
    }
}
