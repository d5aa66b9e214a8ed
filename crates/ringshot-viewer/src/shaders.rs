//! Shader sources for the spoke program.

use ringshot_engine::program::{compile, link, Program, ProgramError, ShaderStage};

pub const SPOKES_VERT: &str = include_str!("shaders/spokes.vert.wgsl");
pub const SPOKES_FRAG: &str = include_str!("shaders/spokes.frag.wgsl");

/// Compiles and links the spoke program from the bundled sources.
pub fn spoke_program() -> Result<Program, ProgramError> {
    build_program(SPOKES_VERT, SPOKES_FRAG)
}

pub fn build_program(vertex: &str, fragment: &str) -> Result<Program, ProgramError> {
    let vs = compile(ShaderStage::Vertex, vertex)?;
    let fs = compile(ShaderStage::Fragment, fragment)?;
    link(vs, fs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_program_links() {
        let program = spoke_program().unwrap();

        assert!(program.attribute("a_pos").is_some());
        assert!(program.uniform("u_matrix").is_some());
        assert!(program.uniform("u_offset").is_some());
    }

    #[test]
    fn unused_and_undeclared_uniforms_are_absent() {
        let program = spoke_program().unwrap();

        assert!(program.uniform("u_color").is_none());
        assert!(program.uniform("u_world").is_none());
    }

    #[test]
    fn fragment_syntax_error_reports_diagnostic() {
        let broken = SPOKES_FRAG.replace("let alpha", "let alpha alpha");
        let err = build_program(SPOKES_VERT, &broken).unwrap_err();

        match err {
            ProgramError::Compile { stage, log } => {
                assert_eq!(stage, ShaderStage::Fragment);
                assert!(!log.is_empty());
            }
            other => panic!("expected compile error, got {other:?}"),
        }
    }
}
