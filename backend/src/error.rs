use std::fmt;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("platform initialization failed: {0}")]
    Platform(String),

    #[error("window creation failed: {0}")]
    WindowCreation(String),

    #[error("OpenGL context error: {0}")]
    Context(String),

    #[error("failed to resolve OpenGL entry point '{0}'")]
    Loader(&'static str),

    #[error(transparent)]
    Shader(#[from] ShaderError),

    #[error("OpenGL error 0x{0:04X}")]
    Gl(u32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderKind {
    Vertex,
    Fragment,
    /// Link step of a whole program, not a single stage.
    Program,
}

impl fmt::Display for ShaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShaderKind::Vertex => "vertex shader",
            ShaderKind::Fragment => "fragment shader",
            ShaderKind::Program => "program",
        };
        f.write_str(name)
    }
}

/// Compile or link failure reported by the driver.
#[derive(Debug, Clone, Error)]
#[error("{kind} {stage} error: {log}\n--> {snippet}")]
pub struct ShaderError {
    pub kind: ShaderKind,
    pub stage: &'static str,
    pub snippet: String,
    pub log: String,
}

const SNIPPET_LEN: usize = 64;

impl ShaderError {
    pub fn compile(kind: ShaderKind, source: &str, log: String) -> Self {
        Self {
            kind,
            stage: "compilation",
            snippet: snippet(source),
            log,
        }
    }

    pub fn link(log: String) -> Self {
        Self {
            kind: ShaderKind::Program,
            stage: "link",
            snippet: String::new(),
            log,
        }
    }
}

/// First non-empty source line, cut to a short prefix on a char boundary.
fn snippet(source: &str) -> String {
    let line = source
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("");
    match line.char_indices().nth(SNIPPET_LEN) {
        Some((idx, _)) => format!("{}...", &line[..idx]),
        None => line.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_error_keeps_kind_and_log() {
        let err = ShaderError::compile(
            ShaderKind::Fragment,
            "\n  #version 330 core\nout vec4 c;",
            "0:2: syntax error".to_string(),
        );
        assert_eq!(err.kind, ShaderKind::Fragment);
        assert_eq!(err.snippet, "#version 330 core");
        let msg = err.to_string();
        assert!(msg.starts_with("fragment shader compilation error: 0:2: syntax error"));
        assert!(msg.contains("#version 330 core"));
    }

    #[test]
    fn long_snippet_is_truncated() {
        let source = "x".repeat(200);
        let err = ShaderError::compile(ShaderKind::Vertex, &source, String::new());
        assert_eq!(err.snippet.len(), SNIPPET_LEN + 3);
        assert!(err.snippet.ends_with("..."));
    }

    #[test]
    fn link_error_has_program_kind() {
        let err: BackendError = ShaderError::link("undefined main".to_string()).into();
        assert!(matches!(
            err,
            BackendError::Shader(ShaderError {
                kind: ShaderKind::Program,
                ..
            })
        ));
        assert!(err.to_string().contains("program link error: undefined main"));
    }

    #[test]
    fn gl_error_is_hex() {
        assert_eq!(BackendError::Gl(0x0502).to_string(), "OpenGL error 0x0502");
    }
}
