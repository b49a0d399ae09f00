use super::error::{BackendError, ShaderError, ShaderKind};
use gl::{types::*, *};

/// Linked vertex + fragment program, deleted on drop.
pub struct Shaders {
    program_id: u32,
}

impl Shaders {
    pub fn from_str(vertex_code: &str, fragment_code: &str) -> Result<Shaders, BackendError> {
        let vertex_shader = Self::compile(ShaderKind::Vertex, VERTEX_SHADER, vertex_code)?;
        let fragment_shader =
            match Self::compile(ShaderKind::Fragment, FRAGMENT_SHADER, fragment_code) {
                Ok(id) => id,
                Err(e) => {
                    unsafe { gl::DeleteShader(vertex_shader) };
                    return Err(e);
                }
            };

        // create program and link shaders
        let shader_program = unsafe { gl::CreateProgram() };
        unsafe { gl::AttachShader(shader_program, vertex_shader) };
        unsafe { gl::AttachShader(shader_program, fragment_shader) };
        unsafe { gl::LinkProgram(shader_program) };

        // not needed anymore
        unsafe { gl::DeleteShader(vertex_shader) };
        unsafe { gl::DeleteShader(fragment_shader) };

        let mut success = 0;
        unsafe {
            gl::GetProgramiv(shader_program, LINK_STATUS, &mut success);
        }
        if success == 0 {
            let log = Self::info_log(shader_program, gl::GetProgramiv, gl::GetProgramInfoLog);
            unsafe { gl::DeleteProgram(shader_program) };
            return Err(ShaderError::link(log).into());
        }

        log::debug!("linked shader program {}", shader_program);
        Ok(Shaders {
            program_id: shader_program,
        })
    }

    fn compile(kind: ShaderKind, target: GLenum, shader_code: &str) -> Result<u32, BackendError> {
        let shader_id = unsafe { gl::CreateShader(target) };
        if shader_id == 0 {
            return Err(ShaderError::compile(
                kind,
                shader_code,
                "glCreateShader returned 0".to_string(),
            )
            .into());
        }

        unsafe {
            gl::ShaderSource(
                shader_id,
                1,
                &(shader_code.as_bytes().as_ptr().cast()),
                &(shader_code.len() as GLint),
            );
        }

        unsafe { gl::CompileShader(shader_id) };

        // check if there are compilation errors
        let mut success = 0;
        unsafe {
            gl::GetShaderiv(shader_id, COMPILE_STATUS, &mut success);
        }

        if success == 0 {
            let log = Self::info_log(shader_id, gl::GetShaderiv, gl::GetShaderInfoLog);
            unsafe { gl::DeleteShader(shader_id) };
            return Err(ShaderError::compile(kind, shader_code, log).into());
        }
        Ok(shader_id)
    }

    fn info_log(
        id: u32,
        get_iv: unsafe fn(GLuint, GLenum, *mut GLint),
        get_log: unsafe fn(GLuint, GLsizei, *mut GLsizei, *mut GLchar),
    ) -> String {
        let mut capacity = 0;
        unsafe { get_iv(id, INFO_LOG_LENGTH, &mut capacity) };
        if capacity <= 0 {
            return String::new();
        }
        let mut v = vec![0_u8; capacity as usize];
        let mut log_len = 0;
        unsafe { get_log(id, capacity, &mut log_len, v.as_mut_ptr().cast()) };
        v.truncate(log_len.max(0) as usize);
        String::from_utf8_lossy(&v).trim_end().to_string()
    }

    pub fn use_program(&self) {
        unsafe { gl::UseProgram(self.program_id) };
    }
}

impl Drop for Shaders {
    fn drop(&mut self) {
        log::debug!("deleting shader program {}", self.program_id);
        unsafe { gl::DeleteProgram(self.program_id) };
    }
}
