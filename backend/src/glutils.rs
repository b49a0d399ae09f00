use super::error::BackendError;
use gl::{types::*, *};
use std::ffi::CStr;

pub fn check_gl_err() -> Result<(), BackendError> {
    let err = unsafe { gl::GetError() };
    if err == gl::NO_ERROR {
        return Ok(());
    }
    Err(BackendError::Gl(err))
}

/// Entry points the frame loop cannot run without.
pub fn check_loaded() -> Result<(), BackendError> {
    let required: [(&'static str, bool); 8] = [
        ("glClear", gl::Clear::is_loaded()),
        ("glGenBuffers", gl::GenBuffers::is_loaded()),
        ("glBufferData", gl::BufferData::is_loaded()),
        ("glGenVertexArrays", gl::GenVertexArrays::is_loaded()),
        ("glVertexAttribPointer", gl::VertexAttribPointer::is_loaded()),
        ("glCreateShader", gl::CreateShader::is_loaded()),
        ("glLinkProgram", gl::LinkProgram::is_loaded()),
        ("glDrawArrays", gl::DrawArrays::is_loaded()),
    ];
    match required.into_iter().find(|(_, loaded)| !loaded) {
        Some((name, _)) => Err(BackendError::Loader(name)),
        None => Ok(()),
    }
}

fn gl_string(name: GLenum) -> String {
    let ptr = unsafe { gl::GetString(name) };
    if ptr.is_null() {
        return "<unknown>".to_string();
    }
    unsafe { CStr::from_ptr(ptr.cast()) }
        .to_string_lossy()
        .into_owned()
}

pub fn log_opengl_info() {
    log::info!("GL_VENDOR = {}", gl_string(VENDOR));
    log::info!("GL_RENDERER = {}", gl_string(RENDERER));
    log::info!("GL_VERSION = {}", gl_string(VERSION));
    log::info!(
        "GL_SHADING_LANGUAGE_VERSION = {}",
        gl_string(SHADING_LANGUAGE_VERSION)
    );
}

pub fn gl_buffer_data_arr_stat<T: Sized>(buffer: &[T]) {
    unsafe {
        gl::BufferData(
            ARRAY_BUFFER,
            std::mem::size_of_val(buffer) as isize,
            buffer.as_ptr().cast(),
            STATIC_DRAW,
        )
    };
}

/// Float attribute at `index`; `stride` and `pointer` are counted in floats,
/// a stride of 0 means tightly packed.
pub fn gl_vertex_attrib_ptr_enab(index: u32, size: u32, stride: u32, pointer: usize) {
    unsafe {
        gl::VertexAttribPointer(
            index,
            size as i32,
            FLOAT,
            FALSE,
            (stride as usize * std::mem::size_of::<f32>()) as i32,
            (pointer * std::mem::size_of::<f32>()) as *const _,
        )
    };
    unsafe { gl::EnableVertexAttribArray(index) };
}

pub fn set_viewport(w: u32, h: u32) {
    unsafe { gl::Viewport(0, 0, w as i32, h as i32) };
}

pub fn clear_screen() {
    unsafe { gl::Clear(COLOR_BUFFER_BIT | DEPTH_BUFFER_BIT) };
}

pub fn draw_triangles(first: i32, count: i32) {
    unsafe { gl::DrawArrays(TRIANGLES, first, count) };
}

/// Static-draw `ARRAY_BUFFER`, deleted on drop.
pub struct VertexBuffer {
    id: u32,
}

impl VertexBuffer {
    pub fn new_static<T: Sized>(data: &[T]) -> Result<VertexBuffer, BackendError> {
        let mut id = 0;
        unsafe { gl::GenBuffers(1, &mut id) };
        let vbo = VertexBuffer { id };
        log::debug!("vertex buffer {}: {} bytes", id, std::mem::size_of_val(data));
        vbo.bind();
        gl_buffer_data_arr_stat(data);
        check_gl_err()?;
        Ok(vbo)
    }

    pub fn bind(&self) {
        unsafe { gl::BindBuffer(ARRAY_BUFFER, self.id) };
    }
}

impl Drop for VertexBuffer {
    fn drop(&mut self) {
        log::debug!("deleting vertex buffer {}", self.id);
        unsafe { gl::DeleteBuffers(1, &self.id) };
    }
}

/// Vertex array object, deleted on drop.
pub struct VertexArray {
    id: u32,
}

impl VertexArray {
    /// Binds attribute `index` to `components` tightly packed floats of `vbo`.
    pub fn with_attribute(
        vbo: &VertexBuffer,
        index: u32,
        components: u32,
    ) -> Result<VertexArray, BackendError> {
        let mut id = 0;
        unsafe { gl::GenVertexArrays(1, &mut id) };
        let vao = VertexArray { id };
        vao.bind();
        vbo.bind();
        gl_vertex_attrib_ptr_enab(index, components, 0, 0);
        check_gl_err()?;
        Ok(vao)
    }

    pub fn bind(&self) {
        unsafe { gl::BindVertexArray(self.id) };
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        log::debug!("deleting vertex array {}", self.id);
        unsafe { gl::DeleteVertexArrays(1, &self.id) };
    }
}
