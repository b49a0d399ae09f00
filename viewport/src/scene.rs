use backend::glutils::{self, VertexArray, VertexBuffer};
use backend::shaders::Shaders;
use backend::BackendError;

pub const VERTEX_SHADER: &str = "#version 330 core
layout (location = 0) in vec3 vp;
void main() {
    gl_Position = vec4(vp, 1.0);
}
";

pub const FRAGMENT_SHADER: &str = "#version 330 core
out vec4 frag_colour;
void main() {
    frag_colour = vec4(0.5, 0.0, 0.5, 1.0);
}
";

pub const POSITION_ATTRIB: u32 = 0;
pub const COMPONENTS: u32 = 3;

// x, y, z in normalized device coordinates
pub const TRIANGLE: [f32; 9] = [
    0.0, 0.5, 0.0, //
    0.5, -0.5, 0.0, //
    -0.5, -0.5, 0.0,
];

pub const fn vertex_count() -> i32 {
    (TRIANGLE.len() / COMPONENTS as usize) as i32
}

/// GPU side of the triangle. Fields drop top to bottom, the program first
/// and the buffer last.
pub struct Triangle {
    program: Shaders,
    vao: VertexArray,
    _vbo: VertexBuffer,
}

impl Triangle {
    pub fn upload() -> Result<Triangle, BackendError> {
        let vbo = VertexBuffer::new_static(&TRIANGLE)?;
        let vao = VertexArray::with_attribute(&vbo, POSITION_ATTRIB, COMPONENTS)?;
        let program = Shaders::from_str(VERTEX_SHADER, FRAGMENT_SHADER)?;
        log::debug!(
            "uploaded triangle: {} floats, {} vertices",
            TRIANGLE.len(),
            vertex_count()
        );
        Ok(Triangle {
            program,
            vao,
            _vbo: vbo,
        })
    }

    pub fn draw(&self) {
        self.program.use_program();
        self.vao.bind();
        glutils::draw_triangles(0, vertex_count());
    }
}
