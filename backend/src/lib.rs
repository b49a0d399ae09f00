pub mod error;
pub mod glutils;
pub mod logging;
pub mod shaders;
pub mod system;

pub use error::{BackendError, ShaderError, ShaderKind};
