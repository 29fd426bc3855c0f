use std::fmt;

use quick_from::QuickFrom;

/// Shader pipeline stage, for compile errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Vertex,
    Fragment,
}

impl fmt::Display for Stage {
    fn fmt(&self, f : &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Vertex => write!(f, "vertex"),
            Stage::Fragment => write!(f, "fragment"),
        }
    }
}

#[derive(Debug, QuickFrom)]
pub enum Error {
    #[quick_from]
    Io(std::io::Error),

    #[quick_from]
    Image(image::ImageError),

    Shader {
        stage : Stage,
        log : String,
    },

    Link(String),

    /// a failed GL call or a non-zero `glGetError`
    Gl(String),

    /// window or context creation
    Context(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f : &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "io error: {}", e),
            Error::Image(e) => write!(f, "image error: {}", e),
            Error::Shader{ stage, log } => {
                write!(f, "{} shader failed to compile: {}", stage, log)
            },
            Error::Link(log) => write!(f, "program failed to link: {}", log),
            Error::Gl(msg) => write!(f, "OpenGL error: {}", msg),
            Error::Context(msg) => write!(f, "context error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Image(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
