pub mod render;
pub mod report;

use std::error;
use std::fmt::{self, Display, Formatter};
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum Error {
    Io(PathBuf, io::Error),
    Behavior(behavior::Error),
    Encode(serde_json::Error),
    Raster(String),
    Usage(&'static str),
}

impl Error {
    pub fn exit_code(&self) -> exitcode::ExitCode {
        use Error::*;
        match self {
            Io(..) => exitcode::IOERR,
            Behavior(_) => exitcode::DATAERR,
            Encode(_) | Raster(_) => exitcode::SOFTWARE,
            Usage(_) => exitcode::USAGE,
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Io(_, e) => Some(e),
            Error::Behavior(e) => Some(e),
            Error::Encode(e) => Some(e),
            _ => None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        use Error::*;
        match self {
            Io(path, e) => write!(f, "{}: {}", path.display(), e),
            Behavior(e) => write!(f, "{}", e),
            Encode(e) => write!(f, "failed to encode the diagram: {}", e),
            Raster(msg) => write!(f, "failed to render the image: {}", msg),
            Usage(msg) => write!(f, "{}", msg),
        }
    }
}

impl From<behavior::Error> for Error {
    fn from(e: behavior::Error) -> Self {
        Error::Behavior(e)
    }
}
