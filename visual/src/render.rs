
pub mod dot;
pub mod plantuml;

use log::{debug, info};

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    PlantUml,
    Dot,
}

impl Format {
    pub fn extension(self) -> &'static str {
        match self {
            Format::PlantUml => "puml",
            Format::Dot => "dot",
        }
    }
}

impl Default for Format {
    fn default() -> Self {
        Format::PlantUml
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "plantuml" | "puml" => Ok(Format::PlantUml),
            "dot" | "graphviz" => Ok(Format::Dot),
            other => Err(format!("unknown diagram format: {}", other)),
        }
    }
}

/// Turns a markup file into an image and returns where the image landed.
pub trait Rasterizer: Send + Sync {
    fn rasterize(&self, markup: &Path) -> io::Result<PathBuf>;
}

pub struct PlantUml {
    jar: PathBuf,
    java: PathBuf,
}

impl PlantUml {
    pub fn new(jar: PathBuf, java: PathBuf) -> io::Result<Self> {
        if !jar.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("PlantUML jar not found at {}", jar.display()),
            ));
        }
        Ok(Self { jar, java })
    }
}

impl Rasterizer for PlantUml {
    fn rasterize(&self, markup: &Path) -> io::Result<PathBuf> {
        info!("Rendering {}", markup.display());
        let output = Command::new(&self.java)
            .arg("-DPLANTUML_LIMIT_SIZE=100000")
            .arg("-Xmx8096m")
            .arg("-jar")
            .arg(&self.jar)
            .arg(markup)
            .output()?;
        debug!("plantuml: {}", String::from_utf8_lossy(&output.stdout).trim());

        if !output.status.success() {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!(
                    "{} exited with {}: {}",
                    self.java.display(),
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            ));
        }
        // plantuml writes the image next to its input
        Ok(markup.with_extension("png"))
    }
}
