
use async_std::fs::{self, File};
use async_std::path::Path as AsyncPath;
use async_std::prelude::*;
use async_std::task;

use log::{info, warn};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use behavior::system::SystemView;
use behavior::Scope;

use crate::render::{dot, plantuml, Format, Rasterizer};
use crate::Error;

pub struct NetworkRequest {
    pub old: Option<PathBuf>,
    pub new: PathBuf,
    pub scope: Scope,
    pub format: Format,
    pub output: PathBuf,
}

pub struct SystemRequest {
    pub summary: PathBuf,
    pub focus: Option<String>,
    pub output: PathBuf,
}

/// Diffs two summaries and writes the diagram to `request.output`, either as
/// markup or, with a rasterizer, as an image. Returns the written path.
pub async fn network(
    request: &NetworkRequest,
    rasterizer: Option<Arc<dyn Rasterizer>>,
) -> Result<PathBuf, Error> {
    if rasterizer.is_some() && request.format != Format::PlantUml {
        return Err(Error::Usage("only PlantUML markup can be rendered to an image"));
    }

    let old = async {
        match &request.old {
            Some(path) => read(path).await.map(Some),
            None => Ok(None),
        }
    };
    let (old, new) = futures::try_join!(old, read(&request.new))?;
    if old.is_none() {
        info!("No old summary given, showing the current behavior only");
    }

    let graph = behavior::network_graph(old.as_deref(), &new, &request.scope)?;
    let markup = match request.format {
        Format::PlantUml => plantuml::network(&graph),
        Format::Dot => dot::network(&graph),
    };
    emit(&markup, request.format, &request.output, rasterizer).await
}

pub async fn system(
    request: &SystemRequest,
    rasterizer: Option<Arc<dyn Rasterizer>>,
) -> Result<PathBuf, Error> {
    let summary = read(&request.summary).await?;
    let records = behavior::summary::parse(&summary)?;
    let view = SystemView::from_records(&records, request.focus.as_deref())
        .ok_or(behavior::Error::EmptyInput)?;

    let markup = plantuml::system(&view).map_err(Error::Encode)?;
    emit(&markup, Format::PlantUml, &request.output, rasterizer).await
}

async fn emit(
    markup: &str,
    format: Format,
    output: &Path,
    rasterizer: Option<Arc<dyn Rasterizer>>,
) -> Result<PathBuf, Error> {
    let rasterizer = match rasterizer {
        Some(rasterizer) => rasterizer,
        None => {
            write(output, markup).await?;
            info!("Diagram written to {}", output.display());
            return Ok(output.to_path_buf());
        }
    };

    let source = output.with_extension(format.extension());
    if source == output {
        return Err(Error::Usage("the image cannot take the markup extension"));
    }
    write(&source, markup).await?;
    let image = {
        let source = source.clone();
        task::spawn_blocking(move || rasterizer.rasterize(&source)).await
    };
    if let Err(e) = fs::remove_file(AsyncPath::new(&source)).await {
        warn!("Failed to remove {}: {}", source.display(), e);
    }
    let image = image.map_err(|e| Error::Raster(e.to_string()))?;

    if image != output {
        fs::rename(AsyncPath::new(&image), AsyncPath::new(output))
            .await
            .map_err(|e| Error::Io(output.to_path_buf(), e))?;
    }
    info!("Image written to {}", output.display());
    Ok(output.to_path_buf())
}

async fn read(path: &Path) -> Result<Vec<u8>, Error> {
    fs::read(AsyncPath::new(path))
        .await
        .map_err(|e| Error::Io(path.to_path_buf(), e))
}

async fn write(path: &Path, contents: &str) -> Result<(), Error> {
    let io_err = |e| Error::Io(path.to_path_buf(), e);

    let mut file = File::create(AsyncPath::new(path)).await.map_err(io_err)?;
    file.write_all(contents.as_bytes()).await.map_err(io_err)?;
    file.flush().await.map_err(io_err)
}
