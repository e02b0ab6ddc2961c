use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use structopt::StructOpt;

use async_std::task;

use log::{error, info};

use behavior::Scope;
use visual::render::{Format, PlantUml, Rasterizer};
use visual::report::{self, NetworkRequest, SystemRequest};
use visual::Error;

/// Visualises system or network behavior captured in behavior summaries.
#[derive(StructOpt)]
#[structopt(name = "visual")]
enum Opt {
    /// Shows how network connections changed between two summaries
    Network {
        /// Summary taken before the change; omit to show the new one as is
        #[structopt(long)]
        old: Option<PathBuf>,

        /// Summary taken after the change
        #[structopt(long)]
        new: PathBuf,

        /// Only keep connections touching this app
        #[structopt(long)]
        app: Option<String>,

        /// Diagram markup: plantuml or dot
        #[structopt(long, default_value = "plantuml")]
        format: Format,

        /// Also draw process ancestry edges
        #[structopt(long)]
        with_process: bool,

        /// Also draw file access edges
        #[structopt(long)]
        with_file: bool,

        #[structopt(short, long)]
        output: Option<PathBuf>,

        #[structopt(flatten)]
        raster: RasterOpt,
    },
    /// Shows the processes, files and connections of one summary
    System {
        #[structopt(short, long)]
        file: PathBuf,

        #[structopt(long)]
        app: Option<String>,

        #[structopt(short, long)]
        output: Option<PathBuf>,

        #[structopt(flatten)]
        raster: RasterOpt,
    },
}

#[derive(StructOpt)]
struct RasterOpt {
    /// Render a PNG with this plantuml.jar instead of writing markup
    #[structopt(long)]
    plantuml_jar: Option<PathBuf>,

    #[structopt(long, default_value = "java")]
    java: PathBuf,
}

impl RasterOpt {
    fn rasterizer(self) -> Result<Option<PlantUml>, Error> {
        match self.plantuml_jar {
            Some(jar) => PlantUml::new(jar.clone(), self.java)
                .map(Some)
                .map_err(|e| Error::Io(jar, e)),
            None => Ok(None),
        }
    }
}

fn main() {
    env_logger::init();

    let code = match run() {
        Ok(()) => exitcode::OK,
        Err(e) => {
            error!("{}", e);
            e.exit_code()
        }
    };
    process::exit(code);
}

fn run() -> Result<(), Error> {
    let written = match Opt::from_args() {
        Opt::Network {
            old,
            new,
            app,
            format,
            with_process,
            with_file,
            output,
            raster,
        } => {
            let rasterizer = raster.rasterizer()?;
            let output = output.unwrap_or_else(|| {
                let name = match (&rasterizer, format) {
                    (Some(_), _) => "net.png",
                    (None, Format::PlantUml) => "net.puml",
                    (None, Format::Dot) => "net.dot",
                };
                PathBuf::from(name)
            });

            let mut scope = Scope::new()
                .with_process(with_process)
                .with_file(with_file);
            if let Some(app) = app {
                scope = scope.with_focus(app);
            }

            let request = NetworkRequest {
                old,
                new,
                scope,
                format,
                output,
            };
            task::block_on(report::network(&request, shared(rasterizer)))?
        }
        Opt::System {
            file,
            app,
            output,
            raster,
        } => {
            let rasterizer = raster.rasterizer()?;
            let output = output.unwrap_or_else(|| {
                PathBuf::from(if rasterizer.is_some() {
                    "sys.png"
                } else {
                    "sys.puml"
                })
            });

            let request = SystemRequest {
                summary: file,
                focus: app,
                output,
            };
            task::block_on(report::system(&request, shared(rasterizer)))?
        }
    };

    info!("Done");
    println!("{}", written.display());
    Ok(())
}

fn shared(rasterizer: Option<PlantUml>) -> Option<Arc<dyn Rasterizer>> {
    rasterizer.map(|r| Arc::new(r) as Arc<dyn Rasterizer>)
}
