#[cfg(test)]
mod fixtures;

pub mod diff;
pub mod flow;
pub mod graph;
pub mod summary;
pub mod system;
pub mod topology;

pub use diff::{Classification, DiffState};
pub use flow::{Color, EdgeKey, EdgeKind, Scope};
pub use graph::GraphDescription;
pub use summary::BehaviorRecord;
pub use topology::Topology;

use log::{debug, info};

use std::error;
use std::fmt::{self, Display, Formatter};
use std::io;

/// Builds the network diff graph for an optional old and a mandatory new
/// behavior summary document.
///
/// A missing `old` document selects single-snapshot mode. An `old` document
/// that is present but malformed is an error, not a fallback.
pub fn network_graph(
    old: Option<&[u8]>,
    new: &[u8],
    scope: &Scope,
) -> Result<GraphDescription, Error> {
    let new_records = summary::parse(new)?;
    if new_records.is_empty() {
        return Err(Error::EmptyInput);
    }
    let old_records = old.map(summary::parse).transpose()?;

    let new_edges = flow::normalize(&new_records, scope);
    let old_edges = old_records
        .as_ref()
        .map(|records| flow::normalize(records, scope));
    debug!(
        "normalized {} new and {} old edges",
        new_edges.len(),
        old_edges.as_ref().map_or(0, |edges| edges.len())
    );

    let classification = diff::classify(old_edges.as_ref(), &new_edges);
    info!("classified edges: {}", classification.stats());

    let new_topology = Topology::extract(&new_records);
    let old_topology = old_records.as_deref().map(Topology::extract);

    Ok(graph::assemble(
        old_topology.as_ref(),
        &new_topology,
        &classification,
        scope.focus(),
    ))
}

#[derive(Debug)]
pub enum Error {
    Parse(serde_json::Error),
    EmptyInput,
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Parse(e) => Some(e),
            Error::EmptyInput => None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        use Error::*;
        match self {
            Parse(e) => write!(f, "malformed behavior summary: {}", e),
            EmptyInput => write!(f, "the new behavior summary has no records"),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Parse(e)
    }
}

impl From<Error> for io::Error {
    fn from(e: Error) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, e)
    }
}
