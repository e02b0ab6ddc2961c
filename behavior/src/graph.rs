#[cfg(test)]
mod tests;

use crate::diff::{Classification, DiffState};
use crate::flow::{Color, EdgeKey, EdgeKind};
use crate::topology::Topology;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub name: String,
    pub highlight: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeGroup {
    pub namespace: String,
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub source: String,
    pub destination: String,
    pub label: String,
    pub color: Color,
    pub line: LineStyle,
    pub state: DiffState,
    pub kind: EdgeKind,
}

/// Renderer-agnostic diagram: workload nodes grouped by namespace and the
/// classified edges between any endpoints. Endpoints outside the groups
/// (external addresses, binaries, files) only appear through edges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphDescription {
    pub groups: Vec<NodeGroup>,
    pub edges: Vec<Edge>,
}

impl GraphDescription {
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.groups.iter().flat_map(|group| group.nodes.iter())
    }
}

pub fn label(key: &EdgeKey, kind: EdgeKind, state: DiffState) -> String {
    match kind {
        EdgeKind::Network => format!("{}{}/{}", state.marker(), key.protocol, key.port),
        EdgeKind::Process | EdgeKind::File => state.marker().to_string(),
    }
}

pub fn assemble(
    old: Option<&Topology>,
    new: &Topology,
    classification: &Classification,
    focus: Option<&str>,
) -> GraphDescription {
    let mut topology = new.clone();
    if let Some(old) = old {
        topology.merge(old);
    }
    topology.prune(&classification.endpoints());

    let focus = focus.filter(|focus| !focus.is_empty());
    let groups = topology
        .iter()
        .map(|(namespace, nodes)| NodeGroup {
            namespace: namespace.clone(),
            nodes: nodes
                .iter()
                .map(|name| Node {
                    name: name.clone(),
                    highlight: focus.map_or(false, |focus| name.contains(focus)),
                })
                .collect(),
        })
        .collect();

    let edges = classification
        .iter()
        .map(|(key, classified)| Edge {
            source: key.source.clone(),
            destination: key.destination.clone(),
            label: label(key, classified.kind, classified.state),
            color: classified.color,
            line: match classified.state {
                DiffState::Removed => LineStyle::Dashed,
                _ => LineStyle::Solid,
            },
            state: classified.state,
            kind: classified.kind,
        })
        .collect();

    GraphDescription { groups, edges }
}
