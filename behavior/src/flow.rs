
use crate::summary::{AccessEvent, BehaviorRecord, Flow};

use log::trace;

use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

pub const LOOPBACK: &str = "127.0.0.1";
pub const POD_PREFIX: &str = "pod/";

pub fn pod_node(instance_name: &str) -> String {
    format!("{}{}", POD_PREFIX, instance_name)
}

/// Identity of a normalized edge. Protocol and port are empty for process
/// and file edges.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeKey {
    pub source: String,
    pub destination: String,
    pub protocol: String,
    pub port: String,
}

impl EdgeKey {
    pub fn new<S, D, P, N>(source: S, destination: D, protocol: P, port: N) -> Self
    where
        S: Into<String>,
        D: Into<String>,
        P: Into<String>,
        N: Into<String>,
    {
        Self {
            source: source.into(),
            destination: destination.into(),
            protocol: protocol.into(),
            port: port.into(),
        }
    }

    pub fn touches(&self, needle: &str) -> bool {
        self.source.contains(needle) || self.destination.contains(needle)
    }
}

impl Display for EdgeKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} ({}/{})",
            self.source, self.destination, self.protocol, self.port
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    Network,
    Process,
    File,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Color {
    Orange,
    Blue,
    Green,
    Grey,
    Red,
}

impl Color {
    /// Color used for every added or removed edge.
    pub const CHANGED: Color = Color::Red;

    pub fn of_protocol(protocol: &str) -> Self {
        match protocol {
            "TCPv6" => Color::Orange,
            "TCP" => Color::Blue,
            "UDP" => Color::Green,
            _ => Color::Grey,
        }
    }

    pub fn as_str(self) -> &'static str {
        use Color::*;
        match self {
            Orange => "orange",
            Blue => "blue",
            Green => "green",
            Grey => "grey",
            Red => "red",
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeAttrs {
    pub kind: EdgeKind,
    pub color: Color,
}

pub type EdgeMap = BTreeMap<EdgeKey, EdgeAttrs>;

/// Which side of a flow the observed pod sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ingress,
    Egress,
}

impl Direction {
    /// Returns `(source, destination)`.
    pub fn orient(self, pod: String, remote: String) -> (String, String) {
        match self {
            Direction::Ingress => (remote, pod),
            Direction::Egress => (pod, remote),
        }
    }
}

/// What [`normalize`] turns into edges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    focus: Option<String>,
    process: bool,
    file: bool,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts edges to those with an endpoint containing `focus`. An empty
    /// string clears the filter.
    pub fn with_focus<S: Into<String>>(mut self, focus: S) -> Self {
        let focus = focus.into();
        self.focus = if focus.is_empty() { None } else { Some(focus) };
        self
    }

    pub fn with_process(mut self, process: bool) -> Self {
        self.process = process;
        self
    }

    pub fn with_file(mut self, file: bool) -> Self {
        self.file = file;
        self
    }

    pub fn focus(&self) -> Option<&str> {
        self.focus.as_deref()
    }

    fn admits(&self, key: &EdgeKey) -> bool {
        match &self.focus {
            Some(focus) => key.touches(focus),
            None => true,
        }
    }

    // process and file edges are focused by the record that owns them
    fn owns(&self, record: &BehaviorRecord) -> bool {
        match &self.focus {
            Some(focus) => record.instance_name.contains(focus.as_str()),
            None => true,
        }
    }
}

pub fn normalize(records: &[BehaviorRecord], scope: &Scope) -> EdgeMap {
    let mut edges = EdgeMap::new();
    for record in records {
        if record.instance_name.is_empty() {
            continue;
        }

        let flows = record
            .ingress_flows
            .iter()
            .map(|flow| (Direction::Ingress, flow))
            .chain(
                record
                    .egress_flows
                    .iter()
                    .map(|flow| (Direction::Egress, flow)),
            );
        for (direction, flow) in flows {
            if let Some(key) = flow_key(&record.instance_name, direction, flow) {
                if scope.admits(&key) {
                    insert(&mut edges, key, EdgeKind::Network);
                }
            }
        }

        if !scope.owns(record) {
            continue;
        }
        if scope.process {
            for event in &record.process_events {
                if let Some(key) = access_key(event) {
                    insert(&mut edges, key, EdgeKind::Process);
                }
            }
        }
        if scope.file {
            for event in &record.file_events {
                if let Some(key) = access_key(event) {
                    insert(&mut edges, key, EdgeKind::File);
                }
            }
        }
    }
    edges
}

fn flow_key(instance_name: &str, direction: Direction, flow: &Flow) -> Option<EdgeKey> {
    if flow.remote_ip.is_empty() || flow.remote_ip == LOOPBACK {
        return None;
    }
    let (source, destination) = direction.orient(pod_node(instance_name), flow.remote_ip.clone());
    Some(EdgeKey::new(
        source,
        destination,
        flow.protocol.as_str(),
        flow.remote_port.as_str(),
    ))
}

fn access_key(event: &AccessEvent) -> Option<EdgeKey> {
    if event.source.is_empty() || event.destination.is_empty() {
        return None;
    }
    Some(EdgeKey::new(
        event.source.as_str(),
        event.destination.as_str(),
        "",
        "",
    ))
}

fn insert(edges: &mut EdgeMap, key: EdgeKey, kind: EdgeKind) {
    let color = Color::of_protocol(&key.protocol);
    if let Some(previous) = edges.insert(key, EdgeAttrs { kind, color }) {
        trace!("duplicate edge overwrote {:?}", previous);
    }
}
