
use crate::flow::{Color, EdgeAttrs, EdgeKey, EdgeKind, EdgeMap};

use std::collections::btree_map;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiffState {
    Unchanged,
    Added,
    Removed,
}

impl DiffState {
    /// Prefix put in front of an edge label.
    pub fn marker(self) -> &'static str {
        match self {
            DiffState::Unchanged => "",
            DiffState::Added => "++",
            DiffState::Removed => "--",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classified {
    pub state: DiffState,
    pub kind: EdgeKind,
    pub color: Color,
}

impl Classified {
    fn unchanged(attrs: &EdgeAttrs) -> Self {
        Self {
            state: DiffState::Unchanged,
            kind: attrs.kind,
            color: attrs.color,
        }
    }

    fn changed(state: DiffState, attrs: &EdgeAttrs) -> Self {
        Self {
            state,
            kind: attrs.kind,
            color: Color::CHANGED,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub unchanged: usize,
    pub added: usize,
    pub removed: usize,
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} unchanged, {} added, {} removed",
            self.unchanged, self.added, self.removed
        )
    }
}

/// Merged edge set of two snapshots, ordered by edge key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification {
    edges: BTreeMap<EdgeKey, Classified>,
}

impl Classification {
    pub fn get(&self, key: &EdgeKey) -> Option<&Classified> {
        self.edges.get(key)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, EdgeKey, Classified> {
        self.edges.iter()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Every node name that is an endpoint of a classified edge.
    pub fn endpoints(&self) -> BTreeSet<&str> {
        self.edges
            .keys()
            .flat_map(|key| vec![key.source.as_str(), key.destination.as_str()])
            .collect()
    }

    pub fn stats(&self) -> Stats {
        let mut stats = Stats::default();
        for classified in self.edges.values() {
            match classified.state {
                DiffState::Unchanged => stats.unchanged += 1,
                DiffState::Added => stats.added += 1,
                DiffState::Removed => stats.removed += 1,
            }
        }
        stats
    }
}

pub fn classify(old: Option<&EdgeMap>, new: &EdgeMap) -> Classification {
    let old = match old {
        Some(old) if !old.is_empty() => old,
        _ => {
            let edges = new
                .iter()
                .map(|(key, attrs)| (key.clone(), Classified::unchanged(attrs)))
                .collect();
            return Classification { edges };
        }
    };

    let mut edges = BTreeMap::new();
    for (key, attrs) in new {
        let classified = if old.contains_key(key) {
            Classified::unchanged(attrs)
        } else {
            Classified::changed(DiffState::Added, attrs)
        };
        edges.insert(key.clone(), classified);
    }
    for (key, attrs) in old {
        if !new.contains_key(key) {
            edges.insert(key.clone(), Classified::changed(DiffState::Removed, attrs));
        }
    }
    Classification { edges }
}
