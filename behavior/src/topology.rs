use crate::flow::pod_node;
use crate::summary::BehaviorRecord;

use std::collections::btree_map;
use std::collections::{BTreeMap, BTreeSet};

/// Namespace -> workload nodes observed in it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Topology {
    namespaces: BTreeMap<String, BTreeSet<String>>,
}

impl Topology {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extract(records: &[BehaviorRecord]) -> Self {
        let mut topology = Self::new();
        for record in records {
            if record.instance_name.is_empty() {
                continue;
            }
            topology.insert(&record.namespace, pod_node(&record.instance_name));
        }
        topology
    }

    /// Returns false if the node was already known in `namespace`.
    pub fn insert(&mut self, namespace: &str, node: String) -> bool {
        self.namespaces
            .entry(namespace.to_string())
            .or_default()
            .insert(node)
    }

    pub fn merge(&mut self, other: &Topology) {
        for (namespace, nodes) in &other.namespaces {
            self.namespaces
                .entry(namespace.clone())
                .or_default()
                .extend(nodes.iter().cloned());
        }
    }

    /// Drops every node not in `keep`, then every namespace left empty.
    pub fn prune(&mut self, keep: &BTreeSet<&str>) {
        for nodes in self.namespaces.values_mut() {
            nodes.retain(|node| keep.contains(node.as_str()));
        }
        self.namespaces.retain(|_, nodes| !nodes.is_empty());
    }

    pub fn nodes(&self, namespace: &str) -> Option<&BTreeSet<String>> {
        self.namespaces.get(namespace)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, BTreeSet<String>> {
        self.namespaces.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::fixtures::record;

    use pretty_assertions::assert_eq;

    fn set(nodes: &[&str]) -> BTreeSet<String> {
        nodes.iter().map(|node| node.to_string()).collect()
    }

    #[test]
    fn extract_groups_by_namespace() {
        let records = vec![
            record("shop", "checkout-0"),
            record("kube-system", "coredns-1"),
            record("shop", "cart-0"),
            record("shop", "checkout-0"),
            record("shop", ""),
        ];

        let topology = Topology::extract(&records);

        assert_eq!(
            topology.nodes("shop"),
            Some(&set(&["pod/cart-0", "pod/checkout-0"]))
        );
        assert_eq!(
            topology.nodes("kube-system"),
            Some(&set(&["pod/coredns-1"]))
        );
        let namespaces: Vec<&String> = topology.iter().map(|(ns, _)| ns).collect();
        assert_eq!(namespaces, vec!["kube-system", "shop"]);
    }

    #[test]
    fn insert_is_idempotent() {
        let mut topology = Topology::new();
        assert!(topology.insert("shop", "pod/a".to_string()));
        assert!(!topology.insert("shop", "pod/a".to_string()));
        assert_eq!(topology.nodes("shop"), Some(&set(&["pod/a"])));
    }

    #[test]
    fn merge_then_prune() {
        let mut old = Topology::extract(&[record("shop", "a"), record("db", "pg-0")]);
        let new = Topology::extract(&[record("shop", "b"), record("shop", "a")]);
        old.merge(&new);
        assert_eq!(old.nodes("shop"), Some(&set(&["pod/a", "pod/b"])));

        let keep = vec!["pod/b", "10.0.0.1"].into_iter().collect();
        old.prune(&keep);

        assert_eq!(old.nodes("shop"), Some(&set(&["pod/b"])));
        assert_eq!(old.nodes("db"), None);
    }

    #[test]
    fn prune_everything() {
        let mut topology = Topology::extract(&[record("shop", "a")]);
        topology.prune(&BTreeSet::new());
        assert!(topology.is_empty());
    }
}
