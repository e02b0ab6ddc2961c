use super::*;

use crate::diff::classify;
use crate::fixtures::*;
use crate::flow::{normalize, Scope};

use pretty_assertions::assert_eq;

fn node(name: &str, highlight: bool) -> Node {
    Node {
        name: name.to_string(),
        highlight,
    }
}

#[test]
fn label_markers() {
    let key = EdgeKey::new("pod/a", "10.0.0.9", "TCP", "9090");
    assert_eq!(label(&key, EdgeKind::Network, DiffState::Unchanged), "TCP/9090");
    assert_eq!(label(&key, EdgeKind::Network, DiffState::Added), "++TCP/9090");
    assert_eq!(label(&key, EdgeKind::Network, DiffState::Removed), "--TCP/9090");

    let bare = EdgeKey::new("pod/a", "10.0.0.5", "", "");
    assert_eq!(label(&bare, EdgeKind::Network, DiffState::Unchanged), "/");
    assert_eq!(label(&bare, EdgeKind::Network, DiffState::Removed), "--/");

    let process = EdgeKey::new("/bin/sh", "/usr/bin/curl", "", "");
    assert_eq!(label(&process, EdgeKind::Process, DiffState::Unchanged), "");
    assert_eq!(label(&process, EdgeKind::Process, DiffState::Removed), "--");
    assert_eq!(label(&process, EdgeKind::File, DiffState::Added), "++");
}

#[test]
fn assemble_prunes_and_styles() {
    let old_records = vec![
        ingress(record("shop", "a"), vec![flow("10.0.0.1", "UDP", "53")]),
        record("shop", "idle"),
        egress(record("db", "pg-0"), vec![flow(crate::flow::LOOPBACK, "TCP", "5432")]),
    ];
    let new_records = vec![egress(
        record("shop", "b"),
        vec![flow("10.0.0.9", "TCP", "9090")],
    )];
    let scope = Scope::new();
    let old_edges = normalize(&old_records, &scope);
    let new_edges = normalize(&new_records, &scope);
    let classification = classify(Some(&old_edges), &new_edges);

    let graph = assemble(
        Some(&Topology::extract(&old_records)),
        &Topology::extract(&new_records),
        &classification,
        None,
    );

    assert_eq!(
        graph.groups,
        vec![NodeGroup {
            namespace: "shop".to_string(),
            nodes: vec![node("pod/a", false), node("pod/b", false)],
        }]
    );
    assert_eq!(
        graph.edges,
        vec![
            Edge {
                source: "10.0.0.1".to_string(),
                destination: "pod/a".to_string(),
                label: "--UDP/53".to_string(),
                color: Color::Red,
                line: LineStyle::Dashed,
                state: DiffState::Removed,
                kind: EdgeKind::Network,
            },
            Edge {
                source: "pod/b".to_string(),
                destination: "10.0.0.9".to_string(),
                label: "++TCP/9090".to_string(),
                color: Color::Red,
                line: LineStyle::Solid,
                state: DiffState::Added,
                kind: EdgeKind::Network,
            },
        ]
    );
}

#[test]
fn assemble_highlights_focus() {
    let records = vec![
        egress(
            record("shop", "checkout-0"),
            vec![flow("10.0.0.5", "TCP", "8080")],
        ),
        ingress(
            record("shop", "cart-0"),
            vec![flow("10.0.0.5", "TCP", "8080")],
        ),
    ];
    let edges = normalize(&records, &Scope::new());
    let classification = classify(None, &edges);

    let graph = assemble(
        None,
        &Topology::extract(&records),
        &classification,
        Some("checkout"),
    );

    let nodes: Vec<&Node> = graph.nodes().collect();
    assert_eq!(
        nodes,
        vec![&node("pod/cart-0", false), &node("pod/checkout-0", true)]
    );

    let unfocused = assemble(None, &Topology::extract(&records), &classification, Some(""));
    assert!(unfocused.nodes().all(|node| !node.highlight));
}

#[test]
fn assemble_only_keeps_endpoints() {
    let old_records = vec![
        egress(record("shop", "a"), vec![flow("10.0.0.5", "TCP", "80")]),
        record("ops", "cron-0"),
    ];
    let new_records = vec![
        egress(record("shop", "a"), vec![flow("10.0.0.5", "TCP", "80")]),
        ingress(record("web", "nginx-0"), vec![flow("10.0.0.2", "TCP", "443")]),
        record("ops", "backup-0"),
    ];
    let scope = Scope::new();
    let classification = classify(
        Some(&normalize(&old_records, &scope)),
        &normalize(&new_records, &scope),
    );

    let graph = assemble(
        Some(&Topology::extract(&old_records)),
        &Topology::extract(&new_records),
        &classification,
        None,
    );

    let endpoints = classification.endpoints();
    assert!(graph
        .nodes()
        .all(|node| endpoints.contains(node.name.as_str())));
    let namespaces: Vec<&str> = graph
        .groups
        .iter()
        .map(|group| group.namespace.as_str())
        .collect();
    assert_eq!(namespaces, vec!["shop", "web"]);
}

#[test]
fn assemble_is_reproducible() {
    let records = vec![
        egress(
            record("shop", "a"),
            vec![flow("10.0.0.6", "UDP", "53"), flow("10.0.0.5", "TCP", "80")],
        ),
        egress(record("db", "b"), vec![flow("10.0.0.6", "UDP", "53")]),
    ];
    let build = |records: &[crate::summary::BehaviorRecord]| {
        let classification = classify(None, &normalize(records, &Scope::new()));
        assemble(None, &Topology::extract(records), &classification, None)
    };

    let mut reversed = records.clone();
    reversed.reverse();
    assert_eq!(build(&records), build(&reversed));
}

#[test]
fn assemble_labels_removed_network_flow_without_port() {
    let old_records = vec![egress(record("shop", "a"), vec![flow("10.0.0.5", "", "")])];
    let new_records = vec![record("shop", "a")];
    let scope = Scope::new();
    let classification = classify(
        Some(&normalize(&old_records, &scope)),
        &normalize(&new_records, &scope),
    );

    let graph = assemble(
        Some(&Topology::extract(&old_records)),
        &Topology::extract(&new_records),
        &classification,
        None,
    );

    assert_eq!(graph.edges.len(), 1);
    assert_eq!(graph.edges[0].kind, EdgeKind::Network);
    assert_eq!(graph.edges[0].label, "--/");
}
