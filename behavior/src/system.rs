use crate::summary::BehaviorRecord;

use serde::Serialize;

use std::collections::{BTreeMap, BTreeSet};

/// Inventory of what the workloads of one snapshot did: process ancestry,
/// accessed files and the commands seen per network protocol.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SystemView {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Namespace")]
    pub namespace: String,
    #[serde(rename = "AppName")]
    pub app_name: String,
    #[serde(rename = "Labels", skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    #[serde(rename = "Process", skip_serializing_if = "BTreeMap::is_empty")]
    pub processes: BTreeMap<String, BTreeSet<String>>,
    #[serde(rename = "File", skip_serializing_if = "BTreeSet::is_empty")]
    pub files: BTreeSet<String>,
    #[serde(rename = "Network", skip_serializing_if = "BTreeMap::is_empty")]
    pub network: BTreeMap<String, BTreeSet<String>>,
}

impl SystemView {
    pub fn from_records(records: &[BehaviorRecord], focus: Option<&str>) -> Option<Self> {
        let first = records.first()?;
        let focus = focus.filter(|focus| !focus.is_empty());

        let mut view = SystemView {
            name: format!("sys-{}", first.namespace),
            namespace: first.namespace.clone(),
            ..SystemView::default()
        };
        for record in records {
            if let Some(focus) = focus {
                if !record.instance_name.contains(focus) {
                    continue;
                }
                view.app_name = focus.to_string();
            }
            view.add(record);
        }
        Some(view)
    }

    fn add(&mut self, record: &BehaviorRecord) {
        self.labels.push(record.label.clone());
        for event in &record.process_events {
            self.processes
                .entry(event.source.clone())
                .or_default()
                .insert(event.destination.clone());
        }
        for event in &record.file_events {
            self.files.insert(event.destination.clone());
        }
        for flow in record.ingress_flows.iter().chain(&record.egress_flows) {
            self.network
                .entry(flow.protocol.clone())
                .or_default()
                .insert(flow.command.clone());
        }
    }
}
