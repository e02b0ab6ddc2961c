
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use log::debug;

use crate::Error;

/// One monitored workload instance as reported by the monitoring agent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BehaviorRecord {
    #[serde(rename = "DeploymentName", deserialize_with = "text")]
    pub workload_group_name: String,
    #[serde(rename = "PodName", deserialize_with = "text")]
    pub instance_name: String,
    #[serde(rename = "ClusterName", deserialize_with = "text")]
    pub cluster_name: String,
    #[serde(rename = "Namespace", deserialize_with = "text")]
    pub namespace: String,
    #[serde(rename = "Label", deserialize_with = "text")]
    pub label: String,
    #[serde(rename = "ProcessData", deserialize_with = "nullable")]
    pub process_events: Vec<AccessEvent>,
    #[serde(rename = "FileData", deserialize_with = "nullable")]
    pub file_events: Vec<AccessEvent>,
    #[serde(rename = "IngressConnection", deserialize_with = "nullable")]
    pub ingress_flows: Vec<Flow>,
    #[serde(rename = "EgressConnection", deserialize_with = "nullable")]
    pub egress_flows: Vec<Flow>,
}

/// Process ancestry (parent -> child binary) or file access (process -> path).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AccessEvent {
    #[serde(rename = "Source", deserialize_with = "text")]
    pub source: String,
    #[serde(rename = "Destination", deserialize_with = "text")]
    pub destination: String,
    #[serde(rename = "Count", deserialize_with = "count")]
    pub count: u64,
    #[serde(rename = "UpdatedTime", deserialize_with = "text")]
    pub updated_at: String,
    #[serde(rename = "Status", deserialize_with = "text")]
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Flow {
    #[serde(rename = "Protocol", deserialize_with = "text")]
    pub protocol: String,
    #[serde(rename = "Command", deserialize_with = "text")]
    pub command: String,
    #[serde(rename = "IP", deserialize_with = "text")]
    pub remote_ip: String,
    #[serde(rename = "Port", deserialize_with = "text")]
    pub remote_port: String,
    #[serde(rename = "Labels", deserialize_with = "text")]
    pub remote_labels: String,
    #[serde(rename = "Namespace", deserialize_with = "text")]
    pub remote_namespace: String,
    #[serde(rename = "Count", deserialize_with = "count")]
    pub count: u64,
    #[serde(rename = "UpdatedTime", deserialize_with = "text")]
    pub updated_at: String,
}

/// Decodes a behavior summary document, a JSON array with one object per
/// workload instance. Nothing is returned unless the whole document decodes.
pub fn parse(bytes: &[u8]) -> Result<Vec<BehaviorRecord>, Error> {
    let records: Vec<BehaviorRecord> = serde_json::from_slice(bytes)?;
    debug!("decoded {} behavior records", records.len());
    Ok(records)
}

// `null` is treated like an omitted field
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// the agent is not consistent about quoting ports
fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => return Err(D::Error::custom(format!("expected a string, found {}", other))),
    })
}

fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}
