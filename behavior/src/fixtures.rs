use crate::summary::{AccessEvent, BehaviorRecord, Flow};

pub(crate) fn record(namespace: &str, instance_name: &str) -> BehaviorRecord {
    BehaviorRecord {
        workload_group_name: instance_name.to_string(),
        instance_name: instance_name.to_string(),
        cluster_name: "default".to_string(),
        namespace: namespace.to_string(),
        ..BehaviorRecord::default()
    }
}

pub(crate) fn flow(ip: &str, protocol: &str, port: &str) -> Flow {
    Flow {
        protocol: protocol.to_string(),
        command: "/app/server".to_string(),
        remote_ip: ip.to_string(),
        remote_port: port.to_string(),
        count: 1,
        ..Flow::default()
    }
}

pub(crate) fn access(source: &str, destination: &str) -> AccessEvent {
    AccessEvent {
        source: source.to_string(),
        destination: destination.to_string(),
        count: 1,
        status: "Allow".to_string(),
        ..AccessEvent::default()
    }
}

pub(crate) fn egress(mut record: BehaviorRecord, flows: Vec<Flow>) -> BehaviorRecord {
    record.egress_flows.extend(flows);
    record
}

pub(crate) fn ingress(mut record: BehaviorRecord, flows: Vec<Flow>) -> BehaviorRecord {
    record.ingress_flows.extend(flows);
    record
}
