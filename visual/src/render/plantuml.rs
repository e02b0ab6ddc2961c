use behavior::graph::{GraphDescription, LineStyle};
use behavior::system::SystemView;

const NODE_COLOR: &str = "Lightblue";
const FOCUS_COLOR: &str = "Orange";

pub fn network(graph: &GraphDescription) -> String {
    let mut out = String::from("@startuml\n");

    for group in &graph.groups {
        out.push_str(&format!("package \"namespace: {}\" {{\n", group.namespace));
        for node in &group.nodes {
            let color = if node.highlight {
                FOCUS_COLOR
            } else {
                NODE_COLOR
            };
            out.push_str(&format!("[{}] #{}\n", node.name, color));
        }
        out.push_str("}\n");
    }

    for edge in &graph.edges {
        let arrow = match edge.line {
            LineStyle::Solid => "->",
            LineStyle::Dashed => "..>",
        };
        out.push_str(&format!(
            "[{}] -[#{}]{} [{}]",
            edge.source, edge.color, arrow, edge.destination
        ));
        if !edge.label.is_empty() {
            out.push_str(&format!(" : {}", edge.label));
        }
        out.push('\n');
    }

    out.push_str("@enduml\n");
    out
}

pub fn system(view: &SystemView) -> serde_json::Result<String> {
    let json = serde_json::to_string_pretty(view)?;
    Ok(format!("@startjson\n{}\n@endjson\n", json))
}
