use behavior::graph::{Edge, GraphDescription, LineStyle};

use petgraph::dot::Dot;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

struct Vertex<'a> {
    name: &'a str,
    grouped: bool,
    highlight: bool,
}

impl Display for Vertex<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

struct Link<'a>(&'a Edge);

impl Display for Link<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.label)
    }
}

type Diagram<'a> = DiGraph<Vertex<'a>, Link<'a>>;

/// Graphviz rendering of a diff graph. Namespaces are not clustered; grouped
/// workloads become boxes and highlighted ones are filled.
pub fn network(graph: &GraphDescription) -> String {
    let mut diagram = Diagram::new();
    let mut index = BTreeMap::new();

    for node in graph.nodes() {
        index.entry(node.name.as_str()).or_insert_with(|| {
            diagram.add_node(Vertex {
                name: &node.name,
                grouped: true,
                highlight: node.highlight,
            })
        });
    }
    for edge in &graph.edges {
        let source = vertex(&mut diagram, &mut index, &edge.source);
        let destination = vertex(&mut diagram, &mut index, &edge.destination);
        diagram.add_edge(source, destination, Link(edge));
    }

    let dot = Dot::with_attr_getters(
        &diagram,
        &[],
        &|_, edge| {
            let Link(edge) = edge.weight();
            let style = match edge.line {
                LineStyle::Solid => "solid",
                LineStyle::Dashed => "dashed",
            };
            format!("color = \"{}\" style = \"{}\"", edge.color, style)
        },
        &|_, (_, vertex)| {
            if vertex.highlight {
                String::from("shape = \"box\" style = \"filled\" fillcolor = \"orange\"")
            } else if vertex.grouped {
                String::from("shape = \"box\" style = \"filled\" fillcolor = \"lightblue\"")
            } else {
                String::new()
            }
        },
    );
    format!("{}", dot)
}

fn vertex<'a>(
    diagram: &mut Diagram<'a>,
    index: &mut BTreeMap<&'a str, NodeIndex>,
    name: &'a str,
) -> NodeIndex {
    *index.entry(name).or_insert_with(|| {
        diagram.add_node(Vertex {
            name,
            grouped: false,
            highlight: false,
        })
    })
}
