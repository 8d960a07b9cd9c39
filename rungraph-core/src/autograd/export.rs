//! Read-only export of the recorded graph as an edge set and as DOT text.
//!
//! Starting from a set of outputs, the exporter walks creators backward and
//! collects every `(producer, consumer)` pair it meets: creator node → output
//! tensor, and input tensor → consuming node. With `remove_split` set, every
//! tensor reference is first redirected through split nodes exactly as the
//! backward scheduler does, so splits and their outputs never show up.
//!
//! The result is deterministic: edges and vertices are kept in ordered sets,
//! so exporting the same graph twice yields identical text.

use crate::autograd::graph::Graph;
use crate::autograd::node::{Node, NodeId};
use crate::tensor::{Tensor, TensorId};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;

/// A vertex of the exported graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Vertex {
    Tensor(TensorId),
    Op(NodeId),
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Vertex::Tensor(id) => write!(f, "{}", id),
            Vertex::Op(id) => write!(f, "{}", id),
        }
    }
}

/// A directed `producer -> consumer` edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    pub from: Vertex,
    pub to: Vertex,
}

impl Edge {
    pub fn new(from: Vertex, to: Vertex) -> Self {
        Edge { from, to }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct VertexStyle {
    label: String,
    shape: &'static str,
}

/// The deduplicated edge set reachable from a set of outputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComputationalGraph {
    edges: BTreeSet<Edge>,
    vertices: BTreeMap<Vertex, VertexStyle>,
}

impl ComputationalGraph {
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Every vertex met during the walk, including isolated leaves.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.keys()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn contains(&self, edge: &Edge) -> bool {
        self.edges.contains(edge)
    }

    pub fn label(&self, vertex: &Vertex) -> Option<&str> {
        self.vertices.get(vertex).map(|style| style.label.as_str())
    }

    /// Renders the graph in Graphviz DOT syntax.
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph graphname{\n");
        for (vertex, style) in &self.vertices {
            out.push_str(&format!(
                "{} [label=\"{}\",shape=\"{}\"];\n",
                vertex,
                escape(&style.label),
                style.shape
            ));
        }
        for edge in &self.edges {
            out.push_str(&format!("{} -> {};\n", edge.from, edge.to));
        }
        out.push('}');
        out
    }

    fn add_tensor(&mut self, tensor: &Tensor) {
        self.vertices
            .entry(Vertex::Tensor(tensor.id()))
            .or_insert_with(|| VertexStyle {
                label: tensor_label(tensor),
                shape: "oval",
            });
    }

    fn add_op(&mut self, node: &Node) {
        self.vertices
            .entry(Vertex::Op(node.id()))
            .or_insert_with(|| VertexStyle {
                label: node.label(),
                shape: if node.is_split() { "hexagon" } else { "box" },
            });
    }
}

impl fmt::Display for ComputationalGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_dot())
    }
}

/// `"(2, 3), float32"`; scalars show only the dtype. A tensor name, if set,
/// is prepended as `"name: "`.
fn tensor_label(tensor: &Tensor) -> String {
    let guard = tensor.read_data();
    let shape = guard.array.shape();
    let body = if shape.is_empty() {
        guard.array.dtype().to_string()
    } else {
        let dims: Vec<String> = shape.iter().map(|d| d.to_string()).collect();
        format!("({}), {}", dims.join(", "), guard.array.dtype())
    };
    match &guard.name {
        Some(name) => format!("{}: {}", name, body),
        None => body,
    }
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Builds the edge set reachable backward from `outputs`.
///
/// Never touches gradients. An empty output set yields an empty graph.
pub fn computational_graph(graph: &Graph, outputs: &[&Tensor], remove_split: bool) -> ComputationalGraph {
    let resolve = |t: &Tensor| {
        if remove_split {
            graph.skip_splits(t)
        } else {
            t.clone()
        }
    };

    let mut cg = ComputationalGraph::default();
    let mut pending: Vec<Tensor> = outputs.iter().map(|&t| resolve(t)).collect();
    let mut seen_tensors: HashSet<TensorId> = HashSet::new();
    let mut seen_nodes: HashSet<NodeId> = HashSet::new();

    while let Some(tensor) = pending.pop() {
        if !seen_tensors.insert(tensor.id()) {
            continue;
        }
        cg.add_tensor(&tensor);
        let Some(node) = graph.creator_node(&tensor) else {
            continue;
        };
        cg.add_op(node);
        cg.edges
            .insert(Edge::new(Vertex::Op(node.id()), Vertex::Tensor(tensor.id())));
        if !seen_nodes.insert(node.id()) {
            continue;
        }
        for input in node.inputs() {
            let x = resolve(input);
            cg.add_tensor(&x);
            cg.edges
                .insert(Edge::new(Vertex::Tensor(x.id()), Vertex::Op(node.id())));
            pending.push(x);
        }
    }

    log::debug!(
        "Exported computational graph: {} vertices, {} edges (remove_split = {})",
        cg.vertices.len(),
        cg.edges.len(),
        remove_split
    );
    cg
}

#[cfg(test)]
#[path = "export_test.rs"]
mod tests;
