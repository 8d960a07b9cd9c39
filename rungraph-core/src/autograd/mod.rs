//! # Automatic Differentiation (`autograd`)
//!
//! Define-by-run reverse-mode differentiation.
//!
//! - [`Graph`] records one [`Node`] per executed [`Operation`] whose inputs
//!   require grad. A node's rank is `1 + max(rank(input))`; leaves have rank 0.
//! - [`Graph::backward`] walks the recorded nodes deepest first, calls each
//!   node's backward rule exactly once, and sums gradients at fan-out points.
//! - [`computational_graph`] exports the reachable edge set for diagnostics.
//! - [`check_grad`] compares analytical gradients with finite differences.
//!
//! Tensors never reference their creator. The graph owns the nodes and an
//! index from tensor id to creator, so dropping or clearing the graph is the
//! only thing needed to cut ownership.

pub mod backward;
pub mod export;
pub mod grad_check;
pub mod graph;
pub mod node;
pub mod operation;
pub(crate) mod queue;

pub use backward::{BackwardReport, NodeVisit};
pub use export::{computational_graph, ComputationalGraph, Edge, Vertex};
pub use grad_check::{check_grad, GradCheckError};
pub use graph::Graph;
pub use node::{Node, NodeId};
pub use operation::{OpKind, Operation};
