//! # rungraph-core
//!
//! A define-by-run automatic differentiation engine. Operations executed
//! through a [`Graph`] are recorded as nodes as they run; [`Graph::backward`]
//! then replays the record in reverse, deepest node first, and accumulates
//! gradients into the tensors that require them.
//!
//! ```
//! use rungraph_core::ops::arithmetic::{add_op, mul_op};
//! use rungraph_core::{Graph, Tensor};
//!
//! let mut graph = Graph::new();
//! let x = Tensor::scalar(3.0);
//! x.requires_grad_(true).unwrap();
//! let y = mul_op(&mut graph, &x, &x).unwrap();
//! let z = add_op(&mut graph, &y, &x).unwrap();
//! graph.backward(&z).unwrap();
//! assert_eq!(x.grad().unwrap().item().unwrap(), 7.0);
//! ```

pub mod array;
pub mod autograd;
pub mod backend;
pub mod buffer;
pub mod config;
pub mod error;
pub mod ops;
pub mod tensor;
pub mod tensor_data;
pub mod types;
pub mod utils;

pub use array::NdArray;
pub use autograd::{
    check_grad, computational_graph, BackwardReport, ComputationalGraph, Graph, Node, NodeId, OpKind, Operation,
};
pub use backend::Backend;
pub use config::{BackwardOptions, GraphConfig};
pub use error::RunGraphError;
pub use tensor::{Tensor, TensorId};
pub use types::DType;

// Re-export traits required by public functions/structs
pub use num_traits;
