use crate::autograd::node::NodeId;
use crate::types::DType;
use thiserror::Error;

/// Custom error type for the rungraph engine.
///
/// Every variant raised while a graph is being built or traversed carries the
/// identity of the operation (and, during backward, the node) that failed.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum RunGraphError {
    #[error("Shape mismatch: expected {expected:?}, got {actual:?} during operation {operation}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
        operation: String,
    },

    #[error("Arity mismatch: expected {expected} values, got {actual} during operation {operation}")]
    ArityMismatch {
        expected: usize,
        actual: usize,
        operation: String,
    },

    #[error("DType mismatch: expected {expected:?}, got {actual:?} during operation {operation}")]
    DTypeMismatch {
        expected: DType,
        actual: DType,
        operation: String,
    },

    #[error("Unsupported type {dtype:?} for operation {operation}")]
    UnsupportedType { dtype: DType, operation: String },

    #[error("Cycle detected in the computation graph at node {node} ({operation})")]
    GraphCycle { node: NodeId, operation: String },

    #[error("Tensor creation error: data length {data_len} does not match shape {shape:?}")]
    TensorCreationError { data_len: usize, shape: Vec<usize> },

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl RunGraphError {
    /// Adds the identity of the node whose backward rule failed to the
    /// operation context of the error.
    pub(crate) fn at_node(self, node: NodeId, name: &str) -> Self {
        let context = |operation: String| format!("{operation} [backward of {name} at node {node}]");
        match self {
            RunGraphError::ShapeMismatch {
                expected,
                actual,
                operation,
            } => RunGraphError::ShapeMismatch {
                expected,
                actual,
                operation: context(operation),
            },
            RunGraphError::ArityMismatch {
                expected,
                actual,
                operation,
            } => RunGraphError::ArityMismatch {
                expected,
                actual,
                operation: context(operation),
            },
            RunGraphError::DTypeMismatch {
                expected,
                actual,
                operation,
            } => RunGraphError::DTypeMismatch {
                expected,
                actual,
                operation: context(operation),
            },
            RunGraphError::UnsupportedType { dtype, operation } => RunGraphError::UnsupportedType {
                dtype,
                operation: context(operation),
            },
            other => other,
        }
    }
}
