use crate::array::NdArray;
use crate::backend::Backend;
use crate::error::RunGraphError;
use std::fmt::Debug;

/// Tag distinguishing nodes the engine treats specially.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    /// Any ordinary computation.
    Function,
    /// Pure fan-out: one input copied to several outputs. Eligible for elision.
    Split,
}

/// The contract every differentiable operation fulfils.
///
/// The graph calls `check_inputs`, then `forward`, and only then records a
/// node, so a failing operation never leaves a partial node behind. During the
/// backward pass the scheduler calls `backward` exactly once per node with the
/// inputs the node retained and one gradient per output (zeros for outputs
/// that received no gradient).
///
/// The engine is agnostic to what an operation computes; it only relies on
/// the arity and shape guarantees below.
pub trait Operation: Debug {
    /// Stable lowercase identifier used in logs and error messages (`"add"`).
    fn name(&self) -> &'static str;

    /// Label shown by the graph exporter (`"+"`, `"** 2"`, `"exp"`).
    fn label(&self) -> String {
        self.name().to_string()
    }

    fn kind(&self) -> OpKind {
        OpKind::Function
    }

    /// Validates arity, shapes and dtypes of the inputs.
    fn check_inputs(&self, inputs: &[&NdArray]) -> Result<(), RunGraphError>;

    /// Computes the outputs. Must not touch anything but its arguments.
    fn forward(&self, inputs: &[&NdArray], backend: Backend) -> Result<Vec<NdArray>, RunGraphError>;

    /// Computes one gradient per input from the retained inputs and the
    /// output gradients. Each gradient must have its input's shape and dtype.
    fn backward(
        &self,
        inputs: &[&NdArray],
        grad_outputs: &[&NdArray],
        backend: Backend,
    ) -> Result<Vec<NdArray>, RunGraphError>;
}
