use crate::array::NdArray;
use crate::autograd::{Graph, Operation};
use crate::backend::Backend;
use crate::error::RunGraphError;
use crate::ops::{expect_arity, single_output};
use crate::tensor::Tensor;

/// Returns its input unchanged; the gradient passes straight through.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl Operation for Identity {
    fn name(&self) -> &'static str {
        "identity"
    }

    fn check_inputs(&self, inputs: &[&NdArray]) -> Result<(), RunGraphError> {
        expect_arity(inputs, 1, self.name())
    }

    fn forward(&self, inputs: &[&NdArray], _backend: Backend) -> Result<Vec<NdArray>, RunGraphError> {
        Ok(vec![inputs[0].clone()])
    }

    fn backward(
        &self,
        _inputs: &[&NdArray],
        grad_outputs: &[&NdArray],
        _backend: Backend,
    ) -> Result<Vec<NdArray>, RunGraphError> {
        Ok(vec![grad_outputs[0].clone()])
    }
}

pub fn identity_op(graph: &mut Graph, x: &Tensor) -> Result<Tensor, RunGraphError> {
    single_output(graph.apply(Identity, &[x])?, "identity")
}

#[cfg(test)]
#[path = "identity_test.rs"]
mod tests;
