use crate::array::NdArray;
use crate::autograd::{Graph, Operation};
use crate::backend::Backend;
use crate::error::RunGraphError;
use crate::ops::{check_unary, single_output};
use crate::tensor::Tensor;

/// Element-wise `-x`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Neg;

impl Operation for Neg {
    fn name(&self) -> &'static str {
        "neg"
    }

    fn label(&self) -> String {
        "-".to_string()
    }

    fn check_inputs(&self, inputs: &[&NdArray]) -> Result<(), RunGraphError> {
        check_unary(inputs, self.name())
    }

    fn forward(&self, inputs: &[&NdArray], backend: Backend) -> Result<Vec<NdArray>, RunGraphError> {
        Ok(vec![inputs[0].map(backend, |x| -x, |x| -x, self.name())?])
    }

    fn backward(
        &self,
        _inputs: &[&NdArray],
        grad_outputs: &[&NdArray],
        backend: Backend,
    ) -> Result<Vec<NdArray>, RunGraphError> {
        Ok(vec![grad_outputs[0].map(backend, |g| -g, |g| -g, self.name())?])
    }
}

pub fn neg_op(graph: &mut Graph, x: &Tensor) -> Result<Tensor, RunGraphError> {
    single_output(graph.apply(Neg, &[x])?, "neg")
}

#[cfg(test)]
#[path = "neg_test.rs"]
mod tests;
