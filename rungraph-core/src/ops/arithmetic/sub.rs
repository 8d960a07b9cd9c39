use crate::array::NdArray;
use crate::autograd::{Graph, Operation};
use crate::backend::Backend;
use crate::error::RunGraphError;
use crate::ops::{check_binary, single_output};
use crate::tensor::Tensor;

/// Element-wise `a - b`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sub;

impl Operation for Sub {
    fn name(&self) -> &'static str {
        "sub"
    }

    fn label(&self) -> String {
        "-".to_string()
    }

    fn check_inputs(&self, inputs: &[&NdArray]) -> Result<(), RunGraphError> {
        check_binary(inputs, self.name())
    }

    fn forward(&self, inputs: &[&NdArray], backend: Backend) -> Result<Vec<NdArray>, RunGraphError> {
        let y = inputs[0].zip(inputs[1], backend, |a, b| a - b, |a, b| a - b, self.name())?;
        Ok(vec![y])
    }

    fn backward(
        &self,
        _inputs: &[&NdArray],
        grad_outputs: &[&NdArray],
        backend: Backend,
    ) -> Result<Vec<NdArray>, RunGraphError> {
        let gy = grad_outputs[0];
        let gb = gy.map(backend, |g| -g, |g| -g, self.name())?;
        Ok(vec![gy.clone(), gb])
    }
}

pub fn sub_op(graph: &mut Graph, a: &Tensor, b: &Tensor) -> Result<Tensor, RunGraphError> {
    single_output(graph.apply(Sub, &[a, b])?, "sub")
}

#[cfg(test)]
#[path = "sub_test.rs"]
mod tests;
