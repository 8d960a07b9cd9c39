use crate::array::NdArray;
use crate::autograd::{Graph, Operation};
use crate::backend::Backend;
use crate::error::RunGraphError;
use crate::ops::{check_binary, single_output};
use crate::tensor::Tensor;

/// Element-wise `a * b`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mul;

impl Operation for Mul {
    fn name(&self) -> &'static str {
        "mul"
    }

    fn label(&self) -> String {
        "*".to_string()
    }

    fn check_inputs(&self, inputs: &[&NdArray]) -> Result<(), RunGraphError> {
        check_binary(inputs, self.name())
    }

    fn forward(&self, inputs: &[&NdArray], backend: Backend) -> Result<Vec<NdArray>, RunGraphError> {
        let y = inputs[0].zip(inputs[1], backend, |a, b| a * b, |a, b| a * b, self.name())?;
        Ok(vec![y])
    }

    fn backward(
        &self,
        inputs: &[&NdArray],
        grad_outputs: &[&NdArray],
        backend: Backend,
    ) -> Result<Vec<NdArray>, RunGraphError> {
        let gy = grad_outputs[0];
        let ga = gy.zip(inputs[1], backend, |g, b| g * b, |g, b| g * b, self.name())?;
        let gb = gy.zip(inputs[0], backend, |g, a| g * a, |g, a| g * a, self.name())?;
        Ok(vec![ga, gb])
    }
}

pub fn mul_op(graph: &mut Graph, a: &Tensor, b: &Tensor) -> Result<Tensor, RunGraphError> {
    single_output(graph.apply(Mul, &[a, b])?, "mul")
}

#[cfg(test)]
#[path = "mul_test.rs"]
mod tests;
