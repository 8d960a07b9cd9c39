use crate::array::NdArray;
use crate::autograd::{Graph, Operation};
use crate::backend::Backend;
use crate::error::RunGraphError;
use crate::ops::{check_binary, single_output};
use crate::tensor::Tensor;

/// Element-wise `a / b`. Division by zero follows IEEE semantics.
#[derive(Debug, Clone, Copy, Default)]
pub struct Div;

impl Operation for Div {
    fn name(&self) -> &'static str {
        "div"
    }

    fn label(&self) -> String {
        "/".to_string()
    }

    fn check_inputs(&self, inputs: &[&NdArray]) -> Result<(), RunGraphError> {
        check_binary(inputs, self.name())
    }

    fn forward(&self, inputs: &[&NdArray], backend: Backend) -> Result<Vec<NdArray>, RunGraphError> {
        let y = inputs[0].zip(inputs[1], backend, |a, b| a / b, |a, b| a / b, self.name())?;
        Ok(vec![y])
    }

    /// `d(a/b)/da = 1/b`, `d(a/b)/db = -a/b²`.
    fn backward(
        &self,
        inputs: &[&NdArray],
        grad_outputs: &[&NdArray],
        backend: Backend,
    ) -> Result<Vec<NdArray>, RunGraphError> {
        let (a, b) = (inputs[0], inputs[1]);
        let gy = grad_outputs[0];
        let ga = gy.zip(b, backend, |g, b| g / b, |g, b| g / b, self.name())?;
        let gb = gy
            .zip(a, backend, |g, a| g * a, |g, a| g * a, self.name())?
            .zip(b, backend, |ga, b| -ga / (b * b), |ga, b| -ga / (b * b), self.name())?;
        Ok(vec![ga, gb])
    }
}

pub fn div_op(graph: &mut Graph, a: &Tensor, b: &Tensor) -> Result<Tensor, RunGraphError> {
    single_output(graph.apply(Div, &[a, b])?, "div")
}

#[cfg(test)]
#[path = "div_test.rs"]
mod tests;
