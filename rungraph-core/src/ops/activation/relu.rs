use crate::array::NdArray;
use crate::autograd::{Graph, Operation};
use crate::backend::Backend;
use crate::error::RunGraphError;
use crate::ops::{check_unary, single_output};
use crate::tensor::Tensor;

/// Rectified Linear Unit: `max(0, x)` element-wise.
///
/// The gradient at exactly zero is taken as zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct Relu;

impl Operation for Relu {
    fn name(&self) -> &'static str {
        "relu"
    }

    fn label(&self) -> String {
        "ReLU".to_string()
    }

    fn check_inputs(&self, inputs: &[&NdArray]) -> Result<(), RunGraphError> {
        check_unary(inputs, self.name())
    }

    fn forward(&self, inputs: &[&NdArray], backend: Backend) -> Result<Vec<NdArray>, RunGraphError> {
        let y = inputs[0].map(backend, |x| x.max(0.0), |x| x.max(0.0), self.name())?;
        Ok(vec![y])
    }

    fn backward(
        &self,
        inputs: &[&NdArray],
        grad_outputs: &[&NdArray],
        backend: Backend,
    ) -> Result<Vec<NdArray>, RunGraphError> {
        let gx = grad_outputs[0].zip(
            inputs[0],
            backend,
            |g, x| if x > 0.0 { g } else { 0.0 },
            |g, x| if x > 0.0 { g } else { 0.0 },
            self.name(),
        )?;
        Ok(vec![gx])
    }
}

pub fn relu_op(graph: &mut Graph, x: &Tensor) -> Result<Tensor, RunGraphError> {
    single_output(graph.apply(Relu, &[x])?, "relu")
}

#[cfg(test)]
#[path = "relu_test.rs"]
mod tests;
