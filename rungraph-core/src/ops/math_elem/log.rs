use crate::array::NdArray;
use crate::autograd::{Graph, Operation};
use crate::backend::Backend;
use crate::error::RunGraphError;
use crate::ops::{check_unary, single_output};
use crate::tensor::Tensor;

/// Element-wise natural logarithm. Non-positive inputs yield NaN / -inf.
#[derive(Debug, Clone, Copy, Default)]
pub struct Log;

impl Operation for Log {
    fn name(&self) -> &'static str {
        "log"
    }

    fn check_inputs(&self, inputs: &[&NdArray]) -> Result<(), RunGraphError> {
        check_unary(inputs, self.name())
    }

    fn forward(&self, inputs: &[&NdArray], backend: Backend) -> Result<Vec<NdArray>, RunGraphError> {
        Ok(vec![inputs[0].map(backend, f32::ln, f64::ln, self.name())?])
    }

    fn backward(
        &self,
        inputs: &[&NdArray],
        grad_outputs: &[&NdArray],
        backend: Backend,
    ) -> Result<Vec<NdArray>, RunGraphError> {
        let gx = grad_outputs[0].zip(inputs[0], backend, |g, x| g / x, |g, x| g / x, self.name())?;
        Ok(vec![gx])
    }
}

pub fn log_op(graph: &mut Graph, x: &Tensor) -> Result<Tensor, RunGraphError> {
    single_output(graph.apply(Log, &[x])?, "log")
}

#[cfg(test)]
#[path = "log_test.rs"]
mod tests;
