use crate::array::NdArray;
use crate::autograd::{Graph, Operation};
use crate::backend::Backend;
use crate::error::RunGraphError;
use crate::ops::{check_unary, single_output};
use crate::tensor::Tensor;

/// Element-wise `e^x`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Exp;

impl Operation for Exp {
    fn name(&self) -> &'static str {
        "exp"
    }

    fn check_inputs(&self, inputs: &[&NdArray]) -> Result<(), RunGraphError> {
        check_unary(inputs, self.name())
    }

    fn forward(&self, inputs: &[&NdArray], backend: Backend) -> Result<Vec<NdArray>, RunGraphError> {
        Ok(vec![inputs[0].map(backend, f32::exp, f64::exp, self.name())?])
    }

    // Outputs are not retained, so e^x is recomputed from the input.
    fn backward(
        &self,
        inputs: &[&NdArray],
        grad_outputs: &[&NdArray],
        backend: Backend,
    ) -> Result<Vec<NdArray>, RunGraphError> {
        let gx = grad_outputs[0].zip(
            inputs[0],
            backend,
            |g, x| g * x.exp(),
            |g, x| g * x.exp(),
            self.name(),
        )?;
        Ok(vec![gx])
    }
}

pub fn exp_op(graph: &mut Graph, x: &Tensor) -> Result<Tensor, RunGraphError> {
    single_output(graph.apply(Exp, &[x])?, "exp")
}

#[cfg(test)]
#[path = "exp_test.rs"]
mod tests;
