use crate::array::NdArray;
use crate::autograd::{Graph, Operation};
use crate::backend::Backend;
use crate::error::RunGraphError;
use crate::ops::{check_unary, single_output};
use crate::tensor::Tensor;

/// Sum of every element; the output is a scalar of shape `[]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sum;

impl Operation for Sum {
    fn name(&self) -> &'static str {
        "sum"
    }

    fn check_inputs(&self, inputs: &[&NdArray]) -> Result<(), RunGraphError> {
        check_unary(inputs, self.name())
    }

    fn forward(&self, inputs: &[&NdArray], backend: Backend) -> Result<Vec<NdArray>, RunGraphError> {
        Ok(vec![inputs[0].sum_all(backend)?])
    }

    /// Broadcasts the scalar output gradient back to the input shape.
    fn backward(
        &self,
        inputs: &[&NdArray],
        grad_outputs: &[&NdArray],
        _backend: Backend,
    ) -> Result<Vec<NdArray>, RunGraphError> {
        let x = inputs[0];
        let gy = grad_outputs[0].item()?;
        Ok(vec![NdArray::full(x.shape(), gy, x.dtype())])
    }
}

pub fn sum_op(graph: &mut Graph, x: &Tensor) -> Result<Tensor, RunGraphError> {
    single_output(graph.apply(Sum, &[x])?, "sum")
}

#[cfg(test)]
#[path = "sum_test.rs"]
mod tests;
