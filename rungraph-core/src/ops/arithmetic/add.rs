use crate::array::NdArray;
use crate::autograd::{Graph, Operation};
use crate::backend::Backend;
use crate::error::RunGraphError;
use crate::ops::{check_binary, single_output};
use crate::tensor::Tensor;

/// Element-wise `a + b`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Add;

impl Operation for Add {
    fn name(&self) -> &'static str {
        "add"
    }

    fn label(&self) -> String {
        "+".to_string()
    }

    fn check_inputs(&self, inputs: &[&NdArray]) -> Result<(), RunGraphError> {
        check_binary(inputs, self.name())
    }

    fn forward(&self, inputs: &[&NdArray], backend: Backend) -> Result<Vec<NdArray>, RunGraphError> {
        let y = inputs[0].zip(inputs[1], backend, |a, b| a + b, |a, b| a + b, self.name())?;
        Ok(vec![y])
    }

    fn backward(
        &self,
        _inputs: &[&NdArray],
        grad_outputs: &[&NdArray],
        _backend: Backend,
    ) -> Result<Vec<NdArray>, RunGraphError> {
        let gy = grad_outputs[0];
        Ok(vec![gy.clone(), gy.clone()])
    }
}

/// Records `a + b` in `graph`.
pub fn add_op(graph: &mut Graph, a: &Tensor, b: &Tensor) -> Result<Tensor, RunGraphError> {
    single_output(graph.apply(Add, &[a, b])?, "add")
}

#[cfg(test)]
#[path = "add_test.rs"]
mod tests;
