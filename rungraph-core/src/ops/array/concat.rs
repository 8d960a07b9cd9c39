use crate::array::NdArray;
use crate::autograd::{Graph, Operation};
use crate::backend::Backend;
use crate::error::RunGraphError;
use crate::ops::single_output;
use crate::tensor::Tensor;

/// Concatenation along the first axis. Takes one or more inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct Concat;

impl Operation for Concat {
    fn name(&self) -> &'static str {
        "concat"
    }

    fn check_inputs(&self, inputs: &[&NdArray]) -> Result<(), RunGraphError> {
        let first = inputs.first().ok_or_else(|| RunGraphError::ArityMismatch {
            expected: 1,
            actual: 0,
            operation: self.name().to_string(),
        })?;
        for x in inputs {
            x.expect_dtype(first.dtype(), self.name())?;
            let compatible = x.ndim() > 0 && x.ndim() == first.ndim() && x.shape()[1..] == first.shape()[1..];
            if !compatible {
                return Err(RunGraphError::ShapeMismatch {
                    expected: first.shape().to_vec(),
                    actual: x.shape().to_vec(),
                    operation: self.name().to_string(),
                });
            }
        }
        Ok(())
    }

    fn forward(&self, inputs: &[&NdArray], _backend: Backend) -> Result<Vec<NdArray>, RunGraphError> {
        Ok(vec![NdArray::concat_axis0(inputs)?])
    }

    /// Slices the output gradient back into per-input row ranges.
    fn backward(
        &self,
        inputs: &[&NdArray],
        grad_outputs: &[&NdArray],
        _backend: Backend,
    ) -> Result<Vec<NdArray>, RunGraphError> {
        let gy = grad_outputs[0];
        let mut start = 0;
        let mut grads = Vec::with_capacity(inputs.len());
        for x in inputs {
            let end = start + x.shape()[0];
            grads.push(gy.slice_axis0(start, end)?);
            start = end;
        }
        Ok(grads)
    }
}

pub fn concat_op(graph: &mut Graph, inputs: &[&Tensor]) -> Result<Tensor, RunGraphError> {
    single_output(graph.apply(Concat, inputs)?, "concat")
}

#[cfg(test)]
#[path = "concat_test.rs"]
mod tests;
