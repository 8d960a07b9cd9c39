use crate::array::NdArray;
use crate::autograd::{Graph, OpKind, Operation};
use crate::backend::Backend;
use crate::error::RunGraphError;
use crate::ops::expect_arity;
use crate::tensor::Tensor;

/// Fan-out: copies its single input to `n` identical outputs.
///
/// The backward rule sums the output gradients. Because the node carries no
/// computation of its own, the scheduler and the exporter may elide it and
/// treat every consumer as reading the split's input directly.
#[derive(Debug, Clone, Copy)]
pub struct Split {
    pub n: usize,
}

impl Operation for Split {
    fn name(&self) -> &'static str {
        "split"
    }

    fn kind(&self) -> OpKind {
        OpKind::Split
    }

    fn check_inputs(&self, inputs: &[&NdArray]) -> Result<(), RunGraphError> {
        expect_arity(inputs, 1, self.name())?;
        if self.n == 0 {
            return Err(RunGraphError::ArityMismatch {
                expected: 1,
                actual: 0,
                operation: "split outputs".to_string(),
            });
        }
        Ok(())
    }

    fn forward(&self, inputs: &[&NdArray], _backend: Backend) -> Result<Vec<NdArray>, RunGraphError> {
        Ok(vec![inputs[0].clone(); self.n])
    }

    fn backward(
        &self,
        _inputs: &[&NdArray],
        grad_outputs: &[&NdArray],
        backend: Backend,
    ) -> Result<Vec<NdArray>, RunGraphError> {
        let (first, rest) = grad_outputs.split_first().ok_or_else(|| RunGraphError::ArityMismatch {
            expected: self.n,
            actual: 0,
            operation: "split backward".to_string(),
        })?;
        let mut gx = (*first).clone();
        for g in rest {
            gx.accumulate(g, backend)?;
        }
        Ok(vec![gx])
    }
}

/// Splits `x` into `n` outputs sharing its value.
pub fn split_op(graph: &mut Graph, x: &Tensor, n: usize) -> Result<Vec<Tensor>, RunGraphError> {
    graph.apply(Split { n }, &[x])
}

#[cfg(test)]
#[path = "split_test.rs"]
mod tests;
