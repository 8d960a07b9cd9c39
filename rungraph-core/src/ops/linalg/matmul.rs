use crate::array::NdArray;
use crate::autograd::{Graph, Operation};
use crate::backend::Backend;
use crate::error::RunGraphError;
use crate::ops::{expect_arity, expect_float, single_output};
use crate::tensor::Tensor;

/// 2-D matrix product `(m, k) x (k, n) -> (m, n)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatMul;

impl Operation for MatMul {
    fn name(&self) -> &'static str {
        "matmul"
    }

    fn check_inputs(&self, inputs: &[&NdArray]) -> Result<(), RunGraphError> {
        expect_arity(inputs, 2, self.name())?;
        let (a, b) = (inputs[0], inputs[1]);
        expect_float(a, self.name())?;
        b.expect_dtype(a.dtype(), self.name())?;
        match (a.shape(), b.shape()) {
            ([_, k], [k2, _]) if k == k2 => Ok(()),
            _ => Err(RunGraphError::ShapeMismatch {
                expected: a.shape().to_vec(),
                actual: b.shape().to_vec(),
                operation: self.name().to_string(),
            }),
        }
    }

    fn forward(&self, inputs: &[&NdArray], backend: Backend) -> Result<Vec<NdArray>, RunGraphError> {
        Ok(vec![inputs[0].matmul(inputs[1], backend)?])
    }

    /// `dA = dC · Bᵀ`, `dB = Aᵀ · dC`.
    fn backward(
        &self,
        inputs: &[&NdArray],
        grad_outputs: &[&NdArray],
        backend: Backend,
    ) -> Result<Vec<NdArray>, RunGraphError> {
        let (a, b) = (inputs[0], inputs[1]);
        let gy = grad_outputs[0];
        let ga = gy.matmul(&b.transpose_2d()?, backend)?;
        let gb = a.transpose_2d()?.matmul(gy, backend)?;
        Ok(vec![ga, gb])
    }
}

pub fn matmul_op(graph: &mut Graph, a: &Tensor, b: &Tensor) -> Result<Tensor, RunGraphError> {
    single_output(graph.apply(MatMul, &[a, b])?, "matmul")
}

#[cfg(test)]
#[path = "matmul_test.rs"]
mod tests;
