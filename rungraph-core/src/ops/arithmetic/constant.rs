//! Operations with one tensor operand and one constant operand.
//!
//! The constant is stored as `f64` and converted to the tensor's element type
//! at evaluation time. Labels carry the constant (`+ 1`, `* 0.5`, `** 2`).

use crate::array::NdArray;
use crate::autograd::{Graph, Operation};
use crate::backend::Backend;
use crate::error::RunGraphError;
use crate::ops::{check_unary, format_constant, single_output};
use crate::tensor::Tensor;

/// `x + c`.
#[derive(Debug, Clone, Copy)]
pub struct AddConstant {
    pub value: f64,
}

impl Operation for AddConstant {
    fn name(&self) -> &'static str {
        "add_constant"
    }

    fn label(&self) -> String {
        format!("+ {}", format_constant(self.value))
    }

    fn check_inputs(&self, inputs: &[&NdArray]) -> Result<(), RunGraphError> {
        check_unary(inputs, self.name())
    }

    fn forward(&self, inputs: &[&NdArray], backend: Backend) -> Result<Vec<NdArray>, RunGraphError> {
        let c = self.value;
        let y = inputs[0].map(backend, |x| x + c as f32, |x| x + c, self.name())?;
        Ok(vec![y])
    }

    fn backward(
        &self,
        _inputs: &[&NdArray],
        grad_outputs: &[&NdArray],
        _backend: Backend,
    ) -> Result<Vec<NdArray>, RunGraphError> {
        Ok(vec![grad_outputs[0].clone()])
    }
}

/// `x * c`.
#[derive(Debug, Clone, Copy)]
pub struct MulConstant {
    pub value: f64,
}

impl Operation for MulConstant {
    fn name(&self) -> &'static str {
        "mul_constant"
    }

    fn label(&self) -> String {
        format!("* {}", format_constant(self.value))
    }

    fn check_inputs(&self, inputs: &[&NdArray]) -> Result<(), RunGraphError> {
        check_unary(inputs, self.name())
    }

    fn forward(&self, inputs: &[&NdArray], backend: Backend) -> Result<Vec<NdArray>, RunGraphError> {
        let c = self.value;
        let y = inputs[0].map(backend, |x| x * c as f32, |x| x * c, self.name())?;
        Ok(vec![y])
    }

    fn backward(
        &self,
        _inputs: &[&NdArray],
        grad_outputs: &[&NdArray],
        backend: Backend,
    ) -> Result<Vec<NdArray>, RunGraphError> {
        let c = self.value;
        let gx = grad_outputs[0].map(backend, |g| g * c as f32, |g| g * c, self.name())?;
        Ok(vec![gx])
    }
}

/// `x ** c` for a constant exponent.
#[derive(Debug, Clone, Copy)]
pub struct PowConstant {
    pub exponent: f64,
}

impl Operation for PowConstant {
    fn name(&self) -> &'static str {
        "pow_constant"
    }

    fn label(&self) -> String {
        format!("** {}", format_constant(self.exponent))
    }

    fn check_inputs(&self, inputs: &[&NdArray]) -> Result<(), RunGraphError> {
        check_unary(inputs, self.name())
    }

    fn forward(&self, inputs: &[&NdArray], backend: Backend) -> Result<Vec<NdArray>, RunGraphError> {
        let e = self.exponent;
        let y = inputs[0].map(backend, |x| x.powf(e as f32), |x| x.powf(e), self.name())?;
        Ok(vec![y])
    }

    /// `d(x^c)/dx = c * x^(c-1)`.
    fn backward(
        &self,
        inputs: &[&NdArray],
        grad_outputs: &[&NdArray],
        backend: Backend,
    ) -> Result<Vec<NdArray>, RunGraphError> {
        let e = self.exponent;
        let gx = grad_outputs[0].zip(
            inputs[0],
            backend,
            |g, x| g * e as f32 * x.powf(e as f32 - 1.0),
            |g, x| g * e * x.powf(e - 1.0),
            self.name(),
        )?;
        Ok(vec![gx])
    }
}

pub fn add_constant_op(graph: &mut Graph, x: &Tensor, value: f64) -> Result<Tensor, RunGraphError> {
    single_output(graph.apply(AddConstant { value }, &[x])?, "add_constant")
}

pub fn mul_constant_op(graph: &mut Graph, x: &Tensor, value: f64) -> Result<Tensor, RunGraphError> {
    single_output(graph.apply(MulConstant { value }, &[x])?, "mul_constant")
}

pub fn pow_constant_op(graph: &mut Graph, x: &Tensor, exponent: f64) -> Result<Tensor, RunGraphError> {
    single_output(graph.apply(PowConstant { exponent }, &[x])?, "pow_constant")
}

#[cfg(test)]
#[path = "constant_test.rs"]
mod tests;
