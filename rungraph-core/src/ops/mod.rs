//! # Operation catalog (`ops`)
//!
//! Each operation is a small struct implementing
//! [`Operation`](crate::autograd::Operation) plus an `xxx_op` function that
//! runs it through a [`Graph`](crate::autograd::Graph). The engine calls these
//! units through the trait and never looks at what they compute.
//!
//! ## Key Submodules:
//!
//! - [`arithmetic`]: element-wise `+ - * /`, negation and the constant variants.
//! - [`math_elem`]: `exp`, `log`.
//! - [`activation`]: `relu`.
//! - [`reduction`]: `sum` over all elements.
//! - [`linalg`]: 2-D `matmul`.
//! - [`array`]: `split` (fan-out), `concat`, `identity`.

pub mod activation;
pub mod arithmetic;
pub mod array;
pub mod linalg;
pub mod math_elem;
pub mod reduction;

use crate::array::NdArray;
use crate::error::RunGraphError;
use crate::tensor::Tensor;

pub(crate) fn expect_arity(
    inputs: &[&NdArray],
    expected: usize,
    operation: &str,
) -> Result<(), RunGraphError> {
    if inputs.len() != expected {
        return Err(RunGraphError::ArityMismatch {
            expected,
            actual: inputs.len(),
            operation: operation.to_string(),
        });
    }
    Ok(())
}

pub(crate) fn expect_float(array: &NdArray, operation: &str) -> Result<(), RunGraphError> {
    if !array.dtype().is_float() {
        return Err(RunGraphError::UnsupportedType {
            dtype: array.dtype(),
            operation: operation.to_string(),
        });
    }
    Ok(())
}

/// One floating-point input.
pub(crate) fn check_unary(inputs: &[&NdArray], operation: &str) -> Result<(), RunGraphError> {
    expect_arity(inputs, 1, operation)?;
    expect_float(inputs[0], operation)
}

/// Two floating-point inputs of identical shape and dtype. No broadcasting.
pub(crate) fn check_binary(inputs: &[&NdArray], operation: &str) -> Result<(), RunGraphError> {
    expect_arity(inputs, 2, operation)?;
    let (a, b) = (inputs[0], inputs[1]);
    expect_float(a, operation)?;
    b.expect_shape(a.shape(), operation)?;
    b.expect_dtype(a.dtype(), operation)
}

/// Unwraps the output of a single-output operation.
pub(crate) fn single_output(outputs: Vec<Tensor>, operation: &str) -> Result<Tensor, RunGraphError> {
    let actual = outputs.len();
    let mut iter = outputs.into_iter();
    match (iter.next(), iter.next()) {
        (Some(out), None) => Ok(out),
        _ => Err(RunGraphError::ArityMismatch {
            expected: 1,
            actual,
            operation: format!("{} outputs", operation),
        }),
    }
}

/// Formats a constant operand the way operation labels show it (`2`, `0.5`).
pub(crate) fn format_constant(value: f64) -> String {
    format!("{}", value)
}
