use crate::array::NdArray;
use crate::autograd::graph::Graph;
use crate::config::GraphConfig;
use crate::error::RunGraphError;
use crate::tensor::Tensor;
use crate::types::DType;
use approx::relative_eq;
use thiserror::Error;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for input {input_index}, element {element_index}: analytical {analytical_grad:?} != numerical {numerical_grad:?} (difference {difference:?})")]
    GradientMismatch {
        input_index: usize,
        element_index: usize,
        analytical_grad: f64,
        numerical_grad: f64,
        difference: f64,
    },

    #[error("Forward function execution failed during gradient check: {0}")]
    ForwardPassError(RunGraphError),

    #[error("Backward pass execution failed during gradient check: {0}")]
    BackwardPassError(RunGraphError),

    #[error("Tensor error during intermediate calculation: {0}")]
    TensorError(RunGraphError),

    #[error("Unsupported data type for gradient check: {0:?}")]
    UnsupportedDType(DType),

    #[error("Input {input_index} requires grad but has no gradient after backward pass.")]
    MissingAnalyticalGrad { input_index: usize },

    #[error("Numerical gradient is NaN or infinite for input {input_index}, element {element_index} (loss+ {loss_plus:?}, loss- {loss_minus:?})")]
    NumericalGradNaNOrInfinite {
        input_index: usize,
        element_index: usize,
        loss_plus: f64,
        loss_minus: f64,
    },

    #[error("Function output does not require grad although its inputs do.")]
    RequiresGradPropagationError,
}

impl From<RunGraphError> for GradCheckError {
    fn from(err: RunGraphError) -> Self {
        GradCheckError::TensorError(err)
    }
}

/// Checks analytical gradients against central finite differences.
///
/// `func` is evaluated on a fresh graph with one leaf per entry of `inputs`.
/// The loss is the sum of the function's output, so the analytical pass seeds
/// the output gradient with ones. Every input element is then perturbed by
/// `±epsilon` (in f64) and `(L(x+ε) - L(x-ε)) / 2ε` is compared with the
/// analytical gradient using `tolerance` as both absolute and relative bound.
///
/// Prefer f64 inputs: f32 round-off swamps small epsilons.
pub fn check_grad<F>(func: F, inputs: &[NdArray], epsilon: f64, tolerance: f64) -> Result<(), GradCheckError>
where
    F: Fn(&mut Graph, &[Tensor]) -> Result<Tensor, RunGraphError>,
{
    for x in inputs {
        if !x.dtype().is_float() {
            return Err(GradCheckError::UnsupportedDType(x.dtype()));
        }
    }

    // --- Analytical gradients ---
    let mut graph = Graph::new();
    let leaves = inputs
        .iter()
        .map(|x| {
            let t = Tensor::from_array(x.clone());
            t.requires_grad_(true)?;
            Ok(t)
        })
        .collect::<Result<Vec<Tensor>, RunGraphError>>()?;

    let output = func(&mut graph, &leaves).map_err(GradCheckError::ForwardPassError)?;
    if !output.requires_grad() {
        return Err(GradCheckError::RequiresGradPropagationError);
    }
    output.set_grad(Some(NdArray::ones_like(&output.data())))?;
    graph
        .backward(&output)
        .map_err(GradCheckError::BackwardPassError)?;

    let analytical = leaves
        .iter()
        .enumerate()
        .map(|(i, t)| {
            t.grad()
                .map(|g| g.to_f64_vec())
                .ok_or(GradCheckError::MissingAnalyticalGrad { input_index: i })
        })
        .collect::<Result<Vec<Vec<f64>>, GradCheckError>>()?;

    // --- Numerical gradients ---
    for (input_index, x) in inputs.iter().enumerate() {
        for element_index in 0..x.numel() {
            let loss_plus = perturbed_loss(&func, inputs, input_index, element_index, epsilon)?;
            let loss_minus = perturbed_loss(&func, inputs, input_index, element_index, -epsilon)?;
            if !loss_plus.is_finite() || !loss_minus.is_finite() {
                return Err(GradCheckError::NumericalGradNaNOrInfinite {
                    input_index,
                    element_index,
                    loss_plus,
                    loss_minus,
                });
            }
            let numerical_grad = (loss_plus - loss_minus) / (2.0 * epsilon);
            let analytical_grad = analytical[input_index][element_index];
            if !relative_eq!(
                analytical_grad,
                numerical_grad,
                epsilon = tolerance,
                max_relative = tolerance
            ) {
                return Err(GradCheckError::GradientMismatch {
                    input_index,
                    element_index,
                    analytical_grad,
                    numerical_grad,
                    difference: (analytical_grad - numerical_grad).abs(),
                });
            }
        }
    }
    log::debug!("Gradient check passed for {} inputs", inputs.len());
    Ok(())
}

/// Sum of `func`'s output with one input element shifted by `delta`.
/// Runs with backprop disabled, so no nodes are recorded.
fn perturbed_loss<F>(
    func: &F,
    inputs: &[NdArray],
    input_index: usize,
    element_index: usize,
    delta: f64,
) -> Result<f64, GradCheckError>
where
    F: Fn(&mut Graph, &[Tensor]) -> Result<Tensor, RunGraphError>,
{
    let mut tensors = Vec::with_capacity(inputs.len());
    for (i, x) in inputs.iter().enumerate() {
        let mut x = x.clone();
        if i == input_index {
            let value = x.buffer().get_f64(element_index).ok_or_else(|| {
                RunGraphError::InternalError(format!(
                    "element {} out of range for input {}",
                    element_index, input_index
                ))
            })?;
            x.buffer_mut().set_f64(element_index, value + delta);
        }
        tensors.push(Tensor::from_array(x));
    }
    let mut graph = Graph::with_config(GraphConfig::default().with_enable_backprop(false));
    let output = func(&mut graph, &tensors).map_err(GradCheckError::ForwardPassError)?;
    Ok(output.to_f64_vec().iter().sum())
}

#[cfg(test)]
#[path = "grad_check_test.rs"]
mod tests;
