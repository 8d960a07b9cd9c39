use crate::array::NdArray;
use crate::backend::Backend;
use crate::error::RunGraphError;
use crate::tensor::Tensor;

impl Tensor {
    /// Checks if backward delivers gradients to this tensor.
    pub fn requires_grad(&self) -> bool {
        self.read_data().requires_grad
    }

    /// Sets the `requires_grad` status of this tensor in place.
    ///
    /// Integer tensors cannot require grad.
    pub fn requires_grad_(&self, requires_grad: bool) -> Result<(), RunGraphError> {
        let mut guard = self.write_data();
        if requires_grad && !guard.array.dtype().is_float() {
            return Err(RunGraphError::UnsupportedType {
                dtype: guard.array.dtype(),
                operation: "requires_grad_".to_string(),
            });
        }
        guard.requires_grad = requires_grad;
        Ok(())
    }

    /// Returns a clone of the gradient, if any.
    pub fn grad(&self) -> Option<NdArray> {
        self.read_data().grad.clone()
    }

    /// Sets (or clears) the gradient explicitly, e.g. to seed a non-scalar
    /// backward pass. The gradient must match the payload's shape and dtype.
    pub fn set_grad(&self, grad: Option<NdArray>) -> Result<(), RunGraphError> {
        let mut guard = self.write_data();
        if let Some(g) = &grad {
            g.expect_shape(guard.array.shape(), "set_grad")?;
            g.expect_dtype(guard.array.dtype(), "set_grad")?;
        }
        guard.grad = grad;
        Ok(())
    }

    /// Resets the gradient to zeros of the payload's shape.
    pub fn zero_grad(&self) {
        let mut guard = self.write_data();
        guard.grad = Some(NdArray::zeros_like(&guard.array));
    }

    /// Resets the gradient to `None`.
    pub fn clear_grad(&self) {
        self.write_data().grad = None;
    }

    /// Folds `grad_to_add` into this tensor's gradient.
    ///
    /// With `overwrite` the previous gradient is replaced instead of summed;
    /// the scheduler uses this for the first contribution a non-leaf receives
    /// in a pass.
    pub(crate) fn accumulate_grad(
        &self,
        grad_to_add: &NdArray,
        backend: Backend,
        overwrite: bool,
    ) -> Result<(), RunGraphError> {
        let mut guard = self.write_data();
        grad_to_add.expect_shape(guard.array.shape(), "accumulate_grad")?;
        grad_to_add.expect_dtype(guard.array.dtype(), "accumulate_grad")?;
        if !overwrite {
            if let Some(existing) = guard.grad.as_mut() {
                return existing.accumulate(grad_to_add, backend);
            }
        }
        guard.grad = Some(grad_to_add.clone());
        Ok(())
    }
}
