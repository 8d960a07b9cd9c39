use crate::array::NdArray;
use crate::error::RunGraphError;
use crate::tensor_data::TensorData;
use crate::types::DType;
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicUsize, Ordering};

mod autograd;
pub mod create;

pub use create::{full, ones, ones_like, randn, zeros, zeros_like};

/// Identity of a tensor handle. Unique for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TensorId(usize);

static NEXT_TENSOR_ID: AtomicUsize = AtomicUsize::new(0);

impl TensorId {
    pub(crate) fn next() -> Self {
        TensorId(NEXT_TENSOR_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for TensorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// A handle to a numeric array and its (possibly absent) gradient.
///
/// `Tensor` uses `Rc<RefCell<TensorData>>` internally:
/// 1.  **Shared ownership:** the caller and every node that consumed the
///     tensor hold the same data; cloning a handle is cheap.
/// 2.  **Interior mutability:** the backward pass writes `grad` through shared
///     handles.
///
/// Handles are single-threaded. Independent graphs on other threads need their
/// own tensors.
pub struct Tensor {
    pub(crate) data: Rc<RefCell<TensorData>>,
}

impl Clone for Tensor {
    fn clone(&self) -> Self {
        Tensor {
            data: Rc::clone(&self.data),
        }
    }
}

impl fmt::Debug for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = self.read_data();
        f.debug_struct("Tensor")
            .field("id", &guard.id)
            .field("shape", &guard.array.shape())
            .field("dtype", &guard.array.dtype())
            .field("rank", &guard.rank)
            .field("requires_grad", &guard.requires_grad)
            .field("has_grad", &guard.grad.is_some())
            .finish()
    }
}

/// Non-owning reference to a tensor, held by the node that produced it.
#[derive(Debug, Clone, Default)]
pub(crate) struct WeakTensor(Weak<RefCell<TensorData>>);

impl WeakTensor {
    pub(crate) fn upgrade(&self) -> Option<Tensor> {
        self.0.upgrade().map(|data| Tensor { data })
    }

    pub(crate) fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }
}

impl Tensor {
    /// Wraps an array as a new leaf tensor that does not require grad.
    pub fn from_array(array: NdArray) -> Self {
        Tensor {
            data: Rc::new(RefCell::new(TensorData::new(array))),
        }
    }

    /// Acquires a shared borrow of the tensor's data.
    ///
    /// Panics if the data is currently mutably borrowed.
    pub fn read_data(&self) -> Ref<'_, TensorData> {
        self.data.borrow()
    }

    /// Acquires a mutable borrow of the tensor's data.
    ///
    /// Panics if the data is currently borrowed.
    pub fn write_data(&self) -> RefMut<'_, TensorData> {
        self.data.borrow_mut()
    }

    pub(crate) fn downgrade(&self) -> WeakTensor {
        WeakTensor(Rc::downgrade(&self.data))
    }

    pub fn id(&self) -> TensorId {
        self.read_data().id
    }

    /// Returns a clone of the tensor's shape.
    pub fn shape(&self) -> Vec<usize> {
        self.read_data().array.shape().to_vec()
    }

    pub fn dtype(&self) -> DType {
        self.read_data().array.dtype()
    }

    pub fn numel(&self) -> usize {
        self.read_data().array.numel()
    }

    /// Topological depth: the creator's rank, 0 for leaves.
    pub fn rank(&self) -> usize {
        self.read_data().rank
    }

    pub fn name(&self) -> Option<String> {
        self.read_data().name.clone()
    }

    /// Sets the display name and returns the handle.
    pub fn with_name(self, name: impl Into<String>) -> Self {
        self.write_data().name = Some(name.into());
        self
    }

    /// Returns a copy of the numeric payload.
    pub fn data(&self) -> NdArray {
        self.read_data().array.clone()
    }

    /// Replaces the payload. The shape and dtype must stay the same.
    pub fn set_data(&self, array: NdArray) -> Result<(), RunGraphError> {
        let mut guard = self.write_data();
        array.expect_shape(guard.array.shape(), "set_data")?;
        array.expect_dtype(guard.array.dtype(), "set_data")?;
        guard.array = array;
        Ok(())
    }

    /// Attempts to get the tensor data as a `Vec<f32>`.
    pub fn get_f32_data(&self) -> Result<Vec<f32>, RunGraphError> {
        Ok(self.read_data().array.buffer().try_as_f32()?.to_vec())
    }

    /// Attempts to get the tensor data as a `Vec<f64>`.
    pub fn get_f64_data(&self) -> Result<Vec<f64>, RunGraphError> {
        Ok(self.read_data().array.buffer().try_as_f64()?.to_vec())
    }

    /// Every element widened to f64, whatever the dtype.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        self.read_data().array.to_f64_vec()
    }

    /// The value of a one-element tensor.
    pub fn item(&self) -> Result<f64, RunGraphError> {
        self.read_data().array.item()
    }

    /// True if both handles refer to the same tensor.
    pub fn same_handle(&self, other: &Tensor) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }
}

#[cfg(test)]
#[path = "tensor_test.rs"]
mod tests;
