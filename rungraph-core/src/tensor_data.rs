use crate::array::NdArray;
use crate::tensor::TensorId;

/// Internal storage and metadata for a `Tensor`.
///
/// Wrapped in `Rc<RefCell<TensorData>>` by [`Tensor`](crate::tensor::Tensor) so
/// a handle can be shared by the caller and by every node that reads it.
/// The creator link is not stored here: the owning graph keeps an index from
/// `id` to the producing node, so a tensor never owns its creator.
#[derive(Debug)]
pub struct TensorData {
    /// Identity of the handle, stable for its whole lifetime.
    pub(crate) id: TensorId,
    /// The numeric payload.
    pub(crate) array: NdArray,
    /// Gradient with the payload's shape and dtype, absent until the first
    /// contribution or an explicit `set_grad`.
    pub(crate) grad: Option<NdArray>,
    /// Whether backward should deliver gradients to this tensor.
    pub(crate) requires_grad: bool,
    /// Rank of the creator node, or 0 for leaves.
    pub(crate) rank: usize,
    /// Optional display name, shown in exported graphs.
    pub(crate) name: Option<String>,
}

impl TensorData {
    pub(crate) fn new(array: NdArray) -> Self {
        TensorData {
            id: TensorId::next(),
            array,
            grad: None,
            requires_grad: false,
            rank: 0,
            name: None,
        }
    }
}
