use crate::autograd::operation::{OpKind, Operation};
use crate::backend::Backend;
use crate::tensor::{Tensor, TensorId, WeakTensor};
use crate::types::DType;
use std::fmt;

/// Identity of an operation node within its graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f{}", self.0)
    }
}

/// What a node remembers about one of its outputs.
///
/// The handle itself is weak: the node never keeps its outputs alive. Shape
/// and dtype are kept so a zero gradient can stand in for an output that was
/// dropped or never received a gradient.
#[derive(Debug, Clone)]
pub(crate) struct OutputSlot {
    pub(crate) id: TensorId,
    pub(crate) tensor: WeakTensor,
    pub(crate) shape: Vec<usize>,
    pub(crate) dtype: DType,
}

/// A record of one executed operation.
#[derive(Debug)]
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) op: Box<dyn Operation>,
    /// Strong handles: the backward rule needs the forward inputs.
    pub(crate) inputs: Vec<Tensor>,
    pub(crate) outputs: Vec<OutputSlot>,
    pub(crate) rank: usize,
    pub(crate) backend: Backend,
}

impl Node {
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// `1 + max(rank(input))`.
    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn name(&self) -> &'static str {
        self.op.name()
    }

    pub fn label(&self) -> String {
        self.op.label()
    }

    pub fn kind(&self) -> OpKind {
        self.op.kind()
    }

    pub fn is_split(&self) -> bool {
        self.op.kind() == OpKind::Split
    }

    /// The backend resolved for this node when it was created.
    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub fn inputs(&self) -> &[Tensor] {
        &self.inputs
    }

    pub fn output_ids(&self) -> Vec<TensorId> {
        self.outputs.iter().map(|slot| slot.id).collect()
    }

    /// Outputs that are still alive, in order; `None` for dropped ones.
    pub fn outputs(&self) -> Vec<Option<Tensor>> {
        self.outputs.iter().map(|slot| slot.tensor.upgrade()).collect()
    }

    pub(crate) fn has_live_output(&self) -> bool {
        self.outputs.iter().any(|slot| slot.tensor.is_alive())
    }
}
