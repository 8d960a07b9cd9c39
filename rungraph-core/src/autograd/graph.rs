//! The graph builder.
//!
//! A [`Graph`] is an arena of [`Node`]s plus an index from tensor identity to
//! the node that produced the tensor. Ownership only ever points backward:
//! nodes hold strong handles to their inputs and weak handles to their
//! outputs, and tensors hold no reference to their creator at all.

use crate::array::NdArray;
use crate::autograd::node::{Node, NodeId, OutputSlot};
use crate::autograd::operation::Operation;
use crate::config::GraphConfig;
use crate::error::RunGraphError;
use crate::tensor::{Tensor, TensorId};
use crate::tensor_data::TensorData;
use std::cell::Ref;
use std::collections::{HashMap, HashSet};

/// A dynamically built computation graph.
///
/// Single-threaded: build independent graphs for independent forward passes.
#[derive(Debug, Default)]
pub struct Graph {
    config: GraphConfig,
    pub(crate) nodes: HashMap<NodeId, Node>,
    /// Creator index: output tensor → producing node.
    pub(crate) creators: HashMap<TensorId, NodeId>,
    next_node: usize,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: GraphConfig) -> Self {
        Graph {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Turns node recording on or off for subsequent forward calls.
    pub fn set_enable_backprop(&mut self, enable_backprop: bool) {
        self.config.enable_backprop = enable_backprop;
    }

    /// Number of nodes currently recorded.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Iterates over the recorded nodes in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        let mut nodes: Vec<&Node> = self.nodes.values().collect();
        nodes.sort_by_key(|node| node.id);
        nodes.into_iter()
    }

    /// The node that produced `tensor`, if it is recorded in this graph.
    pub fn creator_of(&self, tensor: &Tensor) -> Option<NodeId> {
        self.creators.get(&tensor.id()).copied()
    }

    pub(crate) fn creator_node(&self, tensor: &Tensor) -> Option<&Node> {
        self.creator_of(tensor).and_then(|id| self.nodes.get(&id))
    }

    /// True if `tensor` has no creator in this graph.
    pub fn is_leaf(&self, tensor: &Tensor) -> bool {
        self.creator_of(tensor).is_none()
    }

    /// Runs `op` on `inputs` and records the node.
    ///
    /// Node creation is all-or-nothing: validation and forward run before
    /// anything is recorded, so an error leaves the graph untouched. When no
    /// input requires grad (or backprop is disabled) the outputs are returned
    /// as plain leaves and no node is recorded.
    pub fn apply<O: Operation + 'static>(
        &mut self,
        op: O,
        inputs: &[&Tensor],
    ) -> Result<Vec<Tensor>, RunGraphError> {
        if inputs.is_empty() {
            return Err(RunGraphError::ArityMismatch {
                expected: 1,
                actual: 0,
                operation: op.name().to_string(),
            });
        }

        let (arrays_out, backend) = {
            let guards: Vec<Ref<'_, TensorData>> = inputs.iter().map(|t| t.read_data()).collect();
            let arrays: Vec<&NdArray> = guards.iter().map(|g| &g.array).collect();
            op.check_inputs(&arrays)?;
            let backend = self.config.backend.resolve(arrays[0].dtype());
            (op.forward(&arrays, backend)?, backend)
        };
        if arrays_out.is_empty() {
            return Err(RunGraphError::InternalError(format!(
                "operation {} produced no outputs",
                op.name()
            )));
        }

        let record = self.config.enable_backprop && inputs.iter().any(|t| t.requires_grad());
        if !record {
            return Ok(arrays_out.into_iter().map(Tensor::from_array).collect());
        }

        let rank = 1 + inputs.iter().map(|t| t.rank()).max().unwrap_or(0);
        let id = NodeId(self.next_node);
        self.next_node += 1;

        let outputs: Vec<Tensor> = arrays_out
            .into_iter()
            .map(|array| {
                let out = Tensor::from_array(array);
                {
                    let mut guard = out.write_data();
                    guard.requires_grad = true;
                    guard.rank = rank;
                }
                out
            })
            .collect();

        let slots = outputs
            .iter()
            .map(|t| {
                let guard = t.read_data();
                OutputSlot {
                    id: guard.id,
                    tensor: t.downgrade(),
                    shape: guard.array.shape().to_vec(),
                    dtype: guard.array.dtype(),
                }
            })
            .collect();
        for t in &outputs {
            self.creators.insert(t.id(), id);
        }

        log::debug!(
            "Recorded node {} ({}) rank {} with {} inputs, {} outputs, backend {:?}",
            id,
            op.name(),
            rank,
            inputs.len(),
            outputs.len(),
            backend
        );

        self.nodes.insert(
            id,
            Node {
                id,
                op: Box::new(op),
                inputs: inputs.iter().map(|t| (*t).clone()).collect(),
                outputs: slots,
                rank,
                backend,
            },
        );
        Ok(outputs)
    }

    /// Detaches `tensor` from its creator. The tensor becomes a rank-0 leaf and
    /// backward passes through it stop there.
    pub fn unchain(&mut self, tensor: &Tensor) {
        let tid = tensor.id();
        if let Some(node_id) = self.creators.remove(&tid) {
            if let Some(node) = self.nodes.get_mut(&node_id) {
                for slot in node.outputs.iter_mut().filter(|slot| slot.id == tid) {
                    slot.tensor = Default::default();
                }
            }
            tensor.write_data().rank = 0;
            log::debug!("Unchained {} from node {}", tid, node_id);
        }
    }

    /// Releases every node reachable backward from `tensor`, including its
    /// creator. Tensors that are still referenced elsewhere survive as leaves.
    pub fn unchain_backward(&mut self, tensor: &Tensor) {
        let mut stack: Vec<NodeId> = self.creator_of(tensor).into_iter().collect();
        let mut seen = HashSet::new();
        let mut released = 0;
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                continue;
            }
            if let Some(node) = self.release_node(id) {
                released += 1;
                for input in &node.inputs {
                    if let Some(creator) = self.creator_of(input) {
                        stack.push(creator);
                    }
                }
            }
        }
        log::debug!("unchain_backward from {} released {} nodes", tensor.id(), released);
    }

    /// Drops nodes none of whose outputs are alive any more. Dropping a node
    /// releases its inputs, which may in turn orphan upstream nodes, so this
    /// repeats until nothing changes. Returns the number of nodes removed.
    pub fn prune(&mut self) -> usize {
        let mut removed = 0;
        loop {
            let dead: Vec<NodeId> = self
                .nodes
                .values()
                .filter(|node| !node.has_live_output())
                .map(|node| node.id)
                .collect();
            if dead.is_empty() {
                break;
            }
            for id in dead {
                if self.release_node(id).is_some() {
                    removed += 1;
                }
            }
        }
        if removed > 0 {
            log::debug!("Pruned {} unreachable nodes", removed);
        }
        removed
    }

    /// Releases the whole graph. Every surviving output becomes a leaf.
    pub fn clear(&mut self) {
        let ids: Vec<NodeId> = self.nodes.keys().copied().collect();
        for id in ids {
            self.release_node(id);
        }
    }

    /// Removes a node, its creator-index entries, and turns its surviving
    /// outputs into rank-0 leaves. Returns the node so callers can walk its
    /// inputs before they are dropped.
    pub(crate) fn release_node(&mut self, id: NodeId) -> Option<Node> {
        let node = self.nodes.remove(&id)?;
        for slot in &node.outputs {
            if self.creators.get(&slot.id) == Some(&id) {
                self.creators.remove(&slot.id);
            }
            if let Some(out) = slot.tensor.upgrade() {
                out.write_data().rank = 0;
            }
        }
        log::trace!("Released node {} ({})", id, node.op.name());
        Some(node)
    }
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod tests;
