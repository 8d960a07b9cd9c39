//! The backward scheduler.
//!
//! Starting from the creators of the requested outputs, nodes are popped from
//! a [`RankQueue`] deepest first. A node's output gradients are complete when
//! it pops: every consumer of its outputs has a strictly greater rank and has
//! therefore already fired and summed its contribution.

use crate::array::NdArray;
use crate::autograd::graph::Graph;
use crate::autograd::node::{Node, NodeId};
use crate::autograd::queue::RankQueue;
use crate::config::BackwardOptions;
use crate::error::RunGraphError;
use crate::tensor::{Tensor, TensorId};
use crate::tensor_data::TensorData;
use std::cell::Ref;
use std::collections::HashSet;

/// One node popped by the scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeVisit {
    pub node: NodeId,
    pub rank: usize,
    pub name: &'static str,
    /// True if the node was a split bypassed without running its rule.
    pub elided: bool,
}

/// What a backward pass did, in visit order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackwardReport {
    pub visited: Vec<NodeVisit>,
}

impl BackwardReport {
    pub fn visited_ranks(&self) -> Vec<usize> {
        self.visited.iter().map(|v| v.rank).collect()
    }

    pub fn visited_nodes(&self) -> Vec<NodeId> {
        self.visited.iter().map(|v| v.node).collect()
    }
}

/// Bookkeeping for a single traversal.
struct Pass {
    options: BackwardOptions,
    queue: RankQueue<NodeId>,
    scheduled: HashSet<NodeId>,
    fired: HashSet<NodeId>,
    /// Tensors that already received a gradient during this pass.
    touched: HashSet<TensorId>,
    /// Gradient targets stay alive until the pass ends even if releasing a
    /// node dropped the last other handle.
    keep_alive: Vec<Tensor>,
    report: BackwardReport,
}

impl Pass {
    fn new(options: BackwardOptions) -> Self {
        Pass {
            options,
            queue: RankQueue::new(),
            scheduled: HashSet::new(),
            fired: HashSet::new(),
            touched: HashSet::new(),
            keep_alive: Vec::new(),
            report: BackwardReport::default(),
        }
    }

    fn schedule(&mut self, node: NodeId, rank: usize) {
        if self.scheduled.insert(node) {
            self.queue.push(rank, node);
        }
    }
}

impl Graph {
    /// Backpropagates from a single output with the graph's default options.
    ///
    /// A scalar (one-element) output without a gradient is seeded with one.
    pub fn backward(&mut self, output: &Tensor) -> Result<BackwardReport, RunGraphError> {
        let options = self.config().backward_options();
        self.backward_with(&[output], options)
    }

    /// Backpropagates from several outputs at once.
    ///
    /// Each output uses its current gradient as seed. Outputs without one get
    /// a unit gradient if they hold a single element; otherwise the call fails
    /// with `ShapeMismatch` before any gradient is written.
    ///
    /// Leaves accumulate across passes. A non-leaf's first contribution within
    /// a pass replaces whatever gradient it held before, so repeated passes
    /// over a retained graph do not double count.
    ///
    /// An error aborts the traversal; gradients summed before the failing node
    /// remain in place.
    pub fn backward_with(
        &mut self,
        outputs: &[&Tensor],
        options: BackwardOptions,
    ) -> Result<BackwardReport, RunGraphError> {
        let mut seeds = Vec::with_capacity(outputs.len());
        for out in outputs {
            let guard = out.read_data();
            if !guard.requires_grad {
                log::warn!(
                    "backward() called on {} which does not require grad; ignoring it",
                    guard.id
                );
                continue;
            }
            let seed = match &guard.grad {
                Some(_) => None,
                None if guard.array.numel() == 1 => Some(NdArray::ones_like(&guard.array)),
                None => {
                    return Err(RunGraphError::ShapeMismatch {
                        expected: vec![],
                        actual: guard.array.shape().to_vec(),
                        operation: "backward (implicit unit gradient needs a scalar output)"
                            .to_string(),
                    })
                }
            };
            seeds.push((*out, seed));
        }

        let mut pass = Pass::new(options);
        for (out, seed) in seeds {
            if let Some(grad) = seed {
                out.write_data().grad = Some(grad);
            }
            pass.touched.insert(out.id());
            if let Some(node) = self.creator_node(out) {
                pass.schedule(node.id, node.rank);
            }
        }

        while let Some((rank, id)) = pass.queue.pop() {
            let node = self.nodes.get(&id).ok_or_else(|| {
                RunGraphError::InternalError(format!("scheduled node {} is not in the graph", id))
            })?;
            if !pass.fired.insert(id) {
                return Err(RunGraphError::GraphCycle {
                    node: id,
                    operation: node.name().to_string(),
                });
            }

            let elided = options.remove_split && node.is_split();
            log::trace!(
                "Backward visit {} ({}) rank {}{}",
                id,
                node.name(),
                rank,
                if elided { " [split elided]" } else { "" }
            );
            if elided {
                self.bypass_split(node, &mut pass)?;
            } else {
                self.fire(node, &mut pass)?;
            }
            pass.report.visited.push(NodeVisit {
                node: id,
                rank,
                name: node.name(),
                elided,
            });

            if !options.retain_graph {
                self.release_node(id);
            }
        }

        log::debug!(
            "Backward pass visited {} nodes, touched {} tensors",
            pass.report.visited.len(),
            pass.touched.len()
        );
        Ok(pass.report)
    }

    /// Runs the node's backward rule and distributes the input gradients.
    fn fire(&self, node: &Node, pass: &mut Pass) -> Result<(), RunGraphError> {
        let grad_outputs: Vec<NdArray> = node
            .outputs
            .iter()
            .map(|slot| {
                // Gradients left on outputs by an earlier pass do not count.
                slot.tensor
                    .upgrade()
                    .filter(|_| pass.touched.contains(&slot.id))
                    .and_then(|t| t.grad())
                    .unwrap_or_else(|| NdArray::zeros(&slot.shape, slot.dtype))
            })
            .collect();

        let grads = {
            let guards: Vec<Ref<'_, TensorData>> = node.inputs.iter().map(|t| t.read_data()).collect();
            let xs: Vec<&NdArray> = guards.iter().map(|g| &g.array).collect();
            let gys: Vec<&NdArray> = grad_outputs.iter().collect();
            node.op
                .backward(&xs, &gys, node.backend)
                .map_err(|e| e.at_node(node.id, node.name()))?
        };
        check_input_grads(node, &grads)?;

        for (input, grad) in node.inputs.iter().zip(grads.iter()) {
            self.deliver(node, input, grad, pass)?;
        }
        Ok(())
    }

    /// Elided split: the sum of the gradients its outputs received in this
    /// pass goes straight to its input; the split's own rule never runs.
    fn bypass_split(&self, node: &Node, pass: &mut Pass) -> Result<(), RunGraphError> {
        let input = node.inputs.first().ok_or_else(|| {
            RunGraphError::InternalError(format!("split node {} has no input", node.id))
        })?;
        let mut grads = node
            .outputs
            .iter()
            .filter(|slot| pass.touched.contains(&slot.id))
            .filter_map(|slot| slot.tensor.upgrade())
            .filter_map(|t| t.grad());
        let Some(mut total) = grads.next() else {
            return Ok(());
        };
        let backend = self.config().backend.resolve(total.dtype());
        for g in grads {
            total
                .accumulate(&g, backend)
                .map_err(|e| e.at_node(node.id, node.name()))?;
        }
        self.deliver(node, input, &total, pass)
    }

    /// Adds `grad` to `input` (or, under split elision, to the tensor the
    /// split chain ultimately reads) and schedules its creator.
    fn deliver(
        &self,
        consumer: &Node,
        input: &Tensor,
        grad: &NdArray,
        pass: &mut Pass,
    ) -> Result<(), RunGraphError> {
        let target = if pass.options.remove_split {
            self.skip_splits(input)
        } else {
            input.clone()
        };
        if !target.requires_grad() {
            return Ok(());
        }

        let producer = self.creator_node(&target);
        if let Some(producer) = producer {
            if producer.rank >= consumer.rank {
                return Err(RunGraphError::GraphCycle {
                    node: producer.id,
                    operation: producer.name().to_string(),
                });
            }
        }

        let tid = target.id();
        let first_contribution = pass.touched.insert(tid);
        let overwrite = first_contribution && producer.is_some();
        let backend = self.config().backend.resolve(grad.dtype());
        log::trace!(
            "{} -> {}: {} gradient {:?}",
            consumer.id,
            tid,
            if overwrite { "set" } else { "accumulate" },
            grad.shape()
        );
        target
            .accumulate_grad(grad, backend, overwrite)
            .map_err(|e| e.at_node(consumer.id, consumer.name()))?;

        if let Some(producer) = producer {
            pass.schedule(producer.id, producer.rank);
        }
        pass.keep_alive.push(target);
        Ok(())
    }

    /// Follows creator links through split nodes to the first non-split tensor.
    pub(crate) fn skip_splits(&self, tensor: &Tensor) -> Tensor {
        let mut current = tensor.clone();
        while let Some(node) = self.creator_node(&current) {
            if !node.is_split() {
                break;
            }
            match node.inputs.first() {
                Some(input) => current = input.clone(),
                None => break,
            }
        }
        current
    }
}

/// One gradient per input, each with the input's shape and dtype.
fn check_input_grads(node: &Node, grads: &[NdArray]) -> Result<(), RunGraphError> {
    if grads.len() != node.inputs.len() {
        return Err(RunGraphError::ArityMismatch {
            expected: node.inputs.len(),
            actual: grads.len(),
            operation: "gradient count".to_string(),
        }
        .at_node(node.id, node.name()));
    }
    for (i, (input, grad)) in node.inputs.iter().zip(grads).enumerate() {
        let guard = input.read_data();
        let operation = format!("gradient for input {}", i);
        grad.expect_shape(guard.array.shape(), &operation)
            .and_then(|_| grad.expect_dtype(guard.array.dtype(), &operation))
            .map_err(|e| e.at_node(node.id, node.name()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "backward_test.rs"]
mod tests;
