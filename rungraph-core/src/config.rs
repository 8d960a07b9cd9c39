use crate::backend::Backend;

/// Construction-time settings of a [`Graph`](crate::autograd::graph::Graph).
///
/// Everything an operation needs to know about its environment flows from
/// here; there is no process-wide switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphConfig {
    /// Preferred kernel backend. Resolved per node against the input dtype.
    pub backend: Backend,
    /// When false, forward calls compute outputs but record no nodes.
    pub enable_backprop: bool,
    /// Default for [`BackwardOptions::retain_graph`].
    pub retain_graph: bool,
    /// Default for [`BackwardOptions::remove_split`].
    pub remove_split: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        GraphConfig {
            backend: Backend::default(),
            enable_backprop: true,
            retain_graph: false,
            remove_split: false,
        }
    }
}

impl GraphConfig {
    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_enable_backprop(mut self, enable_backprop: bool) -> Self {
        self.enable_backprop = enable_backprop;
        self
    }

    pub fn with_retain_graph(mut self, retain_graph: bool) -> Self {
        self.retain_graph = retain_graph;
        self
    }

    pub fn with_remove_split(mut self, remove_split: bool) -> Self {
        self.remove_split = remove_split;
        self
    }

    /// The backward options implied by this configuration.
    pub fn backward_options(&self) -> BackwardOptions {
        BackwardOptions {
            retain_graph: self.retain_graph,
            remove_split: self.remove_split,
        }
    }
}

/// Per-call options of the backward pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BackwardOptions {
    /// Keep node inputs and outputs after their backward rule fires so the
    /// graph can be differentiated again.
    pub retain_graph: bool,
    /// Route gradients through split nodes directly to the split's input.
    pub remove_split: bool,
}

impl BackwardOptions {
    pub fn retain_graph(mut self, retain_graph: bool) -> Self {
        self.retain_graph = retain_graph;
        self
    }

    pub fn remove_split(mut self, remove_split: bool) -> Self {
        self.remove_split = remove_split;
        self
    }
}
