//! # Kernel backends
//!
//! Operations never pick their numeric path from process-wide state. A
//! [`Backend`] value is chosen in [`GraphConfig`](crate::config::GraphConfig),
//! resolved against the dtype of the inputs when a node is created, stored on
//! that node and handed explicitly to the operation's `forward` and `backward`
//! as well as to gradient accumulation.
//!
//! - [`Backend::Generic`]: straightforward scalar loops. Supports every float dtype.
//! - [`Backend::Vectorized`]: fixed-width lane kernels. Only `F32` is supported;
//!   anything else falls back to `Generic` in [`Backend::resolve`].

use crate::types::DType;
use num_traits::Float;
use std::fmt::Debug;

mod generic;
mod vectorized;

/// Element types the kernels can operate on.
pub trait Element: Float + Debug + Default + Send + Sync + 'static {}

impl<T: Float + Debug + Default + Send + Sync + 'static> Element for T {}

/// Kernel backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Backend {
    /// Portable scalar loops.
    Generic,
    /// Lane-chunked kernels for `F32` data.
    #[default]
    Vectorized,
}

impl Backend {
    /// Returns true if this backend has kernels for `dtype`.
    pub fn supports(&self, dtype: DType) -> bool {
        match self {
            Backend::Generic => dtype.is_float(),
            Backend::Vectorized => dtype == DType::F32,
        }
    }

    /// Applies the fallback policy: the preferred backend if it supports
    /// `dtype`, otherwise `Generic`.
    pub fn resolve(self, dtype: DType) -> Backend {
        if self.supports(dtype) {
            self
        } else {
            if self != Backend::Generic {
                log::debug!(
                    "Backend {:?} does not support {:?}, falling back to Generic",
                    self,
                    dtype
                );
            }
            Backend::Generic
        }
    }

    pub(crate) fn map<T: Element, F: Fn(T) -> T>(self, x: &[T], f: F) -> Vec<T> {
        match self {
            Backend::Generic => generic::map(x, f),
            Backend::Vectorized => vectorized::map(x, f),
        }
    }

    pub(crate) fn zip<T: Element, F: Fn(T, T) -> T>(self, a: &[T], b: &[T], f: F) -> Vec<T> {
        match self {
            Backend::Generic => generic::zip(a, b, f),
            Backend::Vectorized => vectorized::zip(a, b, f),
        }
    }

    /// `acc[i] += x[i]` for every element.
    pub(crate) fn accumulate<T: Element>(self, acc: &mut [T], x: &[T]) {
        match self {
            Backend::Generic => generic::accumulate(acc, x),
            Backend::Vectorized => vectorized::accumulate(acc, x),
        }
    }

    pub(crate) fn sum<T: Element>(self, x: &[T]) -> T {
        match self {
            Backend::Generic => generic::sum(x),
            Backend::Vectorized => vectorized::sum(x),
        }
    }

    /// Row-major `(m, k) x (k, n)` product.
    pub(crate) fn matmul<T: Element>(self, a: &[T], b: &[T], m: usize, k: usize, n: usize) -> Vec<T> {
        match self {
            Backend::Generic => generic::matmul(a, b, m, k, n),
            Backend::Vectorized => vectorized::matmul(a, b, m, k, n),
        }
    }
}

#[cfg(test)]
#[path = "backend_test.rs"]
mod tests;
