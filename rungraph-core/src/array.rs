//! The numeric payload carried by tensors and gradients.
//!
//! `NdArray` is a plain value: a row-major [`Buffer`] plus its shape. It knows
//! nothing about graphs. Operation kernels and the backward scheduler combine
//! arrays through the methods below, always passing the [`Backend`] that was
//! resolved for the node they are working on.

use crate::backend::Backend;
use crate::buffer::Buffer;
use crate::error::RunGraphError;
use crate::types::DType;
use rand::Rng;
use rand_distr::StandardNormal;

/// An N-dimensional array: shape plus typed row-major storage.
#[derive(Debug, Clone, PartialEq)]
pub struct NdArray {
    shape: Vec<usize>,
    buffer: Buffer,
}

fn check_len(data_len: usize, shape: &[usize]) -> Result<(), RunGraphError> {
    let numel: usize = shape.iter().product();
    if data_len != numel {
        return Err(RunGraphError::TensorCreationError {
            data_len,
            shape: shape.to_vec(),
        });
    }
    Ok(())
}

impl NdArray {
    /// Wraps an existing buffer. Fails if its length does not match `shape`.
    pub fn from_buffer(buffer: Buffer, shape: Vec<usize>) -> Result<Self, RunGraphError> {
        check_len(buffer.len(), &shape)?;
        Ok(NdArray { shape, buffer })
    }

    pub fn from_vec_f32(data: Vec<f32>, shape: Vec<usize>) -> Result<Self, RunGraphError> {
        Self::from_buffer(Buffer::F32(data), shape)
    }

    pub fn from_vec_f64(data: Vec<f64>, shape: Vec<usize>) -> Result<Self, RunGraphError> {
        Self::from_buffer(Buffer::F64(data), shape)
    }

    pub fn from_vec_i64(data: Vec<i64>, shape: Vec<usize>) -> Result<Self, RunGraphError> {
        Self::from_buffer(Buffer::I64(data), shape)
    }

    /// A 0-dimensional array holding `value`.
    pub fn scalar(value: f64, dtype: DType) -> Self {
        NdArray {
            shape: vec![],
            buffer: Buffer::filled(dtype, 1, value),
        }
    }

    pub fn full(shape: &[usize], value: f64, dtype: DType) -> Self {
        let numel = shape.iter().product();
        NdArray {
            shape: shape.to_vec(),
            buffer: Buffer::filled(dtype, numel, value),
        }
    }

    pub fn zeros(shape: &[usize], dtype: DType) -> Self {
        Self::full(shape, 0.0, dtype)
    }

    pub fn ones(shape: &[usize], dtype: DType) -> Self {
        Self::full(shape, 1.0, dtype)
    }

    pub fn zeros_like(other: &NdArray) -> Self {
        Self::zeros(&other.shape, other.dtype())
    }

    pub fn ones_like(other: &NdArray) -> Self {
        Self::ones(&other.shape, other.dtype())
    }

    /// Samples every element from the standard normal distribution.
    pub fn randn<R: Rng>(
        shape: &[usize],
        dtype: DType,
        rng: &mut R,
    ) -> Result<Self, RunGraphError> {
        let numel: usize = shape.iter().product();
        let buffer = match dtype {
            DType::F32 => Buffer::F32((0..numel).map(|_| rng.sample(StandardNormal)).collect()),
            DType::F64 => Buffer::F64((0..numel).map(|_| rng.sample(StandardNormal)).collect()),
            DType::I64 => {
                return Err(RunGraphError::UnsupportedType {
                    dtype,
                    operation: "randn".to_string(),
                })
            }
        };
        Ok(NdArray {
            shape: shape.to_vec(),
            buffer,
        })
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn dtype(&self) -> DType {
        self.buffer.dtype()
    }

    pub fn numel(&self) -> usize {
        self.buffer.len()
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub(crate) fn buffer_mut(&mut self) -> &mut Buffer {
        &mut self.buffer
    }

    pub fn to_f64_vec(&self) -> Vec<f64> {
        self.buffer.to_f64_vec()
    }

    /// Returns the single element of a one-element array, widened to f64.
    pub fn item(&self) -> Result<f64, RunGraphError> {
        if self.numel() != 1 {
            return Err(RunGraphError::ShapeMismatch {
                expected: vec![],
                actual: self.shape.clone(),
                operation: "item".to_string(),
            });
        }
        self.buffer
            .get_f64(0)
            .ok_or_else(|| RunGraphError::InternalError("one-element buffer is empty".to_string()))
    }

    /// Same data, new shape with the same number of elements.
    pub fn reshape(&self, shape: &[usize]) -> Result<NdArray, RunGraphError> {
        let numel: usize = shape.iter().product();
        if numel != self.numel() {
            return Err(RunGraphError::ShapeMismatch {
                expected: self.shape.clone(),
                actual: shape.to_vec(),
                operation: "reshape".to_string(),
            });
        }
        Ok(NdArray {
            shape: shape.to_vec(),
            buffer: self.buffer.clone(),
        })
    }

    /// Errors with `ShapeMismatch` unless `self` has exactly `expected` as shape.
    pub fn expect_shape(&self, expected: &[usize], operation: &str) -> Result<(), RunGraphError> {
        if self.shape != expected {
            return Err(RunGraphError::ShapeMismatch {
                expected: expected.to_vec(),
                actual: self.shape.clone(),
                operation: operation.to_string(),
            });
        }
        Ok(())
    }

    /// Errors with `DTypeMismatch` unless the element type is `expected`.
    pub fn expect_dtype(&self, expected: DType, operation: &str) -> Result<(), RunGraphError> {
        if self.dtype() != expected {
            return Err(RunGraphError::DTypeMismatch {
                expected,
                actual: self.dtype(),
                operation: operation.to_string(),
            });
        }
        Ok(())
    }

    /// Applies an element-wise function, dispatching on the dtype.
    pub fn map<F32Op, F64Op>(
        &self,
        backend: Backend,
        op_f32: F32Op,
        op_f64: F64Op,
        op_name: &str,
    ) -> Result<NdArray, RunGraphError>
    where
        F32Op: Fn(f32) -> f32,
        F64Op: Fn(f64) -> f64,
    {
        let buffer = match &self.buffer {
            Buffer::F32(x) => Buffer::F32(backend.map(x, op_f32)),
            Buffer::F64(x) => Buffer::F64(backend.map(x, op_f64)),
            Buffer::I64(_) => {
                return Err(RunGraphError::UnsupportedType {
                    dtype: DType::I64,
                    operation: op_name.to_string(),
                })
            }
        };
        Ok(NdArray {
            shape: self.shape.clone(),
            buffer,
        })
    }

    /// Combines two arrays of identical shape and dtype element by element.
    pub fn zip<F32Op, F64Op>(
        &self,
        other: &NdArray,
        backend: Backend,
        op_f32: F32Op,
        op_f64: F64Op,
        op_name: &str,
    ) -> Result<NdArray, RunGraphError>
    where
        F32Op: Fn(f32, f32) -> f32,
        F64Op: Fn(f64, f64) -> f64,
    {
        other.expect_shape(&self.shape, op_name)?;
        let buffer = match (&self.buffer, &other.buffer) {
            (Buffer::F32(a), Buffer::F32(b)) => Buffer::F32(backend.zip(a, b, op_f32)),
            (Buffer::F64(a), Buffer::F64(b)) => Buffer::F64(backend.zip(a, b, op_f64)),
            (Buffer::I64(_), _) => {
                return Err(RunGraphError::UnsupportedType {
                    dtype: DType::I64,
                    operation: op_name.to_string(),
                })
            }
            (a, b) => {
                return Err(RunGraphError::DTypeMismatch {
                    expected: a.dtype(),
                    actual: b.dtype(),
                    operation: op_name.to_string(),
                })
            }
        };
        Ok(NdArray {
            shape: self.shape.clone(),
            buffer,
        })
    }

    /// In-place `self += other`. Used for gradient accumulation.
    pub fn accumulate(&mut self, other: &NdArray, backend: Backend) -> Result<(), RunGraphError> {
        other.expect_shape(&self.shape, "accumulate_grad")?;
        match (&mut self.buffer, &other.buffer) {
            (Buffer::F32(acc), Buffer::F32(x)) => backend.accumulate(acc, x),
            (Buffer::F64(acc), Buffer::F64(x)) => backend.accumulate(acc, x),
            (Buffer::I64(_), _) => {
                return Err(RunGraphError::UnsupportedType {
                    dtype: DType::I64,
                    operation: "accumulate_grad".to_string(),
                })
            }
            (acc, x) => {
                return Err(RunGraphError::DTypeMismatch {
                    expected: acc.dtype(),
                    actual: x.dtype(),
                    operation: "accumulate_grad".to_string(),
                })
            }
        }
        Ok(())
    }

    /// Sum of all elements as a 0-dimensional array.
    pub fn sum_all(&self, backend: Backend) -> Result<NdArray, RunGraphError> {
        let buffer = match &self.buffer {
            Buffer::F32(x) => Buffer::F32(vec![backend.sum(x)]),
            Buffer::F64(x) => Buffer::F64(vec![backend.sum(x)]),
            Buffer::I64(_) => {
                return Err(RunGraphError::UnsupportedType {
                    dtype: DType::I64,
                    operation: "sum".to_string(),
                })
            }
        };
        Ok(NdArray {
            shape: vec![],
            buffer,
        })
    }

    /// 2-D matrix product `(m, k) x (k, n) -> (m, n)`.
    pub fn matmul(&self, other: &NdArray, backend: Backend) -> Result<NdArray, RunGraphError> {
        let (m, k, n) = match (self.shape.as_slice(), other.shape.as_slice()) {
            ([m, k], [k2, n]) if k == k2 => (*m, *k, *n),
            _ => {
                return Err(RunGraphError::ShapeMismatch {
                    expected: self.shape.clone(),
                    actual: other.shape.clone(),
                    operation: "matmul".to_string(),
                })
            }
        };
        let buffer = match (&self.buffer, &other.buffer) {
            (Buffer::F32(a), Buffer::F32(b)) => Buffer::F32(backend.matmul(a, b, m, k, n)),
            (Buffer::F64(a), Buffer::F64(b)) => Buffer::F64(backend.matmul(a, b, m, k, n)),
            (Buffer::I64(_), _) => {
                return Err(RunGraphError::UnsupportedType {
                    dtype: DType::I64,
                    operation: "matmul".to_string(),
                })
            }
            (a, b) => {
                return Err(RunGraphError::DTypeMismatch {
                    expected: a.dtype(),
                    actual: b.dtype(),
                    operation: "matmul".to_string(),
                })
            }
        };
        Ok(NdArray {
            shape: vec![m, n],
            buffer,
        })
    }

    /// Transpose of a 2-D array.
    pub fn transpose_2d(&self) -> Result<NdArray, RunGraphError> {
        let (rows, cols) = match self.shape.as_slice() {
            [r, c] => (*r, *c),
            _ => {
                return Err(RunGraphError::ShapeMismatch {
                    expected: vec![0, 0],
                    actual: self.shape.clone(),
                    operation: "transpose_2d".to_string(),
                })
            }
        };
        fn transpose<T: Copy>(x: &[T], rows: usize, cols: usize) -> Vec<T> {
            let mut out = Vec::with_capacity(x.len());
            for c in 0..cols {
                for r in 0..rows {
                    out.push(x[r * cols + c]);
                }
            }
            out
        }
        let buffer = match &self.buffer {
            Buffer::F32(x) => Buffer::F32(transpose(x, rows, cols)),
            Buffer::F64(x) => Buffer::F64(transpose(x, rows, cols)),
            Buffer::I64(x) => Buffer::I64(transpose(x, rows, cols)),
        };
        Ok(NdArray {
            shape: vec![cols, rows],
            buffer,
        })
    }

    /// Concatenates arrays along the first axis. All trailing dims and the
    /// dtype must agree.
    pub fn concat_axis0(arrays: &[&NdArray]) -> Result<NdArray, RunGraphError> {
        let first = arrays.first().ok_or_else(|| RunGraphError::ArityMismatch {
            expected: 1,
            actual: 0,
            operation: "concat".to_string(),
        })?;
        if first.ndim() == 0 {
            return Err(RunGraphError::ShapeMismatch {
                expected: vec![1],
                actual: vec![],
                operation: "concat".to_string(),
            });
        }
        let tail = &first.shape[1..];
        let mut rows = 0;
        for a in arrays {
            a.expect_dtype(first.dtype(), "concat")?;
            if a.ndim() != first.ndim() || &a.shape[1..] != tail {
                return Err(RunGraphError::ShapeMismatch {
                    expected: first.shape.clone(),
                    actual: a.shape.clone(),
                    operation: "concat".to_string(),
                });
            }
            rows += a.shape[0];
        }
        let buffer = match first.dtype() {
            DType::F32 => {
                let mut out = Vec::new();
                for a in arrays {
                    out.extend_from_slice(a.buffer.try_as_f32()?);
                }
                Buffer::F32(out)
            }
            DType::F64 => {
                let mut out = Vec::new();
                for a in arrays {
                    out.extend_from_slice(a.buffer.try_as_f64()?);
                }
                Buffer::F64(out)
            }
            DType::I64 => {
                let mut out = Vec::new();
                for a in arrays {
                    if let Buffer::I64(v) = &a.buffer {
                        out.extend_from_slice(v);
                    }
                }
                Buffer::I64(out)
            }
        };
        let mut shape = vec![rows];
        shape.extend_from_slice(tail);
        Ok(NdArray { shape, buffer })
    }

    /// Rows `start..end` along the first axis.
    pub fn slice_axis0(&self, start: usize, end: usize) -> Result<NdArray, RunGraphError> {
        if self.ndim() == 0 || start > end || end > self.shape[0] {
            return Err(RunGraphError::ShapeMismatch {
                expected: self.shape.clone(),
                actual: vec![start, end],
                operation: "slice_axis0".to_string(),
            });
        }
        let row: usize = self.shape[1..].iter().product();
        let range = start * row..end * row;
        let buffer = match &self.buffer {
            Buffer::F32(x) => Buffer::F32(x[range].to_vec()),
            Buffer::F64(x) => Buffer::F64(x[range].to_vec()),
            Buffer::I64(x) => Buffer::I64(x[range].to_vec()),
        };
        let mut shape = self.shape.clone();
        shape[0] = end - start;
        Ok(NdArray { shape, buffer })
    }
}

#[cfg(test)]
#[path = "array_test.rs"]
mod tests;
