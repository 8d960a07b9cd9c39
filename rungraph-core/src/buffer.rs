use crate::error::RunGraphError;
use crate::types::DType;

/// Typed, flat, row-major storage for an array's elements.
#[derive(Debug, Clone, PartialEq)]
pub enum Buffer {
    /// Buffer holding f32 data.
    F32(Vec<f32>),
    /// Buffer holding f64 data.
    F64(Vec<f64>),
    /// Buffer holding i64 data.
    I64(Vec<i64>),
}

impl Buffer {
    /// The element type stored in this buffer.
    pub fn dtype(&self) -> DType {
        match self {
            Buffer::F32(_) => DType::F32,
            Buffer::F64(_) => DType::F64,
            Buffer::I64(_) => DType::I64,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Buffer::F32(v) => v.len(),
            Buffer::F64(v) => v.len(),
            Buffer::I64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A buffer of `len` copies of `value`, converted to `dtype`.
    pub fn filled(dtype: DType, len: usize, value: f64) -> Self {
        match dtype {
            DType::F32 => Buffer::F32(vec![value as f32; len]),
            DType::F64 => Buffer::F64(vec![value; len]),
            DType::I64 => Buffer::I64(vec![value as i64; len]),
        }
    }

    /// Attempts to borrow the data as `&[f32]`.
    pub fn try_as_f32(&self) -> Result<&[f32], RunGraphError> {
        match self {
            Buffer::F32(v) => Ok(v),
            other => Err(RunGraphError::DTypeMismatch {
                expected: DType::F32,
                actual: other.dtype(),
                operation: "try_as_f32".to_string(),
            }),
        }
    }

    /// Attempts to borrow the data as `&[f64]`.
    pub fn try_as_f64(&self) -> Result<&[f64], RunGraphError> {
        match self {
            Buffer::F64(v) => Ok(v),
            other => Err(RunGraphError::DTypeMismatch {
                expected: DType::F64,
                actual: other.dtype(),
                operation: "try_as_f64".to_string(),
            }),
        }
    }

    /// Reads element `index` widened to f64.
    pub fn get_f64(&self, index: usize) -> Option<f64> {
        match self {
            Buffer::F32(v) => v.get(index).map(|&x| x as f64),
            Buffer::F64(v) => v.get(index).copied(),
            Buffer::I64(v) => v.get(index).map(|&x| x as f64),
        }
    }

    /// Overwrites element `index` with `value` narrowed to the buffer's type.
    /// Returns `false` if the index is out of range.
    pub fn set_f64(&mut self, index: usize, value: f64) -> bool {
        match self {
            Buffer::F32(v) => v.get_mut(index).map(|x| *x = value as f32).is_some(),
            Buffer::F64(v) => v.get_mut(index).map(|x| *x = value).is_some(),
            Buffer::I64(v) => v.get_mut(index).map(|x| *x = value as i64).is_some(),
        }
    }

    /// Copies every element widened to f64.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        match self {
            Buffer::F32(v) => v.iter().map(|&x| x as f64).collect(),
            Buffer::F64(v) => v.clone(),
            Buffer::I64(v) => v.iter().map(|&x| x as f64).collect(),
        }
    }
}
