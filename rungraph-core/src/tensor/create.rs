use crate::array::NdArray;
use crate::error::RunGraphError;
use crate::tensor::Tensor;
use crate::types::DType;
use rand::Rng;

impl Tensor {
    /// Creates a new leaf tensor with the given f32 data and shape.
    pub fn new(data_vec: Vec<f32>, shape: Vec<usize>) -> Result<Self, RunGraphError> {
        Ok(Tensor::from_array(NdArray::from_vec_f32(data_vec, shape)?))
    }

    /// Creates a new leaf tensor with the given f64 data and shape.
    pub fn new_f64(data_vec: Vec<f64>, shape: Vec<usize>) -> Result<Self, RunGraphError> {
        Ok(Tensor::from_array(NdArray::from_vec_f64(data_vec, shape)?))
    }

    /// Creates a new leaf tensor with the given i64 data and shape.
    /// Integer tensors can feed operations that accept them but never carry gradients.
    pub fn new_i64(data_vec: Vec<i64>, shape: Vec<usize>) -> Result<Self, RunGraphError> {
        Ok(Tensor::from_array(NdArray::from_vec_i64(data_vec, shape)?))
    }

    /// A 0-dimensional f32 tensor.
    pub fn scalar(value: f32) -> Self {
        Tensor::from_array(NdArray::scalar(value as f64, DType::F32))
    }

    /// A 0-dimensional f64 tensor.
    pub fn scalar_f64(value: f64) -> Self {
        Tensor::from_array(NdArray::scalar(value, DType::F64))
    }
}

/// Creates a new f32 tensor filled with zeros.
pub fn zeros(shape: &[usize]) -> Tensor {
    Tensor::from_array(NdArray::zeros(shape, DType::F32))
}

/// Creates a new f32 tensor filled with ones.
pub fn ones(shape: &[usize]) -> Tensor {
    Tensor::from_array(NdArray::ones(shape, DType::F32))
}

/// Creates a new tensor filled with `value`, in the requested dtype.
pub fn full(shape: &[usize], value: f64, dtype: DType) -> Tensor {
    Tensor::from_array(NdArray::full(shape, value, dtype))
}

/// Zeros with the shape and dtype of `tensor`.
pub fn zeros_like(tensor: &Tensor) -> Tensor {
    Tensor::from_array(NdArray::zeros_like(&tensor.read_data().array))
}

/// Ones with the shape and dtype of `tensor`.
pub fn ones_like(tensor: &Tensor) -> Tensor {
    Tensor::from_array(NdArray::ones_like(&tensor.read_data().array))
}

/// Standard-normal samples in the requested float dtype.
pub fn randn<R: Rng>(shape: &[usize], dtype: DType, rng: &mut R) -> Result<Tensor, RunGraphError> {
    Ok(Tensor::from_array(NdArray::randn(shape, dtype, rng)?))
}
