use rungraph_core::{NdArray, Tensor};

// Shared by several integration test binaries; not every helper is used by each.
#[allow(dead_code)]
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// An f64 leaf that requires grad.
#[allow(dead_code)]
pub fn leaf_f64(data: Vec<f64>, shape: Vec<usize>) -> Tensor {
    let t = Tensor::new_f64(data, shape).expect("Test tensor creation failed");
    t.requires_grad_(true).expect("f64 tensors can require grad");
    t
}

/// An f32 leaf that requires grad.
#[allow(dead_code)]
pub fn leaf_f32(data: Vec<f32>, shape: Vec<usize>) -> Tensor {
    let t = Tensor::new(data, shape).expect("Test tensor creation failed");
    t.requires_grad_(true).expect("f32 tensors can require grad");
    t
}

#[allow(dead_code)]
pub fn grad_vec(t: &Tensor) -> Vec<f64> {
    t.grad()
        .map(|g: NdArray| g.to_f64_vec())
        .expect("Tensor has no gradient")
}
