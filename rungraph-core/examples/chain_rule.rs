//! # Chain Rule Through a Small Regression Step
//!
//! Builds `loss = sum((relu(x·W) + x·W)^2)` on the fly and runs reverse-mode
//! differentiation over the recorded graph.
//!
//! ## Demonstrated features:
//! 1.  **Define-by-run recording**: every `*_op` call appends one node to the `Graph`.
//! 2.  **Backward pass** (`Graph::backward`), with the visit report showing
//!     nodes popped deepest-first.
//! 3.  **Fan-out**: `W` feeds two branches, its gradient is the sum of both.
//! 4.  **Detaching** an intermediate with `Graph::unchain`.
//! 5.  **Retained graphs**: two passes over the same graph with
//!     `retain_graph = true`, gradients accumulating on the leaves.
//!
//! ## Running
//! `RUST_LOG=debug cargo run --example chain_rule`

use rand::rngs::StdRng;
use rand::SeedableRng;
use rungraph_core::ops::activation::relu_op;
use rungraph_core::ops::arithmetic::{add_op, mul_constant_op, pow_constant_op};
use rungraph_core::ops::linalg::matmul_op;
use rungraph_core::ops::reduction::sum_op;
use rungraph_core::tensor::randn;
use rungraph_core::{DType, Graph, GraphConfig, RunGraphError};

fn main() -> Result<(), RunGraphError> {
    env_logger::init();
    let mut rng = StdRng::seed_from_u64(0);

    // --- One pass, graph released afterwards ---
    let mut graph = Graph::new();
    let x = randn(&[4, 3], DType::F32, &mut rng)?.with_name("x");
    let w = randn(&[3, 2], DType::F32, &mut rng)?.with_name("W");
    w.requires_grad_(true)?;

    let h = matmul_op(&mut graph, &x, &w)?;
    let a = relu_op(&mut graph, &h)?;
    let skip = matmul_op(&mut graph, &x, &w)?;
    let z = add_op(&mut graph, &a, &skip)?;
    let sq = pow_constant_op(&mut graph, &z, 2.0)?;
    let loss = sum_op(&mut graph, &sq)?;
    println!("Recorded {} nodes, loss = {:.4}", graph.len(), loss.item()?);

    let report = graph.backward(&loss)?;
    for visit in &report.visited {
        println!("  visited {} ({}) at rank {}", visit.node, visit.name, visit.rank);
    }
    println!("dL/dW = {:?}", w.grad().map(|g| g.to_f64_vec()).unwrap_or_default());
    println!("Nodes left after backward: {}", graph.len());

    // --- Detach an intermediate ---
    let mut graph = Graph::new();
    let t = mul_constant_op(&mut graph, &w, 3.0)?;
    let u = pow_constant_op(&mut graph, &t, 2.0)?;
    let loss = sum_op(&mut graph, &u)?;
    graph.unchain(&t);
    w.clear_grad();
    graph.backward(&loss)?;
    println!(
        "After unchain: W has grad = {}, t has grad = {}",
        w.grad().is_some(),
        t.grad().is_some()
    );

    // --- Retained graph, two passes ---
    let mut graph = Graph::with_config(GraphConfig::default().with_retain_graph(true));
    w.clear_grad();
    let y = mul_constant_op(&mut graph, &w, 2.0)?;
    let loss = sum_op(&mut graph, &y)?;
    for pass in 1..=2 {
        graph.backward(&loss)?;
        let grad = w.grad().map(|g| g.to_f64_vec()).unwrap_or_default();
        println!("Pass {}: dL/dW = {:?}", pass, grad);
    }
    Ok(())
}
