//! # Exporting a Recorded Graph to Graphviz
//!
//! Records a computation that goes through a `split` node, then prints the
//! graph twice in DOT syntax: once as recorded, once with splits elided.
//!
//! ## Demonstrated features:
//! 1.  **Named tensors**: names show up in vertex labels.
//! 2.  **Split nodes** (`split_op`), drawn as hexagons.
//! 3.  **`computational_graph`** with and without `remove_split`.
//! 4.  Export is **read-only**: a backward pass afterwards still works.
//!
//! ## Running
//! `cargo run --example export_dot > graph.dot && dot -Tpng graph.dot -o graph.png`

use rungraph_core::ops::arithmetic::{mul_op, sub_op};
use rungraph_core::ops::array::split_op;
use rungraph_core::ops::math_elem::exp_op;
use rungraph_core::ops::reduction::sum_op;
use rungraph_core::{computational_graph, Graph, RunGraphError, Tensor};

fn main() -> Result<(), RunGraphError> {
    env_logger::init();

    let mut graph = Graph::new();
    let x = Tensor::new(vec![0.5, 1.0, 1.5], vec![3])?.with_name("x");
    x.requires_grad_(true)?;

    let parts = split_op(&mut graph, &x, 2)?;
    let e = exp_op(&mut graph, &parts[0])?;
    let p = mul_op(&mut graph, &e, &parts[1])?;
    let d = sub_op(&mut graph, &p, &x)?;
    let loss = sum_op(&mut graph, &d)?.with_name("loss");

    let full = computational_graph(&graph, &[&loss], false);
    println!("// As recorded: {} edges", full.len());
    println!("{}", full);

    let elided = computational_graph(&graph, &[&loss], true);
    println!("// Splits elided: {} edges", elided.len());
    println!("{}", elided);

    graph.backward(&loss)?;
    println!("// dloss/dx = {:?}", x.grad().map(|g| g.to_f64_vec()).unwrap_or_default());
    Ok(())
}
