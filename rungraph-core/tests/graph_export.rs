use rungraph_core::autograd::{Edge, Vertex};
use rungraph_core::ops::arithmetic::{add_constant_op, mul_op};
use rungraph_core::ops::array::split_op;
use rungraph_core::ops::math_elem::exp_op;
use rungraph_core::ops::reduction::sum_op;
use rungraph_core::{computational_graph, Graph};

mod common;
use common::{init_logger, leaf_f32};

#[test]
fn test_export_twice_is_identical() {
    init_logger();
    let mut graph = Graph::new();
    let x = leaf_f32(vec![1.0, 2.0], vec![2]).with_name("x");
    let y = exp_op(&mut graph, &x).unwrap();
    let z = mul_op(&mut graph, &y, &x).unwrap();
    let loss = sum_op(&mut graph, &z).unwrap();

    let first = computational_graph(&graph, &[&loss], false);
    let second = computational_graph(&graph, &[&loss], false);
    assert_eq!(first, second);
    assert_eq!(first.to_dot(), second.to_dot());
    assert_eq!(first.len(), 7);
}

#[test]
fn test_dot_layout() {
    let mut graph = Graph::new();
    let x = leaf_f32(vec![1.0], vec![]);
    let y = add_constant_op(&mut graph, &x, 1.0).unwrap();
    let f = graph.creator_of(&y).unwrap();

    let dot = computational_graph(&graph, &[&y], false).to_dot();
    let expected = format!(
        "digraph graphname{{\n\
         {x} [label=\"float32\",shape=\"oval\"];\n\
         {y} [label=\"float32\",shape=\"oval\"];\n\
         {f} [label=\"+ 1\",shape=\"box\"];\n\
         {x} -> {f};\n\
         {f} -> {y};\n\
         }}",
        x = x.id(),
        y = y.id(),
        f = f
    );
    assert_eq!(dot, expected);
}

#[test]
fn test_split_elision_in_export_matches_direct_graph() {
    // With a split
    let mut g1 = Graph::new();
    let x1 = leaf_f32(vec![1.0], vec![]);
    let parts = split_op(&mut g1, &x1, 2).unwrap();
    let y1 = mul_op(&mut g1, &parts[0], &parts[1]).unwrap();
    let elided = computational_graph(&g1, &[&y1], true);

    // Same computation wired directly
    let mut g2 = Graph::new();
    let x2 = leaf_f32(vec![1.0], vec![]);
    let y2 = mul_op(&mut g2, &x2, &x2).unwrap();
    let direct = computational_graph(&g2, &[&y2], false);

    assert_eq!(elided.len(), direct.len());
    let f1 = g1.creator_of(&y1).unwrap();
    assert!(elided.contains(&Edge::new(Vertex::Tensor(x1.id()), Vertex::Op(f1))));
    assert!(elided.contains(&Edge::new(Vertex::Op(f1), Vertex::Tensor(y1.id()))));
}

#[test]
fn test_export_after_release_sees_leaves_only() {
    let mut graph = Graph::new();
    let x = leaf_f32(vec![1.0], vec![]);
    let y = exp_op(&mut graph, &x).unwrap();
    graph.backward(&y).unwrap();
    let cg = computational_graph(&graph, &[&y], false);
    assert!(cg.is_empty());
    assert_eq!(cg.vertices().count(), 1);
}
