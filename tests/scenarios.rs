//! End-to-end scenarios: plans compiled by the BST adapter and played by
//! the visualizer against synthetic instants.

use sapling::animation::{InsertStage, Sequencer};
use sapling::engine::Visualizer;
use sapling::error::SaplingError;
use sapling::layout::LayeredLayout;
use sapling::options::Options;
use sapling::plan::{
    AnimationStep, BstAdapter, ElementId, LinkId, NodeId, StructureAdapter,
    Value,
};
use web_time::{Duration, Instant};

const SAMPLE: [Value; 7] = [10, 5, 15, 3, 7, 12, 18];

fn id_of(adapter: &BstAdapter, value: Value) -> NodeId {
    let handle = adapter.tree().find_with_parent(&value).node.unwrap();
    adapter.id_of(handle).unwrap()
}

fn seeded(values: &[Value]) -> BstAdapter {
    let mut adapter = BstAdapter::with_values(values);
    let _ = adapter.initial_state();
    adapter
}

#[test]
fn find_walks_root_then_left_child() {
    let mut adapter = BstAdapter::new();
    for value in [10, 5, 15] {
        let _ = adapter.insert(value);
    }
    let tree = adapter.tree();
    let root = tree.get(tree.root().unwrap()).unwrap();
    assert_eq!(root.value, 10);
    assert_eq!(tree.get(root.left().unwrap()).unwrap().value, 5);
    assert_eq!(tree.get(root.right().unwrap()).unwrap().value, 15);

    let plan = adapter.find(5);
    assert_eq!(
        plan.steps(),
        &[
            AnimationStep::Visit { node: id_of(&adapter, 10) },
            AnimationStep::Visit { node: id_of(&adapter, 5) },
        ]
    );
}

#[test]
fn two_child_delete_promotes_successor() {
    let mut adapter = seeded(&SAMPLE);
    let twelve = id_of(&adapter, 12);
    let fifteen = id_of(&adapter, 15);

    let plan = adapter.delete(10);
    assert_eq!(adapter.tree().values(), vec![3, 5, 7, 12, 15, 18]);
    assert_eq!(id_of(&adapter, 12), twelve);

    let steps = plan.steps();
    let fades: Vec<usize> = steps
        .iter()
        .enumerate()
        .filter(|(_, s)| match s {
            AnimationStep::FadeOut { elements } => elements
                .iter()
                .any(|e| matches!(e, ElementId::Link(_))),
            _ => false,
        })
        .map(|(i, _)| i)
        .collect();
    assert_eq!(fades.len(), 1);
    assert_eq!(
        steps[fades[0]],
        AnimationStep::FadeOut {
            elements: vec![ElementId::Link(LinkId::new(fifteen, twelve))],
        }
    );
    let moved = steps
        .iter()
        .position(|s| matches!(s, AnimationStep::MoveNode { .. }))
        .unwrap();
    assert!(fades[0] < moved);
    assert!(matches!(steps.last(), Some(AnimationStep::Finalize { .. })));
}

#[test]
fn leaf_delete_goes_straight_to_finalize() {
    let mut adapter = seeded(&SAMPLE);
    let plan = adapter.delete(3);
    let names: Vec<&str> =
        plan.steps().iter().map(AnimationStep::name).collect();
    assert_eq!(names, vec!["visit", "visit", "visit", "highlight", "finalize"]);
    assert!(!plan
        .steps()
        .iter()
        .any(|s| matches!(s, AnimationStep::MoveNode { .. })));
}

#[test]
fn missing_delete_has_no_mutation_steps() {
    let mut adapter = seeded(&SAMPLE);
    let plan = adapter.delete(99);
    assert!(plan
        .steps()
        .iter()
        .all(|s| matches!(s, AnimationStep::Visit { .. })));
    assert!(!plan.settles());
    assert_eq!(adapter.tree().len(), 7);
}

#[test]
fn second_rapid_insert_is_rejected() {
    let mut viz = Visualizer::bst(&[], Options::default());
    let t0 = Instant::now();
    viz.insert(4, t0).unwrap();
    let err = viz.insert(9, t0 + Duration::from_millis(50)).unwrap_err();
    assert!(matches!(err, SaplingError::Busy));

    let _ = viz.settle(t0);
    assert_eq!(viz.adapter().tree().values(), vec![4]);
    assert_eq!(viz.state().nodes().len(), 1);
}

#[test]
fn insert_then_find_ends_on_new_node() {
    let mut adapter = seeded(&SAMPLE);
    let plan = adapter.insert(13);
    let Some(AnimationStep::FinalizeInsert { new_node, .. }) =
        plan.steps().last()
    else {
        panic!("insert must end with a staged finalize");
    };
    let found = adapter.find(13);
    assert_eq!(found.visited().last(), Some(new_node));
}

#[test]
fn inserted_node_is_revealed_before_its_edge() {
    let options = Options::default();
    let mut adapter = seeded(&SAMPLE);
    let layout = LayeredLayout::new(options.canvas.clone());
    let mut sequencer = Sequencer::new(layout, &options);
    sequencer.show(&adapter.initial_state()).unwrap();

    let plan = adapter.insert(13);
    let new_node = id_of(&adapter, 13);
    let edge = LinkId::new(id_of(&adapter, 12), new_node);
    let visits = plan.visited().len() as u32;

    let t0 = Instant::now();
    sequencer.start(plan, t0).unwrap();
    let entry = t0 + options.timing.step() * visits;

    assert!(sequencer.update(entry));
    assert_eq!(sequencer.insert_stage(), Some(InsertStage::Hide));
    assert!(sequencer.state().node(new_node).is_none());

    let mut observed = Vec::new();
    let stages =
        [InsertStage::Hide, InsertStage::RevealNode, InsertStage::RevealEdge];
    for stage in stages {
        let _ = sequencer.update(entry + stage.offset(&options.timing));
        let state = sequencer.state();
        observed.push((
            state.node(new_node).and_then(|n| n.opacity),
            state.link(edge).and_then(|l| l.opacity),
        ));
    }
    assert_eq!(
        observed,
        vec![
            (Some(0.0), Some(0.0)),
            (Some(1.0), Some(0.0)),
            (Some(1.0), Some(1.0)),
        ]
    );
    assert!(!sequencer.is_busy());
}
