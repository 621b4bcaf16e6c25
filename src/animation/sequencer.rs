//! Plan playback.
//!
//! The sequencer is a cooperative state machine driven by explicit
//! instants. A host calls [`Sequencer::update`] whenever it likes (every
//! frame, or after sleeping until [`Sequencer::next_deadline`]); every
//! transition that has come due is applied in plan order. Deadlines are
//! chained from the previous transition's scheduled time, so playback is
//! identical however coarsely `update` is called.

use std::collections::VecDeque;

use web_time::{Duration, Instant};

use super::staged::{InsertStage, StagedInsert};
use super::state::VisualizationState;
use crate::error::SaplingError;
use crate::layout::Layout;
use crate::options::{ColorOptions, Options, TimingOptions};
use crate::plan::{AnimationStep, ElementId, Plan, Snapshot};

enum Phase {
    Idle,
    Running {
        steps: VecDeque<AnimationStep>,
        due: Instant,
    },
    Staged(StagedInsert),
}

/// Plays plans against a [`VisualizationState`], one at a time.
///
/// While a plan is in flight the sequencer is busy and [`start`] rejects
/// any other plan outright; nothing is queued and a running plan cannot be
/// cancelled.
///
/// [`start`]: Sequencer::start
pub struct Sequencer<L> {
    layout: L,
    timing: TimingOptions,
    colors: ColorOptions,
    state: VisualizationState,
    phase: Phase,
    version: u64,
}

impl<L: Layout> Sequencer<L> {
    /// Idle sequencer with an empty state.
    #[must_use]
    pub fn new(layout: L, options: &Options) -> Self {
        Self {
            layout,
            timing: options.timing.clone(),
            colors: options.colors.clone(),
            state: VisualizationState::default(),
            phase: Phase::Idle,
            version: 0,
        }
    }

    /// Current visual state.
    #[must_use]
    pub fn state(&self) -> &VisualizationState {
        &self.state
    }

    /// Bumped on every state change; renderers compare it to skip redraws.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// The layout collaborator.
    #[must_use]
    pub fn layout(&self) -> &L {
        &self.layout
    }

    /// Whether a plan is in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        !matches!(self.phase, Phase::Idle)
    }

    /// Stage of a `FINALIZE_INSERT` in flight, if any.
    #[must_use]
    pub fn insert_stage(&self) -> Option<InsertStage> {
        match &self.phase {
            Phase::Staged(staged) => Some(staged.stage()),
            _ => None,
        }
    }

    /// When the next transition is due, or `None` when idle.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        match &self.phase {
            Phase::Idle => None,
            Phase::Running { due, .. } => Some(*due),
            Phase::Staged(staged) => Some(staged.due(&self.timing)),
        }
    }

    /// Lay out and show a snapshot immediately. Rejected while busy.
    pub fn show(&mut self, snapshot: &Snapshot) -> Result<(), SaplingError> {
        if self.is_busy() {
            return Err(SaplingError::Busy);
        }
        self.state.replace(self.layout.layout(snapshot));
        self.touch();
        Ok(())
    }

    /// Begin playing `plan` at `now`. The first step runs immediately.
    ///
    /// An empty plan is accepted and does nothing.
    pub fn start(
        &mut self,
        plan: Plan,
        now: Instant,
    ) -> Result<(), SaplingError> {
        if self.is_busy() {
            log::info!(
                "rejecting plan of {} steps: sequencer busy",
                plan.len()
            );
            return Err(SaplingError::Busy);
        }
        if plan.is_empty() {
            return Ok(());
        }
        log::debug!("starting plan of {} steps", plan.len());
        self.phase = Phase::Running {
            steps: plan.into_iter().collect(),
            due: now,
        };
        let _ = self.update(now);
        Ok(())
    }

    /// Apply every transition due at or before `now`. Returns whether a
    /// plan is still in flight afterwards.
    pub fn update(&mut self, now: Instant) -> bool {
        loop {
            match std::mem::replace(&mut self.phase, Phase::Idle) {
                Phase::Idle => return false,
                Phase::Running { steps, due } if due > now => {
                    self.phase = Phase::Running { steps, due };
                    return true;
                }
                Phase::Running { mut steps, due } => match steps.pop_front() {
                    Some(step) => self.phase = self.run_step(step, steps, due),
                    None => self.finish(),
                },
                Phase::Staged(staged) if staged.due(&self.timing) > now => {
                    self.phase = Phase::Staged(staged);
                    return true;
                }
                Phase::Staged(mut staged) => {
                    let due = staged.due(&self.timing);
                    let rest = staged.advance(&mut self.state);
                    self.touch();
                    self.phase = match rest {
                        None => Phase::Staged(staged),
                        Some(steps) => Phase::Running { steps, due },
                    };
                }
            }
        }
    }

    /// Play out the current plan to completion, for hosts that do not
    /// animate. Returns the instant at which playback ended.
    pub fn run_to_end(&mut self, now: Instant) -> Instant {
        let mut at = now;
        while let Some(deadline) = self.next_deadline() {
            at = at.max(deadline);
            let _ = self.update(at);
        }
        at
    }

    fn touch(&mut self) {
        self.version += 1;
    }

    /// Apply one step at its scheduled time `at` and return the next phase.
    fn run_step(
        &mut self,
        step: AnimationStep,
        rest: VecDeque<AnimationStep>,
        at: Instant,
    ) -> Phase {
        log::debug!("step {}", step.name());
        let base = self.timing.step();
        let mut delay = base;
        match step {
            AnimationStep::Visit { node } => {
                if let Some(position) = self.state.position_of(node) {
                    self.state.cursor.position = position;
                    self.state.cursor.visible = true;
                }
            }
            AnimationStep::Highlight { nodes, color } => {
                let color = color.unwrap_or(self.colors.highlight);
                self.state.highlight(&nodes, color);
            }
            AnimationStep::FadeOut { elements } => {
                self.fade_out(&elements);
                delay += base;
            }
            AnimationStep::UpdateValue { node, value } => {
                if let Some(n) = self.state.node_mut(node) {
                    n.value = value;
                }
            }
            AnimationStep::MoveNode { node, to } => {
                if let Some(target) = self.state.position_of(to) {
                    if let Some(n) = self.state.node_mut(node) {
                        n.position = target;
                    }
                }
                delay += base;
            }
            AnimationStep::HideVisitor => self.state.cursor.visible = false,
            AnimationStep::Finalize { snapshot } => {
                let mut laid_out = self.layout.layout(&snapshot);
                laid_out.nodes.retain(|n| !n.is_transparent());
                self.state.replace(laid_out);
            }
            AnimationStep::FinalizeInsert {
                snapshot,
                new_node,
                new_link,
            } => {
                let laid_out = self.layout.layout(&snapshot);
                let staged = StagedInsert::enter(
                    &mut self.state,
                    laid_out,
                    new_node,
                    new_link,
                    rest,
                    at,
                );
                self.touch();
                return Phase::Staged(staged);
            }
        }
        self.touch();
        Phase::Running {
            steps: rest,
            due: at + delay,
        }
    }

    fn fade_out(&mut self, elements: &[ElementId]) {
        let background = self.colors.background;
        for element in elements {
            match *element {
                ElementId::Node(id) => {
                    if let Some(node) = self.state.node_mut(id) {
                        node.fill = Some(background);
                        node.stroke = Some(background);
                        node.opacity = Some(0.0);
                    }
                }
                ElementId::Link(id) => {
                    if let Some(link) = self.state.link_mut(id) {
                        link.opacity = Some(0.0);
                    }
                }
            }
        }
    }

    /// End of plan: release the busy flag, retract the cursor and drop any
    /// leftover highlighting.
    fn finish(&mut self) {
        self.phase = Phase::Idle;
        self.state.cursor.visible = false;
        self.state.clear_styles();
        self.touch();
        log::debug!("plan finished");
    }
}

impl<L> std::fmt::Debug for Sequencer<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let phase = match &self.phase {
            Phase::Idle => "idle",
            Phase::Running { .. } => "running",
            Phase::Staged(_) => "staged-insert",
        };
        f.debug_struct("Sequencer")
            .field("phase", &phase)
            .field("nodes", &self.state.nodes.len())
            .field("links", &self.state.links.len())
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

/// Total time `plan` takes to play with `timing`, from start to the busy
/// flag clearing.
#[must_use]
pub fn plan_duration(plan: &Plan, timing: &TimingOptions) -> Duration {
    let base = timing.step();
    let mut total = Duration::ZERO;
    for step in plan {
        total += match step {
            AnimationStep::FadeOut { .. } | AnimationStep::MoveNode { .. } => {
                base * 2
            }
            AnimationStep::FinalizeInsert { .. } => {
                InsertStage::RevealEdge.offset(timing)
            }
            _ => base,
        };
    }
    total
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::layout::LayeredLayout;
    use crate::plan::{BstAdapter, LinkId, NodeId, StructureAdapter};

    const SAMPLE: [i64; 7] = [10, 5, 15, 3, 7, 12, 18];

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn setup(values: &[i64]) -> (BstAdapter, Sequencer<LayeredLayout>) {
        let mut adapter = BstAdapter::with_values(values);
        let mut sequencer =
            Sequencer::new(LayeredLayout::default(), &Options::default());
        sequencer.show(&adapter.initial_state()).unwrap();
        (adapter, sequencer)
    }

    fn id_of(adapter: &BstAdapter, value: i64) -> NodeId {
        let handle = adapter.tree().find_with_parent(&value).node.unwrap();
        adapter.id_of(handle).unwrap()
    }

    #[test]
    fn empty_plan_never_goes_busy() {
        let (_, mut sequencer) = setup(&SAMPLE);
        sequencer.start(Plan::new(), Instant::now()).unwrap();
        assert!(!sequencer.is_busy());
        assert_eq!(sequencer.next_deadline(), None);
    }

    #[test]
    fn visit_moves_cursor_and_waits_one_step() {
        let (mut adapter, mut sequencer) = setup(&SAMPLE);
        let t0 = Instant::now();
        let plan = adapter.find(7);
        sequencer.start(plan, t0).unwrap();

        let ten = id_of(&adapter, 10);
        let five = id_of(&adapter, 5);
        let cursor = sequencer.state().cursor();
        assert!(cursor.visible);
        assert_eq!(Some(cursor.position), sequencer.state().position_of(ten));
        assert_eq!(sequencer.next_deadline(), Some(t0 + ms(500)));

        assert!(sequencer.update(t0 + ms(499)));
        let state = sequencer.state();
        assert_eq!(Some(state.cursor().position), state.position_of(ten));

        assert!(sequencer.update(t0 + ms(500)));
        let state = sequencer.state();
        assert_eq!(Some(state.cursor().position), state.position_of(five));
    }

    #[test]
    fn end_of_plan_hides_cursor_and_clears_busy() {
        let (mut adapter, mut sequencer) = setup(&SAMPLE);
        let t0 = Instant::now();
        sequencer.start(adapter.find(7), t0).unwrap();
        // three visits, then the end-of-plan tick one step after the last
        assert!(sequencer.update(t0 + ms(1000)));
        assert!(!sequencer.update(t0 + ms(1500)));
        assert!(!sequencer.is_busy());
        assert!(!sequencer.state().cursor().visible);
    }

    #[test]
    fn coarse_updates_apply_every_due_transition() {
        let (mut adapter, mut sequencer) = setup(&SAMPLE);
        let t0 = Instant::now();
        sequencer.start(adapter.find(7), t0).unwrap();
        assert!(!sequencer.update(t0 + ms(10_000)));
        assert!(!sequencer.is_busy());
    }

    #[test]
    fn busy_sequencer_rejects_new_plans() {
        let (mut adapter, mut sequencer) = setup(&SAMPLE);
        let t0 = Instant::now();
        sequencer.start(adapter.find(7), t0).unwrap();
        let err = sequencer.start(adapter.find(3), t0 + ms(10)).unwrap_err();
        assert!(matches!(err, SaplingError::Busy));
        assert!(matches!(
            sequencer.show(&Snapshot::default()),
            Err(SaplingError::Busy)
        ));
    }

    #[test]
    fn highlight_uses_default_color_when_unset() {
        let (adapter, mut sequencer) = setup(&SAMPLE);
        let five = id_of(&adapter, 5);
        let plan = Plan::from(vec![AnimationStep::Highlight {
            nodes: vec![five],
            color: None,
        }]);
        let t0 = Instant::now();
        sequencer.start(plan, t0).unwrap();
        let fill = sequencer.state().node(five).unwrap().fill;
        assert_eq!(fill, Some(ColorOptions::default().highlight));

        // residual highlight cleared at end of plan
        assert!(!sequencer.update(t0 + ms(500)));
        assert_eq!(sequencer.state().node(five).unwrap().fill, None);
    }

    #[test]
    fn update_value_relabels_node() {
        let (adapter, mut sequencer) = setup(&SAMPLE);
        let five = id_of(&adapter, 5);
        let plan = Plan::from(vec![AnimationStep::UpdateValue {
            node: five,
            value: 6,
        }]);
        sequencer.start(plan, Instant::now()).unwrap();
        assert_eq!(sequencer.state().node(five).unwrap().value, 6);
    }

    #[test]
    fn two_child_delete_plays_fade_move_finalize() {
        let (mut adapter, mut sequencer) = setup(&SAMPLE);
        let ten = id_of(&adapter, 10);
        let twelve = id_of(&adapter, 12);
        let fifteen = id_of(&adapter, 15);
        let root_position = sequencer.state().position_of(ten).unwrap();

        let plan = adapter.delete(10);
        let t0 = Instant::now();
        sequencer.start(plan, t0).unwrap();

        // visit(10) @0, highlight @500, visit(15) @1000, visit(12) @1500,
        // highlight both @2000, fade edge @2500 (+1000), hide @3500,
        // fade node @4000 (+1000), move @5000 (+1000), finalize @6000,
        // end @6500.
        assert!(sequencer.update(t0 + ms(2000)));
        assert!(sequencer.state().node(ten).unwrap().fill.is_some());
        assert!(sequencer.state().node(twelve).unwrap().fill.is_some());

        assert!(sequencer.update(t0 + ms(2500)));
        let edge = sequencer
            .state()
            .link(LinkId::new(fifteen, twelve))
            .unwrap();
        assert_eq!(edge.opacity, Some(0.0));
        assert_eq!(sequencer.next_deadline(), Some(t0 + ms(3500)));

        assert!(sequencer.update(t0 + ms(3500)));
        assert!(!sequencer.state().cursor().visible);

        assert!(sequencer.update(t0 + ms(4000)));
        assert!(sequencer.state().node(ten).unwrap().is_transparent());

        assert!(sequencer.update(t0 + ms(5000)));
        assert_eq!(sequencer.state().position_of(twelve), Some(root_position));

        assert!(sequencer.update(t0 + ms(6000)));
        assert!(sequencer.state().node(ten).is_none());
        assert_eq!(sequencer.state().nodes().len(), 6);
        let links = sequencer.state().links();
        assert!(!links.iter().any(|l| l.opacity == Some(0.0)));

        assert!(!sequencer.update(t0 + ms(6500)));
        assert!(sequencer.state().nodes().iter().all(|n| n.fill.is_none()));
        let missing = adapter.delete(99);
        assert_eq!(
            plan_duration(&missing, &TimingOptions::default()),
            ms(1500)
        );
    }

    #[test]
    fn finalize_insert_stages_node_then_edge() {
        let (mut adapter, mut sequencer) = setup(&SAMPLE);
        let plan = adapter.insert(6);
        let six = id_of(&adapter, 6);
        let seven = id_of(&adapter, 7);
        let edge = LinkId::new(seven, six);
        let t0 = Instant::now();
        sequencer.start(plan, t0).unwrap();

        // visits at 0, 500, 1000; finalize-insert entered at 1500
        assert!(sequencer.update(t0 + ms(1500)));
        assert_eq!(sequencer.insert_stage(), Some(InsertStage::Hide));
        assert!(!sequencer.state().cursor().visible);
        assert!(sequencer.state().node(six).is_none());

        assert!(sequencer.update(t0 + ms(2000)));
        assert_eq!(sequencer.state().node(six).unwrap().opacity, Some(0.0));
        assert_eq!(sequencer.state().link(edge).unwrap().opacity, Some(0.0));

        assert!(sequencer.update(t0 + ms(2100)));
        assert_eq!(sequencer.state().node(six).unwrap().opacity, Some(1.0));
        assert_eq!(sequencer.state().link(edge).unwrap().opacity, Some(0.0));

        assert!(sequencer.update(t0 + ms(2499)));
        assert!(!sequencer.update(t0 + ms(2500)));
        assert_eq!(sequencer.state().link(edge).unwrap().opacity, Some(1.0));
        assert!(!sequencer.is_busy());
        assert_eq!(sequencer.state().nodes().len(), 8);
    }

    #[test]
    fn first_insert_into_empty_tree_reveals_root() {
        let (mut adapter, mut sequencer) = setup(&[]);
        let t0 = Instant::now();
        sequencer.start(adapter.insert(1), t0).unwrap();
        let end = sequencer.run_to_end(t0);
        assert_eq!(end, t0 + ms(1000));
        let root = &sequencer.state().nodes()[0];
        assert_eq!(root.opacity, Some(1.0));
        assert_ne!(root.position, Vec2::ZERO);
    }

    #[test]
    fn version_advances_on_every_transition() {
        let (mut adapter, mut sequencer) = setup(&SAMPLE);
        let before = sequencer.version();
        let t0 = Instant::now();
        sequencer.start(adapter.find(3), t0).unwrap();
        assert_eq!(sequencer.version(), before + 1);
        let _ = sequencer.run_to_end(t0);
        assert_eq!(sequencer.version(), before + 4);
    }

    #[test]
    fn finalize_drops_faded_nodes() {
        let (mut adapter, mut sequencer) = setup(&[2, 1]);
        let mut snapshot = adapter.initial_state();
        let faded = snapshot.nodes[1].id;
        snapshot.nodes[1].opacity = Some(0.0);
        let plan = Plan::from(vec![AnimationStep::Finalize { snapshot }]);

        let t0 = Instant::now();
        sequencer.start(plan, t0).unwrap();
        let _ = sequencer.run_to_end(t0);
        assert!(sequencer.state().node(faded).is_none());
        assert_eq!(sequencer.state().nodes().len(), 1);
    }
}
