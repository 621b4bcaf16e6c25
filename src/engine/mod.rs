//! The visualizer façade.
//!
//! [`Visualizer`] binds one structure adapter (which owns the tree and its
//! id mapping) to one [`Sequencer`] (which owns the visual state). It is the
//! only place requests enter: a request that arrives while a plan is still
//! playing is rejected before the adapter sees it, so a rejected insert
//! never touches the tree.

mod command;
mod input;

use web_time::Instant;

pub use command::TreeCommand;
pub use input::parse_value;

use crate::animation::{Sequencer, VisualizationState};
use crate::error::SaplingError;
use crate::layout::{LayeredLayout, Layout};
use crate::options::Options;
use crate::plan::{BstAdapter, StructureAdapter, Value};

/// One data structure, one visual state, one plan in flight at most.
pub struct Visualizer<A, L> {
    adapter: A,
    sequencer: Sequencer<L>,
    options: Options,
}

impl Visualizer<BstAdapter, LayeredLayout> {
    /// BST visualizer seeded with `values`, laid out on the configured
    /// canvas and deletion highlights in the configured color.
    #[must_use]
    pub fn bst(values: &[Value], options: Options) -> Self {
        let adapter = BstAdapter::with_values(values)
            .with_deletion_color(options.colors.deletion);
        let layout = LayeredLayout::new(options.canvas.clone());
        Self::new(adapter, layout, options)
    }
}

impl<A: StructureAdapter, L: Layout> Visualizer<A, L> {
    /// Bind `adapter` and `layout`, showing the adapter's initial state.
    pub fn new(mut adapter: A, layout: L, options: Options) -> Self {
        let mut sequencer = Sequencer::new(layout, &options);
        let initial = adapter.initial_state();
        if let Err(e) = sequencer.show(&initial) {
            log::warn!("initial state not shown: {e}");
        }
        log::debug!("visualizer ready with {} nodes", initial.nodes.len());
        Self {
            adapter,
            sequencer,
            options,
        }
    }

    /// Current visual state for the renderer.
    #[must_use]
    pub fn state(&self) -> &VisualizationState {
        self.sequencer.state()
    }

    /// Whether a plan is playing.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.sequencer.is_busy()
    }

    /// The structure adapter.
    #[must_use]
    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// The sequencer.
    #[must_use]
    pub fn sequencer(&self) -> &Sequencer<L> {
        &self.sequencer
    }

    /// Options the visualizer was built with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Compile and start playing `command` at `now`.
    pub fn execute(
        &mut self,
        command: TreeCommand,
        now: Instant,
    ) -> Result<(), SaplingError> {
        if self.sequencer.is_busy() {
            log::info!("dropping {command}: animation in progress");
            return Err(SaplingError::Busy);
        }
        let plan = match command {
            TreeCommand::Insert(value) => self.adapter.insert(value),
            TreeCommand::Delete(value) => self.adapter.delete(value),
            TreeCommand::Find(value) => self.adapter.find(value),
        };
        log::debug!("{command}: plan of {} steps", plan.len());
        self.sequencer.start(plan, now)
    }

    /// Insert `value`.
    pub fn insert(
        &mut self,
        value: Value,
        now: Instant,
    ) -> Result<(), SaplingError> {
        self.execute(TreeCommand::Insert(value), now)
    }

    /// Delete `value`.
    pub fn delete(
        &mut self,
        value: Value,
        now: Instant,
    ) -> Result<(), SaplingError> {
        self.execute(TreeCommand::Delete(value), now)
    }

    /// Search for `value`.
    pub fn find(
        &mut self,
        value: Value,
        now: Instant,
    ) -> Result<(), SaplingError> {
        self.execute(TreeCommand::Find(value), now)
    }

    /// Parse and execute a textual command such as `insert:8`.
    pub fn submit(
        &mut self,
        input: &str,
        now: Instant,
    ) -> Result<(), SaplingError> {
        let command = input.parse::<TreeCommand>()?;
        self.execute(command, now)
    }

    /// Advance playback to `now`. Returns whether a plan is still playing.
    pub fn update(&mut self, now: Instant) -> bool {
        self.sequencer.update(now)
    }

    /// When playback next needs an [`update`](Self::update).
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.sequencer.next_deadline()
    }

    /// Finish the current plan without waiting. Returns the instant
    /// playback ended at.
    pub fn settle(&mut self, now: Instant) -> Instant {
        self.sequencer.run_to_end(now)
    }
}

impl<A, L> std::fmt::Debug for Visualizer<A, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Visualizer")
            .field("sequencer", &self.sequencer)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use web_time::Duration;

    use super::*;

    fn sample() -> Visualizer<BstAdapter, LayeredLayout> {
        Visualizer::bst(&[10, 5, 15, 3, 7, 12, 18], Options::default())
    }

    #[test]
    fn initial_state_is_laid_out() {
        let viz = sample();
        assert_eq!(viz.state().nodes().len(), 7);
        assert!(!viz.is_busy());
        assert!(viz.state().nodes().iter().all(|n| n.position.y > 0.0));
    }

    #[test]
    fn rejected_request_leaves_tree_untouched() {
        let mut viz = sample();
        let t0 = Instant::now();
        viz.insert(8, t0).unwrap();
        let err = viz.insert(9, t0 + Duration::from_millis(100)).unwrap_err();
        assert!(matches!(err, SaplingError::Busy));
        let _ = viz.settle(t0);
        assert_eq!(
            viz.adapter().tree().values(),
            vec![3, 5, 7, 8, 10, 12, 15, 18]
        );
    }

    #[test]
    fn submit_validates_before_compiling() {
        let mut viz = sample();
        let t0 = Instant::now();
        assert!(matches!(
            viz.submit("insert:2.5", t0),
            Err(SaplingError::InvalidInput(_))
        ));
        assert!(!viz.is_busy());
        viz.submit("delete:3", t0).unwrap();
        assert!(viz.is_busy());
        let _ = viz.settle(t0);
        assert_eq!(viz.state().nodes().len(), 6);
    }

    #[test]
    fn missing_delete_plays_search_only() {
        let mut viz = sample();
        let t0 = Instant::now();
        viz.delete(99, t0).unwrap();
        let end = viz.settle(t0);
        assert_eq!(end, t0 + Duration::from_millis(1500));
        assert_eq!(viz.state().nodes().len(), 7);
    }

    #[test]
    fn requests_accepted_again_after_settling() {
        let mut viz = sample();
        let t0 = Instant::now();
        viz.find(7, t0).unwrap();
        let end = viz.settle(t0);
        assert!(viz.next_deadline().is_none());
        viz.insert(1, end).unwrap();
        assert!(viz.is_busy());
    }
}
