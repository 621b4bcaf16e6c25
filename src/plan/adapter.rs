//! Boundary between a data structure and the visualizer.

use super::{Plan, Snapshot, Value};

/// A data structure that can narrate its own mutations.
///
/// Implementors own the structure and the id mapping for its nodes. Every
/// method returns a plan (possibly one that only describes a failed
/// search); none of them treat an absent value as an error.
pub trait StructureAdapter {
    /// Unpositioned snapshot of the current structure.
    fn initial_state(&mut self) -> Snapshot;

    /// Insert `value` and describe how to animate it.
    fn insert(&mut self, value: Value) -> Plan;

    /// Delete `value` and describe how to animate it.
    fn delete(&mut self, value: Value) -> Plan;

    /// Search for `value` without mutating anything.
    fn find(&mut self, value: Value) -> Plan;
}
