// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Animated binary-search-tree visualizer core.
//!
//! Sapling compiles BST operations into declarative animation plans and
//! plays them back against a positioned node/edge state that a renderer can
//! draw frame by frame. Nothing here draws; the crate ends at
//! [`animation::VisualizationState`].
//!
//! # Key entry points
//!
//! - [`engine::Visualizer`] - request façade binding an adapter to a
//!   sequencer
//! - [`plan::BstAdapter`] - compiles insert/delete/find into [`plan::Plan`]s
//! - [`animation::Sequencer`] - deadline-driven plan playback
//! - [`options::Options`] - timing, color and canvas configuration
//!
//! # Architecture
//!
//! A request first reaches a [`plan::StructureAdapter`], which mutates its
//! [`tree::BinarySearchTree`] and records each observable event as an
//! [`plan::AnimationStep`]. The sequencer then interprets the plan: every
//! step changes the visual state and schedules the next one, and any
//! snapshot it receives is positioned by a [`layout::Layout`] first. The
//! host drives time explicitly, so playback is deterministic under test.

pub mod animation;
pub mod engine;
pub mod error;
pub mod layout;
pub mod options;
pub mod plan;
pub mod tree;
