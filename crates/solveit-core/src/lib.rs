//! SolveIt Core — domain layer for puzzle input and edge authoring.
//!
//! This crate contains the puzzle component model, the input director that
//! binds player actions to puzzle receivers, and the moveset authoring tool
//! used by the edge editor. No engine or framework dependencies.

pub mod authoring;
pub mod input;
pub mod puzzle;

// Re-exports for convenience.
pub use authoring::{AuthoringError, MovesetAuthoringTool, MovesetDraft};
pub use input::director::{BindError, BindOutcome, DirectorState, InputDirector, PuzzleAction};
pub use input::settings::{InputConfigStore, InputSettings};
pub use input::trigger::{InputTrigger, Modifiers, PhysicalKey, TriggerPhase};
pub use puzzle::{Puzzle, PuzzleComponent, PuzzleId};
