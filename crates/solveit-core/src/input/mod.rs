//! Input layer — triggers, input configuration, and the director that binds
//! puzzle actions to puzzle receivers.
//!
//! ```text
//!   PuzzleAction ──→ InputTrigger ──→ InputConfigStore
//!        │
//!        └──→ receiver discovery ──→ ActionExecutor ──→ InputBindingTarget
//!
//!   fire(action_id) ──→ ExecutorHandle ──→ ActionExecutor ──→ InputReceiver
//! ```

pub mod binding;
pub mod director;
pub mod executor;
pub mod receiver;
pub mod settings;
pub mod trigger;
