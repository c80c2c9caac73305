//! The receiver capability.

/// Anything on a puzzle that can accept a named input action.
pub trait InputReceiver {
    /// Name matched against [`PuzzleAction::target_edge_name`](crate::input::director::PuzzleAction::target_edge_name).
    fn receiver_name(&self) -> &str;

    fn receive_input(&mut self, action_label: &str);
}
