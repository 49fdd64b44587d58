use crate::core::GameSnapshot;

/// Receives engine output. Purely observational; nothing flows back.
pub trait EngineObserver {
    /// Called after every visible mutation: moves, fixes, removal steps, resets.
    fn on_render(&mut self, _snapshot: &GameSnapshot) {}

    /// Called once when a game ends.
    fn on_game_over(&mut self, _final_score: u32) {}
}
