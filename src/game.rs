use std::hash::Hash;

/// Two-player placement game as seen by a move selector.
pub trait Game: Clone + std::fmt::Display {
    type Action: std::fmt::Debug + Hash + PartialEq + Eq + Clone;
    type Player: PartialEq + std::fmt::Debug + Clone;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Plays `action` for the current player.
    fn step(&mut self, action: Self::Action) -> Result<(), Self::Error>;

    fn get_available_moves(&self) -> Vec<Self::Action>;

    fn current_player(&self) -> Self::Player;

    fn opponent(&self, player: &Self::Player) -> Self::Player;

    fn done(&self) -> bool;

    fn check_winner(&self) -> Option<Self::Player>;

    /// Whether `player` taking `action` right now would win on the spot.
    /// Answered without changing the game.
    fn wins_with(&self, action: &Self::Action, player: &Self::Player) -> bool;
}
