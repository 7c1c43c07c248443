use log::debug;
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::{Rng, SeedableRng};

use crate::game::Game;

/// One-ply heuristic: take a winning move, else block the opponent's
/// winning move, else pick a legal move at random.
///
/// Moves are scanned in the order the game lists them, so the first
/// qualifying one is returned. Returns `None` once the game is over.
pub fn choose_move<G, R>(game: &G, rng: &mut R) -> Option<G::Action>
where
    G: Game,
    R: Rng + ?Sized,
{
    select(game, |moves| moves.iter().choose(rng).cloned())
}

fn select<G, F>(game: &G, fallback: F) -> Option<G::Action>
where
    G: Game,
    F: FnOnce(&[G::Action]) -> Option<G::Action>,
{
    if game.done() {
        return None;
    }
    let moves = game.get_available_moves();
    if moves.is_empty() {
        return None;
    }

    let mover = game.current_player();
    if let Some(action) = find_winning_move(game, &moves, &mover) {
        debug!("{:?} takes winning move {:?}", mover, action);
        return Some(action);
    }

    let opponent = game.opponent(&mover);
    if let Some(action) = find_winning_move(game, &moves, &opponent) {
        debug!("{:?} blocks {:?} at {:?}", mover, opponent, action);
        return Some(action);
    }

    let action = fallback(&moves);
    debug!("{:?} falls back to {:?}", mover, action);
    action
}

fn find_winning_move<G: Game>(
    game: &G,
    moves: &[G::Action],
    player: &G::Player,
) -> Option<G::Action> {
    moves
        .iter()
        .find(|action| game.wins_with(action, player))
        .cloned()
}

/// [`choose_move`] bundled with its random source.
///
/// Without a random source the fallback is the first legal move, which
/// keeps whole games reproducible.
#[derive(Debug)]
pub struct MoveSelector<R = StdRng> {
    rng: Option<R>,
}

impl MoveSelector<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn deterministic() -> Self {
        Self { rng: None }
    }
}

impl Default for MoveSelector<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> MoveSelector<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng: Some(rng) }
    }

    pub fn select_move<G: Game>(&mut self, game: &G) -> Option<G::Action> {
        match self.rng.as_mut() {
            Some(rng) => choose_move(game, rng),
            None => select(game, |moves| moves.first().cloned()),
        }
    }
}
