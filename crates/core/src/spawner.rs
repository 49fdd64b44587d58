//! Piece spawning with a one-piece lookahead.

use crate::rng::RandomSource;
use crate::types::Identity;

/// The falling piece: an identity plus its cell.
///
/// `row` is signed because the playfield conceptually extends above row 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub identity: Identity,
    pub row: i32,
    pub col: i32,
}

impl ActivePiece {
    pub fn new(identity: Identity, row: i32, col: i32) -> Self {
        Self { identity, row, col }
    }

    pub fn shifted(self, d_row: i32, d_col: i32) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
            ..self
        }
    }
}

/// Draws random pieces and keeps `current` + `next`.
#[derive(Debug, Clone)]
pub struct PieceSpawner<R> {
    rng: R,
    identities: u8,
    spawn_col: i32,
    current: ActivePiece,
    next: ActivePiece,
}

impl<R: RandomSource> PieceSpawner<R> {
    /// Spawns at row 0, column `columns / 2`.
    pub fn new(mut rng: R, identities: u8, columns: usize) -> Self {
        let spawn_col = (columns / 2) as i32;
        let current = draw(&mut rng, identities, spawn_col);
        let next = draw(&mut rng, identities, spawn_col);
        Self {
            rng,
            identities,
            spawn_col,
            current,
            next,
        }
    }

    /// A fresh piece with a uniformly drawn identity at the spawn cell.
    pub fn spawn_random(&mut self) -> ActivePiece {
        draw(&mut self.rng, self.identities, self.spawn_col)
    }

    pub fn current(&self) -> ActivePiece {
        self.current
    }

    pub fn next(&self) -> ActivePiece {
        self.next
    }

    /// Consume `current`, promote `next`, draw a new `next`. Returns the new current.
    pub fn advance(&mut self) -> ActivePiece {
        self.current = self.next;
        self.next = self.spawn_random();
        self.current
    }

    pub fn spawn_col(&self) -> i32 {
        self.spawn_col
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }
}

fn draw<R: RandomSource>(rng: &mut R, identities: u8, spawn_col: i32) -> ActivePiece {
    let index = rng.next_below(identities as u32) as u8;
    ActivePiece::new(Identity::new(index), 0, spawn_col)
}
