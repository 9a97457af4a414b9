//! Game lifecycle: Ready -> (WhiteTurn <-> BlackTurn) -> Ready / End

mod snapshot;
mod state;

pub use snapshot::{GameSnapshot, Phase};
pub use state::{GameState, MoveOutcome};
