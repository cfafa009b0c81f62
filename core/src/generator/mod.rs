use crate::*;
pub use rejection::*;
pub use shuffle::*;

mod rejection;
mod shuffle;

/// Chooses which cells of a fresh board hold mines.
///
/// Implementations must place exactly `config.mines()` distinct mines.
pub trait MineGenerator {
    fn generate(self, config: &GameConfig) -> MineLayout;
}
