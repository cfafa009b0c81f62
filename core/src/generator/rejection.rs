use rand::prelude::*;

use super::*;

/// Above this share of mined cells, rejection sampling starts wasting most of its draws.
const DENSE_RATIO: (u64, u64) = (9, 10);

fn is_dense(config: &GameConfig) -> bool {
    let (dense_num, dense_den) = DENSE_RATIO;
    u64::from(config.mines()) * dense_den > u64::from(config.total_cells()) * dense_num
}

/// Draws a row and then a column uniformly, re-drawing whenever the cell already holds a mine.
///
/// Terminates because a valid config always leaves at least one safe cell, but gets slow on
/// nearly full boards; [`PartialShuffle`] has a fixed cost instead.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RejectionSampler {
    seed: u64,
}

impl RejectionSampler {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MineGenerator for RejectionSampler {
    fn generate(self, config: &GameConfig) -> MineLayout {
        if is_dense(config) {
            log::warn!(
                "Rejection sampling {} mines into {} cells, expect many redraws",
                config.mines(),
                config.total_cells()
            );
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut layout = MineLayout::empty(config.size());
        let mut draws: u64 = 0;

        while layout.mine_count() < config.mines() {
            let row = rng.random_range(0..config.rows());
            let col = rng.random_range(0..config.cols());
            draws += 1;
            layout.place((row, col));
        }

        log::trace!("Placed {} mines in {} draws", layout.mine_count(), draws);
        layout
    }
}
