use rand::{prelude::*, seq::index};

use super::*;

/// Samples distinct flattened cell indices without replacement, so the cost does not depend on
/// how crowded the board is.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PartialShuffle {
    seed: u64,
}

impl PartialShuffle {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MineGenerator for PartialShuffle {
    fn generate(self, config: &GameConfig) -> MineLayout {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut layout = MineLayout::empty(config.size());
        let cols = usize::from(config.cols());

        let picks = index::sample(
            &mut rng,
            config.total_cells() as usize,
            config.mines() as usize,
        );
        for flat in picks.iter() {
            layout.place(((flat / cols) as Coord, (flat % cols) as Coord));
        }

        layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_exact_mine_count() {
        let config = GameConfig::new(16, 16, Some(40)).unwrap();
        let layout = PartialShuffle::new(3).generate(&config);

        assert_eq!(layout.mine_count(), 40);
        assert_eq!(layout.mine_positions().count(), 40);
    }

    #[test]
    fn full_but_one_leaves_single_safe_cell() {
        let config = GameConfig::new(4, 5, Some(19)).unwrap();
        let layout = PartialShuffle::new(11).generate(&config);

        let safe = (0..4)
            .flat_map(|row| (0..5).map(move |col| (row, col)))
            .filter(|&pos| !layout.contains_mine(pos))
            .count();
        assert_eq!(safe, 1);
    }

    #[test]
    fn same_seed_same_layout() {
        let config = GameConfig::new(10, 12, Some(30)).unwrap();
        assert_eq!(
            PartialShuffle::new(5).generate(&config),
            PartialShuffle::new(5).generate(&config)
        );
    }
}
