use ndarray::Array2;

use super::*;

/// Places mines uniformly at random, with no guarantee about the first click.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomLayoutGenerator {
    seed: u64,
}

impl RandomLayoutGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl LayoutGenerator for RandomLayoutGenerator {
    fn generate(self, config: GameConfig) -> MineLayout {
        use rand::SeedableRng;
        use rand::rngs::SmallRng;
        use rand::seq::index;

        let total_cells = config.total_cells();
        let mut mines = config.mines;

        if mines > total_cells {
            log::warn!(
                "Minefield already full, requested {} but only fits {}",
                mines,
                total_cells
            );
            mines = total_cells;
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut mine_mask: Array2<bool> = Array2::default(config.size.to_nd_index());
        for index in index::sample(&mut rng, total_cells.into(), mines.into()) {
            // sampled below `total_cells`, which fits a `CellIndex`
            let coords = to_coords(index as CellIndex, config.size.1);
            mine_mask[coords.to_nd_index()] = true;
        }

        let layout = MineLayout::from_mine_mask(mine_mask);
        if layout.mine_count() != mines {
            log::warn!(
                "Generated minefield count mismatch, actual: {}, requested: {}",
                layout.mine_count(),
                mines
            );
        }
        layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_exact_mine_count() {
        for seed in 0..32 {
            let layout = RandomLayoutGenerator::new(seed).generate(GameConfig::classic());

            assert_eq!(layout.mine_count(), 60);
            assert_eq!(layout.mine_indices().len(), 60);
            assert_eq!(layout.size(), (20, 20));
        }
    }

    #[test]
    fn same_seed_same_layout() {
        let config = GameConfig::new((9, 9), 10);

        assert_eq!(
            RandomLayoutGenerator::new(7).generate(config),
            RandomLayoutGenerator::new(7).generate(config)
        );
    }

    #[test]
    fn overfull_config_fills_board() {
        let layout = RandomLayoutGenerator::new(1).generate(GameConfig::new_unchecked((2, 2), 9));

        assert_eq!(layout.mine_count(), 4);
    }
}
