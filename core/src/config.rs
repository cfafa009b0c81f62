use serde::{Deserialize, Serialize};

use crate::*;

/// Rows and columns of the board used when nothing else is asked for.
pub const DEFAULT_SIZE: Coord2 = (8, 8);

/// When a board counts as won.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinRule {
    /// Every safe cell is open and the flags sit exactly on the mines.
    #[default]
    ExactFlags,
    /// Every safe cell is open; flags are ignored.
    AllSafeOpen,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedConfig")]
pub struct GameConfig {
    rows: Coord,
    cols: Coord,
    mines: CellCount,
    win_rule: WinRule,
}

/// Wire shape of [`GameConfig`], checked before it becomes one.
#[derive(Deserialize)]
struct UncheckedConfig {
    rows: Coord,
    cols: Coord,
    mines: CellCount,
    #[serde(default)]
    win_rule: WinRule,
}

impl TryFrom<UncheckedConfig> for GameConfig {
    type Error = GameError;

    fn try_from(raw: UncheckedConfig) -> Result<Self> {
        Ok(Self::new(raw.rows, raw.cols, Some(raw.mines))?.with_win_rule(raw.win_rule))
    }
}

impl GameConfig {
    /// Validates a board shape. With `mines` omitted the board gets `floor(sqrt(rows * cols))`.
    pub fn new(rows: Coord, cols: Coord, mines: Option<CellCount>) -> Result<Self> {
        let config = Self {
            rows,
            cols,
            mines: mines.unwrap_or_else(|| default_mine_count(rows, cols)),
            win_rule: WinRule::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks `0 < mines < rows * cols`, which also rules out empty boards.
    pub fn validate(&self) -> Result<()> {
        if self.mines == 0 || self.mines >= self.total_cells() {
            return Err(GameError::InvalidConfig {
                rows: self.rows,
                cols: self.cols,
                mines: self.mines,
            });
        }
        Ok(())
    }

    /// Skips validation, for exercising the checks that guard against bad configs.
    #[cfg(test)]
    pub(crate) const fn new_unchecked(rows: Coord, cols: Coord, mines: CellCount) -> Self {
        Self {
            rows,
            cols,
            mines,
            win_rule: WinRule::ExactFlags,
        }
    }

    pub const fn with_win_rule(mut self, win_rule: WinRule) -> Self {
        self.win_rule = win_rule;
        self
    }

    pub const fn rows(&self) -> Coord {
        self.rows
    }

    pub const fn cols(&self) -> Coord {
        self.cols
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn win_rule(&self) -> WinRule {
        self.win_rule
    }

    pub const fn total_cells(&self) -> CellCount {
        area(self.rows, self.cols)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        let (rows, cols) = DEFAULT_SIZE;
        Self {
            rows,
            cols,
            mines: default_mine_count(rows, cols),
            win_rule: WinRule::default(),
        }
    }
}

pub const fn default_mine_count(rows: Coord, cols: Coord) -> CellCount {
    area(rows, cols).isqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_mines_is_floor_sqrt_of_area() {
        assert_eq!(GameConfig::new(8, 8, None).unwrap().mines(), 8);
        assert_eq!(GameConfig::new(3, 5, None).unwrap().mines(), 3);
        assert_eq!(GameConfig::new(10, 10, None).unwrap().mines(), 10);
        assert_eq!(GameConfig::default(), GameConfig::new(8, 8, None).unwrap());
    }

    #[test]
    fn rejects_zero_dimensions() {
        assert!(matches!(
            GameConfig::new(0, 5, Some(1)),
            Err(GameError::InvalidConfig { .. })
        ));
        assert!(matches!(
            GameConfig::new(5, 0, None),
            Err(GameError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn rejects_mine_counts_without_safe_cells() {
        assert_eq!(
            GameConfig::new(2, 2, Some(4)),
            Err(GameError::InvalidConfig {
                rows: 2,
                cols: 2,
                mines: 4
            })
        );
        assert!(GameConfig::new(2, 2, Some(5)).is_err());
        assert!(GameConfig::new(2, 2, Some(0)).is_err());
        assert!(GameConfig::new(2, 2, Some(3)).is_ok());
    }

    #[test]
    fn single_cell_board_is_rejected() {
        assert!(GameConfig::new(1, 1, None).is_err());
        assert!(GameConfig::new(1, 1, Some(1)).is_err());
    }

    #[test]
    fn deserialize_checks_mine_count() {
        let too_many = serde_json::from_str::<GameConfig>(r#"{"rows":2,"cols":2,"mines":5}"#);
        assert!(too_many.is_err());

        let none = serde_json::from_str::<GameConfig>(r#"{"rows":2,"cols":2,"mines":0}"#);
        assert!(none.is_err());

        let empty = serde_json::from_str::<GameConfig>(r#"{"rows":0,"cols":4,"mines":1}"#);
        assert!(empty.is_err());
    }

    #[test]
    fn deserialize_keeps_valid_config() {
        let config = GameConfig::new(3, 4, Some(2))
            .unwrap()
            .with_win_rule(WinRule::AllSafeOpen);
        let json = serde_json::to_string(&config).unwrap();

        assert_eq!(serde_json::from_str::<GameConfig>(&json).unwrap(), config);
        assert_eq!(
            serde_json::from_str::<GameConfig>(r#"{"rows":3,"cols":4,"mines":2}"#)
                .unwrap()
                .win_rule(),
            WinRule::ExactFlags
        );
    }

    #[test]
    fn win_rule_defaults_to_exact_flags() {
        let config = GameConfig::new(4, 4, Some(2)).unwrap();
        assert_eq!(config.win_rule(), WinRule::ExactFlags);
        assert_eq!(
            config.with_win_rule(WinRule::AllSafeOpen).win_rule(),
            WinRule::AllSafeOpen
        );
        assert_eq!(config.safe_cells(), 14);
    }
}
