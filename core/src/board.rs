use core::fmt;
use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardState {
    #[default]
    Active,
    Won,
    Lost,
}

impl BoardState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Result of a single move, for the caller to react to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Continue,
    Won,
    Lost,
}

impl Outcome {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// One game of minesweeper: the grid, the mines and the flags placed so far.
///
/// Positions are `(row, col)`. Every mutation runs to completion and reports an [`Outcome`];
/// once the game is won or lost the board only answers queries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoardSnapshot")]
pub struct Board {
    config: GameConfig,
    grid: Array2<Cell>,
    mined: BTreeSet<Coord2>,
    flagged: BTreeSet<Coord2>,
    opened_count: CellCount,
    state: BoardState,
    triggered_mine: Option<Coord2>,
}

/// Serialized form of a [`Board`], checked for consistency before it is trusted.
#[derive(Deserialize)]
struct BoardSnapshot {
    config: GameConfig,
    grid: Array2<Cell>,
    mined: BTreeSet<Coord2>,
    flagged: BTreeSet<Coord2>,
    opened_count: CellCount,
    state: BoardState,
    triggered_mine: Option<Coord2>,
}

fn positions_where(grid: &Array2<Cell>, pred: impl Fn(&Cell) -> bool) -> BTreeSet<Coord2> {
    grid.indexed_iter()
        .filter(|(_, cell)| pred(cell))
        .map(|((row, col), _)| (row as Coord, col as Coord))
        .collect()
}

impl TryFrom<BoardSnapshot> for Board {
    type Error = GameError;

    fn try_from(snapshot: BoardSnapshot) -> Result<Self> {
        let BoardSnapshot {
            config,
            grid,
            mined,
            flagged,
            opened_count,
            state,
            triggered_mine,
        } = snapshot;
        let inconsistent = GameError::InvalidConfig {
            rows: config.rows(),
            cols: config.cols(),
            mines: config.mines(),
        };

        let (rows, cols) = config.size();
        if grid.dim() != (usize::from(rows), usize::from(cols)) {
            return Err(inconsistent);
        }
        if let Some(cell) = grid.iter().find(|cell| {
            !cell.value().is_valid()
                || cell.value() == CellValue::Unset
                || (cell.is_open() && cell.is_flagged())
        }) {
            return Err(GameError::InvalidValue(cell.value()));
        }

        let opened = positions_where(&grid, |cell| cell.is_open() && !cell.is_bomb());
        let consistent = CellCount::try_from(mined.len()) == Ok(config.mines())
            && mined == positions_where(&grid, Cell::is_bomb)
            && flagged == positions_where(&grid, Cell::is_flagged)
            && CellCount::try_from(opened.len()) == Ok(opened_count)
            && triggered_mine.is_none_or(|coords| mined.contains(&coords))
            && (state == BoardState::Lost) == triggered_mine.is_some();
        if !consistent {
            return Err(inconsistent);
        }

        Ok(Self {
            config,
            grid,
            mined,
            flagged,
            opened_count,
            state,
            triggered_mine,
        })
    }
}

impl Board {
    /// Builds a randomly mined board, see [`GameConfig::new`] for how `mines` is defaulted.
    pub fn new(rows: Coord, cols: Coord, mines: Option<CellCount>) -> Result<Self> {
        let config = GameConfig::new(rows, cols, mines)?;
        let seed = rand::random();
        log::debug!("Seeding mine placement with {seed}");
        Self::generate(config, RejectionSampler::new(seed))
    }

    pub fn generate(config: GameConfig, generator: impl MineGenerator) -> Result<Self> {
        config.validate()?;
        let layout = generator.generate(&config);
        Self::from_layout(config, layout)
    }

    /// Builds a board around a fixed mine layout, which must match `config` in size and count.
    pub fn from_layout(config: GameConfig, layout: MineLayout) -> Result<Self> {
        let (rows, cols) = layout.size();
        if layout.size() != config.size() || layout.mine_count() != config.mines() {
            return Err(GameError::InvalidConfig {
                rows,
                cols,
                mines: layout.mine_count(),
            });
        }

        let mut grid: Array2<Cell> = Array2::default(grid_index(config.size()));
        let mined: BTreeSet<Coord2> = layout.mine_positions().collect();

        for &coords in &mined {
            grid[grid_index(coords)].set_value(CellValue::Bomb)?;
        }
        for row in 0..rows {
            for col in 0..cols {
                let coords = (row, col);
                if !layout.contains_mine(coords) {
                    let count = layout.adjacent_mine_count(coords);
                    grid[grid_index(coords)].set_value(CellValue::Adjacent(count))?;
                }
            }
        }

        log::debug!(
            "Generated {}x{} board with {} mines",
            rows,
            cols,
            config.mines()
        );

        Ok(Self {
            config,
            grid,
            mined,
            flagged: BTreeSet::new(),
            opened_count: 0,
            state: BoardState::default(),
            triggered_mine: None,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn rows(&self) -> Coord {
        self.config.rows()
    }

    pub fn cols(&self) -> Coord {
        self.config.cols()
    }

    pub fn size(&self) -> Coord2 {
        self.config.size()
    }

    pub fn mine_count(&self) -> CellCount {
        self.config.mines()
    }

    pub fn state(&self) -> BoardState {
        self.state
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_finished()
    }

    /// Number of cells opened so far, not counting a triggered mine.
    pub fn opened_count(&self) -> CellCount {
        self.opened_count
    }

    /// Mines minus flags; goes negative when the player over-flags.
    pub fn mines_left(&self) -> i64 {
        let flagged = i64::try_from(self.flagged.len()).unwrap_or(i64::MAX);
        i64::from(self.config.mines()) - flagged
    }

    /// The mine whose reveal lost the game.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn mined_positions(&self) -> &BTreeSet<Coord2> {
        &self.mined
    }

    pub fn flagged_positions(&self) -> &BTreeSet<Coord2> {
        &self.flagged
    }

    pub fn cell_at(&self, row: Coord, col: Coord) -> Result<&Cell> {
        let coords = self.validate_coords(row, col)?;
        Ok(&self.grid[grid_index(coords)])
    }

    pub fn neighbors(&self, row: Coord, col: Coord) -> Result<NeighborIter> {
        let coords = self.validate_coords(row, col)?;
        Ok(NeighborIter::new(coords, self.size()))
    }

    /// Rows of the grid, top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = ArrayView1<'_, Cell>> {
        self.grid.rows().into_iter()
    }

    /// Every cell with its position, in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, &Cell)> {
        self.grid
            .indexed_iter()
            .map(|((row, col), cell)| ((row as Coord, col as Coord), cell))
    }

    /// Opens a cell, flooding outwards through zero-count cells.
    ///
    /// Open and flagged cells are left alone and yield [`Outcome::Continue`].
    pub fn reveal(&mut self, row: Coord, col: Coord) -> Result<Outcome> {
        let coords = self.validate_coords(row, col)?;
        self.check_active()?;

        let cell = &mut self.grid[grid_index(coords)];
        if !cell.is_hidden() {
            return Ok(Outcome::Continue);
        }

        if cell.is_bomb() {
            cell.open();
            self.triggered_mine = Some(coords);
            self.end_game(BoardState::Lost);
            return Ok(Outcome::Lost);
        }

        self.flood_open(coords);
        Ok(self.check_win())
    }

    /// Flags or unflags a closed cell. Open cells are left alone.
    pub fn toggle_flag(&mut self, row: Coord, col: Coord) -> Result<Outcome> {
        let coords = self.validate_coords(row, col)?;
        self.check_active()?;

        let cell = &mut self.grid[grid_index(coords)];
        if !cell.toggle_flag() {
            return Ok(Outcome::Continue);
        }

        if cell.is_flagged() {
            self.flagged.insert(coords);
        } else {
            self.flagged.remove(&coords);
        }

        Ok(self.check_win())
    }

    fn flood_open(&mut self, start: Coord2) {
        let size = self.size();
        let mut visited = BTreeSet::from([start]);
        let mut to_visit = VecDeque::from([start]);
        let mut opened: CellCount = 0;

        while let Some(coords) = to_visit.pop_front() {
            let cell = &mut self.grid[grid_index(coords)];
            if !cell.open() {
                continue;
            }
            opened += 1;

            if cell.value() != CellValue::Adjacent(0) {
                continue;
            }

            for neighbor in NeighborIter::new(coords, size) {
                if self.grid[grid_index(neighbor)].is_hidden() && visited.insert(neighbor) {
                    to_visit.push_back(neighbor);
                }
            }
        }

        self.opened_count += opened;
        log::trace!("Opened {opened} cells starting at {start:?}");
    }

    fn check_win(&mut self) -> Outcome {
        let all_safe_open = self.opened_count == self.config.safe_cells();
        let won = match self.config.win_rule() {
            WinRule::ExactFlags => all_safe_open && self.flagged == self.mined,
            WinRule::AllSafeOpen => all_safe_open,
        };

        if won {
            self.end_game(BoardState::Won);
            Outcome::Won
        } else {
            Outcome::Continue
        }
    }

    fn end_game(&mut self, state: BoardState) {
        if self.state.is_finished() {
            return;
        }
        self.state = state;
        log::info!(
            "Game over: {:?} after opening {} of {} safe cells",
            state,
            self.opened_count,
            self.config.safe_cells()
        );
    }

    fn check_active(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }

    fn validate_coords(&self, row: Coord, col: Coord) -> Result<Coord2> {
        if row < self.rows() && col < self.cols() {
            Ok((row, col))
        } else {
            Err(GameError::IndexOutOfRange { row, col })
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.iter_rows() {
            for (i, cell) in row.iter().enumerate() {
                if i > 0 {
                    f.write_str("\t")?;
                }
                write!(f, "{}", cell.value())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
