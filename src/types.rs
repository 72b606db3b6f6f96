use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};

pub const BOARD_WIDTH: u8 = 8;

/// A board coordinate. Always within the 8x8 board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Cell {
    row: u8,
    col: u8,
}

impl Cell {
    pub fn new(row: u8, col: u8) -> GameResult<Self> {
        if row >= BOARD_WIDTH || col >= BOARD_WIDTH {
            return Err(GameError::OutOfRange { row, col });
        }
        Ok(Self { row, col })
    }

    pub fn row(self) -> u8 {
        self.row
    }

    pub fn col(self) -> u8 {
        self.col
    }

    /// Dark squares: row and column of opposite parity.
    pub fn is_playable(self) -> bool {
        (self.row + self.col) % 2 == 1
    }

    /// Iterates the 32 playable cells in row-major order.
    pub fn playable() -> impl Iterator<Item = Cell> {
        (0..(BOARD_WIDTH * BOARD_WIDTH) as usize)
            .map(Cell::from_index)
            .filter(|cell| cell.is_playable())
    }

    pub(crate) fn index(self) -> usize {
        self.row as usize * BOARD_WIDTH as usize + self.col as usize
    }

    pub(crate) fn from_index(pos: usize) -> Self {
        debug_assert!(pos < (BOARD_WIDTH * BOARD_WIDTH) as usize);
        Self {
            row: (pos / BOARD_WIDTH as usize) as u8,
            col: (pos % BOARD_WIDTH as usize) as u8,
        }
    }

    /// Cell `steps` diagonal steps away along `(dr, dc)`, if still on the board.
    pub(crate) fn offset(self, (dr, dc): (i8, i8), steps: i8) -> Option<Cell> {
        let row = self.row as i8 + dr * steps;
        let col = self.col as i8 + dc * steps;
        if (0..BOARD_WIDTH as i8).contains(&row) && (0..BOARD_WIDTH as i8).contains(&col) {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }
}

/// One of the two sides. `Red` starts on rows 0-2, `White` on rows 5-7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Red,
    White,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::Red => Player::White,
            Player::White => Player::Red,
        }
    }

    /// Row delta of a forward step.
    pub fn forward(self) -> i8 {
        match self {
            Player::Red => 1,
            Player::White => -1,
        }
    }

    /// Far row on which this side's men are crowned.
    pub fn crown_row(self) -> u8 {
        match self {
            Player::Red => BOARD_WIDTH - 1,
            Player::White => 0,
        }
    }

    pub(crate) fn home_rows(self) -> std::ops::RangeInclusive<u8> {
        match self {
            Player::Red => 0..=2,
            Player::White => 5..=7,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Piece {
    pub owner: Player,
    pub is_king: bool,
}

impl Piece {
    pub fn man(owner: Player) -> Self {
        Self {
            owner,
            is_king: false,
        }
    }

    pub fn king(owner: Player) -> Self {
        Self {
            owner,
            is_king: true,
        }
    }
}

/// A single move from some origin: a diagonal step, or a jump over `captured`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Step {
    pub to: Cell,
    pub captured: Option<Cell>,
}

/// Destinations reachable from one origin in a single legal step.
///
/// When any jump exists, `steps` holds only jumps and `is_jump` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Destinations {
    pub steps: Vec<Step>,
    pub is_jump: bool,
}

impl Destinations {
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.step_to(cell).is_some()
    }

    pub fn step_to(&self, cell: Cell) -> Option<Step> {
        self.steps.iter().copied().find(|step| step.to == cell)
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.steps.iter().map(|step| step.to)
    }

    /// Cells that would be captured, one per jump destination.
    pub fn jump_targets(&self) -> impl Iterator<Item = Cell> + '_ {
        self.steps.iter().filter_map(|step| step.captured)
    }
}

/// Cells the side to move may select this turn.
///
/// If `jump_origins` is non-empty, `origins` equals `jump_origins`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Origins {
    pub origins: Vec<Cell>,
    pub jump_origins: Vec<Cell>,
}

impl Origins {
    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.origins.contains(&cell)
    }
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Row-major, 0=empty, 1=red, 2=white, 3=red king, 4=white king.
    pub board: Vec<u8>,
    pub current_player: Player,
    pub selected: Option<Cell>,
    /// Contract: `true` only while a capture chain forces `selected` to move again.
    pub in_chain: bool,
    pub winner: Option<Player>,
    pub red_count: u8,
    pub white_count: u8,
}

impl GameState {
    pub fn is_game_over(&self) -> bool {
        self.winner.is_some()
    }
}
