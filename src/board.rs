use crate::types::{Cell, Destinations, Origins, Piece, Player, Step};

const BOARD_SIZE: usize = 8;
const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;
const KING_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, 1), (1, -1)];
const RED_DIRECTIONS: [(i8, i8); 2] = [(1, 1), (1, -1)];
const WHITE_DIRECTIONS: [(i8, i8); 2] = [(-1, -1), (-1, 1)];

/// Checkers board state represented by three bitboards.
///
/// `kings` is always a subset of `red | white`, and only playable cells are set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    red: u64,
    white: u64,
    kings: u64,
}

impl Board {
    /// Creates the initial board: twelve men per side on the playable cells
    /// of rows 0-2 (red) and 5-7 (white).
    pub fn new() -> Self {
        let mut board = Self::empty();
        for cell in Cell::playable() {
            for player in [Player::Red, Player::White] {
                if player.home_rows().contains(&cell.row()) {
                    board.put(cell, Piece::man(player));
                }
            }
        }
        board
    }

    pub fn empty() -> Self {
        Self {
            red: 0,
            white: 0,
            kings: 0,
        }
    }

    /// Builds a board holding exactly `pieces`. Pieces on non-playable cells are dropped.
    pub fn from_pieces(pieces: &[(Cell, Piece)]) -> Self {
        let mut board = Self::empty();
        for &(cell, piece) in pieces {
            if cell.is_playable() {
                board.put(cell, piece);
            }
        }
        board
    }

    pub fn piece_at(&self, cell: Cell) -> Option<Piece> {
        let square = bit(cell.index());
        let owner = if (self.red & square) != 0 {
            Player::Red
        } else if (self.white & square) != 0 {
            Player::White
        } else {
            return None;
        };
        Some(Piece {
            owner,
            is_king: (self.kings & square) != 0,
        })
    }

    /// All occupied cells with their pieces, in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Cell, Piece)> + '_ {
        Cell::playable().filter_map(|cell| self.piece_at(cell).map(|piece| (cell, piece)))
    }

    /// Returns the cells reachable from `origin` in one legal step.
    /// Empty when `origin` holds no piece.
    pub fn legal_destinations(&self, origin: Cell) -> Destinations {
        let Some(piece) = self.piece_at(origin) else {
            return Destinations::default();
        };

        let opp = self.occupancy(piece.owner.opponent());
        let occupied = self.red | self.white;
        let mut simple = Vec::new();
        let mut jumps = Vec::new();

        for &direction in directions(piece) {
            let Some(adjacent) = origin.offset(direction, 1) else {
                continue;
            };
            let adjacent_bit = bit(adjacent.index());
            if (occupied & adjacent_bit) == 0 {
                simple.push(Step {
                    to: adjacent,
                    captured: None,
                });
            } else if (opp & adjacent_bit) != 0
                && let Some(landing) = origin.offset(direction, 2)
                && (occupied & bit(landing.index())) == 0
            {
                jumps.push(Step {
                    to: landing,
                    captured: Some(adjacent),
                });
            }
        }

        if jumps.is_empty() {
            Destinations {
                steps: simple,
                is_jump: false,
            }
        } else {
            Destinations {
                steps: jumps,
                is_jump: true,
            }
        }
    }

    /// Returns the cells `player` may select, honouring mandatory capture
    /// across the whole board.
    pub fn movable_origins(&self, player: Player) -> Origins {
        let mut origins = Vec::new();
        let mut jump_origins = Vec::new();

        for cell in self.cells_of(player) {
            let destinations = self.legal_destinations(cell);
            if destinations.is_empty() {
                continue;
            }
            if destinations.is_jump {
                jump_origins.push(cell);
            }
            origins.push(cell);
        }

        if !jump_origins.is_empty() {
            origins = jump_origins.clone();
        }

        Origins {
            origins,
            jump_origins,
        }
    }

    pub fn has_no_moves(&self, player: Player) -> bool {
        self.cells_of(player)
            .all(|cell| self.legal_destinations(cell).is_empty())
    }

    /// Moves the piece on `origin` along `step`, removes the captured piece and
    /// crowns on the far row. Returns the moved piece after promotion, or
    /// `None` (board unchanged) when `origin` is empty.
    ///
    /// Caller contract: `step` comes from `legal_destinations(origin)`.
    pub fn apply_step(&mut self, origin: Cell, step: Step) -> Option<Piece> {
        let piece = self.piece_at(origin)?;

        if let Some(captured) = step.captured {
            self.remove(captured);
        }
        self.remove(origin);

        let moved = Piece {
            owner: piece.owner,
            is_king: piece.is_king || step.to.row() == piece.owner.crown_row(),
        };
        self.put(step.to, moved);
        Some(moved)
    }

    /// Returns `(red_count, white_count)`.
    pub fn count(&self) -> (u8, u8) {
        (self.red.count_ones() as u8, self.white.count_ones() as u8)
    }

    /// Converts board to `[u8; 64]` where 0=empty, 1=red, 2=white, kings add 2.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut board = [0u8; NUM_SQUARES];
        for (cell, piece) in self.pieces() {
            let base = match piece.owner {
                Player::Red => 1,
                Player::White => 2,
            };
            board[cell.index()] = if piece.is_king { base + 2 } else { base };
        }
        board
    }

    fn occupancy(&self, player: Player) -> u64 {
        match player {
            Player::Red => self.red,
            Player::White => self.white,
        }
    }

    fn cells_of(&self, player: Player) -> impl Iterator<Item = Cell> + '_ {
        let mask = self.occupancy(player);
        Cell::playable().filter(move |cell| (mask & bit(cell.index())) != 0)
    }

    fn put(&mut self, cell: Cell, piece: Piece) {
        self.remove(cell);
        let square = bit(cell.index());
        match piece.owner {
            Player::Red => self.red |= square,
            Player::White => self.white |= square,
        }
        if piece.is_king {
            self.kings |= square;
        }
    }

    fn remove(&mut self, cell: Cell) {
        let keep = !bit(cell.index());
        self.red &= keep;
        self.white &= keep;
        self.kings &= keep;
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

fn directions(piece: Piece) -> &'static [(i8, i8)] {
    if piece.is_king {
        &KING_DIRECTIONS
    } else {
        match piece.owner {
            Player::Red => &RED_DIRECTIONS,
            Player::White => &WHITE_DIRECTIONS,
        }
    }
}

fn bit(pos: usize) -> u64 {
    if pos < NUM_SQUARES { 1u64 << pos } else { 0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(row: u8, col: u8) -> Cell {
        Cell::new(row, col).unwrap()
    }

    fn sorted(cells: impl Iterator<Item = Cell>) -> Vec<(u8, u8)> {
        let mut out: Vec<(u8, u8)> = cells.map(|c| (c.row(), c.col())).collect();
        out.sort();
        out
    }

    #[test]
    fn initial_board_has_twelve_men_each_on_home_rows() {
        let board = Board::new();

        assert_eq!(board.count(), (12, 12));
        for (cell, piece) in board.pieces() {
            assert!(cell.is_playable());
            assert!(!piece.is_king);
            assert!(piece.owner.home_rows().contains(&cell.row()));
        }
        for col in 0..8 {
            assert_eq!(board.piece_at(cell(3, col)), None);
            assert_eq!(board.piece_at(cell(4, col)), None);
        }
    }

    #[test]
    fn white_man_on_left_edge_has_single_forward_step() {
        let board = Board::new();

        let destinations = board.legal_destinations(cell(5, 0));

        assert_eq!(sorted(destinations.cells()), vec![(4, 1)]);
        assert!(!destinations.is_jump);
    }

    #[test]
    fn men_only_move_toward_their_crown_row() {
        let board = Board::from_pieces(&[
            (cell(3, 2), Piece::man(Player::Red)),
            (cell(4, 5), Piece::man(Player::White)),
        ]);

        assert_eq!(
            sorted(board.legal_destinations(cell(3, 2)).cells()),
            vec![(4, 1), (4, 3)]
        );
        assert_eq!(
            sorted(board.legal_destinations(cell(4, 5)).cells()),
            vec![(3, 4), (3, 6)]
        );
    }

    #[test]
    fn king_moves_in_all_four_diagonals() {
        let board = Board::from_pieces(&[(cell(3, 2), Piece::king(Player::White))]);

        assert_eq!(
            sorted(board.legal_destinations(cell(3, 2)).cells()),
            vec![(2, 1), (2, 3), (4, 1), (4, 3)]
        );
    }

    #[test]
    fn available_jump_excludes_simple_moves() {
        let board = Board::from_pieces(&[
            (cell(4, 1), Piece::man(Player::White)),
            (cell(3, 2), Piece::man(Player::Red)),
        ]);

        let destinations = board.legal_destinations(cell(4, 1));

        assert!(destinations.is_jump);
        assert_eq!(
            destinations.steps,
            vec![Step {
                to: cell(2, 3),
                captured: Some(cell(3, 2)),
            }]
        );
        assert!(!destinations.contains(cell(3, 0)));
        assert_eq!(sorted(destinations.jump_targets()), vec![(3, 2)]);
    }

    #[test]
    fn jump_needs_empty_on_board_landing() {
        let board = Board::from_pieces(&[
            (cell(1, 0), Piece::man(Player::White)),
            (cell(0, 1), Piece::man(Player::Red)),
            (cell(4, 3), Piece::man(Player::White)),
            (cell(3, 4), Piece::man(Player::Red)),
            (cell(2, 5), Piece::man(Player::Red)),
        ]);

        assert!(board.legal_destinations(cell(1, 0)).is_empty());
        let destinations = board.legal_destinations(cell(4, 3));
        assert!(!destinations.is_jump);
        assert_eq!(sorted(destinations.cells()), vec![(3, 2)]);
    }

    #[test]
    fn own_pieces_are_never_jumped() {
        let board = Board::from_pieces(&[
            (cell(2, 1), Piece::man(Player::Red)),
            (cell(3, 2), Piece::man(Player::Red)),
        ]);

        let destinations = board.legal_destinations(cell(2, 1));

        assert!(!destinations.is_jump);
        assert_eq!(sorted(destinations.cells()), vec![(3, 0)]);
    }

    #[test]
    fn empty_or_non_playable_origin_yields_nothing() {
        let board = Board::new();

        assert!(board.legal_destinations(cell(3, 2)).is_empty());
        assert!(board.legal_destinations(cell(0, 0)).is_empty());
    }

    #[test]
    fn any_jump_restricts_origins_to_jump_origins() {
        let board = Board::from_pieces(&[
            (cell(4, 1), Piece::man(Player::White)),
            (cell(3, 2), Piece::man(Player::Red)),
            (cell(6, 5), Piece::man(Player::White)),
        ]);

        let origins = board.movable_origins(Player::White);

        assert_eq!(origins.jump_origins, vec![cell(4, 1)]);
        assert_eq!(origins.origins, origins.jump_origins);
        assert!(!origins.contains(cell(6, 5)));
    }

    #[test]
    fn without_jumps_every_mobile_piece_is_an_origin() {
        let origins = Board::new().movable_origins(Player::Red);

        assert!(origins.jump_origins.is_empty());
        assert_eq!(
            sorted(origins.origins.into_iter()),
            vec![(2, 1), (2, 3), (2, 5), (2, 7)]
        );
    }

    #[test]
    fn blocked_side_has_no_moves() {
        let board = Board::from_pieces(&[
            (cell(0, 1), Piece::man(Player::White)),
            (cell(7, 0), Piece::man(Player::Red)),
        ]);

        assert!(board.has_no_moves(Player::White));
        assert!(board.has_no_moves(Player::Red));
        assert!(board.movable_origins(Player::White).is_empty());
        assert!(!Board::new().has_no_moves(Player::Red));
    }

    #[test]
    fn apply_jump_removes_midpoint_piece_only() {
        let mut board = Board::from_pieces(&[
            (cell(4, 1), Piece::man(Player::White)),
            (cell(3, 2), Piece::man(Player::Red)),
            (cell(0, 7), Piece::man(Player::Red)),
        ]);
        let step = board.legal_destinations(cell(4, 1)).steps[0];

        let moved = board.apply_step(cell(4, 1), step).unwrap();

        assert_eq!(moved, Piece::man(Player::White));
        assert_eq!(board.piece_at(cell(4, 1)), None);
        assert_eq!(board.piece_at(cell(3, 2)), None);
        assert_eq!(board.piece_at(cell(2, 3)), Some(Piece::man(Player::White)));
        assert_eq!(board.count(), (1, 1));
    }

    #[test]
    fn reaching_far_row_crowns_and_kings_stay_kings() {
        let mut board = Board::from_pieces(&[
            (cell(6, 1), Piece::man(Player::Red)),
            (cell(5, 4), Piece::king(Player::Red)),
        ]);

        let crowned = board
            .apply_step(
                cell(6, 1),
                Step {
                    to: cell(7, 2),
                    captured: None,
                },
            )
            .unwrap();
        let retreated = board
            .apply_step(
                cell(5, 4),
                Step {
                    to: cell(4, 3),
                    captured: None,
                },
            )
            .unwrap();

        assert!(crowned.is_king);
        assert!(retreated.is_king);
        assert_eq!(board.piece_at(cell(7, 2)), Some(Piece::king(Player::Red)));
    }

    #[test]
    fn apply_from_empty_origin_keeps_board_unchanged() {
        let mut board = Board::new();
        let before = board;

        let moved = board.apply_step(
            cell(3, 2),
            Step {
                to: cell(4, 3),
                captured: None,
            },
        );

        assert_eq!(moved, None);
        assert_eq!(board, before);
    }

    #[test]
    fn to_array_encodes_owner_and_king() {
        let board = Board::from_pieces(&[
            (cell(0, 1), Piece::man(Player::Red)),
            (cell(7, 6), Piece::king(Player::White)),
        ]);

        let cells = board.to_array();

        assert_eq!(cells[1], 1);
        assert_eq!(cells[62], 4);
        assert_eq!(cells.iter().filter(|&&v| v != 0).count(), 2);
    }
}
