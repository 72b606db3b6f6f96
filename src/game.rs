use tracing::{debug, info};

use crate::board::Board;
use crate::config::GameConfig;
use crate::error::GameResult;
use crate::render::{BoardRenderer, RenderCommand};
use crate::types::{Cell, Destinations, GameState, Origins, Piece, Player, Step};

/// Where the side to move is in the two-click protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// No origin chosen yet.
    Idle,
    /// Origin chosen; the next click picks a destination.
    Selected(Cell),
    /// The piece on `at` captured and must capture again. `start` is where
    /// the chain began; it is never offered as a landing cell.
    Chain { at: Cell, start: Cell },
}

impl Selection {
    pub fn cell(self) -> Option<Cell> {
        match self {
            Selection::Idle => None,
            Selection::Selected(cell) | Selection::Chain { at: cell, .. } => Some(cell),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnState {
    pub current: Player,
    pub selection: Selection,
}

impl TurnState {
    fn new(first_player: Player) -> Self {
        Self {
            current: first_player,
            selection: Selection::Idle,
        }
    }
}

/// One game of checkers: board, turn and click protocol.
///
/// Rejected clicks are ignored and produce no render commands.
#[derive(Debug, Clone)]
pub struct CheckersGame {
    config: GameConfig,
    board: Board,
    turn: TurnState,
    winner: Option<Player>,
}

impl CheckersGame {
    pub fn new(config: GameConfig) -> GameResult<Self> {
        config.validate()?;
        let turn = TurnState::new(config.first_player);
        Ok(Self {
            config,
            board: Board::new(),
            turn,
            winner: None,
        })
    }

    pub fn new_with_default_config() -> Self {
        let config = GameConfig::default();
        Self {
            turn: TurnState::new(config.first_player),
            config,
            board: Board::new(),
            winner: None,
        }
    }

    /// Starts from an arbitrary position with `current_player` to move.
    pub fn from_board(config: GameConfig, board: Board, current_player: Player) -> GameResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            board,
            turn: TurnState::new(current_player),
            winner: None,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn piece_at(&self, cell: Cell) -> Option<Piece> {
        self.board.piece_at(cell)
    }

    pub fn current_player(&self) -> Player {
        self.turn.current
    }

    pub fn turn(&self) -> TurnState {
        self.turn
    }

    pub fn selected(&self) -> Option<Cell> {
        self.turn.selection.cell()
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// Destinations from `origin`; mid-chain, those left to the chaining piece.
    pub fn legal_destinations(&self, origin: Cell) -> Destinations {
        match self.turn.selection {
            Selection::Chain { at, start } if at == origin => self.chain_destinations(at, start),
            _ => self.board.legal_destinations(origin),
        }
    }

    pub fn movable_origins(&self, player: Player) -> Origins {
        self.board.movable_origins(player)
    }

    pub fn has_no_moves(&self, player: Player) -> bool {
        self.board.has_no_moves(player)
    }

    /// Paints the current position and turn indicator from scratch.
    pub fn initial_render(&self) -> Vec<RenderCommand> {
        let mut commands: Vec<RenderCommand> = self
            .board
            .pieces()
            .map(|(cell, piece)| self.piece_command(cell, piece))
            .collect();
        commands.push(RenderCommand::SetTurnIndicator {
            color: self.color_of(self.turn.current),
        });
        commands
    }

    /// Discards the current game and sets up a fresh one with the same config.
    pub fn new_game(&mut self) -> Vec<RenderCommand> {
        let mut commands = Vec::new();
        if let Some(cell) = self.turn.selection.cell() {
            commands.push(RenderCommand::SetHighlight { cell, on: false });
        }
        commands.extend(
            self.board
                .pieces()
                .map(|(cell, _)| RenderCommand::ClearCell { cell }),
        );

        self.board = Board::new();
        self.turn = TurnState::new(self.config.first_player);
        self.winner = None;
        info!(first = ?self.turn.current, "new game");

        commands.extend(self.initial_render());
        commands
    }

    /// Processes one click on `cell` and returns what the renderer must draw.
    pub fn handle_selection(&mut self, cell: Cell) -> Vec<RenderCommand> {
        let mut commands = Vec::new();

        if self.check_winner(&mut commands) {
            debug!(row = cell.row(), col = cell.col(), "click after game over ignored");
            return commands;
        }

        match self.turn.selection {
            Selection::Idle => self.select_origin(cell, &mut commands),
            Selection::Selected(origin) => self.select_destination(origin, cell, &mut commands),
            Selection::Chain { at, start } => self.continue_chain(at, start, cell, &mut commands),
        }

        commands
    }

    /// Like [`Self::handle_selection`], but drives `renderer` directly.
    pub fn on_cell_clicked(&mut self, cell: Cell, renderer: &mut dyn BoardRenderer) {
        for command in self.handle_selection(cell) {
            command.apply(renderer);
        }
    }

    pub fn to_game_state(&self) -> GameState {
        let (red_count, white_count) = self.board.count();
        GameState {
            board: self.board.to_array().to_vec(),
            current_player: self.turn.current,
            selected: self.turn.selection.cell(),
            in_chain: matches!(self.turn.selection, Selection::Chain { .. }),
            winner: self.winner,
            red_count,
            white_count,
        }
    }

    fn select_origin(&mut self, cell: Cell, commands: &mut Vec<RenderCommand>) {
        let origins = self.board.movable_origins(self.turn.current);
        if !origins.contains(cell) {
            debug!(
                row = cell.row(),
                col = cell.col(),
                forced_capture = !origins.jump_origins.is_empty(),
                "selection ignored"
            );
            return;
        }

        self.turn.selection = Selection::Selected(cell);
        commands.push(RenderCommand::SetHighlight { cell, on: true });
        debug!(row = cell.row(), col = cell.col(), player = ?self.turn.current, "origin selected");
    }

    fn select_destination(&mut self, origin: Cell, cell: Cell, commands: &mut Vec<RenderCommand>) {
        if let Some(step) = self.board.legal_destinations(origin).step_to(cell) {
            self.play(origin, origin, step, commands);
            return;
        }

        // Not a destination: drop the selection, then try the click as a new origin.
        commands.push(RenderCommand::SetHighlight {
            cell: origin,
            on: false,
        });
        self.turn.selection = Selection::Idle;
        debug!(row = origin.row(), col = origin.col(), "selection cleared");
        if cell != origin {
            self.select_origin(cell, commands);
        }
    }

    fn continue_chain(
        &mut self,
        at: Cell,
        start: Cell,
        cell: Cell,
        commands: &mut Vec<RenderCommand>,
    ) {
        match self.chain_destinations(at, start).step_to(cell) {
            Some(step) => self.play(at, start, step, commands),
            None => debug!(
                row = cell.row(),
                col = cell.col(),
                "chain in progress, click ignored"
            ),
        }
    }

    /// Jumps still open to the piece on `at`, excluding a landing on `start`.
    fn chain_destinations(&self, at: Cell, start: Cell) -> Destinations {
        let mut destinations = self.board.legal_destinations(at);
        if !destinations.is_jump {
            return Destinations::default();
        }
        destinations.steps.retain(|step| step.to != start);
        destinations.is_jump = !destinations.steps.is_empty();
        destinations
    }

    fn play(
        &mut self,
        origin: Cell,
        chain_start: Cell,
        step: Step,
        commands: &mut Vec<RenderCommand>,
    ) {
        let was_king = self
            .board
            .piece_at(origin)
            .is_some_and(|piece| piece.is_king);
        let Some(moved) = self.board.apply_step(origin, step) else {
            return;
        };

        commands.push(RenderCommand::SetHighlight {
            cell: origin,
            on: false,
        });
        if let Some(captured) = step.captured {
            commands.push(RenderCommand::ClearCell { cell: captured });
            debug!(row = captured.row(), col = captured.col(), "piece captured");
        }
        commands.push(RenderCommand::ClearCell { cell: origin });
        commands.push(self.piece_command(step.to, moved));
        debug!(
            from = ?(origin.row(), origin.col()),
            to = ?(step.to.row(), step.to.col()),
            player = ?moved.owner,
            "piece moved"
        );
        if moved.is_king && !was_king {
            info!(row = step.to.row(), col = step.to.col(), player = ?moved.owner, "piece crowned");
        }

        if step.captured.is_some() && self.chain_destinations(step.to, chain_start).is_jump {
            self.turn.selection = Selection::Chain {
                at: step.to,
                start: chain_start,
            };
            commands.push(RenderCommand::SetHighlight {
                cell: step.to,
                on: true,
            });
            debug!(row = step.to.row(), col = step.to.col(), "capture chain continues");
            return;
        }

        self.turn.selection = Selection::Idle;
        self.next_player(commands);
        self.check_winner(commands);
    }

    fn next_player(&mut self, commands: &mut Vec<RenderCommand>) {
        self.turn.current = self.turn.current.opponent();
        commands.push(RenderCommand::SetTurnIndicator {
            color: self.color_of(self.turn.current),
        });
    }

    /// Declares the opponent the winner when the side to move is stuck.
    /// Returns `true` once the game is over; the announcement is emitted once.
    fn check_winner(&mut self, commands: &mut Vec<RenderCommand>) -> bool {
        if self.winner.is_some() {
            return true;
        }
        if !self.board.has_no_moves(self.turn.current) {
            return false;
        }

        let winner = self.turn.current.opponent();
        self.winner = Some(winner);
        if let Some(cell) = self.turn.selection.cell() {
            commands.push(RenderCommand::SetHighlight { cell, on: false });
        }
        self.turn.selection = Selection::Idle;
        commands.push(RenderCommand::AnnounceWinner {
            color: self.color_of(winner),
        });
        info!(winner = ?winner, "game over");
        true
    }

    fn piece_command(&self, cell: Cell, piece: Piece) -> RenderCommand {
        RenderCommand::SetPiece {
            cell,
            color: self.color_of(piece.owner),
            is_king: piece.is_king,
        }
    }

    fn color_of(&self, player: Player) -> String {
        self.config.color_of(player).to_string()
    }
}

impl Default for CheckersGame {
    fn default() -> Self {
        Self::new_with_default_config()
    }
}
