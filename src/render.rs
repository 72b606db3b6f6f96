use serde::Serialize;

use crate::types::Cell;

/// One drawing instruction. A click produces a batch of these, emitted after
/// the board has been fully updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum RenderCommand {
    SetPiece {
        cell: Cell,
        color: String,
        is_king: bool,
    },
    ClearCell {
        cell: Cell,
    },
    SetHighlight {
        cell: Cell,
        on: bool,
    },
    SetTurnIndicator {
        color: String,
    },
    /// Terminal. The renderer decides what happens next.
    AnnounceWinner {
        color: String,
    },
}

/// Receiver for render commands on the host side.
pub trait BoardRenderer {
    fn set_piece_appearance(&mut self, cell: Cell, color: &str, is_king: bool);
    fn clear_cell(&mut self, cell: Cell);
    fn set_highlight(&mut self, cell: Cell, on: bool);
    fn set_turn_indicator(&mut self, color: &str);
    fn announce_winner(&mut self, color: &str);
}

impl RenderCommand {
    pub fn apply(&self, renderer: &mut dyn BoardRenderer) {
        match self {
            RenderCommand::SetPiece {
                cell,
                color,
                is_king,
            } => renderer.set_piece_appearance(*cell, color, *is_king),
            RenderCommand::ClearCell { cell } => renderer.clear_cell(*cell),
            RenderCommand::SetHighlight { cell, on } => renderer.set_highlight(*cell, *on),
            RenderCommand::SetTurnIndicator { color } => renderer.set_turn_indicator(color),
            RenderCommand::AnnounceWinner { color } => renderer.announce_winner(color),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CallLog(Vec<String>);

    impl BoardRenderer for CallLog {
        fn set_piece_appearance(&mut self, cell: Cell, color: &str, is_king: bool) {
            self.0
                .push(format!("piece {},{} {color} {is_king}", cell.row(), cell.col()));
        }

        fn clear_cell(&mut self, cell: Cell) {
            self.0.push(format!("clear {},{}", cell.row(), cell.col()));
        }

        fn set_highlight(&mut self, cell: Cell, on: bool) {
            self.0
                .push(format!("highlight {},{} {on}", cell.row(), cell.col()));
        }

        fn set_turn_indicator(&mut self, color: &str) {
            self.0.push(format!("turn {color}"));
        }

        fn announce_winner(&mut self, color: &str) {
            self.0.push(format!("winner {color}"));
        }
    }

    #[test]
    fn apply_dispatches_each_command_to_matching_method() {
        let cell = Cell::new(2, 3).unwrap();
        let commands = [
            RenderCommand::SetPiece {
                cell,
                color: "red".to_string(),
                is_king: true,
            },
            RenderCommand::ClearCell { cell },
            RenderCommand::SetHighlight { cell, on: false },
            RenderCommand::SetTurnIndicator {
                color: "white".to_string(),
            },
            RenderCommand::AnnounceWinner {
                color: "red".to_string(),
            },
        ];
        let mut log = CallLog::default();

        for command in &commands {
            command.apply(&mut log);
        }

        assert_eq!(
            log.0,
            vec![
                "piece 2,3 red true",
                "clear 2,3",
                "highlight 2,3 false",
                "turn white",
                "winner red",
            ]
        );
    }
}
