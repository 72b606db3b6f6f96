pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod render;
pub mod types;
pub mod wasm;

pub use board::Board;
pub use config::GameConfig;
pub use error::{GameError, GameResult};
pub use game::{CheckersGame, Selection, TurnState};
pub use render::{BoardRenderer, RenderCommand};
pub use types::{Cell, Destinations, GameState, Origins, Piece, Player, Step};
