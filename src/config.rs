use serde::Deserialize;

use crate::error::{GameError, GameResult};
use crate::types::Player;

/// Per-game settings supplied by the host. Missing fields take defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    pub red_color: String,
    pub white_color: String,
    pub first_player: Player,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            red_color: "red".to_string(),
            white_color: "white".to_string(),
            first_player: Player::Red,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> GameResult<()> {
        if self.red_color.trim().is_empty() || self.white_color.trim().is_empty() {
            return Err(GameError::InvalidConfig {
                message: "player colors must not be empty".to_string(),
            });
        }
        if self.red_color == self.white_color {
            return Err(GameError::InvalidConfig {
                message: format!("both players use the color {:?}", self.red_color),
            });
        }
        Ok(())
    }

    /// Display color bound to `player`.
    pub fn color_of(&self, player: Player) -> &str {
        match player {
            Player::Red => &self.red_color,
            Player::White => &self.white_color,
        }
    }
}
