use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::GameConfig;
use crate::error::{GameError, GameResult};
use crate::game::CheckersGame;
use crate::types::Cell;

/// JavaScript handle on one game. Command lists come back as plain arrays
/// of objects tagged by `kind`.
#[wasm_bindgen]
pub struct WasmCheckers {
    game: CheckersGame,
}

#[wasm_bindgen]
impl WasmCheckers {
    /// `config` may be `undefined`/`null` for defaults, or an object with any of
    /// `redColor`, `whiteColor`, `firstPlayer` (`"red"` | `"white"`).
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<WasmCheckers, JsError> {
        let config = parse_config(config)?;
        Ok(Self {
            game: CheckersGame::new(config)?,
        })
    }

    #[wasm_bindgen(js_name = onCellClicked)]
    pub fn on_cell_clicked(&mut self, row: u8, col: u8) -> Result<JsValue, JsError> {
        let cell = Cell::new(row, col)?;
        Ok(to_js(&self.game.handle_selection(cell))?)
    }

    #[wasm_bindgen(js_name = initialRender)]
    pub fn initial_render(&self) -> Result<JsValue, JsError> {
        Ok(to_js(&self.game.initial_render())?)
    }

    #[wasm_bindgen(js_name = newGame)]
    pub fn new_game(&mut self) -> Result<JsValue, JsError> {
        Ok(to_js(&self.game.new_game())?)
    }

    #[wasm_bindgen(js_name = legalDestinations)]
    pub fn legal_destinations(&self, row: u8, col: u8) -> Result<JsValue, JsError> {
        let cell = Cell::new(row, col)?;
        Ok(to_js(&self.game.legal_destinations(cell))?)
    }

    #[wasm_bindgen(js_name = movableOrigins)]
    pub fn movable_origins(&self) -> Result<JsValue, JsError> {
        let player = self.game.current_player();
        Ok(to_js(&self.game.movable_origins(player))?)
    }

    pub fn state(&self) -> Result<JsValue, JsError> {
        Ok(to_js(&self.game.to_game_state())?)
    }
}

fn parse_config(value: JsValue) -> GameResult<GameConfig> {
    if value.is_undefined() || value.is_null() {
        return Ok(GameConfig::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(|err| GameError::InvalidConfig {
        message: err.to_string(),
    })
}

fn to_js<T: Serialize>(value: &T) -> GameResult<JsValue> {
    // Plain objects rather than JS Maps for the host.
    let serializer = serde_wasm_bindgen::Serializer::new().serialize_maps_as_objects(true);
    value
        .serialize(&serializer)
        .map_err(|err| GameError::Serialization {
            message: err.to_string(),
        })
}
