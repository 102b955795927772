//! Messages exchanged between a game server and a remote client.

use serde::{Deserialize, Serialize};

use crate::core::{FireResult, GameError, GameView, Player, ShipSpec};
use crate::registry::GameId;

/// Current protocol version. Peers with a different version are disconnected.
pub const PROTOCOL_VERSION: u16 = 1;

/// Operations a client may request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Request {
    NewGame,
    PlaceShips {
        game_id: GameId,
        player: u8,
        ships: Vec<ShipSpec>,
    },
    /// Place a random canonical fleet for `player`.
    AutoPlace { game_id: GameId, player: u8 },
    Fire {
        game_id: GameId,
        player: u8,
        x: u8,
        y: u8,
    },
    State { game_id: GameId, viewer: u8 },
    EndGame { game_id: GameId },
}

/// Replies to [`Request`]s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Response {
    NewGame {
        game_id: GameId,
        current_player: Player,
    },
    Placed {
        success: bool,
        both_placed: bool,
    },
    Fired(FireResult),
    State(GameView),
    Ended,
    Error(GameError),
}

/// Frames on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Message {
    /// Sent by the client first and echoed by the server.
    Hello { version: u16 },
    Request { seq: u32, body: Request },
    Response { seq: u32, body: Response },
}
