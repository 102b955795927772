//! The game contract exposed to transports: new game, placement, firing and
//! state queries, all routed through a [`SessionRegistry`].

use crate::core::{FireResult, GameError, GameView, PlacementResult, Player, ShipSpec};
use crate::protocol::{Request, Response};
use crate::registry::{GameId, RegistryConfig, SessionRegistry};

pub struct GameService {
    registry: SessionRegistry,
}

impl GameService {
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            registry: SessionRegistry::new(config),
        }
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    /// Start a game with the default rules.
    pub fn new_game(&self) -> (GameId, Player) {
        self.registry.create_game()
    }

    pub fn place_ships(
        &self,
        game_id: &GameId,
        player: u8,
        ships: &[ShipSpec],
    ) -> Result<PlacementResult, GameError> {
        let player = Player::from_index(player)?;
        self.registry
            .with_game(game_id, |s| s.place_ships(player, ships))?
    }

    pub fn auto_place(&self, game_id: &GameId, player: u8) -> Result<PlacementResult, GameError> {
        let player = Player::from_index(player)?;
        self.registry.with_game(game_id, |s| s.place_random(player))?
    }

    pub fn fire(&self, game_id: &GameId, player: u8, x: usize, y: usize) -> Result<FireResult, GameError> {
        let player = Player::from_index(player)?;
        self.registry.with_game(game_id, |s| s.fire(player, x, y))?
    }

    pub fn get_state(&self, game_id: &GameId, viewer: u8) -> Result<GameView, GameError> {
        let viewer = Player::from_index(viewer)?;
        self.registry.with_game(game_id, |s| s.view(viewer))
    }

    pub fn end_game(&self, game_id: &GameId) -> Result<(), GameError> {
        self.registry.remove_game(game_id)
    }

    /// Dispatch a wire request.
    pub fn handle(&self, request: Request) -> Response {
        let result = match request {
            Request::NewGame => {
                let (game_id, current_player) = self.new_game();
                Ok(Response::NewGame {
                    game_id,
                    current_player,
                })
            }
            Request::PlaceShips {
                game_id,
                player,
                ships,
            } => self.place_ships(&game_id, player, &ships).map(placed),
            Request::AutoPlace { game_id, player } => self.auto_place(&game_id, player).map(placed),
            Request::Fire {
                game_id,
                player,
                x,
                y,
            } => self
                .fire(&game_id, player, x as usize, y as usize)
                .map(Response::Fired),
            Request::State { game_id, viewer } => {
                self.get_state(&game_id, viewer).map(Response::State)
            }
            Request::EndGame { game_id } => self.end_game(&game_id).map(|()| Response::Ended),
        };
        result.unwrap_or_else(|err| {
            log::debug!("request rejected: {}", err);
            Response::Error(err)
        })
    }
}

fn placed(result: PlacementResult) -> Response {
    Response::Placed {
        success: true,
        both_placed: result.both_placed,
    }
}

impl Default for GameService {
    fn default() -> Self {
        Self::new(RegistryConfig::default())
    }
}
