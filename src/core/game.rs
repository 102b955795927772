//! Game session: two fleets, the turn pointer and the firing state machine.

use alloc::boxed::Box;
use alloc::vec::Vec;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use super::agent::{HuntTargetAgent, TargetingStrategy};
use super::board::Board;
use super::common::{Cell, Coord, GameError, Player};
use super::config::GameConfig;
use super::placement::{random_fleet, validate_and_place};
use super::ship::{Ship, ShipSpec};

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// At least one player has not placed a fleet yet.
    AwaitingPlacement,
    InProgress,
    /// A winner exists; no further shots are accepted.
    Finished,
}

/// Outcome of a single resolved shot.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShotReport {
    pub player: Player,
    pub target: Coord,
    pub hit: bool,
    /// Every cell of the ship this shot sank, if it sank one.
    pub sunk: Option<Vec<Coord>>,
}

/// Reply to [`GameSession::fire`], reflecting the state after any agent moves.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct FireResult {
    pub hit: bool,
    pub sunk: Option<Vec<Coord>>,
    pub game_over: bool,
    pub winner: Option<Player>,
    pub current_player: Player,
    /// Shots the agent took before control returned.
    pub agent_shots: Vec<ShotReport>,
}

/// Reply to a successful placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacementResult {
    pub both_placed: bool,
}

/// Snapshot of a session from one player's point of view.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct GameView {
    /// Boards by slot index. Ship cells on the other player's board are shown as empty.
    pub boards: [Vec<Vec<Cell>>; 2],
    pub phase: Phase,
    pub current_player: Player,
    pub game_over: bool,
    pub winner: Option<Player>,
}

struct PlayerSlot {
    board: Board,
    ships: Vec<Ship>,
    placed: bool,
}

impl PlayerSlot {
    fn new(size: usize) -> Self {
        PlayerSlot {
            board: Board::new(size),
            ships: Vec::new(),
            placed: false,
        }
    }

    fn all_sunk(&self) -> bool {
        self.ships.iter().all(Ship::is_sunk)
    }
}

#[cfg(feature = "std")]
fn entropy_seed() -> u64 {
    rand::random()
}

#[cfg(not(feature = "std"))]
fn entropy_seed() -> u64 {
    0
}

/// A single game between the human slot and the agent slot.
pub struct GameSession {
    config: GameConfig,
    slots: [PlayerSlot; 2],
    current: Player,
    winner: Option<Player>,
    agent: Box<dyn TargetingStrategy>,
    rng: SmallRng,
    shots_fired: [usize; 2],
}

impl GameSession {
    /// Create a session with empty boards, the human to move and a fresh
    /// hunt/target agent. Without the `std` feature an unseeded config uses seed 0.
    pub fn new(config: GameConfig) -> Self {
        let agent = Box::new(HuntTargetAgent::new(config.board_size));
        Self::with_strategy(config, agent)
    }

    /// Create a session whose agent slot uses `strategy`.
    pub fn with_strategy(config: GameConfig, mut strategy: Box<dyn TargetingStrategy>) -> Self {
        let size = config.board_size;
        strategy.reset(size);
        let seed = config.seed.unwrap_or_else(entropy_seed);
        GameSession {
            slots: [PlayerSlot::new(size), PlayerSlot::new(size)],
            current: Player::Human,
            winner: None,
            agent: strategy,
            rng: SmallRng::seed_from_u64(seed),
            shots_fired: [0; 2],
            config,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        if self.winner.is_some() {
            Phase::Finished
        } else if self.slots.iter().all(|s| s.placed) {
            Phase::InProgress
        } else {
            Phase::AwaitingPlacement
        }
    }

    pub fn current_player(&self) -> Player {
        self.current
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    pub fn has_placed(&self, player: Player) -> bool {
        self.slots[player.index()].placed
    }

    /// The board owned by `player`.
    pub fn board(&self, player: Player) -> &Board {
        &self.slots[player.index()].board
    }

    /// Ships owned by `player`, in placement order.
    pub fn ships(&self, player: Player) -> &[Ship] {
        &self.slots[player.index()].ships
    }

    /// Returns `true` when every ship of `player` is sunk.
    pub fn all_ships_sunk(&self, player: Player) -> bool {
        self.slots[player.index()].all_sunk()
    }

    /// Number of shots `player` has fired so far.
    pub fn shots_fired(&self, player: Player) -> usize {
        self.shots_fired[player.index()]
    }

    /// Place the fleet of `player`. Fails without side effects if the player
    /// already placed or the fleet is invalid.
    pub fn place_ships(
        &mut self,
        player: Player,
        specs: &[ShipSpec],
    ) -> Result<PlacementResult, GameError> {
        let slot = &mut self.slots[player.index()];
        if slot.placed {
            return Err(GameError::AlreadyPlaced);
        }
        let ships = validate_and_place(&mut slot.board, specs, &self.config)?;
        slot.ships = ships;
        slot.placed = true;

        let both_placed = self.slots.iter().all(|s| s.placed);
        if both_placed {
            log::debug!("both fleets placed, game started");
        }
        Ok(PlacementResult { both_placed })
    }

    /// Place a random canonical fleet for `player`.
    pub fn place_random(&mut self, player: Player) -> Result<PlacementResult, GameError> {
        if self.has_placed(player) {
            return Err(GameError::AlreadyPlaced);
        }
        let fleet = random_fleet(&mut self.rng, &self.config)?;
        self.place_ships(player, &fleet)
    }

    /// Fire at the opponent of `player`.
    ///
    /// When the shot hands the turn to the agent, the agent plays until the
    /// turn comes back or the game ends, and the result reflects that state.
    pub fn fire(&mut self, player: Player, x: usize, y: usize) -> Result<FireResult, GameError> {
        if self.phase() != Phase::InProgress {
            return Err(GameError::NotReady);
        }
        if player != self.current {
            return Err(GameError::WrongTurn);
        }
        let report = self.resolve_shot(player, Coord::new(x, y))?;
        if player == Player::Agent {
            self.agent
                .observe_result(report.target, report.hit, report.sunk.as_deref());
        }

        let agent_shots = self.run_agent_turns();
        Ok(FireResult {
            hit: report.hit,
            sunk: report.sunk,
            game_over: self.is_over(),
            winner: self.winner,
            current_player: self.current,
            agent_shots,
        })
    }

    /// Apply one validated-turn shot: bounds, duplicate check, hit/sink
    /// resolution, win detection, then turn hand-off.
    fn resolve_shot(&mut self, player: Player, target: Coord) -> Result<ShotReport, GameError> {
        let opponent = player.opponent();
        let slot = &mut self.slots[opponent.index()];
        if slot.board.cell_state(target.x, target.y)?.is_resolved() {
            return Err(GameError::AlreadyFired);
        }

        let mut hit = false;
        let mut sunk = None;
        for ship in slot.ships.iter_mut() {
            if ship.register_hit(target) {
                hit = true;
                if ship.is_sunk() {
                    sunk = Some(ship.coords().to_vec());
                }
                break;
            }
        }
        let mark = if hit { Cell::Hit } else { Cell::Miss };
        slot.board.mark(target.x, target.y, mark)?;
        self.shots_fired[player.index()] += 1;

        log::debug!(
            "{:?} fired at {}: {}",
            player,
            target,
            match (hit, sunk.is_some()) {
                (_, true) => "sunk",
                (true, false) => "hit",
                (false, _) => "miss",
            }
        );

        if slot.all_sunk() {
            self.winner = Some(player);
            log::debug!("{:?} wins after {} shots", player, self.shots_fired[player.index()]);
        } else {
            self.current = opponent;
        }

        Ok(ShotReport {
            player,
            target,
            hit,
            sunk,
        })
    }

    /// Let the agent fire until the turn returns to the human or the game ends.
    fn run_agent_turns(&mut self) -> Vec<ShotReport> {
        let mut shots = Vec::new();
        while self.current == Player::Agent && self.winner.is_none() {
            let human_board = &self.slots[Player::Human.index()].board;
            let Some(target) = self.agent.choose_target(&mut self.rng, human_board) else {
                log::error!("agent has no legal target on an undecided board");
                break;
            };
            match self.resolve_shot(Player::Agent, target) {
                Ok(report) => {
                    self.agent
                        .observe_result(report.target, report.hit, report.sunk.as_deref());
                    shots.push(report);
                }
                Err(err) => {
                    log::error!("agent chose unusable target {}: {}", target, err);
                    break;
                }
            }
        }
        shots
    }

    /// Snapshot for `viewer`: their own board in full, the other with ships hidden.
    pub fn view(&self, viewer: Player) -> GameView {
        let render = |p: Player| self.board(p).render(p == viewer);
        GameView {
            boards: [render(Player::Human), render(Player::Agent)],
            phase: self.phase(),
            current_player: self.current,
            game_over: self.is_over(),
            winner: self.winner,
        }
    }
}
