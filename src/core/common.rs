//! Common types for the engine: coordinates, cell states, player slots and errors.

use alloc::string::String;
use core::fmt;

/// A grid coordinate. `x` selects the row, `y` the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Offset by (`dx`, `dy`), returning `None` when the result leaves `[0, size)`.
    pub fn offset(self, dx: isize, dy: isize, size: usize) -> Option<Coord> {
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        if x < size && y < size {
            Some(Coord { x, y })
        } else {
            None
        }
    }
}

impl From<(usize, usize)> for Coord {
    fn from((x, y): (usize, usize)) -> Self {
        Coord::new(x, y)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// State of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    #[default]
    Empty,
    Ship,
    Hit,
    Miss,
}

impl Cell {
    /// Whether a shot has already landed here.
    pub fn is_resolved(self) -> bool {
        matches!(self, Cell::Hit | Cell::Miss)
    }

    /// Fixed rendering symbol.
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Ship => 'S',
            Cell::Hit => 'X',
            Cell::Miss => 'o',
        }
    }
}

/// The two fixed player slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Player {
    /// Slot 0.
    Human,
    /// Slot 1, driven by the targeting agent.
    Agent,
}

impl Player {
    pub fn index(self) -> usize {
        match self {
            Player::Human => 0,
            Player::Agent => 1,
        }
    }

    pub fn opponent(self) -> Player {
        match self {
            Player::Human => Player::Agent,
            Player::Agent => Player::Human,
        }
    }

    pub fn from_index(index: u8) -> Result<Player, GameError> {
        match index {
            0 => Ok(Player::Human),
            1 => Ok(Player::Agent),
            other => Err(GameError::UnknownPlayer(other)),
        }
    }
}

/// Why a ship list was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum PlacementError {
    /// No ships were submitted.
    Empty,
    /// A ship cell lies outside the grid.
    OutOfBounds { ship: String, coord: Coord },
    /// A ship cell is already taken by an earlier ship (or repeats within one ship).
    Overlap { ship: String, coord: Coord },
    /// The ship length matches no ship type.
    BadLength { ship: String, length: usize },
    /// The name is not one of the canonical ship types.
    UnknownShip { name: String },
    /// The fleet is not exactly one of each canonical ship.
    FleetMismatch,
    /// Cells do not form a contiguous straight line.
    NotStraight { ship: String },
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::Empty => write!(f, "no ships submitted"),
            PlacementError::OutOfBounds { ship, coord } => {
                write!(f, "{} extends out of bounds at {}", ship, coord)
            }
            PlacementError::Overlap { ship, coord } => {
                write!(f, "{} overlaps another ship at {}", ship, coord)
            }
            PlacementError::BadLength { ship, length } => {
                write!(f, "{} has invalid length {}", ship, length)
            }
            PlacementError::UnknownShip { name } => write!(f, "unknown ship type '{}'", name),
            PlacementError::FleetMismatch => {
                write!(f, "fleet must contain exactly one of each ship type")
            }
            PlacementError::NotStraight { ship } => {
                write!(f, "{} is not a contiguous straight line", ship)
            }
        }
    }
}

/// Errors returned by session, placement and registry operations.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GameError {
    /// Unknown game identifier.
    NotFound,
    /// The player already placed a fleet.
    AlreadyPlaced,
    /// The submitted fleet failed validation.
    InvalidPlacement(PlacementError),
    /// The game is not accepting shots (placement pending or finished).
    NotReady,
    /// Shot fired out of turn.
    WrongTurn,
    /// Coordinate outside the grid.
    OutOfBounds,
    /// The target cell was already shot.
    AlreadyFired,
    /// Player index other than 0 or 1.
    UnknownPlayer(u8),
    /// Random fleet generation gave up.
    UnableToPlaceFleet,
}

impl From<PlacementError> for GameError {
    fn from(err: PlacementError) -> Self {
        GameError::InvalidPlacement(err)
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::NotFound => write!(f, "Game not found"),
            GameError::AlreadyPlaced => write!(f, "Ships already placed for this player"),
            GameError::InvalidPlacement(e) => write!(f, "Invalid ship placement: {}", e),
            GameError::NotReady => write!(f, "Game is not accepting shots"),
            GameError::WrongTurn => write!(f, "Not your turn"),
            GameError::OutOfBounds => write!(f, "Coordinate is out of bounds"),
            GameError::AlreadyFired => write!(f, "Already fired at this position"),
            GameError::UnknownPlayer(i) => write!(f, "Unknown player index {}", i),
            GameError::UnableToPlaceFleet => write!(f, "Unable to place fleet"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PlacementError {}

#[cfg(feature = "std")]
impl std::error::Error for GameError {}
