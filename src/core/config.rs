use super::ship::ShipType;

pub const BOARD_SIZE: usize = 10;
/// Columns are lettered A-Z.
pub const MAX_BOARD_SIZE: usize = 26;
pub const NUM_SHIPS: usize = 5;
pub const SHIPS: [ShipType; NUM_SHIPS] = [
    ShipType::new("Carrier", 5),
    ShipType::new("Battleship", 4),
    ShipType::new("Cruiser", 3),
    ShipType::new("Submarine", 3),
    ShipType::new("Destroyer", 2),
];

/// Total number of ship segments used in the standard configuration.
pub const TOTAL_SHIP_CELLS: usize = 5 + 4 + 3 + 3 + 2;

/// Look up a canonical ship type by name, ignoring ASCII case.
pub fn ship_type_by_name(name: &str) -> Option<ShipType> {
    SHIPS
        .iter()
        .copied()
        .find(|def| def.name().eq_ignore_ascii_case(name))
}

/// Whether `length` is the length of any canonical ship type.
pub fn is_ship_length(length: usize) -> bool {
    SHIPS.iter().any(|def| def.length() == length)
}

/// How strictly a submitted fleet is checked against [`SHIPS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum FleetPolicy {
    /// Exactly one of each canonical ship, matched by name and length.
    #[default]
    Canonical,
    /// Any non-empty list of ships whose lengths are canonical lengths.
    Custom,
}

/// Rules for a single game session.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Side of the square grid.
    pub board_size: usize,
    pub fleet_policy: FleetPolicy,
    /// Require every ship to be a contiguous horizontal or vertical line.
    pub straight_ships: bool,
    /// Seed for the session RNG. `None` draws one from entropy.
    pub seed: Option<u64>,
}

impl GameConfig {
    pub fn new() -> Self {
        Self {
            board_size: BOARD_SIZE,
            fleet_policy: FleetPolicy::Canonical,
            straight_ships: false,
            seed: None,
        }
    }

    /// Set the board size, clamped between the longest ship and [`MAX_BOARD_SIZE`].
    pub fn with_board_size(mut self, size: usize) -> Self {
        let min = SHIPS.iter().map(|s| s.length()).max().unwrap_or(1);
        self.board_size = size.clamp(min, MAX_BOARD_SIZE);
        self
    }

    pub fn with_fleet_policy(mut self, policy: FleetPolicy) -> Self {
        self.fleet_policy = policy;
        self
    }

    pub fn with_straight_ships(mut self, straight: bool) -> Self {
        self.straight_ships = straight;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
