use broadside::{
    random_fleet, validate_and_place, Board, Cell, Coord, FleetPolicy, GameConfig,
    PlacementError, ShipSpec, BOARD_SIZE, SHIPS, TOTAL_SHIP_CELLS,
};
use rand::{rngs::SmallRng, SeedableRng};

/// One of each canonical ship, laid horizontally on even rows from column 0.
fn standard_fleet() -> Vec<ShipSpec> {
    SHIPS
        .iter()
        .enumerate()
        .map(|(i, def)| ShipSpec::line(*def, Coord::new(i * 2, 0), true))
        .collect()
}

fn cells(coords: &[(usize, usize)]) -> Vec<Coord> {
    coords.iter().map(|&c| Coord::from(c)).collect()
}

#[test]
fn valid_fleet_marks_ship_cells() {
    let mut board = Board::new(BOARD_SIZE);
    let ships = validate_and_place(&mut board, &standard_fleet(), &GameConfig::default()).unwrap();
    assert_eq!(ships.len(), SHIPS.len());
    assert_eq!(board.count(Cell::Ship), TOTAL_SHIP_CELLS);
    assert_eq!(board.cell_state(0, 4), Ok(Cell::Ship));
    assert_eq!(board.cell_state(0, 5), Ok(Cell::Empty));
    assert_eq!(ships[0].name(), "Carrier");
    assert!(ships.iter().all(|s| s.hits().is_empty()));
}

#[test]
fn overlap_leaves_board_untouched() {
    let mut fleet = standard_fleet();
    // Destroyer crosses the Carrier at (0, 3)
    fleet[4] = ShipSpec::new("Destroyer", cells(&[(0, 3), (1, 3)]));

    let mut board = Board::new(BOARD_SIZE);
    let err = validate_and_place(&mut board, &fleet, &GameConfig::default()).unwrap_err();
    assert_eq!(
        err,
        PlacementError::Overlap {
            ship: "Destroyer".to_string(),
            coord: Coord::new(0, 3)
        }
    );
    assert_eq!(board.count(Cell::Empty), BOARD_SIZE * BOARD_SIZE);
}

#[test]
fn out_of_bounds_leaves_board_untouched() {
    let mut fleet = standard_fleet();
    fleet[0] = ShipSpec::line(SHIPS[0], Coord::new(0, 7), true);

    let mut board = Board::new(BOARD_SIZE);
    let err = validate_and_place(&mut board, &fleet, &GameConfig::default()).unwrap_err();
    assert!(matches!(err, PlacementError::OutOfBounds { ref ship, coord } if ship == "Carrier" && coord == Coord::new(0, 10)));
    assert_eq!(board.count(Cell::Ship), 0);
}

#[test]
fn resolved_cell_blocks_placement() {
    let mut board = Board::new(BOARD_SIZE);
    board.mark(0, 2, Cell::Miss).unwrap();

    let err = validate_and_place(&mut board, &standard_fleet(), &GameConfig::default()).unwrap_err();
    assert_eq!(
        err,
        PlacementError::Overlap {
            ship: "Carrier".to_string(),
            coord: Coord::new(0, 2)
        }
    );
    assert_eq!(board.count(Cell::Ship), 0);
    assert_eq!(board.cell_state(0, 2), Ok(Cell::Miss));
}

#[test]
fn repeated_cell_within_one_ship_is_overlap() {
    let mut fleet = standard_fleet();
    fleet[4] = ShipSpec::new("Destroyer", cells(&[(9, 9), (9, 9)]));

    let mut board = Board::new(BOARD_SIZE);
    let err = validate_and_place(&mut board, &fleet, &GameConfig::default()).unwrap_err();
    assert!(matches!(err, PlacementError::Overlap { .. }));
}

#[test]
fn empty_fleet_is_rejected() {
    let mut board = Board::new(BOARD_SIZE);
    let err = validate_and_place(&mut board, &[], &GameConfig::default()).unwrap_err();
    assert_eq!(err, PlacementError::Empty);
}

#[test]
fn canonical_policy_requires_each_ship_once() {
    let config = GameConfig::default();

    let mut missing = standard_fleet();
    missing.pop();
    let err = validate_and_place(&mut Board::new(BOARD_SIZE), &missing, &config).unwrap_err();
    assert_eq!(err, PlacementError::FleetMismatch);

    let mut doubled = standard_fleet();
    doubled[3] = ShipSpec::line(SHIPS[2], Coord::new(6, 0), true);
    let err = validate_and_place(&mut Board::new(BOARD_SIZE), &doubled, &config).unwrap_err();
    assert_eq!(err, PlacementError::FleetMismatch);

    let mut renamed = standard_fleet();
    renamed[4].name = "Rowboat".to_string();
    let err = validate_and_place(&mut Board::new(BOARD_SIZE), &renamed, &config).unwrap_err();
    assert_eq!(
        err,
        PlacementError::UnknownShip {
            name: "Rowboat".to_string()
        }
    );

    let mut short = standard_fleet();
    short[0] = ShipSpec::new("Carrier", cells(&[(0, 0), (0, 1), (0, 2)]));
    let err = validate_and_place(&mut Board::new(BOARD_SIZE), &short, &config).unwrap_err();
    assert_eq!(
        err,
        PlacementError::BadLength {
            ship: "Carrier".to_string(),
            length: 3
        }
    );
}

#[test]
fn ship_names_match_case_insensitively() {
    let mut fleet = standard_fleet();
    fleet[1].name = "BATTLESHIP".to_string();
    let mut board = Board::new(BOARD_SIZE);
    assert!(validate_and_place(&mut board, &fleet, &GameConfig::default()).is_ok());
}

#[test]
fn custom_policy_accepts_any_canonical_lengths() {
    let config = GameConfig::default().with_fleet_policy(FleetPolicy::Custom);
    let fleet = vec![
        ShipSpec::new("Tug", cells(&[(0, 0), (0, 1)])),
        ShipSpec::new("Barge", cells(&[(5, 5), (6, 5), (7, 5)])),
    ];
    let mut board = Board::new(BOARD_SIZE);
    let ships = validate_and_place(&mut board, &fleet, &config).unwrap();
    assert_eq!(ships.len(), 2);
    assert_eq!(board.count(Cell::Ship), 5);

    let too_long = vec![ShipSpec::new("Eel", (0..6).map(|y| Coord::new(3, y)))];
    let err = validate_and_place(&mut Board::new(BOARD_SIZE), &too_long, &config).unwrap_err();
    assert!(matches!(err, PlacementError::BadLength { length: 6, .. }));
}

#[test]
fn scattered_ships_allowed_unless_straight_required() {
    let bent = vec![ShipSpec::new("Cruiser", cells(&[(0, 0), (0, 1), (1, 1)]))];

    let loose = GameConfig::default().with_fleet_policy(FleetPolicy::Custom);
    assert!(validate_and_place(&mut Board::new(BOARD_SIZE), &bent, &loose).is_ok());

    let strict = loose.clone().with_straight_ships(true);
    let mut board = Board::new(BOARD_SIZE);
    let err = validate_and_place(&mut board, &bent, &strict).unwrap_err();
    assert_eq!(
        err,
        PlacementError::NotStraight {
            ship: "Cruiser".to_string()
        }
    );
    assert_eq!(board.count(Cell::Ship), 0);

    let gapped = vec![ShipSpec::new("Destroyer", cells(&[(4, 4), (4, 6)]))];
    assert!(validate_and_place(&mut Board::new(BOARD_SIZE), &gapped, &strict).is_err());

    let vertical = vec![ShipSpec::new("Destroyer", cells(&[(5, 4), (4, 4)]))];
    assert!(validate_and_place(&mut Board::new(BOARD_SIZE), &vertical, &strict).is_ok());
}

#[test]
fn adjacent_ships_are_allowed() {
    let fleet: Vec<ShipSpec> = SHIPS
        .iter()
        .enumerate()
        .map(|(i, def)| ShipSpec::line(*def, Coord::new(i, 0), true))
        .collect();
    let mut board = Board::new(BOARD_SIZE);
    assert!(validate_and_place(&mut board, &fleet, &GameConfig::default()).is_ok());
}

#[test]
fn random_fleet_is_always_valid() {
    let config = GameConfig::default().with_straight_ships(true);
    for seed in 0..50 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let fleet = random_fleet(&mut rng, &config).unwrap();
        let mut board = Board::new(BOARD_SIZE);
        validate_and_place(&mut board, &fleet, &config).unwrap();
        assert_eq!(board.count(Cell::Ship), TOTAL_SHIP_CELLS);
    }
}

#[test]
fn random_fleet_fits_small_boards() {
    let config = GameConfig::default().with_board_size(6);
    let mut rng = SmallRng::seed_from_u64(7);
    let fleet = random_fleet(&mut rng, &config).unwrap();
    let mut board = Board::new(6);
    validate_and_place(&mut board, &fleet, &config).unwrap();
}

#[test]
fn board_size_is_clamped() {
    assert_eq!(GameConfig::default().with_board_size(2).board_size, 5);
    assert_eq!(GameConfig::default().with_board_size(40).board_size, 26);
}
