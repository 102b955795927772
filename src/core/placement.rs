//! Fleet validation and random fleet generation.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use rand::Rng;

use super::board::Board;
use super::common::{Cell, Coord, GameError, PlacementError};
use super::config::{is_ship_length, FleetPolicy, GameConfig, SHIPS};
use super::ship::{Ship, ShipSpec};

/// Validate `specs` against `board` and `config`, then mark every ship cell.
///
/// The whole list is checked before the board is touched, so on error the
/// board is left exactly as it was.
pub fn validate_and_place(
    board: &mut Board,
    specs: &[ShipSpec],
    config: &GameConfig,
) -> Result<Vec<Ship>, PlacementError> {
    validate(board, specs, config)?;
    for spec in specs {
        for &c in &spec.coords {
            board.mark(c.x, c.y, Cell::Ship).map_err(|err| match err {
                GameError::OutOfBounds => PlacementError::OutOfBounds {
                    ship: spec.name.clone(),
                    coord: c,
                },
                _ => PlacementError::Overlap {
                    ship: spec.name.clone(),
                    coord: c,
                },
            })?;
        }
    }
    log::debug!("placed {} ships", specs.len());
    Ok(specs.iter().map(Ship::from_spec).collect())
}

/// Check a fleet without mutating anything.
pub fn validate(board: &Board, specs: &[ShipSpec], config: &GameConfig) -> Result<(), PlacementError> {
    if specs.is_empty() {
        return Err(PlacementError::Empty);
    }
    if config.fleet_policy == FleetPolicy::Canonical {
        check_canonical_fleet(specs)?;
    }

    let mut occupied = BTreeSet::new();
    for spec in specs {
        let length = spec.coords.len();
        if !is_ship_length(length) {
            return Err(PlacementError::BadLength {
                ship: spec.name.clone(),
                length,
            });
        }
        for &c in &spec.coords {
            match board.cell_state(c.x, c.y) {
                Err(_) => {
                    return Err(PlacementError::OutOfBounds {
                        ship: spec.name.clone(),
                        coord: c,
                    })
                }
                Ok(Cell::Empty) => {}
                Ok(_) => {
                    return Err(PlacementError::Overlap {
                        ship: spec.name.clone(),
                        coord: c,
                    })
                }
            }
            if !occupied.insert(c) {
                return Err(PlacementError::Overlap {
                    ship: spec.name.clone(),
                    coord: c,
                });
            }
        }
        if config.straight_ships && !is_straight(&spec.coords) {
            return Err(PlacementError::NotStraight {
                ship: spec.name.clone(),
            });
        }
    }
    Ok(())
}

fn check_canonical_fleet(specs: &[ShipSpec]) -> Result<(), PlacementError> {
    let mut seen = [false; SHIPS.len()];
    for spec in specs {
        let idx = SHIPS
            .iter()
            .position(|def| def.name().eq_ignore_ascii_case(&spec.name))
            .ok_or_else(|| PlacementError::UnknownShip {
                name: spec.name.clone(),
            })?;
        let def = SHIPS[idx];
        if spec.coords.len() != def.length() {
            return Err(PlacementError::BadLength {
                ship: spec.name.clone(),
                length: spec.coords.len(),
            });
        }
        if seen[idx] {
            return Err(PlacementError::FleetMismatch);
        }
        seen[idx] = true;
    }
    if seen.iter().all(|&s| s) {
        Ok(())
    } else {
        Err(PlacementError::FleetMismatch)
    }
}

/// Cells form a contiguous horizontal or vertical run, in order.
fn is_straight(coords: &[Coord]) -> bool {
    let step = match coords {
        [] | [_] => return true,
        [a, b, ..] => (b.x as isize - a.x as isize, b.y as isize - a.y as isize),
    };
    if !matches!(step, (0, 1) | (0, -1) | (1, 0) | (-1, 0)) {
        return false;
    }
    coords.windows(2).all(|w| {
        (w[1].x as isize - w[0].x as isize, w[1].y as isize - w[0].y as isize) == step
    })
}

/// Generate a random canonical fleet of straight, non-overlapping ships.
pub fn random_fleet<R: Rng + ?Sized>(
    rng: &mut R,
    config: &GameConfig,
) -> Result<Vec<ShipSpec>, GameError> {
    let size = config.board_size;
    let mut occupied = BTreeSet::new();
    let mut fleet = Vec::with_capacity(SHIPS.len());

    for def in SHIPS.iter() {
        if def.length() > size {
            return Err(GameError::UnableToPlaceFleet);
        }
        let mut attempts = 0;
        let spec = loop {
            attempts += 1;
            if attempts > 100 {
                return Err(GameError::UnableToPlaceFleet);
            }
            let horizontal: bool = rng.random();
            let (max_x, max_y) = if horizontal {
                (size - 1, size - def.length())
            } else {
                (size - def.length(), size - 1)
            };
            let start = Coord::new(rng.random_range(0..=max_x), rng.random_range(0..=max_y));
            let candidate = ShipSpec::line(*def, start, horizontal);
            if candidate.coords.iter().all(|c| !occupied.contains(c)) {
                break candidate;
            }
        };
        occupied.extend(spec.coords.iter().copied());
        fleet.push(spec);
    }
    Ok(fleet)
}
