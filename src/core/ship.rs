//! Ship definitions and per-ship hit tracking.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use super::common::Coord;

/// Type of ship: name and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipType {
    name: &'static str,
    length: usize,
}

impl ShipType {
    /// Create a new ship type.
    pub const fn new(name: &'static str, length: usize) -> Self {
        Self { name, length }
    }

    /// Ship's name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Ship's length.
    pub fn length(&self) -> usize {
        self.length
    }
}

/// A ship as submitted for placement: a name and its ordered cells.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipSpec {
    pub name: String,
    pub coords: Vec<Coord>,
}

impl ShipSpec {
    pub fn new(name: impl Into<String>, coords: impl IntoIterator<Item = Coord>) -> Self {
        Self {
            name: name.into(),
            coords: coords.into_iter().collect(),
        }
    }

    /// Straight ship of `ship_type` starting at `start`, running along y when `horizontal`.
    pub fn line(ship_type: ShipType, start: Coord, horizontal: bool) -> Self {
        let coords = (0..ship_type.length()).map(|i| {
            if horizontal {
                Coord::new(start.x, start.y + i)
            } else {
                Coord::new(start.x + i, start.y)
            }
        });
        Self::new(ship_type.name(), coords)
    }
}

/// A placed ship with the cells hit so far.
#[derive(Clone, PartialEq, Eq)]
pub struct Ship {
    name: String,
    coords: Vec<Coord>,
    hits: Vec<Coord>,
}

impl Ship {
    pub(crate) fn from_spec(spec: &ShipSpec) -> Self {
        Ship {
            name: spec.name.clone(),
            coords: spec.coords.clone(),
            hits: Vec::with_capacity(spec.coords.len()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Occupied cells in placement order.
    pub fn coords(&self) -> &[Coord] {
        &self.coords
    }

    /// Cells hit so far, in the order they were hit.
    pub fn hits(&self) -> &[Coord] {
        &self.hits
    }

    pub fn occupies(&self, coord: Coord) -> bool {
        self.coords.contains(&coord)
    }

    /// Register a hit at `coord`. Returns `true` if the cell belongs to this
    /// ship and had not been hit before.
    pub fn register_hit(&mut self, coord: Coord) -> bool {
        if self.occupies(coord) && !self.hits.contains(&coord) {
            self.hits.push(coord);
            true
        } else {
            false
        }
    }

    /// Check if the ship is sunk (all segments hit).
    pub fn is_sunk(&self) -> bool {
        self.coords.iter().all(|c| self.hits.contains(c))
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ name: \"{}\", coords: {:?}, hits: {} }}",
            self.name,
            self.coords,
            self.hits.len(),
        )
    }
}
