//! Resource bank: per-type counters credited by clears and spent on abilities.

use serde::{Deserialize, Serialize};

use crate::core::TileType;

use super::ResourceLedger;

/// Resources required to buy an ability.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceCost {
    pub water: u32,
    pub sun: u32,
    pub earth: u32,
    pub grass: u32,
}

impl ResourceCost {
    #[must_use]
    pub const fn new(water: u32, sun: u32, earth: u32, grass: u32) -> Self {
        Self { water, sun, earth, grass }
    }

    /// Cost of buying `quantity` at once.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self {
            water: self.water.saturating_mul(quantity),
            sun: self.sun.saturating_mul(quantity),
            earth: self.earth.saturating_mul(quantity),
            grass: self.grass.saturating_mul(quantity),
        }
    }

    /// Amount required of one tile type.
    #[must_use]
    pub fn of(&self, tile: TileType) -> u32 {
        match tile {
            TileType::Water => self.water,
            TileType::Sun => self.sun,
            TileType::Earth => self.earth,
            TileType::Grass => self.grass,
        }
    }
}

/// Collected resources, one counter per tile type.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceBank {
    balances: [u32; 4],
}

impl ResourceBank {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn balance(&self, tile: TileType) -> u32 {
        self.balances[tile.index()]
    }

    /// Sum of all balances.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.balances.iter().sum()
    }

    /// Whether every component of `cost` is covered.
    #[must_use]
    pub fn has(&self, cost: &ResourceCost) -> bool {
        TileType::ALL.iter().all(|&tile| self.balance(tile) >= cost.of(tile))
    }

    /// Deduct `cost` if affordable. Returns `false` and leaves the bank
    /// untouched otherwise.
    pub fn spend(&mut self, cost: &ResourceCost) -> bool {
        if !self.has(cost) {
            return false;
        }
        for tile in TileType::ALL {
            self.balances[tile.index()] -= cost.of(tile);
        }
        true
    }
}

impl ResourceLedger for ResourceBank {
    fn credit(&mut self, tile: TileType, amount: u32) {
        let balance = &mut self.balances[tile.index()];
        *balance = balance.saturating_add(amount);
    }
}
