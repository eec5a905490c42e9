//! Resource Management
//!
//! Tracks the building materials a player holds and exposes the
//! afford/consume contract the placement core charges against.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Types of building resources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Wood,
    Stone,
    Iron,
}

impl ResourceType {
    pub const ALL: [ResourceType; 3] = [ResourceType::Wood, ResourceType::Stone, ResourceType::Iron];

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            ResourceType::Wood => "Wood",
            ResourceType::Stone => "Stone",
            ResourceType::Iron => "Iron",
        }
    }

    /// Icon character for UI
    pub fn icon(&self) -> char {
        match self {
            ResourceType::Wood => 'W',
            ResourceType::Stone => 'S',
            ResourceType::Iron => 'I',
        }
    }
}

/// A build cost: resource type and count pairs.
pub type ResourceCost = [(ResourceType, u32)];

/// Afford/consume contract used by placement.
///
/// `consume` must be all-or-nothing: when it returns `false` nothing has
/// been deducted.
pub trait ResourceLedger {
    fn can_afford(&self, cost: &ResourceCost) -> bool;
    fn consume(&mut self, cost: &ResourceCost) -> bool;
}

/// Starting resources for a new game
pub const STARTING_RESOURCES: [(ResourceType, u32); 3] = [
    (ResourceType::Wood, 60),
    (ResourceType::Stone, 30),
    (ResourceType::Iron, 5),
];

/// Player's resource inventory
#[derive(Debug, Clone, PartialEq)]
pub struct Resources {
    amounts: HashMap<ResourceType, u32>,
}

impl Default for Resources {
    fn default() -> Self {
        Self::new()
    }
}

impl Resources {
    /// Create with starting resources
    pub fn new() -> Self {
        Self {
            amounts: STARTING_RESOURCES.into_iter().collect(),
        }
    }

    /// Create with nothing in stock
    pub fn empty() -> Self {
        Self {
            amounts: HashMap::new(),
        }
    }

    /// Get current amount of a resource
    pub fn get(&self, res_type: ResourceType) -> u32 {
        self.amounts.get(&res_type).copied().unwrap_or(0)
    }

    /// Set amount of a resource
    pub fn set(&mut self, res_type: ResourceType, amount: u32) {
        self.amounts.insert(res_type, amount);
    }

    /// Add to a resource
    pub fn add(&mut self, res_type: ResourceType, amount: u32) {
        let current = self.get(res_type);
        self.amounts.insert(res_type, current.saturating_add(amount));
    }

    /// Remove from a resource (returns false if insufficient)
    pub fn remove(&mut self, res_type: ResourceType, amount: u32) -> bool {
        let current = self.get(res_type);
        if current >= amount {
            self.amounts.insert(res_type, current - amount);
            true
        } else {
            false
        }
    }

    /// Check if we have enough of a resource
    pub fn has(&self, res_type: ResourceType, amount: u32) -> bool {
        self.get(res_type) >= amount
    }

    /// Check if we can afford a cost.
    ///
    /// Repeated entries for the same resource are summed.
    pub fn can_afford(&self, costs: &ResourceCost) -> bool {
        ResourceType::ALL.iter().all(|&res| {
            let needed: u32 = costs
                .iter()
                .filter(|(r, _)| *r == res)
                .map(|(_, amount)| *amount)
                .sum();
            self.has(res, needed)
        })
    }

    /// Pay a cost (returns false and charges nothing if we can't afford it)
    pub fn pay(&mut self, costs: &ResourceCost) -> bool {
        if !self.can_afford(costs) {
            return false;
        }

        for (res, amount) in costs {
            self.remove(*res, *amount);
        }
        true
    }
}

impl ResourceLedger for Resources {
    fn can_afford(&self, cost: &ResourceCost) -> bool {
        Resources::can_afford(self, cost)
    }

    fn consume(&mut self, cost: &ResourceCost) -> bool {
        self.pay(cost)
    }
}
