use std::fmt::Display;
use std::hash::{Hash, Hasher};

use crate::problem::instance::Instance;

/// The direction an item travels in. Deliveries are carried from the depot to
/// their customer; pickups from their customer back to the depot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Delivery,
    Pickup,
}

/// A quantity of volume moving between the depot and a customer. Items are
/// cheap value objects created on demand from the instance data; their volume
/// is derived from the instance and is not part of their identity.
#[derive(Debug, Clone, Copy)]
pub struct Item {
    volume: f64,
    kind: ItemKind,
    customer: usize,
}

impl Item {
    pub fn delivery(instance: &Instance, customer: usize) -> Self {
        Item {
            volume: instance.demand(customer),
            kind: ItemKind::Delivery,
            customer,
        }
    }

    pub fn pickup(instance: &Instance, customer: usize) -> Self {
        Item {
            volume: instance.pickup(customer),
            kind: ItemKind::Pickup,
            customer,
        }
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn customer(&self) -> usize {
        self.customer
    }

    pub fn is_delivery(&self) -> bool {
        self.kind == ItemKind::Delivery
    }

    pub fn is_pickup(&self) -> bool {
        self.kind == ItemKind::Pickup
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.customer == other.customer
    }
}

impl Eq for Item {}

impl Hash for Item {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.customer.hash(state);
    }
}

impl Display for Item {
    /// Prints the item code used by the solution file format: `d{customer}`
    /// for deliveries and `p{customer}` for pickups, 1-based.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            ItemKind::Delivery => write!(f, "d{}", self.customer + 1),
            ItemKind::Pickup => write!(f, "p{}", self.customer + 1),
        }
    }
}
