//! Cart snapshots.

use crate::{CartId, CoreError, CoreResult, LocationId};

/// A read-only snapshot of one cart, as seen by the planner.
///
/// The live cart belongs to the surrounding environment.  The planner copies
/// `payload` and `last_known_location` into its own search state and never
/// writes back; only the external driver commits real movement.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cart {
    pub id: CartId,
    /// Maximum number of items the cart can carry at once.
    pub capacity: u32,
    /// Items currently on board.  Always `<= capacity`.
    pub payload: u32,
    pub last_known_location: LocationId,
}

impl Cart {
    /// An empty cart at `location`.
    pub fn new(id: CartId, capacity: u32, location: LocationId) -> Self {
        Self { id, capacity, payload: 0, last_known_location: location }
    }

    /// Replace the on-board payload, enforcing `payload <= capacity`.
    pub fn with_payload(mut self, payload: u32) -> CoreResult<Self> {
        if payload > self.capacity {
            return Err(CoreError::PayloadExceedsCapacity {
                cart: self.id,
                payload,
                capacity: self.capacity,
            });
        }
        self.payload = payload;
        Ok(self)
    }

    /// Free space on board.
    #[inline]
    pub fn remaining_capacity(&self) -> u32 {
        self.capacity.saturating_sub(self.payload)
    }
}
