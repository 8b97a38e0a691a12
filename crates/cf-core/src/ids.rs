//! Strongly typed, zero-cost identifier wrappers and their sequence generator.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  The inner integer is `pub` so the
//! kernel can index its agent slab via `id.index()`.
//!
//! Ids are never minted from global counters: whoever constructs carts, jobs
//! or agents owns an [`IdSequence`] and draws from it, so two independently
//! built fleets (e.g. in parallel tests) never interfere.

use std::fmt;
use std::marker::PhantomData;

/// Ids that can be minted from a dense `u32` counter.
pub trait SequentialId: Copy {
    fn from_raw(raw: u32) -> Self;
}

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl SequentialId for $name {
            #[inline(always)]
            fn from_raw(raw: u32) -> Self {
                $name(raw)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Identifier of a cart in the fleet.
    pub struct CartId(u32);
}

typed_id! {
    /// Identifier of a transfer or out-of-service job.
    pub struct JobId(u32);
}

typed_id! {
    /// Opaque place identifier.  Only equality and ordering are meaningful to
    /// the core; distances come from the caller's transit estimator.
    pub struct LocationId(u32);
}

typed_id! {
    /// Slot of a suspended agent inside a `cf_kernel::Clock`.
    pub struct AgentId(u32);
}

typed_id! {
    /// Handle to a condition owned by a `cf_kernel::Clock`.
    pub struct ConditionId(u32);
}

// ── IdSequence ────────────────────────────────────────────────────────────────

/// Dense, monotonically increasing id generator.
///
/// ```rust
/// use cf_core::{CartId, IdSequence};
///
/// let mut carts = IdSequence::<CartId>::new();
/// assert_eq!(carts.next_id(), CartId(0));
/// assert_eq!(carts.next_id(), CartId(1));
/// ```
#[derive(Clone, Debug)]
pub struct IdSequence<T: SequentialId> {
    next: u32,
    _marker: PhantomData<T>,
}

impl<T: SequentialId> IdSequence<T> {
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    /// A sequence whose first id is `first`.
    pub fn starting_at(first: u32) -> Self {
        Self { next: first, _marker: PhantomData }
    }

    /// Mint the next id.
    ///
    /// # Panics
    /// Panics if the `u32` space is exhausted (the last value is reserved for
    /// the `INVALID` sentinel).
    pub fn next_id(&mut self) -> T {
        assert!(self.next < u32::MAX, "id sequence exhausted");
        let id = T::from_raw(self.next);
        self.next += 1;
        id
    }

    /// Number of ids minted so far (assuming the sequence started at 0).
    pub fn issued(&self) -> u32 {
        self.next
    }
}

impl<T: SequentialId> Default for IdSequence<T> {
    fn default() -> Self {
        Self::new()
    }
}
