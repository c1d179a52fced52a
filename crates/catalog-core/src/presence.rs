//! Layer 3: Location presence
//!
//! A `PresenceSet` answers "is this entity available at location L" using one
//! of two complementary encodings:
//! - everywhere except `exceptions` (`all_by_default == true`)
//! - only at `inclusions` (`all_by_default == false`)
//!
//! The inactive set is always empty, so structural equality is semantic
//! equality.

use std::collections::BTreeSet;
use std::fmt;

use super::identity::LocationId;

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PresenceSet {
    all_by_default: bool,
    exceptions: BTreeSet<LocationId>,
    inclusions: BTreeSet<LocationId>,
}

/// What `PresenceSet::from_parts` had to discard to restore the invariant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PresenceNormalization {
    Clean,
    /// Present-at ids were supplied alongside `present_at_all = true`.
    DroppedInclusions(Vec<LocationId>),
    /// Absent-at ids were supplied alongside `present_at_all = false`.
    DroppedExceptions(Vec<LocationId>),
}

impl PresenceNormalization {
    pub fn is_clean(&self) -> bool {
        matches!(self, Self::Clean)
    }
}

impl fmt::Display for PresenceNormalization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clean => f.write_str("clean"),
            Self::DroppedInclusions(ids) => {
                write!(f, "ignored {} present-at ids while present everywhere", ids.len())
            }
            Self::DroppedExceptions(ids) => {
                write!(f, "ignored {} absent-at ids while present nowhere by default", ids.len())
            }
        }
    }
}

impl PresenceSet {
    /// Present at no location.
    pub fn nowhere() -> Self {
        Self::default()
    }

    /// Present at every location, no exceptions.
    pub fn everywhere() -> Self {
        Self {
            all_by_default: true,
            ..Self::default()
        }
    }

    /// Present everywhere except `absent`.
    pub fn everywhere_except(absent: impl IntoIterator<Item = LocationId>) -> Self {
        Self {
            all_by_default: true,
            exceptions: absent.into_iter().collect(),
            inclusions: BTreeSet::new(),
        }
    }

    /// Present only at `present`.
    pub fn only(present: impl IntoIterator<Item = LocationId>) -> Self {
        Self {
            all_by_default: false,
            exceptions: BTreeSet::new(),
            inclusions: present.into_iter().collect(),
        }
    }

    /// Rebuild from the stored triple, dropping whichever list the flag makes
    /// inactive.
    pub fn from_parts(
        present_at_all: bool,
        present_at: impl IntoIterator<Item = LocationId>,
        absent_at: impl IntoIterator<Item = LocationId>,
    ) -> (Self, PresenceNormalization) {
        if present_at_all {
            let dropped: Vec<LocationId> = present_at.into_iter().collect();
            let set = Self::everywhere_except(absent_at);
            let note = if dropped.is_empty() {
                PresenceNormalization::Clean
            } else {
                PresenceNormalization::DroppedInclusions(dropped)
            };
            (set, note)
        } else {
            let dropped: Vec<LocationId> = absent_at.into_iter().collect();
            let set = Self::only(present_at);
            let note = if dropped.is_empty() {
                PresenceNormalization::Clean
            } else {
                PresenceNormalization::DroppedExceptions(dropped)
            };
            (set, note)
        }
    }

    /// The stored triple: `(present_at_all, present_at, absent_at)`.
    pub fn to_parts(&self) -> (bool, Vec<LocationId>, Vec<LocationId>) {
        (
            self.all_by_default,
            self.inclusions.iter().cloned().collect(),
            self.exceptions.iter().cloned().collect(),
        )
    }

    pub fn all_by_default(&self) -> bool {
        self.all_by_default
    }

    pub fn exceptions(&self) -> &BTreeSet<LocationId> {
        &self.exceptions
    }

    pub fn inclusions(&self) -> &BTreeSet<LocationId> {
        &self.inclusions
    }

    pub fn is_enabled(&self, location: &LocationId) -> bool {
        if self.all_by_default {
            !self.exceptions.contains(location)
        } else {
            self.inclusions.contains(location)
        }
    }

    /// True when any location availability is configured at all.
    pub fn master_enabled(&self) -> bool {
        self.all_by_default || !self.inclusions.is_empty()
    }

    /// Present everywhere with no exceptions.
    pub fn is_everywhere(&self) -> bool {
        self.all_by_default && self.exceptions.is_empty()
    }

    pub fn set_enabled(&mut self, location: &LocationId, enabled: bool) {
        match (enabled, self.all_by_default) {
            (true, _) if !self.master_enabled() => {
                // First location switched on starts an explicit list; it never
                // implies "everywhere".
                self.all_by_default = false;
                self.exceptions.clear();
                self.inclusions.clear();
                self.inclusions.insert(location.clone());
            }
            (true, true) => {
                self.exceptions.remove(location);
            }
            (true, false) => {
                self.inclusions.insert(location.clone());
                self.exceptions.remove(location);
            }
            (false, true) => {
                self.exceptions.insert(location.clone());
            }
            (false, false) => {
                self.inclusions.remove(location);
                if self.inclusions.is_empty() {
                    self.all_by_default = false;
                    self.exceptions.clear();
                }
            }
        }
    }

    /// Master toggle. Switching on an entity that already has availability
    /// keeps its per-location detail.
    pub fn set_master(&mut self, enabled: bool) {
        if enabled {
            if !self.master_enabled() {
                *self = Self::everywhere();
            }
        } else {
            *self = Self::nowhere();
        }
    }

    /// Locations of `universe` where the entity is enabled, in universe order.
    pub fn enabled_in<'a>(&self, universe: &'a LocationUniverse) -> Vec<&'a LocationId> {
        universe.iter().filter(|id| self.is_enabled(id)).collect()
    }
}

/// The set of locations the merchant can sell at.
///
/// Injected by the host; the core never looks locations up on its own.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LocationUniverse(BTreeSet<LocationId>);

impl LocationUniverse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &LocationId) -> bool {
        self.0.contains(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LocationId> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<LocationId> for LocationUniverse {
    fn from_iter<T: IntoIterator<Item = LocationId>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
