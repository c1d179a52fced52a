//! Layer 3: Category resolution
//!
//! An item carries any number of categories, exactly one of which is used
//! for sales reporting. `resolve` picks it from the loaded fields; the
//! assignment helpers keep the choice stable while the user edits.

use std::collections::BTreeMap;
use std::fmt;

use super::identity::CategoryId;

/// A category attached to an item, as loaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryRef {
    pub id: CategoryId,
}

impl CategoryRef {
    pub fn new(id: CategoryId) -> Self {
        Self { id }
    }
}

/// Resolved classification of an item.
///
/// The reporting category never appears among the additional categories.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CategoryAssignment {
    reporting: Option<CategoryId>,
    additional: Vec<CategoryId>,
}

impl CategoryAssignment {
    pub fn new(reporting: Option<CategoryId>, additional: Vec<CategoryId>) -> Self {
        let mut unique: Vec<CategoryId> = Vec::with_capacity(additional.len());
        for id in additional {
            if reporting.as_ref() != Some(&id) && !unique.contains(&id) {
                unique.push(id);
            }
        }
        let additional = unique;
        // Additional categories without a reporting one promote the first.
        let mut assignment = Self {
            reporting,
            additional,
        };
        if assignment.reporting.is_none() && !assignment.additional.is_empty() {
            assignment.reporting = Some(assignment.additional.remove(0));
        }
        assignment
    }

    pub fn reporting_category_id(&self) -> Option<&CategoryId> {
        self.reporting.as_ref()
    }

    pub fn additional_category_ids(&self) -> &[CategoryId] {
        &self.additional
    }

    /// Reporting category first, then the additional ones in order.
    pub fn all_ids(&self) -> impl Iterator<Item = &CategoryId> {
        self.reporting.iter().chain(self.additional.iter())
    }

    pub fn contains(&self, id: &CategoryId) -> bool {
        self.all_ids().any(|c| c == id)
    }

    pub fn is_empty(&self) -> bool {
        self.reporting.is_none()
    }

    /// Attach a category. The first category attached becomes the reporting
    /// one.
    pub fn assign(&mut self, id: CategoryId) {
        if self.contains(&id) {
            return;
        }
        if self.reporting.is_none() {
            self.reporting = Some(id);
        } else {
            self.additional.push(id);
        }
    }

    /// Detach a category. Removing the reporting category promotes the first
    /// additional one.
    pub fn unassign(&mut self, id: &CategoryId) {
        if self.reporting.as_ref() == Some(id) {
            self.reporting = if self.additional.is_empty() {
                None
            } else {
                Some(self.additional.remove(0))
            };
        } else {
            self.additional.retain(|c| c != id);
        }
    }

    /// Make `id` the reporting category, attaching it if needed. The previous
    /// reporting category stays attached, at the front of the additional list.
    pub fn make_reporting(&mut self, id: CategoryId) {
        if self.reporting.as_ref() == Some(&id) {
            return;
        }
        self.additional.retain(|c| c != &id);
        if let Some(previous) = self.reporting.replace(id) {
            self.additional.insert(0, previous);
        }
    }
}

/// Which fallback rule produced a resolution, for data-quality logging.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolutionNote {
    /// The explicit reporting category is not among the assigned ones.
    ExplicitNotAssigned {
        explicit: CategoryId,
        fallback: CategoryId,
    },
    /// Several categories are assigned but none is marked for reporting.
    NoExplicitReporting { fallback: CategoryId, assigned: usize },
    /// Only the legacy single-category field was set.
    Legacy(CategoryId),
}

impl fmt::Display for ResolutionNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExplicitNotAssigned { explicit, fallback } => write!(
                f,
                "reporting category {explicit} is not assigned; using {fallback}"
            ),
            Self::NoExplicitReporting { fallback, assigned } => write!(
                f,
                "{assigned} categories assigned without a reporting category; using {fallback}"
            ),
            Self::Legacy(id) => write!(f, "using legacy category {id}"),
        }
    }
}

/// Pick the reporting category.
///
/// Rules, in order: a single assigned category; the explicit reporting
/// category when it is assigned; the first assigned category; the legacy
/// category; nothing.
pub fn resolve(
    assigned: &[CategoryRef],
    explicit_reporting: Option<&CategoryId>,
    legacy: Option<&CategoryId>,
) -> CategoryAssignment {
    resolve_with_note(assigned, explicit_reporting, legacy).0
}

/// `resolve`, also reporting which fallback rule fired.
pub fn resolve_with_note(
    assigned: &[CategoryRef],
    explicit_reporting: Option<&CategoryId>,
    legacy: Option<&CategoryId>,
) -> (CategoryAssignment, Option<ResolutionNote>) {
    match assigned {
        [single] => (
            CategoryAssignment {
                reporting: Some(single.id.clone()),
                additional: Vec::new(),
            },
            None,
        ),
        [first, ..] => {
            let explicit =
                explicit_reporting.filter(|explicit| assigned.iter().any(|c| &c.id == *explicit));
            let (reporting, note) = match (explicit, explicit_reporting) {
                (Some(explicit), _) => (explicit.clone(), None),
                (None, Some(missing)) => (
                    first.id.clone(),
                    Some(ResolutionNote::ExplicitNotAssigned {
                        explicit: missing.clone(),
                        fallback: first.id.clone(),
                    }),
                ),
                (None, None) => (
                    first.id.clone(),
                    Some(ResolutionNote::NoExplicitReporting {
                        fallback: first.id.clone(),
                        assigned: assigned.len(),
                    }),
                ),
            };
            let mut additional: Vec<CategoryId> = Vec::with_capacity(assigned.len() - 1);
            for c in assigned {
                if c.id != reporting && !additional.contains(&c.id) {
                    additional.push(c.id.clone());
                }
            }
            (
                CategoryAssignment {
                    reporting: Some(reporting),
                    additional,
                },
                note,
            )
        }
        [] => match legacy {
            Some(id) => (
                CategoryAssignment {
                    reporting: Some(id.clone()),
                    additional: Vec::new(),
                },
                Some(ResolutionNote::Legacy(id.clone())),
            ),
            None => (CategoryAssignment::default(), None),
        },
    }
}

/// Categories the merchant has defined, keyed by id.
#[derive(Clone, Debug, Default)]
pub struct CategoryDirectory {
    names: BTreeMap<CategoryId, String>,
}

impl CategoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: CategoryId, name: impl Into<String>) {
        self.names.insert(id, name.into());
    }

    pub fn name(&self, id: &CategoryId) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Ids in `assignment` that the directory does not know.
    pub fn unknown_in<'a>(&self, assignment: &'a CategoryAssignment) -> Vec<&'a CategoryId> {
        assignment
            .all_ids()
            .filter(|id| !self.names.contains_key(*id))
            .collect()
    }
}

impl FromIterator<(CategoryId, String)> for CategoryDirectory {
    fn from_iter<T: IntoIterator<Item = (CategoryId, String)>>(iter: T) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}
