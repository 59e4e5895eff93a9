use crate::error::{Error, Result};
use crate::subgroups::GroupSizePlan;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::Hash;

/// An ordered list of disjoint groups.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Partition<P> {
    groups: Vec<Vec<P>>,
}

impl<P> Partition<P> {
    pub fn new(groups: Vec<Vec<P>>) -> Self {
        Self { groups }
    }

    /// Slices `ids` into consecutive groups whose sizes follow `plan` in order.
    ///
    /// Ids past the end of the plan are dropped; a short `ids` yields a short
    /// final group. Callers that need an exact fit check with [`Partition::validate`].
    pub fn from_sizes(ids: Vec<P>, plan: &GroupSizePlan) -> Self {
        let mut remaining = ids.into_iter();
        let mut groups = Vec::with_capacity(plan.len());
        for size in plan.sizes() {
            let group: Vec<P> = remaining.by_ref().take(size as usize).collect();
            if !group.is_empty() {
                groups.push(group);
            }
        }
        Self { groups }
    }

    pub fn groups(&self) -> &[Vec<P>] {
        &self.groups
    }

    pub fn into_groups(self) -> Vec<Vec<P>> {
        self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn members(&self) -> impl Iterator<Item = &P> {
        self.groups.iter().flatten()
    }
}

impl<P: Eq + Hash> Partition<P> {
    /// Checks that the groups exactly cover `present`, never repeat a member,
    /// and have the sizes listed in `plan`.
    pub fn validate(&self, present: &[P], plan: &GroupSizePlan) -> Result<()> {
        if self.groups.len() != plan.len() {
            return Err(Error::InvariantViolation {
                detail: format!(
                    "{} groups produced for a plan of {}",
                    self.groups.len(),
                    plan.len()
                ),
            });
        }
        for (index, (group, size)) in self.groups.iter().zip(plan.sizes()).enumerate() {
            if group.len() != size as usize {
                return Err(Error::InvariantViolation {
                    detail: format!(
                        "group {} has {} members, expected {}",
                        index,
                        group.len(),
                        size
                    ),
                });
            }
        }

        let expected: HashSet<&P> = present.iter().collect();
        let mut seen = HashSet::with_capacity(expected.len());
        for member in self.members() {
            if !seen.insert(member) {
                return Err(Error::InvariantViolation {
                    detail: "a participant appears in more than one slot".to_string(),
                });
            }
            if !expected.contains(member) {
                return Err(Error::InvariantViolation {
                    detail: "a grouped participant is not present".to_string(),
                });
            }
        }
        if seen.len() != present.len() {
            return Err(Error::InvariantViolation {
                detail: format!(
                    "{} of {} present participants were grouped",
                    seen.len(),
                    present.len()
                ),
            });
        }
        Ok(())
    }
}

impl<P> From<Vec<Vec<P>>> for Partition<P> {
    fn from(groups: Vec<Vec<P>>) -> Self {
        Self::new(groups)
    }
}
