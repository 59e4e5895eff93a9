use serde::{Deserialize, Serialize};

/// Group sizes a session may use.
pub const ALLOWED_GROUP_SIZES: [u32; 2] = [3, 4];

const SMALL: usize = ALLOWED_GROUP_SIZES[0] as usize;
const LARGE: usize = ALLOWED_GROUP_SIZES[1] as usize;

/// Group sizes for one session, smallest groups first.
///
/// Only the number of groups of each size is stored, so a plan for any
/// population takes constant space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GroupSizePlan {
    small_groups: usize,
    large_groups: usize,
}

impl GroupSizePlan {
    /// Size of every group in order: all groups of 3, then all groups of 4.
    pub fn sizes(&self) -> impl Iterator<Item = u32> {
        std::iter::repeat(ALLOWED_GROUP_SIZES[0])
            .take(self.small_groups)
            .chain(std::iter::repeat(ALLOWED_GROUP_SIZES[1]).take(self.large_groups))
    }

    pub fn to_vec(&self) -> Vec<u32> {
        self.sizes().collect()
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.small_groups + self.large_groups
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of participants the plan seats.
    pub fn total(&self) -> usize {
        self.small_groups * SMALL + self.large_groups * LARGE
    }

    /// Number of groups of the smallest allowed size.
    pub fn small_groups(&self) -> usize {
        self.small_groups
    }

    /// Number of groups of the largest allowed size.
    pub fn large_groups(&self) -> usize {
        self.large_groups
    }
}

/// Plans the group sizes for `n` present participants.
///
/// Returns the split into groups of 3 and 4 with the fewest groups of 4, all
/// groups of 3 listed first. `Some` of an empty plan for `n == 0`; `None` when
/// no split exists, which happens for 1, 2 and 5.
///
/// The count of 4s is searched upward from zero. The remainder `n - 4y` takes
/// every residue mod 3 within three steps, so the search never looks past
/// `y = 2` and runs in constant time for any `n`.
pub fn plan(n: usize) -> Option<GroupSizePlan> {
    let large_groups = (0..=n / LARGE).find(|&y| (n - LARGE * y) % SMALL == 0)?;
    let sizes = GroupSizePlan {
        small_groups: (n - LARGE * large_groups) / SMALL,
        large_groups,
    };
    tracing::trace!(n, ?sizes, "planned group sizes");
    Some(sizes)
}

#[cfg(test)]
mod tests;
