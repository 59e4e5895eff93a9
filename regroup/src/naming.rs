use crate::error::{Error, Result};
use crate::partition::Partition;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Group labels reused every session, in assignment order.
pub const DEFAULT_GROUP_NAMES: [&str; 11] = [
    "cedar", "cypress", "spruce", "pine", "fir", "oak", "maple", "birch", "ash", "elm",
    "chestnut",
];

pub fn default_group_names() -> Vec<String> {
    DEFAULT_GROUP_NAMES.iter().map(|name| name.to_string()).collect()
}

/// Passes `names` through if there is at least one to label groups with.
pub(crate) fn check_group_names<S>(names: &[S]) -> Result<&[S]> {
    if names.is_empty() {
        return Err(Error::EmptyGroupNames);
    }
    Ok(names)
}

/// Label for the group at `index`, wrapping around the name list.
pub fn group_label<S: AsRef<str>>(index: usize, names: &[S]) -> Result<&str> {
    let names = check_group_names(names)?;
    Ok(names[index % names.len()].as_ref())
}

/// Maps every grouped participant to the label of their group.
pub fn name_groups<P, S>(partition: &Partition<P>, names: &[S]) -> Result<HashMap<P, String>>
where
    P: Clone + Eq + Hash,
    S: AsRef<str>,
{
    Ok(members_by_label(labelled_groups(partition, names)?))
}

/// Label and members of every group, in partition order.
pub fn labelled_groups<P, S>(
    partition: &Partition<P>,
    names: &[S],
) -> Result<Vec<(String, Vec<P>)>>
where
    P: Clone,
    S: AsRef<str>,
{
    let names = check_group_names(names)?;
    Ok(partition
        .groups()
        .iter()
        .zip(names.iter().cycle())
        .map(|(group, name)| (name.as_ref().to_string(), group.clone()))
        .collect())
}

/// Like [`labelled_groups`], but no two groups share a label.
///
/// The first pass over `names` uses them as they are. Later passes append the
/// pass number, so with `["red", "blue"]` the third group is `red #2`. Fails with
/// [`Error::DuplicateGroupName`] if the name list itself produces a repeat.
pub fn distinct_labelled_groups<P, S>(
    partition: &Partition<P>,
    names: &[S],
) -> Result<Vec<(String, Vec<P>)>>
where
    P: Clone,
    S: AsRef<str>,
{
    let mut groups = labelled_groups(partition, names)?;
    let mut seen = HashSet::with_capacity(groups.len());
    for (index, (label, _)) in groups.iter_mut().enumerate() {
        let pass = index / names.len();
        if pass > 0 {
            *label = format!("{} #{}", label, pass + 1);
        }
        if !seen.insert(label.clone()) {
            return Err(Error::DuplicateGroupName {
                label: label.clone(),
            });
        }
    }
    Ok(groups)
}

/// Flattens labelled groups into a participant to label map.
pub fn members_by_label<P>(groups: Vec<(String, Vec<P>)>) -> HashMap<P, String>
where
    P: Eq + Hash,
{
    groups
        .into_iter()
        .flat_map(|(label, members)| {
            members
                .into_iter()
                .map(move |member| (member, label.clone()))
        })
        .collect()
}
