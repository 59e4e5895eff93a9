use anyhow::{anyhow, Context, Error};
use regroup::Partition;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

pub type RosterNumber = u32;

const ITERATION_PREFIX: &str = "Iteration";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub roster: RosterNumber,
    pub name: String,
}

/// One session column: a group name or the absence marker per participant.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    pub label: String,
    #[serde(default)]
    pub markers: BTreeMap<RosterNumber, String>,
}

impl Session {
    fn new(label: String) -> Self {
        Self {
            label,
            markers: BTreeMap::new(),
        }
    }

    fn iteration_number(&self) -> Option<u32> {
        self.label
            .strip_prefix(ITERATION_PREFIX)?
            .trim()
            .parse()
            .ok()
    }

    fn filled_markers(&self) -> impl Iterator<Item = (&RosterNumber, &str)> {
        self.markers
            .iter()
            .map(|(roster, marker)| (roster, marker.trim()))
            .filter(|(_, marker)| !marker.is_empty())
    }

    /// True when no group names have been written yet; only absences, if anything.
    pub fn is_pending(&self, absent_marker: &str) -> bool {
        self.filled_markers().all(|(_, marker)| marker == absent_marker)
    }

    pub fn is_absent(&self, roster: RosterNumber, absent_marker: &str) -> bool {
        self.markers
            .get(&roster)
            .is_some_and(|marker| marker.trim() == absent_marker)
    }

    /// Participants sharing a group label, ordered by label.
    pub fn partition(&self, absent_marker: &str) -> Partition<RosterNumber> {
        let mut groups: BTreeMap<&str, Vec<RosterNumber>> = BTreeMap::new();
        for (&roster, marker) in self.filled_markers() {
            if marker != absent_marker {
                groups.entry(marker).or_default().push(roster);
            }
        }
        Partition::new(groups.into_values().collect())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Roster {
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub sessions: Vec<Session>,
}

impl Roster {
    /// A fresh roster numbering `names` from 1.
    pub fn new<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        let participants = names
            .into_iter()
            .zip(1..)
            .map(|(name, roster)| Participant {
                roster,
                name: name.into(),
            })
            .collect();
        Self {
            participants,
            sessions: vec![],
        }
    }

    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read roster {}", path.to_string_lossy()))?;
        let roster: Roster = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse roster {}", path.to_string_lossy()))?;
        roster.check()?;
        tracing::debug!(
            participants = roster.participants.len(),
            sessions = roster.sessions.len(),
            "loaded roster"
        );
        Ok(roster)
    }

    pub fn save(&self, path: &Path) -> Result<(), Error> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text + "\n")
            .with_context(|| format!("Failed to write roster {}", path.to_string_lossy()))?;
        Ok(())
    }

    fn check(&self) -> Result<(), Error> {
        let mut seen = HashSet::new();
        for participant in &self.participants {
            if !seen.insert(participant.roster) {
                return Err(anyhow!(
                    "Roster number {} is used more than once",
                    participant.roster
                ));
            }
        }
        for session in &self.sessions {
            if let Some(unknown) = session.markers.keys().find(|roster| !seen.contains(*roster)) {
                return Err(anyhow!(
                    "{} has a marker for unknown roster number {}",
                    session.label,
                    unknown
                ));
            }
        }
        Ok(())
    }

    pub fn name_of(&self, roster: RosterNumber) -> Option<&str> {
        self.participants
            .iter()
            .find(|p| p.roster == roster)
            .map(|p| p.name.as_str())
    }

    pub fn roster_numbers(&self) -> Vec<RosterNumber> {
        self.participants.iter().map(|p| p.roster).collect()
    }

    /// Index of the session to fill next, appending a new one when every
    /// session already has groups.
    ///
    /// Sessions are considered in iteration order; labels that do not parse as
    /// `Iteration N` come last.
    pub fn next_session(&mut self, absent_marker: &str) -> usize {
        let mut order: Vec<usize> = (0..self.sessions.len()).collect();
        order.sort_by_key(|&i| self.sessions[i].iteration_number().unwrap_or(u32::MAX));
        if let Some(index) = order
            .into_iter()
            .find(|&i| self.sessions[i].is_pending(absent_marker))
        {
            return index;
        }

        let next = self
            .sessions
            .iter()
            .filter_map(Session::iteration_number)
            .max()
            .map_or(1, |n| n + 1);
        let label = format!("{} {}", ITERATION_PREFIX, next);
        tracing::debug!(%label, "adding session");
        self.sessions.push(Session::new(label));
        self.sessions.len() - 1
    }

    /// Present and absent roster numbers for a session, in roster order.
    pub fn attendance(
        &self,
        session: usize,
        absent_marker: &str,
    ) -> (Vec<RosterNumber>, Vec<RosterNumber>) {
        let session = &self.sessions[session];
        self.roster_numbers()
            .into_iter()
            .partition(|&roster| !session.is_absent(roster, absent_marker))
    }

    /// Groups from every session that already has group names.
    pub fn history(&self, absent_marker: &str) -> Vec<Partition<RosterNumber>> {
        self.sessions
            .iter()
            .filter(|session| !session.is_pending(absent_marker))
            .map(|session| session.partition(absent_marker))
            .collect()
    }

    /// Writes group labels into a session. Absent participants keep the marker;
    /// anyone neither absent nor labelled is cleared.
    pub fn record(
        &mut self,
        session: usize,
        labels: &HashMap<RosterNumber, String>,
        absent_marker: &str,
    ) {
        let numbers = self.roster_numbers();
        let session = &mut self.sessions[session];
        for roster in numbers {
            if session.is_absent(roster, absent_marker) {
                continue;
            }
            match labels.get(&roster) {
                Some(label) => {
                    session.markers.insert(roster, label.clone());
                }
                None => {
                    session.markers.remove(&roster);
                }
            }
        }
    }
}
