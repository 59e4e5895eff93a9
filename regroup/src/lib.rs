//! Splits the participants present at a session into groups of 3 or 4,
//! steering away from pairs that have already shared a group.
//!
//! The pieces run in this order:
//!
//! * [`PairWeights::build`] counts past co-occurrences.
//! * [`plan`] picks the group sizes.
//! * [`assign`] runs a bounded random search scored by [`total_score`].
//! * [`name_groups`] labels the chosen groups.

mod assign;
mod config;
mod error;
mod history;
mod naming;
mod partition;
mod scoring;
mod subgroups;

pub use assign::*;
pub use config::*;
pub use error::*;
pub use history::*;
pub use naming::*;
pub use partition::*;
pub use scoring::*;
pub use subgroups::{plan, GroupSizePlan, ALLOWED_GROUP_SIZES};
