//! Link identities and the sparse referral trust matrices.
//!
//! All matrices are thin newtypes over [`BTreeMap`] so that iteration order
//! is deterministic: equation synthesis, the solver loop and the output
//! writer all rely on it.

use crate::opinion::{Evidence, Opinion};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fmt,
    ops::{Deref, DerefMut},
};

/// Ordered pair of node ids identifying a directed trust assertion.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Link {
    pub from: u64,
    pub to: u64,
}

impl Link {
    pub fn new(from: u64, to: u64) -> Self {
        Link { from, to }
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}, {}]", self.from, self.to)
    }
}

/// Raw evidence per observed edge. Re-inserting a link overwrites the
/// previous pair (last wins).
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectReferralEvidence(BTreeMap<Link, Evidence>);

impl DirectReferralEvidence {
    /// Converts every evidence pair to an opinion under the evidence unit `c`.
    pub fn to_opinions(&self, c: u64) -> DirectReferralOpinions {
        DirectReferralOpinions(
            self.0
                .iter()
                .map(|(link, evidence)| (*link, Opinion::from_evidence(c, evidence)))
                .collect(),
        )
    }
}

impl Deref for DirectReferralEvidence {
    type Target = BTreeMap<Link, Evidence>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for DirectReferralEvidence {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl FromIterator<(Link, Evidence)> for DirectReferralEvidence {
    fn from_iter<I: IntoIterator<Item = (Link, Evidence)>>(iter: I) -> Self {
        DirectReferralEvidence(iter.into_iter().collect())
    }
}

/// The sparse matrix `A` of direct referral opinions. Read-only while the
/// solver runs.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectReferralOpinions(BTreeMap<Link, Opinion>);

impl DirectReferralOpinions {
    /// The observed edges, in ascending link order.
    pub fn links(&self) -> impl Iterator<Item = Link> + '_ {
        self.0.keys().copied()
    }
}

impl Deref for DirectReferralOpinions {
    type Target = BTreeMap<Link, Opinion>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for DirectReferralOpinions {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl FromIterator<(Link, Opinion)> for DirectReferralOpinions {
    fn from_iter<I: IntoIterator<Item = (Link, Opinion)>>(iter: I) -> Self {
        DirectReferralOpinions(iter.into_iter().collect())
    }
}

/// The matrix `R` of final (possibly indirect) referral opinions. Entries are
/// only ever populated for `(i, j)` with `i ≠ j` and `j` reachable from `i`;
/// absent entries read as [`Opinion::FULL_BELIEF`].
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalReferralOpinions(BTreeMap<Link, Opinion>);

impl FinalReferralOpinions {
    /// The current opinion for `link`, full belief when unassigned.
    pub fn get_or_full_belief(&self, link: &Link) -> Opinion {
        self.0.get(link).copied().unwrap_or(Opinion::FULL_BELIEF)
    }
}

impl Deref for FinalReferralOpinions {
    type Target = BTreeMap<Link, Opinion>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for FinalReferralOpinions {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// Direct functional opinions about some capability, by subject node.
pub type DirectFunctionalTrust = BTreeMap<u64, Opinion>;
