//! Repository names left out of the star total.

use crate::facts::hosting::RepositoryNode;
use std::collections::HashSet;

/// Union of caller-supplied and process-wide repository exclusions.
///
/// Names are compared exactly as given, case included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet(HashSet<String>);

impl ExclusionSet {
    #[must_use]
    pub fn merge(caller: &[String], process_wide: &[String]) -> Self {
        Self(caller.iter().chain(process_wide).cloned().collect())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    /// Sum the star counts of every repository not in the set.
    #[must_use]
    pub fn total_stars(&self, repositories: &[RepositoryNode]) -> u64 {
        repositories
            .iter()
            .filter(|repo| !self.contains(&repo.name))
            .map(|repo| repo.star_count)
            .sum()
    }
}
