//! Pot search criteria

use crate::search::{Criteria, CriteriaEntry, RoutingRule, WILDCARD};

use super::POT;

/// Free-text search over pots
///
/// Every field is routed to `pot`; pointed at another entity it contributes
/// nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PotSearch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
}

impl PotSearch {
    /// Matches `keyword` anywhere in the title, description or address.
    pub fn keyword(keyword: &str) -> Self {
        let pattern = format!("{}{}{}", WILDCARD, keyword, WILDCARD);
        Self {
            title: Some(pattern.clone()),
            description: Some(pattern.clone()),
            address: Some(pattern),
        }
    }
}

impl Criteria for PotSearch {
    fn entries(&self) -> Vec<CriteriaEntry> {
        [
            ("title", &self.title),
            ("description", &self.description),
            ("address", &self.address),
        ]
        .into_iter()
        .map(|(name, value)| {
            CriteriaEntry::new(name, value.clone()).routed(RoutingRule::target(POT))
        })
        .collect()
    }
}
