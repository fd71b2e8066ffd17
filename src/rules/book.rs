//! Rules joined with their providers.

use std::collections::BTreeMap;

use crate::rules::types::{Rule, RuleProvider};

/// Rules and rule providers fetched together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleBook {
    pub rules: Vec<Rule>,
    pub providers: BTreeMap<String, RuleProvider>,
}

/// A rule listing entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleListItem<'a> {
    Plain(&'a Rule),
    /// A `RuleSet` rule whose payload names a known provider.
    WithProvider {
        rule: &'a Rule,
        provider: &'a RuleProvider,
    },
}

impl<'a> RuleListItem<'a> {
    pub fn rule(&self) -> &'a Rule {
        match self {
            RuleListItem::Plain(rule) => rule,
            RuleListItem::WithProvider { rule, .. } => rule,
        }
    }

    pub fn provider(&self) -> Option<&'a RuleProvider> {
        match self {
            RuleListItem::Plain(_) => None,
            RuleListItem::WithProvider { provider, .. } => Some(provider),
        }
    }
}

impl RuleBook {
    pub fn new(rules: Vec<Rule>, providers: BTreeMap<String, RuleProvider>) -> Self {
        Self { rules, providers }
    }

    /// Rules in order, each joined with its provider where one exists.
    pub fn items(&self) -> Vec<RuleListItem<'_>> {
        self.rules
            .iter()
            .map(|rule| {
                let provider = rule
                    .is_rule_set()
                    .then(|| self.providers.values().find(|p| p.name == rule.payload))
                    .flatten();
                match provider {
                    Some(provider) => RuleListItem::WithProvider { rule, provider },
                    None => RuleListItem::Plain(rule),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(rule_type: &str, payload: &str) -> Rule {
        Rule {
            rule_type: rule_type.into(),
            payload: payload.into(),
            proxy: "Proxy".into(),
            size: None,
        }
    }

    fn provider(name: &str) -> RuleProvider {
        RuleProvider {
            name: name.into(),
            provider_type: "Rule".into(),
            behavior: "Domain".into(),
            rule_count: 10,
            updated_at: None,
            vehicle_type: None,
            format: None,
        }
    }

    #[test]
    fn test_items_join_rule_sets() {
        let mut providers = BTreeMap::new();
        providers.insert("ads".to_string(), provider("ads"));

        let book = RuleBook::new(
            vec![
                rule("RuleSet", "ads"),
                rule("RuleSet", "missing"),
                rule("DomainSuffix", "ads"),
                rule("Match", ""),
            ],
            providers,
        );

        let items = book.items();
        assert_eq!(items.len(), 4);
        assert_eq!(items[0].provider().map(|p| p.name.as_str()), Some("ads"));
        assert!(matches!(items[1], RuleListItem::Plain(_)));
        assert!(matches!(items[2], RuleListItem::Plain(_)));
        assert_eq!(items[3].rule().display_payload(), "-");
    }
}
