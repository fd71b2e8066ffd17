//! Wire types for `/rules` and `/providers/rules`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A routing rule as reported by `GET /rules`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    #[serde(rename = "type")]
    pub rule_type: String,
    #[serde(default)]
    pub payload: String,
    pub proxy: String,
    /// Entry count for rule sets; -1 when not applicable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
}

impl Rule {
    /// Payload for display, `-` when empty (e.g. `MATCH`).
    pub fn display_payload(&self) -> &str {
        if self.payload.is_empty() {
            "-"
        } else {
            &self.payload
        }
    }

    pub fn is_rule_set(&self) -> bool {
        self.rule_type == "RuleSet"
    }
}

/// Rules response from GET /rules
#[derive(Debug, Clone, Deserialize)]
pub struct RulesResponse {
    pub rules: Vec<Rule>,
}

/// A remotely managed rule set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleProvider {
    pub name: String,
    #[serde(rename = "type", default)]
    pub provider_type: String,
    /// domain, ipcidr or classical.
    pub behavior: String,
    #[serde(rename = "ruleCount", default)]
    pub rule_count: u64,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(rename = "vehicleType", default, skip_serializing_if = "Option::is_none")]
    pub vehicle_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

/// Providers response from GET /providers/rules
#[derive(Debug, Clone, Deserialize)]
pub struct RuleProvidersResponse {
    pub providers: BTreeMap<String, RuleProvider>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_rules() {
        let resp: RulesResponse = serde_json::from_value(json!({
            "rules": [
                { "type": "DomainSuffix", "payload": "google.com", "proxy": "Proxy", "size": -1 },
                { "type": "Match", "payload": "", "proxy": "DIRECT" }
            ]
        }))
        .unwrap();

        assert_eq!(resp.rules.len(), 2);
        assert_eq!(resp.rules[0].display_payload(), "google.com");
        assert_eq!(resp.rules[1].display_payload(), "-");
        assert_eq!(resp.rules[1].size, None);
    }

    #[test]
    fn test_decode_providers() {
        let resp: RuleProvidersResponse = serde_json::from_value(json!({
            "providers": {
                "reject": {
                    "name": "reject",
                    "type": "Rule",
                    "behavior": "Domain",
                    "ruleCount": 12345,
                    "updatedAt": "2024-12-19T10:00:00Z",
                    "vehicleType": "HTTP",
                    "format": "YamlRule"
                }
            }
        }))
        .unwrap();

        let provider = &resp.providers["reject"];
        assert_eq!(provider.rule_count, 12345);
        assert_eq!(provider.vehicle_type.as_deref(), Some("HTTP"));
    }
}
