//! City-tier premiums projecting an anchor-tier baseline onto a target market.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PremiumTriple {
    pub conservative: f64,
    pub neutral: f64,
    pub aggressive: f64,
}

impl PremiumTriple {
    /// Anchor tier → first-tier multipliers; last resort when no tier matches.
    pub const FALLBACK: PremiumTriple = PremiumTriple {
        conservative: 1.15,
        neutral: 1.25,
        aggressive: 1.35,
    };
}

fn default_tier() -> String { "tier1".to_string() }

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierPremiumConfig {
    /// Tier used when the requested one is unknown.
    #[serde(default = "default_tier")]
    pub default_tier: String,
    pub tiers: BTreeMap<String, PremiumTriple>,
}

impl Default for TierPremiumConfig {
    fn default() -> Self {
        let triple = |conservative, neutral, aggressive| PremiumTriple { conservative, neutral, aggressive };
        Self {
            default_tier: default_tier(),
            tiers: BTreeMap::from([
                ("tier1".to_string(), triple(1.15, 1.25, 1.35)),
                ("tier2".to_string(), triple(0.95, 1.05, 1.15)),
                ("tier3".to_string(), triple(0.85, 0.95, 1.05)),
            ]),
        }
    }
}

/// The premiums actually applied, and the tier they belong to.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedPremium {
    pub tier: String,
    pub premiums: PremiumTriple,
}

impl TierPremiumConfig {
    /// Requested tier, else the default tier, else [`PremiumTriple::FALLBACK`].
    pub fn resolve(&self, tier: &str) -> AppliedPremium {
        if let Some(p) = self.tiers.get(tier) {
            return AppliedPremium { tier: tier.to_string(), premiums: *p };
        }
        tracing::debug!(requested = tier, fallback = %self.default_tier, "unknown tier, using default");
        match self.tiers.get(&self.default_tier) {
            Some(p) => AppliedPremium { tier: self.default_tier.clone(), premiums: *p },
            None => AppliedPremium { tier: self.default_tier.clone(), premiums: PremiumTriple::FALLBACK },
        }
    }
}

/// Display metadata for a city tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityTierInfo {
    pub name: String,
    pub cities: String,
    pub multiplier: f64,
}

pub fn default_city_tiers() -> BTreeMap<String, CityTierInfo> {
    let info = |name: &str, cities: &str, multiplier| CityTierInfo {
        name: name.to_string(),
        cities: cities.to_string(),
        multiplier,
    };
    BTreeMap::from([
        ("tier1".to_string(), info("First-tier cities", "Shenzhen / Hangzhou / Shanghai / Beijing", 1.0)),
        ("tier2".to_string(), info("Second-tier cities", "Chengdu / Wuhan / Nanjing / Xi'an", 0.85)),
        ("tier3".to_string(), info("Third-tier cities", "Changsha / Zhengzhou / Jinan / Qingdao", 0.70)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_tier_resolves_directly() {
        let cfg = TierPremiumConfig::default();
        let applied = cfg.resolve("tier2");
        assert_eq!(applied.tier, "tier2");
        assert_eq!(applied.premiums.neutral, 1.05);
    }

    #[test]
    fn test_unknown_tier_falls_back_to_default() {
        let cfg = TierPremiumConfig::default();
        let applied = cfg.resolve("tier9");
        assert_eq!(applied.tier, "tier1");
        assert_eq!(applied.premiums, PremiumTriple::FALLBACK);
    }

    #[test]
    fn test_missing_default_tier_uses_builtin_triple() {
        let cfg = TierPremiumConfig {
            default_tier: "capital".to_string(),
            tiers: BTreeMap::from([("tier2".to_string(), PremiumTriple { conservative: 1.0, neutral: 1.0, aggressive: 1.0 })]),
        };
        assert_eq!(cfg.resolve("nowhere").premiums, PremiumTriple::FALLBACK);
    }
}
