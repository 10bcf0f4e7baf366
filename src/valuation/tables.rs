use serde::{Deserialize, Serialize};

use super::request::{BrandTier, Category, Condition};

/// Rule tables for the valuation model.
///
/// The `Default` values are the published contract; a config file may
/// override any subset of fields. Tables are built once at startup and
/// passed by reference into the engine, never mutated afterwards.
///
/// Example YAML:
/// ```yaml
/// tables:
///   currency: "INR"
///   base_prices:
///     mobile: 250.0
///     laptop: 800.0
///   age:
///     discount_per_year: 0.08
///     max_discount: 0.5
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct RuleTables {
    /// Reported alongside every value. A label, not a conversion.
    pub currency: String,

    pub base_prices: BasePrices,

    pub condition_multipliers: ConditionMultipliers,

    pub brand_multipliers: BrandMultipliers,

    pub reference_weights: ReferenceWeights,

    pub age: AgeCurve,

    pub weight: WeightCurve,

    /// Ordered keyword classes for the component bonus, checked
    /// top-to-bottom; the first class whose keyword appears in the
    /// component name wins.
    pub component_classes: Vec<ComponentClass>,

    /// Per-unit-share bonus for components matching no class.
    pub component_fallback_weight: f64,
}

impl Default for RuleTables {
    fn default() -> Self {
        Self {
            currency: "INR".to_string(),
            base_prices: BasePrices::default(),
            condition_multipliers: ConditionMultipliers::default(),
            brand_multipliers: BrandMultipliers::default(),
            reference_weights: ReferenceWeights::default(),
            age: AgeCurve::default(),
            weight: WeightCurve::default(),
            component_classes: vec![
                ComponentClass {
                    keywords: vec!["motherboard".to_string(), "pcb".to_string()],
                    weight: 80.0,
                },
                ComponentClass {
                    keywords: vec!["screen".to_string(), "display".to_string()],
                    weight: 60.0,
                },
                ComponentClass {
                    keywords: vec!["battery".to_string()],
                    weight: 40.0,
                },
            ],
            component_fallback_weight: 20.0,
        }
    }
}

impl RuleTables {
    /// Per-unit-share bonus weight for a component name.
    /// Matching is case-insensitive substring, first class wins.
    pub fn component_weight(&self, name: &str) -> f64 {
        let name = name.to_lowercase();
        for class in &self.component_classes {
            if class.matches(&name) {
                return class.weight;
            }
        }
        self.component_fallback_weight
    }
}

/// Category-level starting value before any adjustment.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct BasePrices {
    pub mobile: f64,
    pub laptop: f64,
    pub tv: f64,
    pub tablet: f64,
    pub accessory: f64,
    pub other: f64,
}

impl Default for BasePrices {
    fn default() -> Self {
        Self {
            mobile: 250.0,
            laptop: 800.0,
            tv: 500.0,
            tablet: 400.0,
            accessory: 100.0,
            other: 150.0,
        }
    }
}

impl BasePrices {
    /// Total over the closed enum; the `Other` arm doubles as the
    /// fallback entry for anything outside the named categories.
    pub fn for_category(&self, category: Category) -> f64 {
        match category {
            Category::Mobile => self.mobile,
            Category::Laptop => self.laptop,
            Category::Tv => self.tv,
            Category::Tablet => self.tablet,
            Category::Accessory => self.accessory,
            Category::Other => self.other,
        }
    }

    pub fn entries(&self) -> [(&'static str, f64); 6] {
        [
            ("mobile", self.mobile),
            ("laptop", self.laptop),
            ("tv", self.tv),
            ("tablet", self.tablet),
            ("accessory", self.accessory),
            ("other", self.other),
        ]
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct ConditionMultipliers {
    pub working: f64,
    pub repairable: f64,
    pub dead: f64,
}

impl Default for ConditionMultipliers {
    fn default() -> Self {
        Self {
            working: 1.4,
            repairable: 1.0,
            dead: 0.6,
        }
    }
}

impl ConditionMultipliers {
    pub fn for_condition(&self, condition: Condition) -> f64 {
        match condition {
            Condition::Working => self.working,
            Condition::Repairable => self.repairable,
            Condition::Dead => self.dead,
        }
    }

    pub fn entries(&self) -> [(&'static str, f64); 3] {
        [
            ("working", self.working),
            ("repairable", self.repairable),
            ("dead", self.dead),
        ]
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct BrandMultipliers {
    pub tier1: f64,
    pub tier2: f64,
    pub local: f64,
}

impl Default for BrandMultipliers {
    fn default() -> Self {
        Self {
            tier1: 1.1,
            tier2: 1.0,
            local: 0.9,
        }
    }
}

impl BrandMultipliers {
    pub fn for_tier(&self, tier: BrandTier) -> f64 {
        match tier {
            BrandTier::Tier1 => self.tier1,
            BrandTier::Tier2 => self.tier2,
            BrandTier::Local => self.local,
        }
    }

    pub fn entries(&self) -> [(&'static str, f64); 3] {
        [
            ("tier1", self.tier1),
            ("tier2", self.tier2),
            ("local", self.local),
        ]
    }
}

/// Expected typical weight per category in kg, used to normalize the
/// weight factor.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct ReferenceWeights {
    pub mobile: f64,
    pub laptop: f64,
    pub tv: f64,
    pub tablet: f64,
    pub accessory: f64,
    pub other: f64,
}

impl Default for ReferenceWeights {
    fn default() -> Self {
        Self {
            mobile: 0.18,
            laptop: 2.0,
            tv: 8.0,
            tablet: 0.5,
            accessory: 0.1,
            other: 1.0,
        }
    }
}

impl ReferenceWeights {
    pub fn for_category(&self, category: Category) -> f64 {
        match category {
            Category::Mobile => self.mobile,
            Category::Laptop => self.laptop,
            Category::Tv => self.tv,
            Category::Tablet => self.tablet,
            Category::Accessory => self.accessory,
            Category::Other => self.other,
        }
    }

    pub fn entries(&self) -> [(&'static str, f64); 6] {
        [
            ("mobile", self.mobile),
            ("laptop", self.laptop),
            ("tv", self.tv),
            ("tablet", self.tablet),
            ("accessory", self.accessory),
            ("other", self.other),
        ]
    }
}

/// Linear depreciation with a cap: `factor = 1 - min(age * per_year, max)`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct AgeCurve {
    pub discount_per_year: f64,
    pub max_discount: f64,
}

impl Default for AgeCurve {
    fn default() -> Self {
        Self {
            discount_per_year: 0.08,
            max_discount: 0.5,
        }
    }
}

impl AgeCurve {
    /// Example: 3 years at 8%/year -> 24% discount -> factor 0.76.
    pub fn factor(&self, age_years: f64) -> f64 {
        let discount = (age_years * self.discount_per_year).min(self.max_discount);
        1.0 - discount
    }
}

/// Sub-linear weight response: `factor = max(weight/ref, min_ratio)^exponent`.
/// The floor keeps a near-zero weight from collapsing the ratio; the
/// exponent keeps unusually heavy items from producing extreme swings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct WeightCurve {
    pub exponent: f64,
    pub min_ratio: f64,
}

impl Default for WeightCurve {
    fn default() -> Self {
        Self {
            exponent: 0.7,
            min_ratio: 0.2,
        }
    }
}

impl WeightCurve {
    pub fn factor(&self, weight_kg: f64, reference_kg: f64) -> f64 {
        let ratio = (weight_kg / reference_kg).max(self.min_ratio);
        ratio.powf(self.exponent)
    }
}

/// One keyword class for the component bonus.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ComponentClass {
    /// Substrings to look for in the lowercased component name.
    pub keywords: Vec<String>,

    /// Bonus per unit of declared share.
    pub weight: f64,
}

impl ComponentClass {
    fn matches(&self, lowercased_name: &str) -> bool {
        self.keywords.iter().any(|k| lowercased_name.contains(k.as_str()))
    }
}
