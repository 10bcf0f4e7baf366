use serde::{Deserialize, Serialize};

/// Broad device type. Determines the base price and the reference weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Mobile,
    Laptop,
    Tv,
    Tablet,
    Accessory,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Mobile => "mobile",
            Category::Laptop => "laptop",
            Category::Tv => "tv",
            Category::Tablet => "tablet",
            Category::Accessory => "accessory",
            Category::Other => "other",
        }
    }
}

/// Current condition of the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    Working,
    Repairable,
    Dead,
}

impl Condition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Working => "working",
            Condition::Repairable => "repairable",
            Condition::Dead => "dead",
        }
    }
}

/// Simple brand tier. Tier1 is Apple/Samsung/Dell class, local is unbranded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BrandTier {
    Tier1,
    #[default]
    Tier2,
    Local,
}

impl BrandTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            BrandTier::Tier1 => "tier1",
            BrandTier::Tier2 => "tier2",
            BrandTier::Local => "local",
        }
    }
}

/// A named sub-component and its declared share of the device (0-1).
/// Shares are not required to sum to 1 across a request.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ComponentShare {
    pub name: String,
    pub percentage: f64,
}

/// A device description to be valued. Immutable once parsed; the engine
/// never mutates its input.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ValuationRequest {
    pub category: Category,

    pub condition: Condition,

    /// Age of the device in years.
    pub age_years: f64,

    /// Defaults to tier2 when not given.
    #[serde(default)]
    pub brand_tier: BrandTier,

    /// Approximate weight in kg. Absent means "no weight adjustment".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,

    /// Optional component breakdown for the salvage bonus.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<ComponentShare>>,

    /// City/region. Accepted for forward compatibility, unused by the model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl ValuationRequest {
    /// Components as a slice, empty when none were supplied.
    pub fn components(&self) -> &[ComponentShare] {
        self.components.as_deref().unwrap_or_default()
    }

    /// Short human-readable reference, e.g. "mobile (working, tier1)".
    pub fn summary(&self) -> String {
        format!(
            "{} ({}, {})",
            self.category.as_str(),
            self.condition.as_str(),
            self.brand_tier.as_str()
        )
    }
}
