use serde::Serialize;

use super::request::{ComponentShare, ValuationRequest};
use super::tables::RuleTables;

/// Every intermediate factor that produced the final value.
/// Monetary figures are rounded to 2 decimals, dimensionless factors to 3.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorBreakdown {
    pub base_price: f64,
    pub condition_multiplier: f64,
    pub brand_multiplier: f64,
    pub age_factor: f64,
    pub weight_factor: f64,
    pub component_bonus: f64,
    pub final_value: f64,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Valuation {
    pub estimated_value: f64,
    pub currency: String,
    pub breakdown: FactorBreakdown,
}

/// Estimate the value of a device from its description.
///
/// Pure and deterministic: identical inputs yield identical outputs,
/// including breakdown rounding, and there are no side effects. The
/// caller is responsible for validating the request first (see
/// `validate_request`); on well-formed input this cannot fail.
pub fn estimate_value(request: &ValuationRequest, tables: &RuleTables) -> Valuation {
    let base_price = tables.base_prices.for_category(request.category);
    let condition_multiplier = tables
        .condition_multipliers
        .for_condition(request.condition);
    let brand_multiplier = tables.brand_multipliers.for_tier(request.brand_tier);
    let age_factor = tables.age.factor(request.age_years);

    // No weight given means no adjustment, not a penalty.
    let weight_factor = match request.weight_kg {
        Some(weight_kg) => {
            let reference_kg = tables.reference_weights.for_category(request.category);
            tables.weight.factor(weight_kg, reference_kg)
        }
        None => 1.0,
    };

    let component_bonus = component_bonus(request.components(), tables);

    let mut value =
        base_price * condition_multiplier * brand_multiplier * age_factor * weight_factor;
    // The bonus is additive: salvageable part value is independent of how
    // depreciated the device is as a whole.
    value += component_bonus;

    // Not reachable with the default tables, but guarded: never negative.
    let final_value = round2(value).max(0.0);

    Valuation {
        estimated_value: final_value,
        currency: tables.currency.clone(),
        breakdown: FactorBreakdown {
            base_price: round2(base_price),
            condition_multiplier,
            brand_multiplier,
            age_factor: round3(age_factor),
            weight_factor: round3(weight_factor),
            component_bonus: round2(component_bonus),
            final_value,
            currency: tables.currency.clone(),
        },
    }
}

/// Sum of `class_weight * percentage` over all components. Order of the
/// components does not affect the result.
fn component_bonus(components: &[ComponentShare], tables: &RuleTables) -> f64 {
    components
        .iter()
        .map(|c| tables.component_weight(&c.name) * c.percentage)
        .sum()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::valuation::request::{BrandTier, Category, Condition};

    fn request(category: Category, condition: Condition, age_years: f64) -> ValuationRequest {
        ValuationRequest {
            category,
            condition,
            age_years,
            brand_tier: BrandTier::Tier2,
            weight_kg: None,
            components: None,
            location: None,
        }
    }

    #[test]
    fn test_working_tier1_mobile_scenario() {
        // base 250 * 1.4 (working) * 1.1 (tier1) * 0.92 (1 year) * 1.0 (at
        // reference weight) = 354.2
        let mut req = request(Category::Mobile, Condition::Working, 1.0);
        req.brand_tier = BrandTier::Tier1;
        req.weight_kg = Some(0.18);

        let result = estimate_value(&req, &RuleTables::default());
        assert_eq!(result.estimated_value, 354.2);
        assert_eq!(result.breakdown.base_price, 250.0);
        assert_eq!(result.breakdown.condition_multiplier, 1.4);
        assert_eq!(result.breakdown.brand_multiplier, 1.1);
        assert_eq!(result.breakdown.age_factor, 0.92);
        assert_eq!(result.breakdown.weight_factor, 1.0);
        assert_eq!(result.breakdown.component_bonus, 0.0);
        assert_eq!(result.breakdown.final_value, 354.2);
        assert_eq!(result.currency, "INR");
        assert_eq!(result.breakdown.currency, "INR");
    }

    #[test]
    fn test_dead_local_laptop_age_capped() {
        // 10 years * 8% = 80% discount, capped at 50%:
        // 800 * 0.6 * 0.9 * 0.5 * 1.0 = 216
        let mut req = request(Category::Laptop, Condition::Dead, 10.0);
        req.brand_tier = BrandTier::Local;

        let result = estimate_value(&req, &RuleTables::default());
        assert_eq!(result.breakdown.age_factor, 0.5);
        assert_eq!(result.breakdown.weight_factor, 1.0);
        assert_eq!(result.estimated_value, 216.0);
    }

    #[test]
    fn test_component_bonus_added_after_product() {
        // bonus = 80 * 0.5 (motherboard) + 20 * 0.5 (unclassified) = 50
        let mut req = request(Category::Tv, Condition::Repairable, 2.0);
        req.components = Some(vec![
            ComponentShare {
                name: "Motherboard".to_string(),
                percentage: 0.5,
            },
            ComponentShare {
                name: "Unknown Part".to_string(),
                percentage: 0.5,
            },
        ]);

        let result = estimate_value(&req, &RuleTables::default());
        assert_eq!(result.breakdown.component_bonus, 50.0);
        // 500 * 1.0 * 1.0 * 0.84 + 50 = 470
        assert_eq!(result.estimated_value, 470.0);
    }

    #[test]
    fn test_single_component_bonus_linearity() {
        let mut req = request(Category::Mobile, Condition::Dead, 20.0);
        req.components = Some(vec![ComponentShare {
            name: "battery".to_string(),
            percentage: 0.3,
        }]);

        let result = estimate_value(&req, &RuleTables::default());
        // 40 * 0.3 = 12
        assert_eq!(result.breakdown.component_bonus, 12.0);
    }

    #[test]
    fn test_missing_weight_is_neutral() {
        let req = request(Category::Tablet, Condition::Working, 0.0);
        let result = estimate_value(&req, &RuleTables::default());
        assert_eq!(result.breakdown.weight_factor, 1.0);
        // 400 * 1.4 = 560
        assert_eq!(result.estimated_value, 560.0);
    }

    #[test]
    fn test_weight_factor_floor() {
        // 1 gram vs a 8 kg reference: ratio clamps at 0.2, factor 0.2^0.7
        let mut req = request(Category::Tv, Condition::Working, 0.0);
        req.weight_kg = Some(0.001);

        let result = estimate_value(&req, &RuleTables::default());
        let expected = (0.2f64.powf(0.7) * 1000.0).round() / 1000.0;
        assert_eq!(result.breakdown.weight_factor, expected);
    }

    #[test]
    fn test_age_factor_never_below_half() {
        let tables = RuleTables::default();
        for age in [0.0, 1.0, 6.25, 7.0, 50.0, 1000.0] {
            let result = estimate_value(&request(Category::Mobile, Condition::Working, age), &tables);
            assert!(result.breakdown.age_factor >= 0.5, "age {}", age);
        }
    }

    #[test]
    fn test_age_monotonicity() {
        let tables = RuleTables::default();
        let mut previous = f64::INFINITY;
        for age in [0.0, 0.5, 1.0, 2.0, 4.0, 6.0, 6.25, 8.0, 20.0] {
            let value =
                estimate_value(&request(Category::Laptop, Condition::Working, age), &tables)
                    .estimated_value;
            assert!(value <= previous, "value rose at age {}", age);
            previous = value;
        }
    }

    #[test]
    fn test_idempotent_including_breakdown() {
        let mut req = request(Category::Laptop, Condition::Repairable, 3.3);
        req.weight_kg = Some(1.7);
        req.components = Some(vec![ComponentShare {
            name: "display".to_string(),
            percentage: 0.25,
        }]);

        let tables = RuleTables::default();
        let first = estimate_value(&req, &tables);
        let second = estimate_value(&req, &tables);
        assert_eq!(first, second);
    }

    #[test]
    fn test_estimated_value_matches_breakdown_and_is_non_negative() {
        let tables = RuleTables::default();
        let categories = [
            Category::Mobile,
            Category::Laptop,
            Category::Tv,
            Category::Tablet,
            Category::Accessory,
            Category::Other,
        ];
        for category in categories {
            let result = estimate_value(&request(category, Condition::Dead, 100.0), &tables);
            assert_eq!(result.estimated_value, result.breakdown.final_value);
            assert!(result.estimated_value >= 0.0);
        }
    }

    #[test]
    fn test_other_category_fallback_entries() {
        // The defensive fallback row: `other` has its own base price and
        // reference weight.
        let mut req = request(Category::Other, Condition::Repairable, 0.0);
        req.weight_kg = Some(1.0); // matches the `other` reference exactly

        let result = estimate_value(&req, &RuleTables::default());
        assert_eq!(result.breakdown.base_price, 150.0);
        assert_eq!(result.breakdown.weight_factor, 1.0);
        assert_eq!(result.estimated_value, 150.0);
    }

    #[test]
    fn test_component_order_does_not_matter() {
        let tables = RuleTables::default();
        let parts = vec![
            ComponentShare {
                name: "pcb".to_string(),
                percentage: 0.2,
            },
            ComponentShare {
                name: "screen".to_string(),
                percentage: 0.3,
            },
            ComponentShare {
                name: "casing".to_string(),
                percentage: 0.5,
            },
        ];
        let mut forward = request(Category::Mobile, Condition::Working, 1.0);
        forward.components = Some(parts.clone());
        let mut reversed = forward.clone();
        reversed.components = Some(parts.into_iter().rev().collect());

        assert_eq!(
            estimate_value(&forward, &tables).breakdown.component_bonus,
            estimate_value(&reversed, &tables).breakdown.component_bonus
        );
    }

    #[test]
    fn test_location_is_ignored_by_the_model() {
        let tables = RuleTables::default();
        let plain = request(Category::Mobile, Condition::Working, 1.0);
        let mut located = plain.clone();
        located.location = Some("Mumbai".to_string());

        assert_eq!(
            estimate_value(&plain, &tables),
            estimate_value(&located, &tables)
        );
    }

    #[test]
    fn test_custom_currency_flows_through() {
        let tables = RuleTables {
            currency: "EUR".to_string(),
            ..RuleTables::default()
        };
        let result = estimate_value(&request(Category::Mobile, Condition::Working, 0.0), &tables);
        assert_eq!(result.currency, "EUR");
        assert_eq!(result.breakdown.currency, "EUR");
    }

    #[test]
    fn test_response_json_shape() {
        let mut req = request(Category::Mobile, Condition::Working, 1.0);
        req.brand_tier = BrandTier::Tier1;
        req.weight_kg = Some(0.18);

        let result = estimate_value(&req, &RuleTables::default());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["estimated_value"], 354.2);
        assert_eq!(json["currency"], "INR");
        assert_eq!(json["breakdown"]["base_price"], 250.0);
        assert_eq!(json["breakdown"]["age_factor"], 0.92);
        assert_eq!(json["breakdown"]["final_value"], 354.2);
    }
}
