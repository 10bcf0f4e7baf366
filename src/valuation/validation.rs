use super::request::ValuationRequest;
use super::tables::RuleTables;

/// Validate a request at the boundary, before the engine runs.
/// Returns all violations at once (not just the first).
///
/// Absent optional fields are degradations the engine handles with neutral
/// defaults, never errors. Enumerated fields are already enforced by serde
/// at parse time, so only the numeric bounds are checked here.
pub fn validate_request(request: &ValuationRequest) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if !request.age_years.is_finite() || request.age_years < 0.0 {
        errors.push(format!(
            "age_years: must be a non-negative number, got {}",
            request.age_years
        ));
    }

    if let Some(weight_kg) = request.weight_kg {
        if !weight_kg.is_finite() || weight_kg < 0.0 {
            errors.push(format!(
                "weight_kg: must be a non-negative number, got {}",
                weight_kg
            ));
        }
    }

    for (i, component) in request.components().iter().enumerate() {
        if !component.percentage.is_finite()
            || !(0.0..=1.0).contains(&component.percentage)
        {
            errors.push(format!(
                "components[{}].percentage: must be between 0 and 1, got {}",
                i, component.percentage
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate rule tables at startup. Defaults always pass; this guards
/// config-file overrides.
pub fn validate_tables(tables: &RuleTables) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for (name, price) in tables.base_prices.entries() {
        if !price.is_finite() || price < 0.0 {
            errors.push(format!("tables.base_prices.{}: must be non-negative", name));
        }
    }

    for (name, multiplier) in tables.condition_multipliers.entries() {
        if !multiplier.is_finite() || multiplier < 0.0 {
            errors.push(format!(
                "tables.condition_multipliers.{}: must be non-negative",
                name
            ));
        }
    }

    for (name, multiplier) in tables.brand_multipliers.entries() {
        if !multiplier.is_finite() || multiplier < 0.0 {
            errors.push(format!(
                "tables.brand_multipliers.{}: must be non-negative",
                name
            ));
        }
    }

    // A zero reference weight would divide the ratio away entirely.
    for (name, weight) in tables.reference_weights.entries() {
        if !weight.is_finite() || weight <= 0.0 {
            errors.push(format!(
                "tables.reference_weights.{}: must be positive",
                name
            ));
        }
    }

    if !tables.age.discount_per_year.is_finite() || tables.age.discount_per_year < 0.0 {
        errors.push("tables.age.discount_per_year: must be non-negative".to_string());
    }
    if !tables.age.max_discount.is_finite()
        || !(0.0..=1.0).contains(&tables.age.max_discount)
    {
        errors.push("tables.age.max_discount: must be between 0 and 1".to_string());
    }

    if !tables.weight.exponent.is_finite() || tables.weight.exponent <= 0.0 {
        errors.push("tables.weight.exponent: must be positive".to_string());
    }
    if !tables.weight.min_ratio.is_finite() || tables.weight.min_ratio <= 0.0 {
        errors.push("tables.weight.min_ratio: must be positive".to_string());
    }

    for (i, class) in tables.component_classes.iter().enumerate() {
        if class.keywords.is_empty() {
            errors.push(format!(
                "tables.component_classes[{}].keywords: must not be empty",
                i
            ));
        }
        if !class.weight.is_finite() || class.weight < 0.0 {
            errors.push(format!(
                "tables.component_classes[{}].weight: must be non-negative",
                i
            ));
        }
    }

    if !tables.component_fallback_weight.is_finite() || tables.component_fallback_weight < 0.0 {
        errors.push("tables.component_fallback_weight: must be non-negative".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
