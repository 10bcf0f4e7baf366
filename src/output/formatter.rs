use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::valuation::{Valuation, ValuationRequest};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a monetary amount with two decimals, e.g. "354.20"
pub fn format_money(value: f64) -> String {
    format!("{:.2}", value)
}

/// Format a single valuation with its full factor breakdown (multi-line).
pub fn format_valuation_detail(
    request: &ValuationRequest,
    valuation: &Valuation,
    use_colors: bool,
) -> String {
    let b = &valuation.breakdown;
    let header = request.summary();
    let weight_note = match request.weight_kg {
        Some(kg) => format!(" ({} kg)", kg),
        None => " (no weight given)".to_string(),
    };
    let bonus_note = if request.components().is_empty() {
        String::new()
    } else {
        format!(" ({} components)", request.components().len())
    };

    let body = format!(
        "  Base price:      {} {}\n  Condition:       x{}\n  Brand:           x{}\n  Age:             x{:.3} ({} years)\n  Weight:          x{:.3}{}\n  Component bonus: +{} {}{}\n  Estimated value: {} {}",
        format_money(b.base_price),
        b.currency,
        b.condition_multiplier,
        b.brand_multiplier,
        b.age_factor,
        request.age_years,
        b.weight_factor,
        weight_note,
        format_money(b.component_bonus),
        b.currency,
        bonus_note,
        format_money(valuation.estimated_value),
        valuation.currency,
    );

    if use_colors {
        format!("{}\n{}", header.bold(), body)
    } else {
        format!("{}\n{}", header, body)
    }
}

/// A request with its estimated value, for batch table display
pub struct ValuedItem<'a> {
    pub request: &'a ValuationRequest,
    pub value: f64,
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate free text to fit available width, accounting for Unicode
fn truncate_text(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format a batch of valued requests as a table, one line per item.
/// Columns: index, estimated value, summary, optional location.
/// Callers sort the slice (highest value first) before formatting.
pub fn format_valued_table(items: &[ValuedItem], currency: &str, use_colors: bool) -> String {
    if items.is_empty() {
        return "No requests to value.".to_string();
    }

    let term_width = get_terminal_width();

    // Index column: 3 chars + 1 space. Value column: right-aligned, wide
    // enough for "999999.99".
    let value_width = 10;
    let separator = "  ";

    items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            let index_str = format!("{:>2}.", idx + 1);
            let value_str = format!("{:>width$}", format_money(item.value), width = value_width);
            let summary = item.request.summary();

            let location = match item.request.location.as_deref() {
                Some(loc) => {
                    let fixed_width =
                        4 + value_width + separator.len() * 3 + currency.len() + summary.len();
                    let loc = if let Some(width) = term_width {
                        if width > fixed_width + 10 {
                            truncate_text(loc, width - fixed_width)
                        } else {
                            truncate_text(loc, 20)
                        }
                    } else {
                        // No terminal (pipe), don't truncate
                        loc.to_string()
                    };
                    format!("{}{}", separator, loc)
                }
                None => String::new(),
            };

            if use_colors {
                format!(
                    "{} {} {}{}{}{}",
                    index_str.dimmed(),
                    value_str.bold(),
                    currency,
                    separator,
                    summary,
                    location
                )
            } else {
                format!(
                    "{} {} {}{}{}{}",
                    index_str, value_str, currency, separator, summary, location
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
