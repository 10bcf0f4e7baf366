use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::config::{get_config_path, Config};
use crate::valuation::{validate_tables, RuleTables};

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout()
        .flush()
        .context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?;
    let input = input.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

/// Run the interactive init wizard to create a config file.
///
/// If `default_path` is Some, uses that as the config file path.
/// Otherwise, prompts the user with the default config path.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    println!();
    println!("scrapval configuration");
    println!("======================");
    println!();
    println!("The config file holds the rule tables the valuation model runs on:");
    println!("per-category base prices, condition and brand multipliers, the age");
    println!("depreciation curve, weight normalization, and the component bonus");
    println!("keyword classes. Everything you don't change keeps its default.");
    println!();

    let mut tables = RuleTables::default();

    // Currency label
    let currency = loop {
        let input = prompt_with_default("Currency code to report values in", &tables.currency)?;
        if input.chars().all(|c| c.is_ascii_alphabetic()) && !input.is_empty() {
            break input.to_uppercase();
        }
        println!("  Invalid: use a plain alphabetic code like INR or USD. Try again.");
    };
    tables.currency = currency;

    // Age curve
    println!();
    println!("Age depreciation: value drops by a fixed share per year, up to a cap.");
    println!("Defaults: 8% per year, capped at a 50% total discount.");
    if !prompt_yes_no("Age curve - keep defaults?", true)? {
        tables.age.discount_per_year = loop {
            let input = prompt_with_default("Discount per year (0-1)", "0.08")?;
            match input.parse::<f64>() {
                Ok(v) if (0.0..=1.0).contains(&v) => break v,
                _ => println!("  Invalid: must be a number between 0 and 1. Try again."),
            }
        };
        tables.age.max_discount = loop {
            let input = prompt_with_default("Maximum total discount (0-1)", "0.5")?;
            match input.parse::<f64>() {
                Ok(v) if (0.0..=1.0).contains(&v) => break v,
                _ => println!("  Invalid: must be a number between 0 and 1. Try again."),
            }
        };
    }

    // Base prices
    println!();
    println!("Base prices are the starting value per category before adjustments.");
    if !prompt_yes_no(
        "Base prices - keep defaults? (mobile 250, laptop 800, tv 500, tablet 400, accessory 100, other 150)",
        true,
    )? {
        for (name, value) in [
            ("mobile", &mut tables.base_prices.mobile),
            ("laptop", &mut tables.base_prices.laptop),
            ("tv", &mut tables.base_prices.tv),
            ("tablet", &mut tables.base_prices.tablet),
            ("accessory", &mut tables.base_prices.accessory),
            ("other", &mut tables.base_prices.other),
        ] {
            *value = loop {
                let input = prompt_with_default(
                    &format!("  Base price for {}", name),
                    &format!("{}", *value),
                )?;
                match input.parse::<f64>() {
                    Ok(v) if v >= 0.0 => break v,
                    _ => println!("  Invalid: must be a non-negative number. Try again."),
                }
            };
        }
    }

    // Everything else (multipliers, weights, component classes) is easier to
    // tweak in the written file than through prompts.
    if let Err(errors) = validate_tables(&tables) {
        for error in &errors {
            eprintln!("  - {}", error);
        }
        anyhow::bail!("Refusing to write an invalid config");
    }

    // Config path
    let default_config_path = default_path.unwrap_or_else(get_config_path);
    println!();
    let path_str = prompt_with_default(
        "Where should the config be saved?",
        &default_config_path.display().to_string(),
    )?;
    let config_path = PathBuf::from(&path_str);

    if config_path.exists() {
        let overwrite = prompt_yes_no(
            &format!(
                "Config already exists at {}. Overwrite?",
                config_path.display()
            ),
            false,
        )?;
        if !overwrite {
            println!("Aborted.");
            return Ok(());
        }
    }

    // Write the full table set so every knob is visible for later editing
    let config = Config { tables };
    let yaml = serde_saphyr::to_string(&config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(&config_path)
        .with_context(|| format!("Failed to open atomic write file at {}", config_path.display()))?;
    file.write_all(yaml.as_bytes())
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save config to {}", config_path.display()))?;

    println!();
    println!("Config written to {}", config_path.display());
    println!("Run `scrapval estimate request.json` to value a device, or");
    println!("`scrapval tables` to inspect the effective rule tables.");

    Ok(())
}
