use serde::{Deserialize, Serialize};

use crate::valuation::RuleTables;

/// Top-level config file shape (~/.config/scrapval/config.yaml).
///
/// Every field is optional; an empty or missing file means the built-in
/// rule tables. Partial overrides are merged field-wise, so a config with
/// only `tables.currency` set changes nothing else.
#[derive(Debug, Default, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub tables: RuleTables,
}
