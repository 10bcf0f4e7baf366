pub mod formatter;

pub use formatter::{
    format_money, format_valuation_detail, format_valued_table, should_use_colors, ValuedItem,
};
