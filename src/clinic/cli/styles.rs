use console::Style;
use once_cell::sync::Lazy;

pub static HEADING: Lazy<Style> = Lazy::new(|| Style::new().bold().cyan());
pub static RULE: Lazy<Style> = Lazy::new(|| Style::new().dim());
pub static LABEL: Lazy<Style> = Lazy::new(|| Style::new().bold());
pub static ID: Lazy<Style> = Lazy::new(|| Style::new().yellow());
pub static MISSING: Lazy<Style> = Lazy::new(|| Style::new().dim().italic());
