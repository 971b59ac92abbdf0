//! Script name tables.
//!
//! Schemas up to 2013 name scripts in plain English ("Latin"); from 2016 on
//! they use ISO 15924 codes with a description ("Latn - Latin"). Both tables
//! in the attribute catalogue list the same scripts in the same order.

use crate::attr::{ISO_SCRIPTS, LEGACY_SCRIPTS};

/// Fallback for names without a counterpart.
pub const OTHER_SCRIPT: &str = "other";

/// Map a legacy script name to its ISO 15924 form.
pub fn legacy_to_iso(name: &str) -> &'static str {
    translate(name, LEGACY_SCRIPTS, ISO_SCRIPTS)
}

/// Map an ISO 15924 script name to its legacy form.
pub fn iso_to_legacy(name: &str) -> &'static str {
    translate(name, ISO_SCRIPTS, LEGACY_SCRIPTS)
}

fn translate(name: &str, from: &[&'static str], to: &[&'static str]) -> &'static str {
    from.iter()
        .position(|s| *s == name)
        .and_then(|i| to.get(i).copied())
        .unwrap_or(OTHER_SCRIPT)
}
