//! Byte <-> value conversions for the single-byte field kinds
//!
//! Symbolic fields fall back to `UNDEFINEDnnn` for bytes missing from their
//! table. Poll rate and DPI are derived from the byte by integer formulas;
//! going back picks the nearest representable byte and reports when the
//! requested value could not be hit exactly.

use crate::codes::{CodeTable, KB_MODIFIER_BITS, NO_MODIFIER};
use crate::error::{BuildErrorKind, FieldPath};
use std::fmt;

const UNDEFINED_PREFIX: &str = "UNDEFINED";

/// Poll interval base: rate = 1000 / (1 + byte)
const POLL_RATE_BASE: i64 = 1000;

/// DPI step per byte value
const DPI_STEP: i64 = 50;

/// Canonical form of a user supplied name
pub fn clean_name(name: &str) -> String {
    name.trim().to_uppercase()
}

pub fn undefined_name(byte: u8) -> String {
    format!("{}{:03}", UNDEFINED_PREFIX, byte)
}

/// Parse `UNDEFINED<digits>`; `None` if the name does not follow the pattern
fn parse_undefined(clean: &str) -> Option<Result<u8, BuildErrorKind>> {
    let digits = clean.strip_prefix(UNDEFINED_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(
        digits
            .parse::<u8>()
            .map_err(|_| BuildErrorKind::UndefinedOutOfRange(clean.to_string())),
    )
}

pub fn symbol_to_value(table: &CodeTable, byte: u8) -> String {
    match table.name_of(byte) {
        Some(name) => name.to_string(),
        None => undefined_name(byte),
    }
}

pub fn symbol_from_value(table: &CodeTable, name: &str) -> Result<u8, BuildErrorKind> {
    let clean = clean_name(name);
    if let Some(byte) = table.byte_of(&clean) {
        return Ok(byte);
    }
    parse_undefined(&clean).unwrap_or_else(|| {
        Err(BuildErrorKind::UnknownName {
            table: table.id,
            name: name.to_string(),
        })
    })
}

/// Render a modifier byte as `+`-joined names in bit order
pub fn modifiers_to_value(byte: u8) -> String {
    let names: Vec<&str> = KB_MODIFIER_BITS
        .iter()
        .enumerate()
        .filter(|(bit, _)| byte & (1 << bit) != 0)
        .map(|(_, name)| *name)
        .collect();
    if names.is_empty() {
        NO_MODIFIER.to_string()
    } else {
        names.join("+")
    }
}

pub fn modifiers_from_value(value: &str) -> Result<u8, BuildErrorKind> {
    let clean = clean_name(value);
    if clean == NO_MODIFIER {
        return Ok(0);
    }
    clean.split('+').try_fold(0u8, |acc, part| {
        let part = part.trim();
        KB_MODIFIER_BITS
            .iter()
            .position(|name| *name == part)
            .map(|bit| acc | (1 << bit))
            .ok_or_else(|| BuildErrorKind::UnknownModifier(part.to_string()))
    })
}

/// A byte chosen for a derived value, with the value it actually yields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rounded {
    pub byte: u8,
    pub actual: i64,
}

impl Rounded {
    pub fn is_exact(&self, requested: i64) -> bool {
        self.actual == requested
    }
}

fn clamp_byte(n: i64) -> u8 {
    n.clamp(0, u8::MAX as i64) as u8
}

pub fn poll_rate_of(byte: u8) -> i64 {
    POLL_RATE_BASE / (1 + byte as i64)
}

pub fn poll_rate_byte(rate: i64) -> Result<Rounded, BuildErrorKind> {
    if rate <= 0 {
        return Err(BuildErrorKind::NonPositivePollRate(rate));
    }
    let byte = clamp_byte(POLL_RATE_BASE / rate - 1);
    Ok(Rounded {
        byte,
        actual: poll_rate_of(byte),
    })
}

pub fn dpi_of(byte: u8) -> i64 {
    DPI_STEP * byte as i64
}

pub fn dpi_byte(dpi: i64) -> Result<Rounded, BuildErrorKind> {
    if dpi < 0 {
        return Err(BuildErrorKind::NegativeDpi(dpi));
    }
    let mut byte = clamp_byte(dpi / DPI_STEP);
    // zero means "slot unused"; never map a real request onto it
    if dpi != 0 && byte == 0 {
        byte = 1;
    }
    Ok(Rounded {
        byte,
        actual: dpi_of(byte),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    Dpi,
    PollRate,
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Dpi => f.write_str("dpi"),
            Quantity::PollRate => f.write_str("pollrate"),
        }
    }
}

/// A derived value that had to be rounded to fit its byte
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrecisionWarning {
    pub path: FieldPath,
    pub quantity: Quantity,
    pub requested: i64,
    pub actual: i64,
}

impl fmt::Display for PrecisionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: requested {} of {} resulted in an actual {} of {}",
            self.path, self.quantity, self.requested, self.quantity, self.actual
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::{KB_SCAN_CODES, LIGHTING_EFFECTS, MOUSE_SCAN_CODES};

    #[test]
    fn test_undefined_symmetry() {
        for table in [&MOUSE_SCAN_CODES, &KB_SCAN_CODES, &LIGHTING_EFFECTS] {
            for byte in 0..=255u8 {
                if table.name_of(byte).is_some() {
                    continue;
                }
                let name = symbol_to_value(table, byte);
                assert_eq!(name, format!("UNDEFINED{:03}", byte));
                assert_eq!(symbol_from_value(table, &name), Ok(byte));
            }
        }
        assert_eq!(symbol_from_value(&MOUSE_SCAN_CODES, "UNDEFINED007"), Ok(7));
        assert_eq!(symbol_from_value(&MOUSE_SCAN_CODES, "UNDEFINED7"), Ok(7));
    }

    #[test]
    fn test_symbol_names_are_case_insensitive() {
        assert_eq!(symbol_from_value(&MOUSE_SCAN_CODES, "  left_click "), Ok(0x01));
        assert_eq!(symbol_from_value(&KB_SCAN_CODES, "kp_enter"), Ok(0x58));
        assert_eq!(symbol_from_value(&LIGHTING_EFFECTS, "Rainbow"), Ok(0x02));
        assert_eq!(symbol_to_value(&LIGHTING_EFFECTS, 0x01), "PULSE");
    }

    #[test]
    fn test_symbol_rejects_unknown_names() {
        assert_eq!(
            symbol_from_value(&KB_SCAN_CODES, "NOT_A_KEY"),
            Err(BuildErrorKind::UnknownName {
                table: "kbScanCode",
                name: "NOT_A_KEY".to_string()
            })
        );
        assert!(matches!(
            symbol_from_value(&KB_SCAN_CODES, "UNDEFINED"),
            Err(BuildErrorKind::UnknownName { .. })
        ));
        assert!(matches!(
            symbol_from_value(&KB_SCAN_CODES, "UNDEFINED12x"),
            Err(BuildErrorKind::UnknownName { .. })
        ));
        assert_eq!(
            symbol_from_value(&KB_SCAN_CODES, "UNDEFINED256"),
            Err(BuildErrorKind::UndefinedOutOfRange("UNDEFINED256".to_string()))
        );
    }

    #[test]
    fn test_modifier_symmetry() {
        for byte in 0..=255u8 {
            let rendered = modifiers_to_value(byte);
            assert_eq!(modifiers_from_value(&rendered), Ok(byte), "byte {}", byte);
        }
        assert_eq!(modifiers_to_value(0), "NO_MOD");
        assert_eq!(modifiers_from_value("no_mod"), Ok(0));
    }

    #[test]
    fn test_modifier_rendering() {
        assert_eq!(modifiers_to_value(0x05), "LCTRL+LALT");
        assert_eq!(modifiers_to_value(0x80), "RGUI");
        assert_eq!(modifiers_from_value("lalt + lctrl"), Ok(0x05));
        assert_eq!(
            modifiers_from_value("LCTRL+HYPER"),
            Err(BuildErrorKind::UnknownModifier("HYPER".to_string()))
        );
        assert!(modifiers_from_value("LCTRL+").is_err());
    }

    #[test]
    fn test_dpi_rounding() {
        assert_eq!(dpi_byte(0), Ok(Rounded { byte: 0, actual: 0 }));
        let one = dpi_byte(1).unwrap();
        assert_eq!(one, Rounded { byte: 1, actual: 50 });
        assert!(!one.is_exact(1));
        let max = dpi_byte(12750).unwrap();
        assert_eq!(max, Rounded { byte: 255, actual: 12750 });
        assert!(max.is_exact(12750));
        assert_eq!(dpi_byte(20000).unwrap().byte, 255);
        assert_eq!(dpi_byte(1225).unwrap(), Rounded { byte: 24, actual: 1200 });
        assert_eq!(dpi_byte(-50), Err(BuildErrorKind::NegativeDpi(-50)));
    }

    #[test]
    fn test_poll_rate_rounding() {
        let full = poll_rate_byte(1000).unwrap();
        assert_eq!(full, Rounded { byte: 0, actual: 1000 });
        assert!(full.is_exact(1000));
        assert_eq!(poll_rate_byte(500).unwrap().byte, 1);
        assert_eq!(poll_rate_byte(125).unwrap().byte, 7);
        assert_eq!(poll_rate_byte(2000).unwrap(), Rounded { byte: 0, actual: 1000 });
        // 1000 / 3 - 1 = 332 clamps to 255, which still yields 3
        let slow = poll_rate_byte(3).unwrap();
        assert_eq!(slow, Rounded { byte: 255, actual: 3 });
        assert!(slow.is_exact(3));
        assert_eq!(poll_rate_byte(0), Err(BuildErrorKind::NonPositivePollRate(0)));
    }

    #[test]
    fn test_common_poll_rates_round_trip() {
        for byte in 0..=7u8 {
            assert_eq!(poll_rate_byte(poll_rate_of(byte)).unwrap().byte, byte);
        }
    }
}
