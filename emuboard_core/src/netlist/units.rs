// SPDX-License-Identifier: GPL-3.0
// units.rs - Copyright Phillip Potter, 2026, under GPLv3 only.

use super::error::{Error, Result};

/// Kilo-ohms to ohms.
pub const fn res_k(value: f64) -> f64 {
    value * 1e3
}

/// Mega-ohms to ohms.
pub const fn res_m(value: f64) -> f64 {
    value * 1e6
}

/// Microfarads to farads.
pub const fn cap_u(value: f64) -> f64 {
    value * 1e-6
}

/// Nanofarads to farads.
pub const fn cap_n(value: f64) -> f64 {
    value * 1e-9
}

/// Picofarads to farads.
pub const fn cap_p(value: f64) -> f64 {
    value * 1e-12
}

// Model cards are case sensitive: "M" and "MEG" are mega, "m" is milli.
const SUFFIXES: [(&str, f64); 10] = [
    ("MEG", 1e6),
    ("T", 1e12),
    ("G", 1e9),
    ("M", 1e6),
    ("k", 1e3),
    ("K", 1e3),
    ("m", 1e-3),
    ("u", 1e-6),
    ("n", 1e-9),
    ("p", 1e-12),
];

/// Parses a model card value such as `1M`, `2.52n`, `-3` or `4e-12`.
pub fn parse_value(text: &str) -> Result<f64> {
    let text = text.trim();
    if let Ok(value) = text.parse::<f64>() {
        return Ok(value);
    }

    for (suffix, multiplier) in SUFFIXES {
        if let Some(number) = text.strip_suffix(suffix) {
            if let Ok(value) = number.parse::<f64>() {
                return Ok(value * multiplier);
            }
        }
    }

    // A trailing "f" is femto, but only once nothing else matched so that
    // plain floats are never misread.
    if let Some(number) = text.strip_suffix('f') {
        if let Ok(value) = number.parse::<f64>() {
            return Ok(value * 1e-15);
        }
    }

    Err(Error::MalformedModel(text.to_string()))
}
