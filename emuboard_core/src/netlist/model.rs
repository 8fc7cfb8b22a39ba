// SPDX-License-Identifier: GPL-3.0
// model.rs - Copyright Phillip Potter, 2026, under GPLv3 only.

use indexmap::IndexMap;

use super::error::{Error, Result};
use super::units::parse_value;

/// Models every solver is expected to know about without a declaration.
pub(super) const BUILTIN_MODELS: [(&str, &str); 1] = [
    ("1N914", "D(Is=2.52n Rs=.568 N=1.752 Cjo=4e-12 M=.4 tt=20e-9 Iave=200e-3 Vpk=75)"),
];

/// A parsed device model card: a base kind plus its parameters, in the
/// order they were written.
#[derive(Clone, Debug, PartialEq)]
pub struct DeviceModel {
    kind: String,
    params: IndexMap<String, f64>,
}

impl DeviceModel {

    /// Parses a card body such as `NPN(IS=1.8E-14 BF=400)`. A bare kind with no
    /// parameter list is also accepted.
    pub fn parse(card: &str) -> Result<Self> {
        let card = card.trim();
        let malformed = || Error::MalformedModel(card.to_string());

        let (kind, body) = match card.find('(') {
            Some(open) => {
                let body = card[open + 1..].strip_suffix(')').ok_or_else(malformed)?;
                (card[..open].trim(), body)
            }
            None => (card, ""),
        };

        if kind.is_empty() || !kind.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(malformed());
        }

        let mut params = IndexMap::new();
        for pair in body.split_whitespace() {
            let (key, value) = pair.split_once('=').ok_or_else(malformed)?;
            if key.is_empty() {
                return Err(malformed());
            }
            let value = parse_value(value).map_err(|_| malformed())?;
            params.insert(key.to_string(), value);
        }

        Ok(DeviceModel {
            kind: kind.to_string(),
            params,
        })
    }

    /// Parses a named declaration such as `BC239C NPN(IS=1.8E-14)` into its
    /// name and card.
    pub fn parse_named(declaration: &str) -> Result<(String, Self)> {
        let declaration = declaration.trim();
        let (name, card) = declaration
            .split_once(char::is_whitespace)
            .ok_or_else(|| Error::MalformedModel(declaration.to_string()))?;
        Ok((name.to_string(), DeviceModel::parse(card)?))
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn param(&self, key: &str) -> Option<f64> {
        self.params.get(key).copied()
    }

    pub fn params(&self) -> impl Iterator<Item = (&str, f64)> {
        self.params.iter().map(|(key, value)| (key.as_str(), *value))
    }

    /// Whether a bipolar model describes a PNP device.
    pub fn is_pnp(&self) -> bool {
        self.kind.eq_ignore_ascii_case("PNP")
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn parse_should_read_kind_and_params_in_order() {

        let model = DeviceModel::parse("NPN(IS=1.8E-14 VAF=80 BF=400)").unwrap();

        assert_eq!(model.kind(), "NPN");
        assert_eq!(model.param("BF"), Some(400.0));
        assert_eq!(model.param("IS"), Some(1.8e-14));
        let keys: Vec<&str> = model.params().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["IS", "VAF", "BF"]);
    }

    #[test]
    fn parse_should_accept_suffixed_values() {

        let model = DeviceModel::parse("OPAMP(TYPE=3 VLH=2.0 VLL=0.2 FPF=5 UGF=10k SLEW=0.6M RI=1000k RO=50 DAB=0.002)").unwrap();

        assert_eq!(model.param("UGF"), Some(10e3));
        assert_eq!(model.param("SLEW"), Some(0.6e6));
        assert_eq!(model.param("RI"), Some(1000e3));
    }

    #[test]
    fn parse_named_should_split_name_from_card() {

        let (name, model) = DeviceModel::parse_named("BC309 PNP(IS=1E-15 VAF=100 IKF=0 BF=200)").unwrap();

        assert_eq!(name, "BC309");
        assert!(model.is_pnp());
        assert_eq!(model.param("VAF"), Some(100.0));
    }

    #[test]
    fn parse_should_reject_unclosed_cards() {

        assert!(matches!(DeviceModel::parse("NPN(BF=200"), Err(Error::MalformedModel(_))));
    }

    #[test]
    fn parse_should_reject_non_numeric_values() {

        assert!(matches!(DeviceModel::parse("D(mfg=OnSemi)"), Err(Error::MalformedModel(_))));
    }

    #[test]
    fn builtin_models_should_parse() {

        for (name, card) in BUILTIN_MODELS {
            let model = DeviceModel::parse(card).unwrap();
            assert_eq!(model.kind(), "D", "{name}");
        }
    }
}
