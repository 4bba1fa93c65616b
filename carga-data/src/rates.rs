//! Rate configuration files.
//!
//! ```toml
//! [presumido]
//! icms = "0.12"
//! iss = 0.02
//!
//! [real]
//! pis_pasep = "0.0165"
//! ADICIONAL_IRPJ = 0.1
//! ```
//!
//! Keys are tax names in any case, with `-` or `_` as separator. Quote a
//! rate to keep every digit; bare floats are converted from `f64`. Keys that
//! are left out keep the default rate for that regime.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use carga_core::{RateConfiguration, TaxKind, TaxRates};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal_macros::dec;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum RatesConfigError {
    #[error("failed to read rates file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid rates file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unknown tax '{key}' in [{section}]")]
    UnknownTax { section: &'static str, key: String },

    #[error("{tax} rate in [{section}] is not a number: '{value}'")]
    InvalidRate {
        section: &'static str,
        tax: TaxKind,
        value: String,
    },

    #[error("{tax} rate in [{section}] must be between 0 and 1, got {rate}")]
    OutOfRange {
        section: &'static str,
        tax: TaxKind,
        rate: Decimal,
    },
}

/// Above this a flat rate is almost certainly a percentage typed as a
/// whole number.
const SUSPICIOUS_RATE: Decimal = dec!(0.5);

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RatesFile {
    #[serde(default)]
    presumido: BTreeMap<String, RateValue>,
    #[serde(default)]
    real: BTreeMap<String, RateValue>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RateValue {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl RateValue {
    fn to_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Text(text) => text.trim().parse().ok(),
            Self::Float(value) => Decimal::from_f64(*value),
            Self::Integer(value) => Some(Decimal::from(*value)),
        }
    }
}

impl std::fmt::Display for RateValue {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Float(value) => write!(f, "{value}"),
            Self::Integer(value) => write!(f, "{value}"),
        }
    }
}

fn apply_section(
    section: &'static str,
    overrides: &BTreeMap<String, RateValue>,
    rates: &mut TaxRates,
) -> Result<(), RatesConfigError> {
    for (key, value) in overrides {
        let tax = TaxKind::parse(key).ok_or_else(|| RatesConfigError::UnknownTax {
            section,
            key: key.clone(),
        })?;
        let rate = value.to_decimal().ok_or_else(|| RatesConfigError::InvalidRate {
            section,
            tax,
            value: value.to_string(),
        })?;
        if rate < Decimal::ZERO || rate > Decimal::ONE {
            return Err(RatesConfigError::OutOfRange { section, tax, rate });
        }
        if rate > SUSPICIOUS_RATE {
            warn!(section, %tax, %rate, "unusually high tax rate");
        }
        debug!(section, %tax, %rate, "rate override");
        rates.set_rate(tax, rate);
    }
    Ok(())
}

/// Parses a rates file, starting from the default configuration.
pub fn parse_rates(content: &str) -> Result<RateConfiguration, RatesConfigError> {
    let file: RatesFile = toml::from_str(content)?;
    let mut config = RateConfiguration::default();

    apply_section("presumido", &file.presumido, &mut config.lucro_presumido)?;
    apply_section("real", &file.real, &mut config.lucro_real)?;

    Ok(config)
}

/// Reads and parses the rates file at `path`.
pub fn load_rates(path: &Path) -> Result<RateConfiguration, RatesConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| RatesConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_rates(&content)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_empty_file_is_defaults() {
        assert_eq!(parse_rates("").unwrap(), RateConfiguration::default());
    }

    #[test]
    fn test_overrides_only_named_rates() {
        let config = parse_rates(
            r#"
            [presumido]
            icms = "0.12"
            ISS = 0.25

            [real]
            pis-pasep = "0.0165"
            adicional_irpj = 0.125
            "#,
        )
        .unwrap();

        let mut presumido = TaxRates::lucro_presumido_defaults();
        presumido.icms = dec!(0.12);
        presumido.iss = dec!(0.25);
        assert_eq!(config.lucro_presumido, presumido);

        let mut real = TaxRates::lucro_real_defaults();
        real.adicional_irpj = dec!(0.125);
        assert_eq!(config.lucro_real, real);
    }

    #[test]
    fn test_integer_rates_are_accepted() {
        let config = parse_rates("[real]\nipi = 0\nicms = 1\n").unwrap();

        assert_eq!(config.lucro_real.ipi, Decimal::ZERO);
        assert_eq!(config.lucro_real.icms, Decimal::ONE);
    }

    #[test]
    fn test_rejects_rate_above_one() {
        let err = parse_rates("[presumido]\nicms = 18\n").unwrap_err();

        let RatesConfigError::OutOfRange { section, tax, rate } = err else {
            panic!("Expected OutOfRange, got: {err:?}");
        };
        assert_eq!(section, "presumido");
        assert_eq!(tax, TaxKind::Icms);
        assert_eq!(rate, dec!(18));
    }

    #[test]
    fn test_rejects_negative_rate() {
        let err = parse_rates("[real]\ncofins = \"-0.01\"\n").unwrap_err();

        assert!(
            matches!(err, RatesConfigError::OutOfRange { section: "real", tax: TaxKind::Cofins, .. }),
            "{err:?}"
        );
    }

    #[test]
    fn test_rejects_unparseable_text() {
        let err = parse_rates("[real]\ncofins = \"seven\"\n").unwrap_err();

        let RatesConfigError::InvalidRate { tax, value, .. } = err else {
            panic!("Expected InvalidRate, got: {err:?}");
        };
        assert_eq!(tax, TaxKind::Cofins);
        assert_eq!(value, "seven");
    }

    #[test]
    fn test_rejects_unknown_tax() {
        let err = parse_rates("[presumido]\nvat = 0.2\n").unwrap_err();

        let RatesConfigError::UnknownTax { section, key } = err else {
            panic!("Expected UnknownTax, got: {err:?}");
        };
        assert_eq!(section, "presumido");
        assert_eq!(key, "vat");
    }

    #[test]
    fn test_rejects_unknown_section() {
        let err = parse_rates("[simples]\nicms = 0.1\n").unwrap_err();

        assert!(matches!(err, RatesConfigError::Parse(_)), "{err:?}");
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_rates(Path::new("/nonexistent/rates.toml")).unwrap_err();

        let RatesConfigError::Io { path, .. } = err else {
            panic!("Expected Io, got: {err:?}");
        };
        assert_eq!(path, PathBuf::from("/nonexistent/rates.toml"));
    }
}
