use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Presumed-profit percentages applied to revenue under Lucro Presumido.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Presumption {
    pub irpj: Decimal,
    pub csll: Decimal,
}

/// Business activity category ("área de atuação").
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BusinessActivity {
    #[default]
    Commerce,
    Industry,
    ServicesIii,
    ServicesIv,
    ServicesV,
}

impl BusinessActivity {
    pub const ALL: [BusinessActivity; 5] = [
        BusinessActivity::Commerce,
        BusinessActivity::Industry,
        BusinessActivity::ServicesIii,
        BusinessActivity::ServicesIv,
        BusinessActivity::ServicesV,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Commerce => "Comércio",
            Self::Industry => "Indústria",
            Self::ServicesIii => "Serviços III",
            Self::ServicesIv => "Serviços IV",
            Self::ServicesV => "Serviços V",
        }
    }

    /// Accepts the Portuguese label (`Serviços IV`) or an ASCII slug
    /// (`servicos-iv`, `commerce`).
    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| match c {
                'ç' => 'c',
                'é' | 'ê' => 'e',
                'ú' => 'u',
                ' ' | '_' => '-',
                other => other,
            })
            .collect();
        match normalized.as_str() {
            "comercio" | "commerce" => Some(Self::Commerce),
            "industria" | "industry" => Some(Self::Industry),
            "servicos-iii" | "services-iii" => Some(Self::ServicesIii),
            "servicos-iv" | "services-iv" => Some(Self::ServicesIv),
            "servicos-v" | "services-v" => Some(Self::ServicesV),
            _ => None,
        }
    }

    /// IRPJ and CSLL presumption percentages for this activity.
    pub fn presumption(&self) -> Presumption {
        match self {
            Self::Commerce | Self::Industry => Presumption {
                irpj: dec!(0.08),
                csll: dec!(0.12),
            },
            Self::ServicesIii | Self::ServicesIv | Self::ServicesV => Presumption {
                irpj: dec!(0.32),
                csll: dec!(0.32),
            },
        }
    }
}

impl std::fmt::Display for BusinessActivity {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_accepts_labels_and_slugs() {
        assert_eq!(BusinessActivity::parse("Comércio"), Some(BusinessActivity::Commerce));
        assert_eq!(BusinessActivity::parse("industria"), Some(BusinessActivity::Industry));
        assert_eq!(
            BusinessActivity::parse("Serviços IV"),
            Some(BusinessActivity::ServicesIv)
        );
        assert_eq!(
            BusinessActivity::parse("servicos_v"),
            Some(BusinessActivity::ServicesV)
        );
        assert_eq!(BusinessActivity::parse("agro"), None);
    }

    #[test]
    fn trade_and_industry_share_the_low_presumption() {
        for activity in [BusinessActivity::Commerce, BusinessActivity::Industry] {
            let p = activity.presumption();
            assert_eq!(p.irpj, dec!(0.08));
            assert_eq!(p.csll, dec!(0.12));
        }
    }

    #[test]
    fn service_categories_presume_32_percent() {
        for activity in [
            BusinessActivity::ServicesIii,
            BusinessActivity::ServicesIv,
            BusinessActivity::ServicesV,
        ] {
            let p = activity.presumption();
            assert_eq!(p.irpj, dec!(0.32));
            assert_eq!(p.csll, dec!(0.32));
        }
    }
}
