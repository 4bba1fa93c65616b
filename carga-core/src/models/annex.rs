use serde::{Deserialize, Serialize};

/// Simples Nacional annex, selected by the company's line of business.
///
/// Each annex owns its own progressive bracket table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Annex {
    /// Commerce.
    #[default]
    #[serde(rename = "ANEXO I")]
    I,
    /// Industry.
    #[serde(rename = "ANEXO II")]
    II,
    /// Services with CPP inside the unified collection.
    #[serde(rename = "ANEXO III")]
    III,
    /// Payroll-heavy services; CPP is paid outside the unified collection.
    #[serde(rename = "ANEXO IV")]
    IV,
    /// Intellectual and technical services.
    #[serde(rename = "ANEXO V")]
    V,
}

impl Annex {
    pub const ALL: [Annex; 5] = [Annex::I, Annex::II, Annex::III, Annex::IV, Annex::V];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::I => "ANEXO I",
            Self::II => "ANEXO II",
            Self::III => "ANEXO III",
            Self::IV => "ANEXO IV",
            Self::V => "ANEXO V",
        }
    }

    /// Accepts `ANEXO IV`, `Anexo IV`, `IV` or `4`.
    pub fn parse(s: &str) -> Option<Self> {
        let upper = s.trim().to_uppercase();
        let numeral = upper.strip_prefix("ANEXO").unwrap_or(upper.as_str()).trim();
        match numeral {
            "I" | "1" => Some(Self::I),
            "II" | "2" => Some(Self::II),
            "III" | "3" => Some(Self::III),
            "IV" | "4" => Some(Self::IV),
            "V" | "5" => Some(Self::V),
            _ => None,
        }
    }
}

impl std::fmt::Display for Annex {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
