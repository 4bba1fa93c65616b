use serde::{Deserialize, Serialize};

/// Brazilian corporate tax regime ("enquadramento").
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Regime {
    #[default]
    SimplesNacional,
    LucroPresumido,
    LucroReal,
}

impl Regime {
    pub const ALL: [Regime; 3] = [
        Regime::SimplesNacional,
        Regime::LucroPresumido,
        Regime::LucroReal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SimplesNacional => "Simples Nacional",
            Self::LucroPresumido => "Lucro Presumido",
            Self::LucroReal => "Lucro Real",
        }
    }

    /// Accepts `Lucro Real`, `lucro-real` or `lucro_real`.
    pub fn parse(s: &str) -> Option<Self> {
        let normalized = s.trim().to_lowercase().replace([' ', '_'], "-");
        match normalized.as_str() {
            "simples-nacional" | "simples" => Some(Self::SimplesNacional),
            "lucro-presumido" | "presumido" => Some(Self::LucroPresumido),
            "lucro-real" | "real" => Some(Self::LucroReal),
            _ => None,
        }
    }
}

impl std::fmt::Display for Regime {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
