use serde::{Deserialize, Serialize};

/// The twelve taxes and contributions every regime result reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaxKind {
    PisPasep,
    Cofins,
    Irpj,
    AdicionalIrpj,
    Csll,
    Ipi,
    Iss,
    Icms,
    Rat,
    Cpp,
    InssTerceiros,
    Fgts,
}

impl TaxKind {
    /// Reporting order.
    pub const ALL: [TaxKind; 12] = [
        TaxKind::PisPasep,
        TaxKind::Cofins,
        TaxKind::Irpj,
        TaxKind::AdicionalIrpj,
        TaxKind::Csll,
        TaxKind::Ipi,
        TaxKind::Iss,
        TaxKind::Icms,
        TaxKind::Rat,
        TaxKind::Cpp,
        TaxKind::InssTerceiros,
        TaxKind::Fgts,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PisPasep => "PIS_PASEP",
            Self::Cofins => "COFINS",
            Self::Irpj => "IRPJ",
            Self::AdicionalIrpj => "ADICIONAL_IRPJ",
            Self::Csll => "CSLL",
            Self::Ipi => "IPI",
            Self::Iss => "ISS",
            Self::Icms => "ICMS",
            Self::Rat => "RAT",
            Self::Cpp => "CPP",
            Self::InssTerceiros => "INSS_TERCEIROS",
            Self::Fgts => "FGTS",
        }
    }

    /// Human-readable label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::PisPasep => "PIS/PASEP",
            Self::Cofins => "COFINS",
            Self::Irpj => "IRPJ",
            Self::AdicionalIrpj => "Adicional IRPJ",
            Self::Csll => "CSLL",
            Self::Ipi => "IPI",
            Self::Iss => "ISS",
            Self::Icms => "ICMS",
            Self::Rat => "RAT",
            Self::Cpp => "CPP",
            Self::InssTerceiros => "INSS Terceiros",
            Self::Fgts => "FGTS",
        }
    }

    /// Case-insensitive; `-` and `/` are accepted in place of `_`.
    pub fn parse(s: &str) -> Option<Self> {
        let normalized = s.trim().to_uppercase().replace(['-', '/', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
    }

    /// Taxes deducted from gross revenue in the income statement.
    pub fn is_revenue_deduction(&self) -> bool {
        matches!(self, Self::PisPasep | Self::Cofins | Self::Icms | Self::Iss)
    }

    /// Employer charges levied on payroll.
    pub fn is_payroll_charge(&self) -> bool {
        matches!(self, Self::Cpp | Self::InssTerceiros | Self::Rat | Self::Fgts)
    }

    /// Taxes levied on profit.
    pub fn is_income_tax(&self) -> bool {
        matches!(self, Self::Irpj | Self::AdicionalIrpj | Self::Csll)
    }
}

impl std::fmt::Display for TaxKind {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
