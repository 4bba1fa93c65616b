use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::TaxKind;

/// User-editable flat rates for one regime, all expressed as fractions.
///
/// Simples Nacional does not read these; its rates come from the bracket
/// tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRates {
    pub pis_pasep: Decimal,
    pub cofins: Decimal,
    pub irpj: Decimal,
    /// Surtax applied to the monthly IRPJ base above the threshold.
    pub adicional_irpj: Decimal,
    pub csll: Decimal,
    pub ipi: Decimal,
    pub iss: Decimal,
    pub icms: Decimal,
    pub rat: Decimal,
    pub cpp: Decimal,
    pub inss_terceiros: Decimal,
    pub fgts: Decimal,
}

impl TaxRates {
    /// Cumulative PIS/COFINS rates used under Lucro Presumido.
    pub fn lucro_presumido_defaults() -> Self {
        Self {
            pis_pasep: dec!(0.0065),
            cofins: dec!(0.03),
            ..Self::common_defaults()
        }
    }

    /// Non-cumulative PIS/COFINS rates used under Lucro Real.
    pub fn lucro_real_defaults() -> Self {
        Self {
            pis_pasep: dec!(0.0165),
            cofins: dec!(0.076),
            ..Self::common_defaults()
        }
    }

    fn common_defaults() -> Self {
        Self {
            pis_pasep: Decimal::ZERO,
            cofins: Decimal::ZERO,
            irpj: dec!(0.15),
            adicional_irpj: dec!(0.10),
            csll: dec!(0.09),
            ipi: Decimal::ZERO,
            iss: dec!(0.05),
            icms: dec!(0.18),
            rat: dec!(0.02),
            cpp: dec!(0.20),
            inss_terceiros: dec!(0.058),
            fgts: dec!(0.08),
        }
    }

    pub fn rate(
        &self,
        kind: TaxKind,
    ) -> Decimal {
        match kind {
            TaxKind::PisPasep => self.pis_pasep,
            TaxKind::Cofins => self.cofins,
            TaxKind::Irpj => self.irpj,
            TaxKind::AdicionalIrpj => self.adicional_irpj,
            TaxKind::Csll => self.csll,
            TaxKind::Ipi => self.ipi,
            TaxKind::Iss => self.iss,
            TaxKind::Icms => self.icms,
            TaxKind::Rat => self.rat,
            TaxKind::Cpp => self.cpp,
            TaxKind::InssTerceiros => self.inss_terceiros,
            TaxKind::Fgts => self.fgts,
        }
    }

    pub fn set_rate(
        &mut self,
        kind: TaxKind,
        rate: Decimal,
    ) {
        let slot = match kind {
            TaxKind::PisPasep => &mut self.pis_pasep,
            TaxKind::Cofins => &mut self.cofins,
            TaxKind::Irpj => &mut self.irpj,
            TaxKind::AdicionalIrpj => &mut self.adicional_irpj,
            TaxKind::Csll => &mut self.csll,
            TaxKind::Ipi => &mut self.ipi,
            TaxKind::Iss => &mut self.iss,
            TaxKind::Icms => &mut self.icms,
            TaxKind::Rat => &mut self.rat,
            TaxKind::Cpp => &mut self.cpp,
            TaxKind::InssTerceiros => &mut self.inss_terceiros,
            TaxKind::Fgts => &mut self.fgts,
        };
        *slot = rate;
    }

    /// First rate outside `[0, 1]`, in reporting order.
    ///
    /// The engine accepts any value; callers that load rates from user
    /// files use this to reject nonsense before calculating.
    pub fn first_out_of_range(&self) -> Option<(TaxKind, Decimal)> {
        TaxKind::ALL
            .into_iter()
            .map(|kind| (kind, self.rate(kind)))
            .find(|(_, rate)| *rate < Decimal::ZERO || *rate > Decimal::ONE)
    }
}

/// Flat-rate configuration for the two regimes that use one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateConfiguration {
    pub lucro_presumido: TaxRates,
    pub lucro_real: TaxRates,
}

impl Default for RateConfiguration {
    fn default() -> Self {
        Self {
            lucro_presumido: TaxRates::lucro_presumido_defaults(),
            lucro_real: TaxRates::lucro_real_defaults(),
        }
    }
}
