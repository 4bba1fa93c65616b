use rust_decimal::Decimal;
use serde::Serialize;

use super::TaxKind;

/// Statutory split ("partilha") of a Simples Nacional payment among its
/// constituent taxes. Taxes an annex does not collect are zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Distribution {
    pub irpj: Decimal,
    pub csll: Decimal,
    pub cofins: Decimal,
    pub pis_pasep: Decimal,
    pub cpp: Decimal,
    pub icms: Decimal,
    pub ipi: Decimal,
    pub iss: Decimal,
}

impl Distribution {
    pub const NONE: Distribution = Distribution {
        irpj: Decimal::ZERO,
        csll: Decimal::ZERO,
        cofins: Decimal::ZERO,
        pis_pasep: Decimal::ZERO,
        cpp: Decimal::ZERO,
        icms: Decimal::ZERO,
        ipi: Decimal::ZERO,
        iss: Decimal::ZERO,
    };

    /// Fraction of the unified payment allocated to `kind`.
    pub fn share(
        &self,
        kind: TaxKind,
    ) -> Decimal {
        match kind {
            TaxKind::Irpj => self.irpj,
            TaxKind::Csll => self.csll,
            TaxKind::Cofins => self.cofins,
            TaxKind::PisPasep => self.pis_pasep,
            TaxKind::Cpp => self.cpp,
            TaxKind::Icms => self.icms,
            TaxKind::Ipi => self.ipi,
            TaxKind::Iss => self.iss,
            TaxKind::AdicionalIrpj | TaxKind::Rat | TaxKind::InssTerceiros | TaxKind::Fgts => {
                Decimal::ZERO
            }
        }
    }

    /// Sum of all shares. Statutory tables do not always add up to 1.
    pub fn total(&self) -> Decimal {
        self.irpj + self.csll + self.cofins + self.pis_pasep + self.cpp + self.icms + self.ipi + self.iss
    }
}

impl Default for Distribution {
    fn default() -> Self {
        Self::NONE
    }
}

/// One row of a Simples Nacional annex table.
///
/// Both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bracket {
    pub lower_bound: Decimal,
    pub upper_bound: Decimal,
    pub nominal_rate: Decimal,
    /// Amount subtracted from `revenue × nominal_rate`.
    pub deduction: Decimal,
    pub distribution: Distribution,
}

impl Bracket {
    pub fn contains(
        &self,
        revenue: Decimal,
    ) -> bool {
        revenue >= self.lower_bound && revenue <= self.upper_bound
    }

    /// `(revenue × nominal − deduction) / revenue`, or zero without revenue.
    pub fn effective_rate(
        &self,
        revenue: Decimal,
    ) -> Decimal {
        if revenue > Decimal::ZERO {
            (revenue * self.nominal_rate - self.deduction) / revenue
        } else {
            Decimal::ZERO
        }
    }
}
