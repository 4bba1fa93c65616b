use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Regime, TaxKind};

/// Raw annual amounts produced by a regime calculator, before they are
/// expressed as shares of revenue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaxBreakdown {
    pub pis_pasep: Decimal,
    pub cofins: Decimal,
    pub irpj: Decimal,
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

impl TaxBreakdown {
    pub fn amount(
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

    /// Sum of the twelve amounts in reporting order.
    pub fn total(&self) -> Decimal {
        TaxKind::ALL.iter().map(|kind| self.amount(*kind)).sum()
    }
}

/// An amount together with its share of gross revenue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxAmount {
    pub amount: Decimal,
    /// `amount / revenue` as a fraction; zero when revenue is zero.
    pub percentage: Decimal,
}

impl TaxAmount {
    pub fn of_revenue(
        amount: Decimal,
        revenue: Decimal,
    ) -> Self {
        let percentage = if revenue > Decimal::ZERO {
            amount / revenue
        } else {
            Decimal::ZERO
        };
        Self { amount, percentage }
    }
}

/// Normalized output of any regime calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeResult {
    pub regime: Regime,
    pub pis_pasep: TaxAmount,
    pub cofins: TaxAmount,
    pub irpj: TaxAmount,
    pub adicional_irpj: TaxAmount,
    pub csll: TaxAmount,
    pub ipi: TaxAmount,
    pub iss: TaxAmount,
    pub icms: TaxAmount,
    pub rat: TaxAmount,
    pub cpp: TaxAmount,
    pub inss_terceiros: TaxAmount,
    pub fgts: TaxAmount,
    pub total: TaxAmount,
}

impl RegimeResult {
    /// Expresses every amount of `breakdown` as a share of `revenue` and
    /// totals them.
    pub fn from_breakdown(
        regime: Regime,
        breakdown: &TaxBreakdown,
        revenue: Decimal,
    ) -> Self {
        let share = |kind| TaxAmount::of_revenue(breakdown.amount(kind), revenue);
        Self {
            regime,
            pis_pasep: share(TaxKind::PisPasep),
            cofins: share(TaxKind::Cofins),
            irpj: share(TaxKind::Irpj),
            adicional_irpj: share(TaxKind::AdicionalIrpj),
            csll: share(TaxKind::Csll),
            ipi: share(TaxKind::Ipi),
            iss: share(TaxKind::Iss),
            icms: share(TaxKind::Icms),
            rat: share(TaxKind::Rat),
            cpp: share(TaxKind::Cpp),
            inss_terceiros: share(TaxKind::InssTerceiros),
            fgts: share(TaxKind::Fgts),
            total: TaxAmount::of_revenue(breakdown.total(), revenue),
        }
    }

    pub fn get(
        &self,
        kind: TaxKind,
    ) -> &TaxAmount {
        match kind {
            TaxKind::PisPasep => &self.pis_pasep,
            TaxKind::Cofins => &self.cofins,
            TaxKind::Irpj => &self.irpj,
            TaxKind::AdicionalIrpj => &self.adicional_irpj,
            TaxKind::Csll => &self.csll,
            TaxKind::Ipi => &self.ipi,
            TaxKind::Iss => &self.iss,
            TaxKind::Icms => &self.icms,
            TaxKind::Rat => &self.rat,
            TaxKind::Cpp => &self.cpp,
            TaxKind::InssTerceiros => &self.inss_terceiros,
            TaxKind::Fgts => &self.fgts,
        }
    }

    pub fn amount(
        &self,
        kind: TaxKind,
    ) -> Decimal {
        self.get(kind).amount
    }

    /// The twelve taxes in reporting order.
    pub fn taxes(&self) -> impl Iterator<Item = (TaxKind, &TaxAmount)> + '_ {
        TaxKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }

    /// Sum of the amounts of every tax matching `filter`.
    pub fn sum_where(
        &self,
        filter: impl Fn(TaxKind) -> bool,
    ) -> Decimal {
        self.taxes()
            .filter(|(kind, _)| filter(*kind))
            .map(|(_, tax)| tax.amount)
            .sum()
    }
}
