//! Simples Nacional bracket tables (LC 123/2006, annexes I–V).
//!
//! Each annex has six brackets covering annual revenue from zero to the
//! 4.8M ceiling. Bounds are inclusive and authored one cent apart, so the
//! tables never overlap.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::warn;

use crate::models::{Annex, Bracket, Distribution};

/// Number of brackets in every annex table.
pub const BRACKETS_PER_ANNEX: usize = 6;

/// Revenue ceiling of the regime.
pub const REVENUE_CEILING: Decimal = dec!(4800000);

type Table = [Bracket; BRACKETS_PER_ANNEX];

const fn bracket(
    lower_bound: Decimal,
    upper_bound: Decimal,
    nominal_rate: Decimal,
    deduction: Decimal,
    distribution: Distribution,
) -> Bracket {
    Bracket {
        lower_bound,
        upper_bound,
        nominal_rate,
        deduction,
        distribution,
    }
}

// Annex I and II share the same partilha apart from IPI.
const COMMERCE_LOW: Distribution = Distribution {
    irpj: dec!(0.055),
    csll: dec!(0.035),
    cofins: dec!(0.1274),
    pis_pasep: dec!(0.0276),
    cpp: dec!(0.415),
    icms: dec!(0.34),
    ..Distribution::NONE
};

const COMMERCE_MID: Distribution = Distribution {
    cpp: dec!(0.42),
    icms: dec!(0.335),
    ..COMMERCE_LOW
};

const COMMERCE_TOP: Distribution = Distribution {
    irpj: dec!(0.135),
    csll: dec!(0.10),
    cofins: dec!(0.2827),
    pis_pasep: dec!(0.0613),
    cpp: dec!(0.421),
    icms: dec!(0.00),
    ..Distribution::NONE
};

const fn with_ipi(
    distribution: Distribution,
    ipi: Decimal,
) -> Distribution {
    Distribution {
        ipi,
        ..distribution
    }
}

static ANEXO_I: Table = [
    bracket(dec!(0), dec!(180000), dec!(0.04), dec!(0), COMMERCE_LOW),
    bracket(dec!(180000.01), dec!(360000), dec!(0.073), dec!(5940), COMMERCE_LOW),
    bracket(dec!(360000.01), dec!(720000), dec!(0.095), dec!(13860), COMMERCE_MID),
    bracket(dec!(720000.01), dec!(1800000), dec!(0.107), dec!(22500), COMMERCE_MID),
    bracket(dec!(1800000.01), dec!(3600000), dec!(0.143), dec!(87300), COMMERCE_MID),
    bracket(dec!(3600000.01), dec!(4800000), dec!(0.19), dec!(378000), COMMERCE_TOP),
];

static ANEXO_II: Table = [
    bracket(dec!(0), dec!(180000), dec!(0.045), dec!(0), with_ipi(COMMERCE_LOW, dec!(0.075))),
    bracket(dec!(180000.01), dec!(360000), dec!(0.078), dec!(5940), with_ipi(COMMERCE_LOW, dec!(0.075))),
    bracket(dec!(360000.01), dec!(720000), dec!(0.10), dec!(13860), with_ipi(COMMERCE_MID, dec!(0.075))),
    bracket(dec!(720000.01), dec!(1800000), dec!(0.112), dec!(22500), with_ipi(COMMERCE_MID, dec!(0.075))),
    bracket(dec!(1800000.01), dec!(3600000), dec!(0.147), dec!(85500), with_ipi(COMMERCE_MID, dec!(0.075))),
    bracket(dec!(3600000.01), dec!(4800000), dec!(0.30), dec!(720000), with_ipi(COMMERCE_TOP, dec!(0.00))),
];

const fn services(
    irpj: Decimal,
    csll: Decimal,
    cofins: Decimal,
    pis_pasep: Decimal,
    cpp: Decimal,
    iss: Decimal,
) -> Distribution {
    Distribution {
        irpj,
        csll,
        cofins,
        pis_pasep,
        cpp,
        iss,
        ..Distribution::NONE
    }
}

static ANEXO_III: Table = [
    bracket(dec!(0), dec!(180000), dec!(0.06), dec!(0),
        services(dec!(0.04), dec!(0.035), dec!(0.1282), dec!(0.0278), dec!(0.434), dec!(0.335))),
    bracket(dec!(180000.01), dec!(360000), dec!(0.112), dec!(9360),
        services(dec!(0.04), dec!(0.035), dec!(0.1364), dec!(0.0296), dec!(0.434), dec!(0.325))),
    bracket(dec!(360000.01), dec!(720000), dec!(0.135), dec!(17640),
        services(dec!(0.04), dec!(0.035), dec!(0.1364), dec!(0.0296), dec!(0.434), dec!(0.325))),
    bracket(dec!(720000.01), dec!(1800000), dec!(0.16), dec!(35640),
        services(dec!(0.04), dec!(0.035), dec!(0.1282), dec!(0.0278), dec!(0.434), dec!(0.335))),
    bracket(dec!(1800000.01), dec!(3600000), dec!(0.21), dec!(125640),
        services(dec!(0.125), dec!(0.15), dec!(0.1282), dec!(0.0278), dec!(0.35), dec!(0.219))),
    bracket(dec!(3600000.01), dec!(4800000), dec!(0.33), dec!(648000),
        services(dec!(0.35), dec!(0.15), dec!(0.1603), dec!(0.0347), dec!(0.305), dec!(0.00))),
];

// CPP is collected outside the unified payment in Annex IV.
static ANEXO_IV: Table = [
    bracket(dec!(0), dec!(180000), dec!(0.045), dec!(0),
        services(dec!(0.188), dec!(0.152), dec!(0.1767), dec!(0.0383), dec!(0), dec!(0.445))),
    bracket(dec!(180000.01), dec!(360000), dec!(0.09), dec!(8100),
        services(dec!(0.208), dec!(0.152), dec!(0.2055), dec!(0.0445), dec!(0), dec!(0.4))),
    bracket(dec!(360000.01), dec!(720000), dec!(0.102), dec!(12420),
        services(dec!(0.208), dec!(0.152), dec!(0.1973), dec!(0.0427), dec!(0), dec!(0.4))),
    bracket(dec!(720000.01), dec!(1800000), dec!(0.14), dec!(39780),
        services(dec!(0.178), dec!(0.192), dec!(0.188), dec!(0.041), dec!(0), dec!(0.401))),
    bracket(dec!(1800000.01), dec!(3600000), dec!(0.22), dec!(183780),
        services(dec!(0.188), dec!(0.192), dec!(0.1808), dec!(0.0392), dec!(0), dec!(0.4))),
    bracket(dec!(3600000.01), dec!(4800000), dec!(0.33), dec!(828000),
        services(dec!(0.535), dec!(0.215), dec!(0.2055), dec!(0.0445), dec!(0), dec!(0.00))),
];

static ANEXO_V: Table = [
    bracket(dec!(0), dec!(180000), dec!(0.155), dec!(0),
        services(dec!(0.25), dec!(0.15), dec!(0.141), dec!(0.0305), dec!(0.2885), dec!(0.14))),
    bracket(dec!(180000.01), dec!(360000), dec!(0.18), dec!(4500),
        services(dec!(0.23), dec!(0.15), dec!(0.141), dec!(0.0305), dec!(0.2785), dec!(0.17))),
    bracket(dec!(360000.01), dec!(720000), dec!(0.195), dec!(9900),
        services(dec!(0.24), dec!(0.15), dec!(0.1482), dec!(0.0323), dec!(0.2385), dec!(0.191))),
    bracket(dec!(720000.01), dec!(1800000), dec!(0.205), dec!(17100),
        services(dec!(0.21), dec!(0.15), dec!(0.1574), dec!(0.0341), dec!(0.2385), dec!(0.21))),
    bracket(dec!(1800000.01), dec!(3600000), dec!(0.23), dec!(62100),
        services(dec!(0.23), dec!(0.125), dec!(0.1416), dec!(0.0305), dec!(0.2385), dec!(0.2344))),
    bracket(dec!(3600000.01), dec!(4800000), dec!(0.305), dec!(540000),
        services(dec!(0.35), dec!(0.155), dec!(0.1644), dec!(0.0356), dec!(0.295), dec!(0.00))),
];

fn table(annex: Annex) -> &'static Table {
    match annex {
        Annex::I => &ANEXO_I,
        Annex::II => &ANEXO_II,
        Annex::III => &ANEXO_III,
        Annex::IV => &ANEXO_IV,
        Annex::V => &ANEXO_V,
    }
}

/// The six brackets of `annex`, ordered by revenue.
pub fn bracket_table(annex: Annex) -> &'static [Bracket] {
    table(annex)
}

/// Selects the bracket of `annex` whose inclusive range contains
/// `annual_revenue`.
///
/// Revenue matching no range (above the ceiling, or inside the one-cent
/// seam between two authored bounds) falls back to the last bracket.
pub fn lookup_bracket(
    annex: Annex,
    annual_revenue: Decimal,
) -> &'static Bracket {
    let table = table(annex);
    match table.iter().find(|b| b.contains(annual_revenue)) {
        Some(bracket) => bracket,
        None => {
            warn!(
                annex = annex.as_str(),
                %annual_revenue,
                "revenue outside every bracket, using the last one"
            );
            &table[BRACKETS_PER_ANNEX - 1]
        }
    }
}
