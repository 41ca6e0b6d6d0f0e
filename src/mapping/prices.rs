//! Price and tax computation

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{
    facts::PriceGroupAmounts,
    onix::{PriceEntry, TaxBreakdown},
};

/// One commercial price type emitted when its source amount exists
#[derive(Debug, Clone, Copy)]
pub struct PriceTypeDefinition {
    pub code: &'static str,
    pub includes_tax: bool,
    pub tax_rate_code: &'static str,
    pub price_group: &'static str,
}

pub const PRICE_TYPES: [PriceTypeDefinition; 4] = [
    // Supplier's net price excluding tax
    PriceTypeDefinition {
        code: "05",
        includes_tax: false,
        tax_rate_code: "Z",
        price_group: "trade",
    },
    // Supplier's net price including tax
    PriceTypeDefinition {
        code: "07",
        includes_tax: true,
        tax_rate_code: "S",
        price_group: "trade",
    },
    // RRP excluding tax
    PriceTypeDefinition {
        code: "01",
        includes_tax: false,
        tax_rate_code: "Z",
        price_group: "retail",
    },
    // RRP including tax
    PriceTypeDefinition {
        code: "02",
        includes_tax: true,
        tax_rate_code: "S",
        price_group: "retail",
    },
];

pub const CURRENCY: &str = "EUR";
pub const TERRITORY: &str = "WORLD";
const TAX_TYPE_VAT: &str = "01";

/// Build one price entry per defined price type that has a source amount
pub fn compute_prices(groups: &[PriceGroupAmounts], tax_rate: Option<Decimal>) -> Vec<PriceEntry> {
    let tax_rate = tax_rate.unwrap_or(Decimal::ZERO);

    PRICE_TYPES
        .iter()
        .filter_map(|definition| {
            let group = groups.iter().find(|g| g.group == definition.price_group)?;
            let amount = if definition.includes_tax {
                group.gross
            } else {
                group.net
            };
            Some(price_entry(definition, amount?, tax_rate))
        })
        .collect()
}

fn price_entry(definition: &PriceTypeDefinition, amount: Decimal, tax_rate: Decimal) -> PriceEntry {
    let (taxable, tax, percent) = if definition.includes_tax {
        let taxable = amount / (Decimal::ONE + tax_rate / Decimal::ONE_HUNDRED);
        (taxable, amount - taxable, tax_rate)
    } else {
        (amount, Decimal::ZERO, Decimal::ZERO)
    };

    PriceEntry {
        price_type_code: definition.code.to_string(),
        amount: round_half_up(amount),
        tax: TaxBreakdown {
            tax_type: TAX_TYPE_VAT.to_string(),
            tax_rate_code: definition.tax_rate_code.to_string(),
            tax_rate_percent: percent,
            taxable_amount: round_half_up(taxable),
            tax_amount: round_half_up(tax),
        },
        currency: CURRENCY.to_string(),
        territory: TERRITORY.to_string(),
    }
}

/// Two decimals, halves rounded away from zero
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
