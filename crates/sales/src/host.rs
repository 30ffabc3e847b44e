//! Line recomputations the package rules call out to.
//!
//! These belong to the sales document itself (pricing, amount, shipping
//! date). The package resolver never reimplements them; it mutates
//! `quantity`/`package_quantity` and then asks the host to re-derive.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;

use crate::line::SaleLine;

pub trait LineRecompute {
    /// React to a product change (unit, price).
    fn on_change_product(&self, line: &mut SaleLine);

    /// React to a quantity change (price breaks, taxes). Reads the
    /// already-updated `line.quantity`.
    fn on_change_quantity(&self, line: &mut SaleLine);

    /// Monetary amount of the line.
    fn amount(&self, line: &SaleLine) -> Decimal;

    /// Expected shipping date of the line.
    fn shipping_date(&self, line: &SaleLine) -> Option<NaiveDate>;
}

/// List-price based recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandardLineRecompute {
    /// Decimal places of the sale currency.
    pub currency_digits: u32,
}

impl Default for StandardLineRecompute {
    fn default() -> Self {
        Self { currency_digits: 2 }
    }
}

impl LineRecompute for StandardLineRecompute {
    fn on_change_product(&self, line: &mut SaleLine) {
        match &line.product {
            Some(product) => {
                let template = product.template();
                line.unit = Some(template.default_uom().clone());
                line.unit_price = Some(template.list_price());
                if line.description.is_none() {
                    line.description = Some(product.rec_name().to_string());
                }
            }
            None => {
                line.unit = None;
                line.unit_price = None;
            }
        }
    }

    fn on_change_quantity(&self, line: &mut SaleLine) {
        if !line.is_orderable() {
            return;
        }
        if let Some(product) = &line.product {
            line.unit_price = Some(product.template().list_price());
        }
    }

    fn amount(&self, line: &SaleLine) -> Decimal {
        if !line.is_orderable() {
            return Decimal::ZERO;
        }
        let quantity = line.quantity.unwrap_or(Decimal::ZERO);
        let unit_price = line.unit_price.unwrap_or(Decimal::ZERO);
        quantity
            .checked_mul(unit_price)
            .map(|amount| amount.round_dp(self.currency_digits))
            .unwrap_or(Decimal::ZERO)
    }

    fn shipping_date(&self, line: &SaleLine) -> Option<NaiveDate> {
        if !line.is_orderable() {
            return None;
        }
        let quantity = line.quantity?;
        if quantity <= Decimal::ZERO {
            return None;
        }
        let lead_time = line.product.as_ref()?.template().lead_time_days()?;
        line.sale_date?.checked_add_days(Days::new(u64::from(lead_time)))
    }
}
