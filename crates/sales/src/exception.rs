//! Shipment and invoice exception handling.
//!
//! When a processing sale ships or invoices less than ordered, the lines are
//! reconciled to what actually happened. The reconciled quantities are rarely
//! whole packages, so the package check is skipped for this call only.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use salepack_core::{DomainError, Entity};

use crate::error::SaleResult;
use crate::host::LineRecompute;
use crate::line::LineId;
use crate::resolver::{PackageQuantityResolver, ValidationContext};
use crate::sale::{Sale, SaleState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExceptionKind {
    Shipment,
    Invoice,
}

/// Unit quantity actually shipped or invoiced for one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reconciliation {
    pub line: LineId,
    pub quantity: Decimal,
}

/// Reconcile a processing sale's lines after a shipment or invoice exception.
///
/// Either every reconciliation is applied or the sale is left unchanged.
pub fn handle_exception<H: LineRecompute>(
    sale: &mut Sale,
    resolver: &PackageQuantityResolver<H>,
    kind: ExceptionKind,
    reconciliations: &[Reconciliation],
) -> SaleResult<()> {
    if sale.state() != SaleState::Processing {
        return Err(DomainError::invariant(format!(
            "{kind:?} exceptions can only be handled on processing sales"
        ))
        .into());
    }

    let mut lines = sale.lines().to_vec();
    for rec in reconciliations {
        let line = lines
            .iter_mut()
            .find(|l| *l.id() == rec.line)
            .ok_or_else(|| DomainError::not_found(format!("sale line {}", rec.line)))?;
        if !line.is_orderable() {
            return Err(DomainError::validation(format!(
                "sale line {} has no quantity to reconcile",
                rec.line
            ))
            .into());
        }

        line.quantity = Some(match &line.unit {
            Some(unit) => unit.round(rec.quantity),
            None => rec.quantity,
        });
        resolver.on_quantity_changed(line);
        resolver.refresh_derived(line);
    }

    let ctx = ValidationContext::without_package_check();
    lines
        .iter()
        .try_for_each(|line| resolver.validate(line, ctx))?;

    *sale.lines_mut() = lines;
    sale.bump_version();

    info!(
        sale = %sale.id_typed(),
        kind = ?kind,
        lines = reconciliations.len(),
        "exception reconciled"
    );
    Ok(())
}
