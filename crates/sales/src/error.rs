//! Errors raised by the sale package rules.

use rust_decimal::Decimal;
use thiserror::Error;

use salepack_core::DomainError;

use crate::line::LineId;

pub type SaleResult<T> = Result<T, SaleError>;

/// Failures surfaced to the user when editing, saving or confirming a sale.
///
/// None of these are retryable: the user has to change the document.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SaleError {
    /// The line quantity is not a whole number of the chosen package.
    #[error(
        "The quantity \"{quantity}\" of product \"{product}\" is not a multiple of \
         package \"{package}\" ({package_quantity})."
    )]
    PackageMultiple {
        quantity: Decimal,
        product: String,
        package: String,
        package_quantity: Decimal,
    },

    /// A product sold in packages has no package chosen.
    #[error("A package must be selected for every product sold in packages before confirming the sale.")]
    PackageRequired { line: LineId },

    /// A product sold in packages has no package quantity.
    #[error("A package quantity must be set for every product sold in packages before confirming the sale.")]
    PackageQuantityRequired { line: LineId },

    #[error(transparent)]
    Domain(#[from] DomainError),
}
