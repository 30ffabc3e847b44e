//! Returning a sale: a draft mirror of it with every ordered quantity negated.

use chrono::NaiveDate;
use tracing::info;

use salepack_core::{AggregateId, DomainError};

use crate::error::SaleResult;
use crate::host::LineRecompute;
use crate::line::LineId;
use crate::resolver::PackageQuantityResolver;
use crate::sale::{Sale, SaleId, SaleState};

/// Build the return of `sale` as a new draft sale with id `return_id`.
///
/// Orderable lines get their unit quantity negated and their package quantity
/// sign-flipped, so the two stay consistent; other lines are copied as-is.
pub fn return_sale<H: LineRecompute>(
    sale: &Sale,
    resolver: &PackageQuantityResolver<H>,
    return_id: SaleId,
    sale_date: NaiveDate,
) -> SaleResult<Sale> {
    if !matches!(
        sale.state(),
        SaleState::Confirmed | SaleState::Processing | SaleState::Done
    ) {
        return Err(DomainError::invariant("only confirmed sales can be returned").into());
    }

    let mut returned =
        Sale::new(return_id, sale.tenant_id(), sale_date).with_origin(sale.id_typed());

    for line in sale.lines() {
        let mut copy = line.duplicate(LineId::new(AggregateId::new()));
        if copy.is_orderable() {
            copy.quantity = copy.quantity.map(|q| -q);
        }
        resolver.reverse_line(&mut copy)?;
        copy.sale_date = Some(sale_date);
        resolver.refresh_derived(&mut copy);
        returned.add_line(copy)?;
    }

    info!(
        sale = %sale.id_typed(),
        returned = %return_id,
        lines = returned.lines().len(),
        "sale returned"
    );
    Ok(returned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use salepack_core::TenantId;
    use salepack_products::{
        Package, PackageId, Product, ProductId, ProductTemplate, TemplateId, Uom,
    };

    use crate::config::ResolverConfig;
    use crate::error::SaleError;
    use crate::line::SaleLine;
    use crate::resolver::LineEdit;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
    }

    fn boxed_product() -> Product {
        let template_id = TemplateId::new(AggregateId::new());
        let mut template =
            ProductTemplate::new(template_id, "product", dec!(10), Uom::unit()).unwrap();
        template
            .add_package(
                Package::new(PackageId::new(AggregateId::new()), template_id, "Box", dec!(6))
                    .unwrap()
                    .with_default(true),
            )
            .unwrap();
        Product::new(ProductId::new(AggregateId::new()), template)
    }

    fn confirmed_sale(resolver: &PackageQuantityResolver) -> Sale {
        let mut sale = Sale::new(SaleId::new(AggregateId::new()), TenantId::new(), date());
        let line_id = sale
            .add_line(SaleLine::new(LineId::new(AggregateId::new())))
            .unwrap();
        sale.edit_line(resolver, line_id, LineEdit::Product(Some(boxed_product())))
            .unwrap();
        sale.edit_line(resolver, line_id, LineEdit::PackageQuantity(Some(2)))
            .unwrap();
        sale.add_line(SaleLine::comment(LineId::new(AggregateId::new()), "Test comment"))
            .unwrap();
        sale.quote(resolver).unwrap();
        sale.confirm(resolver).unwrap();
        sale
    }

    #[test]
    fn returned_lines_are_negated() {
        let resolver = PackageQuantityResolver::standard(ResolverConfig::default());
        let sale = confirmed_sale(&resolver);
        let return_id = SaleId::new(AggregateId::new());

        let returned = return_sale(&sale, &resolver, return_id, date()).unwrap();
        assert_eq!(returned.state(), SaleState::Draft);
        assert_eq!(returned.origin(), Some(sale.id_typed()));
        assert_eq!(returned.id_typed(), return_id);

        let mut pairs: Vec<(Decimal, i64)> = returned
            .lines()
            .iter()
            .map(|l| {
                (
                    l.quantity.unwrap_or(Decimal::ZERO),
                    l.package_quantity.unwrap_or(0),
                )
            })
            .collect();
        pairs.sort();
        assert_eq!(pairs, vec![(dec!(-12), -2), (dec!(0), 0)]);

        let product_line = returned.lines().iter().find(|l| l.is_orderable()).unwrap();
        assert_eq!(product_line.amount, dec!(-120.00));
        assert!(returned.save(&resolver).is_ok());
    }

    #[test]
    fn original_sale_is_untouched() {
        let resolver = PackageQuantityResolver::standard(ResolverConfig::default());
        let sale = confirmed_sale(&resolver);
        let before = sale.clone();
        return_sale(&sale, &resolver, SaleId::new(AggregateId::new()), date()).unwrap();
        assert_eq!(sale, before);
    }

    #[test]
    fn draft_sales_cannot_be_returned() {
        let resolver = PackageQuantityResolver::standard(ResolverConfig::default());
        let sale = Sale::new(SaleId::new(AggregateId::new()), TenantId::new(), date());
        let err = return_sale(&sale, &resolver, SaleId::new(AggregateId::new()), date())
            .unwrap_err();
        assert!(matches!(err, SaleError::Domain(DomainError::InvariantViolation(_))));
    }
}
