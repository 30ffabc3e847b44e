//! Package quantity resolver.
//!
//! Keeps `quantity` (units) and `package_quantity` (packages) of a sale line
//! consistent while either is edited, and enforces that a line with a package
//! is ordered in whole packages.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::{debug, warn};

use salepack_core::{DomainError, Entity};
use salepack_products::{PackageId, Product};

use crate::config::{DefaultPackagePolicy, ResolverConfig};
use crate::error::{SaleError, SaleResult};
use crate::host::{LineRecompute, StandardLineRecompute};
use crate::line::{LineType, SaleLine};

/// Line field whose change triggers a recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineField {
    Product,
    ProductPackage,
    PackageQuantity,
    Quantity,
}

/// A user edit of one line field.
#[derive(Debug, Clone, PartialEq)]
pub enum LineEdit {
    Product(Option<Product>),
    /// Package picked among the line product's packages.
    ProductPackage(Option<PackageId>),
    PackageQuantity(Option<i64>),
    Quantity(Option<Decimal>),
}

impl LineEdit {
    pub fn field(&self) -> LineField {
        match self {
            LineEdit::Product(_) => LineField::Product,
            LineEdit::ProductPackage(_) => LineField::ProductPackage,
            LineEdit::PackageQuantity(_) => LineField::PackageQuantity,
            LineEdit::Quantity(_) => LineField::Quantity,
        }
    }
}

/// How strictly a line is validated.
///
/// Exception reconciliation builds a context without the package check for
/// the duration of its own call; everything else validates strictly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValidationContext {
    suppress_package_check: bool,
}

impl ValidationContext {
    pub const fn strict() -> Self {
        Self {
            suppress_package_check: false,
        }
    }

    pub const fn without_package_check() -> Self {
        Self {
            suppress_package_check: true,
        }
    }

    pub fn suppresses_package_check(self) -> bool {
        self.suppress_package_check
    }
}

#[derive(Debug, Clone)]
pub struct PackageQuantityResolver<H = StandardLineRecompute> {
    host: H,
    config: ResolverConfig,
}

impl PackageQuantityResolver {
    /// Resolver backed by list-price recomputation.
    pub fn standard(config: ResolverConfig) -> Self {
        Self::new(StandardLineRecompute::default(), config)
    }
}

impl Default for PackageQuantityResolver {
    fn default() -> Self {
        Self::standard(ResolverConfig::default())
    }
}

impl<H: LineRecompute> PackageQuantityResolver<H> {
    pub fn new(host: H, config: ResolverConfig) -> Self {
        Self { host, config }
    }

    /// Apply a user edit to `line` and run the recomputations it triggers.
    ///
    /// Fails when the chosen package is not one of the product's, or when the
    /// package quantity cannot be expressed in units.
    pub fn edit(&self, line: &mut SaleLine, edit: LineEdit) -> SaleResult<()> {
        let field = edit.field();
        match edit {
            LineEdit::Product(product) => line.product = product,
            LineEdit::ProductPackage(None) => line.product_package = None,
            LineEdit::ProductPackage(Some(package_id)) => {
                let package = line
                    .product
                    .as_ref()
                    .and_then(|p| p.template().package(package_id))
                    .cloned()
                    .ok_or_else(|| {
                        DomainError::validation(format!(
                            "package {package_id} is not available for the line's product"
                        ))
                    })?;
                line.product_package = Some(package);
            }
            LineEdit::PackageQuantity(count) => {
                if let (Some(package), Some(count)) = (&line.product_package, count) {
                    if Decimal::from(count).checked_mul(package.quantity()).is_none() {
                        return Err(DomainError::validation(format!(
                            "{count} packages of \"{}\" exceed the unit quantity range",
                            package.name()
                        ))
                        .into());
                    }
                }
                line.package_quantity = count;
            }
            LineEdit::Quantity(quantity) => line.quantity = quantity,
        }
        self.apply_change(line, field);
        Ok(())
    }

    /// Run the update chain for a field that just changed.
    pub fn apply_change(&self, line: &mut SaleLine, field: LineField) {
        match field {
            LineField::Product => {
                self.host.on_change_product(line);
                self.on_product_changed(line);
                self.refresh_derived(line);
            }
            LineField::ProductPackage => {
                self.on_package_changed(line);
                self.refresh_derived(line);
            }
            LineField::PackageQuantity => self.on_package_quantity_changed(line),
            LineField::Quantity => {
                self.on_quantity_changed(line);
                self.refresh_derived(line);
            }
        }
    }

    /// Recompute `product_has_packages`/`product_template` and, depending on
    /// the configured policy, the line's package.
    pub fn on_product_changed(&self, line: &mut SaleLine) {
        let template = line.product.as_ref().map(|p| p.template());
        let has_packages = template.is_some_and(|t| t.has_packages());
        let template_id = template.map(|t| *t.id());
        let default_package = template.and_then(|t| t.default_package()).cloned();
        let current_is_valid = match (&line.product_package, template) {
            (Some(package), Some(template)) => template.package(*package.id()).is_some(),
            _ => false,
        };

        line.product_has_packages = has_packages;
        line.product_template = template_id;

        match self.config.default_package_policy {
            DefaultPackagePolicy::Disabled => {}
            DefaultPackagePolicy::KeepIfValid if current_is_valid => {}
            DefaultPackagePolicy::KeepIfValid | DefaultPackagePolicy::ResetToDefault => {
                line.product_package = default_package;
            }
        }

        debug!(
            line = %line.id(),
            has_packages,
            package = line.product_package.as_ref().map(|p| p.name()),
            "product changed"
        );
    }

    /// Clearing the package clears both quantities. Picking a package leaves
    /// them alone.
    pub fn on_package_changed(&self, line: &mut SaleLine) {
        if line.product_package.is_none() {
            line.quantity = None;
            line.package_quantity = None;
        }
    }

    /// Derive `quantity` from `package_quantity`, then let the host re-derive
    /// price, amount and shipping date from the new quantity.
    pub fn on_package_quantity_changed(&self, line: &mut SaleLine) {
        let (Some(package), Some(count)) = (&line.product_package, line.package_quantity) else {
            return;
        };
        if count == 0 {
            return;
        }

        let Some(quantity) = Decimal::from(count).checked_mul(package.quantity()) else {
            warn!(line = %line.id(), count, "package quantity overflows unit quantity");
            line.package_quantity = None;
            return;
        };
        let quantity = match &line.unit {
            Some(unit) => unit.round(quantity),
            None => quantity,
        };

        line.quantity = Some(quantity);
        self.host.on_change_quantity(line);
        self.refresh_derived(line);

        debug!(line = %line.id(), count, %quantity, "quantity derived from packages");
    }

    /// Let the host react to the new quantity, then derive the number of
    /// whole packages (truncated toward zero).
    pub fn on_quantity_changed(&self, line: &mut SaleLine) {
        self.host.on_change_quantity(line);

        let (Some(package), Some(quantity)) = (&line.product_package, line.quantity) else {
            return;
        };
        if quantity.is_zero() {
            return;
        }

        match quantity
            .checked_div(package.quantity())
            .and_then(|ratio| ratio.trunc().to_i64())
        {
            Some(count) => {
                line.package_quantity = Some(count);
                debug!(line = %line.id(), %quantity, count, "packages derived from quantity");
            }
            None => warn!(line = %line.id(), %quantity, "quantity out of package range"),
        }
    }

    /// Fail when a line with a package is not ordered in whole packages.
    pub fn validate(&self, line: &SaleLine, ctx: ValidationContext) -> SaleResult<()> {
        if ctx.suppresses_package_check() {
            return Ok(());
        }
        let Some(package) = &line.product_package else {
            return Ok(());
        };

        let quantity = line.quantity.unwrap_or(Decimal::ZERO);
        let ratio = quantity
            .checked_div(package.quantity())
            .ok_or_else(|| DomainError::validation(format!("quantity {quantity} out of range")))?;

        if ratio != ratio.trunc() {
            warn!(line = %line.id(), %quantity, package = package.name(), "not a package multiple");
            return Err(SaleError::PackageMultiple {
                quantity,
                product: line
                    .product
                    .as_ref()
                    .map(|p| p.rec_name().to_string())
                    .unwrap_or_default(),
                package: package.rec_name(),
                package_quantity: package.quantity(),
            });
        }
        Ok(())
    }

    /// Refuse confirmation while a line's product is sold in packages but the
    /// line has no package or no package quantity.
    pub fn gate_document_confirmation(&self, lines: &[SaleLine]) -> SaleResult<()> {
        if !self.config.require_package_on_confirm {
            return Ok(());
        }

        let packaged = lines.iter().filter(|line| {
            line.line_type != LineType::Comment
                && line
                    .product
                    .as_ref()
                    .is_some_and(|p| p.template().has_packages())
        });

        for line in packaged {
            if line.product_package.is_none() {
                warn!(line = %line.id(), "package required before confirmation");
                return Err(SaleError::PackageRequired { line: *line.id() });
            }
            if line.package_quantity.is_none() {
                warn!(line = %line.id(), "package quantity required before confirmation");
                return Err(SaleError::PackageQuantityRequired { line: *line.id() });
            }
        }
        Ok(())
    }

    /// Flip the sign of `package_quantity` on a line being returned.
    ///
    /// The unit quantity is negated separately by the return process.
    pub fn reverse_line(&self, line: &mut SaleLine) -> SaleResult<()> {
        if !line.is_orderable() {
            return Ok(());
        }
        if let Some(count) = line.package_quantity.filter(|c| *c != 0) {
            let flipped = count.checked_neg().ok_or_else(|| {
                DomainError::validation(format!("package quantity {count} cannot be reversed"))
            })?;
            line.package_quantity = Some(flipped);
        }
        Ok(())
    }

    /// Re-derive amount and shipping date after a quantity or price change.
    pub fn refresh_derived(&self, line: &mut SaleLine) {
        line.amount = self.host.amount(line);
        line.shipping_date = self.host.shipping_date(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use salepack_core::AggregateId;
    use salepack_products::{Package, ProductId, ProductTemplate, TemplateId, Uom};

    use crate::line::LineId;

    struct Fixture {
        product: Product,
        box6: PackageId,
        box2: PackageId,
    }

    fn fixture() -> Fixture {
        let template_id = TemplateId::new(AggregateId::new());
        let mut template = ProductTemplate::new(template_id, "product", dec!(10), Uom::unit())
            .unwrap()
            .with_lead_time(2);
        let box6 = Package::new(PackageId::new(AggregateId::new()), template_id, "Box", dec!(6))
            .unwrap()
            .with_default(true);
        let box2 = Package::new(PackageId::new(AggregateId::new()), template_id, "Box 2", dec!(2))
            .unwrap();
        let (box6_id, box2_id) = (*box6.id(), *box2.id());
        template.add_package(box6).unwrap();
        template.add_package(box2).unwrap();

        Fixture {
            product: Product::new(ProductId::new(AggregateId::new()), template),
            box6: box6_id,
            box2: box2_id,
        }
    }

    fn plain_product() -> Product {
        let template = ProductTemplate::new(
            TemplateId::new(AggregateId::new()),
            "loose",
            dec!(3),
            Uom::unit(),
        )
        .unwrap();
        Product::new(ProductId::new(AggregateId::new()), template)
    }

    fn resolver() -> PackageQuantityResolver {
        PackageQuantityResolver::default()
    }

    fn line_for(resolver: &PackageQuantityResolver, product: &Product) -> SaleLine {
        let mut line = SaleLine::new(LineId::new(AggregateId::new()));
        line.sale_date = NaiveDate::from_ymd_opt(2024, 3, 1);
        resolver
            .edit(&mut line, LineEdit::Product(Some(product.clone())))
            .unwrap();
        line
    }

    #[test]
    fn product_change_picks_default_package() {
        let fx = fixture();
        let r = resolver();
        let line = line_for(&r, &fx.product);

        assert!(line.product_has_packages);
        assert_eq!(line.product_template, Some(*fx.product.template().id()));
        assert_eq!(line.product_package.as_ref().map(|p| *p.id()), Some(fx.box6));
        assert_eq!(line.unit_price, Some(dec!(10)));
    }

    #[test]
    fn product_without_packages_has_no_package() {
        let r = resolver();
        let line = line_for(&r, &plain_product());
        assert!(!line.product_has_packages);
        assert!(line.product_package.is_none());
    }

    #[test]
    fn clearing_product_clears_derived_fields() {
        let fx = fixture();
        let r = resolver();
        let mut line = line_for(&r, &fx.product);
        r.edit(&mut line, LineEdit::Product(None)).unwrap();

        assert!(!line.product_has_packages);
        assert_eq!(line.product_template, None);
        assert!(line.product_package.is_none());
    }

    #[test]
    fn keep_if_valid_keeps_chosen_package() {
        let fx = fixture();
        let r = PackageQuantityResolver::new(
            StandardLineRecompute::default(),
            ResolverConfig::default().with_default_package_policy(DefaultPackagePolicy::KeepIfValid),
        );
        let mut line = line_for(&r, &fx.product);
        r.edit(&mut line, LineEdit::ProductPackage(Some(fx.box2))).unwrap();
        r.edit(&mut line, LineEdit::Product(Some(fx.product.clone()))).unwrap();
        assert_eq!(line.product_package.as_ref().map(|p| *p.id()), Some(fx.box2));

        r.edit(&mut line, LineEdit::Product(Some(plain_product()))).unwrap();
        assert!(line.product_package.is_none());
    }

    #[test]
    fn disabled_policy_leaves_package_alone() {
        let fx = fixture();
        let r = PackageQuantityResolver::new(
            StandardLineRecompute::default(),
            ResolverConfig::default().with_default_package_policy(DefaultPackagePolicy::Disabled),
        );
        let line = line_for(&r, &fx.product);
        assert!(line.product_has_packages);
        assert!(line.product_package.is_none());
    }

    #[test]
    fn package_quantity_derives_quantity_and_amount() {
        let fx = fixture();
        let r = resolver();
        let mut line = line_for(&r, &fx.product);
        r.edit(&mut line, LineEdit::PackageQuantity(Some(2))).unwrap();

        assert_eq!(line.quantity, Some(dec!(12)));
        assert_eq!(line.amount, dec!(120.00));
        assert_eq!(line.shipping_date, NaiveDate::from_ymd_opt(2024, 3, 3));
    }

    #[test]
    fn zero_package_quantity_changes_nothing() {
        let fx = fixture();
        let r = resolver();
        let mut line = line_for(&r, &fx.product);
        r.edit(&mut line, LineEdit::Quantity(Some(dec!(6)))).unwrap();
        r.edit(&mut line, LineEdit::PackageQuantity(Some(0))).unwrap();
        assert_eq!(line.quantity, Some(dec!(6)));
    }

    #[test]
    fn derived_quantity_is_rounded_to_unit() {
        let template_id = TemplateId::new(AggregateId::new());
        let mut template = ProductTemplate::new(
            template_id,
            "flour",
            dec!(1),
            Uom::new("Kilogram", "kg", 2),
        )
        .unwrap();
        template
            .add_package(
                Package::new(PackageId::new(AggregateId::new()), template_id, "Sack", dec!(0.333))
                    .unwrap()
                    .with_default(true),
            )
            .unwrap();
        let product = Product::new(ProductId::new(AggregateId::new()), template);

        let r = resolver();
        let mut line = line_for(&r, &product);
        r.edit(&mut line, LineEdit::PackageQuantity(Some(3))).unwrap();
        assert_eq!(line.quantity, Some(dec!(1.00)));
    }

    #[test]
    fn quantity_derives_package_quantity() {
        let fx = fixture();
        let r = resolver();
        let mut line = line_for(&r, &fx.product);

        r.edit(&mut line, LineEdit::Quantity(Some(dec!(12)))).unwrap();
        assert_eq!(line.package_quantity, Some(2));
        assert_eq!(line.amount, dec!(120.00));

        r.edit(&mut line, LineEdit::Quantity(Some(dec!(13)))).unwrap();
        assert_eq!(line.package_quantity, Some(2));

        r.edit(&mut line, LineEdit::Quantity(Some(dec!(-13)))).unwrap();
        assert_eq!(line.package_quantity, Some(-2));
    }

    #[test]
    fn clearing_package_clears_quantities() {
        let fx = fixture();
        let r = resolver();
        let mut line = line_for(&r, &fx.product);
        r.edit(&mut line, LineEdit::PackageQuantity(Some(2))).unwrap();
        r.edit(&mut line, LineEdit::ProductPackage(None)).unwrap();

        assert_eq!(line.quantity, None);
        assert_eq!(line.package_quantity, None);
        assert_eq!(line.amount, Decimal::ZERO);
    }

    #[test]
    fn choosing_a_package_keeps_quantities() {
        let fx = fixture();
        let r = resolver();
        let mut line = line_for(&r, &fx.product);
        r.edit(&mut line, LineEdit::PackageQuantity(Some(2))).unwrap();
        r.edit(&mut line, LineEdit::ProductPackage(Some(fx.box2))).unwrap();

        assert_eq!(line.quantity, Some(dec!(12)));
        assert_eq!(line.package_quantity, Some(2));
    }

    #[test]
    fn rejects_package_of_other_product() {
        let fx = fixture();
        let other = fixture();
        let r = resolver();
        let mut line = line_for(&r, &fx.product);
        let err = r
            .edit(&mut line, LineEdit::ProductPackage(Some(other.box6)))
            .unwrap_err();
        assert!(matches!(err, SaleError::Domain(DomainError::Validation(_))));
        assert_eq!(line.product_package.as_ref().map(|p| *p.id()), Some(fx.box6));
    }

    #[test]
    fn validate_rejects_non_multiples() {
        let fx = fixture();
        let r = resolver();
        let mut line = line_for(&r, &fx.product);
        r.edit(&mut line, LineEdit::Quantity(Some(dec!(13)))).unwrap();

        match r.validate(&line, ValidationContext::strict()).unwrap_err() {
            SaleError::PackageMultiple {
                quantity,
                product,
                package,
                package_quantity,
            } => {
                assert_eq!(quantity, dec!(13));
                assert_eq!(product, "product");
                assert_eq!(package, "Box (6)");
                assert_eq!(package_quantity, dec!(6));
            }
            other => panic!("expected PackageMultiple, got {other:?}"),
        }

        assert!(r.validate(&line, ValidationContext::without_package_check()).is_ok());

        r.edit(&mut line, LineEdit::Quantity(Some(dec!(12)))).unwrap();
        assert!(r.validate(&line, ValidationContext::strict()).is_ok());
    }

    #[test]
    fn validate_treats_missing_quantity_as_zero() {
        let fx = fixture();
        let r = resolver();
        let line = line_for(&r, &fx.product);
        assert_eq!(line.quantity, None);
        assert!(r.validate(&line, ValidationContext::strict()).is_ok());
    }

    #[test]
    fn validate_ignores_lines_without_package() {
        let r = resolver();
        let mut line = line_for(&r, &plain_product());
        r.edit(&mut line, LineEdit::Quantity(Some(dec!(7)))).unwrap();
        assert!(r.validate(&line, ValidationContext::strict()).is_ok());
        assert_eq!(line.package_quantity, None);
    }

    #[test]
    fn gate_requires_package_on_package_products() {
        let fx = fixture();
        let r = resolver();
        let mut line = line_for(&r, &fx.product);
        r.edit(&mut line, LineEdit::ProductPackage(None)).unwrap();
        let comment = SaleLine::comment(LineId::new(AggregateId::new()), "note");
        let loose = line_for(&r, &plain_product());

        let err = r
            .gate_document_confirmation(&[comment.clone(), loose.clone(), line.clone()])
            .unwrap_err();
        assert_eq!(err, SaleError::PackageRequired { line: *line.id() });

        r.edit(&mut line, LineEdit::ProductPackage(Some(fx.box2))).unwrap();
        let err = r
            .gate_document_confirmation(&[comment.clone(), loose.clone(), line.clone()])
            .unwrap_err();
        assert_eq!(err, SaleError::PackageQuantityRequired { line: *line.id() });

        r.edit(&mut line, LineEdit::PackageQuantity(Some(1))).unwrap();
        assert!(r.gate_document_confirmation(&[comment, loose, line]).is_ok());
    }

    #[test]
    fn gate_requires_package_quantity_with_default_package() {
        let fx = fixture();
        let r = resolver();
        let line = line_for(&r, &fx.product);
        assert!(line.product_package.is_some());
        assert_eq!(line.package_quantity, None);

        // No quantity counts as zero units, which is a valid multiple.
        assert!(r.validate(&line, ValidationContext::strict()).is_ok());
        assert_eq!(
            r.gate_document_confirmation(std::slice::from_ref(&line)),
            Err(SaleError::PackageQuantityRequired { line: *line.id() })
        );
    }

    #[test]
    fn gate_can_be_switched_off() {
        let fx = fixture();
        let r = PackageQuantityResolver::new(
            StandardLineRecompute::default(),
            ResolverConfig::default().with_require_package_on_confirm(false),
        );
        let mut line = line_for(&r, &fx.product);
        let defaulted = line.clone();
        r.edit(&mut line, LineEdit::ProductPackage(None)).unwrap();
        assert!(r.gate_document_confirmation(&[line, defaulted]).is_ok());
    }

    #[test]
    fn reverse_line_flips_package_quantity() {
        let fx = fixture();
        let r = resolver();
        let mut line = line_for(&r, &fx.product);
        r.edit(&mut line, LineEdit::PackageQuantity(Some(2))).unwrap();
        r.reverse_line(&mut line).unwrap();
        assert_eq!(line.package_quantity, Some(-2));

        let mut comment = SaleLine::comment(LineId::new(AggregateId::new()), "note");
        comment.package_quantity = Some(3);
        r.reverse_line(&mut comment).unwrap();
        assert_eq!(comment.package_quantity, Some(3));

        let mut empty = line_for(&r, &fx.product);
        r.reverse_line(&mut empty).unwrap();
        assert_eq!(empty.package_quantity, None);
    }

    #[test]
    fn reverse_line_rejects_unrepresentable_count() {
        let fx = fixture();
        let r = resolver();
        let mut line = line_for(&r, &fx.product);
        line.package_quantity = Some(i64::MIN);

        let err = r.reverse_line(&mut line).unwrap_err();
        assert!(matches!(err, SaleError::Domain(DomainError::Validation(_))));
        assert_eq!(line.package_quantity, Some(i64::MIN));
    }

    fn huge_package_product() -> Product {
        let template_id = TemplateId::new(AggregateId::new());
        let mut template =
            ProductTemplate::new(template_id, "pallet", dec!(1), Uom::unit()).unwrap();
        template
            .add_package(
                Package::new(
                    PackageId::new(AggregateId::new()),
                    template_id,
                    "Silo",
                    Decimal::MAX,
                )
                .unwrap()
                .with_default(true),
            )
            .unwrap();
        Product::new(ProductId::new(AggregateId::new()), template)
    }

    #[test]
    fn overflowing_package_quantity_is_rejected() {
        let r = resolver();
        let mut line = line_for(&r, &huge_package_product());
        r.edit(&mut line, LineEdit::PackageQuantity(Some(1))).unwrap();
        assert_eq!(line.quantity, Some(Decimal::MAX));

        let err = r
            .edit(&mut line, LineEdit::PackageQuantity(Some(2)))
            .unwrap_err();
        assert!(matches!(err, SaleError::Domain(DomainError::Validation(_))));
        assert_eq!(line.package_quantity, Some(1));
        assert_eq!(line.quantity, Some(Decimal::MAX));
    }

    #[test]
    fn overflow_during_derivation_drops_package_quantity() {
        let r = resolver();
        let mut line = line_for(&r, &huge_package_product());
        line.quantity = Some(dec!(5));
        line.package_quantity = Some(2);

        r.on_package_quantity_changed(&mut line);
        assert_eq!(line.package_quantity, None);
        assert_eq!(line.quantity, Some(dec!(5)));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn packaged_product(size: u32) -> Product {
            let template_id = TemplateId::new(AggregateId::new());
            let mut template =
                ProductTemplate::new(template_id, "product", dec!(1), Uom::unit()).unwrap();
            template
                .add_package(
                    Package::new(
                        PackageId::new(AggregateId::new()),
                        template_id,
                        "Pack",
                        Decimal::from(size),
                    )
                    .unwrap()
                    .with_default(true),
                )
                .unwrap();
            Product::new(ProductId::new(AggregateId::new()), template)
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: k packages give k * size units, and those units give k
            /// packages back.
            #[test]
            fn package_quantity_round_trips(size in 1u32..500, count in -10_000i64..10_000) {
                prop_assume!(count != 0);
                let r = resolver();
                let mut line = line_for(&r, &packaged_product(size));
                r.edit(&mut line, LineEdit::PackageQuantity(Some(count))).unwrap();
                prop_assert_eq!(line.quantity, Some(Decimal::from(count) * Decimal::from(size)));

                line.package_quantity = None;
                r.apply_change(&mut line, LineField::Quantity);
                prop_assert_eq!(line.package_quantity, Some(count));
                prop_assert!(r.validate(&line, ValidationContext::strict()).is_ok());
            }

            /// Property: validation passes exactly for multiples of the size.
            #[test]
            fn validation_accepts_only_multiples(size in 2u32..100, quantity in -5_000i64..5_000) {
                let r = resolver();
                let mut line = line_for(&r, &packaged_product(size));
                r.edit(&mut line, LineEdit::Quantity(Some(Decimal::from(quantity)))).unwrap();

                let is_multiple = quantity % i64::from(size) == 0;
                let result = r.validate(&line, ValidationContext::strict());
                prop_assert_eq!(result.is_ok(), is_multiple);
                if !is_multiple {
                    let is_package_multiple =
                        matches!(result, Err(SaleError::PackageMultiple { .. }));
                    prop_assert!(is_package_multiple);
                }
            }
        }
    }
}
