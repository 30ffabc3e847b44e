use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use salepack_core::{AggregateId, Entity};
use salepack_products::{Package, Product, TemplateId, Uom};

/// Sale line identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(pub AggregateId);

impl LineId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for LineId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Kind of sale line. Only `Line` rows are ordered; the rest annotate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineType {
    #[default]
    Line,
    Subtotal,
    Title,
    Comment,
}

/// One row of a sale.
///
/// Fields are public the way an edit form sees them; consistency between
/// them is maintained by [`crate::PackageQuantityResolver`], not by setters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleLine {
    id: LineId,
    pub line_type: LineType,
    pub description: Option<String>,
    pub product: Option<Product>,
    pub unit: Option<Uom>,
    /// Unit quantity, expressed in `unit`.
    pub quantity: Option<Decimal>,
    pub unit_price: Option<Decimal>,
    pub amount: Decimal,
    /// Date of the owning sale, copied in when the line is attached.
    pub sale_date: Option<NaiveDate>,
    pub shipping_date: Option<NaiveDate>,
    pub product_package: Option<Package>,
    /// Number of packages; negative on returned lines.
    pub package_quantity: Option<i64>,
    pub product_has_packages: bool,
    pub product_template: Option<TemplateId>,
}

impl SaleLine {
    /// An empty orderable line.
    pub fn new(id: LineId) -> Self {
        Self {
            id,
            line_type: LineType::Line,
            description: None,
            product: None,
            unit: None,
            quantity: None,
            unit_price: None,
            amount: Decimal::ZERO,
            sale_date: None,
            shipping_date: None,
            product_package: None,
            package_quantity: None,
            product_has_packages: false,
            product_template: None,
        }
    }

    pub fn comment(id: LineId, description: impl Into<String>) -> Self {
        Self {
            line_type: LineType::Comment,
            description: Some(description.into()),
            ..Self::new(id)
        }
    }

    pub fn is_orderable(&self) -> bool {
        self.line_type == LineType::Line
    }

    /// Copy of this line under a new identity (used when a sale is duplicated).
    pub fn duplicate(&self, id: LineId) -> Self {
        Self {
            id,
            ..self.clone()
        }
    }
}

impl Entity for SaleLine {
    type Id = LineId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
