use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use salepack_core::{AggregateId, DomainError, DomainResult, Entity};

use crate::package::{Package, PackageId};
use crate::uom::Uom;

/// Product (variant) identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub AggregateId);

impl ProductId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Product template identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(pub AggregateId);

impl TemplateId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for TemplateId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Product template: the shared definition its variants are sold from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductTemplate {
    id: TemplateId,
    name: String,
    list_price: Decimal,
    default_uom: Uom,
    /// Days between ordering and shipping, when known.
    lead_time_days: Option<u32>,
    packages: Vec<Package>,
}

impl ProductTemplate {
    pub fn new(
        id: TemplateId,
        name: impl Into<String>,
        list_price: Decimal,
        default_uom: Uom,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if list_price < Decimal::ZERO {
            return Err(DomainError::validation("list price cannot be negative"));
        }

        Ok(Self {
            id,
            name,
            list_price,
            default_uom,
            lead_time_days: None,
            packages: Vec::new(),
        })
    }

    pub fn with_lead_time(mut self, days: u32) -> Self {
        self.lead_time_days = Some(days);
        self
    }

    /// Attach a package definition. The package must have been built for
    /// this template.
    pub fn add_package(&mut self, package: Package) -> DomainResult<()> {
        if package.template() != self.id {
            return Err(DomainError::invariant(format!(
                "package \"{}\" belongs to another template",
                package.name()
            )));
        }
        if self.packages.iter().any(|p| p.id() == package.id()) {
            return Err(DomainError::invariant(format!(
                "package \"{}\" already attached",
                package.name()
            )));
        }
        self.packages.push(package);
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn list_price(&self) -> Decimal {
        self.list_price
    }

    pub fn default_uom(&self) -> &Uom {
        &self.default_uom
    }

    pub fn lead_time_days(&self) -> Option<u32> {
        self.lead_time_days
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    pub fn has_packages(&self) -> bool {
        !self.packages.is_empty()
    }

    /// First package flagged as default, if any.
    pub fn default_package(&self) -> Option<&Package> {
        self.packages.iter().find(|p| p.is_default())
    }

    pub fn package(&self, id: PackageId) -> Option<&Package> {
        self.packages.iter().find(|p| *p.id() == id)
    }
}

impl Entity for ProductTemplate {
    type Id = TemplateId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// A sellable product variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    template: ProductTemplate,
}

impl Product {
    pub fn new(id: ProductId, template: ProductTemplate) -> Self {
        Self { id, template }
    }

    pub fn template(&self) -> &ProductTemplate {
        &self.template
    }

    pub fn rec_name(&self) -> &str {
        self.template.name()
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
