use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use salepack_core::{AggregateId, DomainError, DomainResult, Entity};

use crate::product::TemplateId;

/// Package identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageId(pub AggregateId);

impl PackageId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for PackageId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// A named bundle size a product template can be sold in ("Box of 6").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    id: PackageId,
    template: TemplateId,
    name: String,
    quantity: Decimal,
    is_default: bool,
}

impl Package {
    /// Build a package of `quantity` units for `template`.
    ///
    /// The size must be strictly positive: every derivation divides by it.
    pub fn new(
        id: PackageId,
        template: TemplateId,
        name: impl Into<String>,
        quantity: Decimal,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("package name cannot be empty"));
        }
        if quantity <= Decimal::ZERO {
            return Err(DomainError::validation(format!(
                "package \"{name}\" quantity must be positive, got {quantity}"
            )));
        }

        Ok(Self {
            id,
            template,
            name,
            quantity,
            is_default: false,
        })
    }

    pub fn with_default(mut self, is_default: bool) -> Self {
        self.is_default = is_default;
        self
    }

    pub fn template(&self) -> TemplateId {
        self.template
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Units contained in one package.
    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    pub fn is_default(&self) -> bool {
        self.is_default
    }

    /// Display name, e.g. `Box (6)`.
    pub fn rec_name(&self) -> String {
        format!("{} ({})", self.name, self.quantity.normalize())
    }
}

impl Entity for Package {
    type Id = PackageId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
