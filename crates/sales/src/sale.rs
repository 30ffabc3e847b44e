use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use salepack_core::{AggregateId, AggregateRoot, DomainError, Entity, TenantId};

use crate::error::SaleResult;
use crate::host::LineRecompute;
use crate::line::{LineId, SaleLine};
use crate::resolver::{LineEdit, PackageQuantityResolver, ValidationContext};

/// Sale identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SaleId(pub AggregateId);

impl SaleId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for SaleId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Sale state lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaleState {
    Draft,
    Quotation,
    Confirmed,
    Processing,
    Done,
    Cancelled,
}

/// Aggregate root: Sale.
#[derive(Debug, Clone, PartialEq)]
pub struct Sale {
    id: SaleId,
    tenant_id: TenantId,
    /// Sale this one was returned from.
    origin: Option<SaleId>,
    sale_date: NaiveDate,
    state: SaleState,
    lines: Vec<SaleLine>,
    version: u64,
}

impl Sale {
    /// A new draft sale without lines.
    pub fn new(id: SaleId, tenant_id: TenantId, sale_date: NaiveDate) -> Self {
        Self {
            id,
            tenant_id,
            origin: None,
            sale_date,
            state: SaleState::Draft,
            lines: Vec::new(),
            version: 0,
        }
    }

    pub(crate) fn with_origin(mut self, origin: SaleId) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn id_typed(&self) -> SaleId {
        self.id
    }

    pub fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }

    pub fn origin(&self) -> Option<SaleId> {
        self.origin
    }

    pub fn sale_date(&self) -> NaiveDate {
        self.sale_date
    }

    pub fn state(&self) -> SaleState {
        self.state
    }

    pub fn lines(&self) -> &[SaleLine] {
        &self.lines
    }

    pub fn line(&self, line_id: LineId) -> Option<&SaleLine> {
        self.lines.iter().find(|l| *l.id() == line_id)
    }

    pub fn is_modifiable(&self) -> bool {
        matches!(self.state, SaleState::Draft)
    }

    /// Attach a line to this sale. Only drafts accept new lines.
    pub fn add_line(&mut self, mut line: SaleLine) -> SaleResult<LineId> {
        self.ensure_modifiable()?;
        let line_id = *line.id();
        if self.line(line_id).is_some() {
            return Err(DomainError::invariant(format!("line {line_id} already on sale")).into());
        }

        line.sale_date = Some(self.sale_date);
        self.lines.push(line);
        self.version += 1;
        Ok(line_id)
    }

    /// Edit one field of a draft line and run the recomputations it triggers.
    pub fn edit_line<H: LineRecompute>(
        &mut self,
        resolver: &PackageQuantityResolver<H>,
        line_id: LineId,
        edit: LineEdit,
    ) -> SaleResult<()> {
        self.ensure_modifiable()?;
        let line = self.line_mut(line_id)?;
        resolver.edit(line, edit)?;
        self.version += 1;
        Ok(())
    }

    /// Validate every line the way a save does.
    pub fn save<H: LineRecompute>(&self, resolver: &PackageQuantityResolver<H>) -> SaleResult<()> {
        self.validate_lines(resolver, ValidationContext::strict())
    }

    pub fn quote<H: LineRecompute>(
        &mut self,
        resolver: &PackageQuantityResolver<H>,
    ) -> SaleResult<()> {
        if self.state != SaleState::Draft {
            return Err(DomainError::invariant("only draft sales can be quoted").into());
        }
        if self.lines.is_empty() {
            return Err(DomainError::validation("cannot quote sale without lines").into());
        }
        self.save(resolver)?;

        self.transition(SaleState::Quotation);
        Ok(())
    }

    /// Confirm a quotation. Confirmed sales start processing right away.
    pub fn confirm<H: LineRecompute>(
        &mut self,
        resolver: &PackageQuantityResolver<H>,
    ) -> SaleResult<()> {
        if self.state != SaleState::Quotation {
            return Err(DomainError::invariant("only quotations can be confirmed").into());
        }
        self.save(resolver)?;
        resolver.gate_document_confirmation(&self.lines)?;

        self.transition(SaleState::Confirmed);
        info!(sale = %self.id, lines = self.lines.len(), "sale confirmed");
        self.process()
    }

    pub fn process(&mut self) -> SaleResult<()> {
        if self.state != SaleState::Confirmed {
            return Err(DomainError::invariant("only confirmed sales can be processed").into());
        }
        self.transition(SaleState::Processing);
        Ok(())
    }

    pub fn done(&mut self) -> SaleResult<()> {
        if self.state != SaleState::Processing {
            return Err(DomainError::invariant("only processing sales can be done").into());
        }
        self.transition(SaleState::Done);
        Ok(())
    }

    pub fn cancel(&mut self) -> SaleResult<()> {
        if !matches!(self.state, SaleState::Draft | SaleState::Quotation) {
            return Err(
                DomainError::invariant("only draft or quoted sales can be cancelled").into(),
            );
        }
        self.transition(SaleState::Cancelled);
        Ok(())
    }

    /// Back to draft from a quotation or a cancelled sale.
    pub fn draft(&mut self) -> SaleResult<()> {
        if !matches!(self.state, SaleState::Quotation | SaleState::Cancelled) {
            return Err(DomainError::invariant(
                "only quoted or cancelled sales can be reset to draft",
            )
            .into());
        }
        self.transition(SaleState::Draft);
        Ok(())
    }

    pub(crate) fn validate_lines<H: LineRecompute>(
        &self,
        resolver: &PackageQuantityResolver<H>,
        ctx: ValidationContext,
    ) -> SaleResult<()> {
        self.lines
            .iter()
            .try_for_each(|line| resolver.validate(line, ctx))
    }

    pub(crate) fn line_mut(&mut self, line_id: LineId) -> SaleResult<&mut SaleLine> {
        self.lines
            .iter_mut()
            .find(|l| *l.id() == line_id)
            .ok_or_else(|| DomainError::not_found(format!("sale line {line_id}")).into())
    }

    pub(crate) fn lines_mut(&mut self) -> &mut Vec<SaleLine> {
        &mut self.lines
    }

    pub(crate) fn bump_version(&mut self) {
        self.version += 1;
    }

    fn ensure_modifiable(&self) -> Result<(), DomainError> {
        if !self.is_modifiable() {
            return Err(DomainError::invariant("cannot modify sale once it is quoted"));
        }
        Ok(())
    }

    fn transition(&mut self, to: SaleState) {
        debug!(sale = %self.id, from = ?self.state, to = ?to, "sale state change");
        self.state = to;
        self.version += 1;
    }
}

impl AggregateRoot for Sale {
    type Id = SaleId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}
