//! Sales orders with package quantities.
//!
//! A line can be ordered as a number of packages instead of raw units. The
//! [`PackageQuantityResolver`] keeps `quantity` and `package_quantity`
//! consistent while a line is edited, blocks saving lines whose quantity is not
//! a whole number of packages, and refuses to confirm a sale while a
//! package-carrying product has no package chosen.
//!
//! Everything here is deterministic domain logic (no IO, no storage).

pub mod config;
pub mod error;
pub mod exception;
pub mod host;
pub mod line;
pub mod resolver;
pub mod reversal;
pub mod sale;

pub use config::{ConfigError, DefaultPackagePolicy, ResolverConfig};
pub use error::{SaleError, SaleResult};
pub use exception::{ExceptionKind, Reconciliation, handle_exception};
pub use host::{LineRecompute, StandardLineRecompute};
pub use line::{LineId, LineType, SaleLine};
pub use resolver::{LineEdit, LineField, PackageQuantityResolver, ValidationContext};
pub use reversal::return_sale;
pub use sale::{Sale, SaleId, SaleState};
