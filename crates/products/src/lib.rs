//! Product catalog: products, their templates, and the packages a template can
//! be sold in.
//!
//! Pure data plus the few rules that belong to the catalog itself (package
//! sizes are positive, a package belongs to exactly one template).

pub mod package;
pub mod product;
pub mod uom;

pub use package::{Package, PackageId};
pub use product::{Product, ProductId, ProductTemplate, TemplateId};
pub use uom::Uom;
