//! Domain layer: the organizational unit value type and its hierarchy algebra
//!
//! Pure computation only (no I/O, no config loading).

pub mod error;
pub mod hierarchy;
pub mod org_unit;

pub use error::{OrgUnitError, OrgUnitResult};
pub use hierarchy::Hierarchy;
pub use org_unit::OrganizationalUnit;
