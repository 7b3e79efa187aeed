//! Hierarchical organizational unit identifiers.
//!
//! An organizational unit is a delimited path of containment nodes such as
//! `world.country.region.city`, ordered from the outermost container to the leaf.
//! The empty path is the base (root) unit, which can also be written as its alias
//! (`core` by default).
//!
//! ```
//! use orgunit::{Hierarchy, OrganizationalUnit};
//!
//! let city: OrganizationalUnit = "World.Country.Region.City".parse()?;
//! let country: OrganizationalUnit = "world.country".parse()?;
//!
//! assert!(city.is_descendant_of(&country));
//! assert!(!city.is_child_of(&country));
//! assert_eq!(city.to_string(), "world.country.region.city");
//! assert_eq!(OrganizationalUnit::parse("CORE", None)?.to_url_string(), "core");
//! # Ok::<(), orgunit::OrgUnitError>(())
//! ```

pub mod config;
pub mod domain;
pub mod util;

pub use config::{OrgUnitConfig, Settings, DEFAULT_BASE_ALIAS, DEFAULT_DELIMITER};
pub use domain::{Hierarchy, OrgUnitError, OrgUnitResult, OrganizationalUnit};
pub use util::StringExt;
