use crate::config::OrgUnitConfig;
use crate::domain::{OrgUnitResult, OrganizationalUnit};

pub trait StringExt {
    /// Parse as an organizational unit; falls back to the process default config.
    fn to_organizational_unit(&self, config: Option<&OrgUnitConfig>)
        -> OrgUnitResult<OrganizationalUnit>;
}

impl StringExt for str {
    fn to_organizational_unit(
        &self,
        config: Option<&OrgUnitConfig>,
    ) -> OrgUnitResult<OrganizationalUnit> {
        OrganizationalUnit::parse(self, config)
    }
}
