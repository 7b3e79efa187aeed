//! Organizational unit value type: parsing, normalization and rendering

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, instrument};

use crate::config::OrgUnitConfig;
use crate::domain::error::{OrgUnitError, OrgUnitResult};

/// A delimited path of containment nodes, e.g. `world.country.region.city`.
///
/// Nodes are ordered from least specific to most specific: `nodes()[0]` is the
/// outermost container and the last node is the leaf. The base (root) unit has no
/// nodes at all. Every node is non-blank and lowercase.
///
/// The unit keeps the config it was built with for rendering. Equality and hashing
/// only look at the nodes.
#[derive(Debug, Clone)]
pub struct OrganizationalUnit {
    nodes: Vec<String>,
    config: Arc<OrgUnitConfig>,
}

impl OrganizationalUnit {
    /// The base (root) unit.
    pub fn base(config: Option<&OrgUnitConfig>) -> Self {
        Self {
            nodes: Vec::new(),
            config: resolve_config(config),
        }
    }

    /// Parse a delimited string into a validated unit.
    ///
    /// `None`, empty and whitespace-only input, as well as the configured base alias
    /// (any case), yield the base unit. Any other input is split on the delimiter in
    /// written order; every part must be non-blank and is case-folded.
    ///
    /// Falls back to [`OrgUnitConfig::global`] when no config is given.
    ///
    /// # Errors
    /// [`OrgUnitError::InvalidFormat`] when a node is empty or whitespace-only,
    /// e.g. `a..b`, `.test.`, `a. .b` or `.`.
    pub fn parse<'a, 'c>(
        input: impl Into<Option<&'a str>>,
        config: impl Into<Option<&'c OrgUnitConfig>>,
    ) -> OrgUnitResult<Self> {
        let config = resolve_config(config.into());
        let nodes = parse_nodes(input.into(), &config)?;
        Ok(Self { nodes, config })
    }

    /// Build a unit from explicit nodes, bypassing base alias handling.
    ///
    /// Nodes are case-folded. A single trailing empty node (the legacy base sentinel
    /// layout, e.g. `["one", "two", ""]`) is dropped.
    ///
    /// # Errors
    /// [`OrgUnitError::InvalidFormat`] when any other node is empty or whitespace-only.
    pub fn from_nodes<I, S>(nodes: I, config: Option<&OrgUnitConfig>) -> OrgUnitResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let config = resolve_config(config);
        let mut nodes: Vec<String> = nodes
            .into_iter()
            .map(|node| node.as_ref().to_lowercase())
            .collect();

        if nodes.last().is_some_and(|node| node.is_empty()) {
            nodes.pop();
        }

        if let Some(position) = nodes.iter().position(|node| node.trim().is_empty()) {
            return Err(OrgUnitError::invalid_format(
                join_nodes(&nodes, config.delimiter()),
                format!("node {position} is empty or whitespace"),
            ));
        }

        Ok(Self { nodes, config })
    }

    /// Nodes from least specific to most specific.
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    /// Config used for rendering this unit.
    pub fn config(&self) -> &OrgUnitConfig {
        &self.config
    }

    /// Number of nodes; zero for the base unit.
    pub fn depth(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_base(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The most specific node.
    pub fn leaf(&self) -> Option<&str> {
        self.nodes.last().map(String::as_str)
    }

    /// The unit one level up, `None` for the base unit.
    pub fn parent(&self) -> Option<Self> {
        let (_, ancestors) = self.nodes.split_last()?;
        Some(Self {
            nodes: ancestors.to_vec(),
            config: Arc::clone(&self.config),
        })
    }

    /// Render with another config's delimiter. The base unit renders as "".
    pub fn to_string_with(&self, config: &OrgUnitConfig) -> String {
        join_nodes(&self.nodes, config.delimiter())
    }

    /// Like `to_string`, but the base unit renders as the base alias so the
    /// result is never empty.
    pub fn to_url_string(&self) -> String {
        if self.nodes.is_empty() {
            self.config.base_alias().to_string()
        } else {
            self.to_string()
        }
    }

    /// Every ancestor prefix, root first.
    ///
    /// For `world.country.city` this is `["", "world", "world.country", "world.country.city"]`;
    /// entry 0 is always the empty root prefix.
    pub fn fully_qualified_nodes(&self) -> Vec<String> {
        let delimiter = self.config.delimiter();
        std::iter::once(String::new())
            .chain((1..=self.nodes.len()).map(|depth| join_nodes(&self.nodes[..depth], delimiter)))
            .collect()
    }
}

fn resolve_config(config: Option<&OrgUnitConfig>) -> Arc<OrgUnitConfig> {
    match config {
        Some(config) => Arc::new(config.clone()),
        None => OrgUnitConfig::global(),
    }
}

fn join_nodes(nodes: &[String], delimiter: char) -> String {
    let mut buf = [0u8; 4];
    nodes.join(&*delimiter.encode_utf8(&mut buf))
}

#[instrument(level = "trace", skip(config))]
fn parse_nodes(input: Option<&str>, config: &OrgUnitConfig) -> OrgUnitResult<Vec<String>> {
    let input = match input {
        Some(input) if !input.trim().is_empty() => input,
        _ => return Ok(Vec::new()),
    };

    // whole-string match only; a lone alias segment inside a path is a regular node
    if config.is_base_alias(input) {
        debug!(input, "input matches base alias");
        return Ok(Vec::new());
    }

    let mut parts: Vec<&str> = input.split(config.delimiter()).collect();
    if config.accepts_rooted_paths() && parts.len() > 1 && config.is_base_alias(parts[0]) {
        parts.remove(0);
    }

    if let Some(position) = parts.iter().position(|part| part.trim().is_empty()) {
        debug!(input, position, "rejecting empty node");
        return Err(OrgUnitError::invalid_format(
            input,
            format!("node {position} is empty or whitespace"),
        ));
    }

    Ok(parts.into_iter().map(str::to_lowercase).collect())
}

impl Default for OrganizationalUnit {
    fn default() -> Self {
        Self::base(None)
    }
}

impl PartialEq for OrganizationalUnit {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes
    }
}

impl Eq for OrganizationalUnit {}

impl Hash for OrganizationalUnit {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.nodes.hash(state);
    }
}

impl fmt::Display for OrganizationalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with(&self.config))
    }
}

impl FromStr for OrganizationalUnit {
    type Err = OrgUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, None)
    }
}

impl TryFrom<&str> for OrganizationalUnit {
    type Error = OrgUnitError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value, None)
    }
}

impl TryFrom<String> for OrganizationalUnit {
    type Error = OrgUnitError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value.as_str(), None)
    }
}

impl From<OrganizationalUnit> for String {
    fn from(unit: OrganizationalUnit) -> Self {
        unit.to_string()
    }
}

// Both directions use the process default, so units built with another delimiter
// still deserialize to the same nodes.
impl Serialize for OrganizationalUnit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string_with(&OrgUnitConfig::global()))
    }
}

impl<'de> Deserialize<'de> for OrganizationalUnit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(raw.as_str(), None).map_err(serde::de::Error::custom)
    }
}
