//! Hierarchy algebra over organizational units
//!
//! All relations are strict: a unit is never its own ancestor, descendant, parent or child.

use tracing::trace;

use crate::domain::org_unit::OrganizationalUnit;

/// Ancestry predicates between two units.
pub trait Hierarchy {
    /// `self` sits strictly below `parent`: it is deeper and starts with all of `parent`'s nodes.
    fn is_descendant_of(&self, parent: &Self) -> bool;

    fn is_ancestor_of(&self, descendant: &Self) -> bool {
        descendant.is_descendant_of(self)
    }

    /// `self` sits exactly one level below `parent`.
    fn is_child_of(&self, parent: &Self) -> bool;

    fn is_parent_of(&self, child: &Self) -> bool {
        child.is_child_of(self)
    }
}

impl Hierarchy for OrganizationalUnit {
    fn is_descendant_of(&self, parent: &Self) -> bool {
        // nodes are folded at construction, so ordinal comparison is enough
        let result = self.depth() > parent.depth() && self.nodes().starts_with(parent.nodes());
        trace!(unit = %self, parent = %parent, result, "is_descendant_of");
        result
    }

    fn is_child_of(&self, parent: &Self) -> bool {
        self.depth() == parent.depth() + 1 && self.is_descendant_of(parent)
    }
}
