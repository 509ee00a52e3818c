//! Organization Data

use crate::domain::organizations::records::OrganizationKind;

/// New Organization Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrganization {
    /// Unique organization name.
    pub name: String,

    /// Whether the organization sells or buys.
    pub kind: OrganizationKind,
}
