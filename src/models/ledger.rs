//! Ledger and tenant context models.

use serde::{Deserialize, Serialize};

use super::{BonusEntry, SaleEntry, WorkEntry};

/// A snapshot of an estate's entries handed to the engine by the data layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    /// Daily plucking and advance entries.
    #[serde(default)]
    pub work_entries: Vec<WorkEntry>,
    /// Tea sales.
    #[serde(default)]
    pub sales: Vec<SaleEntry>,
    /// Periodic bonuses.
    #[serde(default)]
    pub bonuses: Vec<BonusEntry>,
}

/// The organisation a request is made on behalf of.
///
/// Passed explicitly with every request; the engine never falls back to an
/// implicit default organisation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantContext {
    /// Identifier of the organisation in the external store.
    pub organization_id: String,
    /// Display name of the organisation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,
}
