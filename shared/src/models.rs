//! Closed domain enums shared by the API and database layers
//!
//! Role, entry type, and entry status are fixed sets persisted as their
//! wire strings ('ADMIN', 'Revenue', 'Pending', ...). Parsing from the
//! database or a request payload goes through `from_db`, which returns
//! `None` for anything outside the set.

use serde::{Deserialize, Serialize};

/// User role, the basis of every authorization decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Manager,
    Employee,
}

impl Role {
    /// Wire/database representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Manager => "MANAGER",
            Role::Employee => "EMPLOYEE",
        }
    }

    /// Parse the database representation
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "ADMIN" => Some(Role::Admin),
            "MANAGER" => Some(Role::Manager),
            "EMPLOYEE" => Some(Role::Employee),
            _ => None,
        }
    }
}

/// Kind of a profit/loss entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryType {
    Revenue,
    Payment,
    Expense,
}

impl EntryType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            EntryType::Revenue => "Revenue",
            EntryType::Payment => "Payment",
            EntryType::Expense => "Expense",
        }
    }

    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "Revenue" => Some(EntryType::Revenue),
            "Payment" => Some(EntryType::Payment),
            "Expense" => Some(EntryType::Expense),
            _ => None,
        }
    }
}

/// Settlement status of a profit/loss entry, mutable independently of the
/// financial fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryStatus {
    Received,
    Pending,
    Paid,
}

impl EntryStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            EntryStatus::Received => "Received",
            EntryStatus::Pending => "Pending",
            EntryStatus::Paid => "Paid",
        }
    }

    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "Received" => Some(EntryStatus::Received),
            "Pending" => Some(EntryStatus::Pending),
            "Paid" => Some(EntryStatus::Paid),
            _ => None,
        }
    }
}
