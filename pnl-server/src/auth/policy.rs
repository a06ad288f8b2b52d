//! Authorization policy
//!
//! Single decision point for every guarded ledger and directory operation.
//! The pure [`decide`] function takes the already-fetched manager link of
//! the target identity, so it can be tested without storage; the async
//! [`check`] wrapper performs the identity-directory lookup, which only the
//! Manager branch needs.
//!
//! A [`Decision::Deny`] is an outcome, not an error: it maps to a 403
//! response. A storage failure during the lookup surfaces as `sqlx::Error`
//! and becomes a 500, never a Deny, and never reveals whether the target
//! identity exists.

use shared::error::AppError;
use shared::models::Role;
use sqlx::SqlitePool;

use crate::db;

/// The authenticated party making a request, with role-specific identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    Admin { id: i64 },
    Manager { id: i64 },
    Employee { id: i64 },
}

impl Actor {
    pub fn new(id: i64, role: Role) -> Self {
        match role {
            Role::Admin => Actor::Admin { id },
            Role::Manager => Actor::Manager { id },
            Role::Employee => Actor::Employee { id },
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            Actor::Admin { id } | Actor::Manager { id } | Actor::Employee { id } => *id,
        }
    }
}

/// Kind of guarded operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Create,
    Update,
    Delete,
}

/// Outcome of a policy evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

impl Decision {
    /// Turn a Deny into the client-facing 403 error
    pub fn require(self) -> Result<(), AppError> {
        match self {
            Decision::Allow => Ok(()),
            Decision::Deny => Err(AppError::permission_denied("Not authorized")),
        }
    }
}

/// Pure policy decision.
///
/// `target_manager` is the manager link of the target identity as fetched
/// from the directory: `None` when the identity does not exist or has no
/// manager. Only the Manager branch consults it.
///
/// Rules, in precedence order:
/// 1. Admin: every operation on any target.
/// 2. Manager: any operation, iff the target reports to this manager.
/// 3. Employee: Read of their own data only; writes always denied.
pub fn decide(
    actor: &Actor,
    operation: Operation,
    target_employee_id: i64,
    target_manager: Option<i64>,
) -> Decision {
    match actor {
        Actor::Admin { .. } => Decision::Allow,
        Actor::Manager { id } => {
            if target_manager == Some(*id) {
                Decision::Allow
            } else {
                Decision::Deny
            }
        }
        Actor::Employee { id } => {
            if operation == Operation::Read && target_employee_id == *id {
                Decision::Allow
            } else {
                Decision::Deny
            }
        }
    }
}

/// Evaluate the policy for an operation on data owned by
/// `target_employee_id`, fetching the manager link from the identity
/// directory when (and only when) the actor is a Manager.
pub async fn check(
    pool: &SqlitePool,
    actor: &Actor,
    operation: Operation,
    target_employee_id: i64,
) -> Result<Decision, sqlx::Error> {
    let target_manager = match actor {
        Actor::Manager { .. } => db::users::manager_of(pool, target_employee_id).await?,
        _ => None,
    };
    Ok(decide(actor, operation, target_employee_id, target_manager))
}
