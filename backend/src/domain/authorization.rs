//! Role- and ownership-based authorization for contact operations.
//!
//! Each handler is a pure predicate over (principal, contact, operation)
//! and either grants or abstains; the evaluator ORs the decisions. There is
//! no veto: once any handler grants, the operation proceeds. Absence of a
//! grant is a neutral abstention, not an error, so handlers never fail and
//! never perform I/O.

use std::sync::Arc;

use tracing::debug;

use crate::domain::contact::Contact;
use crate::domain::error::Error;
use crate::domain::user::{Role, User, UserId, normalise_roles};

/// Operations a principal may request on a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
    Approve,
    Reject,
}

impl Operation {
    /// Lowercase name used in log output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Approve => "approve",
            Self::Reject => "reject",
        }
    }
}

/// Outcome of a single authorization handler.
///
/// There is deliberately no deny variant: a handler either grants or leaves
/// the decision to the rest of the set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Grant,
    Abstain,
}

impl Decision {
    /// Whether this decision is a grant.
    pub fn is_grant(self) -> bool {
        matches!(self, Self::Grant)
    }
}

/// Authenticated identity plus role claims, resolved once per request.
///
/// Roles are re-read from storage on every request rather than cached in
/// the session, so revoking a role takes effect immediately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    user_id: UserId,
    roles: Vec<Role>,
}

impl Principal {
    /// Build a principal from a user id and role claims.
    pub fn new(user_id: UserId, mut roles: Vec<Role>) -> Self {
        normalise_roles(&mut roles);
        Self { user_id, roles }
    }

    /// Build a principal mirroring a user's identity and roles.
    pub fn from_user(user: &User) -> Self {
        Self::new(user.id().clone(), user.roles().to_vec())
    }

    /// Identity of the authenticated user.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Role claims held by the principal.
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// Whether the principal holds the given role.
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Whether the principal may see every contact regardless of status.
    pub fn is_privileged(&self) -> bool {
        self.has_role(Role::Administrator) || self.has_role(Role::Manager)
    }
}

/// A single authorization rule: a stateless, infallible predicate.
pub trait AuthorizationHandler: Send + Sync {
    /// Evaluate the rule for `principal` requesting `operation` on `contact`.
    fn evaluate(&self, principal: &Principal, contact: &Contact, operation: Operation) -> Decision;
}

/// Grants owners create, read, update, and delete on their own contacts.
///
/// Owners cannot approve or reject their own records; moderation stays
/// with the role handlers.
#[derive(Debug, Default, Clone, Copy)]
pub struct OwnershipHandler;

impl AuthorizationHandler for OwnershipHandler {
    fn evaluate(&self, principal: &Principal, contact: &Contact, operation: Operation) -> Decision {
        if contact.owner_id() != principal.user_id() {
            return Decision::Abstain;
        }
        match operation {
            Operation::Create | Operation::Read | Operation::Update | Operation::Delete => {
                Decision::Grant
            }
            Operation::Approve | Operation::Reject => Decision::Abstain,
        }
    }
}

/// Grants any operation to principals holding the administrator role.
#[derive(Debug, Default, Clone, Copy)]
pub struct AdministratorHandler;

impl AuthorizationHandler for AdministratorHandler {
    fn evaluate(&self, principal: &Principal, _contact: &Contact, _operation: Operation) -> Decision {
        if principal.has_role(Role::Administrator) {
            Decision::Grant
        } else {
            Decision::Abstain
        }
    }
}

/// Grants only approve and reject to principals holding the manager role.
#[derive(Debug, Default, Clone, Copy)]
pub struct ManagerHandler;

impl AuthorizationHandler for ManagerHandler {
    fn evaluate(&self, principal: &Principal, _contact: &Contact, operation: Operation) -> Decision {
        if !principal.has_role(Role::Manager) {
            return Decision::Abstain;
        }
        match operation {
            Operation::Approve | Operation::Reject => Decision::Grant,
            Operation::Create | Operation::Read | Operation::Update | Operation::Delete => {
                Decision::Abstain
            }
        }
    }
}

/// Handler set OR-combined into one decision.
///
/// Constructed once at startup and shared across requests; handlers hold no
/// per-request state.
#[derive(Clone)]
pub struct PolicyEvaluator {
    handlers: Arc<Vec<Box<dyn AuthorizationHandler>>>,
}

impl PolicyEvaluator {
    /// Evaluator over an explicit handler set.
    pub fn new(handlers: Vec<Box<dyn AuthorizationHandler>>) -> Self {
        Self {
            handlers: Arc::new(handlers),
        }
    }

    /// Evaluator with the standard contact rule set: ownership,
    /// administrator, manager.
    pub fn contact_policy() -> Self {
        Self::new(vec![
            Box::new(OwnershipHandler),
            Box::new(AdministratorHandler),
            Box::new(ManagerHandler),
        ])
    }

    /// Grant if any handler grants; abstain otherwise.
    pub fn evaluate(
        &self,
        principal: &Principal,
        contact: &Contact,
        operation: Operation,
    ) -> Decision {
        if self
            .handlers
            .iter()
            .any(|handler| handler.evaluate(principal, contact, operation).is_grant())
        {
            Decision::Grant
        } else {
            Decision::Abstain
        }
    }

    /// Evaluate and convert an overall abstention into a forbidden error.
    pub fn authorize(
        &self,
        principal: &Principal,
        contact: &Contact,
        operation: Operation,
    ) -> Result<(), Error> {
        match self.evaluate(principal, contact, operation) {
            Decision::Grant => Ok(()),
            Decision::Abstain => {
                debug!(
                    user_id = %principal.user_id(),
                    contact_id = %contact.id(),
                    operation = operation.as_str(),
                    "no authorization handler granted the operation",
                );
                Err(Error::forbidden("permission denied"))
            }
        }
    }
}

impl std::fmt::Debug for PolicyEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolicyEvaluator")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
