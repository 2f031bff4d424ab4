//! Request gates. Each endpoint declares an ordered list of gates; the
//! chain folds the request context through them and the first deny stops
//! the request before the handler runs.

use std::sync::Arc;

use async_trait::async_trait;

use crate::auth::token::SessionTokens;
use crate::domain::user::UserRole;
use crate::repo::{EventRepo, UserRepo};

/// What a gate may look at: the raw session cookie value, the identity the
/// request body claims to act as, and the event it targets. The verified
/// identity is bound by [`TokenGate`] and read by every later gate.
pub struct GateContext<'a> {
    token: Option<&'a str>,
    claimed_email: Option<&'a str>,
    event_id: Option<i64>,
    identity: Option<String>,
}

impl<'a> GateContext<'a> {
    pub fn new(token: Option<&'a str>, claimed_email: Option<&'a str>, event_id: Option<i64>) -> Self {
        Self {
            token,
            claimed_email,
            event_id,
            identity: None,
        }
    }

    /// The email recovered from the session token, once [`TokenGate`] ran.
    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deny {
    pub reason: &'static str,
}

#[async_trait]
pub trait Gate: Send + Sync {
    async fn authorize(&self, ctx: &mut GateContext<'_>) -> Result<(), Deny>;
}

pub type GateChain = Vec<Arc<dyn Gate>>;

/// Runs the gates in order, short-circuiting on the first deny.
pub async fn authorize_chain(gates: &[Arc<dyn Gate>], ctx: &mut GateContext<'_>) -> Result<(), Deny> {
    for gate in gates {
        if let Err(deny) = gate.authorize(ctx).await {
            tracing::warn!(reason = deny.reason, "request denied");
            return Err(deny);
        }
    }
    Ok(())
}

/// Verifies the session token and binds the email it carries as the
/// trusted identity for the rest of the chain.
pub struct TokenGate {
    tokens: Arc<SessionTokens>,
}

impl TokenGate {
    pub fn new(tokens: Arc<SessionTokens>) -> Self {
        Self { tokens }
    }
}

#[async_trait]
impl Gate for TokenGate {
    async fn authorize(&self, ctx: &mut GateContext<'_>) -> Result<(), Deny> {
        let raw = ctx.token.ok_or(Deny {
            reason: "no session token",
        })?;
        match self.tokens.verify(raw) {
            Some(email) => {
                ctx.identity = Some(email);
                Ok(())
            }
            None => Err(Deny {
                reason: "invalid or expired session token",
            }),
        }
    }
}

/// Rejects requests whose body claims a different identity than the one
/// the session token was issued for. A valid token for user A must not be
/// usable to act as user B.
pub struct IdentityGate;

#[async_trait]
impl Gate for IdentityGate {
    async fn authorize(&self, ctx: &mut GateContext<'_>) -> Result<(), Deny> {
        let identity = ctx.identity.as_deref().ok_or(Deny {
            reason: "no verified identity",
        })?;
        let claimed = ctx.claimed_email.ok_or(Deny {
            reason: "request carries no email",
        })?;
        if claimed == identity {
            Ok(())
        } else {
            Err(Deny {
                reason: "email does not match session identity",
            })
        }
    }
}

/// Allows the event's author, then falls back to the admin role. Any
/// lookup failure denies; a missing event is not a distinct outcome.
pub struct OwnershipGate {
    users: Arc<dyn UserRepo>,
    events: Arc<dyn EventRepo>,
}

impl OwnershipGate {
    pub fn new(users: Arc<dyn UserRepo>, events: Arc<dyn EventRepo>) -> Self {
        Self { users, events }
    }
}

#[async_trait]
impl Gate for OwnershipGate {
    async fn authorize(&self, ctx: &mut GateContext<'_>) -> Result<(), Deny> {
        let identity = ctx.identity.as_deref().ok_or(Deny {
            reason: "no verified identity",
        })?;
        let event_id = ctx.event_id.ok_or(Deny {
            reason: "request names no event",
        })?;
        let event = match self.events.find_by_id(event_id).await {
            Ok(Some(event)) => event,
            Ok(None) => {
                return Err(Deny {
                    reason: "event does not exist",
                })
            }
            Err(_) => {
                return Err(Deny {
                    reason: "event lookup failed",
                })
            }
        };
        if event.author == identity {
            return Ok(());
        }
        match self.users.find_by_email(identity).await {
            Ok(Some(user)) if user.role == UserRole::Admin => Ok(()),
            _ => Err(Deny {
                reason: "not the event author or an admin",
            }),
        }
    }
}

/// Allows only identities whose stored role is admin.
pub struct AdminGate {
    users: Arc<dyn UserRepo>,
}

impl AdminGate {
    pub fn new(users: Arc<dyn UserRepo>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl Gate for AdminGate {
    async fn authorize(&self, ctx: &mut GateContext<'_>) -> Result<(), Deny> {
        let identity = ctx.identity.as_deref().ok_or(Deny {
            reason: "no verified identity",
        })?;
        match self.users.find_by_email(identity).await {
            Ok(Some(user)) if user.role == UserRole::Admin => Ok(()),
            _ => Err(Deny {
                reason: "admin role required",
            }),
        }
    }
}
