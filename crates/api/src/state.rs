use std::sync::Arc;

use shared::auth::gate::{AdminGate, Gate, GateChain, IdentityGate, OwnershipGate, TokenGate};
use shared::auth::token::SessionTokens;
use shared::lifecycle::EventLifecycle;
use shared::repo::{EventRepo, UserRepo};
use shared::AppConfig;

/// Everything the handlers need, built once at startup. The repos are
/// injected so the binary decides the backing store; nothing here reaches
/// for a global connection.
pub struct AppState {
    pub cfg: AppConfig,
    pub users: Arc<dyn UserRepo>,
    pub events: Arc<dyn EventRepo>,
    pub tokens: Arc<SessionTokens>,
    pub lifecycle: EventLifecycle,
    pub owner_gates: GateChain,
    pub delete_gates: GateChain,
    pub admin_gates: GateChain,
}

impl AppState {
    pub fn new(cfg: AppConfig, users: Arc<dyn UserRepo>, events: Arc<dyn EventRepo>) -> Arc<Self> {
        let tokens = Arc::new(SessionTokens::new(&cfg.jwt_secret));
        let token_gate: Arc<dyn Gate> = Arc::new(TokenGate::new(tokens.clone()));
        let identity_gate: Arc<dyn Gate> = Arc::new(IdentityGate);

        let owner_gates = vec![token_gate.clone(), identity_gate.clone()];
        let delete_gates = vec![
            token_gate.clone(),
            identity_gate.clone(),
            Arc::new(OwnershipGate::new(users.clone(), events.clone())) as Arc<dyn Gate>,
        ];
        let admin_gates = vec![
            token_gate,
            identity_gate,
            Arc::new(AdminGate::new(users.clone())) as Arc<dyn Gate>,
        ];

        let lifecycle = EventLifecycle::new(users.clone(), events.clone());
        Arc::new(Self {
            cfg,
            users,
            events,
            tokens,
            lifecycle,
            owner_gates,
            delete_gates,
            admin_gates,
        })
    }
}
