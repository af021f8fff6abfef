//! Mock implementations for testing the verification flow

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use crate::domain::entities::credentials::{Credentials, UserRecord};
use crate::errors::GatewayError;
use crate::repositories::session::InMemorySessionContext;
use crate::services::verification::{
    ResendAck, VerificationFlowConfig, VerificationFlowController, VerificationGatewayTrait,
};

/// Code the mock backend accepts
pub const VALID_CODE: &str = "123456";

// Mock verification gateway for testing
pub struct MockVerificationGateway {
    pub submitted: Mutex<Vec<(String, String)>>,
    pub resend_calls: AtomicUsize,
    pub fail_resend: bool,
    /// When set, calls signal `entered` and wait for `release` before answering
    pub gate: Option<Gate>,
}

#[derive(Default)]
pub struct Gate {
    pub entered: Notify,
    pub release: Notify,
}

impl MockVerificationGateway {
    pub fn new() -> Self {
        Self {
            submitted: Mutex::new(Vec::new()),
            resend_calls: AtomicUsize::new(0),
            fail_resend: false,
            gate: None,
        }
    }

    pub fn failing_resend() -> Self {
        Self {
            fail_resend: true,
            ..Self::new()
        }
    }

    pub fn gated() -> Self {
        Self {
            gate: Some(Gate::default()),
            ..Self::new()
        }
    }

    pub fn resend_count(&self) -> usize {
        self.resend_calls.load(Ordering::SeqCst)
    }

    pub fn last_submitted_code(&self) -> Option<String> {
        self.submitted.lock().unwrap().last().map(|(_, code)| code.clone())
    }

    async fn pass_gate(&self) {
        if let Some(gate) = &self.gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }
    }
}

#[async_trait]
impl VerificationGatewayTrait for MockVerificationGateway {
    async fn verify_code(&self, username: &str, code: &str) -> Result<Credentials, GatewayError> {
        self.submitted
            .lock()
            .unwrap()
            .push((username.to_string(), code.to_string()));
        self.pass_gate().await;

        if code == VALID_CODE {
            Ok(Credentials::new(
                format!("token-for-{}", username),
                UserRecord::new(username),
            ))
        } else {
            Err(GatewayError::Rejected {
                status: 400,
                message: Some("Código incorrecto o expirado".to_string()),
            })
        }
    }

    async fn resend_code(&self, _username: &str) -> Result<ResendAck, GatewayError> {
        self.resend_calls.fetch_add(1, Ordering::SeqCst);
        self.pass_gate().await;

        if self.fail_resend {
            return Err(GatewayError::Unreachable("connection refused".to_string()));
        }
        Ok(ResendAck {
            message: Some("Código reenviado".to_string()),
        })
    }
}

pub type TestController = VerificationFlowController<MockVerificationGateway, InMemorySessionContext>;

/// Controller for `ana` with default limits
pub fn controller_with(
    gateway: MockVerificationGateway,
) -> (TestController, Arc<MockVerificationGateway>, Arc<InMemorySessionContext>) {
    let gateway = Arc::new(gateway);
    let context = Arc::new(InMemorySessionContext::with_pending_username("ana"));
    let controller = VerificationFlowController::new(
        gateway.clone(),
        context.clone(),
        VerificationFlowConfig::default(),
    );
    (controller, gateway, context)
}
