//! Integration tests for the verification flow with configured resend limits

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;

    use ds_core::domain::entities::credentials::Credentials;
    use ds_core::domain::entities::resend_state::{ResendPhase, ResendState};
    use ds_core::domain::value_objects::ResendStatus;
    use ds_core::errors::{GatewayError, VerificationError};
    use ds_core::repositories::session::InMemorySessionContext;
    use ds_core::services::verification::{
        ResendAck, VerificationFlowConfig, VerificationFlowController, VerificationGatewayTrait,
    };
    use ds_shared::{Language, ResendLimitsConfig};

    // Backend that accepts every resend and rejects every code
    #[derive(Default)]
    struct CountingGateway {
        resends: AtomicUsize,
    }

    #[async_trait]
    impl VerificationGatewayTrait for CountingGateway {
        async fn verify_code(&self, _username: &str, _code: &str) -> Result<Credentials, GatewayError> {
            Err(GatewayError::Rejected {
                status: 400,
                message: None,
            })
        }

        async fn resend_code(&self, _username: &str) -> Result<ResendAck, GatewayError> {
            self.resends.fetch_add(1, Ordering::SeqCst);
            Ok(ResendAck::default())
        }
    }

    fn limits() -> ResendLimitsConfig {
        ResendLimitsConfig {
            max_attempts: 2,
            cooldown_seconds: 5,
            window_seconds: 20,
        }
    }

    fn controller() -> (
        VerificationFlowController<CountingGateway, InMemorySessionContext>,
        Arc<CountingGateway>,
    ) {
        let gateway = Arc::new(CountingGateway::default());
        let controller = VerificationFlowController::new(
            gateway.clone(),
            Arc::new(InMemorySessionContext::with_pending_username("ana")),
            VerificationFlowConfig::from(limits()),
        );
        (controller, gateway)
    }

    #[tokio::test(start_paused = true)]
    async fn test_configured_limits_drive_the_flow() {
        let (controller, gateway) = controller();

        let first = controller.resend_code().await.unwrap();
        assert_eq!(
            first,
            ResendState {
                cooldown_seconds_remaining: 5,
                attempts_used: 1,
                window_seconds_remaining: 0,
            }
        );
        assert_eq!(controller.status().label(Language::English), "Resend in 5s");

        tokio::time::sleep(Duration::from_millis(5_500)).await;
        assert!(controller.status().is_enabled());

        let second = controller.resend_code().await.unwrap();
        assert_eq!(second.attempts_used, 2);
        assert_eq!(second.window_seconds_remaining, 20);

        tokio::time::sleep(Duration::from_millis(6_500)).await;
        assert_eq!(controller.phase(), ResendPhase::WindowLocked);
        assert_eq!(
            ResendStatus::attempts_line(&controller.resend_state(), controller.policy(), Language::English),
            "Attempts: 2/2 - wait 0m 14s to try again"
        );

        let err = controller.resend_code().await.unwrap_err();
        assert!(matches!(err, VerificationError::ResendNotAllowed { .. }));
        assert_eq!(
            err.message(Language::English),
            "Resend limit reached. Wait before trying again."
        );
        assert_eq!(gateway.resends.load(Ordering::SeqCst), 2);

        tokio::time::sleep(Duration::from_secs(20)).await;
        assert_eq!(controller.phase(), ResendPhase::Exhausted);
        assert!(!controller.is_ticking());
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscriber_observes_each_tick() {
        let (controller, _) = controller();
        let mut updates = controller.subscribe();

        controller.resend_code().await.unwrap();
        updates.borrow_and_update();

        let mut seen = Vec::new();
        while updates.changed().await.is_ok() {
            let cooldown = updates.borrow_and_update().cooldown_seconds_remaining;
            seen.push(cooldown);
            if cooldown == 0 {
                break;
            }
        }

        assert_eq!(seen, vec![4, 3, 2, 1, 0]);
    }

    #[tokio::test]
    async fn test_rejected_code_keeps_limiter_state() {
        let (mut controller, _) = controller();
        controller.paste_code(0, "111111").unwrap();

        let err = controller.submit_code().await.unwrap_err();

        assert_eq!(
            err,
            VerificationError::InvalidOrExpiredCode {
                server_message: None
            }
        );
        assert_eq!(err.message(Language::Spanish), "Código incorrecto o expirado");
        assert_eq!(controller.resend_state(), ResendState::new());
    }
}
