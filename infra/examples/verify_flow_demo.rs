//! Walks through login and two-factor verification against a running backend.
//!
//! Usage: cargo run --example verify_flow_demo -- <username> <password>
//!
//! The backend URL comes from the layered configuration, e.g.
//! `DOCSHARE__API__BASE_URL=http://localhost:3000`.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing::info;

use ds_core::domain::value_objects::ResendStatus;
use ds_core::errors::VerificationError;
use ds_core::repositories::session::{InMemorySessionContext, SessionContext};
use ds_core::services::auth::{AuthFlowConfig, AuthFlowService};
use ds_core::services::verification::{VerificationFlowConfig, VerificationFlowController};
use ds_infra::{init_tracing, load_config, HttpAuthGateway};

#[tokio::main]
async fn main() -> Result<()> {
    let config = load_config().context("loading configuration")?;
    init_tracing(&config.logging).context("initializing tracing")?;
    let lang = config.language;

    let mut args = std::env::args().skip(1);
    let (Some(username), Some(password)) = (args.next(), args.next()) else {
        bail!("usage: verify_flow_demo <username> <password>");
    };

    let context = Arc::new(InMemorySessionContext::new());
    let gateway = Arc::new(
        HttpAuthGateway::new(config.api.clone())?.with_session_context(context.clone()),
    );

    let auth = AuthFlowService::new(
        gateway.clone(),
        context.clone(),
        AuthFlowConfig::with_language(lang),
    );
    if let Err(e) = auth.login(&username, &password).await {
        bail!(e.message(lang));
    }
    info!(username = %username, "Login accepted, check your email for the code");

    let mut controller = VerificationFlowController::new(
        gateway,
        context.clone(),
        VerificationFlowConfig::from(config.resend),
    );

    let stdin = io::stdin();
    loop {
        let state = controller.resend_state();
        let status = controller.status();
        println!(
            "[{}] {}",
            status.label(lang),
            ResendStatus::attempts_line(&state, controller.policy(), lang)
        );
        print!("Code (or 'r' to resend, 'q' to quit): ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        match line.trim() {
            "q" => break,
            "r" => match controller.resend_code().await {
                Ok(_) => println!("{}", lang.pick("Code resent.", "Código reenviado.")),
                Err(e) => println!("{}", e.message(lang)),
            },
            code => {
                controller.clear_code();
                if let Err(e) = controller.paste_code(0, code) {
                    println!("{}", e);
                    continue;
                }
                match controller.submit_code().await {
                    Ok(credentials) => {
                        println!("Welcome, {}", credentials.user.username);
                        break;
                    }
                    Err(VerificationError::MissingIdentity) => {
                        bail!(VerificationError::MissingIdentity.message(lang));
                    }
                    Err(e) => println!("{}", e.message(lang)),
                }
            }
        }
    }

    controller.dispose();
    info!(authenticated = context.credentials().is_some(), "Demo finished");
    Ok(())
}
