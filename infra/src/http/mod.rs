//! HTTP implementation of the backend gateways
//!
//! One reqwest client serves every auth endpoint:
//! - `POST /api/auth/verify-code` and `POST /api/auth/verifyCode/resend`
//! - `POST /api/auth/login` and `POST /api/auth/register`
//! - `POST /api/auth/request-reset` and `POST /api/auth/reset-password`

mod gateway;

pub use gateway::{paths, HttpAuthGateway};
