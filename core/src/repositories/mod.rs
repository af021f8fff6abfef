//! Storage abstractions used by the client services.

pub mod session;

pub use session::{InMemorySessionContext, SessionContext};
