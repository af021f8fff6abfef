//! Tests for the authentication flows
