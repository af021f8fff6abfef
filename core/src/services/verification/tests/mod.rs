//! Tests for the verification flow

#[cfg(test)]
mod mocks;
