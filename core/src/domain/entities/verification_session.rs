//! Verification code entry for a pending two-factor login.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::CodeEntryError;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Code entry state for one verification attempt
///
/// Holds the username awaiting verification and one slot per code digit.
/// The slot count is fixed, so the submitted code is always the
/// concatenation of the filled slots in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationSession {
    /// Correlation id for log events of this session
    id: Uuid,

    /// When the verification step started
    started_at: DateTime<Utc>,

    /// Username awaiting verification, `None` when no login is pending
    username: Option<String>,

    /// One slot per code digit, `None` while empty
    code_digits: [Option<char>; CODE_LENGTH],
}

impl VerificationSession {
    /// Creates a session for `username`; blank names count as missing
    pub fn new(username: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            username: username.filter(|u| !u.trim().is_empty()),
            code_digits: [None; CODE_LENGTH],
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn digits(&self) -> &[Option<char>; CODE_LENGTH] {
        &self.code_digits
    }

    /// Set the slot at `index` from user input.
    ///
    /// Empty input clears the slot. Anything other than a single numeral is
    /// rejected and leaves the slot unchanged.
    pub fn set_digit(&mut self, index: usize, input: &str) -> Result<(), CodeEntryError> {
        let slot = self
            .code_digits
            .get_mut(index)
            .ok_or(CodeEntryError::SlotOutOfRange { index })?;

        let mut chars = input.chars();
        match (chars.next(), chars.next()) {
            (None, _) => *slot = None,
            (Some(c), None) if c.is_ascii_digit() => *slot = Some(c),
            _ => {
                return Err(CodeEntryError::NotADigit {
                    input: input.to_string(),
                })
            }
        }
        Ok(())
    }

    pub fn clear_digit(&mut self, index: usize) -> Result<(), CodeEntryError> {
        self.set_digit(index, "")
    }

    /// Fill consecutive slots from `start` with the numerals found in `text`.
    ///
    /// Non-numerals are skipped. Returns how many slots were filled.
    pub fn paste_code(&mut self, start: usize, text: &str) -> Result<usize, CodeEntryError> {
        if start >= CODE_LENGTH {
            return Err(CodeEntryError::SlotOutOfRange { index: start });
        }

        let mut filled = 0;
        for (slot, digit) in self.code_digits[start..]
            .iter_mut()
            .zip(text.chars().filter(char::is_ascii_digit))
        {
            *slot = Some(digit);
            filled += 1;
        }
        Ok(filled)
    }

    pub fn clear_code(&mut self) {
        self.code_digits = [None; CODE_LENGTH];
    }

    /// Concatenation of the filled slots; shorter than `CODE_LENGTH` while incomplete
    pub fn code(&self) -> String {
        self.code_digits.iter().flatten().collect()
    }

    pub fn is_complete(&self) -> bool {
        self.code_digits.iter().all(Option::is_some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_empty() {
        let session = VerificationSession::new(Some("ana".to_string()));
        assert_eq!(session.username(), Some("ana"));
        assert_eq!(session.digits().len(), CODE_LENGTH);
        assert_eq!(session.code(), "");
        assert!(!session.is_complete());
    }

    #[test]
    fn test_blank_username_is_missing() {
        assert_eq!(VerificationSession::new(Some("  ".to_string())).username(), None);
        assert_eq!(VerificationSession::new(None).username(), None);
    }

    #[test]
    fn test_set_and_clear_digits() {
        let mut session = VerificationSession::new(Some("ana".to_string()));
        for (i, d) in ["4", "8", "1", "5", "1", "6"].iter().enumerate() {
            session.set_digit(i, d).unwrap();
        }
        assert!(session.is_complete());
        assert_eq!(session.code(), "481516");

        session.clear_digit(2).unwrap();
        assert!(!session.is_complete());
        assert_eq!(session.code(), "48516");
    }

    #[test]
    fn test_rejects_invalid_input() {
        let mut session = VerificationSession::new(None);
        session.set_digit(0, "7").unwrap();

        assert!(matches!(
            session.set_digit(0, "a"),
            Err(CodeEntryError::NotADigit { .. })
        ));
        assert!(matches!(
            session.set_digit(0, "12"),
            Err(CodeEntryError::NotADigit { .. })
        ));
        assert_eq!(
            session.set_digit(CODE_LENGTH, "1"),
            Err(CodeEntryError::SlotOutOfRange { index: CODE_LENGTH })
        );
        assert_eq!(session.digits()[0], Some('7'));
    }

    #[test]
    fn test_paste_fills_from_start() {
        let mut session = VerificationSession::new(None);
        assert_eq!(session.paste_code(0, "123-456").unwrap(), 6);
        assert_eq!(session.code(), "123456");

        session.clear_code();
        assert_eq!(session.paste_code(4, "98765").unwrap(), 2);
        assert_eq!(session.digits()[4], Some('9'));
        assert_eq!(session.digits()[5], Some('8'));
        assert_eq!(session.code(), "98");
    }

    #[test]
    fn test_each_session_has_own_id() {
        let a = VerificationSession::new(None);
        let b = VerificationSession::new(None);
        assert_ne!(a.id(), b.id());
    }
}
