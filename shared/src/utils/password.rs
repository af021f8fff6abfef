//! Password strength utilities

use once_cell::sync::Lazy;
use regex::Regex;

/// Minimum length of a strong password
pub const MIN_STRONG_LENGTH: usize = 12;

static LOWERCASE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z]").unwrap());

static UPPERCASE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z]").unwrap());

// ASCII digits only
static DIGIT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]").unwrap());

// Anything that is neither an ASCII word character nor whitespace, so accented
// letters such as ñ count as symbols
static SYMBOL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_\s]").unwrap());

/// Which strength rules a password satisfies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordRules {
    pub long_enough: bool,
    pub has_uppercase: bool,
    pub has_lowercase: bool,
    pub has_digit: bool,
    pub has_symbol: bool,
}

impl PasswordRules {
    /// Evaluate every rule against `password`
    pub fn evaluate(password: &str) -> Self {
        Self {
            long_enough: password.chars().count() >= MIN_STRONG_LENGTH,
            has_uppercase: UPPERCASE_REGEX.is_match(password),
            has_lowercase: LOWERCASE_REGEX.is_match(password),
            has_digit: DIGIT_REGEX.is_match(password),
            has_symbol: SYMBOL_REGEX.is_match(password),
        }
    }

    /// Number of satisfied rules, 0 to 5
    pub fn score(&self) -> u8 {
        [
            self.long_enough,
            self.has_uppercase,
            self.has_lowercase,
            self.has_digit,
            self.has_symbol,
        ]
        .iter()
        .filter(|ok| **ok)
        .count() as u8
    }

    /// All rules hold
    pub fn is_strong(&self) -> bool {
        self.score() == 5
    }
}

/// Strength label shown next to the password field
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StrengthLevel {
    VeryWeak,
    Weak,
    Medium,
    Strong,
    VeryStrong,
}

impl StrengthLevel {
    pub fn from_score(score: u8) -> Self {
        match score {
            0 | 1 => StrengthLevel::VeryWeak,
            2 => StrengthLevel::Weak,
            3 => StrengthLevel::Medium,
            4 => StrengthLevel::Strong,
            _ => StrengthLevel::VeryStrong,
        }
    }

    /// Label in English and Spanish
    pub fn labels(&self) -> (&'static str, &'static str) {
        match self {
            StrengthLevel::VeryWeak => ("Very weak", "Muy débil"),
            StrengthLevel::Weak => ("Weak", "Débil"),
            StrengthLevel::Medium => ("Medium", "Media"),
            StrengthLevel::Strong => ("Strong", "Fuerte"),
            StrengthLevel::VeryStrong => ("Very strong", "Muy fuerte"),
        }
    }
}

/// Strength report for a password
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordStrength {
    pub rules: PasswordRules,
    pub score: u8,
    pub level: StrengthLevel,
}

impl PasswordStrength {
    /// Percentage of satisfied rules, for a progress bar
    pub fn percent(&self) -> u8 {
        self.score * 20
    }
}

/// Evaluate a password
pub fn password_strength(password: &str) -> PasswordStrength {
    let rules = PasswordRules::evaluate(password);
    let score = rules.score();
    PasswordStrength {
        rules,
        score,
        level: StrengthLevel::from_score(score),
    }
}

/// Check whether a password satisfies every strength rule
pub fn is_strong_password(password: &str) -> bool {
    PasswordRules::evaluate(password).is_strong()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_strong_password() {
        assert!(is_strong_password("Correct-Horse9"));
        assert!(is_strong_password("aB3$aB3$aB3$"));
        assert!(!is_strong_password("aB3$aB3$aB3")); // 11 chars
        assert!(!is_strong_password("correct-horse9")); // no uppercase
        assert!(!is_strong_password("CORRECT-HORSE9")); // no lowercase
        assert!(!is_strong_password("Correct-Horse!")); // no digit
        assert!(!is_strong_password("CorrectHorse99")); // no symbol
    }

    #[test]
    fn test_whitespace_and_underscore_are_not_symbols() {
        assert!(!PasswordRules::evaluate("Correct Horse9").has_symbol);
        assert!(!PasswordRules::evaluate("Correct_Horse9").has_symbol);
        assert!(PasswordRules::evaluate("Correct.Horse9").has_symbol);
    }

    #[test]
    fn test_non_ascii_letters_count_as_symbols() {
        let rules = PasswordRules::evaluate("Contraseñaaa1");
        assert!(rules.has_symbol);
        assert!(rules.is_strong());
        assert!(PasswordRules::evaluate("Canción-seguraX").has_symbol);
        assert!(PasswordRules::evaluate("Abcdefghijk¿").has_symbol);
    }

    #[test]
    fn test_only_ascii_digits_count_as_digits() {
        assert!(!PasswordRules::evaluate("Abcdefgh!jk٣").has_digit);
        assert!(PasswordRules::evaluate("Abcdefgh!jk3").has_digit);
    }

    #[test]
    fn test_strength_levels() {
        assert_eq!(password_strength("").level, StrengthLevel::VeryWeak);
        assert_eq!(password_strength("a").level, StrengthLevel::VeryWeak);
        assert_eq!(password_strength("aB").level, StrengthLevel::Weak);
        assert_eq!(password_strength("aB1").level, StrengthLevel::Medium);
        assert_eq!(password_strength("aB1$").level, StrengthLevel::Strong);

        let strong = password_strength("aB1$aB1$aB1$");
        assert_eq!(strong.level, StrengthLevel::VeryStrong);
        assert_eq!(strong.percent(), 100);
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 11 characters, more than 12 bytes
        assert!(!PasswordRules::evaluate("ñññññññññA1").long_enough);
    }
}
