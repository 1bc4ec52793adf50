//! Credential and free-text validation.
//!
//! Every function here is pure and infallible: hostile or malformed input
//! yields a negative verdict, never a panic or an error to propagate. These
//! checks run client-side before a request is built; the backing service
//! still revalidates everything it receives.

use regex::Regex;
use std::collections::HashSet;

/// Default cap for free-text fields checked by [`validate_input`].
pub const DEFAULT_MAX_INPUT_LEN: usize = 255;

/// RFC 5321 upper bound on a full address.
const MAX_EMAIL_LEN: usize = 254;

const MIN_PASSWORD_LEN: usize = 8;
const MEDIUM_PASSWORD_LEN: usize = 10;
const STRONG_PASSWORD_LEN: usize = 12;

/// Punctuation accepted as the "symbol" character class in passwords.
const PASSWORD_SYMBOLS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?";

/// Domains of throwaway-inbox providers we refuse at signup.
const DISPOSABLE_DOMAINS: [&str; 6] = [
    "tempmail.com",
    "guerrillamail.com",
    "10minutemail.com",
    "throwaway.email",
    "mailinator.com",
    "trashmail.com",
];

/// A single password requirement the input failed to meet.
///
/// Variants are stable identifiers; the `Display` text is a fallback and
/// callers typically map the variant to localized copy instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PasswordViolation {
    #[error("shorter than 8 characters")]
    TooShort,
    #[error("missing an uppercase letter")]
    MissingUppercase,
    #[error("missing a lowercase letter")]
    MissingLowercase,
    #[error("missing a digit")]
    MissingDigit,
    #[error("missing a symbol")]
    MissingSymbol,
}

/// Qualitative strength tier for a password that passed [`validate_password`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum PasswordStrength {
    Weak,
    Medium,
    Strong,
}

/// Verdict returned by [`validate_password`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PasswordCheck {
    /// Failed requirements, in a fixed order (length, uppercase, lowercase,
    /// digit, symbol). Empty means the password is acceptable.
    pub violations: Vec<PasswordViolation>,
    /// Tier derived from length. Only meaningful when valid; stays
    /// [`PasswordStrength::Weak`] otherwise.
    pub strength: PasswordStrength,
}

impl PasswordCheck {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// First failed requirement, the one a form typically surfaces.
    #[must_use]
    pub fn first_violation(&self) -> Option<PasswordViolation> {
        self.violations.first().copied()
    }
}

/// Why [`validate_input`] rejected a free-text field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InputViolation {
    #[error("longer than {max} characters")]
    TooLong { max: usize },
    #[error("contains disallowed content")]
    DisallowedContent,
}

/// Verdict returned by [`validate_input`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputCheck {
    /// Tag-stripped copy of the input, safe to store or echo as plain text.
    /// Empty when the length cap was exceeded.
    pub sanitized: String,
    pub violation: Option<InputViolation>,
}

impl InputCheck {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.violation.is_none()
    }
}

/// Strip markup from untrusted text, keeping only character content.
///
/// The output never contains `<` or `>`, so it can be re-rendered as plain
/// text. Idempotent: sanitizing already-clean text returns it unchanged.
#[must_use]
pub fn sanitize_input(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_tag = false;
    for c in input.chars() {
        match c {
            '<' => in_tag = true,
            // A stray `>` outside a tag is dropped with it.
            '>' => in_tag = false,
            _ if in_tag => {}
            _ => out.push(c),
        }
    }
    out
}

/// Syntactic email check: `local@domain.tld` shape, at most 254 characters.
/// No DNS or deliverability lookup.
#[must_use]
pub fn validate_email(email: &str) -> bool {
    email.chars().count() <= MAX_EMAIL_LEN
        && Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
            .is_ok_and(|regex| regex.is_match(email))
}

/// Normalize an email for lookup and denylist checks.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Check a password against the signup requirements.
///
/// Violations are collected rather than short-circuited so a form can show
/// everything that is wrong at once. The tier in the result only reflects
/// length once all requirements are met.
#[must_use]
pub fn validate_password(password: &str) -> PasswordCheck {
    let mut violations = Vec::new();
    let len = password.chars().count();

    if len < MIN_PASSWORD_LEN {
        violations.push(PasswordViolation::TooShort);
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        violations.push(PasswordViolation::MissingUppercase);
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        violations.push(PasswordViolation::MissingLowercase);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        violations.push(PasswordViolation::MissingDigit);
    }
    if !password.chars().any(|c| PASSWORD_SYMBOLS.contains(c)) {
        violations.push(PasswordViolation::MissingSymbol);
    }

    let strength = if violations.is_empty() {
        if len >= STRONG_PASSWORD_LEN {
            PasswordStrength::Strong
        } else if len >= MEDIUM_PASSWORD_LEN {
            PasswordStrength::Medium
        } else {
            PasswordStrength::Weak
        }
    } else {
        PasswordStrength::Weak
    };

    PasswordCheck {
        violations,
        strength,
    }
}

/// Score a password from 0 to 100 for a strength meter.
///
/// Deliberately independent of [`validate_password`]: the score rewards
/// length and variety even when a hard requirement is missing, so a meter
/// can move while the form still blocks submission. Weights: 4 points per
/// character capped at 40, +10 each for uppercase/lowercase/digit presence,
/// +15 for a symbol, and up to +15 for the ratio of unique characters.
#[must_use]
pub fn calculate_password_strength(password: &str) -> u8 {
    let len = password.chars().count();
    if len == 0 {
        return 0;
    }

    let mut score = (len * 4).min(40) as f64;
    if password.chars().any(|c| c.is_ascii_uppercase()) {
        score += 10.0;
    }
    if password.chars().any(|c| c.is_ascii_lowercase()) {
        score += 10.0;
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        score += 10.0;
    }
    if password.chars().any(|c| PASSWORD_SYMBOLS.contains(c)) {
        score += 15.0;
    }

    let unique = password.chars().collect::<HashSet<_>>().len();
    score += (unique as f64 / len as f64 * 15.0).min(15.0);

    score.min(100.0) as u8
}

/// One-time code check: exactly six ASCII digits, nothing else.
#[must_use]
pub fn validate_otp(code: &str) -> bool {
    code.len() == 6 && code.bytes().all(|b| b.is_ascii_digit())
}

/// First/last name check: 2 to 50 characters, letters (any script, so
/// accented names pass), whitespace, apostrophes, and hyphens only.
#[must_use]
pub fn validate_name(name: &str) -> bool {
    let len = name.chars().count();
    (2..=50).contains(&len)
        && name
            .chars()
            .all(|c| c.is_alphabetic() || c.is_whitespace() || c == '\'' || c == '-')
}

/// Screen a free-text field for size and injection attempts.
///
/// Over-long input is rejected outright with an empty `sanitized` value.
/// Otherwise the text is scanned case-insensitively for script tags,
/// `javascript:` URIs, inline event handlers, and iframes; a hit still
/// yields the sanitized text so the form can echo it safely.
#[must_use]
pub fn validate_input(input: &str, max_len: usize) -> InputCheck {
    if input.chars().count() > max_len {
        return InputCheck {
            sanitized: String::new(),
            violation: Some(InputViolation::TooLong { max: max_len }),
        };
    }

    let suspicious = Regex::new(r"(?i)<script|javascript:|on\w+\s*=|<iframe")
        .is_ok_and(|regex| regex.is_match(input));

    InputCheck {
        sanitized: sanitize_input(input),
        violation: suspicious.then_some(InputViolation::DisallowedContent),
    }
}

/// True when the address belongs to a known throwaway-inbox provider.
/// Purely a denylist match on the domain part, case-insensitive.
#[must_use]
pub fn is_disposable_email(email: &str) -> bool {
    email.split('@').nth(1).is_some_and(|domain| {
        let domain = domain.to_lowercase();
        DISPOSABLE_DOMAINS.contains(&domain.as_str())
    })
}
