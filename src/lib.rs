//! # Gardi (client-side auth guard layer)
//!
//! `gardi` is the guard layer a multi-step authentication UI runs before
//! anything reaches the network: it classifies untrusted credential input,
//! throttles retry-prone actions, and carries a partial registration record
//! across wizard steps.
//!
//! ## Components
//!
//! - [`validation`] — pure checks for email, password, name, OTP code, and
//!   free text, plus a 0..=100 password-strength score. Violations are
//!   returned as stable enum identifiers so the UI can localize them.
//! - [`rate_limit`] — an in-memory sliding-window throttle keyed by action
//!   name, gating calls like login retries and OTP resends.
//! - [`draft`] — merge-on-write persistence of the in-progress registration
//!   record, backed by an injected [`storage::SessionStore`].
//!
//! ## Trust model
//!
//! Nothing here is a security boundary. Validation is a syntactic
//! pre-flight, the throttle resets with the process, and the draft record
//! lives in tab-scoped storage. The backing service re-checks everything;
//! this crate exists so that obviously bad requests never leave the client
//! and the user gets immediate feedback.
//!
//! ## Failure semantics
//!
//! No operation panics or returns `Result`. Malformed input yields a
//! negative verdict; a missing or corrupted storage host degrades to "no
//! draft exists".

pub mod draft;
pub mod rate_limit;
pub mod storage;
pub mod validation;

pub use draft::{DraftStore, Plan, RegisterDraft, DEFAULT_DRAFT_KEY};
pub use rate_limit::RateLimiter;
pub use storage::{MemoryStore, NullStore, SessionStore};
pub use validation::{
    calculate_password_strength, is_disposable_email, normalize_email, sanitize_input,
    validate_email, validate_input, validate_name, validate_otp, validate_password, InputCheck,
    InputViolation, PasswordCheck, PasswordStrength, PasswordViolation, DEFAULT_MAX_INPUT_LEN,
};
