//! Draft persistence for the multi-step registration flow.
//!
//! The signup wizard spans several pages that share no component state, so
//! each step merges its fields into one record held in tab-scoped storage.
//! The record is throwaway by design: cleared after verification succeeds,
//! gone with the tab otherwise. A corrupted stored value is treated exactly
//! like an absent one — both send the user back to step 1.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::storage::SessionStore;

/// Storage key the original flow uses; override with [`DraftStore::with_key`].
pub const DEFAULT_DRAFT_KEY: &str = "registerData";

/// Subscription tier picked during signup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Free,
    Pro,
    Enterprise,
}

/// Partial registration record accumulated across wizard steps.
///
/// Every field is optional at any point in time; a step only fills in what
/// it owns. Serializes in camelCase to match the stored payloads the web
/// flow already writes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirm_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<Plan>,
}

impl RegisterDraft {
    /// Field-wise shallow merge: set fields in `update` overwrite, unset
    /// fields leave the current value alone.
    pub fn merge(&mut self, update: RegisterDraft) {
        if update.first_name.is_some() {
            self.first_name = update.first_name;
        }
        if update.last_name.is_some() {
            self.last_name = update.last_name;
        }
        if update.email.is_some() {
            self.email = update.email;
        }
        if update.password.is_some() {
            self.password = update.password;
        }
        if update.confirm_password.is_some() {
            self.confirm_password = update.confirm_password;
        }
        if update.plan.is_some() {
            self.plan = update.plan;
        }
    }
}

/// Merge-on-write draft record over an injected [`SessionStore`].
///
/// Writes always read back the current record first, so a step submitting
/// only its own fields cannot drop what earlier steps saved. Last writer
/// wins between concurrent tabs; there is no versioning.
#[derive(Debug)]
pub struct DraftStore<S> {
    store: S,
    key: String,
}

impl<S: SessionStore> DraftStore<S> {
    /// Draft store under the default key.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_DRAFT_KEY)
    }

    /// Draft store under a caller-chosen key, for isolated tests or
    /// multiple concurrent flows.
    #[must_use]
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Current draft, or `None` when nothing usable is stored. An absent,
    /// empty, or unparseable value all read the same way.
    #[must_use]
    pub fn get(&self) -> Option<RegisterDraft> {
        let raw = self.store.get_item(&self.key)?;
        if raw.is_empty() {
            return None;
        }
        match serde_json::from_str(&raw) {
            Ok(draft) => Some(draft),
            Err(err) => {
                debug!(%err, "stored registration draft is unreadable, treating as absent");
                None
            }
        }
    }

    /// Merge `update` into the stored draft and write the result back.
    ///
    /// An all-empty update still materializes a stored record, which makes
    /// [`DraftStore::has`] true from then on.
    pub fn set(&self, update: RegisterDraft) {
        let mut draft = self.get().unwrap_or_default();
        draft.merge(update);
        match serde_json::to_string(&draft) {
            Ok(raw) => self.store.set_item(&self.key, &raw),
            Err(err) => warn!(%err, "failed to encode registration draft"),
        }
    }

    /// Drop the stored draft. No-op when none exists.
    pub fn clear(&self) {
        self.store.remove_item(&self.key);
    }

    /// Whether a readable draft exists, even an empty one.
    #[must_use]
    pub fn has(&self) -> bool {
        self.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, NullStore};

    fn draft_with_email(email: &str) -> RegisterDraft {
        RegisterDraft {
            email: Some(email.to_string()),
            ..RegisterDraft::default()
        }
    }

    #[test]
    fn get_returns_none_when_nothing_stored() {
        let store = DraftStore::new(MemoryStore::new());
        assert_eq!(store.get(), None);
        assert!(!store.has());
    }

    #[test]
    fn set_then_get_round_trips() {
        let store = DraftStore::new(MemoryStore::new());
        store.set(RegisterDraft {
            first_name: Some("John".to_string()),
            last_name: Some("Doe".to_string()),
            email: Some("test@example.com".to_string()),
            password: Some("StrongP@ssw0rd!".to_string()),
            ..RegisterDraft::default()
        });

        let draft = store.get().unwrap();
        assert_eq!(draft.first_name.as_deref(), Some("John"));
        assert_eq!(draft.email.as_deref(), Some("test@example.com"));
        assert_eq!(draft.plan, None);
    }

    #[test]
    fn set_merges_instead_of_replacing() {
        let store = DraftStore::new(MemoryStore::new());
        store.set(draft_with_email("test@example.com"));
        store.set(RegisterDraft {
            plan: Some(Plan::Pro),
            ..RegisterDraft::default()
        });

        let draft = store.get().unwrap();
        assert_eq!(draft.email.as_deref(), Some("test@example.com"));
        assert_eq!(draft.plan, Some(Plan::Pro));
    }

    #[test]
    fn set_overwrites_fields_present_in_update() {
        let store = DraftStore::new(MemoryStore::new());
        store.set(draft_with_email("old@example.com"));
        store.set(draft_with_email("new@example.com"));
        assert_eq!(store.get().unwrap().email.as_deref(), Some("new@example.com"));
    }

    #[test]
    fn empty_update_still_creates_a_record() {
        let store = DraftStore::new(MemoryStore::new());
        assert!(!store.has());
        store.set(RegisterDraft::default());
        assert!(store.has());
        assert_eq!(store.get(), Some(RegisterDraft::default()));
    }

    #[test]
    fn clear_removes_the_record_and_is_idempotent() {
        let store = DraftStore::new(MemoryStore::new());
        store.set(draft_with_email("test@example.com"));
        assert!(store.has());

        store.clear();
        assert_eq!(store.get(), None);
        assert!(!store.has());
        store.clear();
    }

    #[test]
    fn corrupted_and_empty_stored_values_read_as_absent() {
        let backing = MemoryStore::new();
        backing.set_item(DEFAULT_DRAFT_KEY, "not json {{{");
        let store = DraftStore::new(&backing);
        assert_eq!(store.get(), None);
        assert!(!store.has());

        backing.set_item(DEFAULT_DRAFT_KEY, "");
        assert_eq!(store.get(), None);
    }

    #[test]
    fn wire_form_matches_the_web_flow() {
        let backing = MemoryStore::new();
        let store = DraftStore::new(&backing);
        store.set(RegisterDraft {
            first_name: Some("John".to_string()),
            ..RegisterDraft::default()
        });
        assert_eq!(
            backing.get_item(DEFAULT_DRAFT_KEY).as_deref(),
            Some(r#"{"firstName":"John"}"#)
        );

        store.set(RegisterDraft {
            plan: Some(Plan::Enterprise),
            ..RegisterDraft::default()
        });
        assert_eq!(
            backing.get_item(DEFAULT_DRAFT_KEY).as_deref(),
            Some(r#"{"firstName":"John","plan":"enterprise"}"#)
        );
    }

    #[test]
    fn custom_keys_keep_flows_apart() {
        let backing = MemoryStore::new();
        let first = DraftStore::with_key(&backing, "flow-a");
        let second = DraftStore::with_key(&backing, "flow-b");

        first.set(draft_with_email("a@example.com"));
        assert!(!second.has());
        second.set(draft_with_email("b@example.com"));

        assert_eq!(first.get().unwrap().email.as_deref(), Some("a@example.com"));
        assert_eq!(second.get().unwrap().email.as_deref(), Some("b@example.com"));
    }

    #[test]
    fn storage_less_host_degrades_to_absence() {
        let store = DraftStore::new(NullStore);
        store.set(draft_with_email("test@example.com"));
        assert_eq!(store.get(), None);
        assert!(!store.has());
        store.clear();
    }
}
