//! Repository for the `profiles` table used by profile-based login.

use std::sync::Arc;

use ambiental_core::types::Record;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::store::{Filter, SelectQuery, TableStore};

/// Physical table holding user profiles.
pub const PROFILES_TABLE: &str = "profiles";

/// A row from the `profiles` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub email: String,
    pub nombre: Option<String>,
    pub role: Option<String>,
    /// Argon2id PHC string. Never serialized back out.
    #[serde(default, skip_serializing)]
    pub password_hash: Option<String>,
    #[serde(default = "default_active")]
    pub activo: bool,
}

fn default_active() -> bool {
    true
}

/// Provides lookups against the `profiles` table.
#[derive(Clone)]
pub struct ProfileRepo {
    store: Arc<dyn TableStore>,
}

impl ProfileRepo {
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self { store }
    }

    /// Find a profile by email, compared case-insensitively.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Profile>, StoreError> {
        let email = email.trim().to_lowercase();
        let query = SelectQuery::new()
            .filter(Filter::eq("email", email))
            .limit(1);
        let rows = self.store.select(PROFILES_TABLE, &query).await?;
        rows.into_iter().next().map(decode).transpose()
    }
}

fn decode(row: Record) -> Result<Profile, StoreError> {
    serde_json::from_value(serde_json::Value::Object(row))
        .map_err(|e| StoreError::Decode(format!("invalid profile row: {e}")))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::{json, Value};

    use super::*;
    use crate::memory::MemoryTableStore;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[tokio::test]
    async fn finds_profile_by_normalized_email() {
        let store = Arc::new(MemoryTableStore::new());
        store
            .seed(
                PROFILES_TABLE,
                vec![record(json!({
                    "email": "inspector@ambiente.gob",
                    "nombre": "Inspectora",
                    "role": "admin",
                    "password_hash": "$argon2id$...",
                }))],
            )
            .await;
        let repo = ProfileRepo::new(store);

        let profile = repo
            .find_by_email("  Inspector@Ambiente.gob ")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(profile.role.as_deref(), Some("admin"));
        assert!(profile.activo, "missing activo defaults to true");
        assert!(repo.find_by_email("nadie@ambiente.gob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn malformed_row_is_a_decode_error() {
        let store = Arc::new(MemoryTableStore::new());
        store
            .seed(PROFILES_TABLE, vec![record(json!({ "email": "x@y.z", "activo": "si" }))])
            .await;
        let repo = ProfileRepo::new(store);
        assert_matches!(repo.find_by_email("x@y.z").await, Err(StoreError::Decode(_)));
    }

    #[test]
    fn password_hash_is_not_serialized() {
        let profile = Profile {
            email: "a@b.c".into(),
            nombre: None,
            role: None,
            password_hash: Some("secret".into()),
            activo: true,
        };
        let json = serde_json::to_value(profile).unwrap();
        assert!(json.get("password_hash").is_none());
    }
}
