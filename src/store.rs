//! In-memory user records.
//!
//! The store is an append-only sequence owned by the process: seeded
//! at startup, grown by create, discarded on exit. Identifier
//! assignment and append happen under one write lock, so concurrent
//! creates cannot observe the same length.

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// A stored user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Identifier, unique within the store.
    pub id: u64,
    pub name: String,
    pub age: i32,
}

/// Payload for creating a user.
///
/// Missing fields default to zero values; an `id` field, if sent, is
/// ignored — the store assigns identifiers.
#[derive(Debug, Default, Deserialize)]
pub struct NewUser {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: i32,
}

/// The in-memory, append-only record store.
pub struct UserStore {
    users: RwLock<Vec<User>>,
}

impl UserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            users: RwLock::new(Vec::new()),
        }
    }

    /// Create a store seeded with the two startup records.
    pub fn seeded() -> Self {
        Self {
            users: RwLock::new(vec![
                User {
                    id: 1,
                    name: "Alice".to_string(),
                    age: 25,
                },
                User {
                    id: 2,
                    name: "Bob".to_string(),
                    age: 30,
                },
            ]),
        }
    }

    /// A snapshot of all records in insertion order.
    pub async fn list(&self) -> Vec<User> {
        self.users.read().await.clone()
    }

    /// Append a new record, assigning the next identifier.
    pub async fn create(&self, candidate: NewUser) -> User {
        let mut users = self.users.write().await;
        let user = User {
            id: (users.len() + 1) as u64,
            name: candidate.name,
            age: candidate.age,
        };
        users.push(user.clone());
        user
    }

    /// Find a record by identifier. Linear scan in insertion order.
    pub async fn find_by_id(&self, id: u64) -> Option<User> {
        self.users.read().await.iter().find(|u| u.id == id).cloned()
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use super::*;

    #[tokio::test]
    async fn seeded_store_has_two_users() {
        let store = UserStore::seeded();
        let users = store.list().await;
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].id, 1);
        assert_eq!(users[1].id, 2);
    }

    #[tokio::test]
    async fn create_assigns_sequential_ids() {
        let store = UserStore::seeded();

        let first = store
            .create(NewUser {
                name: "Ivan".to_string(),
                age: 40,
            })
            .await;
        assert_eq!(first.id, 3);

        let second = store.create(NewUser::default()).await;
        assert_eq!(second.id, 4);
    }

    #[tokio::test]
    async fn create_preserves_payload_fields() {
        let store = UserStore::new();
        let user = store
            .create(NewUser {
                name: "Ivan".to_string(),
                age: 40,
            })
            .await;

        assert_eq!(user.id, 1);
        assert_eq!(user.name, "Ivan");
        assert_eq!(user.age, 40);

        let found = store.find_by_id(1).await.unwrap();
        assert_eq!(found, user);
    }

    #[tokio::test]
    async fn find_by_id_hit_and_miss() {
        let store = UserStore::seeded();
        assert_eq!(store.find_by_id(2).await.unwrap().id, 2);
        assert!(store.find_by_id(99).await.is_none());
    }

    #[tokio::test]
    async fn list_preserves_insertion_order() {
        let store = UserStore::seeded();
        store
            .create(NewUser {
                name: "Ivan".to_string(),
                age: 40,
            })
            .await;

        let ids: Vec<u64> = store.list().await.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn concurrent_creates_assign_unique_ids() {
        let store = Arc::new(UserStore::seeded());

        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.create(NewUser::default()).await.id
            }));
        }

        let mut ids = HashSet::new();
        for handle in handles {
            assert!(ids.insert(handle.await.unwrap()));
        }

        assert_eq!(store.list().await.len(), 10);
    }
}
