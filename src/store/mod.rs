// SPDX-License-Identifier: MIT
//! In-memory entity store — CRUD over users, projects, files, and
//! deployments, one table per type.
//!
//! Ids are unique and monotonically increasing per table for the process
//! lifetime; a deleted id is never reused. Deleting a project does not
//! cascade to its files — a preserved gap, not an oversight.
//!
//! The store is injected through `AppContext`; nothing here is a global.
//! Map operations hold the table lock for their full duration, so there is
//! no read-modify-write race across await points.

pub mod entities;

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;

pub use entities::{
    DeploymentRow, FilePatch, FileRecord, NewFile, NewProject, NewUser, Project, ProjectPatch,
    User,
};

/// One keyed in-memory table with an auto-incrementing id counter.
pub struct Table<T: Clone> {
    rows: RwLock<BTreeMap<u64, T>>,
    next_id: AtomicU64,
}

impl<T: Clone> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

impl<T: Clone> Table<T> {
    /// Allocate the next id and insert the row built from it.
    pub async fn insert(&self, build: impl FnOnce(u64) -> T) -> T {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let row = build(id);
        self.rows.write().await.insert(id, row.clone());
        row
    }

    pub async fn get(&self, id: u64) -> Option<T> {
        self.rows.read().await.get(&id).cloned()
    }

    /// First row matching the predicate, in id order (the get-by-field
    /// capability).
    pub async fn find(&self, pred: impl Fn(&T) -> bool) -> Option<T> {
        self.rows.read().await.values().find(|r| pred(r)).cloned()
    }

    pub async fn list(&self) -> Vec<T> {
        self.rows.read().await.values().cloned().collect()
    }

    pub async fn filter(&self, pred: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows
            .read()
            .await
            .values()
            .filter(|r| pred(r))
            .cloned()
            .collect()
    }

    /// Apply a mutation to a row in place. Returns the updated row, or
    /// `None` if the id does not exist.
    pub async fn update(&self, id: u64, apply: impl FnOnce(&mut T)) -> Option<T> {
        let mut rows = self.rows.write().await;
        let row = rows.get_mut(&id)?;
        apply(row);
        Some(row.clone())
    }

    /// Returns whether the id existed. The id is not reused afterwards.
    pub async fn delete(&self, id: u64) -> bool {
        self.rows.write().await.remove(&id).is_some()
    }
}

/// The process-wide entity tables, injected via `AppContext`.
#[derive(Default)]
pub struct MemStore {
    pub users: Table<User>,
    pub projects: Table<Project>,
    pub files: Table<FileRecord>,
    pub deployments: Table<DeploymentRow>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create_user(&self, new: NewUser) -> User {
        self.users.insert(|id| new.into_user(id)).await
    }

    pub async fn get_user_by_username(&self, username: &str) -> Option<User> {
        self.users.find(|u| u.username == username).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_then_find_by_username() {
        let store = MemStore::new();
        let created = store
            .create_user(NewUser {
                username: "a".into(),
                password: "b".into(),
            })
            .await;
        assert_eq!(created.id, 1);

        let found = store.get_user_by_username("a").await.unwrap();
        assert_eq!(found.username, "a");
        assert_eq!(found.id, created.id);
        assert!(store.get_user_by_username("missing").await.is_none());
    }

    #[tokio::test]
    async fn ids_are_monotonic_and_never_reused() {
        let table: Table<u64> = Table::default();
        let a = table.insert(|id| id).await;
        let b = table.insert(|id| id).await;
        assert!(b > a);

        assert!(table.delete(b).await);
        let c = table.insert(|id| id).await;
        assert!(c > b, "deleted id must not be reused");
    }

    #[tokio::test]
    async fn delete_reports_existence() {
        let table: Table<u64> = Table::default();
        let id = table.insert(|id| id).await;
        assert!(table.delete(id).await);
        assert!(!table.delete(id).await);
        assert!(table.get(id).await.is_none());
    }

    #[tokio::test]
    async fn update_merges_patch_and_refreshes_timestamp() {
        let store = MemStore::new();
        let project = store
            .projects
            .insert(|id| {
                NewProject {
                    name: "p".into(),
                    description: None,
                    owner_id: None,
                }
                .into_project(id)
            })
            .await;

        let updated = store
            .projects
            .update(project.id, |p| {
                p.apply(ProjectPatch {
                    name: Some("renamed".into()),
                    description: None,
                })
            })
            .await
            .unwrap();
        assert_eq!(updated.name, "renamed");
        assert!(updated.description.is_none());
        assert!(updated.updated_at >= project.updated_at);
    }

    #[tokio::test]
    async fn no_cascade_from_project_to_files() {
        let store = MemStore::new();
        let project = store
            .projects
            .insert(|id| {
                NewProject {
                    name: "p".into(),
                    description: None,
                    owner_id: None,
                }
                .into_project(id)
            })
            .await;
        let file = store
            .files
            .insert(|id| {
                NewFile {
                    name: "main.js".into(),
                    language: None,
                    content: String::new(),
                }
                .into_file(id, project.id)
            })
            .await;

        assert!(store.projects.delete(project.id).await);
        // The file row survives its parent project.
        assert!(store.files.get(file.id).await.is_some());
    }
}
