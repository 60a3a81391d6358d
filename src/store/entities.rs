// SPDX-License-Identifier: MIT
// Persisted entity types — one table per type, auto-incrementing integer ids.

use chrono::Utc;
use serde::{Deserialize, Serialize};

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}

// ─── User ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub username: String,
    /// Plaintext demo credential — never serialized to clients.
    #[serde(skip_serializing)]
    pub password: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
}

impl NewUser {
    pub fn into_user(self, id: u64) -> User {
        let now = now_rfc3339();
        User {
            id,
            username: self.username,
            password: self.password,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

// ─── Project ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: u64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Referential integrity is not enforced: this may point at a deleted
    /// user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<u64>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub owner_id: Option<u64>,
}

impl NewProject {
    pub fn into_project(self, id: u64) -> Project {
        let now = now_rfc3339();
        Project {
            id,
            name: self.name,
            description: self.description,
            owner_id: self.owner_id,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Partial update — `Some` fields are merged in, `None` fields untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl Project {
    pub fn apply(&mut self, patch: ProjectPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        self.updated_at = now_rfc3339();
    }
}

// ─── File ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    pub id: u64,
    pub project_id: u64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFile {
    pub name: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub content: String,
}

impl NewFile {
    pub fn into_file(self, id: u64, project_id: u64) -> FileRecord {
        let now = now_rfc3339();
        FileRecord {
            id,
            project_id,
            name: self.name,
            language: self.language,
            content: self.content,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilePatch {
    pub name: Option<String>,
    pub language: Option<String>,
    pub content: Option<String>,
}

impl FileRecord {
    pub fn apply(&mut self, patch: FilePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(language) = patch.language {
            self.language = Some(language);
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        self.updated_at = now_rfc3339();
    }
}

// ─── Deployment row ──────────────────────────────────────────────────────────

/// Entity-store record of a submitted deployment. Links the integer row id
/// to the façade's string deployment id.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRow {
    pub id: u64,
    pub deployment_id: String,
    pub service_name: String,
    pub created_at: String,
    pub updated_at: String,
}

impl DeploymentRow {
    pub fn new(id: u64, deployment_id: &str, service_name: &str) -> Self {
        let now = now_rfc3339();
        Self {
            id,
            deployment_id: deployment_id.to_string(),
            service_name: service_name.to_string(),
            created_at: now.clone(),
            updated_at: now,
        }
    }
}
