// SPDX-License-Identifier: MIT
//! Deployment façade — simulated Azure deployments with the two-step
//! submit-then-poll shape the frontend's polling loop depends on.
//!
//! No cloud calls happen. A submitted deployment starts in progress; each
//! status poll resolves it randomly (complete, still pending, or failed).
//! History is append-only; records are never deleted.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::RwLock;
use tracing::info;

/// Chance a pending deployment completes on a given poll.
const COMPLETE_CHANCE: f32 = 0.45;
/// Chance a pending deployment fails on a given poll.
const FAIL_CHANCE: f32 = 0.08;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployRequest {
    pub resource_group: String,
    pub region: String,
    pub service_name: String,
    pub deployment_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentStatus {
    InProgress,
    Completed,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRecord {
    /// `deploy-<digits>` — unique per process.
    pub id: String,
    pub status: DeploymentStatus,
    /// Populated only once the deployment completes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Echo of the request plus timing metadata.
    pub details: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Default)]
pub struct DeploymentManager {
    records: RwLock<HashMap<String, DeploymentRecord>>,
    /// Disambiguates ids created within the same millisecond.
    seq: AtomicU64,
}

impl DeploymentManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept a deployment request and return its freshly created record.
    pub async fn deploy(&self, req: DeployRequest) -> DeploymentRecord {
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);
        let id = format!("deploy-{}{:03}", Utc::now().timestamp_millis(), seq % 1000);

        let record = DeploymentRecord {
            id: id.clone(),
            status: DeploymentStatus::InProgress,
            url: None,
            details: json!({
                "resourceGroup": req.resource_group,
                "region": req.region,
                "serviceName": req.service_name,
                "deploymentType": req.deployment_type,
                "startedAt": Utc::now().to_rfc3339(),
            }),
            error: None,
        };

        info!(id = %record.id, service = %req.service_name, "deployment submitted");
        self.records.write().await.insert(id, record.clone());
        record
    }

    /// Poll a deployment. While in progress, each call resolves randomly:
    /// completed (url populated), failed (error populated), or still pending.
    /// Unknown ids return `None`.
    pub async fn check_status(&self, id: &str) -> Option<DeploymentRecord> {
        let mut records = self.records.write().await;
        let record = records.get_mut(id)?;

        if record.status == DeploymentStatus::InProgress {
            let roll = fastrand::f32();
            if roll < FAIL_CHANCE {
                record.status = DeploymentStatus::Failed;
                record.error = Some("Deployment failed: provisioning error".to_string());
                info!(id = %record.id, "deployment failed");
            } else if roll < FAIL_CHANCE + COMPLETE_CHANCE {
                record.status = DeploymentStatus::Completed;
                let service = record
                    .details
                    .get("serviceName")
                    .and_then(|v| v.as_str())
                    .unwrap_or("app");
                record.url = Some(format!("https://{service}.azurewebsites.net"));
                info!(id = %record.id, url = ?record.url, "deployment completed");
            }
        }

        Some(record.clone())
    }

    /// Full append-only history, newest last.
    pub async fn list(&self) -> Vec<DeploymentRecord> {
        let records = self.records.read().await;
        let mut all: Vec<_> = records.values().cloned().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }
}

/// Canned Azure resource listing, filterable by type. Mirrors the resource
/// panel's expectations; no provider call is made.
pub fn list_resources(kind: Option<&str>) -> Vec<serde_json::Value> {
    let all = vec![
        json!({ "name": "nimbus-app-service", "type": "AppService", "region": "eastus", "status": "running" }),
        json!({ "name": "nimbus-functions", "type": "FunctionApp", "region": "eastus", "status": "running" }),
        json!({ "name": "nimbus-storage", "type": "StorageAccount", "region": "westus2", "status": "available" }),
        json!({ "name": "nimbus-sql", "type": "SqlDatabase", "region": "eastus", "status": "online" }),
    ];
    match kind {
        Some(k) if !k.is_empty() => all
            .into_iter()
            .filter(|r| r.get("type").and_then(|t| t.as_str()) == Some(k))
            .collect(),
        _ => all,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> DeployRequest {
        DeployRequest {
            resource_group: "rg1".into(),
            region: "eastus".into(),
            service_name: "svc".into(),
            deployment_type: "AppService".into(),
        }
    }

    #[tokio::test]
    async fn deploy_returns_in_progress_with_patterned_id() {
        let mgr = DeploymentManager::new();
        let record = mgr.deploy(request()).await;
        assert_eq!(record.status, DeploymentStatus::InProgress);
        assert!(record.url.is_none());
        let digits = record.id.strip_prefix("deploy-").unwrap();
        assert!(!digits.is_empty());
        assert!(digits.chars().all(|c| c.is_ascii_digit()));
    }

    #[tokio::test]
    async fn ids_are_unique_within_a_burst() {
        let mgr = DeploymentManager::new();
        let a = mgr.deploy(request()).await;
        let b = mgr.deploy(request()).await;
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn status_eventually_resolves_and_sticks() {
        let mgr = DeploymentManager::new();
        let record = mgr.deploy(request()).await;

        // Enough polls that a perpetual in-progress result is (1-0.53)^200 —
        // effectively impossible.
        let mut terminal = None;
        for _ in 0..200 {
            let polled = mgr.check_status(&record.id).await.unwrap();
            if polled.status != DeploymentStatus::InProgress {
                terminal = Some(polled);
                break;
            }
        }
        let resolved = terminal.expect("deployment never left in_progress");
        match resolved.status {
            DeploymentStatus::Completed => {
                assert_eq!(resolved.url.as_deref(), Some("https://svc.azurewebsites.net"));
                assert!(resolved.error.is_none());
            }
            DeploymentStatus::Failed => {
                assert!(resolved.error.is_some());
                assert!(resolved.url.is_none());
            }
            DeploymentStatus::InProgress => unreachable!(),
        }

        // Terminal states are sticky.
        let again = mgr.check_status(&record.id).await.unwrap();
        assert_eq!(again.status, resolved.status);
    }

    #[tokio::test]
    async fn unknown_id_is_none_and_history_is_append_only() {
        let mgr = DeploymentManager::new();
        assert!(mgr.check_status("deploy-404").await.is_none());
        mgr.deploy(request()).await;
        mgr.deploy(request()).await;
        assert_eq!(mgr.list().await.len(), 2);
    }

    #[test]
    fn resources_filter_by_type() {
        assert_eq!(list_resources(None).len(), 4);
        let apps = list_resources(Some("AppService"));
        assert_eq!(apps.len(), 1);
        assert!(list_resources(Some("Nonexistent")).is_empty());
    }
}
