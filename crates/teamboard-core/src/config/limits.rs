//! Limits for documents, invites, and the audit log.

use serde::{Deserialize, Serialize};

/// Team document settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentsConfig {
    /// Largest accepted upload in bytes.
    #[serde(default = "default_max_upload")]
    pub max_upload_bytes: usize,
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: default_max_upload(),
        }
    }
}

/// Team invite settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvitesConfig {
    /// Days before a pending invite expires.
    #[serde(default = "default_ttl_days")]
    pub ttl_days: i64,
}

impl Default for InvitesConfig {
    fn default() -> Self {
        Self {
            ttl_days: default_ttl_days(),
        }
    }
}

/// Audit log query settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Entries returned when the caller gives no limit.
    #[serde(default = "default_limit")]
    pub default_limit: u32,
    /// Upper bound on a single page.
    #[serde(default = "default_max_limit")]
    pub max_limit: u32,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

impl AuditConfig {
    /// Clamp a requested page size into `1..=max_limit`.
    pub fn clamp(&self, requested: Option<u32>) -> u32 {
        requested
            .unwrap_or(self.default_limit)
            .clamp(1, self.max_limit)
    }
}

fn default_max_upload() -> usize {
    100 * 1024 * 1024
}

fn default_ttl_days() -> i64 {
    14
}

fn default_limit() -> u32 {
    50
}

fn default_max_limit() -> u32 {
    200
}
