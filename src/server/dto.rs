use serde::{Deserialize, Serialize};

use crate::types::{LinkPatch, ReorderItem};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

impl TokenResponse {
    #[must_use]
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

fn default_category() -> String {
    "Uncategorized".to_string()
}

#[derive(Debug, Deserialize)]
pub struct CreateLinkRequest {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub icon_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub is_favorite: bool,
}

/// Partial update payload; absent fields stay untouched.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateLinkRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub icon_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub is_favorite: Option<bool>,
}

impl From<UpdateLinkRequest> for LinkPatch {
    fn from(req: UpdateLinkRequest) -> Self {
        Self {
            title: req.title,
            url: req.url,
            icon: req.icon,
            icon_url: req.icon_url,
            description: req.description,
            category: req.category,
            is_favorite: req.is_favorite,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub items: Vec<ReorderItem>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryOrderPayload {
    pub order: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListLinksParams {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub favorite: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct CheckStatusParams {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct CheckStatusResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CheckStatusResponse {
    #[must_use]
    pub fn online(latency_ms: u64) -> Self {
        Self {
            status: "online",
            latency_ms: Some(latency_ms),
            code: None,
            message: None,
        }
    }

    #[must_use]
    pub fn offline(code: u16) -> Self {
        Self {
            status: "offline",
            latency_ms: None,
            code: Some(code),
            message: None,
        }
    }

    #[must_use]
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self {
            status: "offline",
            latency_ms: None,
            code: None,
            message: Some(message.into()),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            latency_ms: None,
            code: None,
            message: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatusMessage {
    pub status: &'static str,
}

impl StatusMessage {
    #[must_use]
    pub fn ok() -> Self {
        Self { status: "ok" }
    }

    #[must_use]
    pub fn deleted() -> Self {
        Self { status: "deleted" }
    }
}
