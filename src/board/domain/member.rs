//! Team membership snapshot used to populate the assignee filter.

use super::{TeamId, UserId};
use serde::{Deserialize, Serialize};

/// A user belonging to the selected team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    id: UserId,
    full_name: String,
    avatar_url: Option<String>,
}

impl TeamMember {
    /// Creates a team member. Blank avatar paths are treated as absent.
    #[must_use]
    pub fn new(id: UserId, full_name: impl Into<String>, avatar_url: Option<String>) -> Self {
        Self {
            id,
            full_name: full_name.into(),
            avatar_url: avatar_url.filter(|url| !url.trim().is_empty()),
        }
    }

    /// Returns the member's user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the member's full name.
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Returns the avatar path exactly as stored by the backend.
    #[must_use]
    pub fn avatar_url(&self) -> Option<&str> {
        self.avatar_url.as_deref()
    }

    /// Returns the avatar as an absolute URL served from `asset_origin`.
    #[must_use]
    pub fn resolved_avatar_url(&self, asset_origin: &str) -> Option<String> {
        self.avatar_url
            .as_deref()
            .and_then(|path| resolve_asset_url(asset_origin, path))
    }
}

/// A team the current user may open a board for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSummary {
    /// Team identifier.
    pub id: TeamId,
    /// Team display name.
    pub name: String,
}

/// Resolves a backend asset path against `asset_origin`.
///
/// Absolute `http(s)` and inline `data:` URLs are returned unchanged; relative
/// paths are joined onto the origin with exactly one separating slash.
#[must_use]
pub fn resolve_asset_url(asset_origin: &str, path: &str) -> Option<String> {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.starts_with("http") || trimmed.starts_with("data:") {
        return Some(trimmed.to_owned());
    }
    let origin = asset_origin.trim_end_matches('/');
    let relative = trimmed.trim_start_matches('/');
    Some(format!("{origin}/{relative}"))
}
