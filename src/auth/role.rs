//! Role model — wire-shape tolerance and canonical normalization.
//!
//! DESIGN
//! ======
//! The API has shipped roles in two shapes across client versions: a bare
//! name string (`"ADMIN"`) and an object (`{ "id": ..., "name": "ADMIN" }`).
//! Both are accepted at the ingestion boundary and normalized to a single
//! canonical uppercase name there, so no downstream consumer ever branches
//! on the wire shape again.

#[cfg(test)]
#[path = "role_test.rs"]
mod tests;

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// =============================================================================
// ROLE ENUMERATION
// =============================================================================

/// The fixed set of roles known to the panel.
///
/// Matching against canonical names is case-sensitive; anything outside this
/// set carries no elevated access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    SuperAdmin,
    Admin,
    Instructor,
    Student,
    Viewer,
}

impl Role {
    /// Parse a canonical uppercase role name.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "SUPER_ADMIN" => Some(Self::SuperAdmin),
            "ADMIN" => Some(Self::Admin),
            "INSTRUCTOR" => Some(Self::Instructor),
            "STUDENT" => Some(Self::Student),
            "VIEWER" => Some(Self::Viewer),
            _ => None,
        }
    }

    /// The canonical uppercase name of this role.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SuperAdmin => "SUPER_ADMIN",
            Self::Admin => "ADMIN",
            Self::Instructor => "INSTRUCTOR",
            Self::Student => "STUDENT",
            Self::Viewer => "VIEWER",
        }
    }
}

// =============================================================================
// WIRE SHAPE
// =============================================================================

/// A role as it appears on the wire or in previously persisted records.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoleRef {
    /// Bare role name (older client versions).
    Name(String),
    /// Role object returned by the current API.
    Object {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        name: String,
    },
}

// =============================================================================
// CANONICAL NAME
// =============================================================================

/// Canonical uppercase role name.
///
/// This is the single shape downstream code sees. Deserializing accepts
/// either [`RoleRef`] wire shape; serializing always writes the object shape
/// the current API uses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoleName(String);

impl RoleName {
    /// Normalize a raw role name: trim and uppercase.
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        Self(raw.trim().to_uppercase())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve against the fixed role enumeration. `None` for unknown names.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        Role::parse(&self.0)
    }
}

impl From<Role> for RoleName {
    fn from(role: Role) -> Self {
        Self(role.as_str().to_owned())
    }
}

impl From<RoleRef> for RoleName {
    fn from(wire: RoleRef) -> Self {
        match wire {
            RoleRef::Name(name) | RoleRef::Object { name, .. } => Self::normalize(&name),
        }
    }
}

impl<'de> Deserialize<'de> for RoleName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        RoleRef::deserialize(deserializer).map(Self::from)
    }
}

impl Serialize for RoleName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("name", &self.0)?;
        map.end()
    }
}
