use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

/// Key namespace for link records (`link.<name>`).
pub const LINK_NAMESPACE: &str = "link";

/// Key namespace for user records (`user.<username>`).
pub const USER_NAMESPACE: &str = "user";

/// Build a namespaced storage key.
pub fn namespaced_key(namespace: &str, name: &str) -> String {
    format!("{}.{}", namespace, name)
}

/// Prefix shared by every key in a namespace, including the trailing dot.
pub fn namespace_prefix(namespace: &str) -> String {
    format!("{}.", namespace)
}

/// A persisted short link.
///
/// `name` is always the canonical form produced by
/// [`normalize_name`](crate::utils::normalize_name).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub name: String,
    #[serde(alias = "link")]
    pub target: String,
    /// Successful resolutions so far.
    #[serde(rename = "requested", default)]
    pub request_count: u64,
}

impl LinkRecord {
    pub fn new(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            request_count: 0,
        }
    }
}

/// 用户权限，数值越小权限越高
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum UserPermission {
    Root = 0,
    Admin = 1,
    Edit = 2,
    View = 3,
}

impl UserPermission {
    /// Whether this permission grants access to the management API.
    pub fn can_manage_links(self) -> bool {
        self <= UserPermission::Admin
    }
}

/// A persisted account; `password` is an Argon2 PHC string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    pub password: String,
    pub permission: UserPermission,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_link_record_wire_format() {
        let record = LinkRecord {
            name: "docs".to_string(),
            target: "https://example.com".to_string(),
            request_count: 3,
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({"name": "docs", "target": "https://example.com", "requested": 3})
        );
    }

    #[test]
    fn test_link_record_accepts_legacy_link_field() {
        let record: LinkRecord =
            serde_json::from_value(json!({"name": "gh", "link": "https://github.com", "requested": 7}))
                .unwrap();
        assert_eq!(record.target, "https://github.com");
        assert_eq!(record.request_count, 7);
    }

    #[test]
    fn test_link_record_missing_counter_defaults_to_zero() {
        let record: LinkRecord =
            serde_json::from_value(json!({"name": "gh", "target": "https://github.com"})).unwrap();
        assert_eq!(record.request_count, 0);
    }

    #[test]
    fn test_user_permission_is_numeric() {
        let user = UserRecord {
            username: "root".to_string(),
            password: "$argon2id$...".to_string(),
            permission: UserPermission::Root,
        };
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["permission"], json!(0));

        let parsed: UserPermission = serde_json::from_value(json!(3)).unwrap();
        assert_eq!(parsed, UserPermission::View);
    }

    #[test]
    fn test_permission_ordering() {
        assert!(UserPermission::Root.can_manage_links());
        assert!(UserPermission::Admin.can_manage_links());
        assert!(!UserPermission::Edit.can_manage_links());
        assert!(!UserPermission::View.can_manage_links());
    }

    #[test]
    fn test_namespaced_keys() {
        assert_eq!(namespaced_key(LINK_NAMESPACE, "docs"), "link.docs");
        assert_eq!(namespaced_key(LINK_NAMESPACE, "/"), "link./");
        assert_eq!(namespace_prefix(USER_NAMESPACE), "user.");
    }
}
