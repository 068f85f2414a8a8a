pub mod password;

/// Convert a user-supplied link name into the canonical storage key.
///
/// A single-character name (notably `"/"`, the root path) is returned as is.
/// Anything longer loses at most one leading `/` and then at most one
/// trailing `/`; repeated slashes are only partially stripped.
///
/// ```
/// use link_shortener::utils::normalize_name;
/// assert_eq!(normalize_name("/"), "/");
/// assert_eq!(normalize_name("/docs/"), "docs");
/// assert_eq!(normalize_name("//docs"), "/docs");
/// ```
pub fn normalize_name(raw: &str) -> String {
    // 按字符计数，避免多字节字符被误判
    if raw.chars().count() == 1 {
        return raw.to_string();
    }

    let name = raw.strip_prefix('/').unwrap_or(raw);
    let name = name.strip_suffix('/').unwrap_or(name);
    name.to_string()
}
