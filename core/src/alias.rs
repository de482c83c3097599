//! Alias resolution.

use indexmap::IndexMap;

/// Resolves `name` through the alias table.
///
/// Returns the canonical name when `name` is an alias, otherwise `name`
/// itself. Resolution is one level deep; unknown names pass through and are
/// dealt with by the binder.
///
/// # Examples
///
/// ```
/// use argschema_core::resolve_alias;
/// use indexmap::IndexMap;
///
/// let mut aliases = IndexMap::new();
/// aliases.insert("s".to_string(), "shortable".to_string());
///
/// assert_eq!(resolve_alias("s", &aliases), "shortable");
/// assert_eq!(resolve_alias("shortable", &aliases), "shortable");
/// assert_eq!(resolve_alias("unknown", &aliases), "unknown");
/// ```
pub fn resolve_alias<'a>(name: &'a str, aliases: &'a IndexMap<String, String>) -> &'a str {
    aliases.get(name).map(String::as_str).unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> IndexMap<String, String> {
        let mut aliases = IndexMap::new();
        aliases.insert("s".to_string(), "shortable".to_string());
        aliases.insert("n".to_string(), "name".to_string());
        aliases
    }

    #[test]
    fn test_resolve_is_idempotent_for_single_level_table() {
        let aliases = table();
        for name in ["s", "n", "shortable", "name", "x", ""] {
            let once = resolve_alias(name, &aliases);
            assert_eq!(resolve_alias(once, &aliases), once, "name {name:?}");
        }
    }

    #[test]
    fn test_resolve_empty_table_is_identity() {
        let aliases = IndexMap::new();
        assert_eq!(resolve_alias("dry", &aliases), "dry");
    }
}
