//! Parsed message catalogs addressed by dotted key paths.

use serde_json::Value;

use crate::error::{I18nError, I18nResult};
use crate::locale::LocaleCode;

/// Immutable JSON tree for one locale.
#[derive(Clone, Debug)]
pub struct Catalog {
    locale: LocaleCode,
    tree: Value,
}

impl Catalog {
    /// Parse a catalog document. The root must be a non-empty JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`I18nError::CatalogParse`] for malformed JSON,
    /// [`I18nError::CatalogShape`] when the root is not an object and
    /// [`I18nError::CatalogEmpty`] when the object has no entries.
    pub fn parse(locale: LocaleCode, raw: &str) -> I18nResult<Self> {
        let tree: Value = serde_json::from_str(raw)
            .map_err(|source| I18nError::CatalogParse { locale, source })?;
        match tree.as_object() {
            None => Err(I18nError::CatalogShape { locale }),
            Some(entries) if entries.is_empty() => Err(I18nError::CatalogEmpty { locale }),
            Some(_) => Ok(Self { locale, tree }),
        }
    }

    /// Locale backing this catalog.
    #[must_use]
    pub const fn locale(&self) -> LocaleCode {
        self.locale
    }

    /// Resolve a dotted path to any node (string, array, or sub-tree).
    #[must_use]
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        if path.is_empty() {
            return None;
        }
        let mut node = &self.tree;
        for segment in path.split('.') {
            node = match node {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(node)
    }

    /// Resolve a dotted path to a string leaf.
    #[must_use]
    pub fn text(&self, path: &str) -> Option<&str> {
        self.lookup(path).and_then(Value::as_str)
    }

    /// Dotted paths of every leaf value, sorted.
    #[must_use]
    pub fn leaf_keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        collect_leaves(&self.tree, &mut String::new(), &mut keys);
        keys.sort();
        keys
    }
}

fn collect_leaves(node: &Value, prefix: &mut String, keys: &mut Vec<String>) {
    match node {
        Value::Object(map) => {
            for (name, child) in map {
                let restore = prefix.len();
                if !prefix.is_empty() {
                    prefix.push('.');
                }
                prefix.push_str(name);
                collect_leaves(child, prefix, keys);
                prefix.truncate(restore);
            }
        }
        _ => keys.push(prefix.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "about": { "title": "About Us", "team": { "lead": "Dr. Ruiz" } },
        "home": { "features": [ { "title": "Custom fit" }, { "title": "Follow-up" } ] },
        "count": 3
    }"#;

    #[test]
    fn text_resolves_nested_strings_only() {
        let catalog = Catalog::parse(LocaleCode::En, SAMPLE).expect("sample parses");
        assert_eq!(catalog.text("about.title"), Some("About Us"));
        assert_eq!(catalog.text("about.team.lead"), Some("Dr. Ruiz"));
        assert_eq!(catalog.text("about.team"), None);
        assert_eq!(catalog.text("count"), None);
        assert_eq!(catalog.text("about.missing"), None);
        assert_eq!(catalog.text(""), None);
    }

    #[test]
    fn lookup_indexes_into_arrays() {
        let catalog = Catalog::parse(LocaleCode::En, SAMPLE).expect("sample parses");
        assert_eq!(catalog.text("home.features.1.title"), Some("Follow-up"));
        assert!(catalog.lookup("home.features").is_some_and(Value::is_array));
        assert!(catalog.lookup("home.features.9").is_none());
    }

    #[test]
    fn parse_rejects_non_object_roots() {
        let err = Catalog::parse(LocaleCode::Es, "[1, 2]").expect_err("arrays are rejected");
        assert!(matches!(err, I18nError::CatalogShape { .. }));
        let err = Catalog::parse(LocaleCode::Es, "{ nope").expect_err("malformed json");
        assert!(matches!(err, I18nError::CatalogParse { .. }));
        let err = Catalog::parse(LocaleCode::En, "{}").expect_err("empty root");
        assert!(matches!(
            err,
            I18nError::CatalogEmpty {
                locale: LocaleCode::En
            }
        ));
    }

    #[test]
    fn leaf_keys_flatten_the_tree() {
        let catalog = Catalog::parse(LocaleCode::En, SAMPLE).expect("sample parses");
        assert_eq!(
            catalog.leaf_keys(),
            vec![
                "about.team.lead".to_string(),
                "about.title".to_string(),
                "count".to_string(),
                "home.features".to_string(),
            ]
        );
    }
}
