//! Catalog completeness checks against the authoritative default catalog.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::catalog::Catalog;
use crate::locale::LocaleCode;

/// Key differences between a catalog and the reference catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CatalogDiff {
    /// Locale that was checked.
    pub locale: Option<LocaleCode>,
    /// Keys present in the reference but absent here (served via fallback).
    pub missing: Vec<String>,
    /// Keys present here but unknown to the reference.
    pub extra: Vec<String>,
}

impl CatalogDiff {
    /// Whether the checked catalog covers every reference key.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Compare `candidate` leaf keys with `reference` leaf keys.
#[must_use]
pub fn compare_catalogs(reference: &Catalog, candidate: &Catalog) -> CatalogDiff {
    let expected: BTreeSet<String> = reference.leaf_keys().into_iter().collect();
    let present: BTreeSet<String> = candidate.leaf_keys().into_iter().collect();
    CatalogDiff {
        locale: Some(candidate.locale()),
        missing: expected.difference(&present).cloned().collect(),
        extra: present.difference(&expected).cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::CatalogSource;

    #[test]
    fn diff_reports_missing_and_extra_keys() {
        let en = Catalog::parse(LocaleCode::En, r#"{"a":"A","b":{"c":"C"}}"#).expect("en");
        let es = Catalog::parse(LocaleCode::Es, r#"{"a":"A","d":"D"}"#).expect("es");
        let diff = compare_catalogs(&en, &es);
        assert_eq!(diff.locale, Some(LocaleCode::Es));
        assert_eq!(diff.missing, vec!["b.c".to_string()]);
        assert_eq!(diff.extra, vec!["d".to_string()]);
        assert!(!diff.is_complete());
    }

    #[tokio::test]
    async fn shipped_spanish_catalog_is_complete() {
        let en = CatalogSource::Embedded
            .load(LocaleCode::En)
            .await
            .expect("en");
        let es = CatalogSource::Embedded
            .load(LocaleCode::Es)
            .await
            .expect("es");
        let diff = compare_catalogs(&en, &es);
        assert!(diff.is_complete(), "missing keys: {:?}", diff.missing);
        assert!(diff.extra.is_empty(), "extra keys: {:?}", diff.extra);
    }
}
