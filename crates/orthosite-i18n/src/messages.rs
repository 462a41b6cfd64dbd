//! Translation lookup handed to page rendering.

use std::sync::Arc;

use serde_json::Value;

use crate::catalog::Catalog;
use crate::locale::LocaleCode;
use crate::policy::MissingMessagePolicy;

/// Translator bound to one locale, with the default catalog as fallback.
///
/// Lookup order is active catalog, then fallback catalog, then the policy
/// placeholder. Lookups never fail.
#[derive(Clone, Debug)]
pub struct Messages {
    primary: Arc<Catalog>,
    fallback: Option<Arc<Catalog>>,
    policy: Arc<MissingMessagePolicy>,
}

impl Messages {
    /// Bind a translator. `fallback` is ignored when it is the same locale.
    #[must_use]
    pub fn new(
        primary: Arc<Catalog>,
        fallback: Option<Arc<Catalog>>,
        policy: Arc<MissingMessagePolicy>,
    ) -> Self {
        let fallback = fallback.filter(|catalog| catalog.locale() != primary.locale());
        Self {
            primary,
            fallback,
            policy,
        }
    }

    /// Active locale.
    #[must_use]
    pub fn locale(&self) -> LocaleCode {
        self.primary.locale()
    }

    /// Locale consulted when the active catalog misses a key.
    #[must_use]
    pub fn fallback_locale(&self) -> Option<LocaleCode> {
        self.fallback.as_deref().map(Catalog::locale)
    }

    /// Whether any catalog resolves `key` to a string.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.lookup_text(key).is_some()
    }

    /// Translate `key`.
    #[must_use]
    pub fn text(&self, key: &str) -> String {
        self.lookup_text(key).map_or_else(
            || self.policy.report(self.locale(), key),
            ToString::to_string,
        )
    }

    /// Translate `key`, substituting `{name}` placeholders from `values`.
    #[must_use]
    pub fn format(&self, key: &str, values: &[(&str, &str)]) -> String {
        let Some(template) = self.lookup_text(key) else {
            return self.policy.report(self.locale(), key);
        };
        interpolate(template, values)
    }

    /// Entire sub-tree under `key` (lists of cards, link groups).
    ///
    /// Falls back to the default catalog as a whole node; nodes are not merged.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&Value> {
        let found = self
            .primary
            .lookup(key)
            .or_else(|| self.fallback.as_deref().and_then(|catalog| catalog.lookup(key)));
        if found.is_none() {
            self.policy.report(self.locale(), key);
        }
        found
    }

    fn lookup_text(&self, key: &str) -> Option<&str> {
        self.primary
            .text(key)
            .or_else(|| self.fallback.as_deref().and_then(|catalog| catalog.text(key)))
    }
}

fn interpolate(template: &str, values: &[(&str, &str)]) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        output.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let name = &after[..close];
                match values.iter().find(|(candidate, _)| *candidate == name) {
                    Some((_, value)) => output.push_str(value),
                    None => {
                        output.push('{');
                        output.push_str(name);
                        output.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                output.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    output.push_str(rest);
    output
}
