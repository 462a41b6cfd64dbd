//! Handling for translation keys that no catalog can resolve.
//!
//! # Design
//! - One policy object is injected into the message store; nothing patches
//!   global hooks.
//! - Each missing key is logged once per process, whichever locale missed it
//!   first. The dedup set is bounded; once full, further misses are counted
//!   but no longer logged. The observer still sees the locale of every miss.
//! - Lookup always yields a string; a missing key never fails a render.

use std::collections::HashSet;
use std::fmt::{self, Debug, Formatter};
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tracing::warn;

use crate::locale::LocaleCode;

/// Default bound on distinct missing keys remembered for deduplication.
pub const DEFAULT_REPORT_CAPACITY: usize = 1024;

/// Callback invoked for every miss, including deduplicated ones.
pub type MissingMessageObserver = Arc<dyn Fn(LocaleCode, &str) + Send + Sync>;

/// What to render in place of a missing message.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Placeholder {
    /// Last dotted segment of the key (`about.title` → `title`).
    #[default]
    LastSegment,
    /// The full key.
    Key,
    /// An empty string.
    Empty,
}

impl Placeholder {
    /// Render the placeholder for `key`.
    #[must_use]
    pub fn render(self, key: &str) -> String {
        match self {
            Self::LastSegment => key.rsplit('.').next().unwrap_or(key).to_string(),
            Self::Key => key.to_string(),
            Self::Empty => String::new(),
        }
    }

    /// Configuration spelling of the placeholder.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LastSegment => "segment",
            Self::Key => "key",
            Self::Empty => "empty",
        }
    }
}

impl FromStr for Placeholder {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "segment" => Ok(Self::LastSegment),
            "key" => Ok(Self::Key),
            "empty" => Ok(Self::Empty),
            other => Err(format!("unknown placeholder '{other}'")),
        }
    }
}

/// Injectable missing-message policy shared by every translator.
pub struct MissingMessagePolicy {
    placeholder: Placeholder,
    capacity: usize,
    reported: Mutex<HashSet<String>>,
    misses: AtomicU64,
    observer: Option<MissingMessageObserver>,
}

impl Default for MissingMessagePolicy {
    fn default() -> Self {
        Self::new(Placeholder::default())
    }
}

impl Debug for MissingMessagePolicy {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("MissingMessagePolicy")
            .field("placeholder", &self.placeholder)
            .field("capacity", &self.capacity)
            .field("misses", &self.misses.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl MissingMessagePolicy {
    /// Policy rendering `placeholder` with the default dedup capacity.
    #[must_use]
    pub fn new(placeholder: Placeholder) -> Self {
        Self {
            placeholder,
            capacity: DEFAULT_REPORT_CAPACITY,
            reported: Mutex::new(HashSet::new()),
            misses: AtomicU64::new(0),
            observer: None,
        }
    }

    /// Override the dedup capacity.
    #[must_use]
    pub const fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Attach an observer notified on every miss.
    #[must_use]
    pub fn with_observer(mut self, observer: MissingMessageObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Placeholder rendered for missing keys.
    #[must_use]
    pub const fn placeholder(&self) -> Placeholder {
        self.placeholder
    }

    /// Total misses seen by this policy.
    #[must_use]
    pub fn miss_count(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Record a miss and return the placeholder text.
    pub fn report(&self, locale: LocaleCode, key: &str) -> String {
        self.misses.fetch_add(1, Ordering::Relaxed);
        if let Some(observer) = &self.observer {
            observer(locale, key);
        }
        if self.remember(key) {
            warn!(
                locale = locale.code(),
                key,
                placeholder = self.placeholder.as_str(),
                "missing message"
            );
        }
        self.placeholder.render(key)
    }

    /// Returns true when the key is new and was stored.
    fn remember(&self, key: &str) -> bool {
        let mut reported = match self.reported.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if reported.contains(key) || reported.len() >= self.capacity {
            return false;
        }
        reported.insert(key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_render_from_key() {
        assert_eq!(Placeholder::LastSegment.render("about.hero.title"), "title");
        assert_eq!(Placeholder::LastSegment.render("plain"), "plain");
        assert_eq!(Placeholder::Key.render("about.title"), "about.title");
        assert_eq!(Placeholder::Empty.render("about.title"), "");
    }

    #[test]
    fn placeholder_parses_config_spelling() {
        for placeholder in [Placeholder::LastSegment, Placeholder::Key, Placeholder::Empty] {
            assert_eq!(placeholder.as_str().parse::<Placeholder>(), Ok(placeholder));
        }
        assert!("loud".parse::<Placeholder>().is_err());
    }

    #[test]
    fn each_key_is_remembered_once_across_locales() {
        let policy = MissingMessagePolicy::default();
        assert!(policy.remember("about.title"));
        assert!(!policy.remember("about.title"));
        assert_eq!(policy.report(LocaleCode::En, "about.title"), "title");
        assert_eq!(policy.report(LocaleCode::Es, "about.title"), "title");
        assert!(policy.remember("about.intro"));
    }

    #[test]
    fn dedup_set_is_bounded() {
        let policy = MissingMessagePolicy::default().with_capacity(2);
        assert!(policy.remember("a"));
        assert!(policy.remember("b"));
        assert!(!policy.remember("c"));
        assert_eq!(policy.report(LocaleCode::En, "x.c"), "c");
        assert_eq!(policy.miss_count(), 1);
    }

    #[test]
    fn observer_sees_every_miss() {
        let seen = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&seen);
        let policy = MissingMessagePolicy::new(Placeholder::Empty).with_observer(Arc::new(
            move |_locale: LocaleCode, _key: &str| {
                counter.fetch_add(1, Ordering::Relaxed);
            },
        ));
        assert_eq!(policy.report(LocaleCode::Es, "nav.home"), "");
        assert_eq!(policy.report(LocaleCode::Es, "nav.home"), "");
        assert_eq!(seen.load(Ordering::Relaxed), 2);
        assert_eq!(policy.miss_count(), 2);
    }
}
