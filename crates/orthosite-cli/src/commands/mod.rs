//! Command handlers grouped by concern.

pub(crate) mod export;
pub(crate) mod targets;
pub(crate) mod translations;
