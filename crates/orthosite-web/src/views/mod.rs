//! Server-rendered HTML. Every dynamic string goes through `esc` or `attr`.

mod pages;
mod shell;

use std::borrow::Cow;

use orthosite_content::PageMetadata;
use orthosite_i18n::Messages;
use serde_json::Value;

pub(crate) use pages::{
    about, blog_index, blog_post, contact, contact_success, home, not_found, services,
};
pub(crate) use shell::render_document;

/// A page ready to be wrapped in the site shell.
pub(crate) struct Document {
    /// Route below the locale, used for navigation state and the language switcher.
    pub(crate) route: String,
    pub(crate) meta: PageMetadata,
    pub(crate) json_ld: Vec<Value>,
    pub(crate) noindex: bool,
    pub(crate) body: String,
}

pub(crate) fn esc(text: &str) -> Cow<'_, str> {
    html_escape::encode_text(text)
}

pub(crate) fn attr(text: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(text)
}

/// `{title, body}` cards stored as a catalog array.
pub(crate) fn cards(messages: &Messages, key: &str) -> Vec<(String, String)> {
    messages
        .raw(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| {
                    let title = item.get("title")?.as_str()?;
                    let body = item.get("body")?.as_str()?;
                    Some((title.to_string(), body.to_string()))
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Not-found page used when no catalog is available.
pub(crate) fn static_not_found() -> String {
    static_page(
        "Page not found · Página no encontrada",
        "<h1>Page not found</h1><p lang=\"es\">Página no encontrada</p><p><a href=\"/en\">Home</a> · <a href=\"/es\" lang=\"es\">Inicio</a></p>",
    )
}

/// Generic failure page; never includes error detail.
pub(crate) fn static_internal_error() -> String {
    static_page(
        "Something went wrong · Algo salió mal",
        "<h1>Something went wrong</h1><p lang=\"es\">Algo salió mal</p><p><a href=\"/en\">Home</a> · <a href=\"/es\" lang=\"es\">Inicio</a></p>",
    )
}

fn static_page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"robots\" content=\"noindex\">\n<title>{title}</title>\n\
         <link rel=\"stylesheet\" href=\"/_assets/site.css\">\n</head>\n\
         <body>\n<main id=\"main\" class=\"error-page\">{body}</main>\n</body>\n</html>\n"
    )
}
