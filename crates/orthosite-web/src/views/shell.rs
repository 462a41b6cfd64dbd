//! Document shell: head metadata, header navigation, language switcher, footer.

use chrono::Datelike;
use orthosite_content::{organization, script_json};

use super::{Document, attr, esc};
use crate::http::constants::STYLESHEET_PATH;
use crate::http::layout::RenderContext;

const NAV_ITEMS: [(&str, &str); 5] = [
    ("/", "nav.home"),
    ("/about", "nav.about"),
    ("/services", "nav.services"),
    ("/blog", "nav.blog"),
    ("/contact", "nav.contact"),
];

/// Wrap a page body in the full HTML document.
pub(crate) fn render_document(ctx: &RenderContext, doc: &Document) -> String {
    let mut html = String::with_capacity(doc.body.len() + 4096);
    html.push_str(&format!(
        "<!DOCTYPE html>\n<html lang=\"{}\">\n<head>\n",
        ctx.locale.code()
    ));
    push_head(&mut html, doc);
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!(
        "<a class=\"skip-link\" href=\"#main\">{}</a>\n",
        esc(&ctx.messages.text("meta.skipToContent"))
    ));
    push_header(&mut html, ctx, &doc.route);
    html.push_str("<main id=\"main\">\n");
    html.push_str(&doc.body);
    html.push_str("</main>\n");
    push_footer(&mut html, ctx);
    html.push_str("</body>\n</html>\n");
    html
}

fn push_head(html: &mut String, doc: &Document) {
    let meta = &doc.meta;
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>{}</title>\n", esc(&meta.title)));
    html.push_str(&format!(
        "<meta name=\"description\" content=\"{}\">\n",
        attr(&meta.description)
    ));
    if doc.noindex {
        html.push_str("<meta name=\"robots\" content=\"noindex\">\n");
    } else {
        html.push_str(&format!(
            "<link rel=\"canonical\" href=\"{}\">\n",
            attr(&meta.canonical)
        ));
        for alternate in &meta.alternates {
            html.push_str(&format!(
                "<link rel=\"alternate\" hreflang=\"{}\" href=\"{}\">\n",
                alternate.hreflang,
                attr(&alternate.href)
            ));
        }
    }
    for (property, value) in [
        ("og:title", meta.title.as_str()),
        ("og:description", meta.description.as_str()),
        ("og:url", meta.canonical.as_str()),
        ("og:type", meta.og_type),
        ("og:site_name", meta.site_name.as_str()),
        ("og:locale", meta.og_locale),
    ] {
        html.push_str(&format!(
            "<meta property=\"{property}\" content=\"{}\">\n",
            attr(value)
        ));
    }
    for locale in &meta.og_alternate_locales {
        html.push_str(&format!(
            "<meta property=\"og:locale:alternate\" content=\"{locale}\">\n"
        ));
    }
    html.push_str(&format!(
        "<link rel=\"stylesheet\" href=\"{STYLESHEET_PATH}\">\n"
    ));
    for schema in &doc.json_ld {
        html.push_str(&format!(
            "<script type=\"application/ld+json\">{}</script>\n",
            script_json(schema)
        ));
    }
}

fn is_active(item: &str, current: &str) -> bool {
    if item == "/" {
        current == "/"
    } else {
        current == item || current.starts_with(&format!("{item}/"))
    }
}

fn push_header(html: &mut String, ctx: &RenderContext, route: &str) {
    let messages = &ctx.messages;
    html.push_str("<header class=\"site-header\">\n");
    html.push_str(&format!(
        "<a class=\"brand\" href=\"{}\">{}</a>\n",
        attr(&ctx.routing.href(ctx.locale, "/")),
        esc(&messages.text("meta.siteName"))
    ));
    html.push_str(&format!(
        "<nav class=\"primary\" aria-label=\"{}\">\n<ul>\n",
        attr(&messages.text("nav.menu"))
    ));
    for (item, key) in NAV_ITEMS {
        let current = if is_active(item, route) {
            " aria-current=\"page\""
        } else {
            ""
        };
        html.push_str(&format!(
            "<li><a href=\"{}\"{current}>{}</a></li>\n",
            attr(&ctx.routing.href(ctx.locale, item)),
            esc(&messages.text(key))
        ));
    }
    html.push_str("</ul>\n</nav>\n");
    html.push_str(&format!(
        "<a class=\"button cta\" href=\"{}\">{}</a>\n",
        attr(&ctx.routing.href(ctx.locale, "/contact")),
        esc(&messages.text("nav.cta"))
    ));
    html.push_str(&format!(
        "<nav class=\"language\" aria-label=\"{}\">\n<ul>\n",
        attr(&messages.text("nav.language"))
    ));
    for locale in ctx.routing.locales {
        let current = if *locale == ctx.locale {
            " aria-current=\"true\""
        } else {
            ""
        };
        html.push_str(&format!(
            "<li><a href=\"{}\" hreflang=\"{code}\" lang=\"{code}\"{current}>{}</a></li>\n",
            attr(&ctx.routing.href(*locale, route)),
            esc(locale.label()),
            code = locale.code(),
        ));
    }
    html.push_str("</ul>\n</nav>\n</header>\n");
}

fn push_footer(html: &mut String, ctx: &RenderContext) {
    let messages = &ctx.messages;
    let org = organization();
    html.push_str("<footer class=\"site-footer\">\n");
    html.push_str(&format!(
        "<p class=\"tagline\">{}</p>\n",
        esc(&messages.text("footer.tagline"))
    ));

    html.push_str(&format!(
        "<section>\n<h2>{}</h2>\n<address>\n",
        esc(&messages.text("footer.contactHeading"))
    ));
    html.push_str(&format!(
        "<a href=\"{}\">{}</a><br>\n<a href=\"mailto:{}\">{}</a><br>\n{}\n",
        attr(&org.phone_uri()),
        esc(org.phone),
        attr(org.email),
        esc(org.email),
        esc(&org.address.one_line())
    ));
    html.push_str("</address>\n</section>\n");

    html.push_str(&format!(
        "<section>\n<h2>{}</h2>\n<ul class=\"hours\">\n",
        esc(&messages.text("footer.hoursHeading"))
    ));
    for window in org.hours {
        html.push_str(&format!(
            "<li>{}</li>\n",
            esc(&messages.text(window.label_key))
        ));
    }
    html.push_str(&format!(
        "<li>{}</li>\n</ul>\n</section>\n",
        esc(&messages.text(org.closed_key))
    ));

    html.push_str(&format!(
        "<section>\n<h2>{}</h2>\n<ul class=\"social\">\n",
        esc(&messages.text("footer.followUs"))
    ));
    for link in org.social {
        html.push_str(&format!(
            "<li><a href=\"{}\" rel=\"noopener\">{}</a></li>\n",
            attr(link.url),
            esc(link.network)
        ));
    }
    html.push_str("</ul>\n</section>\n");

    let year = chrono::Utc::now().year().to_string();
    html.push_str(&format!(
        "<p class=\"rights\">{}</p>\n</footer>\n",
        esc(&messages.format(
            "footer.rights",
            &[("year", year.as_str()), ("name", org.name)]
        ))
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nav_state_matches_sections() {
        assert!(is_active("/", "/"));
        assert!(!is_active("/", "/about"));
        assert!(is_active("/blog", "/blog"));
        assert!(is_active("/blog", "/blog/running-blades-explained"));
        assert!(!is_active("/blog", "/blogroll"));
    }
}
