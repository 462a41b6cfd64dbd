//! XML sitemap with hreflang alternates.

use std::fmt::Write as _;

use orthosite_i18n::{LocaleCode, ROUTING};

use crate::seo::{absolute, alternates};

/// Render `sitemap.xml` with one `<url>` per `(locale, route)` target.
#[must_use]
pub fn sitemap_xml<I, R>(base_url: &str, targets: I) -> String
where
    I: IntoIterator<Item = (LocaleCode, R)>,
    R: AsRef<str>,
{
    let mut xml = String::from(concat!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
        "<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\" ",
        "xmlns:xhtml=\"http://www.w3.org/1999/xhtml\">\n",
    ));
    for (locale, route) in targets {
        let route = route.as_ref();
        let loc = absolute(base_url, &ROUTING.href(locale, route));
        xml.push_str("  <url>\n");
        // Writing into a String cannot fail.
        let _ = writeln!(xml, "    <loc>{}</loc>", html_escape::encode_text(&loc));
        for alternate in alternates(base_url, route) {
            let _ = writeln!(
                xml,
                "    <xhtml:link rel=\"alternate\" hreflang=\"{}\" href=\"{}\"/>",
                alternate.hreflang,
                html_escape::encode_double_quoted_attribute(&alternate.href)
            );
        }
        xml.push_str("  </url>\n");
    }
    xml.push_str("</urlset>\n");
    xml
}
