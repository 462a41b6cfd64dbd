//! Page metadata and schema.org structured data.

use orthosite_i18n::{LocaleCode, ROUTING};
use serde_json::{Value, json};

use crate::blog::Post;
use crate::organization::Organization;

/// `x-default` hreflang value.
pub const X_DEFAULT: &str = "x-default";

/// One `<link rel="alternate" hreflang>` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alternate {
    /// BCP 47 language code or `x-default`.
    pub hreflang: &'static str,
    /// Absolute URL of the alternate page.
    pub href: String,
}

/// Head metadata for a rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMetadata {
    /// Document title including the site name.
    pub title: String,
    /// Meta description.
    pub description: String,
    /// Canonical absolute URL.
    pub canonical: String,
    /// Alternates for every locale plus `x-default`.
    pub alternates: Vec<Alternate>,
    /// Open Graph locale of the page.
    pub og_locale: &'static str,
    /// Open Graph locales of the alternates.
    pub og_alternate_locales: Vec<&'static str>,
    /// Open Graph object type.
    pub og_type: &'static str,
    /// Site name for Open Graph.
    pub site_name: String,
}

impl PageMetadata {
    /// Mark the page as an article.
    #[must_use]
    pub fn article(mut self) -> Self {
        self.og_type = "article";
        self
    }
}

/// Absolute URLs of `route` in every locale, with `x-default` pointing at
/// the default locale.
#[must_use]
pub fn alternates(base_url: &str, route: &str) -> Vec<Alternate> {
    let mut links: Vec<Alternate> = ROUTING
        .locales
        .iter()
        .map(|locale| Alternate {
            hreflang: locale.code(),
            href: absolute(base_url, &ROUTING.href(*locale, route)),
        })
        .collect();
    links.push(Alternate {
        hreflang: X_DEFAULT,
        href: absolute(base_url, &ROUTING.href(ROUTING.default_locale, route)),
    });
    links
}

/// Build head metadata for `route` rendered in `locale`.
#[must_use]
pub fn page_metadata(
    base_url: &str,
    locale: LocaleCode,
    route: &str,
    title: &str,
    description: &str,
    site_name: &str,
) -> PageMetadata {
    let title = if title == site_name {
        title.to_string()
    } else {
        format!("{title} | {site_name}")
    };
    PageMetadata {
        title,
        description: description.to_string(),
        canonical: absolute(base_url, &ROUTING.href(locale, route)),
        alternates: alternates(base_url, route),
        og_locale: locale.og_locale(),
        og_alternate_locales: ROUTING
            .locales
            .iter()
            .filter(|other| **other != locale)
            .map(|other| other.og_locale())
            .collect(),
        og_type: "website",
        site_name: site_name.to_string(),
    }
}

/// schema.org `Organization` for the clinic.
#[must_use]
pub fn organization_schema(org: &Organization, base_url: &str) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "Organization",
        "name": org.name,
        "url": base_url,
        "logo": absolute(base_url, org.logo_path),
        "telephone": org.phone,
        "email": org.email,
        "foundingDate": org.founded.to_string(),
        "address": postal_address(org),
        "sameAs": org.social.iter().map(|link| link.url).collect::<Vec<_>>(),
    })
}

/// schema.org `MedicalBusiness` describing the clinic in `locale`.
#[must_use]
pub fn medical_business_schema(
    org: &Organization,
    base_url: &str,
    locale: LocaleCode,
    service_names: &[String],
) -> Value {
    let hours: Vec<Value> = org
        .hours
        .iter()
        .map(|window| {
            json!({
                "@type": "OpeningHoursSpecification",
                "dayOfWeek": window.days,
                "opens": window.opens,
                "closes": window.closes,
            })
        })
        .collect();
    let services: Vec<Value> = service_names
        .iter()
        .map(|name| json!({ "@type": "MedicalTherapy", "name": name }))
        .collect();
    json!({
        "@context": "https://schema.org",
        "@type": "MedicalBusiness",
        "name": org.name,
        "url": absolute(base_url, &ROUTING.href(locale, "/")),
        "inLanguage": locale.code(),
        "telephone": org.phone,
        "email": org.email,
        "address": postal_address(org),
        "openingHoursSpecification": hours,
        "availableService": services,
    })
}

/// schema.org `BreadcrumbList` from `(name, absolute url)` pairs.
#[must_use]
pub fn breadcrumb_schema(items: &[(String, String)]) -> Value {
    let elements: Vec<Value> = items
        .iter()
        .enumerate()
        .map(|(index, (name, url))| {
            json!({
                "@type": "ListItem",
                "position": index + 1,
                "name": name,
                "item": url,
            })
        })
        .collect();
    json!({
        "@context": "https://schema.org",
        "@type": "BreadcrumbList",
        "itemListElement": elements,
    })
}

/// schema.org `BlogPosting` for a post rendered in `locale`.
#[must_use]
pub fn blog_posting_schema(
    post: &Post,
    org: &Organization,
    base_url: &str,
    locale: LocaleCode,
    headline: &str,
    description: &str,
) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "BlogPosting",
        "headline": headline,
        "description": description,
        "inLanguage": locale.code(),
        "datePublished": post.published.format("%Y-%m-%d").to_string(),
        "image": absolute(base_url, post.image),
        "mainEntityOfPage": absolute(base_url, &ROUTING.href(locale, &post.route())),
        "author": { "@type": "Person", "name": post.author },
        "publisher": {
            "@type": "Organization",
            "name": org.name,
            "logo": { "@type": "ImageObject", "url": absolute(base_url, org.logo_path) },
        },
    })
}

/// Serialize JSON-LD for embedding in a `<script>` element.
#[must_use]
pub fn script_json(value: &Value) -> String {
    value
        .to_string()
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}

fn postal_address(org: &Organization) -> Value {
    json!({
        "@type": "PostalAddress",
        "streetAddress": org.address.street,
        "addressLocality": org.address.locality,
        "addressRegion": org.address.region,
        "postalCode": org.address.postal_code,
        "addressCountry": org.address.country,
    })
}

pub(crate) fn absolute(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blog::find_post;
    use crate::organization::organization;

    const BASE: &str = "https://cascade-po.example";

    #[test]
    fn metadata_links_every_locale_and_x_default() {
        let meta = page_metadata(
            BASE,
            LocaleCode::Es,
            "/about",
            "Sobre nosotros",
            "Conozca al equipo",
            "Cascade",
        );
        assert_eq!(meta.title, "Sobre nosotros | Cascade");
        assert_eq!(meta.canonical, "https://cascade-po.example/es/about");
        assert_eq!(meta.og_locale, "es_US");
        assert_eq!(meta.og_alternate_locales, vec!["en_US"]);
        assert_eq!(meta.og_type, "website");
        let pairs: Vec<(&str, &str)> = meta
            .alternates
            .iter()
            .map(|alt| (alt.hreflang, alt.href.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("en", "https://cascade-po.example/en/about"),
                ("es", "https://cascade-po.example/es/about"),
                ("x-default", "https://cascade-po.example/en/about"),
            ]
        );
    }

    #[test]
    fn home_title_is_not_duplicated() {
        let meta = page_metadata(BASE, LocaleCode::En, "/", "Cascade", "d", "Cascade");
        assert_eq!(meta.title, "Cascade");
        assert_eq!(meta.canonical, "https://cascade-po.example/en");
        assert_eq!(meta.article().og_type, "article");
    }

    #[test]
    fn organization_schema_carries_contact_details() {
        let schema = organization_schema(organization(), BASE);
        assert_eq!(schema["@type"], "Organization");
        assert_eq!(schema["address"]["postalCode"], "97209");
        assert_eq!(schema["sameAs"].as_array().map(Vec::len), Some(3));
    }

    #[test]
    fn medical_business_lists_hours_and_services() {
        let schema = medical_business_schema(
            organization(),
            BASE,
            LocaleCode::Es,
            &["Prótesis".to_string(), "Órtesis".to_string()],
        );
        assert_eq!(schema["url"], "https://cascade-po.example/es");
        assert_eq!(schema["inLanguage"], "es");
        assert_eq!(schema["openingHoursSpecification"][0]["opens"], "08:00");
        assert_eq!(schema["availableService"][1]["name"], "Órtesis");
    }

    #[test]
    fn breadcrumb_positions_start_at_one() {
        let schema = breadcrumb_schema(&[
            ("Home".to_string(), format!("{BASE}/en")),
            ("Blog".to_string(), format!("{BASE}/en/blog")),
        ]);
        assert_eq!(schema["itemListElement"][0]["position"], 1);
        assert_eq!(schema["itemListElement"][1]["position"], 2);
        assert_eq!(schema["itemListElement"][1]["name"], "Blog");
    }

    #[test]
    fn blog_posting_uses_localized_url() {
        let Some(post) = find_post("caring-for-your-brace") else {
            panic!("sample post missing");
        };
        let schema = blog_posting_schema(post, organization(), BASE, LocaleCode::Es, "h", "d");
        assert_eq!(schema["datePublished"], "2024-07-03");
        assert_eq!(
            schema["mainEntityOfPage"],
            "https://cascade-po.example/es/blog/caring-for-your-brace"
        );
    }

    #[test]
    fn script_json_cannot_close_the_script_element() {
        let value = json!({ "name": "</script><b>&" });
        let rendered = script_json(&value);
        assert!(!rendered.contains("</script>"));
        assert!(rendered.contains("\\u003c/script\\u003e"));
    }
}
