//! Page bodies. Each function returns a `Document` for the shell.

use orthosite_content::{
    ContactField, ContactSubmission, FieldError, Page, Post, blog_posting_schema,
    breadcrumb_schema, medical_business_schema, organization, organization_schema, page_metadata,
    services as service_list,
};
use orthosite_i18n::Messages;
use serde_json::Value;

use super::{Document, attr, cards, esc};
use crate::http::constants::BLOG_PAGE_QUERY;
use crate::http::layout::RenderContext;

fn document(
    ctx: &RenderContext,
    base_url: &str,
    route: &str,
    title_key: &str,
    description_key: &str,
) -> Document {
    let messages = &ctx.messages;
    Document {
        route: route.to_string(),
        meta: page_metadata(
            base_url,
            ctx.locale,
            route,
            &messages.text(title_key),
            &messages.text(description_key),
            &messages.text("meta.siteName"),
        ),
        json_ld: Vec::new(),
        noindex: false,
        body: String::new(),
    }
}

fn href(ctx: &RenderContext, route: &str) -> String {
    ctx.routing.href(ctx.locale, route)
}

fn crumbs(ctx: &RenderContext, base_url: &str, trail: &[(String, &str)]) -> Value {
    let mut items = vec![(
        ctx.messages.text("breadcrumbs.home"),
        format!("{base_url}{}", href(ctx, "/")),
    )];
    items.extend(
        trail
            .iter()
            .map(|(name, route)| (name.clone(), format!("{base_url}{}", href(ctx, route)))),
    );
    breadcrumb_schema(&items)
}

fn localized_service_names(messages: &Messages) -> Vec<String> {
    service_list()
        .iter()
        .map(|service| messages.text(&service.title_key()))
        .collect()
}

fn push_cards(body: &mut String, items: &[(String, String)]) {
    body.push_str("<ul class=\"cards\">\n");
    for (title, text) in items {
        body.push_str(&format!(
            "<li><h3>{}</h3><p>{}</p></li>\n",
            esc(title),
            esc(text)
        ));
    }
    body.push_str("</ul>\n");
}

pub(crate) fn home(ctx: &RenderContext, base_url: &str) -> Document {
    let m = &ctx.messages;
    let mut doc = document(ctx, base_url, "/", "home.title", "home.description");
    doc.json_ld = vec![
        organization_schema(organization(), base_url),
        medical_business_schema(
            organization(),
            base_url,
            ctx.locale,
            &localized_service_names(m),
        ),
    ];

    let body = &mut doc.body;
    body.push_str(&format!(
        "<section class=\"hero\">\n<h1>{}</h1>\n<p>{}</p>\n<a class=\"button\" href=\"{}\">{}</a>\n</section>\n",
        esc(&m.text("home.hero.heading")),
        esc(&m.text("home.hero.subheading")),
        attr(&href(ctx, "/contact")),
        esc(&m.text("home.hero.cta"))
    ));
    body.push_str(&format!(
        "<section class=\"features\">\n<h2>{}</h2>\n",
        esc(&m.text("home.featuresHeading"))
    ));
    push_cards(body, &cards(m, "home.features"));
    body.push_str("</section>\n");

    body.push_str(&format!(
        "<section class=\"services-teaser\">\n<h2>{}</h2>\n<ul class=\"cards\">\n",
        esc(&m.text("home.servicesHeading"))
    ));
    for service in service_list() {
        body.push_str(&format!(
            "<li class=\"icon-{}\"><h3><a href=\"{}#{}\">{}</a></h3><p>{}</p></li>\n",
            service.icon,
            attr(&href(ctx, "/services")),
            service.slug,
            esc(&m.text(&service.title_key())),
            esc(&m.text(&service.summary_key()))
        ));
    }
    body.push_str("</ul>\n</section>\n");
    body.push_str(&format!(
        "<figure class=\"testimonial\">\n<blockquote><p>{}</p></blockquote>\n<figcaption>{}</figcaption>\n</figure>\n",
        esc(&m.text("home.testimonial.quote")),
        esc(&m.text("home.testimonial.author"))
    ));
    doc
}

pub(crate) fn about(ctx: &RenderContext, base_url: &str) -> Document {
    let m = &ctx.messages;
    let mut doc = document(ctx, base_url, "/about", "about.title", "about.description");
    doc.json_ld = vec![crumbs(ctx, base_url, &[(m.text("nav.about"), "/about")])];

    let body = &mut doc.body;
    body.push_str(&format!(
        "<h1>{}</h1>\n<p class=\"lead\">{}</p>\n",
        esc(&m.text("about.title")),
        esc(&m.text("about.intro"))
    ));
    body.push_str(&format!(
        "<section class=\"mission\">\n<h2>{}</h2>\n<p>{}</p>\n</section>\n",
        esc(&m.text("about.mission.heading")),
        esc(&m.text("about.mission.body"))
    ));
    body.push_str(&format!(
        "<section class=\"values\">\n<h2>{}</h2>\n",
        esc(&m.text("about.valuesHeading"))
    ));
    push_cards(body, &cards(m, "about.values"));
    body.push_str("</section>\n");
    body.push_str(&format!(
        "<section class=\"team\">\n<h2>{}</h2>\n<p>{}</p>\n</section>\n",
        esc(&m.text("about.team.heading")),
        esc(&m.text("about.team.body"))
    ));
    doc
}

pub(crate) fn services(ctx: &RenderContext, base_url: &str) -> Document {
    let m = &ctx.messages;
    let mut doc = document(
        ctx,
        base_url,
        "/services",
        "services.title",
        "services.description",
    );
    doc.json_ld = vec![
        medical_business_schema(
            organization(),
            base_url,
            ctx.locale,
            &localized_service_names(m),
        ),
        crumbs(ctx, base_url, &[(m.text("nav.services"), "/services")]),
    ];

    let body = &mut doc.body;
    body.push_str(&format!(
        "<h1>{}</h1>\n<p class=\"lead\">{}</p>\n<div class=\"service-list\">\n",
        esc(&m.text("services.title")),
        esc(&m.text("services.intro"))
    ));
    for service in service_list() {
        body.push_str(&format!(
            "<article id=\"{slug}\" class=\"service icon-{}\">\n<h2>{}</h2>\n<p>{}</p>\n\
             <a href=\"{}?service={slug}\">{}</a>\n</article>\n",
            service.icon,
            esc(&m.text(&service.title_key())),
            esc(&m.text(&service.summary_key())),
            attr(&href(ctx, "/contact")),
            esc(&m.text("services.learnMore")),
            slug = service.slug,
        ));
    }
    body.push_str("</div>\n");
    doc
}

fn post_meta_line(m: &Messages, post: &Post) -> String {
    let date = post.published.format("%Y-%m-%d").to_string();
    let minutes = post.read_minutes.to_string();
    format!(
        "<p class=\"post-meta\"><span class=\"category\">{}</span> · <time datetime=\"{date}\">{}</time> · {}</p>\n",
        esc(&m.text(&post.category.label_key())),
        esc(&m.format("blog.publishedOn", &[("date", date.as_str())])),
        esc(&m.format("blog.readTime", &[("minutes", minutes.as_str())]))
    )
}

fn blog_page_route(number: usize) -> String {
    if number <= 1 {
        "/blog".to_string()
    } else {
        format!("/blog?{BLOG_PAGE_QUERY}={number}")
    }
}

pub(crate) fn blog_index(ctx: &RenderContext, base_url: &str, page: &Page<'_, Post>) -> Document {
    let m = &ctx.messages;
    let mut doc = document(
        ctx,
        base_url,
        &blog_page_route(page.number),
        "blog.title",
        "blog.description",
    );
    doc.route = "/blog".to_string();
    doc.json_ld = vec![crumbs(ctx, base_url, &[(m.text("nav.blog"), "/blog")])];

    let body = &mut doc.body;
    body.push_str(&format!(
        "<h1>{}</h1>\n<p class=\"lead\">{}</p>\n",
        esc(&m.text("blog.title")),
        esc(&m.text("blog.intro"))
    ));
    if page.items.is_empty() {
        body.push_str(&format!("<p class=\"empty\">{}</p>\n", esc(&m.text("blog.empty"))));
        return doc;
    }
    body.push_str("<div class=\"post-list\">\n");
    for post in page.items {
        let link = href(ctx, &post.route());
        body.push_str(&format!(
            "<article class=\"post-summary\">\n<h2><a href=\"{}\">{}</a></h2>\n",
            attr(&link),
            esc(&m.text(&post.title_key()))
        ));
        body.push_str(&post_meta_line(m, post));
        body.push_str(&format!(
            "<p>{}</p>\n<a class=\"read-more\" href=\"{}\">{}</a>\n</article>\n",
            esc(&m.text(&post.excerpt_key())),
            attr(&link),
            esc(&m.text("blog.readMore"))
        ));
    }
    body.push_str("</div>\n");

    if page.total_pages > 1 {
        body.push_str("<nav class=\"pagination\">\n");
        if page.has_previous() {
            body.push_str(&format!(
                "<a rel=\"prev\" href=\"{}\">{}</a>\n",
                attr(&href(ctx, &blog_page_route(page.number - 1))),
                esc(&m.text("blog.pagination.previous"))
            ));
        }
        let number = page.number.to_string();
        let total = page.total_pages.to_string();
        body.push_str(&format!(
            "<span>{}</span>\n",
            esc(&m.format(
                "blog.pagination.page",
                &[("page", number.as_str()), ("total", total.as_str())]
            ))
        ));
        if page.has_next() {
            body.push_str(&format!(
                "<a rel=\"next\" href=\"{}\">{}</a>\n",
                attr(&href(ctx, &blog_page_route(page.number + 1))),
                esc(&m.text("blog.pagination.next"))
            ));
        }
        body.push_str("</nav>\n");
    }
    doc
}

pub(crate) fn blog_post(ctx: &RenderContext, base_url: &str, post: &Post) -> Document {
    let m = &ctx.messages;
    let route = post.route();
    let title = m.text(&post.title_key());
    let excerpt = m.text(&post.excerpt_key());
    let mut doc = Document {
        route: route.clone(),
        meta: page_metadata(
            base_url,
            ctx.locale,
            &route,
            &title,
            &excerpt,
            &m.text("meta.siteName"),
        )
        .article(),
        json_ld: vec![
            blog_posting_schema(post, organization(), base_url, ctx.locale, &title, &excerpt),
            crumbs(
                ctx,
                base_url,
                &[(m.text("nav.blog"), "/blog"), (title.clone(), route.as_str())],
            ),
        ],
        noindex: false,
        body: String::new(),
    };

    let body = &mut doc.body;
    body.push_str(&format!(
        "<article class=\"post\">\n<h1>{}</h1>\n<p class=\"byline\">{}</p>\n",
        esc(&title),
        esc(&m.format("blog.by", &[("author", post.author)]))
    ));
    body.push_str(&post_meta_line(m, post));
    for paragraph in m.text(&post.body_key()).split("\n\n") {
        body.push_str(&format!("<p>{}</p>\n", esc(paragraph.trim())));
    }
    body.push_str(&format!(
        "<a class=\"back\" href=\"{}\">{}</a>\n</article>\n",
        attr(&href(ctx, "/blog")),
        esc(&m.text("blog.back"))
    ));
    doc
}

fn field_error(m: &Messages, errors: &[FieldError], field: ContactField) -> Option<String> {
    let error = errors.iter().find(|error| error.field == field)?;
    let params = error.code.params();
    let values: Vec<(&str, &str)> = params
        .iter()
        .map(|(name, value)| (*name, value.as_str()))
        .collect();
    Some(m.format(&error.code.message_key(), &values))
}

fn push_field(
    body: &mut String,
    m: &Messages,
    errors: &[FieldError],
    field: ContactField,
    control: &str,
) {
    let name = field.as_str();
    let label = m.text(&format!("contact.fields.{name}"));
    let error = field_error(m, errors, field);
    let invalid = if error.is_some() {
        format!(" aria-invalid=\"true\" aria-describedby=\"{name}-error\"")
    } else {
        String::new()
    };
    body.push_str(&format!(
        "<div class=\"field\">\n<label for=\"{name}\">{}</label>\n",
        esc(&label)
    ));
    body.push_str(&control.replace("{invalid}", &invalid));
    body.push('\n');
    if let Some(message) = error {
        body.push_str(&format!(
            "<p class=\"field-error\" id=\"{name}-error\">{}</p>\n",
            esc(&message)
        ));
    }
    body.push_str("</div>\n");
}

pub(crate) fn contact(
    ctx: &RenderContext,
    base_url: &str,
    form: &ContactSubmission,
    errors: &[FieldError],
) -> Document {
    let m = &ctx.messages;
    let mut doc = document(ctx, base_url, "/contact", "contact.title", "contact.description");
    doc.json_ld = vec![crumbs(ctx, base_url, &[(m.text("nav.contact"), "/contact")])];
    doc.noindex = !errors.is_empty();

    let body = &mut doc.body;
    body.push_str(&format!(
        "<h1>{}</h1>\n<p class=\"lead\">{}</p>\n",
        esc(&m.text("contact.title")),
        esc(&m.text("contact.intro"))
    ));
    if !errors.is_empty() {
        body.push_str(&format!(
            "<div class=\"error-summary\" role=\"alert\">{}</div>\n",
            esc(&m.text("contact.errorSummary"))
        ));
    }
    body.push_str(&format!(
        "<form class=\"contact-form\" method=\"post\" action=\"{}\" novalidate>\n",
        attr(&href(ctx, "/contact"))
    ));

    push_field(
        body,
        m,
        errors,
        ContactField::Name,
        &format!(
            "<input id=\"name\" name=\"name\" type=\"text\" autocomplete=\"name\" required value=\"{}\"{{invalid}}>",
            attr(&form.name)
        ),
    );
    push_field(
        body,
        m,
        errors,
        ContactField::Email,
        &format!(
            "<input id=\"email\" name=\"email\" type=\"email\" autocomplete=\"email\" required value=\"{}\"{{invalid}}>",
            attr(&form.email)
        ),
    );
    push_field(
        body,
        m,
        errors,
        ContactField::Phone,
        &format!(
            "<input id=\"phone\" name=\"phone\" type=\"tel\" autocomplete=\"tel\" value=\"{}\"{{invalid}}>",
            attr(&form.phone)
        ),
    );

    let mut options = format!(
        "<option value=\"\">{}</option>",
        esc(&m.text("contact.fields.serviceNone"))
    );
    for service in service_list() {
        let selected = if form.service == service.slug {
            " selected"
        } else {
            ""
        };
        options.push_str(&format!(
            "<option value=\"{}\"{selected}>{}</option>",
            service.slug,
            esc(&m.text(&service.title_key()))
        ));
    }
    push_field(
        body,
        m,
        errors,
        ContactField::Service,
        &format!("<select id=\"service\" name=\"service\"{{invalid}}>{options}</select>"),
    );
    push_field(
        body,
        m,
        errors,
        ContactField::Message,
        &format!(
            "<textarea id=\"message\" name=\"message\" rows=\"6\" required{{invalid}}>{}</textarea>",
            esc(&form.message)
        ),
    );
    let checked = if form.has_consent() { " checked" } else { "" };
    push_field(
        body,
        m,
        errors,
        ContactField::Consent,
        &format!(
            "<input id=\"consent\" name=\"consent\" type=\"checkbox\" value=\"on\"{checked}{{invalid}}>"
        ),
    );
    body.push_str(&format!(
        "<button type=\"submit\" class=\"button\">{}</button>\n</form>\n",
        esc(&m.text("contact.submit"))
    ));

    let org = organization();
    body.push_str(&format!(
        "<aside class=\"contact-details\">\n<h2>{}</h2>\n<dl>\n\
         <dt>{}</dt><dd><a href=\"{}\">{}</a></dd>\n\
         <dt>{}</dt><dd><a href=\"mailto:{}\">{}</a></dd>\n\
         <dt>{}</dt><dd>{}</dd>\n<dt>{}</dt><dd>",
        esc(&m.text("contact.details.heading")),
        esc(&m.text("contact.details.phone")),
        attr(&org.phone_uri()),
        esc(org.phone),
        esc(&m.text("contact.details.email")),
        attr(org.email),
        esc(org.email),
        esc(&m.text("contact.details.address")),
        esc(&org.address.one_line()),
        esc(&m.text("contact.details.hours")),
    ));
    let hours: Vec<String> = org
        .hours
        .iter()
        .map(|window| esc(&m.text(window.label_key)).into_owned())
        .collect();
    body.push_str(&hours.join("<br>"));
    body.push_str("</dd>\n</dl>\n</aside>\n");
    doc
}

pub(crate) fn contact_success(
    ctx: &RenderContext,
    base_url: &str,
    name: &str,
    reference: &str,
) -> Document {
    let m = &ctx.messages;
    let mut doc = document(ctx, base_url, "/contact", "contact.title", "contact.description");
    doc.noindex = true;
    doc.body.push_str(&format!(
        "<section class=\"confirmation\" role=\"status\">\n<h1>{}</h1>\n<p>{}</p>\n\
         <a class=\"button\" href=\"{}\">{}</a>\n</section>\n",
        esc(&m.format("contact.success.heading", &[("name", name)])),
        esc(&m.format("contact.success.body", &[("reference", reference)])),
        attr(&href(ctx, "/")),
        esc(&m.text("notFound.back"))
    ));
    doc
}

pub(crate) fn not_found(ctx: &RenderContext, base_url: &str) -> Document {
    let m = &ctx.messages;
    let mut doc = document(ctx, base_url, "/", "notFound.title", "notFound.body");
    doc.noindex = true;
    doc.body.push_str(&format!(
        "<section class=\"error-page\">\n<h1>{}</h1>\n<p>{}</p>\n<a class=\"button\" href=\"{}\">{}</a>\n</section>\n",
        esc(&m.text("notFound.heading")),
        esc(&m.text("notFound.body")),
        attr(&href(ctx, "/")),
        esc(&m.text("notFound.back"))
    ));
    doc
}
