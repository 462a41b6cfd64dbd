//! Service areas offered by the clinic.

/// One service area. Display strings live under `services.items.<slug>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Service {
    /// Stable identifier used in catalog keys and form values.
    pub slug: &'static str,
    /// Icon name rendered as a CSS class.
    pub icon: &'static str,
}

impl Service {
    /// Catalog key of the service title.
    #[must_use]
    pub fn title_key(&self) -> String {
        format!("services.items.{}.title", self.slug)
    }

    /// Catalog key of the one-paragraph summary.
    #[must_use]
    pub fn summary_key(&self) -> String {
        format!("services.items.{}.summary", self.slug)
    }
}

static SERVICES: [Service; 5] = [
    Service {
        slug: "prosthetics",
        icon: "limb",
    },
    Service {
        slug: "orthotics",
        icon: "brace",
    },
    Service {
        slug: "pediatric",
        icon: "child",
    },
    Service {
        slug: "sports",
        icon: "runner",
    },
    Service {
        slug: "scanning",
        icon: "scanner",
    },
];

/// Every service area in display order.
#[must_use]
pub fn services() -> &'static [Service] {
    &SERVICES
}

/// Look up a service by slug.
#[must_use]
pub fn find_service(slug: &str) -> Option<&'static Service> {
    SERVICES.iter().find(|service| service.slug == slug)
}
