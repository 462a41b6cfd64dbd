//! The clinic's public profile.

/// Postal address of the clinic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Address {
    /// Street line.
    pub street: &'static str,
    /// City.
    pub locality: &'static str,
    /// State or region code.
    pub region: &'static str,
    /// Postal code.
    pub postal_code: &'static str,
    /// ISO 3166-1 alpha-2 country code.
    pub country: &'static str,
}

impl Address {
    /// Single-line rendering used in the footer.
    #[must_use]
    pub fn one_line(&self) -> String {
        format!(
            "{}, {}, {} {}",
            self.street, self.locality, self.region, self.postal_code
        )
    }
}

/// A recurring opening window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpeningHours {
    /// schema.org day names covered by this window.
    pub days: &'static [&'static str],
    /// Opening time, `HH:MM`.
    pub opens: &'static str,
    /// Closing time, `HH:MM`.
    pub closes: &'static str,
    /// Catalog key of the human-readable summary.
    pub label_key: &'static str,
}

/// A social profile link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SocialLink {
    /// Network name shown as link text.
    pub network: &'static str,
    /// Absolute profile URL.
    pub url: &'static str,
}

/// Contact and identity details for the clinic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Organization {
    /// Brand name, identical in every locale.
    pub name: &'static str,
    /// Phone number in display form.
    pub phone: &'static str,
    /// Public inbox.
    pub email: &'static str,
    /// Clinic address.
    pub address: Address,
    /// Weekly opening windows.
    pub hours: &'static [OpeningHours],
    /// Catalog key for the closed-days notice.
    pub closed_key: &'static str,
    /// Social profiles.
    pub social: &'static [SocialLink],
    /// Year the clinic opened.
    pub founded: u16,
    /// Site-relative logo path.
    pub logo_path: &'static str,
}

impl Organization {
    /// Phone number reduced to a `tel:` URI.
    #[must_use]
    pub fn phone_uri(&self) -> String {
        let digits: String = self
            .phone
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '+')
            .collect();
        format!("tel:{digits}")
    }
}

static ORGANIZATION: Organization = Organization {
    name: "Cascade Prosthetics & Orthotics",
    phone: "+1 (503) 555-0142",
    email: "care@cascade-po.example",
    address: Address {
        street: "1200 NW Riverside Ave, Suite 300",
        locality: "Portland",
        region: "OR",
        postal_code: "97209",
        country: "US",
    },
    hours: &[
        OpeningHours {
            days: &["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"],
            opens: "08:00",
            closes: "17:00",
            label_key: "hours.weekdays",
        },
        OpeningHours {
            days: &["Saturday"],
            opens: "09:00",
            closes: "12:00",
            label_key: "hours.saturday",
        },
    ],
    closed_key: "hours.closed",
    social: &[
        SocialLink {
            network: "Facebook",
            url: "https://www.facebook.com/cascadepo",
        },
        SocialLink {
            network: "Instagram",
            url: "https://www.instagram.com/cascadepo",
        },
        SocialLink {
            network: "LinkedIn",
            url: "https://www.linkedin.com/company/cascadepo",
        },
    ],
    founded: 1998,
    logo_path: "/_assets/logo.svg",
};

/// The clinic profile shown in the footer, contact page and structured data.
#[must_use]
pub fn organization() -> &'static Organization {
    &ORGANIZATION
}
