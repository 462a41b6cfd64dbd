//! Blog posts and listing pagination.
//!
//! Posts are sample data held in memory, newest first. Title, excerpt and
//! body are catalog entries under `blog.posts.<slug>`.

use chrono::NaiveDate;
use once_cell::sync::Lazy;

/// Posts shown per listing page.
pub const POSTS_PER_PAGE: usize = 3;

/// Editorial category of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// First-person patient stories.
    PatientStories,
    /// Practical device care advice.
    CareTips,
    /// Research and technology explainers.
    Research,
}

impl Category {
    /// Stable slug used in catalog keys.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::PatientStories => "patient-stories",
            Self::CareTips => "care-tips",
            Self::Research => "research",
        }
    }

    /// Catalog key of the category label.
    #[must_use]
    pub fn label_key(self) -> String {
        format!("blog.categories.{}", self.slug())
    }
}

/// A published blog post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    /// URL slug, also the catalog key segment.
    pub slug: &'static str,
    /// Publication date.
    pub published: NaiveDate,
    /// Byline.
    pub author: &'static str,
    /// Editorial category.
    pub category: Category,
    /// Estimated reading time.
    pub read_minutes: u16,
    /// Site-relative hero image.
    pub image: &'static str,
}

impl Post {
    /// Route path below the locale segment.
    #[must_use]
    pub fn route(&self) -> String {
        format!("/blog/{}", self.slug)
    }

    /// Catalog key of the post title.
    #[must_use]
    pub fn title_key(&self) -> String {
        format!("blog.posts.{}.title", self.slug)
    }

    /// Catalog key of the listing excerpt.
    #[must_use]
    pub fn excerpt_key(&self) -> String {
        format!("blog.posts.{}.excerpt", self.slug)
    }

    /// Catalog key of the article body.
    #[must_use]
    pub fn body_key(&self) -> String {
        format!("blog.posts.{}.body", self.slug)
    }
}

type RawPost = (&'static str, (i32, u32, u32), &'static str, Category, u16);

const RAW_POSTS: [RawPost; 4] = [
    (
        "first-prosthetic-fitting",
        (2024, 9, 12),
        "Dana Whitfield, CPO",
        Category::PatientStories,
        6,
    ),
    (
        "caring-for-your-brace",
        (2024, 7, 3),
        "Luis Romero, CO",
        Category::CareTips,
        4,
    ),
    (
        "running-blades-explained",
        (2024, 5, 21),
        "Dana Whitfield, CPO",
        Category::Research,
        7,
    ),
    (
        "kids-growth-and-orthotics",
        (2024, 2, 8),
        "Priya Natarajan, CO",
        Category::CareTips,
        5,
    ),
];

static POSTS: Lazy<Vec<Post>> = Lazy::new(|| {
    let mut posts: Vec<Post> = RAW_POSTS
        .iter()
        .filter_map(|&(slug, (year, month, day), author, category, read_minutes)| {
            NaiveDate::from_ymd_opt(year, month, day).map(|published| Post {
                slug,
                published,
                author,
                category,
                read_minutes,
                image: "/_assets/blog-placeholder.svg",
            })
        })
        .collect();
    posts.sort_by(|a, b| b.published.cmp(&a.published));
    posts
});

/// Every post, newest first.
#[must_use]
pub fn posts() -> &'static [Post] {
    &POSTS
}

/// Look up a post by slug.
#[must_use]
pub fn find_post(slug: &str) -> Option<&'static Post> {
    POSTS.iter().find(|post| post.slug == slug)
}

/// One page of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a, T> {
    /// Items on this page.
    pub items: &'a [T],
    /// One-based page number.
    pub number: usize,
    /// Total number of pages, at least one.
    pub total_pages: usize,
}

impl<T> Page<'_, T> {
    /// Whether a newer page exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.number > 1
    }

    /// Whether an older page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.number < self.total_pages
    }
}

/// Slice the post listing into one-based pages.
///
/// Returns `None` for page zero or a page past the end. An empty listing
/// still has a single empty first page.
#[must_use]
pub fn paginate(page: usize, per_page: usize) -> Option<Page<'static, Post>> {
    paginate_slice(posts(), page, per_page)
}

fn paginate_slice<T>(items: &[T], page: usize, per_page: usize) -> Option<Page<'_, T>> {
    let per_page = per_page.max(1);
    let total_pages = items.len().div_ceil(per_page).max(1);
    if page == 0 || page > total_pages {
        return None;
    }
    let start = (page - 1) * per_page;
    let end = (start + per_page).min(items.len());
    Some(Page {
        items: &items[start..end],
        number: page,
        total_pages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use orthosite_i18n::{Catalog, LocaleCode, source::embedded};

    #[test]
    fn every_sample_post_is_loaded_newest_first() {
        assert_eq!(posts().len(), RAW_POSTS.len());
        assert!(
            posts()
                .windows(2)
                .all(|pair| pair[0].published >= pair[1].published)
        );
        assert_eq!(posts()[0].slug, "first-prosthetic-fitting");
    }

    #[test]
    fn find_post_by_slug() {
        let post = find_post("running-blades-explained");
        assert_eq!(post.map(|p| p.category), Some(Category::Research));
        assert_eq!(post.map(Post::route).as_deref(), Some("/blog/running-blades-explained"));
        assert!(find_post("missing").is_none());
    }

    #[test]
    fn paginate_splits_listing() {
        let first = paginate(1, POSTS_PER_PAGE);
        assert_eq!(first.as_ref().map(|p| p.items.len()), Some(3));
        assert_eq!(first.as_ref().map(|p| p.total_pages), Some(2));
        assert!(first.is_some_and(|p| p.has_next() && !p.has_previous()));

        let second = paginate(2, POSTS_PER_PAGE);
        assert_eq!(second.as_ref().map(|p| p.items.len()), Some(1));
        assert!(second.is_some_and(|p| p.has_previous() && !p.has_next()));

        assert!(paginate(0, POSTS_PER_PAGE).is_none());
        assert!(paginate(3, POSTS_PER_PAGE).is_none());
    }

    #[test]
    fn empty_listing_has_one_page() {
        let empty: [u8; 0] = [];
        let page = paginate_slice(&empty, 1, 10);
        assert_eq!(page.map(|p| (p.items.len(), p.total_pages)), Some((0, 1)));
        assert!(paginate_slice(&empty, 2, 10).is_none());
    }

    #[test]
    fn zero_page_size_is_clamped() {
        let items = [1, 2];
        assert_eq!(paginate_slice(&items, 2, 0).map(|p| p.items), Some(&items[1..]));
    }

    #[test]
    fn every_post_has_catalog_entries() -> orthosite_i18n::I18nResult<()> {
        for locale in LocaleCode::all() {
            let catalog = Catalog::parse(locale, embedded(locale))?;
            for post in posts() {
                assert!(catalog.text(&post.title_key()).is_some());
                assert!(catalog.text(&post.excerpt_key()).is_some());
                assert!(catalog.text(&post.body_key()).is_some());
                assert!(catalog.text(&post.category.label_key()).is_some());
            }
        }
        Ok(())
    }
}
