//! Page assembly from the content API.
//!
//! [`Site`] turns a route and its query parameters into a complete HTML
//! document. Every method is blocking; callers on an async runtime should
//! run them on a blocking thread.
//!
//! Primary records (the property on a property page, the page on a CMS page)
//! propagate their errors. Secondary data (menus, similar properties, city
//! lists, home page sections) degrades to empty with a warning.

use std::sync::Arc;

use estate_api::{
    City, ContentSource, MenuItem, MenuLocation, PageRequest, PostFilters, PropertySearch,
    Submission,
};
use estate_shortcode::ShortcodeRenderer;
use tracing::{debug, warn};

use crate::error::SiteError;
use crate::format::{DESCRIPTION_CHARS, summary};
use crate::views::agents;
use crate::views::blog;
use crate::views::forms::{thank_you, validate};
use crate::views::home::HomeView;
use crate::views::layout::Layout;
use crate::views::page::{self, Template};
use crate::views::properties::{PropertyDetailView, PropertyListView};

/// Largest city list fetched for filter and form dropdowns.
const CITY_LIST_SIZE: u32 = 100;

/// Configuration for [`Site`].
#[derive(Clone, Debug)]
pub struct SiteConfig {
    /// Site name shown in titles and the header.
    pub name: String,
    /// Listing page size.
    pub per_page: u32,
    /// Featured properties on the home page.
    pub featured_limit: u32,
    /// Latest posts on the home page.
    pub latest_posts: u32,
    /// Similar properties on a property page.
    pub similar_limit: u32,
    /// Image shown when a property has none.
    pub placeholder_image: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "Real Estate".to_owned(),
            per_page: 12,
            featured_limit: 6,
            latest_posts: 3,
            similar_limit: 4,
            placeholder_image: "/static/placeholder.svg".to_owned(),
        }
    }
}

/// A complete HTML document ready to serve.
#[derive(Clone, Debug)]
pub struct RenderedPage {
    /// Page title without the site name suffix.
    pub title: String,
    /// Meta description.
    pub description: Option<String>,
    /// Full document.
    pub html: String,
    /// Non-fatal problems hit while building the page.
    pub warnings: Vec<String>,
}

/// Site renderer backed by a [`ContentSource`].
pub struct Site {
    source: Arc<dyn ContentSource>,
    config: SiteConfig,
    shortcodes: ShortcodeRenderer,
}

/// Accumulates the body and warnings of one page.
struct Draft {
    body: String,
    warnings: Vec<String>,
}

impl Draft {
    fn new() -> Self {
        Self {
            body: String::with_capacity(8192),
            warnings: Vec::new(),
        }
    }

    /// Unwrap a secondary fetch, recording a warning on failure.
    fn degrade<T: Default>(&mut self, what: &str, result: Result<T, estate_api::ApiError>) -> T {
        result.unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load {what}");
            self.warnings.push(format!("Failed to load {what}: {e}"));
            T::default()
        })
    }
}

impl Site {
    /// Create a site over a content source.
    #[must_use]
    pub fn new(source: Arc<dyn ContentSource>, config: SiteConfig) -> Self {
        Self {
            source,
            config,
            shortcodes: ShortcodeRenderer::new(),
        }
    }

    /// Site configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Home page. Sections that fail to load are left out with a warning.
    #[must_use]
    pub fn home(&self) -> RenderedPage {
        let mut draft = Draft::new();
        let featured = draft.degrade(
            "featured properties",
            self.source.featured_properties(self.config.featured_limit),
        );
        let posts = draft.degrade(
            "latest posts",
            self.source.latest_posts(self.config.latest_posts),
        );
        let cities = self.city_list(&mut draft);

        HomeView {
            site_name: &self.config.name,
            featured: &featured,
            posts: &posts,
            cities: &cities,
            placeholder: &self.config.placeholder_image,
        }
        .render(&mut draft.body);

        let name = self.config.name.clone();
        self.finish(draft, name, None)
    }

    /// Property listing filtered by query parameters.
    ///
    /// A `q` parameter switches to full-text search.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Api`] if the listing cannot be fetched.
    pub fn properties(&self, params: &[(String, String)]) -> Result<RenderedPage, SiteError> {
        let mut search = PropertySearch::from_pairs(params.iter().map(|(k, v)| (k, v)));
        search.filters = search.filters.with_page_defaults(self.config.per_page);
        debug!(query = ?search.to_query(), "Listing properties");

        let result = if search.has_query() {
            self.source.search_properties(&search)?
        } else {
            self.source.properties(&search.filters)?
        };

        let mut draft = Draft::new();
        let cities = self.city_list(&mut draft);
        PropertyListView {
            result: &result,
            filters: &search.filters,
            search: search.q.as_deref(),
            cities: &cities,
            params,
            placeholder: &self.config.placeholder_image,
        }
        .render(&mut draft.body);

        let description = format!("{} properties available", result.meta.total);
        Ok(self.finish(draft, "Properties".to_owned(), Some(description)))
    }

    /// Property detail page.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::NotFound`] if the property does not exist.
    pub fn property(&self, id: u64) -> Result<RenderedPage, SiteError> {
        let property = self
            .source
            .property(id)
            .map_err(|e| SiteError::from_api(e, format!("property {id}")))?;

        let mut draft = Draft::new();
        let similar = draft.degrade(
            "similar properties",
            self.source.similar_properties(id, self.config.similar_limit),
        );
        PropertyDetailView {
            property: &property,
            similar: &similar,
            placeholder: &self.config.placeholder_image,
        }
        .render(&mut draft.body, &mut draft.warnings);

        let seo = property.seo.as_ref();
        let title = seo
            .map(|s| s.title.clone())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| property.title.clone());
        let description = seo
            .map(|s| s.description.clone())
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| summary(&property.description, DESCRIPTION_CHARS));
        Ok(self.finish(draft, title, Some(description)))
    }

    /// Agent directory.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Api`] if agents cannot be fetched.
    pub fn agents(&self, params: &[(String, String)]) -> Result<RenderedPage, SiteError> {
        let mut request = PageRequest::from_pairs(params.iter().map(|(k, v)| (k, v)));
        request.page.get_or_insert(1);
        request.per_page.get_or_insert(self.config.per_page);
        let result = self.source.agents(&request)?;

        let mut draft = Draft::new();
        agents::render_list(&result, params, &mut draft.body);
        Ok(self.finish(draft, "Our Agents".to_owned(), None))
    }

    /// Agent profile.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::NotFound`] if the agent does not exist.
    pub fn agent(&self, id: u64) -> Result<RenderedPage, SiteError> {
        let agent = self
            .source
            .agent(id)
            .map_err(|e| SiteError::from_api(e, format!("agent {id}")))?;

        let mut draft = Draft::new();
        agents::render_profile(&agent, &mut draft.body);
        let description = agent
            .bio
            .as_deref()
            .map(|bio| summary(bio, DESCRIPTION_CHARS))
            .or_else(|| agent.position.clone());
        Ok(self.finish(draft, agent.name.clone(), description))
    }

    /// Blog listing, optionally narrowed by `category` or `tag`.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Api`] if posts cannot be fetched.
    pub fn blog(&self, params: &[(String, String)]) -> Result<RenderedPage, SiteError> {
        let mut filters = PostFilters::from_pairs(params.iter().map(|(k, v)| (k, v)));
        filters.page.get_or_insert(1);
        filters.per_page.get_or_insert(self.config.per_page);
        let posts = self.source.posts(&filters)?;

        let mut draft = Draft::new();
        blog::render_list(&posts, &filters, params, &mut draft.body);
        Ok(self.finish(draft, "Blog".to_owned(), None))
    }

    /// Blog post. The body is trusted CMS HTML and is emitted as is.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::NotFound`] if the post does not exist.
    pub fn post(&self, slug: &str) -> Result<RenderedPage, SiteError> {
        let post = self
            .source
            .post(slug)
            .map_err(|e| SiteError::from_api(e, format!("post '{slug}'")))?;

        let mut draft = Draft::new();
        blog::render_post(&post, &post.content, &mut draft.body);

        let title = post.meta_title.clone().unwrap_or_else(|| post.title.clone());
        let description = post
            .meta_description
            .clone()
            .or_else(|| post.excerpt.clone())
            .unwrap_or_else(|| summary(&post.content, DESCRIPTION_CHARS));
        Ok(self.finish(draft, title, Some(description)))
    }

    /// CMS page rendered through the shortcode pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::NotFound`] if no page has this slug.
    pub fn page(&self, slug: &str) -> Result<RenderedPage, SiteError> {
        let cms_page = self
            .source
            .page(slug)
            .map_err(|e| SiteError::from_api(e, format!("page '{slug}'")))?;

        let mut draft = Draft::new();
        let occurrences = cms_page.occurrences();
        let output = self.shortcodes.render(&cms_page.content, Some(&occurrences));
        draft.warnings.extend(output.warnings.iter().cloned());

        let template = Template::parse(cms_page.template.as_deref());
        let cities = if template == Template::Contact {
            self.city_list(&mut draft)
        } else {
            Vec::new()
        };
        page::render(
            template,
            &cms_page.title,
            &output.html(),
            &cities,
            &mut draft.body,
        );

        let title = cms_page
            .meta_title
            .clone()
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| cms_page.title.clone());
        let description = cms_page
            .meta_description
            .clone()
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| summary(&cms_page.content, DESCRIPTION_CHARS));
        Ok(self.finish(draft, title, Some(description)))
    }

    /// Validate and send a form, returning the confirmation page.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Invalid`] if required fields are missing or the
    /// API rejects the submission with 422, and [`SiteError::Api`] for other
    /// API failures.
    pub fn submit(&self, submission: &Submission) -> Result<RenderedPage, SiteError> {
        validate(submission).map_err(SiteError::Invalid)?;
        let reply = self.source.submit(submission).map_err(|e| {
            if e.status() == Some(422) {
                SiteError::Invalid(vec![e.to_string()])
            } else {
                SiteError::Api(e)
            }
        })?;

        let mut draft = Draft::new();
        thank_you(&reply.message, &mut draft.body);
        Ok(self.finish(draft, "Message sent".to_owned(), None))
    }

    fn city_list(&self, draft: &mut Draft) -> Vec<City> {
        draft
            .degrade(
                "cities",
                self.source.cities(&PageRequest::new(1, CITY_LIST_SIZE)),
            )
            .data
    }

    fn menu(&self, draft: &mut Draft, location: MenuLocation) -> Vec<MenuItem> {
        let what = match location {
            MenuLocation::Header => "header menu",
            MenuLocation::Footer => "footer menu",
            MenuLocation::All => "menus",
        };
        draft.degrade(what, self.source.menu(location))
    }

    fn finish(&self, mut draft: Draft, title: String, description: Option<String>) -> RenderedPage {
        let layout = Layout {
            site_name: self.config.name.clone(),
            header: self.menu(&mut draft, MenuLocation::Header),
            footer: self.menu(&mut draft, MenuLocation::Footer),
        };
        let html = layout.document(&title, description.as_deref(), &draft.body);
        RenderedPage {
            title,
            description,
            html,
            warnings: draft.warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use estate_api::{
        Agent, ContactForm, MockSource, Numeric, Page, PageShortcode, Post, Property,
    };
    use pretty_assertions::assert_eq;

    use super::*;

    fn site(source: MockSource) -> Site {
        let config = SiteConfig {
            name: "Coastline".to_owned(),
            per_page: 2,
            ..SiteConfig::default()
        };
        Site::new(Arc::new(source), config)
    }

    fn listing(id: u64, title: &str, listing_type: &str) -> Property {
        let mut property = Property::new(id, title);
        property.listing_type = Some(listing_type.to_owned());
        property.property_type = Some("apartment".to_owned());
        property.price = Some(Numeric::Number(100_000.0 * id as f64));
        property
    }

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn test_home_sections() {
        let mut featured = listing(1, "Harbour Loft", "sale");
        featured.is_featured = true;
        let source = MockSource::new()
            .with_property(featured)
            .with_post(Post::new("tips", "Buying Tips"))
            .with_city(City::new(1, "Lisbon"))
            .with_menu(MenuLocation::Header, vec![MenuItem::new("Home", "/")]);

        let page = site(source).home();
        assert_eq!(page.title, "Coastline");
        assert!(page.html.contains("<title>Coastline</title>"));
        assert!(page.html.contains("Harbour Loft"));
        assert!(page.html.contains("Buying Tips"));
        assert!(page.html.contains(r#"href="/properties?city_id=1""#));
        assert!(page.html.contains(">Home</a>"));
        assert!(page.warnings.is_empty());
    }

    #[test]
    fn test_menu_failure_degrades() {
        let source = MockSource::new().with_failure("menu", 500);
        let page = site(source).home();
        assert_eq!(page.warnings.len(), 2);
        assert!(page.warnings[0].starts_with("Failed to load header menu"));
        assert!(!page.html.contains("<nav"));
    }

    #[test]
    fn test_properties_filter_and_paginate() {
        let source = MockSource::new()
            .with_property(listing(1, "One", "sale"))
            .with_property(listing(2, "Two", "rent"))
            .with_property(listing(3, "Three", "sale"))
            .with_property(listing(4, "Four", "sale"));

        let page = site(source)
            .properties(&params(&[("type", "sale"), ("page", "2")]))
            .unwrap();
        assert!(page.html.contains("Four"));
        assert!(!page.html.contains(">Two<"));
        assert!(page.html.contains("Showing <strong>1</strong> of <strong>3</strong>"));
        assert!(page.html.contains(r#"href="/properties?type=sale&amp;page=1""#));
        assert_eq!(page.description.as_deref(), Some("3 properties available"));
    }

    #[test]
    fn test_properties_search() {
        let source = MockSource::new()
            .with_property(listing(1, "Sea View Flat", "sale"))
            .with_property(listing(2, "City Studio", "sale"));
        let page = site(source).properties(&params(&[("q", "sea")])).unwrap();
        assert!(page.html.contains("Sea View Flat"));
        assert!(!page.html.contains("City Studio"));
    }

    #[test]
    fn test_properties_api_failure() {
        let source = MockSource::new().with_failure("properties", 503);
        let err = site(source).properties(&[]).unwrap_err();
        assert!(matches!(err, SiteError::Api(_)));
    }

    #[test]
    fn test_property_detail_and_not_found() {
        let mut property = listing(1, "Villa Sol", "sale");
        property.description = "<b>Sunny</b> villa".to_owned();
        let site = site(
            MockSource::new()
                .with_property(property)
                .with_property(listing(2, "Villa Luna", "sale")),
        );

        let page = site.property(1).unwrap();
        assert_eq!(page.title, "Villa Sol");
        assert_eq!(page.description.as_deref(), Some("Sunny villa"));
        assert!(page.html.contains("Similar Properties"));
        assert!(page.html.contains("Villa Luna"));

        let err = site.property(99).unwrap_err();
        assert!(matches!(err, SiteError::NotFound(ref what) if what == "property 99"));
    }

    #[test]
    fn test_agents() {
        let site = site(MockSource::new().with_agent(Agent::new(3, "Ana Silva")));
        assert!(site.agents(&[]).unwrap().html.contains("Ana Silva"));
        assert_eq!(site.agent(3).unwrap().title, "Ana Silva");
        assert!(matches!(site.agent(4), Err(SiteError::NotFound(_))));
    }

    #[test]
    fn test_blog_and_post() {
        let mut post = Post::new("guide", "Buyer Guide");
        post.category = Some("Guides".to_owned());
        post.content = "<p>Intro</p><p>Rates are rising</p>".to_owned();
        let site = site(
            MockSource::new()
                .with_post(post)
                .with_post(Post::new("news", "News")),
        );

        let list = site.blog(&params(&[("category", "Guides")])).unwrap();
        assert!(list.html.contains("Buyer Guide"));
        assert!(!list.html.contains(">News<"));

        let page = site.post("guide").unwrap();
        assert!(page.html.contains("<p>Intro</p>"));
        assert!(page.html.contains("<p>Rates are rising</p>"));
        assert_eq!(page.description.as_deref(), Some("Intro Rates are rising"));
        assert!(page.warnings.is_empty());
    }

    #[test]
    fn test_post_brackets_kept_verbatim() {
        let mut post = Post::new("prices", "Prices");
        post.content = "<p>Prices rose 5% [1] last year.</p><p>[note] see below</p>".to_owned();
        let page = site(MockSource::new().with_post(post)).post("prices").unwrap();
        assert!(page.html.contains("<p>Prices rose 5% [1] last year.</p><p>[note] see below</p>"));
        assert!(page.warnings.is_empty());
    }

    #[test]
    fn test_page_structured_shortcodes() {
        let mut shortcode = PageShortcode {
            kind: "cta".to_owned(),
            position: 10,
            data: serde_json::Map::new(),
        };
        shortcode
            .data
            .insert("title".to_owned(), serde_json::json!("Book a visit"));
        let mut cms_page = Page::new("about", "About Us");
        cms_page.content = "<p>Hi</p>\n\n<p>Bye</p>".to_owned();
        cms_page.template = Some("about".to_owned());
        cms_page.shortcodes = vec![shortcode];

        let page = site(MockSource::new().with_page(cms_page)).page("about").unwrap();
        let hi = page.html.find("<p>Hi</p>").unwrap();
        let cta = page.html.find("Book a visit").unwrap();
        let bye = page.html.find("<p>Bye</p>").unwrap();
        assert!(hi < cta && cta < bye);
        assert!(page.html.contains("page-about"));
        assert_eq!(page.description.as_deref(), Some("Hi Bye"));
    }

    #[test]
    fn test_page_unknown_shortcode_warns() {
        let mut cms_page = Page::new("x", "X");
        cms_page.content = "[mystery]".to_owned();
        let page = site(MockSource::new().with_page(cms_page)).page("x").unwrap();
        assert_eq!(page.warnings, vec!["Unknown shortcode type: mystery".to_owned()]);
    }

    #[test]
    fn test_page_not_found() {
        let err = site(MockSource::new()).page("missing").unwrap_err();
        assert_eq!(err.to_string(), "Not found: page 'missing'");
    }

    #[test]
    fn test_submit() {
        let source = Arc::new(MockSource::new());
        let site = Site::new(Arc::<MockSource>::clone(&source), SiteConfig::default());
        let form = Submission::Contact(ContactForm {
            name: "Ana".to_owned(),
            email: "ana@example.com".to_owned(),
            message: "Call me".to_owned(),
            ..ContactForm::default()
        });

        let page = site.submit(&form).unwrap();
        assert!(page.html.contains("Message sent"));
        assert_eq!(source.submissions(), vec![form]);
    }

    #[test]
    fn test_submit_invalid_not_sent() {
        let source = Arc::new(MockSource::new());
        let site = Site::new(Arc::<MockSource>::clone(&source), SiteConfig::default());
        let form = Submission::Contact(ContactForm::default());

        let err = site.submit(&form).unwrap_err();
        assert!(matches!(err, SiteError::Invalid(ref errors) if errors.len() == 3));
        assert!(source.submissions().is_empty());
    }
}
