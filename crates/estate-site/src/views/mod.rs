//! HTML views.
//!
//! Each view appends a page body to a `String`; [`layout`] wraps bodies into
//! full documents.

pub(crate) mod agents;
pub(crate) mod blog;
pub(crate) mod forms;
pub(crate) mod home;
pub(crate) mod layout;
pub(crate) mod page;
pub(crate) mod properties;

use std::fmt::Write;

use estate_api::{Agent, City, Post, Property};
use estate_shortcode::{escape_html, initials, safe_url};

use crate::format::{area, format_area, format_date, format_price, humanize};
use crate::images::primary_image;

/// Property kinds offered in search and forms.
pub(crate) const PROPERTY_KINDS: [&str; 5] = ["apartment", "house", "villa", "land", "commercial"];

/// Listing card for a property.
pub(crate) fn property_card(property: &Property, placeholder: &str, out: &mut String) {
    let href = format!("/properties/{}", property.id);
    write!(
        out,
        r#"<article class="property-card"><a href="{href}"><img src="{}" alt="{}" loading="lazy"></a><div class="property-card-body">"#,
        escape_html(safe_url(&primary_image(property, placeholder))),
        escape_html(&property.title)
    )
    .unwrap();

    if let Some(listing) = property.listing_type.as_deref() {
        let label = if listing.eq_ignore_ascii_case("rent") {
            "For Rent"
        } else {
            "For Sale"
        };
        write!(out, r#"<span class="badge">{label}</span>"#).unwrap();
    }
    write!(
        out,
        r#"<h3><a href="{href}">{}</a></h3>"#,
        escape_html(&property.title)
    )
    .unwrap();

    let location = [property.address.as_str(), property.city_name().unwrap_or_default()]
        .into_iter()
        .filter(|part| !part.trim().is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    if !location.is_empty() {
        write!(out, r#"<p class="location">{}</p>"#, escape_html(&location)).unwrap();
    }

    out.push_str(r#"<ul class="facts">"#);
    if let Some(bedrooms) = property.bedrooms {
        write!(out, "<li>{bedrooms} bd</li>").unwrap();
    }
    if let Some(bathrooms) = property.bathrooms {
        write!(out, "<li>{bathrooms} ba</li>").unwrap();
    }
    if let Some(area) = area(property) {
        write!(out, "<li>{}</li>", format_area(area)).unwrap();
    }
    out.push_str("</ul>");

    write!(
        out,
        r#"<p class="price">{}</p></div></article>"#,
        escape_html(&format_price(property).unwrap_or_else(|| "Price on request".to_owned()))
    )
    .unwrap();
}

/// Grid of property cards.
pub(crate) fn property_grid(properties: &[Property], placeholder: &str, out: &mut String) {
    out.push_str(r#"<div class="property-grid">"#);
    for property in properties {
        property_card(property, placeholder, out);
    }
    out.push_str("</div>");
}

/// Avatar image, or initials when the agent has none.
pub(crate) fn avatar(agent: &Agent, out: &mut String) {
    match agent.avatar.as_deref().filter(|a| !a.trim().is_empty()) {
        Some(src) => write!(
            out,
            r#"<img class="avatar" src="{}" alt="{}" loading="lazy">"#,
            escape_html(safe_url(src)),
            escape_html(&agent.name)
        )
        .unwrap(),
        None => write!(
            out,
            r#"<span class="avatar avatar-initials" aria-hidden="true">{}</span>"#,
            escape_html(&initials(&agent.name))
        )
        .unwrap(),
    }
}

/// Agent summary card.
pub(crate) fn agent_card(agent: &Agent, out: &mut String) {
    let href = format!("/agents/{}", agent.id);
    out.push_str(r#"<article class="agent-card">"#);
    avatar(agent, out);
    write!(
        out,
        r#"<h3><a href="{href}">{}</a></h3>"#,
        escape_html(&agent.name)
    )
    .unwrap();
    if let Some(position) = agent.position.as_deref() {
        write!(out, r#"<p class="position">{}</p>"#, escape_html(position)).unwrap();
    }
    contact_links(agent, out);
    out.push_str("</article>");
}

/// Phone and email links of an agent.
pub(crate) fn contact_links(agent: &Agent, out: &mut String) {
    out.push_str(r#"<ul class="contact">"#);
    for phone in [agent.phone.as_deref(), agent.mobile.as_deref()]
        .into_iter()
        .flatten()
        .filter(|p| !p.trim().is_empty())
    {
        let dial: String = phone
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '+')
            .collect();
        write!(
            out,
            r#"<li><a href="tel:{}">{}</a></li>"#,
            escape_html(&dial),
            escape_html(phone)
        )
        .unwrap();
    }
    if !agent.email.is_empty() {
        write!(
            out,
            r#"<li><a href="mailto:{0}">{0}</a></li>"#,
            escape_html(&agent.email)
        )
        .unwrap();
    }
    out.push_str("</ul>");
}

/// Blog post summary card.
pub(crate) fn post_card(post: &Post, out: &mut String) {
    let href = format!("/blog/{}", estate_api::encode_component(&post.slug));
    out.push_str(r#"<article class="post-card">"#);
    if let Some(image) = post.featured_image.as_deref() {
        write!(
            out,
            r#"<a href="{href}"><img src="{}" alt="{}" loading="lazy"></a>"#,
            escape_html(safe_url(image)),
            escape_html(&post.title)
        )
        .unwrap();
    }
    if let Some(category) = post.category.as_deref() {
        write!(out, r#"<span class="badge">{}</span>"#, escape_html(category)).unwrap();
    }
    write!(
        out,
        r#"<h3><a href="{href}">{}</a></h3>"#,
        escape_html(&post.title)
    )
    .unwrap();
    if let Some(date) = post.published_at.as_deref().and_then(format_date) {
        write!(out, r#"<time>{date}</time>"#).unwrap();
    }
    if let Some(excerpt) = post.excerpt.as_deref() {
        write!(out, "<p>{}</p>", escape_html(excerpt)).unwrap();
    }
    if !post.tags.is_empty() {
        out.push_str(r#"<ul class="tags">"#);
        for tag in post.tags.iter().take(3) {
            write!(
                out,
                r#"<li><a href="/blog?tag={}">{}</a></li>"#,
                escape_html(&estate_api::encode_component(tag)),
                escape_html(tag)
            )
            .unwrap();
        }
        out.push_str("</ul>");
    }
    out.push_str("</article>");
}

/// `<option>` list of cities, marking `selected`.
pub(crate) fn city_options(cities: &[City], selected: Option<u64>, empty_label: &str, out: &mut String) {
    write!(out, r#"<option value="">{}</option>"#, escape_html(empty_label)).unwrap();
    for city in cities {
        let mark = if selected == Some(city.id) { " selected" } else { "" };
        write!(
            out,
            r#"<option value="{}"{mark}>{}</option>"#,
            city.id,
            escape_html(&city.name)
        )
        .unwrap();
    }
}

/// `<option>` list of property kinds, marking `selected`.
pub(crate) fn kind_options(selected: Option<&str>, empty_label: &str, out: &mut String) {
    write!(out, r#"<option value="">{}</option>"#, escape_html(empty_label)).unwrap();
    for kind in PROPERTY_KINDS {
        let mark = if selected == Some(kind) { " selected" } else { "" };
        write!(out, r#"<option value="{kind}"{mark}>{}</option>"#, humanize(kind)).unwrap();
    }
}

#[cfg(test)]
mod tests {
    use estate_api::Numeric;

    use super::*;

    #[test]
    fn test_property_card() {
        let mut property = Property::new(7, "Sea <View>");
        property.listing_type = Some("rent".to_owned());
        property.price = Some(Numeric::Number(1500.0));
        property.bedrooms = Some(2);
        property.address = "1 Beach Rd".to_owned();

        let mut out = String::new();
        property_card(&property, "/p.svg", &mut out);

        assert!(out.contains(r#"href="/properties/7""#));
        assert!(out.contains("Sea &lt;View&gt;"));
        assert!(out.contains("For Rent"));
        assert!(out.contains("$1,500"));
        assert!(out.contains("2 bd"));
        assert!(out.contains(r#"src="/p.svg""#));
    }

    #[test]
    fn test_property_card_without_price() {
        let mut out = String::new();
        property_card(&Property::new(1, "Plot"), "/p.svg", &mut out);
        assert!(out.contains("Price on request"));
    }

    #[test]
    fn test_avatar_initials_fallback() {
        let mut out = String::new();
        avatar(&Agent::new(1, "Maria Lopez"), &mut out);
        assert!(out.contains(">ML<"));
    }

    #[test]
    fn test_contact_links() {
        let mut agent = Agent::new(1, "Ana");
        agent.phone = Some("+1 (234) 567-890".to_owned());
        agent.email = "ana@example.com".to_owned();

        let mut out = String::new();
        contact_links(&agent, &mut out);
        assert!(out.contains(r#"href="tel:+1234567890""#));
        assert!(out.contains(r#"href="mailto:ana@example.com""#));
    }

    #[test]
    fn test_post_card_limits_tags() {
        let mut post = Post::new("hello world", "Hello");
        post.tags = vec!["a".to_owned(), "b".to_owned(), "c".to_owned(), "d".to_owned()];
        post.published_at = Some("2025-01-05".to_owned());

        let mut out = String::new();
        post_card(&post, &mut out);
        assert!(out.contains(r#"href="/blog/hello%20world""#));
        assert!(out.contains("January 5, 2025"));
        assert_eq!(out.matches("/blog?tag=").count(), 3);
    }
}
