//! Home page.

use std::fmt::Write;

use estate_api::{City, Post, Property};
use estate_shortcode::escape_html;

use super::{city_options, kind_options, post_card, property_grid};

pub(crate) struct HomeView<'a> {
    pub site_name: &'a str,
    pub featured: &'a [Property],
    pub posts: &'a [Post],
    pub cities: &'a [City],
    pub placeholder: &'a str,
}

impl HomeView<'_> {
    pub(crate) fn render(&self, out: &mut String) {
        write!(
            out,
            r#"<section class="hero"><h1>Find your next home with {}</h1>"#,
            escape_html(self.site_name)
        )
        .unwrap();
        out.push_str(concat!(
            r#"<form class="hero-search" method="get" action="/properties">"#,
            r#"<input type="search" name="q" placeholder="Search properties">"#,
            r#"<select name="type"><option value="">Buy or rent</option>"#,
            r#"<option value="sale">Buy</option><option value="rent">Rent</option></select>"#,
            r#"<select name="property_type">"#,
        ));
        kind_options(None, "Any type", out);
        out.push_str(r#"</select><select name="city_id">"#);
        city_options(self.cities, None, "Any city", out);
        out.push_str(r#"</select><button type="submit">Search</button></form></section>"#);

        if !self.featured.is_empty() {
            out.push_str(r#"<section class="featured"><h2>Featured Properties</h2>"#);
            property_grid(self.featured, self.placeholder, out);
            out.push_str(r#"<a class="more" href="/properties">View all properties</a></section>"#);
        }

        if !self.cities.is_empty() {
            out.push_str(r#"<section class="cities"><h2>Explore by City</h2><ul>"#);
            for city in self.cities {
                write!(
                    out,
                    r#"<li><a href="/properties?city_id={}">{}</a>"#,
                    city.id,
                    escape_html(&city.name)
                )
                .unwrap();
                if let Some(count) = city.properties_count {
                    write!(out, r#" <span class="count">{count} properties</span>"#).unwrap();
                }
                out.push_str("</li>");
            }
            out.push_str("</ul></section>");
        }

        if !self.posts.is_empty() {
            out.push_str(r#"<section class="latest-posts"><h2>Latest from the Blog</h2>"#);
            for post in self.posts {
                post_card(post, out);
            }
            out.push_str("</section>");
        }
    }
}
