//! Property listing and detail pages.

use std::fmt::Write;

use estate_api::{City, Paginated, Property, PropertyFilters};
use estate_shortcode::{BlockRenderer, HtmlBlocks, Shortcode, escape_html, safe_url};

use super::{agent_card, city_options, kind_options, property_grid};
use crate::format::{area, format_area, format_price, humanize};
use crate::images::{gallery, primary_image};
use crate::pagination::Pagination;

pub(crate) struct PropertyListView<'a> {
    pub result: &'a Paginated<Property>,
    pub filters: &'a PropertyFilters,
    pub search: Option<&'a str>,
    pub cities: &'a [City],
    pub params: &'a [(String, String)],
    pub placeholder: &'a str,
}

impl PropertyListView<'_> {
    pub(crate) fn render(&self, out: &mut String) {
        out.push_str(concat!(
            r#"<section class="listing-header"><h1>Discover Properties</h1>"#,
            "<p>Explore our curated collection of properties for modern living</p></section>",
            r#"<div class="listing">"#,
        ));
        self.filter_form(out);

        out.push_str(r#"<div class="listing-results">"#);
        if let Some(q) = self.search {
            write!(out, r#"<p class="search-term">Results for "{}"</p>"#, escape_html(q)).unwrap();
        }
        write!(
            out,
            r#"<p class="result-count">Showing <strong>{}</strong> of <strong>{}</strong> properties</p>"#,
            self.result.data.len(),
            self.result.meta.total
        )
        .unwrap();

        if self.result.data.is_empty() {
            out.push_str(r#"<p class="empty">No properties found. Try adjusting your filters.</p>"#);
        } else {
            property_grid(&self.result.data, self.placeholder, out);
        }
        Pagination::from_meta(&self.result.meta).render("/properties", self.params, out);
        out.push_str("</div></div>");
    }

    fn filter_form(&self, out: &mut String) {
        let f = self.filters;
        out.push_str(r#"<aside class="filters"><form method="get" action="/properties">"#);
        write!(
            out,
            r#"<label>Search <input type="search" name="q" value="{}"></label>"#,
            escape_html(self.search.unwrap_or_default())
        )
        .unwrap();

        out.push_str(r#"<label>Listing <select name="type">"#);
        for (value, label) in [("", "Any"), ("sale", "For Sale"), ("rent", "For Rent")] {
            let mark = if f.listing_type.as_deref().unwrap_or_default() == value {
                " selected"
            } else {
                ""
            };
            write!(out, r#"<option value="{value}"{mark}>{label}</option>"#).unwrap();
        }
        out.push_str(r#"</select></label><label>Type <select name="property_type">"#);
        kind_options(f.property_type.as_deref(), "Any type", out);
        out.push_str(r#"</select></label><label>City <select name="city_id">"#);
        city_options(self.cities, f.city_id, "Any city", out);
        out.push_str("</select></label>");

        number_input(out, "Min price", "min_price", f.min_price);
        number_input(out, "Max price", "max_price", f.max_price);
        number_input(out, "Bedrooms", "bedrooms", f.bedrooms.map(u64::from));
        number_input(out, "Bathrooms", "bathrooms", f.bathrooms.map(u64::from));

        out.push_str(concat!(
            r#"<button type="submit">Apply filters</button>"#,
            r#"<a class="reset" href="/properties">Reset</a></form></aside>"#,
        ));
    }
}

fn number_input(out: &mut String, label: &str, name: &str, value: Option<u64>) {
    let value = value.map(|v| v.to_string()).unwrap_or_default();
    write!(
        out,
        r#"<label>{label} <input type="number" min="0" name="{name}" value="{value}"></label>"#
    )
    .unwrap();
}

pub(crate) struct PropertyDetailView<'a> {
    pub property: &'a Property,
    pub similar: &'a [Property],
    pub placeholder: &'a str,
}

impl PropertyDetailView<'_> {
    pub(crate) fn render(&self, out: &mut String, warnings: &mut Vec<String>) {
        let p = self.property;
        out.push_str(r#"<article class="property-detail">"#);
        self.gallery(out);

        out.push_str(r#"<header class="property-header">"#);
        if let Some(status) = p.status.as_deref() {
            write!(
                out,
                r#"<span class="status status-{0}">{1}</span>"#,
                escape_html(&status.to_ascii_lowercase()),
                escape_html(&humanize(status))
            )
            .unwrap();
        }
        write!(out, "<h1>{}</h1>", escape_html(&p.title)).unwrap();
        let location = [
            Some(p.address.as_str()),
            p.district.as_ref().map(|d| d.name.as_str()),
            p.city_name(),
        ]
        .into_iter()
        .flatten()
        .filter(|part| !part.trim().is_empty())
        .collect::<Vec<_>>()
        .join(", ");
        if !location.is_empty() {
            write!(out, r#"<p class="location">{}</p>"#, escape_html(&location)).unwrap();
        }
        write!(
            out,
            r#"<p class="price">{}</p></header>"#,
            escape_html(&format_price(p).unwrap_or_else(|| "Price on request".to_owned()))
        )
        .unwrap();

        self.facts(out);

        if !p.description.trim().is_empty() {
            out.push_str(r#"<section class="description"><h2>Description</h2>"#);
            for paragraph in p.description.split("\n\n").filter(|s| !s.trim().is_empty()) {
                write!(out, "<p>{}</p>", escape_html(paragraph.trim())).unwrap();
            }
            out.push_str("</section>");
        }

        if !p.features.is_empty() {
            out.push_str(r#"<section class="features"><h2>Features</h2><ul>"#);
            for feature in &p.features {
                match feature.value.as_deref().filter(|v| !v.is_empty()) {
                    Some(value) => write!(
                        out,
                        "<li>{}: {}</li>",
                        escape_html(&feature.name),
                        escape_html(value)
                    )
                    .unwrap(),
                    None => write!(out, "<li>{}</li>", escape_html(&feature.name)).unwrap(),
                }
            }
            out.push_str("</ul></section>");
        }

        out.push_str(r#"<aside class="property-contact">"#);
        if let Some(agent) = p.agent.as_ref() {
            out.push_str("<h2>Listing Agent</h2>");
            agent_card(agent, out);
        }
        let form = Shortcode::PropertyInquiryForm {
            property_id: i64::try_from(p.id).ok(),
            property_title: Some(p.title.clone()),
        };
        out.push_str(HtmlBlocks::new().render(&form, warnings).as_html());
        out.push_str("</aside></article>");

        if !self.similar.is_empty() {
            out.push_str(r#"<section class="similar"><h2>Similar Properties</h2>"#);
            property_grid(self.similar, self.placeholder, out);
            out.push_str("</section>");
        }
    }

    fn gallery(&self, out: &mut String) {
        let p = self.property;
        write!(
            out,
            r#"<div class="gallery"><img class="gallery-main" src="{}" alt="{}">"#,
            escape_html(safe_url(&primary_image(p, self.placeholder))),
            escape_html(&p.title)
        )
        .unwrap();
        let images = gallery(p);
        if images.len() > 1 {
            out.push_str(r#"<ul class="thumbnails">"#);
            for image in &images {
                write!(
                    out,
                    r#"<li><img src="{}" alt="{}" loading="lazy"></li>"#,
                    escape_html(safe_url(&image.url)),
                    escape_html(image.alt.as_deref().unwrap_or(&p.title))
                )
                .unwrap();
            }
            out.push_str("</ul>");
        }
        out.push_str("</div>");
    }

    fn facts(&self, out: &mut String) {
        let p = self.property;
        let mut facts: Vec<(&str, String)> = Vec::new();
        if let Some(kind) = p.kind() {
            facts.push(("Type", humanize(kind)));
        }
        if let Some(bedrooms) = p.bedrooms {
            facts.push(("Bedrooms", bedrooms.to_string()));
        }
        if let Some(bathrooms) = p.bathrooms {
            facts.push(("Bathrooms", bathrooms.to_string()));
        }
        if let Some(area) = area(p) {
            facts.push(("Area", format_area(area)));
        }
        if let Some(year) = p.year_built {
            facts.push(("Year built", year.to_string()));
        }
        if let Some(garage) = p.garage {
            facts.push(("Garage", garage.to_string()));
        }
        if let Some(energy) = p.energy_class.as_deref() {
            facts.push(("Energy class", energy.to_owned()));
        }
        if facts.is_empty() {
            return;
        }

        out.push_str(r#"<dl class="facts">"#);
        for (label, value) in facts {
            write!(out, "<dt>{label}</dt><dd>{}</dd>", escape_html(&value)).unwrap();
        }
        out.push_str("</dl>");
    }
}

#[cfg(test)]
mod tests {
    use estate_api::{Agent, ImageRef, Numeric, PropertyFeature};

    use super::*;

    #[test]
    fn test_list_marks_selected_filters() {
        let result = Paginated::from_items(vec![Property::new(1, "Loft")], 1, 12);
        let filters = PropertyFilters {
            listing_type: Some("rent".to_owned()),
            city_id: Some(2),
            min_price: Some(1000),
            ..PropertyFilters::default()
        };
        let cities = vec![City::new(1, "Lisbon"), City::new(2, "Porto")];
        let view = PropertyListView {
            result: &result,
            filters: &filters,
            search: None,
            cities: &cities,
            params: &[],
            placeholder: "/p.svg",
        };

        let mut out = String::new();
        view.render(&mut out);
        assert!(out.contains(r#"<option value="rent" selected>"#));
        assert!(out.contains(r#"<option value="2" selected>Porto"#));
        assert!(out.contains(r#"name="min_price" value="1000""#));
        assert!(out.contains("Showing <strong>1</strong> of <strong>1</strong>"));
        assert!(!out.contains("pagination"));
    }

    #[test]
    fn test_list_empty() {
        let result = Paginated::empty();
        let view = PropertyListView {
            result: &result,
            filters: &PropertyFilters::default(),
            search: Some("castle"),
            cities: &[],
            params: &[],
            placeholder: "/p.svg",
        };
        let mut out = String::new();
        view.render(&mut out);
        assert!(out.contains("No properties found"));
        assert!(out.contains(r#"Results for "castle""#));
    }

    #[test]
    fn test_detail() {
        let mut property = Property::new(5, "Villa Sol");
        property.price = Some(Numeric::Number(950_000.0));
        property.description = "Bright rooms.\n\nSea views.".to_owned();
        property.bedrooms = Some(4);
        property.year_built = Some(2010);
        property.images = vec![
            ImageRef::Url("/1.jpg".to_owned()),
            ImageRef::Url("/2.jpg".to_owned()),
        ];
        property.features = vec![PropertyFeature {
            id: 1,
            name: "Pool".to_owned(),
            value: None,
        }];
        property.agent = Some(Agent::new(3, "Ana Silva"));

        let view = PropertyDetailView {
            property: &property,
            similar: &[Property::new(6, "Villa Luna")],
            placeholder: "/p.svg",
        };
        let mut out = String::new();
        let mut warnings = Vec::new();
        view.render(&mut out, &mut warnings);

        assert!(out.contains("<h1>Villa Sol</h1>"));
        assert!(out.contains("$950,000"));
        assert!(out.contains("<p>Bright rooms.</p><p>Sea views.</p>"));
        assert!(out.contains("<dt>Year built</dt><dd>2010</dd>"));
        assert!(out.contains("<li>Pool</li>"));
        assert!(out.contains("Ana Silva"));
        assert!(out.contains(r#"name="property_id" value="5""#));
        assert!(out.contains("Villa Luna"));
        assert_eq!(out.matches(r#"<li><img src="#).count(), 2);
        assert!(warnings.is_empty());
    }
}
