//! CMS pages and their templates.

use std::fmt::Write;

use estate_api::City;
use estate_shortcode::escape_html;

use super::forms::{inquiry_form, mandate_form};

/// Page template named by the CMS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Template {
    #[default]
    Default,
    /// Content followed by the inquiry and mandate forms.
    Contact,
    About,
    /// Content without the reading-width container.
    FullWidth,
}

impl Template {
    /// Parse a template name. Missing or unknown names give [`Template::Default`].
    #[must_use]
    pub fn parse(name: Option<&str>) -> Self {
        match name.map(|n| n.trim().to_ascii_lowercase()).as_deref() {
            Some("contact") => Self::Contact,
            Some("about") => Self::About,
            Some("full-width" | "full_width" | "fullwidth") => Self::FullWidth,
            _ => Self::Default,
        }
    }

    fn class(self) -> &'static str {
        match self {
            Self::Default => "page",
            Self::Contact => "page page-contact",
            Self::About => "page page-about",
            Self::FullWidth => "page page-full-width",
        }
    }
}

/// Render a page. `body` is the rendered shortcode output.
pub(crate) fn render(template: Template, title: &str, body: &str, cities: &[City], out: &mut String) {
    write!(
        out,
        r#"<article class="{}"><h1>{}</h1>"#,
        template.class(),
        escape_html(title)
    )
    .unwrap();

    match template {
        Template::FullWidth => out.push_str(body),
        Template::Default | Template::About => {
            out.push_str(r#"<div class="prose">"#);
            out.push_str(body);
            out.push_str("</div>");
        }
        Template::Contact => {
            out.push_str(r#"<div class="prose">"#);
            out.push_str(body);
            out.push_str(r#"</div><div class="contact-forms">"#);
            inquiry_form(cities, out);
            mandate_form(cities, out);
            out.push_str("</div>");
        }
    }
    out.push_str("</article>");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(Template::parse(None), Template::Default);
        assert_eq!(Template::parse(Some("Contact")), Template::Contact);
        assert_eq!(Template::parse(Some("about")), Template::About);
        assert_eq!(Template::parse(Some("full-width")), Template::FullWidth);
        assert_eq!(Template::parse(Some("landing")), Template::Default);
    }

    #[test]
    fn test_contact_template_adds_forms() {
        let mut out = String::new();
        render(Template::Contact, "Contact us", "<p>Hi</p>", &[], &mut out);
        assert!(out.contains(r#"<div class="prose"><p>Hi</p></div>"#));
        assert!(out.contains(r#"action="/inquiry""#));
        assert!(out.contains(r#"action="/mandate""#));
    }

    #[test]
    fn test_full_width_skips_prose() {
        let mut out = String::new();
        render(Template::FullWidth, "Wide", "<p>x</p>", &[], &mut out);
        assert!(out.starts_with(r#"<article class="page page-full-width"><h1>Wide</h1><p>x</p>"#));
    }
}
