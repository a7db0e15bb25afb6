//! Document shell with header and footer navigation.

use std::fmt::Write;

use estate_api::MenuItem;
use estate_shortcode::{escape_html, safe_url};

/// Site chrome shared by every page.
#[derive(Debug, Clone, Default)]
pub(crate) struct Layout {
    pub site_name: String,
    pub header: Vec<MenuItem>,
    pub footer: Vec<MenuItem>,
}

impl Layout {
    /// Wrap a page body into a full HTML document.
    pub(crate) fn document(&self, title: &str, description: Option<&str>, body: &str) -> String {
        let mut out = String::with_capacity(body.len() + 2048);
        let full_title = if title.is_empty() || title == self.site_name {
            self.site_name.clone()
        } else {
            format!("{title} | {}", self.site_name)
        };

        out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
        out.push_str(
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
        );
        writeln!(out, "<title>{}</title>", escape_html(&full_title)).unwrap();
        if let Some(description) = description.filter(|d| !d.is_empty()) {
            writeln!(
                out,
                r#"<meta name="description" content="{}">"#,
                escape_html(description)
            )
            .unwrap();
        }
        out.push_str("<link rel=\"stylesheet\" href=\"/static/site.css\">\n</head>\n<body>\n");

        write!(
            out,
            r#"<header class="site-header"><a class="brand" href="/">{}</a>"#,
            escape_html(&self.site_name)
        )
        .unwrap();
        if !self.header.is_empty() {
            out.push_str(r#"<nav class="main-nav" aria-label="Main">"#);
            menu(&self.header, &mut out);
            out.push_str("</nav>");
        }
        out.push_str("</header>\n<main>\n");
        out.push_str(body);
        out.push_str("\n</main>\n<footer class=\"site-footer\">");
        if !self.footer.is_empty() {
            out.push_str(r#"<nav aria-label="Footer">"#);
            menu(&self.footer, &mut out);
            out.push_str("</nav>");
        }
        write!(
            out,
            "<p>&copy; {}</p></footer>\n</body>\n</html>\n",
            escape_html(&self.site_name)
        )
        .unwrap();
        out
    }
}

/// Nested `<ul>` for menu items, ordered by `sort_order`.
fn menu(items: &[MenuItem], out: &mut String) {
    let mut items: Vec<&MenuItem> = items.iter().collect();
    items.sort_by_key(|item| item.sort_order);

    out.push_str("<ul>");
    for item in items {
        write!(out, r#"<li><a href="{}""#, escape_html(safe_url(&item.url))).unwrap();
        if item.open_in_new_tab {
            out.push_str(r#" target="_blank" rel="noopener noreferrer""#);
        }
        write!(out, ">{}</a>", escape_html(&item.label)).unwrap();
        if !item.children.is_empty() {
            menu(&item.children, out);
        }
        out.push_str("</li>");
    }
    out.push_str("</ul>");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> Layout {
        let mut buy = MenuItem::new("Buy", "/properties?type=sale");
        buy.sort_order = 2;
        let mut villas = MenuItem::new("Villas", "/properties?property_type=villa");
        villas.open_in_new_tab = true;
        buy.children.push(villas);
        let mut home = MenuItem::new("Home", "/");
        home.sort_order = 1;

        Layout {
            site_name: "Coastline".to_owned(),
            header: vec![buy, home],
            footer: vec![MenuItem::new("Privacy", "/privacy")],
        }
    }

    #[test]
    fn test_document_title_and_description() {
        let html = layout().document("Properties", Some("All <homes>"), "<p>body</p>");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Properties | Coastline</title>"));
        assert!(html.contains(r#"content="All &lt;homes&gt;""#));
        assert!(html.contains("<p>body</p>"));
    }

    #[test]
    fn test_home_title_is_site_name() {
        let html = layout().document("Coastline", None, "");
        assert!(html.contains("<title>Coastline</title>"));
        assert!(!html.contains("name=\"description\""));
    }

    #[test]
    fn test_menu_sorted_and_nested() {
        let html = layout().document("x", None, "");
        let home = html.find(">Home<").unwrap();
        let buy = html.find(">Buy<").unwrap();
        assert!(home < buy);
        assert!(html.contains(r#"target="_blank" rel="noopener noreferrer">Villas"#));
        assert!(html.contains(r#"href="/properties?type=sale""#));
    }

    #[test]
    fn test_empty_menus_omit_nav() {
        let layout = Layout {
            site_name: "S".to_owned(),
            ..Layout::default()
        };
        let html = layout.document("x", None, "");
        assert!(!html.contains("<nav"));
    }
}
