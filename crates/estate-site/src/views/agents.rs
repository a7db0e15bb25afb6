//! Agent directory and profile pages.

use std::fmt::Write;

use estate_api::{Agent, Paginated};
use estate_shortcode::{escape_html, safe_url};

use super::{agent_card, avatar, contact_links};
use crate::pagination::Pagination;

pub(crate) fn render_list(agents: &Paginated<Agent>, params: &[(String, String)], out: &mut String) {
    out.push_str(concat!(
        r#"<section class="agents"><h1>Our Agents</h1>"#,
        "<p>Meet the team that will help you find the right property</p>",
    ));
    if agents.data.is_empty() {
        out.push_str(r#"<p class="empty">No agents found.</p>"#);
    } else {
        out.push_str(r#"<div class="agent-grid">"#);
        for agent in &agents.data {
            agent_card(agent, out);
        }
        out.push_str("</div>");
    }
    Pagination::from_meta(&agents.meta).render("/agents", params, out);
    out.push_str("</section>");
}

pub(crate) fn render_profile(agent: &Agent, out: &mut String) {
    out.push_str(r#"<article class="agent-profile"><header>"#);
    avatar(agent, out);
    write!(out, "<h1>{}</h1>", escape_html(&agent.name)).unwrap();
    if let Some(position) = agent.position.as_deref() {
        write!(out, r#"<p class="position">{}</p>"#, escape_html(position)).unwrap();
    }
    if let Some(count) = agent.properties_count {
        let noun = if count == 1 { "property" } else { "properties" };
        write!(out, r#"<p class="listing-count">{count} {noun}</p>"#).unwrap();
    }
    out.push_str("</header>");

    contact_links(agent, out);

    let mut social = agent.social_links().peekable();
    if social.peek().is_some() {
        out.push_str(r#"<ul class="social">"#);
        for (network, url) in social {
            write!(
                out,
                r#"<li><a href="{}" target="_blank" rel="noopener noreferrer">{network}</a></li>"#,
                escape_html(safe_url(url))
            )
            .unwrap();
        }
        out.push_str("</ul>");
    }

    if let Some(bio) = agent.bio.as_deref().filter(|b| !b.trim().is_empty()) {
        out.push_str(r#"<section class="bio"><h2>About</h2>"#);
        for paragraph in bio.split("\n\n").filter(|p| !p.trim().is_empty()) {
            write!(out, "<p>{}</p>", escape_html(paragraph.trim())).unwrap();
        }
        out.push_str("</section>");
    }
    out.push_str("</article>");
}
