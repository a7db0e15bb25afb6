//! Blog listing and article pages.

use std::fmt::Write;

use estate_api::{Paginated, Post, PostFilters, encode_component};
use estate_shortcode::{escape_html, safe_url};

use super::post_card;
use crate::format::format_date;
use crate::pagination::Pagination;

pub(crate) fn render_list(
    posts: &Paginated<Post>,
    filters: &PostFilters,
    params: &[(String, String)],
    out: &mut String,
) {
    out.push_str(r#"<section class="blog"><h1>Blog</h1>"#);
    if let Some(category) = filters.category.as_deref() {
        write!(
            out,
            r#"<p class="filter">Category: <strong>{}</strong> <a href="/blog">Clear</a></p>"#,
            escape_html(category)
        )
        .unwrap();
    }
    if let Some(tag) = filters.tag.as_deref() {
        write!(
            out,
            r#"<p class="filter">Tag: <strong>{}</strong> <a href="/blog">Clear</a></p>"#,
            escape_html(tag)
        )
        .unwrap();
    }

    if posts.data.is_empty() {
        out.push_str(r#"<p class="empty">No posts yet.</p>"#);
    } else {
        out.push_str(r#"<div class="post-grid">"#);
        for post in &posts.data {
            post_card(post, out);
        }
        out.push_str("</div>");
    }
    Pagination::from_meta(&posts.meta).render("/blog", params, out);
    out.push_str("</section>");
}

/// Render a post around its `body` HTML.
pub(crate) fn render_post(post: &Post, body: &str, out: &mut String) {
    out.push_str(r#"<article class="post"><header>"#);
    if let Some(category) = post.category.as_deref() {
        write!(
            out,
            r#"<a class="badge" href="/blog?category={}">{}</a>"#,
            escape_html(&encode_component(category)),
            escape_html(category)
        )
        .unwrap();
    }
    write!(out, "<h1>{}</h1>", escape_html(&post.title)).unwrap();

    let mut byline = Vec::new();
    if let Some(author) = post.author.as_deref() {
        byline.push(format!("By {}", escape_html(author)));
    }
    if let Some(date) = post.published_at.as_deref().and_then(format_date) {
        byline.push(format!("<time>{date}</time>"));
    }
    if !byline.is_empty() {
        write!(out, r#"<p class="byline">{}</p>"#, byline.join(" · ")).unwrap();
    }
    out.push_str("</header>");

    if let Some(image) = post.featured_image.as_deref() {
        write!(
            out,
            r#"<img class="featured" src="{}" alt="{}">"#,
            escape_html(safe_url(image)),
            escape_html(&post.title)
        )
        .unwrap();
    }

    out.push_str(r#"<div class="post-content">"#);
    out.push_str(body);
    out.push_str("</div>");

    if !post.tags.is_empty() {
        out.push_str(r#"<footer><ul class="tags">"#);
        for tag in &post.tags {
            write!(
                out,
                r#"<li><a href="/blog?tag={}">#{}</a></li>"#,
                escape_html(&encode_component(tag)),
                escape_html(tag)
            )
            .unwrap();
        }
        out.push_str("</ul></footer>");
    }
    out.push_str(r#"<a class="back" href="/blog">Back to blog</a></article>"#);
}
