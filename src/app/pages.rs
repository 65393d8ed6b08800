//! Server-rendered pages. All state changes go through the JSON API from the
//! embedded script, which reloads the page after every successful mutation.

use crate::app::response::ApiQuery;
use crate::core::AppState;
use crate::domain::model::{Product, Ranking};
use crate::domain::ranks::MAX_PRODUCTS;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;
use std::fmt::Write;

const STYLE: &str = include_str!("assets/style.css");
const SCRIPT: &str = include_str!("assets/ranking.js");

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub id: Option<String>,
}

pub async fn index(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Response {
    let Some(id) = query.id.filter(|id| !id.trim().is_empty()) else {
        return Html(render_create_page()).into_response();
    };

    match state.store.get(&id) {
        Ok(Some(ranking)) => {
            Html(render_ranking_page(&ranking, state.public_base_url.as_deref())).into_response()
        }
        Ok(None) => (StatusCode::NOT_FOUND, Html(render_not_found_page(&id))).into_response(),
        Err(e) => e.into_response(),
    }
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Only http(s) links are rendered as clickable; anything else becomes `#`.
fn safe_href(link: &str) -> String {
    match url::Url::parse(link) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => escape_html(link),
        _ => "#".to_string(),
    }
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{STYLE}</style>
</head>
<body>
{body}
<script>{SCRIPT}</script>
</body>
</html>
"#,
        title = escape_html(title),
    )
}

pub fn render_create_page() -> String {
    layout(
        "Best Buys Ranking",
        r#"<main class="container narrow">
  <section class="card">
    <h1 class="center">Best Buys Ranking</h1>
    <form id="create-ranking" class="stack">
      <label>Ranking title
        <input type="text" name="title" placeholder="e.g. Top 20 things I bought this year" autofocus>
      </label>
      <button type="submit" class="primary wide">+ Create a new ranking</button>
    </form>
  </section>
</main>"#,
    )
}

pub fn render_not_found_page(id: &str) -> String {
    let body = format!(
        r#"<main class="container narrow">
  <section class="card center">
    <h1>Ranking not found</h1>
    <p class="muted">No ranking with id <code>{}</code> exists. It may have been deleted or the server restarted.</p>
    <a href="/" class="button primary">Back to home</a>
  </section>
</main>"#,
        escape_html(id)
    );
    layout("Ranking not found", &body)
}

fn rank_class(rank: usize) -> &'static str {
    match rank {
        1 => "rank gold",
        2 => "rank silver",
        3 => "rank bronze",
        _ => "rank",
    }
}

fn render_product(out: &mut String, product: &Product) {
    let id = escape_html(&product.id);
    let name = escape_html(&product.name);
    let _ = write!(
        out,
        r#"    <li class="product" draggable="true" data-product-id="{id}">
      <span class="handle" title="Drag to reorder">⋮⋮</span>
      <span class="{rank_class}">{rank}</span>
"#,
        rank_class = rank_class(product.rank),
        rank = product.rank,
    );
    match &product.image_url {
        Some(image) => {
            let _ = writeln!(
                out,
                r#"      <img class="thumb" src="{}" alt="{}" loading="lazy">"#,
                safe_href(image),
                name
            );
        }
        None => out.push_str("      <span class=\"thumb placeholder\">No image</span>\n"),
    }
    let _ = write!(
        out,
        r#"      <div class="info">
        <a href="{href}" target="_blank" rel="noopener noreferrer">{name}</a>
"#,
        href = safe_href(&product.link),
    );
    if let Some(source_id) = &product.source_id {
        let _ = writeln!(
            out,
            r#"        <small class="muted">{}</small>"#,
            escape_html(source_id)
        );
    }
    let _ = write!(
        out,
        r#"      </div>
      <button type="button" class="delete" data-product-id="{id}">Delete</button>
    </li>
"#
    );
}

fn render_add_form() -> &'static str {
    r#"  <details class="card add-product">
    <summary>+ Add a product</summary>
    <form id="add-product" class="stack">
      <label>Catalog identifier (optional, fills the form from a lookup)
        <span class="row">
          <input type="text" name="sourceId" placeholder="B08N5WRWNW">
          <button type="button" id="lookup">Look up</button>
        </span>
      </label>
      <label>Product name <span class="required">*</span>
        <input type="text" name="name">
      </label>
      <label>Image URL (optional)
        <input type="url" name="imageUrl" placeholder="https://example.com/image.jpg">
      </label>
      <label>Product link <span class="required">*</span>
        <input type="url" name="link" placeholder="https://www.amazon.co.jp/dp/...">
      </label>
      <div class="row">
        <button type="submit" class="primary wide">Add</button>
        <button type="reset" id="cancel-add">Cancel</button>
      </div>
    </form>
  </details>
"#
}

pub fn render_ranking_page(ranking: &Ranking, public_base_url: Option<&str>) -> String {
    let count = ranking.products.len();
    let mut body = String::new();

    let _ = write!(
        body,
        r#"<main class="container" id="ranking" data-ranking-id="{id}" data-share-base="{share}">
  <nav class="toolbar">
    <a href="/">← Back to home</a>
    <button type="button" id="share" class="share">Share</button>
  </nav>
  <section class="card">
    <input type="text" id="title" class="title-input" value="{title}" aria-label="Ranking title">
    <p class="muted">{count} / {max} products</p>
  </section>
"#,
        id = escape_html(&ranking.id),
        share = escape_html(public_base_url.unwrap_or("")),
        title = escape_html(&ranking.title),
        max = MAX_PRODUCTS,
    );

    if !ranking.products.is_empty() {
        body.push_str("  <ol id=\"products\" class=\"products\">\n");
        for product in &ranking.products {
            render_product(&mut body, product);
        }
        body.push_str("  </ol>\n");
    }

    if ranking.is_full() {
        let _ = writeln!(
            body,
            r#"  <div class="notice">A ranking holds at most {} products.</div>"#,
            MAX_PRODUCTS
        );
    } else {
        body.push_str(render_add_form());
    }
    body.push_str("</main>");

    layout(&ranking.title, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn ranking_with(count: usize) -> Ranking {
        Ranking {
            id: "r-1".to_string(),
            title: "Top <Gifts>".to_string(),
            created_at: Utc::now(),
            products: (1..=count)
                .map(|rank| Product {
                    id: format!("p-{}", rank),
                    name: format!("Gift {}", rank),
                    image_url: (rank % 2 == 0).then(|| format!("https://img.example/{}.jpg", rank)),
                    link: format!("https://shop.example/{}", rank),
                    source_id: None,
                    rank,
                })
                .collect(),
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_safe_href_blocks_script_links() {
        assert_eq!(safe_href("javascript:alert(1)"), "#");
        assert_eq!(safe_href("https://shop.example/a?b=1&c=2"), "https://shop.example/a?b=1&amp;c=2");
    }

    #[test]
    fn test_ranking_page_lists_products_in_rank_order() {
        let html = render_ranking_page(&ranking_with(3), None);
        assert!(html.contains("Top &lt;Gifts&gt;"));
        assert!(html.contains("3 / 20 products"));
        let first = html.find("data-product-id=\"p-1\"").unwrap();
        let third = html.find("data-product-id=\"p-3\"").unwrap();
        assert!(first < third);
        assert!(html.contains("id=\"add-product\""));
        assert!(html.contains("https://img.example/2.jpg"));
    }

    #[test]
    fn test_empty_ranking_has_no_list() {
        let html = render_ranking_page(&ranking_with(0), Some("https://rank.example.com"));
        assert!(!html.contains("id=\"products\""));
        assert!(html.contains("data-share-base=\"https://rank.example.com\""));
    }

    #[test]
    fn test_full_ranking_replaces_form_with_notice() {
        let html = render_ranking_page(&ranking_with(MAX_PRODUCTS), None);
        assert!(html.contains("20 / 20 products"));
        assert!(html.contains("class=\"notice\""));
        assert!(!html.contains("id=\"add-product\""));
    }

    #[test]
    fn test_create_and_not_found_pages() {
        assert!(render_create_page().contains("id=\"create-ranking\""));
        let html = render_not_found_page("<missing>");
        assert!(html.contains("&lt;missing&gt;"));
    }
}
