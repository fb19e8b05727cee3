//! Post renderer.
//!
//! Renders a single post with its title, author, date, text and hashtags.

use maud::html;

use super::components::{DESCRIPTION_LEN, UNTITLED, excerpt, format_date, multiline, non_empty};
use super::document::{PageMeta, build_document};
use super::RenderOutcome;
use crate::error::PrerenderError;
use crate::state::AppState;
use crate::store::{Post, User};

/// Author line used when the author record is unavailable.
const UNKNOWN_AUTHOR: &str = "Невідомий автор";

/// Page title used for posts without a title.
const DEFAULT_TITLE: &str = "Публікація";

/// Resolve and render the post `post_id`.
///
/// Reads the post collection, then the author when the post names one.
pub async fn render(state: &AppState, post_id: &str) -> Result<RenderOutcome, PrerenderError> {
    let Some(mut posts) = state.store.fetch_posts().await? else {
        tracing::debug!(post_id = %post_id, "post collection missing");
        return Ok(RenderOutcome::NotFound);
    };

    let Some(post) = posts.remove(post_id) else {
        tracing::debug!(post_id = %post_id, "post not found");
        return Ok(RenderOutcome::NotFound);
    };

    let author = match non_empty(post.user_id.as_deref()) {
        Some(user_id) => state.store.fetch_user(user_id).await?,
        None => None,
    };

    let meta = page(post_id, &post, author.as_ref());
    Ok(RenderOutcome::Rendered(build_document(&state.config, meta)))
}

/// Build the page metadata for a post and its (optional) author.
pub fn page(post_id: &str, post: &Post, author: Option<&User>) -> PageMeta {
    let title = non_empty(post.title.as_deref());
    let content = post.content.as_deref().unwrap_or_default();
    let author_name = author
        .and_then(|a| non_empty(a.name.as_deref()))
        .unwrap_or(UNKNOWN_AUTHOR);
    let date = post.date.as_ref().map(|d| (format_date(d), d.format("%Y-%m-%d").to_string()));
    let hashtags = post
        .hashtags
        .as_ref()
        .map(|h| h.joined())
        .filter(|h| !h.is_empty());

    let description = excerpt(content, DESCRIPTION_LEN).replace('\n', " ");

    let body = html! {
        article {
            h1 { (title.unwrap_or(UNTITLED)) }
            p { strong { "Автор:" } " " (author_name) }
            @if let Some((display, iso)) = &date {
                p { time datetime=(iso) { (display) } }
            }
            div { (multiline(content)) }
            @if let Some(tags) = &hashtags {
                p { (tags) }
            }
        }
    };

    PageMeta {
        title: Some(title.unwrap_or(DEFAULT_TITLE).to_string()),
        description,
        path: Some(format!("/post/{post_id}")),
        image: author
            .and_then(|a| non_empty(a.avatar_url.as_deref()))
            .map(str::to_string),
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Hashtags;
    use chrono::DateTime;

    fn post(title: &str, content: &str) -> Post {
        Post {
            title: Some(title.to_string()),
            content: Some(content.to_string()),
            ..Default::default()
        }
    }

    fn author(name: &str) -> User {
        User {
            name: Some(name.to_string()),
            avatar_url: Some("https://cdn.example/avatar.png".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn page_full_post() {
        let mut p = post("Весна", "Перший рядок\nДругий рядок");
        p.date = DateTime::from_timestamp(1_709_596_800, 0);
        p.hashtags = Some(Hashtags::List(vec!["#весна".into(), "#вірш".into()]));

        let meta = page("p1", &p, Some(&author("Олена")));
        let body = meta.body.into_string();

        assert_eq!(meta.title.as_deref(), Some("Весна"));
        assert_eq!(meta.path.as_deref(), Some("/post/p1"));
        assert_eq!(meta.image.as_deref(), Some("https://cdn.example/avatar.png"));
        assert_eq!(meta.description, "Перший рядок Другий рядок");

        assert!(body.starts_with("<article><h1>Весна</h1>"));
        assert!(body.contains("<p><strong>Автор:</strong> Олена</p>"));
        assert!(body.contains("<p><time datetime=\"2024-03-05\">5 березня 2024 р.</time></p>"));
        assert!(body.contains("<div>Перший рядок<br>Другий рядок</div>"));
        assert!(body.contains("<p>#весна #вірш</p>"));
    }

    #[test]
    fn page_empty_post_uses_defaults() {
        let meta = page("p1", &Post::default(), None);
        let body = meta.body.into_string();

        assert_eq!(meta.title.as_deref(), Some("Публікація"));
        assert_eq!(meta.description, "");
        assert!(meta.image.is_none());
        assert_eq!(
            body,
            "<article><h1>Без назви</h1><p><strong>Автор:</strong> Невідомий автор</p><div></div></article>"
        );
    }

    #[test]
    fn page_author_without_name() {
        let user = User::default();
        let meta = page("p1", &post("T", "C"), Some(&user));
        assert!(meta.body.into_string().contains("Невідомий автор"));
        assert!(meta.image.is_none());
    }

    #[test]
    fn page_description_truncated_to_160_chars() {
        let content = format!("{}\n{}", "а".repeat(100), "б".repeat(100));
        let meta = page("p1", &post("T", &content), None);

        assert_eq!(meta.description.chars().count(), 160);
        assert!(!meta.description.contains('\n'));
        assert_eq!(meta.description.chars().nth(100), Some(' '));
    }

    #[test]
    fn page_content_escaped() {
        let meta = page("p1", &post("<i>T</i>", "<script>x</script>\n&"), None);
        let body = meta.body.into_string();

        assert!(body.contains("<h1>&lt;i&gt;T&lt;/i&gt;</h1>"));
        assert!(body.contains("<div>&lt;script&gt;x&lt;/script&gt;<br>&amp;</div>"));
        // Escaping happens in the document builder for meta fields
        assert_eq!(meta.title.as_deref(), Some("<i>T</i>"));
    }

    #[test]
    fn page_hashtags_string_form() {
        let mut p = post("T", "C");
        p.hashtags = Some(Hashtags::Text("#a #b".into()));
        let body = page("p1", &p, None).body.into_string();
        assert!(body.contains("<p>#a #b</p>"));
    }

    #[test]
    fn page_empty_hashtags_omitted() {
        let mut p = post("T", "C");
        p.hashtags = Some(Hashtags::List(vec![]));
        let body = page("p1", &p, None).body.into_string();
        assert!(body.ends_with("<div>C</div></article>"));
    }

    #[test]
    fn page_without_date_omits_time() {
        let body = page("p1", &post("T", "C"), None).body.into_string();
        assert!(!body.contains("<time"));
    }
}
