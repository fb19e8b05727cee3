//! Profile renderer.
//!
//! Renders an author's page with name, bio, post count and links to their
//! most recent posts.

use maud::html;

use super::components::{DESCRIPTION_LEN, UNTITLED, excerpt, non_empty};
use super::document::{PageMeta, build_document};
use super::RenderOutcome;
use crate::config::Config;
use crate::error::PrerenderError;
use crate::state::AppState;
use crate::store::{Post, PostCollection, User};

/// Number of posts linked from a profile page.
pub const RECENT_POSTS_LIMIT: usize = 10;

/// Heading used for users without a name.
const DEFAULT_NAME: &str = "Автор";

/// Page title used for users without a name.
const DEFAULT_TITLE: &str = "Профіль автора";

/// Resolve and render the profile of `user_id`.
///
/// Reads the user record, then the post collection for the post list.
pub async fn render(state: &AppState, user_id: &str) -> Result<RenderOutcome, PrerenderError> {
    let Some(user) = state.store.fetch_user(user_id).await? else {
        tracing::debug!(user_id = %user_id, "user not found");
        return Ok(RenderOutcome::NotFound);
    };

    let posts = state.store.fetch_posts().await?.unwrap_or_default();

    let meta = page(&state.config, user_id, &user, &posts);
    Ok(RenderOutcome::Rendered(build_document(&state.config, meta)))
}

/// Build the page metadata for a user profile.
///
/// The post count line shows the stored `postsCount`, which can differ from
/// the number of linked posts.
pub fn page(config: &Config, user_id: &str, user: &User, posts: &PostCollection) -> PageMeta {
    let name = non_empty(user.name.as_deref());
    let bio = non_empty(user.bio.as_deref());

    let description = match (bio, name) {
        (Some(bio), _) => excerpt(bio, DESCRIPTION_LEN),
        (None, Some(name)) => format!("Профіль автора {name} на платформі {}", config.brand),
        (None, None) => format!("Профіль автора на платформі {}", config.brand),
    };

    let recent = recent_posts(user_id, posts);

    let body = html! {
        article {
            h1 { (name.unwrap_or(DEFAULT_NAME)) }
            @if let Some(bio) = bio {
                p { (bio) }
            }
            p { "📝 Публікацій: " (user.posts_count.unwrap_or(0)) }
            @if !recent.is_empty() {
                ul {
                    @for (post_id, post) in &recent {
                        li {
                            a href={ (config.site_url) "/post/" (post_id) } {
                                (non_empty(post.title.as_deref()).unwrap_or(UNTITLED))
                            }
                        }
                    }
                }
            }
        }
    };

    PageMeta {
        title: Some(name.unwrap_or(DEFAULT_TITLE).to_string()),
        description,
        path: Some(format!("/profile/{user_id}")),
        image: non_empty(user.avatar_url.as_deref()).map(str::to_string),
        body,
    }
}

/// The user's most recent publishable posts, newest first.
///
/// Posts without a title or content are skipped entirely. Posts without a
/// date sort after dated ones.
pub fn recent_posts<'a>(user_id: &str, posts: &'a PostCollection) -> Vec<(&'a str, &'a Post)> {
    let mut own: Vec<_> = posts
        .iter()
        .filter(|(_, post)| {
            post.user_id.as_deref() == Some(user_id)
                && non_empty(post.title.as_deref()).is_some()
                && non_empty(post.content.as_deref()).is_some()
        })
        .map(|(id, post)| (id.as_str(), post))
        .collect();

    own.sort_by(|(_, a), (_, b)| b.date.cmp(&a.date));
    own.truncate(RECENT_POSTS_LIMIT);
    own
}
