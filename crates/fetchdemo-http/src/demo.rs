use crate::client::FixtureClient;
use crate::render::{Page, USER_LIST_ID, render_users};
use fetchdemo_core::{NewPost, NewUser, Post, Result, User};
use tracing::info;

/// What one run of the demo produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoReport {
    /// Number of users appended to the user list.
    pub users_rendered: usize,
    /// Echo of the created sample post.
    pub post: Post,
    /// Echo of the created sample user.
    pub user: User,
}

/// Runs the HTTP demo against `client`, rendering into `page`.
///
/// Steps run strictly one after another: fetch users, render them, create the
/// sample post, create the sample user. Nothing is issued concurrently even
/// though the two writes do not depend on each other.
///
/// # Errors
///
/// Returns the first error from any step; later steps are not attempted.
pub async fn run(client: &FixtureClient, page: &mut Page) -> Result<DemoReport> {
    info!("{}", page.heading());

    let users = client.fetch_users().await?;
    let users_rendered = render_users(page, USER_LIST_ID, &users)?;
    info!("Rendered {users_rendered} users");

    let post = client.create_post(&NewPost::sample()).await?;
    info!(?post, "Created post");

    let user = client.create_user(&NewUser::sample()).await?;
    info!(?user, "Created user");

    Ok(DemoReport {
        users_rendered,
        post,
        user,
    })
}
