//! Login flow written as a flat sequence of `.await` points.
//!
//! Each stage's result is bound to a name before the next stage starts, which
//! gives the same ordering as the nested continuations without the nesting.

use core::time::Duration;

use fetchdemo_core::{Profile, SessionUser};
use tokio::time::sleep;
use tracing::debug;

use crate::journal::{FlowState, Journal};
use crate::stage::{LoginSummary, Stage, StageError, StageScript, build_posts, build_profile};

/// Waits out `stage`'s latency and resolves its scripted outcome.
async fn complete_stage(
    stage: Stage,
    delay: Duration,
    script: &StageScript,
    journal: &Journal,
) -> Result<(), StageError> {
    journal.transition(stage.state());
    sleep(delay).await;
    match script.check(stage) {
        Ok(()) => {
            journal.log(stage.completion_message());
            Ok(())
        }
        Err(error) => {
            journal.log(error.to_string());
            journal.transition(FlowState::Failed(stage));
            Err(error)
        }
    }
}

/// Simulated login.
///
/// # Errors
///
/// Returns a [`StageError`] if the login stage is scripted to fail.
pub async fn login_user(
    username: &str,
    password: &str,
    delay: Duration,
    script: &StageScript,
    journal: &Journal,
) -> Result<SessionUser, StageError> {
    debug!(
        "Logging in {username} with a {}-character password",
        password.chars().count()
    );
    complete_stage(Stage::Login, delay, script, journal).await?;
    Ok(SessionUser::new(username))
}

/// Simulated profile fetch.
///
/// # Errors
///
/// Returns a [`StageError`] if the profile stage is scripted to fail.
pub async fn get_user_profile(
    user: SessionUser,
    delay: Duration,
    script: &StageScript,
    journal: &Journal,
) -> Result<Profile, StageError> {
    complete_stage(Stage::Profile, delay, script, journal).await?;
    Ok(build_profile(user))
}

/// Simulated posts fetch.
///
/// # Errors
///
/// Returns a [`StageError`] if the posts stage is scripted to fail.
pub async fn get_user_posts(
    profile: &Profile,
    delay: Duration,
    script: &StageScript,
    journal: &Journal,
) -> Result<Vec<String>, StageError> {
    debug!("Fetching posts for {}", profile.user.username);
    complete_stage(Stage::Posts, delay, script, journal).await?;
    Ok(build_posts())
}

/// Login, then profile, then posts.
///
/// # Errors
///
/// Returns the first failing stage; later stages do not run.
pub async fn run_login_flow(
    username: &str,
    password: &str,
    delay: Duration,
    script: &StageScript,
    journal: &Journal,
) -> Result<LoginSummary, StageError> {
    let user = login_user(username, password, delay, script, journal).await?;
    let profile = get_user_profile(user, delay, script, journal).await?;
    let posts = get_user_posts(&profile, delay, script, journal).await?;

    journal.log(format!("User: {profile}"));
    journal.log(format!("Posts: {posts:?}"));
    journal.transition(FlowState::Done);
    Ok(LoginSummary { profile, posts })
}
