//! Login flow built from continuations.
//!
//! Each stage waits out its simulated latency on a spawned task and then
//! hands its result to the callback it was given. The next stage is only
//! started from inside that callback, so ordering is enforced by nesting.

use core::time::Duration;

use fetchdemo_core::{Profile, SessionUser};
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::journal::{FlowState, Journal};
use crate::stage::{
    ChainError, LoginSummary, Stage, StageError, StageScript, build_posts, build_profile,
};
use crate::steps::after;

/// Schedules `stage`: records its state now, resolves it after `delay`.
///
/// On success the stage's completion line is logged and `produce`'s value is
/// passed on; on failure the flow moves to `Failed(stage)`.
fn schedule_stage<T, P, F>(
    stage: Stage,
    delay: Duration,
    script: &StageScript,
    journal: Journal,
    produce: P,
    callback: F,
) where
    T: Send + 'static,
    P: FnOnce() -> T + Send + 'static,
    F: FnOnce(Result<T, StageError>) + Send + 'static,
{
    journal.transition(stage.state());
    let outcome = script.check(stage);
    after(delay, move || match outcome {
        Ok(()) => {
            journal.log(stage.completion_message());
            callback(Ok(produce()));
        }
        Err(error) => {
            journal.log(error.to_string());
            journal.transition(FlowState::Failed(stage));
            callback(Err(error));
        }
    });
}

/// Adapts a value continuation to a stage's result continuation.
///
/// On failure `callback` is dropped without being called and the error is
/// logged, so a waiting caller sees the continuation go away.
fn on_success<T, F>(callback: F) -> impl FnOnce(Result<T, StageError>) + Send + 'static
where
    T: Send + 'static,
    F: FnOnce(T) + Send + 'static,
{
    move |result: Result<T, StageError>| match result {
        Ok(value) => callback(value),
        Err(error) => warn!(%error, "Dropping continuation of failed stage"),
    }
}

/// Simulates a login; `callback` receives the session user after `delay`.
///
/// # Panics
///
/// Panics if called outside a tokio runtime.
pub fn login_user<F>(username: &str, password: &str, delay: Duration, journal: Journal, callback: F)
where
    F: FnOnce(SessionUser) + Send + 'static,
{
    login_user_checked(
        username,
        password,
        delay,
        &StageScript::all_succeed(),
        journal,
        on_success(callback),
    );
}

/// Fallible login; `callback` receives the scripted result after `delay`.
///
/// # Panics
///
/// Panics if called outside a tokio runtime.
pub fn login_user_checked<F>(
    username: &str,
    password: &str,
    delay: Duration,
    script: &StageScript,
    journal: Journal,
    callback: F,
) where
    F: FnOnce(Result<SessionUser, StageError>) + Send + 'static,
{
    debug!(
        "Logging in {username} with a {}-character password",
        password.chars().count()
    );
    let user = SessionUser::new(username);
    schedule_stage(Stage::Login, delay, script, journal, move || user, callback);
}

/// Fetches the profile for `user`; `callback` receives it after `delay`.
///
/// # Panics
///
/// Panics if called outside a tokio runtime.
pub fn get_user_profile<F>(user: SessionUser, delay: Duration, journal: Journal, callback: F)
where
    F: FnOnce(Profile) + Send + 'static,
{
    get_user_profile_checked(
        user,
        delay,
        &StageScript::all_succeed(),
        journal,
        on_success(callback),
    );
}

/// Fallible profile fetch.
///
/// # Panics
///
/// Panics if called outside a tokio runtime.
pub fn get_user_profile_checked<F>(
    user: SessionUser,
    delay: Duration,
    script: &StageScript,
    journal: Journal,
    callback: F,
) where
    F: FnOnce(Result<Profile, StageError>) + Send + 'static,
{
    schedule_stage(
        Stage::Profile,
        delay,
        script,
        journal,
        move || build_profile(user),
        callback,
    );
}

/// Fetches the post labels for `profile`; `callback` receives them after `delay`.
///
/// # Panics
///
/// Panics if called outside a tokio runtime.
pub fn get_user_posts<F>(profile: &Profile, delay: Duration, journal: Journal, callback: F)
where
    F: FnOnce(Vec<String>) + Send + 'static,
{
    get_user_posts_checked(
        profile,
        delay,
        &StageScript::all_succeed(),
        journal,
        on_success(callback),
    );
}

/// Fallible posts fetch.
///
/// # Panics
///
/// Panics if called outside a tokio runtime.
pub fn get_user_posts_checked<F>(
    profile: &Profile,
    delay: Duration,
    script: &StageScript,
    journal: Journal,
    callback: F,
) where
    F: FnOnce(Result<Vec<String>, StageError>) + Send + 'static,
{
    debug!("Fetching posts for {}", profile.user.username);
    schedule_stage(Stage::Posts, delay, script, journal, build_posts, callback);
}

/// Logs the final profile and posts and marks the flow done.
fn finish(journal: &Journal, profile: Profile, posts: Vec<String>) -> LoginSummary {
    journal.log(format!("User: {profile}"));
    journal.log(format!("Posts: {posts:?}"));
    journal.transition(FlowState::Done);
    LoginSummary { profile, posts }
}

/// Login, then profile, then posts, each started from the previous callback.
///
/// # Panics
///
/// Panics if called outside a tokio runtime.
pub fn run_login_flow<F>(username: &str, password: &str, delay: Duration, journal: Journal, done: F)
where
    F: FnOnce(LoginSummary) + Send + 'static,
{
    login_user(username, password, delay, journal.clone(), move |user| {
        get_user_profile(user, delay, journal.clone(), move |profile| {
            get_user_posts(&profile.clone(), delay, journal.clone(), move |posts| {
                done(finish(&journal, profile, posts));
            });
        });
    });
}

/// [`run_login_flow`] with scripted outcomes; `done` receives the first failure, if any.
///
/// # Panics
///
/// Panics if called outside a tokio runtime.
pub fn run_login_flow_fallible<F>(
    username: &str,
    password: &str,
    delay: Duration,
    script: StageScript,
    journal: Journal,
    done: F,
) where
    F: FnOnce(Result<LoginSummary, StageError>) + Send + 'static,
{
    let login_script = script.clone();
    login_user_checked(username, password, delay, &login_script, journal.clone(), move |user| {
        let user = match user {
            Ok(user) => user,
            Err(error) => return done(Err(error)),
        };
        let profile_script = script.clone();
        get_user_profile_checked(user, delay, &profile_script, journal.clone(), move |profile| {
            let profile = match profile {
                Ok(profile) => profile,
                Err(error) => return done(Err(error)),
            };
            get_user_posts_checked(&profile.clone(), delay, &script, journal.clone(), move |posts| {
                done(posts.map(|posts| finish(&journal, profile, posts)));
            });
        });
    });
}

/// Runs [`run_login_flow_fallible`] and waits for its final callback.
///
/// # Errors
///
/// Returns the failing stage, or [`ChainError::Dropped`] if the final
/// callback never runs.
///
/// # Panics
///
/// Panics if called outside a tokio runtime.
pub async fn await_login_flow(
    username: &str,
    password: &str,
    delay: Duration,
    script: StageScript,
    journal: Journal,
) -> Result<LoginSummary, ChainError> {
    let (sender, receiver) = oneshot::channel();
    run_login_flow_fallible(username, password, delay, script, journal, move |result| {
        if sender.send(result).is_err() {
            warn!("Login flow finished after its caller stopped waiting");
        }
    });
    Ok(receiver.await.map_err(|_| ChainError::Dropped)??)
}
