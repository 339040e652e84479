use core::fmt::{Display, Formatter, Result as FmtResult};

use fetchdemo_core::{Profile, SessionUser};
use thiserror::Error;

use crate::journal::FlowState;

/// Age attached to every fetched profile.
pub const PROFILE_AGE: u32 = 30;
/// City attached to every fetched profile.
pub const PROFILE_CITY: &str = "New York";
/// Labels returned by the posts stage.
pub const POST_LABELS: [&str; 3] = ["Post 1", "Post 2", "Post 3"];

/// One simulated network call of the login flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Check credentials and produce a session user.
    Login,
    /// Extend the user with profile fields.
    Profile,
    /// Fetch the user's post labels.
    Posts,
}

impl Stage {
    /// State the flow is in while this stage runs.
    pub fn state(self) -> FlowState {
        match self {
            Self::Login => FlowState::LoggingIn,
            Self::Profile => FlowState::ProfileFetch,
            Self::Posts => FlowState::PostsFetch,
        }
    }

    /// Line logged when the stage succeeds.
    pub fn completion_message(self) -> &'static str {
        match self {
            Self::Login => "User logged in",
            Self::Profile => "Fetched user profile",
            Self::Posts => "Fetched user posts",
        }
    }
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let name = match self {
            Self::Login => "login",
            Self::Profile => "profile",
            Self::Posts => "posts",
        };
        f.write_str(name)
    }
}

/// A stage that completed with a failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{stage} stage failed: {reason}")]
pub struct StageError {
    /// Stage that failed.
    pub stage: Stage,
    /// Scripted failure reason.
    pub reason: String,
}

/// Errors from driving a continuation-style flow to completion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    /// A stage reported failure through its continuation.
    #[error(transparent)]
    Stage(#[from] StageError),

    /// The final continuation was dropped without being called.
    #[error("continuation dropped before the flow completed")]
    Dropped,
}

/// Scripted result of a single stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Outcome {
    /// The stage completes normally.
    #[default]
    Succeed,
    /// The stage completes with the given failure reason.
    Fail(String),
}

/// Per-stage outcomes for one run of the login flow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageScript {
    /// Outcome of the login stage
    login: Outcome,
    /// Outcome of the profile stage
    profile: Outcome,
    /// Outcome of the posts stage
    posts: Outcome,
}

impl StageScript {
    /// Every stage succeeds.
    #[must_use]
    pub fn all_succeed() -> Self {
        Self::default()
    }

    /// Sets the outcome of `stage`.
    #[must_use]
    pub fn with_outcome(mut self, stage: Stage, outcome: Outcome) -> Self {
        match stage {
            Stage::Login => self.login = outcome,
            Stage::Profile => self.profile = outcome,
            Stage::Posts => self.posts = outcome,
        }
        self
    }

    /// Makes `stage` fail with `reason`.
    #[must_use]
    pub fn failing_at<T: Into<String>>(self, stage: Stage, reason: T) -> Self {
        self.with_outcome(stage, Outcome::Fail(reason.into()))
    }

    /// Scripted outcome of `stage`.
    pub fn outcome(&self, stage: Stage) -> &Outcome {
        match stage {
            Stage::Login => &self.login,
            Stage::Profile => &self.profile,
            Stage::Posts => &self.posts,
        }
    }

    /// Resolves the outcome of `stage` into a result.
    ///
    /// # Errors
    ///
    /// Returns a [`StageError`] if the stage is scripted to fail.
    pub fn check(&self, stage: Stage) -> Result<(), StageError> {
        match self.outcome(stage) {
            Outcome::Succeed => Ok(()),
            Outcome::Fail(reason) => Err(StageError {
                stage,
                reason: reason.clone(),
            }),
        }
    }
}

/// What the login flow hands to its final step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginSummary {
    /// Profile built by the profile stage.
    pub profile: Profile,
    /// Labels returned by the posts stage.
    pub posts: Vec<String>,
}

/// Value produced by the profile stage.
pub(crate) fn build_profile(user: SessionUser) -> Profile {
    Profile::extend(user, PROFILE_AGE, PROFILE_CITY)
}

/// Value produced by the posts stage.
pub(crate) fn build_posts() -> Vec<String> {
    POST_LABELS.iter().map(|label| (*label).to_owned()).collect()
}
