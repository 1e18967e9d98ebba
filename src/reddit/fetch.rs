use super::Mode;
use crate::config::Credentials;
use roux::{util::RouxError, Me, Reddit, Subreddit};
use std::cell::RefCell;
use tracing::{debug, info};

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum FetchError {
    #[error("r/{0} does not exist or is not visible")]
    NotFound(String),
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("Reddit returned HTTP {0}")]
    Status(u16),
    #[error("could not parse Reddit's response: {0}")]
    Parse(String),
}

impl From<RouxError> for FetchError {
    fn from(err: RouxError) -> Self {
        match err {
            RouxError::Status(response) => match response.status().as_u16() {
                401 | 403 => Self::Auth(format!("HTTP {}", response.status())),
                code => Self::Status(code),
            },
            RouxError::Network(err) => Self::Network(err.to_string()),
            RouxError::Parse(err) => Self::Parse(err.to_string()),
            RouxError::Auth(reason) => Self::Auth(reason),
            #[allow(unreachable_patterns)]
            other => Self::Parse(format!("{other:?}")),
        }
    }
}

/// The parts of a listed submission that end up in a snapshot.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RemoteSubmission {
    pub id: String,
    pub title: String,
    pub selftext: String,
    pub subreddit: String,
    pub created_utc: f64,
}

/// A node of a submission's top-level comment listing.
#[derive(Clone, Debug, PartialEq)]
pub enum CommentNode {
    Comment { id: String, body: Option<String> },
    /// A "load more comments" stub standing in for replies that were not sent.
    More { id: Option<String> },
}

/// Everything the collector needs from Reddit.
pub trait Fetch {
    fn listing(
        &self,
        community: &str,
        mode: Mode,
        limit: u32,
    ) -> Result<Vec<RemoteSubmission>, FetchError>;
    fn comments(
        &self,
        community: &str,
        submission_id: &str,
    ) -> Result<Vec<CommentNode>, FetchError>;
}

impl<F> Fetch for &F
where
    F: Fetch + ?Sized,
{
    fn listing(
        &self,
        community: &str,
        mode: Mode,
        limit: u32,
    ) -> Result<Vec<RemoteSubmission>, FetchError> {
        (**self).listing(community, mode, limit)
    }

    fn comments(
        &self,
        community: &str,
        submission_id: &str,
    ) -> Result<Vec<CommentNode>, FetchError> {
        (**self).comments(community, submission_id)
    }
}

impl From<roux::submission::SubmissionData> for RemoteSubmission {
    fn from(post: roux::submission::SubmissionData) -> Self {
        Self {
            id: post.id,
            title: post.title,
            selftext: post.selftext,
            subreddit: post.subreddit,
            created_utc: post.created_utc,
        }
    }
}

impl From<roux::comment::CommentData> for CommentNode {
    fn from(comment: roux::comment::CommentData) -> Self {
        match (comment.id, comment.body) {
            (Some(id), Some(body)) => Self::Comment { id, body: Some(body) },
            (id, None) => Self::More { id },
            (None, Some(_)) => Self::More { id: None },
        }
    }
}

/// [`Fetch`] backed by roux's blocking client.
///
/// With a username and password in the credentials, the first request logs in through
/// the OAuth password flow and every later request reuses that session. Without them,
/// requests go to Reddit's anonymous JSON endpoints.
pub struct RouxFetcher {
    credentials: Credentials,
    session: RefCell<Option<Me>>,
}

impl RouxFetcher {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            session: RefCell::new(None),
        }
    }

    fn subreddit(&self, name: &str) -> Result<Subreddit, FetchError> {
        let (username, password) = match self.credentials.login() {
            Some(login) => login,
            None => return Ok(Subreddit::new(name)),
        };

        let mut session = self.session.borrow_mut();
        if let Some(me) = session.as_ref() {
            return Ok(Subreddit::new_oauth(name, &me.client));
        }

        info!("Logging in to Reddit as u/{username}");
        let me = Reddit::new(
            &self.credentials.user_agent,
            &self.credentials.client_id,
            &self.credentials.client_secret,
        )
        .username(username)
        .password(password)
        .login()?;
        let subreddit = Subreddit::new_oauth(name, &me.client);
        *session = Some(me);
        Ok(subreddit)
    }
}

impl Fetch for RouxFetcher {
    fn listing(
        &self,
        community: &str,
        mode: Mode,
        limit: u32,
    ) -> Result<Vec<RemoteSubmission>, FetchError> {
        let subreddit = self.subreddit(community)?;
        debug!("Listing {limit} {mode} posts from r/{community}");
        let raw_posts = match mode {
            Mode::Top => subreddit.top(limit, None),
            Mode::Hot => subreddit.hot(limit, None),
            Mode::New => subreddit.latest(limit, None),
        }
        .map_err(|err| match FetchError::from(err) {
            FetchError::Status(404) => FetchError::NotFound(community.to_string()),
            other => other,
        })?;

        Ok(raw_posts
            .data
            .children
            .into_iter()
            .map(|post| RemoteSubmission::from(post.data))
            .collect())
    }

    fn comments(
        &self,
        community: &str,
        submission_id: &str,
    ) -> Result<Vec<CommentNode>, FetchError> {
        let subreddit = self.subreddit(community)?;
        debug!("Retrieving top-level comments of {submission_id} in r/{community}");
        let raw_comments = subreddit.article_comments(submission_id, Some(1), None)?;

        Ok(raw_comments
            .data
            .children
            .into_iter()
            .map(|comment| CommentNode::from(comment.data))
            .collect())
    }
}
