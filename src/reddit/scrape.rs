use super::{CommentNode, Fetch, FetchError, RemoteSubmission, ResultSet, SubmissionRecord};
use std::collections::BTreeMap;
use tracing::debug;

/// How many of the listed submissions make it into a snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Harvest {
    /// Only the first listed submission is recorded; the rest of the listing is dropped.
    #[default]
    FirstOnly,
    /// Every listed submission is recorded.
    All,
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CommentError {
    #[error("placeholder for more comments ({0:?})")]
    Placeholder(Option<String>),
    #[error("comment {0} has no body")]
    MissingBody(String),
}

/// Resolve one node of a comment listing into its ID and body.
pub fn resolve_comment(node: CommentNode) -> Result<(String, String), CommentError> {
    match node {
        CommentNode::Comment { id, body: Some(body) } => Ok((id, body)),
        CommentNode::Comment { id, body: None } => Err(CommentError::MissingBody(id)),
        CommentNode::More { id } => Err(CommentError::Placeholder(id)),
    }
}

/// Build the record for one submission, pulling its top-level comments from Reddit.
pub fn scrape_submission<F: Fetch>(
    fetch: &F,
    community: &str,
    post: RemoteSubmission,
) -> Result<(String, SubmissionRecord), FetchError> {
    let mut comments = BTreeMap::new();
    for node in fetch.comments(community, &post.id)? {
        match resolve_comment(node) {
            Ok((id, body)) => {
                comments.insert(id, body);
            }
            Err(err) => debug!("Skipping comment on {}: {err}", post.id),
        }
    }

    Ok((
        post.id,
        SubmissionRecord {
            title: post.title,
            selftext: post.selftext,
            subreddit: post.subreddit,
            utc: post.created_utc,
            comments,
        },
    ))
}

/// Flatten a page of submissions (and their comments) into a [`ResultSet`].
pub fn scrape_listing<F: Fetch>(
    fetch: &F,
    community: &str,
    posts: Vec<RemoteSubmission>,
    harvest: Harvest,
) -> Result<ResultSet, FetchError> {
    let take = match harvest {
        Harvest::FirstOnly => 1,
        Harvest::All => posts.len(),
    };

    let mut results = ResultSet::default();
    for post in posts.into_iter().take(take) {
        let (id, record) = scrape_submission(fetch, community, post)?;
        results.insert(id, record);
    }
    Ok(results)
}
