#![allow(dead_code)]

use reddit_snapshot::*;
use std::{cell::RefCell, collections::HashMap, path::Path};

/// One subreddit as the fake Reddit knows it: posts in listing order, plus each post's
/// top-level comment listing. Posts in `broken_comments` fail to load their comments.
#[derive(Clone, Default)]
pub struct FakeSubreddit {
    pub posts: Vec<RemoteSubmission>,
    pub comments: HashMap<String, Vec<CommentNode>>,
    pub broken_comments: HashMap<String, FetchError>,
}

/// A scripted [`Fetch`]: subreddits it does not know about are reported as not found.
#[derive(Default)]
pub struct FakeReddit {
    pub subreddits: HashMap<String, FakeSubreddit>,
    pub listings: RefCell<Vec<(String, Mode, u32)>>,
}

impl FakeReddit {
    pub fn with(mut self, name: &str, subreddit: FakeSubreddit) -> Self {
        self.subreddits.insert(name.to_string(), subreddit);
        self
    }

    /// Communities that were listed, in call order.
    pub fn listed(&self) -> Vec<String> {
        self.listings.borrow().iter().map(|(name, _, _)| name.clone()).collect()
    }
}

impl Fetch for FakeReddit {
    fn listing(
        &self,
        community: &str,
        mode: Mode,
        limit: u32,
    ) -> Result<Vec<RemoteSubmission>, FetchError> {
        self.listings.borrow_mut().push((community.to_string(), mode, limit));
        let subreddit = self
            .subreddits
            .get(community)
            .ok_or_else(|| FetchError::NotFound(community.to_string()))?;
        Ok(subreddit.posts.iter().take(limit as usize).cloned().collect())
    }

    fn comments(
        &self,
        community: &str,
        submission_id: &str,
    ) -> Result<Vec<CommentNode>, FetchError> {
        let subreddit = self
            .subreddits
            .get(community)
            .ok_or_else(|| FetchError::NotFound(community.to_string()))?;
        if let Some(err) = subreddit.broken_comments.get(submission_id) {
            return Err(err.clone());
        }
        Ok(subreddit.comments.get(submission_id).cloned().unwrap_or_default())
    }
}

pub fn post(id: &str, title: &str, subreddit: &str) -> RemoteSubmission {
    RemoteSubmission {
        id: id.to_string(),
        title: title.to_string(),
        selftext: format!("body of {id}"),
        subreddit: subreddit.to_string(),
        created_utc: 1_700_000_000.0,
    }
}

pub fn comment(id: &str, body: &str) -> CommentNode {
    CommentNode::Comment {
        id: id.to_string(),
        body: Some(body.to_string()),
    }
}

pub fn more(id: &str) -> CommentNode {
    CommentNode::More { id: Some(id.to_string()) }
}

/// A subreddit with three posts; the first carries two comments and a "more" stub.
pub fn busy_subreddit(name: &str) -> FakeSubreddit {
    FakeSubreddit {
        posts: vec![
            post("p1", "First post", name),
            post("p2", "Second post", name),
            post("p3", "Third post", name),
        ],
        comments: HashMap::from([
            ("p1".to_string(), vec![comment("c1", "nice"), more("m1"), comment("c2", "agreed")]),
            ("p2".to_string(), vec![comment("c3", "hello")]),
        ]),
        broken_comments: HashMap::new(),
    }
}

/// Every `.json` file under `dir`, at any depth.
pub fn json_files(dir: &Path) -> Vec<std::path::PathBuf> {
    let mut found = vec![];
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                found.extend(json_files(&path));
            } else if path.extension().map_or(false, |ext| ext == "json") {
                found.push(path);
            }
        }
    }
    found.sort();
    found
}

/// Drive a full session over scripted input lines, returning everything printed.
pub fn run_session(
    collector: &Collector<&FakeReddit>,
    lines: &[&str],
) -> Result<String, SessionError> {
    let input = lines.iter().map(|line| format!("{line}\n")).collect::<String>();
    let mut session = Session::new(collector, Terminal::new(input.as_bytes(), Vec::new()));
    session.run()?;
    Ok(String::from_utf8_lossy(&session.into_console().into_output()).into_owned())
}
