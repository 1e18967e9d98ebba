mod fetch;
pub use fetch::*;

mod scrape;
pub use scrape::*;


use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fmt,
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

pub trait Data: Sized {
    fn save(&self, file: &Path) -> Result<(), DataError>;
    fn restore(file: &Path) -> Result<Self, DataError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The server-side ordering applied when listing a subreddit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Top,
    Hot,
    #[default]
    New,
}

impl Mode {
    pub const VALUES: [Self; 3] = [Self::Top, Self::Hot, Self::New];

    /// The number a user types to pick this mode.
    pub fn selector(&self) -> &'static str {
        match self {
            Self::Top => "1",
            Self::Hot => "2",
            Self::New => "3",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Hot => "hot",
            Self::New => "new",
        }
    }

    /// Strict lookup of a menu selector ("1", "2" or "3").
    pub fn from_selector(selector: &str) -> Option<Self> {
        Self::VALUES
            .into_iter()
            .find(|mode| mode.selector() == selector.trim())
    }

    /// Exact lookup of a mode name; anything else lists the newest posts.
    pub fn from_param(param: &str) -> Self {
        Self::VALUES
            .into_iter()
            .find(|mode| mode.name() == param)
            .unwrap_or(Self::New)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A confirmed request: which subreddits, how many posts, and in what order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Query {
    pub communities: Vec<String>,
    pub limit: u32,
    pub mode: Mode,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    /// The title of the post.
    pub title: String,
    /// The post content.
    pub selftext: String,
    /// The subreddit the post was made in, without the "r/" prefix.
    pub subreddit: String,
    /// Creation time in seconds since the epoch.
    pub utc: f64,
    /// Top-level comments, by comment ID.
    pub comments: BTreeMap<String, String>,
}

/// Submission records keyed by submission ID. This is exactly what lands in an output file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultSet(pub BTreeMap<String, SubmissionRecord>);

impl ResultSet {
    pub fn insert(&mut self, id: String, record: SubmissionRecord) {
        self.0.insert(id, record);
    }

    pub fn get(&self, id: &str) -> Option<&SubmissionRecord> {
        self.0.get(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl Data for ResultSet {
    fn save(&self, file: &Path) -> Result<(), DataError> {
        let mut writer = BufWriter::new(File::create(file)?);
        serde_json::to_writer(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    fn restore(file: &Path) -> Result<Self, DataError> {
        let reader = BufReader::new(File::open(file)?);
        Ok(serde_json::from_reader(reader)?)
    }
}
