use crate::{
    reddit::{scrape_listing, Data, DataError, Fetch, FetchError, Harvest, Mode, Query},
    session::Console,
};
use chrono::{Local, NaiveDateTime};
use indicatif::{ProgressBar, ProgressStyle};
use std::{
    fs, io,
    path::{Component, Path, PathBuf},
};
use tracing::{info, warn};

pub const DEFAULT_DATA_DIR: &str = "data";

#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<DataError> for CollectError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::Io(err) => Self::Io(err),
            DataError::Json(err) => Self::Json(err),
        }
    }
}

/// Create `directory` (and its parents) unless it already exists.
pub fn ensure_dir(directory: &Path) -> io::Result<&Path> {
    if !directory.is_dir() {
        fs::create_dir_all(directory)?;
    }
    Ok(directory)
}

/// Whether `community` names exactly one directory below the data dir.
pub fn is_plain_name(community: &str) -> bool {
    let mut components = Path::new(community).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(name)), None) if name == community
    )
}

/// Where a snapshot taken at `at` lands: `<data dir>/<community>/<YYYY-MM-DD>/<HH:MM:SS>.json`.
pub fn snapshot_path(data_dir: &Path, community: &str, at: NaiveDateTime) -> PathBuf {
    data_dir
        .join(community)
        .join(at.format("%Y-%m-%d").to_string())
        .join(format!("{}.json", at.format("%H:%M:%S")))
}

/// The outcome of collecting a single subreddit.
#[derive(Debug)]
pub struct CommunityReport {
    pub community: String,
    pub result: Result<PathBuf, CollectError>,
}

pub struct Collector<F> {
    fetch: F,
    data_dir: PathBuf,
    harvest: Harvest,
    progress: bool,
}

impl<F: Fetch> Collector<F> {
    pub fn new(fetch: F) -> Self {
        Self {
            fetch,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            harvest: Harvest::default(),
            progress: false,
        }
    }

    pub fn data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn harvest(mut self, harvest: Harvest) -> Self {
        self.harvest = harvest;
        self
    }

    pub fn progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// Snapshot one subreddit now.
    pub fn collect(
        &self,
        community: &str,
        limit: u32,
        mode: Mode,
    ) -> Result<PathBuf, CollectError> {
        self.collect_at(community, limit, mode, Local::now().naive_local())
    }

    /// Snapshot one subreddit, naming the output file after `at`.
    ///
    /// The date directory is created before anything is fetched, so a failed fetch can
    /// leave an empty directory behind but never a file. Names that are not a single path
    /// component (`a/b`, `..`, `/tmp/x`) are reported as not found without touching the
    /// disk. An empty listing is written as `{}`.
    pub fn collect_at(
        &self,
        community: &str,
        limit: u32,
        mode: Mode,
        at: NaiveDateTime,
    ) -> Result<PathBuf, CollectError> {
        if !is_plain_name(community) {
            return Err(FetchError::NotFound(community.to_string()).into());
        }

        let file_name = snapshot_path(&self.data_dir, community, at);
        if let Some(date_dir) = file_name.parent() {
            ensure_dir(date_dir)?;
        }

        let posts = self.fetch.listing(community, mode, limit)?;
        let results = scrape_listing(&self.fetch, community, posts, self.harvest)?;
        info!("Retrieved {} submissions from r/{community}", results.len());

        results.save(&file_name)?;
        Ok(file_name)
    }

    /// Collect every subreddit of `query` in order, reporting each outcome on `console`.
    pub fn run_query<C: Console>(
        &self,
        query: &Query,
        console: &mut C,
    ) -> io::Result<Vec<CommunityReport>> {
        console.say(&"=".repeat(70))?;
        console.say("Retrieving Results")?;
        console.say(&"-".repeat(70))?;

        let bar = if self.progress {
            let bar = ProgressBar::new(query.communities.len() as u64);
            bar.set_style(
                ProgressStyle::with_template(
                    " [{elapsed_precise}] {prefix:<22} {bar:30.cyan/red} {pos}/{len} {msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
            );
            bar.set_prefix("Collecting subreddits");
            bar
        } else {
            ProgressBar::hidden()
        };

        let mut reports = Vec::with_capacity(query.communities.len());
        for community in &query.communities {
            bar.set_message(format!("r/{community}"));
            let result = self.collect(community, query.limit, query.mode);
            match &result {
                Ok(path) => {
                    console.say(&format!("Results obtained for r/{community}."))?;
                    console.say("Results saved to:")?;
                    console.say(&format!("{}\n", path.display()))?;
                }
                Err(err) => {
                    warn!("Collecting r/{community} failed: {err}");
                    console.say(&format!("{community} not found.\n"))?;
                }
            }
            reports.push(CommunityReport {
                community: community.clone(),
                result,
            });
            bar.inc(1);
        }
        bar.finish_and_clear();

        Ok(reports)
    }
}
