mod console;
pub use console::*;

mod input;
pub use input::*;

use crate::{
    collect::Collector,
    reddit::{Fetch, Query},
};
use std::io;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("console error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("input closed")]
    Closed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    pub const CHOICES: &'static str = "[Y/N]";

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_uppercase().as_str() {
            "Y" => Some(Self::Yes),
            "N" => Some(Self::No),
            _ => None,
        }
    }
}

/// Where an interactive session currently is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Asking for a new query. `review` sends the result through [`Stage::Reviewing`]
    /// rather than straight to execution.
    Collecting { review: bool },
    Reviewing(Query),
    Executing(Query),
    Done,
}

/// The interactive loop: collect a query, review it, run it, maybe go again.
pub struct Session<'a, F, C> {
    collector: &'a Collector<F>,
    console: C,
    stage: Stage,
}

impl<'a, F: Fetch, C: Console> Session<'a, F, C> {
    pub fn new(collector: &'a Collector<F>, console: C) -> Self {
        Self {
            collector,
            console,
            stage: Stage::Collecting { review: true },
        }
    }

    pub fn into_console(self) -> C {
        self.console
    }

    /// Advance the session by one stage.
    pub fn step(&mut self) -> Result<&Stage, SessionError> {
        let stage = std::mem::replace(&mut self.stage, Stage::Done);
        self.stage = match stage {
            Stage::Collecting { review } => {
                let query = collect_query(&mut self.console)?;
                if review {
                    Stage::Reviewing(query)
                } else {
                    Stage::Executing(query)
                }
            }
            Stage::Reviewing(query) => self.review(query)?,
            Stage::Executing(query) => self.execute(&query)?,
            Stage::Done => Stage::Done,
        };
        Ok(&self.stage)
    }

    /// Run until the user is done. A closed input ends the session quietly.
    pub fn run(&mut self) -> Result<(), SessionError> {
        while self.stage != Stage::Done {
            match self.step().map(|_| ()) {
                Ok(()) => {}
                Err(SessionError::Closed) => {
                    info!("Input closed, ending session");
                    self.stage = Stage::Done;
                }
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }

    fn ask(&mut self, question: &str) -> Result<Option<Answer>, SessionError> {
        let raw = self
            .console
            .prompt(&format!("{question} {}: ", Answer::CHOICES))?
            .ok_or(SessionError::Closed)?;
        let answer = Answer::parse(&raw);
        if answer.is_none() {
            self.console
                .say(&format!("Input not recognized. Please enter {}", Answer::CHOICES))?;
        }
        Ok(answer)
    }

    fn review(&mut self, query: Query) -> Result<Stage, SessionError> {
        self.console.say(&"=".repeat(70))?;
        self.console.say("Review Your Query")?;
        self.console.say(&"-".repeat(70))?;
        self.console.say("Subreddits:")?;
        self.console.say(&query.communities.join(", "))?;
        self.console.say(&format!("Limit: {}", query.limit))?;
        self.console.say(&format!("Search Parameter: {}", query.mode))?;

        Ok(match self.ask("Are you happy with your query?")? {
            Some(Answer::Yes) => Stage::Executing(query),
            Some(Answer::No) => {
                self.console.say("\nPlease re-enter your query.\n")?;
                Stage::Collecting { review: false }
            }
            None => Stage::Done,
        })
    }

    fn execute(&mut self, query: &Query) -> Result<Stage, SessionError> {
        self.collector.run_query(query, &mut self.console)?;

        Ok(match self.ask("Retrieve more results?")? {
            Some(Answer::Yes) => Stage::Collecting { review: true },
            Some(Answer::No) => {
                self.console.say("Done.")?;
                Stage::Done
            }
            None => Stage::Done,
        })
    }
}
