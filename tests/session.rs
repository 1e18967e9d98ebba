mod common;

use common::*;
use reddit_snapshot::*;

fn reddit() -> FakeReddit {
    FakeReddit::default()
        .with("foo", busy_subreddit("foo"))
        .with("bar", busy_subreddit("bar"))
}

#[test]
fn confirmed_query_runs_each_community_then_finishes() {
    let data = tempfile::tempdir().unwrap();
    let reddit = reddit();
    let collector = Collector::new(&reddit).data_dir(data.path());

    let output = run_session(&collector, &["foo, bar", "5", "2", "y", "N"]).unwrap();

    assert_eq!(reddit.listed(), vec!["foo", "bar"]);
    assert!(reddit
        .listings
        .borrow()
        .iter()
        .all(|(_, mode, limit)| *mode == Mode::Hot && *limit == 5));
    assert!(output.contains("Review Your Query"));
    assert!(output.contains("foo, bar"));
    assert!(output.contains("Search Parameter: hot"));
    assert!(output.trim_end().ends_with("Done."));
    assert_eq!(json_files(data.path()).len(), 2);
}

/// Rejecting a query re-collects it and runs the new one without a second review.
#[test]
fn rejected_query_is_recollected_and_run_without_review() {
    let data = tempfile::tempdir().unwrap();
    let reddit = reddit();
    let collector = Collector::new(&reddit).data_dir(data.path());

    let output = run_session(&collector, &["foo", "5", "1", "n", "bar", "3", "3", "n"]).unwrap();

    assert_eq!(output.matches("Review Your Query").count(), 1);
    assert!(output.contains("Please re-enter your query."));
    assert_eq!(*reddit.listings.borrow(), vec![("bar".to_string(), Mode::New, 3)]);
}

#[test]
fn unrecognized_review_answer_ends_the_session() {
    let data = tempfile::tempdir().unwrap();
    let reddit = reddit();
    let collector = Collector::new(&reddit).data_dir(data.path());

    let output = run_session(&collector, &["foo", "5", "1", "maybe", "y"]).unwrap();

    assert!(output.contains("Input not recognized. Please enter [Y/N]"));
    assert!(reddit.listed().is_empty());
}

#[test]
fn more_results_restarts_with_a_review() {
    let data = tempfile::tempdir().unwrap();
    let reddit = reddit();
    let collector = Collector::new(&reddit).data_dir(data.path());

    let output = run_session(
        &collector,
        &["foo", "1", "1", "Y", "y", "bar", "1", "2", "Y", "n"],
    )
    .unwrap();

    assert_eq!(output.matches("Review Your Query").count(), 2);
    assert_eq!(
        *reddit.listings.borrow(),
        vec![("foo".to_string(), Mode::Top, 1), ("bar".to_string(), Mode::Hot, 1)]
    );
}

#[test]
fn unrecognized_more_results_answer_ends_the_session() {
    let data = tempfile::tempdir().unwrap();
    let reddit = reddit();
    let collector = Collector::new(&reddit).data_dir(data.path());

    let output = run_session(&collector, &["foo", "1", "1", "y", "again", "bar"]).unwrap();

    assert!(output.contains("Input not recognized. Please enter [Y/N]"));
    assert!(!output.contains("Done."));
    assert_eq!(reddit.listed(), vec!["foo"]);
}

#[test]
fn alphabetic_limit_gets_one_more_chance() {
    let data = tempfile::tempdir().unwrap();
    let reddit = reddit();
    let collector = Collector::new(&reddit).data_dir(data.path());

    let output = run_session(&collector, &["foo", "five", "5", "1", "y", "n"]).unwrap();

    assert!(output.contains("Input not recognized. Please enter an integer."));
    assert!(output.contains("Limit: 5"));
    assert_eq!(*reddit.listings.borrow(), vec![("foo".to_string(), Mode::Top, 5)]);
}

#[test]
fn second_bad_limit_aborts_the_session() {
    let data = tempfile::tempdir().unwrap();
    let reddit = reddit();
    let collector = Collector::new(&reddit).data_dir(data.path());

    let err = run_session(&collector, &["foo", "five", "six", "1", "y", "n"]).unwrap_err();

    assert!(matches!(err, SessionError::Input(InputError::Limit(ref raw)) if raw == "six"));
    assert!(reddit.listed().is_empty());
}

#[test]
fn second_mode_answer_is_taken_as_given() {
    let data = tempfile::tempdir().unwrap();
    let reddit = reddit();
    let collector = Collector::new(&reddit).data_dir(data.path());

    run_session(
        &collector,
        &["foo", "2", "9", "top", "y", "y", "bar", "2", "x", "whatever", "y", "n"],
    )
    .unwrap();

    assert_eq!(
        *reddit.listings.borrow(),
        vec![("foo".to_string(), Mode::Top, 2), ("bar".to_string(), Mode::New, 2)]
    );
}

/// The retried mode answer is a raw mode name: a selector or a differently cased name
/// no longer counts and lists new posts.
#[test]
fn second_mode_answer_is_not_read_as_a_selector() {
    let data = tempfile::tempdir().unwrap();
    let reddit = reddit();
    let collector = Collector::new(&reddit).data_dir(data.path());

    run_session(
        &collector,
        &["foo", "1", "9", "2", "y", "y", "bar", "1", "x", "TOP", "y", "n"],
    )
    .unwrap();

    assert_eq!(
        *reddit.listings.borrow(),
        vec![("foo".to_string(), Mode::New, 1), ("bar".to_string(), Mode::New, 1)]
    );
}

#[test]
fn closed_input_ends_the_session_quietly() {
    let data = tempfile::tempdir().unwrap();
    let reddit = reddit();
    let collector = Collector::new(&reddit).data_dir(data.path());

    run_session(&collector, &["foo", "5"]).unwrap();

    assert!(reddit.listed().is_empty());
}

#[test]
fn missing_subreddit_does_not_stop_the_session() {
    let data = tempfile::tempdir().unwrap();
    let reddit = reddit();
    let collector = Collector::new(&reddit).data_dir(data.path());

    let output = run_session(&collector, &["nosuchplace,foo", "3", "3", "y", "n"]).unwrap();

    assert!(output.contains("nosuchplace not found."));
    assert_eq!(reddit.listed(), vec!["nosuchplace", "foo"]);
    assert_eq!(json_files(data.path()).len(), 1);
}
