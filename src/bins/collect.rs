use reddit_snapshot::*;
use clap::Parser;
use std::path::PathBuf;
use tracing::debug;


#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
   /// Directory the snapshots are written under
   #[arg(long, default_value = DEFAULT_DATA_DIR)]
   data_dir: PathBuf,

   /// Record every listed submission instead of only the first one
   #[arg(long)]
   all_submissions: bool,

   /// Hide the progress bar while collecting
   #[arg(long)]
   no_progress: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing();

    let credentials = Credentials::from_env();
    debug!("Loaded credentials: {credentials:?}");

    let collector = Collector::new(RouxFetcher::new(credentials))
        .data_dir(args.data_dir)
        .harvest(if args.all_submissions { Harvest::All } else { Harvest::FirstOnly })
        .progress(!args.no_progress);

    let mut console = Terminal::stdio();
    console.say(&"=".repeat(70))?;
    console.say("Make Reddit API Calls with roux")?;
    console.say(&"-".repeat(70))?;

    Session::new(&collector, console).run()?;
    Ok(())
}
