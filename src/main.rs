use std::path::PathBuf;

use clap::{ArgAction, Parser};
use line_seek::{Config, IndexStore, LineRequest, LineSeeker};

#[derive(Parser, Debug)]
#[command(
    name = "line-seek",
    about = "Print a single line of a large text file using a persisted line index"
)]
struct Args {
    /// Path to the text file
    file: PathBuf,
    /// 0 based number of the line to print
    line: usize,
    /// Rebuild the index even if an index file already exists. Only `true` (any case) enables
    /// it, every other value counts as false
    #[arg(default_value = "false", value_parser = parse_overwrite, action = ArgAction::Set)]
    overwrite: bool,
    /// Directory holding the index files. Defaults to $LINE_SEEK_INDEX_DIR or `indexes/` next to
    /// the executable
    #[arg(long)]
    index_dir: Option<PathBuf>,
}

fn parse_overwrite(s: &str) -> Result<bool, String> {
    Ok(s.eq_ignore_ascii_case("true"))
}

#[async_std::main]
async fn main() {
    let env = env_logger::Env::default().filter_or("RUST_LOG", "info");
    env_logger::Builder::from_env(env).init();

    let args = Args::parse();

    let config = match args.index_dir {
        Some(dir) => Config::with_index_dir(dir),
        None => Config::from_env(),
    };

    let request = LineRequest::new(args.file, args.line).overwrite(args.overwrite);
    let seeker = LineSeeker::new(IndexStore::from_config(&config));

    let result = async {
        request.validate().await?;
        seeker.read_line(&request).await
    }
    .await;

    match result {
        Ok(line) => println!("{}", line),
        Err(err) => {
            log::error!("{:#}", anyhow::Error::from(err));
            std::process::exit(1);
        }
    }
}
