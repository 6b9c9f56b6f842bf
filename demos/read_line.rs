//! Index a text file once and read a given line directly

use line_seek::{Config, IndexStore, LineRequest, LineSeeker};

#[async_std::main]
async fn main() {
    let seeker = LineSeeker::new(IndexStore::from_config(&Config::from_env()));

    // The first request builds and stores the index, later ones load it
    let request = LineRequest::new("<some text file>", 30);
    let line_30 = seeker.read_line(&request).await.unwrap();
    println!("{}", line_30);

    // Force rebuilding the index after the file changed
    let line_31 = seeker
        .read_line(&LineRequest::new("<some text file>", 31).overwrite(true))
        .await
        .unwrap();
    println!("{}", line_31);
}
