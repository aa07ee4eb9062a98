use chrono::Utc;
use clap::Parser;
use news_report::{
    FileWorkItemStore, HttpImageSource, NewsError, Settings, WebDriverFetcher,
};
use std::process::ExitCode;

mod args;
use args::Args;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging, `info` unless RUST_LOG says otherwise
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    match execute(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ::log::error!("Run aborted: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn execute(args: Args) -> Result<(), NewsError> {
    let mut settings = match &args.config {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    };
    if let Some(url) = args.webdriver_url.filter(|u| !u.is_empty()) {
        settings.webdriver_url = url;
    }
    if let Some(dir) = args.output_dir {
        settings.output_dir = dir;
    }
    ::log::debug!("Settings: {:?}", settings);

    let store = FileWorkItemStore::open(&args.input_work_item, args.output_work_item)?;
    let fetcher = WebDriverFetcher::new(&settings);
    let images = HttpImageSource::new();

    let start_time = std::time::Instant::now();
    let summary = news_report::run(&store, &fetcher, &images, &settings, Utc::now()).await?;

    ::log::info!(
        "Wrote {} articles to {} in {:.2} seconds",
        summary.articles.len(),
        summary.report_path.display(),
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}
