use clap::Parser;
use news_report::workitems::{INPUT_PATH_ENV, OUTPUT_PATH_ENV};
use std::path::PathBuf;

/// Every option is optional; run parameters come from the input work item.
#[derive(Parser, Debug)]
#[command(name = "news-report")]
#[command(about = "Search a news site and build a spreadsheet report of recent articles")]
#[command(version)]
pub struct Args {
    /// JSON settings file
    #[arg(short, long, env = "NEWS_REPORT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Input work item file
    #[arg(long, env = INPUT_PATH_ENV, default_value = "work-items.json")]
    pub input_work_item: PathBuf,

    /// Output work item file
    #[arg(long, env = OUTPUT_PATH_ENV, default_value = "output/work-items.json")]
    pub output_work_item: PathBuf,

    /// WebDriver server URL
    #[arg(long, env = "WEBDRIVER_URL")]
    pub webdriver_url: Option<String>,

    /// Directory for images and the report
    #[arg(long, env = "NEWS_REPORT_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,
}
