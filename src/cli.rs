// Command-line arguments. Anything left out here is prompted for by `ui`.

use clap::Parser;

use crate::model::Album;

#[derive(Parser, Debug)]
#[command(
    name = "vk-photo-backup",
    about = "Copy the largest version of VK album photos to Yandex Disk"
)]
pub struct Cli {
    /// VK user id (prompted for if omitted)
    #[arg(short = 'u', long)]
    pub user: Option<String>,

    /// How many photos to copy (prompted for if omitted)
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u32).range(1..))]
    pub count: Option<u32>,

    /// Album to copy from (prompted for if omitted)
    #[arg(short = 'a', long, value_enum)]
    pub album: Option<Album>,

    /// File holding the VK access token
    #[arg(long, default_value = "vktoken.txt")]
    pub vk_token_file: String,

    /// File holding the Yandex Disk OAuth token
    #[arg(long, default_value = "yatoken.txt")]
    pub disk_token_file: String,

    /// Destination folder on Yandex Disk
    #[arg(short = 'd', long, default_value = "VK_photos")]
    pub directory: String,

    /// Where to write the list of uploaded photos
    #[arg(short = 'o', long, default_value = "loaded_photos.json")]
    pub output: String,

    /// VK API version
    #[arg(long, default_value = "5.131")]
    pub api_version: String,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Disable progress bar
    #[arg(long)]
    pub no_progress_bar: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
