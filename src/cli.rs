use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "desilencer")]
#[command(
    about = "Removes silence from the first MP3 found in an s3 bucket",
    long_about = None
)]
pub struct Cli {
    /// Bucket to poll (default: autoeditor)
    #[arg(short, long)]
    pub bucket: Option<String>,

    /// Margin passed to auto-editor (default: AUTO_EDITOR_MARGIN or 0.04sec)
    #[arg(short, long)]
    pub margin: Option<String>,

    /// Root of the local working directories (default: WORK_ROOT or /app)
    #[arg(short, long)]
    pub work_root: Option<PathBuf>,
}
