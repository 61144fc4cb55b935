use clap::Parser;
use uuid::Uuid;

#[derive(clap::Parser, Debug)]
#[command(version, about = "Download a manga chapter by chapter, following the next-chapter chain")]
pub struct Cli {
    /// Settings file; the extension may be omitted
    #[arg(short, long, default_value = "manga")]
    pub config_file: String,

    /// Chapter to start from, overrides `start_chapter`
    #[arg(short, long)]
    pub start_chapter: Option<Uuid>,

    /// Overrides `output_directory`
    #[arg(short, long)]
    pub output_directory: Option<String>,

    /// Stop after this many chapters
    #[arg(short, long)]
    pub max_chapters: Option<u32>,
}

impl Cli {
    pub fn new() -> Self {
        Cli::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self::new()
    }
}
