use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::model::{Status, Theme};
use crate::ocr::DEFAULT_OCR_LANG;
use crate::report::DEFAULT_NOTES;

#[derive(Parser, Debug)]
#[command(
    name = "handover",
    version,
    about = "Roster OCR extraction and shift-handover report tooling"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Extract(ExtractArgs),
    Show(RosterArgs),
    Edit(EditArgs),
    Reset(RosterArgs),
    Report(ReportArgs),
    Theme(ThemeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
    #[arg(long, default_value = ".cache/handover")]
    pub cache_root: PathBuf,

    #[arg(long)]
    pub roster_path: Option<PathBuf>,

    /// Roster photograph to run OCR on.
    #[arg(long)]
    pub image: PathBuf,

    #[arg(long, default_value = DEFAULT_OCR_LANG)]
    pub ocr_lang: String,

    /// Replay OCR lines from a JSON file instead of invoking tesseract.
    #[arg(long)]
    pub ocr_lines_path: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone)]
pub struct RosterArgs {
    #[arg(long, default_value = ".cache/handover")]
    pub cache_root: PathBuf,

    #[arg(long)]
    pub roster_path: Option<PathBuf>,
}

impl RosterArgs {
    pub fn resolved_roster_path(&self) -> PathBuf {
        resolve_roster_path(&self.cache_root, self.roster_path.as_ref())
    }
}

#[derive(Args, Debug, Clone)]
pub struct EditArgs {
    #[command(flatten)]
    pub roster: RosterArgs,

    /// Zero-based position of the record, as printed by `show`.
    #[arg(long)]
    pub index: usize,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub code: Option<String>,

    #[arg(long, value_enum)]
    pub status: Option<StatusArg>,
}

#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    #[command(flatten)]
    pub roster: RosterArgs,

    #[arg(long, default_value = "")]
    pub recipient: String,

    #[arg(long, default_value = "")]
    pub deputy: String,

    #[arg(long, default_value = DEFAULT_NOTES)]
    pub notes: String,

    #[arg(long)]
    pub output_path: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ThemeArgs {
    #[arg(long, default_value = ".cache/handover")]
    pub cache_root: PathBuf,

    #[arg(long)]
    pub preferences_path: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = ThemeAction::Show)]
    pub action: ThemeAction,
}

impl ExtractArgs {
    pub fn resolved_roster_path(&self) -> PathBuf {
        resolve_roster_path(&self.cache_root, self.roster_path.as_ref())
    }
}

fn resolve_roster_path(cache_root: &std::path::Path, explicit: Option<&PathBuf>) -> PathBuf {
    explicit
        .cloned()
        .unwrap_or_else(|| cache_root.join("roster.json"))
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum StatusArg {
    Field,
    Busy,
    Oos,
}

impl From<StatusArg> for Status {
    fn from(value: StatusArg) -> Self {
        match value {
            StatusArg::Field => Self::Field,
            StatusArg::Busy => Self::Busy,
            StatusArg::Oos => Self::Oos,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum ThemeAction {
    Show,
    Light,
    Dark,
    Toggle,
}

impl ThemeAction {
    pub fn target_theme(self) -> Option<Theme> {
        match self {
            Self::Light => Some(Theme::Light),
            Self::Dark => Some(Theme::Dark),
            Self::Show | Self::Toggle => None,
        }
    }
}
