use std::fs;

use anyhow::{Context, Result};
use tracing::info;

use crate::cli::ReportArgs;
use crate::commands::roster::load_roster;
use crate::report::{ReportInput, render_report};
use crate::util::ensure_directory;

pub fn run(args: ReportArgs) -> Result<()> {
    let roster_path = args.roster.resolved_roster_path();
    let manifest = load_roster(&roster_path)?;

    let input = ReportInput {
        recipient: args.recipient,
        deputy: args.deputy,
        notes: args.notes,
    };
    let text = render_report(&input, &manifest.records).context("cannot generate report")?;

    match &args.output_path {
        Some(path) => {
            if let Some(parent) = path.parent() {
                ensure_directory(parent)?;
            }
            fs::write(path, &text)
                .with_context(|| format!("failed to write report: {}", path.display()))?;
            info!(path = %path.display(), records = manifest.records.len(), "wrote report");
        }
        None => println!("{text}"),
    }

    Ok(())
}
