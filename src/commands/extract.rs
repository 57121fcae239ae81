use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::cli::ExtractArgs;
use crate::model::RosterManifest;
use crate::ocr::{OcrEngine, RecordedOcr, TesseractEngine};
use crate::roster::RosterExtractor;
use crate::util::{now_utc_string, sha256_file, write_json_pretty};

const ROSTER_MANIFEST_VERSION: u32 = 1;

pub fn run(args: ExtractArgs) -> Result<()> {
    let roster_path = args.resolved_roster_path();
    let engine: Box<dyn OcrEngine> = match &args.ocr_lines_path {
        Some(path) => Box::new(RecordedOcr::new(path)),
        None => Box::new(TesseractEngine::default()),
    };

    info!(
        image = %args.image.display(),
        engine = engine.name(),
        lang = %args.ocr_lang,
        "starting roster extraction"
    );

    let extractor = RosterExtractor::new()?;
    let extraction = extractor
        .run_extraction(engine.as_ref(), &args.image, &args.ocr_lang)
        .with_context(|| {
            format!(
                "roster extraction failed; {} left untouched",
                roster_path.display()
            )
        })?;

    let stats = &extraction.stats;
    info!(
        lines = stats.lines_total,
        skipped_empty = stats.skipped_empty,
        skipped_non_arabic = stats.skipped_non_arabic,
        skipped_empty_name = stats.skipped_empty_name,
        duplicates_dropped = stats.duplicates_dropped,
        records = stats.records,
        "extraction complete"
    );
    if extraction.records.is_empty() {
        warn!(image = %args.image.display(), "no roster lines recognized");
    }

    let image_sha256 = if args.image.is_file() {
        sha256_file(&args.image)?
    } else {
        warn!(image = %args.image.display(), "image not readable, leaving digest empty");
        String::new()
    };

    let manifest = RosterManifest {
        manifest_version: ROSTER_MANIFEST_VERSION,
        generated_at: now_utc_string(),
        image_path: args.image.display().to_string(),
        image_sha256,
        ocr_engine: engine.name().to_string(),
        ocr_lang: args.ocr_lang.clone(),
        stats: extraction.stats,
        records: extraction.records,
    };

    if args.dry_run {
        for (index, record) in manifest.records.iter().enumerate() {
            println!("{index}\t{}\t{}", record.name, record.code);
        }
        info!(records = manifest.records.len(), "extract dry-run complete");
        return Ok(());
    }

    write_json_pretty(&roster_path, &manifest)?;
    info!(path = %roster_path.display(), records = manifest.records.len(), "wrote roster");

    Ok(())
}
