use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::info;

use crate::cli::{EditArgs, RosterArgs};
use crate::model::RosterManifest;
use crate::util::{read_json, write_json_pretty};

pub fn load_roster(path: &Path) -> Result<RosterManifest> {
    if !path.exists() {
        bail!(
            "no roster at {}; run `handover extract` first",
            path.display()
        );
    }
    read_json(path)
}

pub fn show(args: RosterArgs) -> Result<()> {
    let roster_path = args.resolved_roster_path();
    let manifest = load_roster(&roster_path)?;

    info!(
        path = %roster_path.display(),
        generated_at = %manifest.generated_at,
        records = manifest.records.len(),
        "loaded roster"
    );

    for (index, record) in manifest.records.iter().enumerate() {
        println!(
            "{index}\t{}\t{}\t{}",
            record.status.as_str(),
            record.name,
            record.code
        );
    }

    Ok(())
}

pub fn edit(args: EditArgs) -> Result<()> {
    let roster_path = args.roster.resolved_roster_path();
    let mut manifest = load_roster(&roster_path)?;
    let count = manifest.records.len();

    let Some(record) = manifest.records.get_mut(args.index) else {
        bail!(
            "record index {} out of range; roster has {} records",
            args.index,
            count
        );
    };

    if let Some(name) = args.name {
        record.name = name;
    }
    if let Some(code) = args.code {
        record.code = code;
    }
    if let Some(status) = args.status {
        record.status = status.into();
    }

    info!(
        index = args.index,
        name = %record.name,
        code = %record.code,
        status = record.status.as_str(),
        "updated record"
    );

    write_json_pretty(&roster_path, &manifest)
}

pub fn reset(args: RosterArgs) -> Result<()> {
    let roster_path = args.resolved_roster_path();
    if !roster_path.exists() {
        info!(path = %roster_path.display(), "no roster to reset");
        return Ok(());
    }

    fs::remove_file(&roster_path)
        .with_context(|| format!("failed to remove {}", roster_path.display()))?;
    info!(path = %roster_path.display(), "roster reset");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::cli::StatusArg;
    use crate::model::{ExtractionStats, Record, Status};

    fn temp_root(label: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "handover_roster_{}_{}_{}",
            label,
            std::process::id(),
            chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
        ))
    }

    fn roster_args(root: &Path) -> RosterArgs {
        RosterArgs {
            cache_root: root.to_path_buf(),
            roster_path: None,
        }
    }

    fn seed_roster(root: &Path) -> PathBuf {
        let manifest = RosterManifest {
            manifest_version: 1,
            generated_at: "2026-10-17T00:00:00Z".to_string(),
            image_path: "roster.png".to_string(),
            image_sha256: String::new(),
            ocr_engine: "recorded".to_string(),
            ocr_lang: "ara+eng".to_string(),
            stats: ExtractionStats::default(),
            records: vec![Record::new("علي محمد", "Z-1"), Record::new("خالد", "B7")],
        };
        let path = roster_args(root).resolved_roster_path();
        write_json_pretty(&path, &manifest).expect("seed roster");
        path
    }

    fn edit_args(root: &Path, index: usize) -> EditArgs {
        EditArgs {
            roster: roster_args(root),
            index,
            name: None,
            code: None,
            status: None,
        }
    }

    #[test]
    fn edit_stores_values_verbatim_without_dedupe() {
        let root = temp_root("edit");
        let path = seed_roster(&root);

        let mut args = edit_args(&root, 1);
        args.name = Some("علي محمد".to_string());
        args.code = Some("Z-1".to_string());
        args.status = Some(StatusArg::Oos);
        edit(args).expect("edit duplicate key");

        let mut args = edit_args(&root, 0);
        args.name = Some("  (علي) hello ".to_string());
        args.code = Some("not a code".to_string());
        edit(args).expect("edit noisy values");

        let manifest = load_roster(&path).expect("reload roster");
        let _ = fs::remove_dir_all(&root);

        assert_eq!(manifest.records.len(), 2);
        assert_eq!(manifest.records[0].name, "  (علي) hello ");
        assert_eq!(manifest.records[0].code, "not a code");
        assert_eq!(manifest.records[0].status, Status::Field);
        assert_eq!(manifest.records[1].key(), "علي محمد|Z-1");
        assert_eq!(manifest.records[1].status, Status::Oos);
    }

    #[test]
    fn edit_rejects_out_of_range_index_and_keeps_file() {
        let root = temp_root("edit_range");
        let path = seed_roster(&root);
        let before = fs::read(&path).expect("read roster");

        let mut args = edit_args(&root, 2);
        args.status = Some(StatusArg::Busy);
        let error = edit(args).expect_err("index 2 is out of range");

        let after = fs::read(&path).expect("read roster");
        let _ = fs::remove_dir_all(&root);

        assert!(error.to_string().contains("out of range"));
        assert_eq!(before, after);
    }

    #[test]
    fn edit_without_roster_fails() {
        let root = temp_root("edit_missing");
        let error = edit(edit_args(&root, 0)).expect_err("no roster yet");
        assert!(error.to_string().contains("no roster"));
    }

    #[test]
    fn reset_is_a_no_op_when_roster_is_missing() {
        let root = temp_root("reset_missing");
        reset(roster_args(&root)).expect("reset without roster");
        assert!(!roster_args(&root).resolved_roster_path().exists());
    }

    #[test]
    fn reset_removes_existing_roster() {
        let root = temp_root("reset");
        let path = seed_roster(&root);

        reset(roster_args(&root)).expect("reset roster");
        let exists = path.exists();
        let _ = fs::remove_dir_all(&root);

        assert!(!exists);
    }
}
