use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

use crate::model::{BoundingBox, RawLine};

pub const DEFAULT_OCR_LANG: &str = "ara+eng";

const TSV_WORD_LEVEL: i64 = 5;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("{program} is not available on PATH")]
    Unavailable { program: String },

    #[error("image not found: {0}")]
    MissingImage(PathBuf),

    #[error("failed to run {program}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}: {stderr}")]
    ToolFailed {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("malformed OCR output at row {row}: {reason}")]
    MalformedOutput { row: usize, reason: String },

    #[error("failed to read recorded OCR lines from {path}")]
    RecordedRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse recorded OCR lines from {path}")]
    RecordedParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub trait OcrEngine {
    fn name(&self) -> &'static str;

    fn recognize(&self, image: &Path, lang: &str) -> Result<Vec<RawLine>, OcrError>;
}

#[derive(Debug, Clone)]
pub struct TesseractEngine {
    program: String,
}

impl Default for TesseractEngine {
    fn default() -> Self {
        Self::with_program("tesseract")
    }
}

impl TesseractEngine {
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl OcrEngine for TesseractEngine {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    fn recognize(&self, image: &Path, lang: &str) -> Result<Vec<RawLine>, OcrError> {
        if !command_available(&self.program) {
            return Err(OcrError::Unavailable {
                program: self.program.clone(),
            });
        }
        if !image.exists() {
            return Err(OcrError::MissingImage(image.to_path_buf()));
        }

        let output = Command::new(&self.program)
            .arg(image)
            .arg("stdout")
            .arg("-l")
            .arg(lang)
            .arg("tsv")
            .output()
            .map_err(|source| OcrError::Io {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::ToolFailed {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: stderr.trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout).replace('\u{0000}', "");
        parse_tesseract_tsv(&stdout)
    }
}

fn command_available(program: &str) -> bool {
    Command::new(program).arg("--version").output().is_ok()
}

#[derive(Debug, Clone)]
pub struct RecordedOcr {
    path: PathBuf,
}

impl RecordedOcr {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl OcrEngine for RecordedOcr {
    fn name(&self) -> &'static str {
        "recorded"
    }

    fn recognize(&self, _image: &Path, _lang: &str) -> Result<Vec<RawLine>, OcrError> {
        let raw = fs::read(&self.path).map_err(|source| OcrError::RecordedRead {
            path: self.path.clone(),
            source,
        })?;
        let lines: Vec<RawLine> =
            serde_json::from_slice(&raw).map_err(|source| OcrError::RecordedParse {
                path: self.path.clone(),
                source,
            })?;

        Ok(lines
            .into_iter()
            .map(|line| RawLine {
                text: line.text.trim().to_string(),
                bbox: line.bbox,
            })
            .collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct LineKey {
    page: i64,
    block: i64,
    paragraph: i64,
    line: i64,
}

struct TsvColumns {
    level: usize,
    page: usize,
    block: usize,
    paragraph: usize,
    line: usize,
    left: usize,
    top: usize,
    width: usize,
    height: usize,
    text: usize,
}

impl TsvColumns {
    fn from_header(header: &str) -> Result<Self, OcrError> {
        let names: Vec<&str> = header.split('\t').map(str::trim).collect();
        let find = |wanted: &str| {
            names
                .iter()
                .position(|name| *name == wanted)
                .ok_or_else(|| OcrError::MalformedOutput {
                    row: 0,
                    reason: format!("missing TSV column '{wanted}'"),
                })
        };

        Ok(Self {
            level: find("level")?,
            page: find("page_num")?,
            block: find("block_num")?,
            paragraph: find("par_num")?,
            line: find("line_num")?,
            left: find("left")?,
            top: find("top")?,
            width: find("width")?,
            height: find("height")?,
            text: find("text")?,
        })
    }

    fn width(&self) -> usize {
        [
            self.level,
            self.page,
            self.block,
            self.paragraph,
            self.line,
            self.left,
            self.top,
            self.width,
            self.height,
            self.text,
        ]
        .into_iter()
        .max()
        .unwrap_or_default()
            + 1
    }
}

pub fn parse_tesseract_tsv(tsv: &str) -> Result<Vec<RawLine>, OcrError> {
    let mut rows = tsv.lines().enumerate();
    let Some((_, header)) = rows.next() else {
        return Ok(Vec::new());
    };
    let columns = TsvColumns::from_header(header)?;
    let expected = columns.width();

    let mut positions: HashMap<LineKey, usize> = HashMap::new();
    let mut lines: Vec<(Vec<String>, BoundingBox)> = Vec::new();

    for (index, row) in rows {
        if row.trim().is_empty() {
            continue;
        }

        let cells: Vec<&str> = row.split('\t').collect();
        if cells.len() < expected {
            if cells.len() + 1 != expected || columns.text + 1 != expected {
                return Err(OcrError::MalformedOutput {
                    row: index,
                    reason: format!("expected {expected} cells, found {}", cells.len()),
                });
            }
        }

        let number = |column: usize, label: &str| -> Result<i64, OcrError> {
            let cell = cells.get(column).copied().unwrap_or_default().trim();
            cell.parse::<i64>().map_err(|_| OcrError::MalformedOutput {
                row: index,
                reason: format!("invalid {label} value '{cell}'"),
            })
        };

        if number(columns.level, "level")? != TSV_WORD_LEVEL {
            continue;
        }

        let text = cells.get(columns.text).copied().unwrap_or_default().trim();
        if text.is_empty() {
            continue;
        }

        let key = LineKey {
            page: number(columns.page, "page_num")?,
            block: number(columns.block, "block_num")?,
            paragraph: number(columns.paragraph, "par_num")?,
            line: number(columns.line, "line_num")?,
        };
        let left = number(columns.left, "left")?;
        let top = number(columns.top, "top")?;
        let overflow = |label: &str| OcrError::MalformedOutput {
            row: index,
            reason: format!("{label} overflows box geometry"),
        };
        let bbox = BoundingBox {
            x0: left,
            y0: top,
            x1: left
                .checked_add(number(columns.width, "width")?)
                .ok_or_else(|| overflow("width"))?,
            y1: top
                .checked_add(number(columns.height, "height")?)
                .ok_or_else(|| overflow("height"))?,
        };

        match positions.get(&key) {
            Some(&position) => {
                let (words, line_box) = &mut lines[position];
                words.push(text.to_string());
                *line_box = line_box.union(bbox);
            }
            None => {
                positions.insert(key, lines.len());
                lines.push((vec![text.to_string()], bbox));
            }
        }
    }

    Ok(lines
        .into_iter()
        .map(|(words, bbox)| RawLine {
            text: words.join(" "),
            bbox: Some(bbox),
        })
        .collect())
}
