use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x0: i64,
    pub y0: i64,
    pub x1: i64,
    pub y1: i64,
}

impl BoundingBox {
    pub fn union(self, other: BoundingBox) -> BoundingBox {
        BoundingBox {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLine {
    pub text: String,
    #[serde(default)]
    pub bbox: Option<BoundingBox>,
}

impl RawLine {
    #[cfg(test)]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bbox: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Field,
    Busy,
    Oos,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Field => "field",
            Self::Busy => "busy",
            Self::Oos => "oos",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub status: Status,
}

impl Record {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            status: Status::Field,
        }
    }

    pub fn key(&self) -> String {
        format!("{}|{}", self.name, self.code).trim().to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    pub lines_total: usize,
    pub skipped_empty: usize,
    pub skipped_non_arabic: usize,
    pub skipped_empty_name: usize,
    pub duplicates_dropped: usize,
    pub records: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterManifest {
    pub manifest_version: u32,
    pub generated_at: String,
    pub image_path: String,
    pub image_sha256: String,
    pub ocr_engine: String,
    pub ocr_lang: String,
    pub stats: ExtractionStats,
    pub records: Vec<Record>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Theme {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub theme: Theme,
}
