use anyhow::{Context, Result};
use regex::Regex;

use super::CODE_PATTERN;

#[derive(Debug, Clone)]
pub struct LineNormalizer {
    separators: Regex,
    whitespace: Regex,
    symbols: Regex,
    trailing_code: Regex,
    latin_run: Regex,
    foreign: Regex,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CodeCapture {
    body: String,
    code: Option<String>,
}

impl LineNormalizer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            separators: Regex::new(r"[|،]").context("failed to compile separator regex")?,
            whitespace: Regex::new(r"[\s\x{FEFF}]+").context("failed to compile whitespace regex")?,
            symbols: Regex::new(r#"[©#@*+=|~^`"“”'’\[\]()<>\{\}]"#)
                .context("failed to compile symbol regex")?,
            trailing_code: Regex::new(&format!("{CODE_PATTERN}$"))
                .context("failed to compile trailing code regex")?,
            latin_run: Regex::new(r"[A-Za-z]+").context("failed to compile latin regex")?,
            foreign: Regex::new(r"[^\x{0600}-\x{06FF}0-9\s\-]")
                .context("failed to compile foreign character regex")?,
        })
    }

    pub fn clean_line_text(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let text = self.split_separators(text);
        let text = self.strip_symbols(&text);
        let capture = self.capture_trailing_code(text);
        let body = self.strip_latin(&capture.body);
        let body = self.strip_foreign(&body);

        reattach_code(body, capture.code.as_deref())
    }

    fn split_separators(&self, text: &str) -> String {
        self.collapse(&self.separators.replace_all(text, " "))
    }

    fn strip_symbols(&self, text: &str) -> String {
        self.symbols.replace_all(text, " ").into_owned()
    }

    fn capture_trailing_code(&self, text: String) -> CodeCapture {
        match self.trailing_code.find(&text) {
            Some(found) => CodeCapture {
                body: text[..found.start()].to_string(),
                code: Some(found.as_str().to_string()),
            },
            None => CodeCapture {
                body: text,
                code: None,
            },
        }
    }

    fn strip_latin(&self, text: &str) -> String {
        self.collapse(&self.latin_run.replace_all(text, " "))
    }

    fn strip_foreign(&self, text: &str) -> String {
        self.collapse(&self.foreign.replace_all(text, " "))
    }

    fn collapse(&self, text: &str) -> String {
        self.whitespace.replace_all(text, " ").trim().to_string()
    }
}

fn reattach_code(body: String, code: Option<&str>) -> String {
    match code {
        Some(code) if !code.is_empty() && !body.ends_with(code) => {
            format!("{body} {code}").trim().to_string()
        }
        _ => body,
    }
}
