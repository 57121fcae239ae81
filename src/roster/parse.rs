use anyhow::{Context, Result};
use regex::Regex;

use super::CODE_PATTERN;
use super::normalize::LineNormalizer;
use crate::model::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    NameThenCode,
    CodeThenName,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    Matched {
        name: String,
        code: String,
        rule: MatchRule,
    },
    NoCode {
        name: String,
    },
}

impl ParsedLine {
    pub fn name(&self) -> &str {
        match self {
            Self::Matched { name, .. } | Self::NoCode { name } => name,
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Self::Matched { code, .. } => code,
            Self::NoCode { .. } => "",
        }
    }

    pub fn into_record(self) -> Record {
        match self {
            Self::Matched { name, code, .. } => Record::new(name, code),
            Self::NoCode { name } => Record::new(name, String::new()),
        }
    }
}

#[derive(Debug, Clone)]
struct CodeMatcher {
    rule: MatchRule,
    pattern: Regex,
}

#[derive(Debug, Clone)]
pub struct RecordParser {
    normalizer: LineNormalizer,
    matchers: Vec<CodeMatcher>,
}

impl RecordParser {
    pub fn new() -> Result<Self> {
        let name_then_code = Regex::new(&format!(r"^(?P<name>.+?)\s+(?P<code>{CODE_PATTERN})$"))
            .context("failed to compile name-then-code regex")?;
        let code_then_name = Regex::new(&format!(r"^(?P<code>{CODE_PATTERN})\s+(?P<name>.+)$"))
            .context("failed to compile code-then-name regex")?;

        Ok(Self {
            normalizer: LineNormalizer::new()?,
            matchers: vec![
                CodeMatcher {
                    rule: MatchRule::NameThenCode,
                    pattern: name_then_code,
                },
                CodeMatcher {
                    rule: MatchRule::CodeThenName,
                    pattern: code_then_name,
                },
            ],
        })
    }

    pub fn normalizer(&self) -> &LineNormalizer {
        &self.normalizer
    }

    pub fn parse_name_code(&self, text: &str) -> ParsedLine {
        let normalized = self.normalizer.clean_line_text(text);
        self.classify(&normalized)
    }

    pub fn classify(&self, text: &str) -> ParsedLine {
        for matcher in &self.matchers {
            let Some(captures) = matcher.pattern.captures(text) else {
                continue;
            };

            let name = captures
                .name("name")
                .map(|value| value.as_str().trim())
                .unwrap_or_default();
            let code = captures
                .name("code")
                .map(|value| value.as_str().trim())
                .unwrap_or_default();

            return ParsedLine::Matched {
                name: name.to_string(),
                code: code.to_string(),
                rule: matcher.rule,
            };
        }

        ParsedLine::NoCode {
            name: text.trim().to_string(),
        }
    }
}
