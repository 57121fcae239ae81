use thiserror::Error;

use crate::model::{Record, Status};

pub const DEFAULT_NOTES: &str = "تحديث";

const BUSY_SUFFIX: &str = " (مشغول)";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    #[error("recipient is required (name and code)")]
    MissingRecipient,
    #[error("deputy is required (name and code)")]
    MissingDeputy,
    #[error("recipient and deputy are required (name and code)")]
    MissingBoth,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportInput {
    pub recipient: String,
    pub deputy: String,
    pub notes: String,
}

impl ReportInput {
    pub fn validate(&self) -> Result<(), ReportError> {
        match (self.recipient.trim().is_empty(), self.deputy.trim().is_empty()) {
            (true, true) => Err(ReportError::MissingBoth),
            (true, false) => Err(ReportError::MissingRecipient),
            (false, true) => Err(ReportError::MissingDeputy),
            (false, false) => Ok(()),
        }
    }
}

pub fn partition_roster(records: &[Record]) -> (Vec<&Record>, Vec<&Record>) {
    records
        .iter()
        .partition(|record| record.status != Status::Oos)
}

pub fn render_report(input: &ReportInput, records: &[Record]) -> Result<String, ReportError> {
    input.validate()?;

    let (in_field, out_of_service) = partition_roster(records);
    let total_field = in_field.len() + 1;

    let field_lines = in_field
        .iter()
        .map(|record| {
            let mut line = unit_line(record);
            if record.status == Status::Busy {
                line.push_str(BUSY_SUFFIX);
            }
            line
        })
        .collect::<Vec<_>>();
    let oos_lines = out_of_service
        .iter()
        .map(|record| unit_line(record))
        .collect::<Vec<_>>();

    let mut text = String::new();
    text.push_str("📌 استلام العمليات 📌\n\n");
    text.push_str(&format!(" المستلم : {}\n\n", input.recipient));
    text.push_str(&format!(" النائب : {}\n\n", input.deputy));
    text.push_str(&format!(
        "عدد و اسماء الوحدات الاسعافيه في الميدان : {{{total_field}}}\n"
    ));
    push_block(&mut text, &field_lines);
    text.push('\n');
    text.push_str(&format!("خارج الخدمة : ({})\n", out_of_service.len()));
    push_block(&mut text, &oos_lines);
    text.push('\n');
    text.push_str("🎙️ تم استلام العمليات و جاهزون للتعامل مع البلاغات\n\n");
    text.push_str(&format!("الملاحظات : {}", input.notes));

    Ok(text)
}

fn unit_line(record: &Record) -> String {
    if record.code.is_empty() {
        record.name.clone()
    } else {
        format!("{} {}", record.name, record.code)
    }
}

fn push_block(text: &mut String, lines: &[String]) {
    if lines.is_empty() {
        return;
    }
    text.push_str(&lines.join("\n"));
    text.push('\n');
}
