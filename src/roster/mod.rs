mod dedupe;
mod filter;
mod normalize;
mod parse;
mod pipeline;

pub use dedupe::dedupe;
pub use filter::{contains_arabic, is_roster_line};
pub use normalize::LineNormalizer;
pub use parse::{MatchRule, ParsedLine, RecordParser};
pub use pipeline::{ExtractError, RosterExtractor};

const CODE_PATTERN: &str = r"[A-Za-z]{1,4}-?[0-9]{1,4}";
