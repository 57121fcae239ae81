use std::collections::HashSet;

use crate::model::Record;

pub fn dedupe(records: Vec<Record>) -> Vec<Record> {
    let mut seen = HashSet::with_capacity(records.len());
    let mut unique = Vec::with_capacity(records.len());

    for record in records {
        if seen.insert(record.key()) {
            unique.push(record);
        }
    }

    unique
}
