//! Minimal reader for the header-row tabular data both sheets publish.
//!
//! Handles quoted fields, doubled-quote escapes and CRLF line endings; that is
//! all the published sheets produce. Parsing never fails: a ragged row simply
//! yields empty strings for the columns it lacks.

use std::collections::HashMap;

/// A parsed table: one header row, zero or more data rows.
#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: HashMap<String, usize>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn parse(text: &str) -> Table {
        let mut records = split_records(text);
        if records.is_empty() {
            return Table::default();
        }

        let header = records.remove(0);
        let columns = header
            .into_iter()
            .enumerate()
            .map(|(index, name)| (name.trim().to_string(), index))
            .collect();

        Table {
            columns,
            rows: records,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(move |cells| Row {
            columns: &self.columns,
            cells,
        })
    }
}

/// One data row, addressed by column name.
#[derive(Debug, Clone, Copy)]
pub struct Row<'t> {
    columns: &'t HashMap<String, usize>,
    cells: &'t [String],
}

impl Row<'_> {
    /// Cell under `column`, or `""` when the column is unknown or the row is
    /// too short. Missing data is normal, not an error.
    pub fn get(&self, column: &str) -> &str {
        self.columns
            .get(column)
            .and_then(|&index| self.cells.get(index))
            .map(String::as_str)
            .unwrap_or("")
    }
}

fn split_records(text: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                _ => field.push(ch),
            }
            continue;
        }

        match ch {
            '"' => in_quotes = true,
            ',' => record.push(std::mem::take(&mut field)),
            '\r' => {}
            '\n' => {
                record.push(std::mem::take(&mut field));
                push_record(&mut records, std::mem::take(&mut record));
            }
            _ => field.push(ch),
        }
    }

    // Final record when the text does not end with a newline.
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        push_record(&mut records, record);
    }

    records
}

fn push_record(records: &mut Vec<Vec<String>>, record: Vec<String>) {
    // Skip fully blank lines, matching the skipEmptyLines behavior of the
    // spreadsheet export consumers.
    if record.iter().any(|cell| !cell.trim().is_empty()) {
        records.push(record);
    }
}
