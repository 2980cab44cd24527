use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context as _;

use crate::color::named::resolve_color;
use crate::foundation::core::Rgb;
use crate::foundation::error::{GridError, GridResult};

/// Object identity reserved for empty cells.
pub const BACKGROUND_ID: i64 = 0;

/// One configured object kind.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorEntry {
    /// Human-readable label, e.g. `rabbit`.
    pub label: String,
    /// Color the object is drawn with.
    pub color: Rgb,
}

/// Mapping from object identity to color. Identity 0 is always present and black.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorTable {
    entries: BTreeMap<i64, ColorEntry>,
}

impl Default for ColorTable {
    fn default() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(
            BACKGROUND_ID,
            ColorEntry {
                label: "empty".to_owned(),
                color: Rgb::BLACK,
            },
        );
        Self { entries }
    }
}

impl ColorTable {
    /// Add an object kind. Identity 0 and duplicates are rejected.
    pub fn insert(&mut self, id: i64, label: impl Into<String>, color: Rgb) -> GridResult<()> {
        if id == BACKGROUND_ID {
            return Err(GridError::validation(
                "object number 0 is reserved for empty cells",
            ));
        }
        if self.entries.contains_key(&id) {
            return Err(GridError::validation(format!(
                "object number {id} is configured twice"
            )));
        }
        self.entries.insert(
            id,
            ColorEntry {
                label: label.into(),
                color,
            },
        );
        Ok(())
    }

    /// Color of `id`, if configured.
    pub fn get(&self, id: i64) -> Option<Rgb> {
        self.entries.get(&id).map(|e| e.color)
    }

    /// Full entry of `id`, if configured.
    pub fn entry(&self, id: i64) -> Option<&ColorEntry> {
        self.entries.get(&id)
    }

    /// Color of empty cells.
    pub fn background(&self) -> Rgb {
        self.get(BACKGROUND_ID).unwrap_or(Rgb::BLACK)
    }

    /// Number of entries, background included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`: the background entry cannot be removed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending identity order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, &ColorEntry)> {
        self.entries.iter().map(|(id, e)| (*id, e))
    }

    /// Parse a `label,number,color` CSV document.
    ///
    /// The header row names the columns (any order, extra columns ignored). Blank lines are
    /// skipped and unquoted fields are trimmed. A field wrapped in double quotes may contain
    /// commas, and `""` inside it stands for one quote. Records cannot span lines.
    pub fn from_csv_str(text: &str) -> GridResult<Self> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim()))
            .filter(|(_, l)| !l.is_empty());

        let Some((header_no, header)) = lines.next() else {
            return Err(GridError::validation("color config is empty"));
        };
        let columns = split_record(header, header_no)?;
        let column = |name: &str| {
            columns
                .iter()
                .position(|c| c.eq_ignore_ascii_case(name))
                .ok_or_else(|| {
                    GridError::validation(format!("color config header lacks a '{name}' column"))
                })
        };
        let (label_col, number_col, color_col) =
            (column("label")?, column("number")?, column("color")?);

        let mut table = Self::default();
        for (line_no, line) in lines {
            let fields = split_record(line, line_no)?;
            if fields.len() != columns.len() {
                return Err(GridError::validation(format!(
                    "color config line {line_no}: expected {} fields, found {}",
                    columns.len(),
                    fields.len()
                )));
            }
            let number: i64 = fields[number_col].parse().map_err(|_| {
                GridError::validation(format!(
                    "color config line {line_no}: number \"{}\" is not an integer",
                    fields[number_col]
                ))
            })?;
            let color = resolve_color(&fields[color_col]).map_err(|e| at_line(line_no, e))?;
            table
                .insert(number, fields[label_col].as_str(), color)
                .map_err(|e| at_line(line_no, e))?;
        }
        Ok(table)
    }

    /// Read and parse a color config file.
    pub fn from_csv_path(path: &Path) -> GridResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read color config '{}'", path.display()))?;
        let table = Self::from_csv_str(&text)?;
        for (id, entry) in table.iter() {
            tracing::debug!(id, label = %entry.label, color = ?entry.color, "color entry");
        }
        Ok(table)
    }
}

fn split_record(line: &str, line_no: usize) -> GridResult<Vec<String>> {
    let mut fields = Vec::new();
    let mut chars = line.chars().peekable();
    loop {
        while chars.next_if(|c| *c == ' ' || *c == '\t').is_some() {}
        let mut field = String::new();
        if chars.next_if_eq(&'"').is_some() {
            loop {
                match chars.next() {
                    Some('"') if chars.next_if_eq(&'"').is_some() => field.push('"'),
                    Some('"') => break,
                    Some(c) => field.push(c),
                    None => {
                        return Err(GridError::validation(format!(
                            "color config line {line_no}: unterminated quoted field"
                        )));
                    }
                }
            }
            while chars.next_if(|c| *c == ' ' || *c == '\t').is_some() {}
            if chars.peek().is_some_and(|c| *c != ',') {
                return Err(GridError::validation(format!(
                    "color config line {line_no}: text after a closing quote"
                )));
            }
        } else {
            while let Some(c) = chars.next_if(|c| *c != ',') {
                field.push(c);
            }
            field.truncate(field.trim_end().len());
        }
        fields.push(field);
        if chars.next().is_none() {
            return Ok(fields);
        }
    }
}

fn at_line(line_no: usize, err: GridError) -> GridError {
    match err {
        GridError::Validation(msg) => {
            GridError::validation(format!("color config line {line_no}: {msg}"))
        }
        other => other,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/color/table.rs"]
mod tests;
