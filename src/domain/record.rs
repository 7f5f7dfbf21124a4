use serde::{Deserialize, Serialize};
use std::fmt;

/// Field separator used when a record is rendered as one output line
pub const FIELD_SEPARATOR: &str = ", ";

/// One extracted table row, reduced to its first four cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub column1: String,
    pub column2: String,
    pub column3: String,
    pub column4: String,
}

impl Record {
    /// Build a record from a row's cell values.
    ///
    /// Returns `None` when the row has fewer than four cells; anything past
    /// the fourth cell is ignored.
    pub fn from_cells<I, S>(cells: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut cells = cells.into_iter().map(Into::into);
        Some(Self {
            column1: cells.next()?,
            column2: cells.next()?,
            column3: cells.next()?,
            column4: cells.next()?,
        })
    }

    pub fn fields(&self) -> [&str; 4] {
        [&self.column1, &self.column2, &self.column3, &self.column4]
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fields().join(FIELD_SEPARATOR))
    }
}

/// Render records as newline-joined lines, without a trailing newline
pub fn render_records(records: &[Record]) -> String {
    records
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Sort direction sent with every page request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "ASC", alias = "asc", alias = "ascending")]
    Ascending,
    #[serde(rename = "DESC", alias = "desc", alias = "descending")]
    Descending,
}

impl SortDirection {
    pub const fn as_form_value(self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_form_value())
    }
}

/// Form payload for a single page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub sort_column: String,
    pub sort_direction: SortDirection,
    /// 1-based row offset of the first record on the page
    pub start_row: u32,
}

impl PageRequest {
    pub fn new(sort_column: impl Into<String>, sort_direction: SortDirection, start_row: u32) -> Self {
        Self {
            sort_column: sort_column.into(),
            sort_direction,
            start_row,
        }
    }

    /// Form fields in wire order: `SortCol`, `SortOrder`, `StartRow`
    pub fn form_fields(&self) -> [(&'static str, String); 3] {
        [
            ("SortCol", self.sort_column.clone()),
            ("SortOrder", self.sort_direction.as_form_value().to_string()),
            ("StartRow", self.start_row.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_cells_make_a_record() {
        let record = Record::from_cells(["A", "B", "C", "D"]).unwrap();
        assert_eq!(record.fields(), ["A", "B", "C", "D"]);
    }

    #[test]
    fn three_cells_make_nothing() {
        assert!(Record::from_cells(["A", "B", "C"]).is_none());
    }

    #[test]
    fn extra_cells_are_discarded() {
        let record = Record::from_cells(["A", "B", "C", "D", "E", "F"]).unwrap();
        assert_eq!(record.to_string(), "A, B, C, D");
    }

    #[test]
    fn render_joins_lines_without_trailing_newline() {
        let records = vec![
            Record::from_cells(["a", "b", "c", "d"]).unwrap(),
            Record::from_cells(["e", "f", "g", "h"]).unwrap(),
        ];
        assert_eq!(render_records(&records), "a, b, c, d\ne, f, g, h");
        assert_eq!(render_records(&[]), "");
    }

    #[test]
    fn render_is_repeatable() {
        let records = vec![Record::from_cells(["x", "y", "z", "w"]).unwrap()];
        assert_eq!(render_records(&records), render_records(&records));
    }

    #[test]
    fn form_fields_follow_wire_names() {
        let request = PageRequest::new("LastName", SortDirection::Descending, 51);
        let fields = request.form_fields();
        assert_eq!(fields[0], ("SortCol", "LastName".to_string()));
        assert_eq!(fields[1], ("SortOrder", "DESC".to_string()));
        assert_eq!(fields[2], ("StartRow", "51".to_string()));
    }
}
