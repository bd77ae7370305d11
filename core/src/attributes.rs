//! Editable key/value rows that become multipart text fields.
//!
//! # Design
//! Each row owns both its name and its value, and is addressed by the
//! `RowId` handed out when it was added. Removing a row therefore can never
//! shift a name onto another row's value.

/// Handle to one row, playing the part of the row's own remove control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowId(u64);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeRow {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Default)]
pub struct AttributeList {
    rows: Vec<(RowId, AttributeRow)>,
    next_id: u64,
}

impl AttributeList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a blank row. Every call adds a new row.
    pub fn add_row(&mut self) -> RowId {
        let id = RowId(self.next_id);
        self.next_id += 1;
        self.rows.push((id, AttributeRow::default()));
        id
    }

    /// Append a row already filled in.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) -> RowId {
        let id = self.add_row();
        if let Some(row) = self.row_mut(id) {
            row.name = name.into();
            row.value = value.into();
        }
        id
    }

    /// Delete exactly the row behind `id`. Returns `false` if it is already gone.
    pub fn remove_row(&mut self, id: RowId) -> bool {
        let before = self.rows.len();
        self.rows.retain(|(row_id, _)| *row_id != id);
        self.rows.len() != before
    }

    pub fn row(&self, id: RowId) -> Option<&AttributeRow> {
        self.rows.iter().find(|(row_id, _)| *row_id == id).map(|(_, row)| row)
    }

    pub fn row_mut(&mut self, id: RowId) -> Option<&mut AttributeRow> {
        self.rows
            .iter_mut()
            .find(|(row_id, _)| *row_id == id)
            .map(|(_, row)| row)
    }

    pub fn rows(&self) -> impl Iterator<Item = &AttributeRow> {
        self.rows.iter().map(|(_, row)| row)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `(name, value)` pairs destined for the multipart body. Rows with an
    /// empty name are skipped; duplicate names are passed through.
    pub fn form_fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.rows()
            .filter(|row| !row.name.is_empty())
            .map(|row| (row.name.as_str(), row.value.as_str()))
    }
}
