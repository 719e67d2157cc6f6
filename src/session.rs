//! Document Session
//!
//! An in-memory registry of open workbooks keyed by caller-supplied string
//! identifiers, with a "current" document acting as the implicit target of
//! read/write operations. All file-format work is delegated to the
//! spreadsheet engine; this module only manages which workbook an operation
//! lands on.

use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;

use umya_spreadsheet::{Spreadsheet, Worksheet};

use crate::error::SessionError;
use crate::value::Scalar;

/// Registry of open spreadsheet documents plus the current-document pointer
///
/// Invariant: `current` is either `None` or a key present in `registry`.
/// Closing the current document reassigns or clears it in the same step, so
/// it can never dangle.
///
/// The session is a plain mutable value owned by one caller; sharing it
/// across threads would need external synchronization.
#[derive(Debug, Default)]
pub struct DocumentSession {
    registry: HashMap<String, Spreadsheet>,
    current: Option<String>,
}

impl DocumentSession {
    pub fn new() -> Self {
        Self {
            registry: HashMap::new(),
            current: None,
        }
    }

    /// Register a brand-new empty workbook under `id` and make it current
    ///
    /// The engine's fresh workbook comes with one sheet named "Sheet1".
    pub fn create(&mut self, id: &str) -> Result<(), SessionError> {
        self.ensure_free(id)?;
        log::debug!("creating document `{}`", id);
        self.registry
            .insert(id.to_string(), umya_spreadsheet::new_file());
        self.current = Some(id.to_string());
        Ok(())
    }

    /// Load a workbook from a file and register it under `id` as current
    pub fn open<P: AsRef<Path>>(&mut self, path: P, id: &str) -> Result<(), SessionError> {
        self.ensure_free(id)?;
        log::debug!("opening document `{}` from {}", id, path.as_ref().display());
        let book = umya_spreadsheet::reader::xlsx::read(path)?;
        self.registry.insert(id.to_string(), book);
        self.current = Some(id.to_string());
        Ok(())
    }

    /// Load a workbook from an in-memory buffer and register it under `id`
    pub fn open_from_bytes(&mut self, bytes: &[u8], id: &str) -> Result<(), SessionError> {
        self.ensure_free(id)?;
        log::debug!("opening document `{}` from {} byte stream", id, bytes.len());
        let book = umya_spreadsheet::reader::xlsx::read_reader(Cursor::new(bytes), true)?;
        self.registry.insert(id.to_string(), book);
        self.current = Some(id.to_string());
        Ok(())
    }

    /// Make `id` the current document, returning the previous current id
    ///
    /// On failure the current pointer is left untouched.
    pub fn switch_current(&mut self, id: &str) -> Result<Option<String>, SessionError> {
        if !self.registry.contains_key(id) {
            return Err(SessionError::UnknownIdentifier { id: id.to_string() });
        }
        let previous = self.current.replace(id.to_string());
        Ok(previous)
    }

    /// Close the current document, returning its identifier
    ///
    /// Returns `None` when nothing was open; that is not an error. When other
    /// documents remain, one of them becomes current. Which one is
    /// unspecified (registry iteration order), and callers must not rely on
    /// a particular choice.
    pub fn close_current(&mut self) -> Option<String> {
        let closed = self.current.take()?;
        self.registry.remove(&closed);
        self.current = self.registry.keys().next().cloned();
        log::debug!(
            "closed document `{}`, {} still open",
            closed,
            self.registry.len()
        );
        Some(closed)
    }

    /// Close every open document and clear the current pointer
    pub fn close_all(&mut self) {
        log::debug!("closing all {} documents", self.registry.len());
        self.registry.clear();
        self.current = None;
    }

    /// Serialize the current workbook to a file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SessionError> {
        let book = self.current_book()?;
        log::debug!("saving current document to {}", path.as_ref().display());
        umya_spreadsheet::writer::xlsx::write(book, path)?;
        Ok(())
    }

    /// Serialize the current workbook into an in-memory buffer
    pub fn save_to_bytes(&self) -> Result<Vec<u8>, SessionError> {
        let book = self.current_book()?;
        let mut cursor = Cursor::new(Vec::new());
        umya_spreadsheet::writer::xlsx::write_writer(book, &mut cursor)?;
        Ok(cursor.into_inner())
    }

    /// Ordered sheet names of the current workbook
    pub fn sheet_names(&self) -> Result<Vec<String>, SessionError> {
        let book = self.current_book()?;
        Ok(book
            .get_sheet_collection()
            .iter()
            .map(|sheet| sheet.get_name().to_string())
            .collect())
    }

    /// Identifier of the current document, if any
    pub fn current_id(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Number of open documents
    pub fn document_count(&self) -> usize {
        self.registry.len()
    }

    /// Resolve a sheet of the current workbook by name, or the active sheet
    pub fn sheet(&self, name: Option<&str>) -> Result<&Worksheet, SessionError> {
        let book = self.current_book()?;
        match name {
            None => Ok(book.get_active_sheet()),
            Some(n) => book
                .get_sheet_by_name(n)
                .ok_or_else(|| SessionError::UnknownSheet { name: n.to_string() }),
        }
    }

    fn sheet_mut(&mut self, name: Option<&str>) -> Result<&mut Worksheet, SessionError> {
        let book = self.current_book_mut()?;
        match name {
            None => Ok(book.get_active_sheet_mut()),
            Some(n) => book
                .get_sheet_by_name_mut(n)
                .ok_or_else(|| SessionError::UnknownSheet { name: n.to_string() }),
        }
    }

    fn current_book(&self) -> Result<&Spreadsheet, SessionError> {
        self.current
            .as_ref()
            .and_then(|id| self.registry.get(id))
            .ok_or(SessionError::NoOpenDocument)
    }

    fn current_book_mut(&mut self) -> Result<&mut Spreadsheet, SessionError> {
        match &self.current {
            Some(id) => self
                .registry
                .get_mut(id)
                .ok_or(SessionError::NoOpenDocument),
            None => Err(SessionError::NoOpenDocument),
        }
    }

    fn ensure_free(&self, id: &str) -> Result<(), SessionError> {
        if self.registry.contains_key(id) {
            return Err(SessionError::DuplicateIdentifier { id: id.to_string() });
        }
        Ok(())
    }
}

/// Grid accessors, all 1-based in both row and column
impl DocumentSession {
    /// Read a single cell; absent cells read as [`Scalar::Empty`]
    pub fn read_cell(
        &self,
        row: u32,
        col: u32,
        sheet: Option<&str>,
    ) -> Result<Scalar, SessionError> {
        let ws = self.sheet(sheet)?;
        Ok(read_at(ws, col, row))
    }

    /// Read `count` cells of a row, starting at column `col_offset + 1`
    pub fn read_row(
        &self,
        row: u32,
        col_offset: u32,
        count: u32,
        sheet: Option<&str>,
    ) -> Result<Vec<Scalar>, SessionError> {
        let ws = self.sheet(sheet)?;
        Ok((1..=count).map(|i| read_at(ws, col_offset + i, row)).collect())
    }

    /// Read `count` cells of a column, starting at row `row_offset + 1`
    pub fn read_column(
        &self,
        col: u32,
        row_offset: u32,
        count: u32,
        sheet: Option<&str>,
    ) -> Result<Vec<Scalar>, SessionError> {
        let ws = self.sheet(sheet)?;
        Ok((1..=count).map(|i| read_at(ws, col, row_offset + i)).collect())
    }

    /// Read the whole populated region of a sheet as rows of cells
    ///
    /// Dimensions come from the engine's highest written row and column; an
    /// untouched sheet yields no rows.
    pub fn read_sheet(&self, sheet: Option<&str>) -> Result<Vec<Vec<Scalar>>, SessionError> {
        let ws = self.sheet(sheet)?;
        let max_col = ws.get_highest_column();
        let max_row = ws.get_highest_row();
        Ok((1..=max_row)
            .map(|row| (1..=max_col).map(|col| read_at(ws, col, row)).collect())
            .collect())
    }

    /// Write a single cell, creating it if needed
    pub fn write_cell(
        &mut self,
        row: u32,
        col: u32,
        value: &Scalar,
        sheet: Option<&str>,
    ) -> Result<(), SessionError> {
        let ws = self.sheet_mut(sheet)?;
        value.write_to(ws.get_cell_mut((col, row)));
        Ok(())
    }

    /// Write values left-to-right in a row, starting at column `col_offset + 1`
    pub fn write_row(
        &mut self,
        row: u32,
        values: &[Scalar],
        col_offset: u32,
        sheet: Option<&str>,
    ) -> Result<(), SessionError> {
        let ws = self.sheet_mut(sheet)?;
        for (i, value) in values.iter().enumerate() {
            value.write_to(ws.get_cell_mut((col_offset + i as u32 + 1, row)));
        }
        Ok(())
    }

    /// Write rows stacked top-to-bottom, starting at row `row_offset + 1`
    pub fn write_rows(
        &mut self,
        rows: &[Vec<Scalar>],
        row_offset: u32,
        col_offset: u32,
        sheet: Option<&str>,
    ) -> Result<(), SessionError> {
        for (i, values) in rows.iter().enumerate() {
            self.write_row(row_offset + i as u32 + 1, values, col_offset, sheet)?;
        }
        Ok(())
    }

    /// Write values top-to-bottom in a column, starting at row `row_offset + 1`
    pub fn write_column(
        &mut self,
        col: u32,
        values: &[Scalar],
        row_offset: u32,
        sheet: Option<&str>,
    ) -> Result<(), SessionError> {
        let ws = self.sheet_mut(sheet)?;
        for (i, value) in values.iter().enumerate() {
            value.write_to(ws.get_cell_mut((col, row_offset + i as u32 + 1)));
        }
        Ok(())
    }
}

// Engine coordinates are (column, row)
fn read_at(ws: &Worksheet, col: u32, row: u32) -> Scalar {
    ws.get_cell((col, row))
        .map(Scalar::from_cell)
        .unwrap_or(Scalar::Empty)
}
