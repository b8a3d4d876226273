// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Chunked readers for the tabular source.
//!
//! The source is either a CSV file or an Excel workbook. Both are exposed as
//! a sequence of [`RawChunk`]s holding at most `chunk_size` rows of text
//! cells. Typing happens later, in the normalizer.
//!
//! Workbooks are read from their first worksheet. Cells are rendered to text
//! the way a CSV export of the sheet would show them, with date cells
//! rendered in the configured date format.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use calamine::{DataType, Range, Reader, Xlsx, open_workbook};
use csv::StringRecord;
use num_traits::ToPrimitive;
use staffload_domain::DateFormat;
use time::{Date, Month};
use tracing::{debug, info};

use crate::error::CoreError;

/// A bounded slice of source rows sharing one header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawChunk {
    /// Header cells, trimmed of surrounding whitespace.
    pub headers: StringRecord,
    pub rows: Vec<StringRecord>,
    /// 1-based data row number of `rows[0]` (the header row is not counted).
    pub first_row: usize,
}

impl RawChunk {
    /// Creates a chunk starting at data row 1.
    #[must_use]
    pub const fn new(headers: StringRecord, rows: Vec<StringRecord>) -> Self {
        Self {
            headers,
            rows,
            first_row: 1,
        }
    }
}

/// Reads a CSV source in chunks.
pub struct CsvChunkReader<R: Read> {
    reader: csv::Reader<R>,
    headers: StringRecord,
    chunk_size: usize,
    rows_read: usize,
    finished: bool,
}

impl CsvChunkReader<File> {
    /// Opens a CSV file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or has no header row.
    pub fn from_path(path: &Path, chunk_size: usize) -> Result<Self, CoreError> {
        let reader: csv::Reader<File> = csv_builder().from_path(path)?;
        Self::from_csv_reader(reader, chunk_size)
    }
}

impl<R: Read> CsvChunkReader<R> {
    /// Wraps any reader producing CSV text.
    ///
    /// # Errors
    ///
    /// Returns an error if the header row cannot be read.
    pub fn from_reader(rdr: R, chunk_size: usize) -> Result<Self, CoreError> {
        Self::from_csv_reader(csv_builder().from_reader(rdr), chunk_size)
    }

    fn from_csv_reader(mut reader: csv::Reader<R>, chunk_size: usize) -> Result<Self, CoreError> {
        let headers: StringRecord = reader.headers()?.clone();
        Ok(Self {
            reader,
            headers,
            chunk_size: chunk_size.max(1),
            rows_read: 0,
            finished: false,
        })
    }

    /// Returns the header row.
    #[must_use]
    pub const fn headers(&self) -> &StringRecord {
        &self.headers
    }
}

impl<R: Read> Iterator for CsvChunkReader<R> {
    type Item = Result<RawChunk, CoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let mut rows: Vec<StringRecord> = Vec::with_capacity(self.chunk_size.min(1024));
        while rows.len() < self.chunk_size {
            let mut record: StringRecord = StringRecord::new();
            match self.reader.read_record(&mut record) {
                Ok(true) => rows.push(record),
                Ok(false) => {
                    self.finished = true;
                    break;
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(CoreError::from(e)));
                }
            }
        }

        if rows.is_empty() {
            return None;
        }

        let first_row: usize = self.rows_read + 1;
        self.rows_read += rows.len();
        debug!(first_row, rows = rows.len(), "Read CSV chunk");

        Some(Ok(RawChunk {
            headers: self.headers.clone(),
            rows,
            first_row,
        }))
    }
}

fn csv_builder() -> csv::ReaderBuilder {
    let mut builder: csv::ReaderBuilder = csv::ReaderBuilder::new();
    builder.flexible(true).trim(csv::Trim::Headers);
    builder
}

/// Reads the first worksheet of an Excel workbook in chunks.
pub struct XlsxChunkReader {
    headers: StringRecord,
    rows: std::vec::IntoIter<StringRecord>,
    chunk_size: usize,
    rows_read: usize,
}

impl XlsxChunkReader {
    /// Loads the first worksheet of a workbook.
    ///
    /// # Errors
    ///
    /// Returns an error if the workbook cannot be opened or has no worksheets.
    pub fn from_path(
        path: &Path,
        chunk_size: usize,
        date_format: &DateFormat,
    ) -> Result<Self, CoreError> {
        let (headers, rows) = read_first_sheet(path, date_format)?;
        Ok(Self {
            headers,
            rows: rows.into_iter(),
            chunk_size: chunk_size.max(1),
            rows_read: 0,
        })
    }

    /// Returns the header row.
    #[must_use]
    pub const fn headers(&self) -> &StringRecord {
        &self.headers
    }
}

impl Iterator for XlsxChunkReader {
    type Item = Result<RawChunk, CoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        let rows: Vec<StringRecord> = self.rows.by_ref().take(self.chunk_size).collect();
        if rows.is_empty() {
            return None;
        }

        let first_row: usize = self.rows_read + 1;
        self.rows_read += rows.len();
        debug!(first_row, rows = rows.len(), "Read worksheet chunk");

        Some(Ok(RawChunk {
            headers: self.headers.clone(),
            rows,
            first_row,
        }))
    }
}

/// A chunked reader for either supported source format.
pub enum SourceReader {
    Csv(CsvChunkReader<File>),
    Xlsx(XlsxChunkReader),
}

impl SourceReader {
    /// Opens a source file, choosing the format by extension.
    ///
    /// `.xlsx` and `.xlsm` files are read as workbooks; anything else as CSV.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or read.
    pub fn open(
        path: &Path,
        chunk_size: usize,
        date_format: &DateFormat,
    ) -> Result<Self, CoreError> {
        if is_workbook(path) {
            info!("Reading workbook source {}", path.display());
            Ok(Self::Xlsx(XlsxChunkReader::from_path(
                path,
                chunk_size,
                date_format,
            )?))
        } else {
            info!("Reading CSV source {}", path.display());
            Ok(Self::Csv(CsvChunkReader::from_path(path, chunk_size)?))
        }
    }

    /// Returns the header row.
    #[must_use]
    pub const fn headers(&self) -> &StringRecord {
        match self {
            Self::Csv(reader) => reader.headers(),
            Self::Xlsx(reader) => reader.headers(),
        }
    }
}

impl Iterator for SourceReader {
    type Item = Result<RawChunk, CoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Csv(reader) => reader.next(),
            Self::Xlsx(reader) => reader.next(),
        }
    }
}

/// Returns whether a path names an Excel workbook.
#[must_use]
pub fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx") || ext.eq_ignore_ascii_case("xlsm"))
}

/// Converts the first worksheet of a workbook into a CSV file.
///
/// # Returns
///
/// The number of data rows written (the header row is not counted).
///
/// # Errors
///
/// Returns an error if the workbook cannot be read or the CSV cannot be written.
pub fn convert_xlsx_to_csv(
    input: &Path,
    output: &Path,
    date_format: &DateFormat,
) -> Result<usize, CoreError> {
    let (headers, rows) = read_first_sheet(input, date_format)?;

    let mut writer: csv::Writer<File> = csv::Writer::from_path(output)?;
    writer.write_record(&headers)?;
    for row in &rows {
        writer.write_record(row)?;
    }
    writer.flush()?;

    info!(
        rows = rows.len(),
        "Converted {} to {}",
        input.display(),
        output.display()
    );
    Ok(rows.len())
}

fn read_first_sheet(
    path: &Path,
    date_format: &DateFormat,
) -> Result<(StringRecord, Vec<StringRecord>), CoreError> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;

    let sheet_name: String = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| CoreError::EmptyWorkbook(path.to_path_buf()))?;

    let range: Range<DataType> = workbook
        .worksheet_range(&sheet_name)
        .ok_or_else(|| CoreError::EmptyWorkbook(path.to_path_buf()))??;

    let mut rows = range.rows();
    let headers: StringRecord = rows.next().map_or_else(StringRecord::new, |header_row| {
        header_row
            .iter()
            .map(|cell| render_cell(cell, date_format).trim().to_string())
            .collect()
    });

    let data: Vec<StringRecord> = rows
        .map(|row| {
            row.iter()
                .map(|cell| render_cell(cell, date_format))
                .collect::<StringRecord>()
        })
        .filter(|record| record.iter().any(|cell| !cell.is_empty()))
        .collect();

    debug!(sheet = %sheet_name, rows = data.len(), "Loaded worksheet");
    Ok((headers, data))
}

/// Renders a worksheet cell as the text a CSV export would contain.
pub(crate) fn render_cell(cell: &DataType, date_format: &DateFormat) -> String {
    match cell {
        DataType::String(value) => value.clone(),
        DataType::Float(value) => value.to_string(),
        DataType::Int(value) => value.to_string(),
        DataType::Bool(value) => value.to_string(),
        DataType::DateTime(serial) => excel_serial_to_date(*serial)
            .and_then(|date| date_format.format(date).ok())
            .unwrap_or_else(|| serial.to_string()),
        DataType::Empty => String::new(),
        other => other.to_string(),
    }
}

/// Converts an Excel serial day number (1900 date system) to a date.
pub(crate) fn excel_serial_to_date(serial: f64) -> Option<Date> {
    let days: i64 = serial.floor().to_i64()?;
    // Excel counts a 29 February 1900 that never existed; from serial 61 on this epoch is exact.
    let epoch: Date = Date::from_calendar_date(1899, Month::December, 30).ok()?;
    epoch.checked_add(time::Duration::days(days))
}
