//! Keyword Binding Layer
//!
//! The caller-facing surface: every session operation is reachable as one
//! named keyword taking string arguments, the way an automation framework
//! hands them over. All coercion from strings to identifiers, 1-based
//! indices, and typed cell values happens here; the session core only sees
//! semantic types.
//!
//! List-valued arguments (`row_data`, `col_data`, `rows_data`) are JSON
//! arrays; byte-stream arguments are base64.

use anyhow::{Context, Result, anyhow, bail};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::Value;

use crate::session::DocumentSession;
use crate::value::Scalar;

/// Dispatch one keyword invocation against a session
///
/// Keyword names are matched case-insensitively, with spaces and underscores
/// treated the same, so `"Create Excel Document"` and
/// `"create_excel_document"` are equivalent.
pub fn run_keyword(session: &mut DocumentSession, name: &str, args: &[String]) -> Result<Value> {
    match normalize(name).as_str() {
        "create_excel_document" => {
            let id = arg(args, 0, "doc_id")?;
            session.create(id)?;
            Ok(Value::String(id.to_string()))
        }
        "open_excel_document" => {
            let filename = arg(args, 0, "filename")?;
            let id = arg(args, 1, "doc_id")?;
            session.open(filename, id)?;
            Ok(Value::String(id.to_string()))
        }
        "open_excel_document_from_stream" => {
            let stream = arg(args, 0, "stream")?;
            let id = arg(args, 1, "doc_id")?;
            let bytes = BASE64
                .decode(stream)
                .context("argument `stream` is not valid base64")?;
            session.open_from_bytes(&bytes, id)?;
            Ok(Value::String(id.to_string()))
        }
        "switch_current_excel_document" => {
            let id = arg(args, 0, "doc_id")?;
            let previous = session.switch_current(id)?;
            Ok(previous.map(Value::String).unwrap_or(Value::Null))
        }
        "close_current_excel_document" => {
            Ok(session.close_current().map(Value::String).unwrap_or(Value::Null))
        }
        "close_all_excel_documents" => {
            session.close_all();
            Ok(Value::Null)
        }
        "save_excel_document" => {
            let filename = arg(args, 0, "filename")?;
            session.save(filename)?;
            Ok(Value::Null)
        }
        "get_list_sheet_names" => {
            let names = session.sheet_names()?;
            Ok(Value::Array(names.into_iter().map(Value::String).collect()))
        }
        "read_excel_cell" => {
            let row = index_arg(args, 0, "row_num")?;
            let col = index_arg(args, 1, "col_num")?;
            let value = session.read_cell(row, col, opt_arg(args, 2))?;
            Ok(to_json(&value))
        }
        "read_excel_row" => {
            let row = index_arg(args, 0, "row_num")?;
            let col_offset = offset_arg(args, 1, "col_offset")?;
            let count = offset_arg(args, 2, "max_num")?;
            let values = session.read_row(row, col_offset, count, opt_arg(args, 3))?;
            Ok(Value::Array(values.iter().map(to_json).collect()))
        }
        "read_excel_column" => {
            let col = index_arg(args, 0, "col_num")?;
            let row_offset = offset_arg(args, 1, "row_offset")?;
            let count = offset_arg(args, 2, "max_num")?;
            let values = session.read_column(col, row_offset, count, opt_arg(args, 3))?;
            Ok(Value::Array(values.iter().map(to_json).collect()))
        }
        "read_excel_sheet" => {
            let grid = session.read_sheet(opt_arg(args, 0))?;
            Ok(Value::Array(
                grid.iter()
                    .map(|row| Value::Array(row.iter().map(to_json).collect()))
                    .collect(),
            ))
        }
        "write_excel_cell" => {
            let row = index_arg(args, 0, "row_num")?;
            let col = index_arg(args, 1, "col_num")?;
            let value = Scalar::parse(arg(args, 2, "value")?);
            session.write_cell(row, col, &value, opt_arg(args, 3))?;
            Ok(Value::Null)
        }
        "write_excel_row" => {
            let row = index_arg(args, 0, "row_num")?;
            let values = list_arg(args, 1, "row_data")?;
            let col_offset = offset_arg(args, 2, "col_offset")?;
            session.write_row(row, &values, col_offset, opt_arg(args, 3))?;
            Ok(Value::Null)
        }
        "write_excel_rows" => {
            let rows = rows_arg(args, 0, "rows_data")?;
            let row_offset = offset_arg(args, 1, "rows_offset")?;
            let col_offset = offset_arg(args, 2, "col_offset")?;
            session.write_rows(&rows, row_offset, col_offset, opt_arg(args, 3))?;
            Ok(Value::Null)
        }
        "write_excel_column" => {
            let col = index_arg(args, 0, "col_num")?;
            let values = list_arg(args, 1, "col_data")?;
            let row_offset = offset_arg(args, 2, "row_offset")?;
            session.write_column(col, &values, row_offset, opt_arg(args, 3))?;
            Ok(Value::Null)
        }
        other => bail!("unknown keyword `{}`", other),
    }
}

fn normalize(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| if c == ' ' { '_' } else { c.to_ascii_lowercase() })
        .collect()
}

fn arg<'a>(args: &'a [String], idx: usize, name: &str) -> Result<&'a str> {
    args.get(idx)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("missing argument `{}` (position {})", name, idx + 1))
}

fn opt_arg(args: &[String], idx: usize) -> Option<&str> {
    args.get(idx).map(String::as_str).filter(|s| !s.is_empty())
}

/// A 1-based row or column number
fn index_arg(args: &[String], idx: usize, name: &str) -> Result<u32> {
    let raw = arg(args, idx, name)?;
    let value: u32 = raw
        .parse()
        .with_context(|| format!("argument `{}` must be an integer, got `{}`", name, raw))?;
    if value == 0 {
        bail!("argument `{}` is 1-based, got 0", name);
    }
    Ok(value)
}

/// An optional 0-based offset or count, defaulting to 0 when absent
fn offset_arg(args: &[String], idx: usize, name: &str) -> Result<u32> {
    match opt_arg(args, idx) {
        None => Ok(0),
        Some(raw) => raw
            .parse()
            .with_context(|| format!("argument `{}` must be an integer, got `{}`", name, raw)),
    }
}

fn list_arg(args: &[String], idx: usize, name: &str) -> Result<Vec<Scalar>> {
    let raw = arg(args, idx, name)?;
    let parsed: Value = serde_json::from_str(raw)
        .with_context(|| format!("argument `{}` must be a JSON array", name))?;
    match parsed {
        Value::Array(items) => items
            .iter()
            .map(|item| from_json(item).with_context(|| format!("in argument `{}`", name)))
            .collect(),
        _ => bail!("argument `{}` must be a JSON array", name),
    }
}

fn rows_arg(args: &[String], idx: usize, name: &str) -> Result<Vec<Vec<Scalar>>> {
    let raw = arg(args, idx, name)?;
    let parsed: Value = serde_json::from_str(raw)
        .with_context(|| format!("argument `{}` must be a JSON array of arrays", name))?;
    let Value::Array(rows) = parsed else {
        bail!("argument `{}` must be a JSON array of arrays", name);
    };
    rows.iter()
        .map(|row| match row {
            Value::Array(items) => items
                .iter()
                .map(|item| from_json(item).with_context(|| format!("in argument `{}`", name)))
                .collect(),
            _ => bail!("argument `{}` must contain only arrays", name),
        })
        .collect()
}

fn to_json(value: &Scalar) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

fn from_json(value: &Value) -> Result<Scalar> {
    match value {
        Value::Null => Ok(Scalar::Empty),
        Value::Bool(b) => Ok(Scalar::Bool(*b)),
        Value::Number(n) => n
            .as_f64()
            .map(Scalar::Number)
            .ok_or_else(|| anyhow!("number `{}` is not representable as f64", n)),
        Value::String(s) => Ok(Scalar::Text(s.clone())),
        other => bail!("cell values must be scalars, got `{}`", other),
    }
}
