use std::fmt;
use std::io::Write;
use std::iter;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::domain::{ApplicationRecord, KeyField, ParseOptionError};

/// Output formats available for application listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl OutputFormat {
    pub const fn label(self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OutputFormat {
    type Err = ParseOptionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(ParseOptionError::new("output format", value)),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to encode CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Human readable block for a single application.
pub fn render_record<W: Write>(out: &mut W, record: &ApplicationRecord) -> std::io::Result<()> {
    let details = &record.details;
    writeln!(out, "\nApplication {}", record.id)?;
    writeln!(
        out,
        "Name: {} | Gender: {} | Phone: {}",
        details.name, details.gender, details.phone
    )?;
    writeln!(out, "Address: {}", details.address)?;
    writeln!(out, "Date: {} | Time: {}", details.date, details.time)?;
    writeln!(
        out,
        "IFSC: {} | Account No: {} | Balance: {:.2}",
        details.ifsc, details.account_number, details.balance
    )?;
    writeln!(
        out,
        "Service: {} | PAN: {} | Aadhar: {}",
        details.service_type, details.pan, details.aadhar
    )?;
    writeln!(
        out,
        "Transaction: {} | Payment: {}",
        details.transaction_status, details.payment_status
    )
}

/// Render records, in iteration order, in the requested format.
pub fn render_records<'a, W, I>(
    out: &mut W,
    format: OutputFormat,
    records: I,
) -> Result<(), RenderError>
where
    W: Write,
    I: IntoIterator<Item = &'a ApplicationRecord>,
{
    match format {
        OutputFormat::Text => {
            for record in records {
                render_record(out, record)?;
            }
        }
        OutputFormat::Json => {
            let records: Vec<&ApplicationRecord> = records.into_iter().collect();
            serde_json::to_writer_pretty(&mut *out, &records)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(&mut *out);
            writer.write_record(csv_header())?;
            for record in records {
                writer.write_record(csv_row(record))?;
            }
            writer.flush()?;
        }
    }

    Ok(())
}

/// Render one application. JSON yields a bare object rather than a one-element array.
pub fn render_single<W: Write>(
    out: &mut W,
    format: OutputFormat,
    record: &ApplicationRecord,
) -> Result<(), RenderError> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, record)?;
            writeln!(out)?;
            Ok(())
        }
        OutputFormat::Text | OutputFormat::Csv => render_records(out, format, iter::once(record)),
    }
}

fn csv_header() -> Vec<&'static str> {
    let mut header = vec!["id"];
    for field in KeyField::ALL {
        header.push(field.key());
        if field == KeyField::AccountNumber {
            header.push("balance");
        }
    }
    header
}

fn csv_row(record: &ApplicationRecord) -> Vec<String> {
    let mut row = vec![record.id.to_string()];
    for field in KeyField::ALL {
        row.push(record.details.field(field).to_string());
        if field == KeyField::AccountNumber {
            row.push(format!("{:.2}", record.details.balance));
        }
    }
    row
}
