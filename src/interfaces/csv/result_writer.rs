use crate::domain::transaction::{ActionCode, TransactionResult};
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct ResultRow<'a> {
    operation: ActionCode,
    success: bool,
    authorization: Option<&'a str>,
    message: &'a str,
    avs_result: Option<&'a str>,
    cvv_result: Option<&'a str>,
}

/// Writes one CSV row per processed request.
pub struct ResultWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ResultWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_result(&mut self, operation: ActionCode, result: &TransactionResult) -> Result<()> {
        self.writer.serialize(ResultRow {
            operation,
            success: result.success,
            authorization: result.authorization.as_deref(),
            message: &result.message,
            avs_result: result.avs_result.code.as_deref(),
            cvv_result: result.cvv_result.as_deref(),
        })?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
