use chrono::NaiveDate;

use crate::error::{AppError, AppResult};
use crate::services::week::{is_supported, supported_range};

pub mod backup;
pub mod catalog;
pub mod entries;
pub mod health;
pub mod settings;
pub mod summaries;
pub mod ws;

/// Rejects dates outside the journal's supported window with 422.
pub(crate) fn supported_date(date: NaiveDate) -> AppResult<NaiveDate> {
    if is_supported(date) {
        return Ok(date);
    }
    let (min, max) = supported_range();
    Err(AppError::Validation(format!(
        "Date {} is outside the supported range {} to {}",
        date, min, max
    )))
}
