pub mod recipe;
pub mod report;
pub mod user;

pub use recipe::*;
pub use report::*;
pub use user::*;

use crate::utils::AppError;

/// Rejects a required field that is absent or only whitespace.
pub(crate) fn require(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::ValidationFailure(format!("{} is required", field)));
    }
    Ok(())
}
