pub mod comment;
pub mod post;
pub mod user;

use crate::dtos::patch::Patch;
use crate::errors::{AppError, AppResult};

/// Postgres TEXT cannot hold NUL, so such input is rejected up front.
pub(crate) fn reject_nul(field: &str, value: &str) -> AppResult<()> {
    if value.contains('\0') {
        return Err(AppError::validation(format!("{} must not contain NUL characters", field)));
    }
    Ok(())
}

pub(crate) fn require_text(field: &str, value: &str) -> AppResult<()> {
    reject_nul(field, value)?;
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{} cannot be empty", field)));
    }
    Ok(())
}

/// Apply a patch to a column that has no NULL state.
pub(crate) fn patch_required<T>(field: &str, patch: Patch<T>, slot: &mut T) -> AppResult<bool> {
    match patch {
        Patch::Absent => Ok(false),
        Patch::Null => Err(AppError::validation(format!("{} cannot be null", field))),
        Patch::Value(v) => {
            *slot = v;
            Ok(true)
        }
    }
}

/// Apply a patch to a nullable column; `null` clears it.
pub(crate) fn patch_nullable<T>(patch: Patch<T>, slot: &mut Option<T>) -> bool {
    match patch {
        Patch::Absent => false,
        Patch::Null => {
            *slot = None;
            true
        }
        Patch::Value(v) => {
            *slot = Some(v);
            true
        }
    }
}

/// Blank image urls are stored as "no image".
pub(crate) fn normalize_image_url(url: Option<String>) -> Option<String> {
    url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn nul_bytes_are_rejected() {
        assert_matches!(require_text("title", "a\0b"), Err(AppError::Validation(msg)) if msg.contains("NUL"));
        assert_matches!(reject_nul("search", "\0"), Err(AppError::Validation(_)));
        assert!(require_text("title", "plain").is_ok());
    }
}
