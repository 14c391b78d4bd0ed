//!
//! File Loader Utility
//!
//! This module loads the worksheet and submission JSON exports the command line grader works on.
//! It ensures that each file exists, is a regular file, is not larger than [`MAX_JSON_SIZE`] and
//! deserializes into the expected type.
//!
//! # Error Handling
//!
//! Returns [`MarkerError::IoError`] for missing, unreadable or oversized files and
//! [`MarkerError::InvalidJson`] for content that does not parse. The path and the underlying
//! cause are logged; the returned message stays general.

use crate::error::MarkerError;
use crate::submission::Submission;
use crate::types::Worksheet;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use tracing::error;

/// Maximum allowed size for JSON files.
pub const MAX_JSON_SIZE: u64 = 2 * 1024 * 1024; // 2MB

/// Both exports needed to grade one submission.
#[derive(Debug)]
pub struct LoadedFiles {
    pub worksheet: Worksheet,
    pub submission: Submission,
}

/// Checks that a file exists, is a file, and (optionally) does not exceed a maximum size.
fn check_file(path: &Path, max_size: Option<u64>) -> Result<(), MarkerError> {
    if !path.exists() {
        error!("File not found: {}", path.display());
        return Err(MarkerError::IoError("File not found".to_string()));
    }

    if !path.is_file() {
        error!("Not a file: {}", path.display());
        return Err(MarkerError::IoError("Invalid file type".to_string()));
    }

    let metadata = fs::metadata(path).map_err(|e| {
        error!("File unreadable: {} - {}", path.display(), e);
        MarkerError::IoError("File unreadable".to_string())
    })?;

    if let Some(max) = max_size {
        if metadata.len() > max {
            error!(
                "File too large: {} ({} bytes, max {} bytes)",
                path.display(),
                metadata.len(),
                max
            );
            return Err(MarkerError::IoError("File too large".to_string()));
        }
    }

    Ok(())
}

/// Reads and deserializes one size-checked JSON file. `what` names the file in error messages.
pub fn load_json_file<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T, MarkerError> {
    check_file(path, Some(MAX_JSON_SIZE))?;

    let bytes = fs::read(path).map_err(|e| {
        error!("Failed to read {} file {}: {}", what, path.display(), e);
        MarkerError::IoError(format!("Failed to load {what}"))
    })?;

    serde_json::from_slice(&bytes).map_err(|e| {
        error!("Invalid JSON in {} file {}: {}", what, path.display(), e);
        MarkerError::InvalidJson(format!("Failed to parse {what}"))
    })
}

pub fn load_worksheet(path: &Path) -> Result<Worksheet, MarkerError> {
    load_json_file(path, "worksheet")
}

pub fn load_submission(path: &Path) -> Result<Submission, MarkerError> {
    load_json_file(path, "submission")
}

/// Loads both exports.
pub fn load_files(worksheet_path: &Path, submission_path: &Path) -> Result<LoadedFiles, MarkerError> {
    Ok(LoadedFiles {
        worksheet: load_worksheet(worksheet_path)?,
        submission: load_submission(submission_path)?,
    })
}

#[cfg(test)]
mod tests {
    //! Unit tests for the file loader utility.
    use super::*;
    use crate::submission::SubmissionStatus;
    use std::io::Write;
    use std::path::PathBuf;

    const DIR: &str = "src/test_files/file_loader";

    /// Test loading a valid pair of exports (happy path).
    #[test]
    fn test_happy_path() {
        let result = load_files(
            &PathBuf::from(DIR).join("worksheet.json"),
            &PathBuf::from(DIR).join("submission.json"),
        );
        assert!(result.is_ok(), "Expected Ok for happy path, got: {:?}", result);
        let loaded = result.unwrap();
        assert_eq!(loaded.worksheet.id, "w-geo");
        assert_eq!(loaded.worksheet.tasks.len(), 3);
        assert_eq!(loaded.submission.worksheet_id, "w-geo");
        assert_eq!(loaded.submission.status, SubmissionStatus::Submitted);
        assert!(loaded.submission.submitted_at.is_some());
    }

    /// Test error handling for a missing file.
    #[test]
    fn test_missing_file() {
        match load_worksheet(&PathBuf::from(DIR).join("nope.json")) {
            Err(MarkerError::IoError(msg)) => assert_eq!(msg, "File not found"),
            other => panic!("Expected IoError for missing file, got: {:?}", other),
        }
    }

    /// Test error handling for a directory passed as a file.
    #[test]
    fn test_directory_is_not_a_file() {
        match load_worksheet(&PathBuf::from(DIR)) {
            Err(MarkerError::IoError(msg)) => assert_eq!(msg, "Invalid file type"),
            other => panic!("Expected IoError for directory, got: {:?}", other),
        }
    }

    /// Test error handling for invalid JSON content.
    #[test]
    fn test_invalid_json_content() {
        match load_worksheet(&PathBuf::from(DIR).join("invalid.json")) {
            Err(MarkerError::InvalidJson(msg)) => assert_eq!(msg, "Failed to parse worksheet"),
            other => panic!("Expected InvalidJson, got: {:?}", other),
        }
    }

    /// Test error handling for a JSON file that is too large.
    #[test]
    fn test_json_too_large() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let chunk = vec![b' '; 64 * 1024];
        for _ in 0..33 {
            file.write_all(&chunk).unwrap();
        }
        file.flush().unwrap();

        match load_submission(file.path()) {
            Err(MarkerError::IoError(msg)) => assert_eq!(msg, "File too large"),
            other => panic!("Expected IoError for file too large, got: {:?}", other),
        }
    }

    /// A submission export is not a worksheet.
    #[test]
    fn test_wrong_document_shape() {
        let result = load_submission(&PathBuf::from(DIR).join("worksheet.json"));
        assert!(matches!(result, Err(MarkerError::InvalidJson(_))));
    }
}
