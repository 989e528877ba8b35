// file: src/utils/validation.rs
// description: input validation for organizations, repository names and folder segments
// reference: https://docs.github.com/en/rest/repos/repos

use crate::error::{Result, ScanError};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // GitHub logins: alphanumerics and single hyphens, at most 39 characters
    static ref ORGANIZATION: Regex = Regex::new(
        r"^[A-Za-z0-9](?:[A-Za-z0-9]|-[A-Za-z0-9]){0,38}$"
    ).expect("ORGANIZATION regex is valid");

    static ref REPOSITORY: Regex = Regex::new(
        r"^[A-Za-z0-9._-]{1,100}$"
    ).expect("REPOSITORY regex is valid");
}

pub struct Validator;

impl Validator {
    pub fn validate_organization(name: &str) -> Result<()> {
        if !ORGANIZATION.is_match(name) {
            return Err(ScanError::Validation(format!(
                "Invalid organization name: '{}'",
                name
            )));
        }
        Ok(())
    }

    /// Accepts either a bare repository name or an `owner/name` pair.
    pub fn validate_repository_name(name: &str) -> Result<()> {
        let (owner, repo) = match name.split_once('/') {
            Some((owner, repo)) => (Some(owner), repo),
            None => (None, name),
        };

        if let Some(owner) = owner {
            Self::validate_organization(owner)?;
        }

        if !REPOSITORY.is_match(repo) || repo == "." || repo == ".." {
            return Err(ScanError::Validation(format!(
                "Invalid repository name: '{}'",
                name
            )));
        }

        Ok(())
    }

    pub fn validate_segment(segment: &str) -> Result<()> {
        if segment.trim().is_empty() {
            return Err(ScanError::Validation(
                "Folder segment cannot be empty".to_string(),
            ));
        }

        if segment.contains('/') || segment.contains('\\') {
            return Err(ScanError::Validation(format!(
                "Folder segment must be a single name, got '{}'",
                segment
            )));
        }

        if segment == "." || segment == ".." {
            return Err(ScanError::Validation(format!(
                "Folder segment cannot be a relative reference: '{}'",
                segment
            )));
        }

        Ok(())
    }

    pub fn validate_segments(segments: &[String]) -> Result<()> {
        if segments.is_empty() {
            return Err(ScanError::Validation(
                "At least one folder segment is required".to_string(),
            ));
        }

        segments
            .iter()
            .try_for_each(|segment| Self::validate_segment(segment))
    }

    /// Splits a `resources/data` style argument into folder segments.
    pub fn parse_segments(raw: &str) -> Result<Vec<String>> {
        let segments: Vec<String> = raw
            .split('/')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        Self::validate_segments(&segments)?;
        Ok(segments)
    }
}
