//! Non-fatal issues found while bringing a profile to the estimator boundary.
//!
//! Profiles arrive from forms, flags or files written by older releases. Most
//! problems there (a slider value out of range, an unknown home type) are
//! repaired rather than rejected, and every repair is recorded here so a caller
//! can show or log it.
//!
//! ```
//! use eterna_core::diagnostics::{Diagnostics, Severity};
//!
//! let mut diag = Diagnostics::new();
//! diag.add_field_warning("clamp", "ac_units", "0 raised to 1");
//! assert_eq!(diag.warning_count(), 1);
//! assert!(!diag.has_errors());
//! ```

use serde::Serialize;

/// Severity level for diagnostic issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Value was repaired and the operation continued
    Warning,
    /// Value could not be used
    Error,
}

/// A single diagnostic issue
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticIssue {
    pub severity: Severity,
    /// Grouping key, e.g. "clamp", "fallback", "parse"
    pub category: String,
    pub message: String,
    /// Profile field the issue refers to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl DiagnosticIssue {
    pub fn new(
        severity: Severity,
        category: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            category: category.into(),
            message: message.into(),
            field: None,
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

impl std::fmt::Display for DiagnosticIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let severity = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "[{}:{}] ", severity, self.category)?;
        if let Some(field) = &self.field {
            write!(f, "{}: ", field)?;
        }
        write!(f, "{}", self.message)
    }
}

/// Collection of diagnostic issues for one operation
#[derive(Debug, Clone, Default, Serialize)]
pub struct Diagnostics {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<DiagnosticIssue>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, issue: DiagnosticIssue) {
        self.issues.push(issue);
    }

    pub fn add_warning(&mut self, category: &str, message: &str) {
        self.issues
            .push(DiagnosticIssue::new(Severity::Warning, category, message));
    }

    pub fn add_field_warning(&mut self, category: &str, field: &str, message: &str) {
        self.issues
            .push(DiagnosticIssue::new(Severity::Warning, category, message).with_field(field));
    }

    pub fn add_field_error(&mut self, category: &str, field: &str, message: &str) {
        self.issues
            .push(DiagnosticIssue::new(Severity::Error, category, message).with_field(field));
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &DiagnosticIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &DiagnosticIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
    }

    /// Issues attached to a given profile field
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a DiagnosticIssue> {
        self.issues
            .iter()
            .filter(move |i| i.field.as_deref() == Some(field))
    }

    pub fn merge(&mut self, other: Diagnostics) {
        self.issues.extend(other.issues);
    }

    pub fn summary(&self) -> String {
        let plural = |n: usize| if n == 1 { "" } else { "s" };
        match (self.warning_count(), self.error_count()) {
            (0, 0) => "No issues".to_string(),
            (w, 0) => format!("{} warning{}", w, plural(w)),
            (0, e) => format!("{} error{}", e, plural(e)),
            (w, e) => format!("{} warning{}, {} error{}", w, plural(w), e, plural(e)),
        }
    }
}

impl std::fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Diagnostics: {}", self.summary())?;
        for issue in &self.issues {
            writeln!(f, "  {}", issue)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_pluralization() {
        let mut diag = Diagnostics::new();
        assert_eq!(diag.summary(), "No issues");
        diag.add_warning("fallback", "unknown home type");
        assert_eq!(diag.summary(), "1 warning");
        diag.add_field_warning("clamp", "family_size", "20 lowered to 15");
        diag.add_field_error("range", "ac_units", "must be at least 1");
        assert_eq!(diag.summary(), "2 warnings, 1 error");
    }

    #[test]
    fn test_issue_display_includes_field() {
        let issue = DiagnosticIssue::new(Severity::Warning, "clamp", "0 raised to 1")
            .with_field("ac_units");
        assert_eq!(issue.to_string(), "[warning:clamp] ac_units: 0 raised to 1");
    }

    #[test]
    fn test_for_field_filters() {
        let mut diag = Diagnostics::new();
        diag.add_field_warning("clamp", "ac_units", "a");
        diag.add_field_warning("clamp", "family_size", "b");
        diag.add_field_warning("clamp", "ac_units", "c");
        assert_eq!(diag.for_field("ac_units").count(), 2);
        assert_eq!(diag.for_field("bill_target").count(), 0);
    }

    #[test]
    fn test_merge_and_serialize() {
        let mut a = Diagnostics::new();
        a.add_warning("fallback", "x");
        let mut b = Diagnostics::new();
        b.add_field_error("range", "ac_units", "y");
        a.merge(b);
        assert!(a.has_errors());
        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["issues"][1]["severity"], "error");
        assert_eq!(json["issues"][1]["field"], "ac_units");
        assert!(json["issues"][0].get("field").is_none());
    }
}
