//! Per-record audit results.

use std::fmt;

use armoury_data::DatasetKind;

/// A snapshot value of one audited field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Count(usize),
    List(Vec<String>),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Number(n) => write!(f, "{n}"),
            FieldValue::Count(c) => write!(f, "{c}"),
            FieldValue::List(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<usize> for FieldValue {
    fn from(value: usize) -> Self {
        FieldValue::Count(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}

/// What an identifier used by an entry is supposed to resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefTarget {
    /// A record of another dataset; checked by the cross-reference pass.
    Dataset(DatasetKind),
    /// A tissue layer material. Collected, not resolved: no dataset declares them.
    TissueMaterial,
}

/// An identifier an entry uses that is defined elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub target: RefTarget,
    pub id: String,
}

/// The audit result of one record.
///
/// Clean when it has neither warnings nor errors.
#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub dataset: DatasetKind,
    pub id: String,
    /// Fields relevant to validation, in display order.
    pub fields: Vec<(&'static str, FieldValue)>,
    pub references: Vec<Reference>,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl AuditEntry {
    pub fn new(dataset: DatasetKind, id: impl Into<String>) -> Self {
        Self {
            dataset,
            id: id.into(),
            fields: Vec::new(),
            references: Vec::new(),
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Builder-style field snapshot.
    pub fn with_field(mut self, name: &'static str, value: impl Into<FieldValue>) -> Self {
        self.fields.push((name, value.into()));
        self
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn reference(&mut self, target: RefTarget, id: impl Into<String>) {
        self.references.push(Reference {
            target,
            id: id.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }

    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    /// A numeric or count field as `f64`; 0 when missing.
    pub fn number(&self, name: &str) -> f64 {
        match self.field(name) {
            Some(FieldValue::Number(n)) => *n,
            Some(FieldValue::Count(c)) => *c as f64,
            _ => 0.0,
        }
    }

    /// A text field; `None` when missing or empty.
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.field(name) {
            Some(FieldValue::Text(s)) if !s.is_empty() => Some(s),
            _ => None,
        }
    }

    /// A list field; empty when missing.
    pub fn list(&self, name: &str) -> &[String] {
        match self.field(name) {
            Some(FieldValue::List(items)) => items,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_until_a_finding_is_added() {
        let mut entry = AuditEntry::new(DatasetKind::Weapons, "swords.knightly");
        assert!(entry.is_clean());
        entry.warn("effective_mass is 0");
        assert!(!entry.is_clean());
        assert!(entry.has_warnings());
        assert!(!entry.has_errors());
    }

    #[test]
    fn field_accessors() {
        let entry = AuditEntry::new(DatasetKind::ArmourPieces, "gorget")
            .with_field("material_id", "steel")
            .with_field("coverage_count", 2usize)
            .with_field("weight", 1.5)
            .with_field("tags", vec!["neck".to_string()]);
        assert_eq!(entry.text("material_id"), Some("steel"));
        assert_eq!(entry.number("coverage_count"), 2.0);
        assert_eq!(entry.number("weight"), 1.5);
        assert_eq!(entry.number("absent"), 0.0);
        assert_eq!(entry.list("tags"), ["neck"]);
        assert!(entry.list("absent").is_empty());
    }

    #[test]
    fn empty_text_reads_as_missing() {
        let entry = AuditEntry::new(DatasetKind::ArmourPieces, "gorget").with_field("material_id", "");
        assert_eq!(entry.text("material_id"), None);
    }

    #[test]
    fn field_value_display() {
        assert_eq!(FieldValue::from(0.5).to_string(), "0.5");
        assert_eq!(FieldValue::from(3usize).to_string(), "3");
        assert_eq!(
            FieldValue::from(vec!["a".to_string(), "b".to_string()]).to_string(),
            "[a, b]"
        );
    }
}
