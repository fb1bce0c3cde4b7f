//! Record fields forwarded into `extra_fields`

use serde_json::Value;

/// Value substituted when a forwarded field is absent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDefault {
    /// JSON `null`
    Null,
    /// Empty JSON array
    EmptyList,
}

impl FieldDefault {
    pub fn value(self) -> Value {
        match self {
            FieldDefault::Null => Value::Null,
            FieldDefault::EmptyList => Value::Array(Vec::new()),
        }
    }
}

/// Every field copied from the record into `extra_fields`, with its default.
pub const EXTRA_FIELDS: [(&str, FieldDefault); 14] = [
    ("patch", FieldDefault::Null),
    ("test_patch", FieldDefault::Null),
    ("pull_number", FieldDefault::Null),
    ("url", FieldDefault::Null),
    ("issue_numbers", FieldDefault::EmptyList),
    ("first_commit_time", FieldDefault::Null),
    ("created_at", FieldDefault::Null),
    ("readmes", FieldDefault::Null),
    ("files", FieldDefault::Null),
    ("non_py_patch", FieldDefault::Null),
    ("new_components", FieldDefault::Null),
    ("FAIL_TO_PASS", FieldDefault::EmptyList),
    ("PASS_TO_PASS", FieldDefault::EmptyList),
    ("environment_setup_commit", FieldDefault::Null),
];

/// Names of the forwarded fields, in table order
pub fn extra_field_names() -> impl Iterator<Item = &'static str> {
    EXTRA_FIELDS.iter().map(|(name, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_field_names_unique() {
        let names: HashSet<&str> = extra_field_names().collect();
        assert_eq!(names.len(), EXTRA_FIELDS.len());
    }

    #[test]
    fn test_list_fields() {
        let lists: Vec<&str> = EXTRA_FIELDS
            .iter()
            .filter(|(_, d)| *d == FieldDefault::EmptyList)
            .map(|(name, _)| *name)
            .collect();
        assert_eq!(lists, vec!["issue_numbers", "FAIL_TO_PASS", "PASS_TO_PASS"]);
    }

    #[test]
    fn test_default_values() {
        assert_eq!(FieldDefault::Null.value(), Value::Null);
        assert_eq!(FieldDefault::EmptyList.value(), serde_json::json!([]));
    }
}
