use serde::Serialize;
use serde_json::{Map, Value};

use crate::decode::{parse_object, required, required_str};
use crate::error::{ApiError, Result};

/// A Jira issue as returned by `GET issue/<key>`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
    pub id: String,
    pub key: String,
    pub summary: Option<String>,
    /// Lower-cased project key, derived from [`Issue::key`].
    pub project: String,
    /// The `fields` object of the response, verbatim.
    pub fields: Map<String, Value>,
}

impl Issue {
    /// Decode the body of a successful issue fetch.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let raw = parse_object(bytes)?;

        let id = required_str(&raw, "id")?.to_string();
        let key = required_str(&raw, "key")?.to_string();
        let project = project_from_key(&key);

        let fields = match required(&raw, "fields")? {
            Value::Object(fields) => fields.clone(),
            _ => {
                return Err(ApiError::UnexpectedShape {
                    field: "fields",
                    expected: "an object",
                })
            }
        };

        let summary = fields
            .get("summary")
            .and_then(Value::as_str)
            .map(str::to_string);

        Ok(Self {
            id,
            key,
            summary,
            project,
            fields,
        })
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

/// `ABC-123` -> `abc`. A key without `-` is lower-cased whole.
pub fn project_from_key(key: &str) -> String {
    key.split('-').next().unwrap_or_default().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_from_key() {
        assert_eq!(project_from_key("ABC-123"), "abc");
        assert_eq!(project_from_key("My-Proj-9"), "my");
        assert_eq!(project_from_key("NODASH"), "nodash");
        assert_eq!(project_from_key(""), "");
    }

    #[test]
    fn test_decode_full_issue() {
        let body =
            br#"{"id":"10001","key":"PROJ-7","fields":{"summary":"Fix bug","priority":{"name":"High"}}}"#;
        let issue = Issue::from_slice(body).unwrap();

        assert_eq!(issue.id, "10001");
        assert_eq!(issue.key, "PROJ-7");
        assert_eq!(issue.project, "proj");
        assert_eq!(issue.summary.as_deref(), Some("Fix bug"));
        assert_eq!(issue.field("priority").unwrap()["name"], "High");
        assert_eq!(issue.field("summary").unwrap(), "Fix bug");
    }

    #[test]
    fn test_decode_without_summary() {
        let issue = Issue::from_slice(br#"{"id":"1","key":"ABC-123","fields":{}}"#).unwrap();
        assert_eq!(issue.project, "abc");
        assert!(issue.summary.is_none());
        assert!(issue.fields.is_empty());
    }

    #[test]
    fn test_non_string_summary_is_ignored() {
        let issue =
            Issue::from_slice(br#"{"id":"1","key":"ABC-1","fields":{"summary":null}}"#).unwrap();
        assert!(issue.summary.is_none());
        assert!(issue.field("summary").unwrap().is_null());
    }

    #[test]
    fn test_missing_fields_object() {
        let err = Issue::from_slice(br#"{"id":"1","key":"ABC-1"}"#).unwrap_err();
        assert!(matches!(err, ApiError::MissingField { field: "fields" }));
    }

    #[test]
    fn test_fields_wrong_shape() {
        let err = Issue::from_slice(br#"{"id":"1","key":"ABC-1","fields":[]}"#).unwrap_err();
        assert!(matches!(
            err,
            ApiError::UnexpectedShape {
                field: "fields",
                ..
            }
        ));
    }

    #[test]
    fn test_numeric_id_rejected() {
        let err = Issue::from_slice(br#"{"id":10001,"key":"ABC-1","fields":{}}"#).unwrap_err();
        assert!(matches!(err, ApiError::UnexpectedShape { field: "id", .. }));
    }

    #[test]
    fn test_missing_key() {
        let err = Issue::from_slice(br#"{"id":"1","fields":{}}"#).unwrap_err();
        assert!(matches!(err, ApiError::MissingField { field: "key" }));
    }

    #[test]
    fn test_malformed_json() {
        let err = Issue::from_slice(b"{\"id\":").unwrap_err();
        assert!(err.is_decode_error());
    }
}
