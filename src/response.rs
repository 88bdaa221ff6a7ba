use compact_str::format_compact;
use itertools::Itertools;
use serde_json::Value;
use tracing::debug;

use crate::{
    domain::HomeworkRecord,
    result::{Result, WatchError},
};

/// Keys every well-formed status response carries, and nothing else
const EXPECTED_KEYS: [&str; 2] = ["homeworks", "current_date"];

/// Shape-checked view of one status response
#[derive(Debug, Clone, Default)]
pub struct ValidatedResponse {
    /// Most recent homework record, when the response carried any
    pub homework: Option<HomeworkRecord>,
    /// Server-side timestamp to use as the next `from_date`
    pub current_date: Option<i64>,
}

/// Check the response shape and extract the most recent homework record
pub fn validate(response: &Value) -> Result<ValidatedResponse> {
    let object = response
        .as_object()
        .ok_or_else(|| WatchError::malformed_response("Response body is not a JSON object"))?;

    for key in EXPECTED_KEYS {
        if !object.contains_key(key) {
            return Err(WatchError::malformed_response(format_compact!(
                "Response is missing the `{key}` key"
            )));
        }
    }

    if object.len() != EXPECTED_KEYS.len() {
        let unexpected = object
            .keys()
            .filter(|key| !EXPECTED_KEYS.contains(&key.as_str()))
            .join(", ");
        return Err(WatchError::malformed_response(format_compact!(
            "Response carries unexpected keys: {unexpected}"
        )));
    }

    let homeworks = object["homeworks"]
        .as_array()
        .ok_or_else(|| WatchError::malformed_response("`homeworks` is not an array"))?;
    let current_date = object["current_date"].as_i64();

    let Some(latest) = homeworks.first() else {
        debug!("Response carries no homework records");
        return Ok(ValidatedResponse { homework: None, current_date });
    };

    let homework = serde_json::from_value::<HomeworkRecord>(latest.clone()).map_err(|e| {
        WatchError::malformed_response(format_compact!("Homework record is malformed: {e}"))
    })?;

    Ok(ValidatedResponse { homework: Some(homework), current_date })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::result::ErrorKind;

    fn malformed_reason(value: Value) -> String {
        let error = validate(&value).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::MalformedResponse);
        error.to_string()
    }

    #[test]
    fn extracts_the_most_recent_record() {
        let value = json!({
            "homeworks": [
                {"homework_name": "hw2", "status": "approved"},
                {"homework_name": "hw1", "status": "rejected"},
            ],
            "current_date": 1600,
        });

        let validated = validate(&value).unwrap();
        let homework = validated.homework.unwrap();
        assert_eq!(homework.homework_name.as_deref(), Some("hw2"));
        assert_eq!(homework.status.as_deref(), Some("approved"));
        assert_eq!(validated.current_date, Some(1600));
    }

    #[test]
    fn empty_homework_list_is_not_an_error() {
        let value = json!({ "homeworks": [], "current_date": 900 });

        let validated = validate(&value).unwrap();
        assert!(validated.homework.is_none());
        assert_eq!(validated.current_date, Some(900));
    }

    #[test]
    fn missing_keys_are_rejected() {
        assert!(malformed_reason(json!({ "homeworks": [] })).contains("current_date"));
        assert!(malformed_reason(json!({ "current_date": 900 })).contains("homeworks"));
    }

    #[test]
    fn unexpected_extra_key_is_rejected() {
        let reason = malformed_reason(json!({
            "homeworks": [],
            "current_date": 900,
            "pagination": {},
        }));
        assert!(reason.contains("pagination"));
    }

    #[test]
    fn non_object_response_is_rejected() {
        malformed_reason(json!([1, 2, 3]));
        malformed_reason(json!("homeworks"));
    }

    #[test]
    fn non_array_homeworks_is_rejected() {
        malformed_reason(json!({ "homeworks": {}, "current_date": 900 }));
    }

    #[test]
    fn non_record_element_is_rejected() {
        malformed_reason(json!({ "homeworks": [42], "current_date": 900 }));
        malformed_reason(json!({
            "homeworks": [{"homework_name": "hw1", "status": 5}],
            "current_date": 900,
        }));
    }

    #[test]
    fn non_integer_current_date_is_tolerated() {
        let value = json!({
            "homeworks": [{"homework_name": "hw1", "status": "reviewing"}],
            "current_date": "soon",
        });

        let validated = validate(&value).unwrap();
        assert!(validated.homework.is_some());
        assert_eq!(validated.current_date, None);
    }

    #[test]
    fn extra_record_fields_are_ignored() {
        let value = json!({
            "homeworks": [{
                "homework_name": "hw1",
                "status": "reviewing",
                "reviewer_comment": "почти",
                "id": 7,
            }],
            "current_date": 900,
        });

        let homework = validate(&value).unwrap().homework.unwrap();
        assert_eq!(homework.status.as_deref(), Some("reviewing"));
    }
}
