use common::error::PollError;
use common::protocol::{HomeworkRecord, StatusResponse};
use serde::Deserialize;
use serde_json::Value;

/// Check the shape of a decoded answer and convert it to [`StatusResponse`].
///
/// Rules apply in order and the first violation wins: object, `homeworks`
/// present, `current_date` present, `homeworks` is an array. Records are
/// not looked at here. A `current_date` that is not an integer is reported
/// as unexpected.
pub fn check_response(body: &Value) -> Result<StatusResponse, PollError> {
    let fields = body
        .as_object()
        .ok_or(PollError::NotAnObject(json_type(body)))?;

    let homeworks = fields.get("homeworks").ok_or(PollError::MissingHomeworks)?;

    let current_date = fields
        .get("current_date")
        .ok_or(PollError::MissingCurrentDate)?;

    let homeworks = homeworks
        .as_array()
        .ok_or(PollError::HomeworksNotList(json_type(homeworks)))?;

    let current_date = current_date.as_i64().ok_or_else(|| {
        PollError::Unexpected(format!(
            "current_date is not an integer: {}",
            json_type(current_date)
        ))
    })?;

    Ok(StatusResponse {
        homeworks: homeworks.clone(),
        current_date,
    })
}

/// Decode one raw record. Anything but a JSON object is unexpected.
pub fn parse_record(raw: &Value) -> Result<HomeworkRecord, PollError> {
    if !raw.is_object() {
        return Err(PollError::Unexpected(format!(
            "homework record is not an object: {}",
            json_type(raw)
        )));
    }
    HomeworkRecord::deserialize(raw).map_err(|e| PollError::Unexpected(e.to_string()))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::error::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_valid_response() {
        let response = check_response(&json!({
            "homeworks": [{ "homework_name": "x", "status": "reviewing", "id": 7 }],
            "current_date": 1000,
        }))
        .unwrap();
        assert_eq!(response.current_date, 1000);
        assert_eq!(response.homeworks.len(), 1);
        assert_eq!(response.homeworks[0]["homework_name"], "x");
    }

    #[test]
    fn test_empty_homeworks_is_valid() {
        let response = check_response(&json!({ "homeworks": [], "current_date": 5 })).unwrap();
        assert!(response.homeworks.is_empty());
    }

    #[test]
    fn test_records_are_not_inspected() {
        let response = check_response(&json!({
            "homeworks": [42, { "homework_name": "x", "status": 5 }],
            "current_date": 1000,
        }))
        .unwrap();
        assert_eq!(response.current_date, 1000);
        assert_eq!(response.homeworks.len(), 2);
    }

    #[test]
    fn test_not_an_object() {
        let err = check_response(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(err, PollError::NotAnObject("array"));
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_missing_keys_in_order() {
        assert_eq!(check_response(&json!({})).unwrap_err(), PollError::MissingHomeworks);
        assert_eq!(
            check_response(&json!({ "current_date": 1 })).unwrap_err(),
            PollError::MissingHomeworks
        );
        assert_eq!(
            check_response(&json!({ "homeworks": [] })).unwrap_err(),
            PollError::MissingCurrentDate
        );
        // Missing key is checked before the homeworks type.
        assert_eq!(
            check_response(&json!({ "homeworks": "oops" })).unwrap_err(),
            PollError::MissingCurrentDate
        );
    }

    #[test]
    fn test_homeworks_not_a_list() {
        let err = check_response(&json!({ "homeworks": { "a": 1 }, "current_date": 1 })).unwrap_err();
        assert_eq!(err, PollError::HomeworksNotList("object"));
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert_eq!(err.to_string(), "Неверный тип данных homeworks: object");
    }

    #[test]
    fn test_bad_current_date_is_unexpected() {
        let err = check_response(&json!({ "homeworks": [], "current_date": "yesterday" })).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unexpected);
    }

    #[test]
    fn test_parse_record() {
        let record = parse_record(&json!({ "homework_name": "x", "status": 5 })).unwrap();
        assert_eq!(record.status, Some(json!(5)));

        let err = parse_record(&json!(42)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unexpected);
        assert!(err.to_string().starts_with("Сбой в работе программы: "));
    }
}
