use common::error::PollError;
use common::protocol::HomeworkRecord;
use serde_json::Value;
use std::borrow::Cow;

pub const HOMEWORK_VERDICTS: [(&str, &str); 3] = [
    ("approved", "Работа проверена: ревьюеру всё понравилось. Ура!"),
    ("reviewing", "Работа взята на проверку ревьюером."),
    ("rejected", "Работа проверена: у ревьюера есть замечания."),
];

pub fn verdict_for(status: &str) -> Option<&'static str> {
    HOMEWORK_VERDICTS
        .iter()
        .find(|(key, _)| *key == status)
        .map(|(_, verdict)| *verdict)
}

/// Render the notification text for one record.
///
/// A present but non-string `status` (including `null`) never matches the
/// table and is reported as unknown; a non-string name is rendered as JSON.
pub fn parse_status(homework: &HomeworkRecord) -> Result<String, PollError> {
    let status = homework.status.as_ref().ok_or(PollError::NoStatus)?;
    let name = homework.homework_name.as_ref().ok_or(PollError::NoName)?;

    let verdict = match status {
        Value::String(s) => verdict_for(s),
        _ => None,
    }
    .ok_or_else(|| PollError::UnknownStatus(as_text(status).into_owned()))?;

    Ok(format!(
        "Изменился статус проверки работы \"{}\". {verdict}",
        as_text(name)
    ))
}

/// Strings as-is, anything else as its JSON text.
pub fn as_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s),
        other => Cow::Owned(other.to_string()),
    }
}
