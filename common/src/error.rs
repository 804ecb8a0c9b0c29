//! Non-fatal failures raised while polling.
//!
//! The `Display` text of every variant is exactly what gets relayed to the
//! chat, so it doubles as the dedup key in the poller.

use thiserror::Error;

/// How the poller should treat a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad API answer or malformed record. Logged and relayed.
    Recoverable,
    /// Response body or `homeworks` has the wrong JSON type. Relayed like
    /// a recoverable failure but kept distinct from a missing key.
    TypeMismatch,
    /// The notification channel itself is broken.
    Delivery,
    /// Anything not classified above.
    Unexpected,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PollError {
    #[error("Сбой в работе программы: Ошибка {0}")]
    Transport(String),

    #[error("Сбой в работе программы: Код ответа API: 400\nНеверный формат даты")]
    BadDateFormat,

    #[error("Сбой в работе программы: Код ответа API: 401\nУчетные данные не были предоставлены")]
    Unauthorized,

    #[error("Сбой в работе программы:\nЭндпоинт {0} недоступен. Код ответа API: 404")]
    EndpointUnavailable(String),

    #[error("Сбой в работе программы: Код ответа API: {0}")]
    UnexpectedStatus(u16),

    #[error("Неожиданный формат ответа: {0}")]
    NotAnObject(&'static str),

    #[error("Ответ не содержит сведения о домашних заданиях")]
    MissingHomeworks,

    #[error("Ответ не содержит сведения о текущей дате")]
    MissingCurrentDate,

    #[error("Неверный тип данных homeworks: {0}")]
    HomeworksNotList(&'static str),

    #[error("Нет статуса у домашней работы.")]
    NoStatus,

    #[error("Нет имени у домашней работы.")]
    NoName,

    #[error("Неизвестный статус работы: {0}")]
    UnknownStatus(String),

    #[error("Не удалось отправить сообщение: {0}")]
    CantSend(String),

    #[error("Сбой в работе программы: {0}")]
    Unexpected(String),
}

impl PollError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PollError::NotAnObject(_) | PollError::HomeworksNotList(_) => ErrorKind::TypeMismatch,
            PollError::CantSend(_) => ErrorKind::Delivery,
            PollError::Unexpected(_) => ErrorKind::Unexpected,
            _ => ErrorKind::Recoverable,
        }
    }

    pub fn is_delivery(&self) -> bool {
        self.kind() == ErrorKind::Delivery
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_mismatch_distinct_from_missing_key() {
        assert_eq!(PollError::HomeworksNotList("object").kind(), ErrorKind::TypeMismatch);
        assert_eq!(PollError::NotAnObject("array").kind(), ErrorKind::TypeMismatch);
        assert_eq!(PollError::MissingHomeworks.kind(), ErrorKind::Recoverable);
        assert_eq!(PollError::MissingCurrentDate.kind(), ErrorKind::Recoverable);
    }

    #[test]
    fn test_delivery_kind() {
        let err = PollError::CantSend("Forbidden: bot was blocked by the user".into());
        assert!(err.is_delivery());
        assert!(!PollError::Unauthorized.is_delivery());
    }

    #[test]
    fn test_status_messages_encode_code() {
        assert!(PollError::BadDateFormat.to_string().contains("400"));
        assert!(PollError::Unauthorized.to_string().contains("401"));
        let not_found = PollError::EndpointUnavailable("https://example.test/api/".into());
        assert!(not_found.to_string().contains("404"));
        assert!(not_found.to_string().contains("https://example.test/api/"));
        assert_eq!(
            PollError::UnexpectedStatus(503).to_string(),
            "Сбой в работе программы: Код ответа API: 503"
        );
    }

    #[test]
    fn test_unknown_status_names_status() {
        assert_eq!(
            PollError::UnknownStatus("archived".into()).to_string(),
            "Неизвестный статус работы: archived"
        );
    }
}
