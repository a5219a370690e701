use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Result, SpaceGuardError};

use super::message::{MessageKind, Severity};

/// Extra structured data attached to a finding.
pub type Payload = Map<String, Value>;

/// One reported finding. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    line: usize,
    code: String,
    #[serde(rename = "type")]
    severity: Severity,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    payload: Option<Payload>,
}

impl ValidationError {
    /// # Errors
    /// Returns `MissingField` if `line` is zero or `code`/`message` is empty.
    pub fn new(
        line: usize,
        code: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
    ) -> Result<Self> {
        let code = code.into();
        let message = message.into();
        if line == 0 {
            return Err(SpaceGuardError::MissingField { field: "line" });
        }
        if code.is_empty() {
            return Err(SpaceGuardError::MissingField { field: "code" });
        }
        if message.is_empty() {
            return Err(SpaceGuardError::MissingField { field: "message" });
        }
        Ok(Self {
            line,
            code,
            severity,
            message,
            payload: None,
        })
    }

    /// Build a finding from a catalog entry using its plain template.
    ///
    /// # Errors
    /// Returns `MissingField` if `line` is zero.
    pub fn from_kind(kind: MessageKind, line: usize) -> Result<Self> {
        Self::new(line, kind.code(), kind.severity(), kind.template())
    }

    /// # Errors
    /// Returns `InvalidPayload` unless `payload` is a JSON object.
    pub fn with_payload(mut self, payload: Value) -> Result<Self> {
        match payload {
            Value::Object(map) => {
                self.payload = Some(map);
                Ok(self)
            }
            _ => Err(SpaceGuardError::InvalidPayload),
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: String) -> Self {
        if !message.is_empty() {
            self.message = message;
        }
        self
    }

    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub const fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    #[must_use]
    pub fn kind(&self) -> Option<MessageKind> {
        MessageKind::from_code(&self.code)
    }
}

#[cfg(test)]
#[path = "violation_tests.rs"]
mod tests;
