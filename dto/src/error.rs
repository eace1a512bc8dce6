use thiserror::Error;

/// Raised when a code coming from the outside (request, database row)
/// doesn't match any known variant.
#[derive(Debug, Error, PartialEq, Clone)]
#[error("Unknown {kind} code [code: {code}]")]
pub struct UnknownCode {
    kind: &'static str,
    code: String,
}

impl UnknownCode {
    pub fn new(kind: &'static str, code: &str) -> Self {
        Self {
            kind,
            code: code.to_owned(),
        }
    }
}
