use ledger_domain::error::DomainError;

#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("domain: {0}")]
    Domain(#[from] DomainError),

    #[error("no handler registered: {0}")]
    NoHandlerRegistered(&'static str),

    #[error("handler already registered: bus={bus}, message={message}")]
    DuplicateHandler {
        bus: &'static str,
        message: &'static str,
    },

    #[error("invalid config: {0}")]
    InvalidConfig(#[from] serde_json::Error),

    #[error("type mismatch: expected={expected}, found={found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

impl AppError {
    /// 取出内部的领域错误（若有）
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            Self::Domain(err) => Some(err),
            _ => None,
        }
    }
}
