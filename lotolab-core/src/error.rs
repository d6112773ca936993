use thiserror::Error;

use crate::recommend::Tier;

#[derive(Error, Debug)]
pub enum LotoError {
    /// A draw or candidate combination breaks the 15-of-25 structure.
    #[error("Malformed draw ({context}): {reason}")]
    MalformedDraw { context: String, reason: String },

    #[error("Insufficient data: need at least {required} draw(s), got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("Insufficient pool size in {tier} tier: need {required}, have {available}")]
    InsufficientPoolSize {
        tier: Tier,
        required: usize,
        available: usize,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl LotoError {
    pub(crate) fn malformed(context: impl Into<String>, reason: impl Into<String>) -> Self {
        LotoError::MalformedDraw {
            context: context.into(),
            reason: reason.into(),
        }
    }

    /// Stable category name, one per variant.
    pub fn code(&self) -> &'static str {
        match self {
            LotoError::MalformedDraw { .. } => "malformed_draw",
            LotoError::InsufficientData { .. } => "insufficient_data",
            LotoError::InsufficientPoolSize { .. } => "insufficient_pool_size",
            LotoError::InvalidConfig(_) => "invalid_config",
            LotoError::Serialization(_) => "serialization",
        }
    }
}

pub type Result<T> = std::result::Result<T, LotoError>;
