use std::fmt;

/// Where in a paginated fetch a failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stage {
    pub page: usize,
    pub cursor: u64,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "fetching page {} (createdTimestamp > {})",
            self.page, self.cursor
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TagError {
    #[error("Unsupported network {requested:?}. Supported networks: {}", supported.join(", "))]
    UnsupportedNetwork {
        requested: String,
        supported: Vec<String>,
    },

    #[error("{stage}: subgraph returned HTTP {status}: {body}")]
    Transport {
        stage: Stage,
        status: u16,
        body: String,
    },

    #[error("{stage}: subgraph reported errors: {}", messages.join("; "))]
    Protocol { stage: Stage, messages: Vec<String> },

    #[error("{stage}: response carried no market data")]
    EmptyResult { stage: Stage },

    #[error("{stage}: {message}")]
    Unknown { stage: Stage, message: String },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl TagError {
    pub fn stage(&self) -> Option<Stage> {
        match self {
            TagError::Transport { stage, .. }
            | TagError::Protocol { stage, .. }
            | TagError::EmptyResult { stage }
            | TagError::Unknown { stage, .. } => Some(*stage),
            TagError::UnsupportedNetwork { .. } | TagError::Config(_) => None,
        }
    }
}
