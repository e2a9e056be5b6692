// Error taxonomy for the generation pipeline.
//
// Every failure between "user submitted a theme" and "posts are on
// screen" collapses into one of these variants so the HTTP layer can
// map each to a status code and a stable Portuguese message.

use axum::http::StatusCode;
use thiserror::Error;

/// Failure modes of the generate pipeline.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// GEMINI_API_KEY was not present in the environment at startup.
    #[error("Chave da API não configurada no ambiente.")]
    MissingApiKey,

    /// Network failure or undecodable body while talking to the Gemini
    /// endpoint.
    #[error("Erro interno ao se comunicar com a API Gemini")]
    Transport(#[from] reqwest::Error),

    /// Gemini answered with a non-success status. The message is whatever
    /// its error envelope carried, verbatim, so callers see the upstream
    /// diagnosis instead of a generic wrapper.
    #[error("{message}")]
    Upstream { status: u16, message: String },

    /// The model answered 200 but no post block could be recovered from
    /// the returned text.
    #[error("Não foi possível interpretar os posts")]
    UnparsablePosts,
}

impl GenerateError {
    /// HTTP status this error surfaces as. Upstream failures mirror the
    /// status Gemini returned; everything local to us is a 500 except a
    /// parse failure, which is a bad gateway (the upstream spoke, we just
    /// could not make sense of it).
    pub fn status_code(&self) -> StatusCode {
        match self {
            GenerateError::MissingApiKey => StatusCode::INTERNAL_SERVER_ERROR,
            GenerateError::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GenerateError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            GenerateError::UnparsablePosts => StatusCode::BAD_GATEWAY,
        }
    }
}
