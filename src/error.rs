use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DexError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("request failed: {0}")]
    Transient(String),
    #[error("response parse error: {0}")]
    Parse(String),
    #[error("please type a Pokémon name or ID")]
    EmptyQuery,
}

impl DexError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, DexError::NotFound(_))
    }
}
