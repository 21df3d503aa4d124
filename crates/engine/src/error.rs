use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatchError {
    #[error("{side} transaction is missing its identifier")]
    MissingIdentifier { side: &'static str },
    #[error("Failed to parse matching config: {0}")]
    ConfigParse(String),
    #[error("Failed to render matching config: {0}")]
    ConfigRender(String),
}
