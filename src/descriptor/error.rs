use thiserror::Error;

#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("unknown descriptor type '{0}'")]
    UnknownType(String),

    #[error("type '{0}' is declared more than once")]
    DuplicateType(String),

    #[error("type '{type_name}' declares field '{field}' more than once")]
    DuplicateField { type_name: String, field: String },

    #[error("invalid {what} name '{name}'")]
    InvalidName { what: &'static str, name: String },

    #[error("descriptor tree contains a cycle: {0}")]
    Cycle(String),

    #[error("descriptor catalog has no root type")]
    MissingRoot,

    #[error("failed to parse descriptor catalog: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
