use crate::descriptor::error::DescriptorError;

#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    #[error("invalid target '{target}': {reason}")]
    Target { target: String, reason: String },

    #[error("'{target}' ({type_name}) does not support {property}")]
    Unsupported {
        target: String,
        type_name: String,
        property: &'static str,
    },

    #[error("invalid timeout: {0} seconds")]
    Timeout(f64),

    #[error("spec has no root and the descriptor catalog declares none")]
    MissingRoot,

    #[error(transparent)]
    Descriptor(#[from] DescriptorError),

    #[error("failed to parse spec: {0}")]
    Parse(#[from] serde_yaml::Error),
}
