use std::path::PathBuf;
use thiserror::Error;

/// Defects in the registry contents. Generation stops at the first one.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// A member is missing its `<type>` or `<name>` child.
    #[error("member of '{type_name}' is missing its {token} token")]
    MissingMemberToken {
        type_name: String,
        token: &'static str,
    },

    /// A latexmath length attribute that matches neither recognized form.
    #[error("'{type_name}.{field}' has unrecognized length expression '{expression}'")]
    UnrecognizedLengthExpression {
        type_name: String,
        field: String,
        expression: String,
    },

    /// A length attribute that names no member of the same struct.
    #[error("'{type_name}.{field}' takes its length from unknown member '{reference}'")]
    UnknownLengthField {
        type_name: String,
        field: String,
        reference: String,
    },

    #[error("type '{type_name}' is declared more than once")]
    DuplicateType { type_name: String },
}

/// Failures while reading and walking a registry document.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to read registry '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed registry XML: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read conventions file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse conventions file '{path}': {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yml::Error,
    },

    #[error("invalid discriminator value prefix '{prefix}': {source}")]
    Pattern {
        prefix: String,
        #[source]
        source: regex::Error,
    },
}
