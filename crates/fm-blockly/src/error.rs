//! Errors raised while translating a machine document.

use fm_core::{FmError, PortIndex};
use fm_functions::FunctionError;
use fm_graph::GraphError;
use thiserror::Error;

fn in_block(block: &Option<String>) -> String {
    match block {
        Some(name) => format!(" (block '{name}')"),
        None => String::new(),
    }
}

/// The document does not have the expected shape.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("missing field: {field}{}", in_block(.block))]
    MissingField {
        block: Option<String>,
        field: String,
    },

    #[error("missing port: {port} (block '{block}')")]
    MissingPort { block: String, port: String },

    #[error("unknown node type: {tag}")]
    UnknownNodeType { block: String, tag: String },

    #[error("unknown function type: {tag}")]
    UnknownFunctionType { tag: String },

    #[error("unknown input type: {tag}")]
    UnknownInputType { tag: String },

    #[error("invalid field {field}: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("invalid reference object in {field}")]
    InvalidReference { field: String },

    #[error("invalid port list for '{block}': {reason}")]
    InvalidPortList { block: String, reason: String },

    #[error("duplicate connection from '{block}' to '{target}'")]
    DuplicateConnection { block: String, target: String },

    #[error("block '{block}' is wired to itself")]
    SelfConnection { block: String },

    #[error("reference '{reference}' is used by more than one block")]
    DuplicateReference { reference: String },

    #[error("undefined reference: {reference}")]
    UndefinedReference { reference: String },

    #[error("missing reciprocal connection: '{from}' -> '{to}'")]
    MissingMirror { from: String, to: String },

    #[error("invalid value: {0}")]
    Value(#[from] FmError),

    #[error("invalid function: {0}")]
    Function(#[from] FunctionError),
}

impl SchemaError {
    pub(crate) fn missing(field: impl Into<String>) -> Self {
        SchemaError::MissingField {
            block: None,
            field: field.into(),
        }
    }

    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        SchemaError::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Port direction declarations are inconsistent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectionError {
    #[error("directions already declared for '{node}'")]
    Duplicate { node: String },

    #[error("port{} of '{node}' is declared neither in nor out", .port + 1)]
    UndeclaredPort { node: String, port: PortIndex },

    #[error(
        "conflicting directions on link '{from}' port{} -> '{to}' port{}",
        .from_port + 1,
        .to_port + 1
    )]
    Conflict {
        from: String,
        from_port: PortIndex,
        to: String,
        to_port: PortIndex,
    },
}

/// Root cause of a failed translation.
#[derive(Error, Debug)]
pub enum TranslationErrorKind {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Direction(#[from] DirectionError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("unsupported document format: {0:?}")]
    UnsupportedFormat(String),
}

/// The single error surfaced by the translator.
///
/// Carries the stack of operations that were running when the failure
/// happened (outermost first) and the root cause.
#[derive(Debug)]
pub struct TranslationError {
    frames: Vec<String>,
    kind: TranslationErrorKind,
}

impl TranslationError {
    pub fn new(kind: impl Into<TranslationErrorKind>) -> Self {
        Self {
            frames: Vec::new(),
            kind: kind.into(),
        }
    }

    /// Operation names, outermost first.
    pub fn frames(&self) -> &[String] {
        &self.frames
    }

    pub fn kind(&self) -> &TranslationErrorKind {
        &self.kind
    }

    /// The schema error at the root, if that is what failed.
    pub fn as_schema(&self) -> Option<&SchemaError> {
        match &self.kind {
            TranslationErrorKind::Schema(e) => Some(e),
            _ => None,
        }
    }

    pub(crate) fn push_frame(mut self, frame: String) -> Self {
        self.frames.insert(0, frame);
        self
    }
}

impl std::fmt::Display for TranslationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for frame in &self.frames {
            write!(f, "{frame}: ")?;
        }
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for TranslationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

macro_rules! impl_from_cause {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for TranslationError {
                fn from(e: $ty) -> Self {
                    TranslationError::new(e)
                }
            }
        )*
    };
}

impl_from_cause!(
    SchemaError,
    DirectionError,
    GraphError,
    std::io::Error,
    serde_json::Error,
    serde_yaml::Error,
);

impl From<TranslationErrorKind> for TranslationError {
    fn from(kind: TranslationErrorKind) -> Self {
        TranslationError::new(kind)
    }
}

pub type TranslationResult<T> = Result<T, TranslationError>;

/// Attach an operation name to a failing result.
pub(crate) trait Context<T> {
    fn context(self, frame: &str) -> TranslationResult<T>;

    fn with_context<F: FnOnce() -> String>(self, frame: F) -> TranslationResult<T>;
}

impl<T, E: Into<TranslationError>> Context<T> for Result<T, E> {
    fn context(self, frame: &str) -> TranslationResult<T> {
        self.map_err(|e| e.into().push_frame(frame.to_string()))
    }

    fn with_context<F: FnOnce() -> String>(self, frame: F) -> TranslationResult<T> {
        self.map_err(|e| e.into().push_frame(frame()))
    }
}
