//! Rich diagnostic error types for the six-degrees crate.
//!
//! Only loading and configuration can fail. Unknown words and structural
//! defects are normal inputs: they surface as `None` paths, `unknown`
//! connections, or audit findings, never as errors.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain (error codes, help text) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum SixDegreesError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

// ---------------------------------------------------------------------------
// Graph errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum GraphError {
    #[error("failed to read word document {path}")]
    #[diagnostic(
        code(six_degrees::graph::io),
        help("Check that the file exists and is readable.")
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed word document: {message}")]
    #[diagnostic(
        code(six_degrees::graph::malformed),
        help(
            "The document must look like {{\"master_words\": {{\"Word\": {{...}}}}}}. \
             Every record needs `children`, `traits` and `acquaintances` arrays; \
             `parent` may be null, `type` and `stages` are optional."
        )
    )]
    MalformedDocument { message: String },

    #[error("word id must not be empty")]
    #[diagnostic(
        code(six_degrees::graph::empty_id),
        help("Every key under `master_words` must be a non-empty word.")
    )]
    EmptyId,
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config {path}")]
    #[diagnostic(
        code(six_degrees::config::read),
        help("Check that the config file exists and is readable.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {message}")]
    #[diagnostic(
        code(six_degrees::config::parse),
        help(
            "The config is TOML with optional [heuristics], [scoring] and [search] tables. \
             Run `six-degrees config` to print the defaults as a starting point."
        )
    )]
    Parse { path: String, message: String },

    #[error("invalid configuration: {message}")]
    #[diagnostic(code(six_degrees::config::invalid), help("{message}"))]
    Invalid { message: String },

    #[error("failed to serialize config: {message}")]
    #[diagnostic(code(six_degrees::config::serialize))]
    Serialize { message: String },
}
