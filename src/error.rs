//! Error types for transliteration operations.

use thiserror::Error;

/// Errors that can occur during downgrade, encode and decode operations.
///
/// Per-character conversion failures and missing spell dictionaries are
/// recovered internally and never surface here; see
/// [`PlatformError`](crate::platform::PlatformError) and
/// [`SpellError`](crate::spell::SpellError) for the collaborator-level
/// failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TranslitError {
    /// The caller supplied an encoding label that names no known encoding.
    ///
    /// Fatal to the call; there is no fallback encoding to guess.
    #[error("unknown encoding label: {0:?}")]
    UnknownEncoding(String),

    /// Downgraded text still contained a character the target encoding
    /// cannot represent.
    ///
    /// Every character is supposed to be reducible to ASCII by the
    /// romanization tier, so this indicates a defect in the fallback
    /// chain rather than an expected runtime outcome. It is surfaced
    /// instead of silently dropping or replacing the character.
    #[error("character {character:?} is not encodable in {encoding} after downgrade")]
    StrictEncodeFailure {
        /// Canonical name of the target encoding.
        encoding: &'static str,
        /// The character that survived the fallback chain.
        character: char,
    },
}

/// A specialized `Result` type for transliteration operations.
pub type Result<T> = std::result::Result<T, TranslitError>;
