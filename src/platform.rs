//! Platform charset-converter capability.
//!
//! The downgrade engine can lean on a native conversion facility (iconv or
//! an equivalent) whose transliteration suffix mode substitutes visually
//! similar characters instead of failing outright. How such a facility is
//! located and called is platform business; this module only defines the
//! capability seam — the [`CharsetConverter`] trait — and the one-time
//! feature probing that decides how the engine may use it.
//!
//! # Capability probing
//!
//! Converters in the wild differ in two ways that matter here: whether
//! they accept native wide-character text at all, and whether their
//! transliteration tables know Unicode 3+ code points such as the narrow
//! no-break space. [`Platform::probe`] tests both once at construction
//! using synthetic inputs and fixes the result as a [`Capability`] for the
//! process lifetime:
//!
//! - [`Capability::Native`] — the converter is called as-is;
//! - [`Capability::Reduced`] — a probe failed; every call first substitutes
//!   a small fixed map of problem code points with near-equivalents the
//!   older tables do understand;
//! - [`Capability::Unavailable`] — no converter was injected. Recorded
//!   with a single warning; the downgrade engine falls through to its
//!   substitution and romanization tiers.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

/// Conversion suffix mode, mirroring the `//TRANSLIT` / `//IGNORE`
/// conventions of iconv-style converters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuffixMode {
    /// Substitute visually or phonetically similar characters rather than
    /// failing on unmappable input.
    Translit,
    /// Drop unmappable characters.
    Ignore,
}

impl SuffixMode {
    /// The conventional suffix spelling for this mode.
    pub fn as_str(self) -> &'static str {
        match self {
            SuffixMode::Translit => "translit",
            SuffixMode::Ignore => "ignore",
        }
    }
}

/// Errors reported by a platform charset converter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// No converter is available in this process.
    #[error("no platform charset converter is available")]
    Unavailable,

    /// Conversion setup or execution failed with a native error code.
    #[error("charset conversion failed: {message} (errno {code})")]
    Conversion {
        /// Native error code from the converter.
        code: i32,
        /// Human-readable description of the failure.
        message: String,
    },
}

/// A platform facility that converts text into bytes of a target encoding.
///
/// Implementations wrap whatever the host platform provides; tests inject
/// table-backed mocks. The `?` byte in the output is, by iconv convention,
/// the lossy-failure marker the caller must check for.
pub trait CharsetConverter: Send + Sync {
    /// Converts `text` into bytes of `to_encoding`, best-effort under the
    /// given suffix mode.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Conversion`] when setup or execution fails.
    fn convert(
        &self,
        text: &str,
        to_encoding: &str,
        mode: Option<SuffixMode>,
    ) -> Result<Vec<u8>, PlatformError>;
}

/// How much of the converter's feature set survived probing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Full wide-character and Unicode 3+ support.
    Native,
    /// The converter works, but problem code points must be substituted
    /// before every call.
    Reduced,
    /// No converter in this process.
    Unavailable,
}

/// Unicode code points older converter tables cannot transliterate, with
/// near-equivalents they can.
const PROBLEM_POINTS: &[(char, &str)] = &[
    ('\u{202f}', "\u{a0}"),
    ('℃', "°C"),
    ('℉', "°F"),
    ('№', "Nº"),
];

fn substitute_problem_points(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match PROBLEM_POINTS.iter().find(|(p, _)| *p == c) {
            Some((_, replacement)) => out.push_str(replacement),
            None => out.push(c),
        }
    }
    out
}

/// The probed platform conversion capability, fixed for the process
/// lifetime of the owning engine.
pub struct Platform {
    converter: Option<Arc<dyn CharsetConverter>>,
    capability: Capability,
}

impl Platform {
    /// Probes `converter` and fixes the resulting capability.
    ///
    /// Probing is idempotent by construction: it runs exactly once, here,
    /// and the outcome never changes afterwards. Passing `None` records
    /// the absence with a warning and yields
    /// [`Capability::Unavailable`].
    pub fn probe(converter: Option<Arc<dyn CharsetConverter>>) -> Self {
        let Some(converter) = converter else {
            warn!("platform charset converter unavailable; falling back to substitution and romanization");
            return Platform {
                converter: None,
                capability: Capability::Unavailable,
            };
        };

        // Wide-character probe: the empty string exercises conversion
        // setup without touching any table.
        let wide = converter.convert("", "us-ascii", Some(SuffixMode::Translit));
        // Unicode 3+ probe: U+202F is the canary for post-Unicode-2 tables.
        let unicode3 = wide.is_ok().then(|| {
            converter.convert("\u{202f}", "us-ascii", Some(SuffixMode::Translit))
        });

        let capability = match (wide, unicode3) {
            (Ok(_), Some(Ok(_))) => Capability::Native,
            (Ok(_), _) => {
                warn!("platform converter lacks Unicode 3+ tables; problem code points will be substituted");
                Capability::Reduced
            }
            (Err(e), _) => {
                warn!(error = %e, "platform converter rejects wide-character input; problem code points will be substituted");
                Capability::Reduced
            }
        };
        debug!(?capability, "platform charset converter probed");

        Platform {
            converter: Some(converter),
            capability,
        }
    }

    /// The probed capability.
    #[inline]
    pub fn capability(&self) -> Capability {
        self.capability
    }

    /// Whether a converter can be called at all.
    #[inline]
    pub fn is_available(&self) -> bool {
        self.converter.is_some()
    }

    /// Converts `text` through the probed path.
    ///
    /// Under [`Capability::Reduced`] the fixed problem-point map is applied
    /// before the converter sees the text.
    ///
    /// # Errors
    ///
    /// [`PlatformError::Unavailable`] when no converter was injected, or
    /// the converter's own [`PlatformError::Conversion`].
    pub fn convert(
        &self,
        text: &str,
        to_encoding: &str,
        mode: Option<SuffixMode>,
    ) -> Result<Vec<u8>, PlatformError> {
        let converter = self.converter.as_deref().ok_or(PlatformError::Unavailable)?;
        match self.capability {
            Capability::Reduced => {
                let reduced = substitute_problem_points(text);
                converter.convert(&reduced, to_encoding, mode)
            }
            _ => converter.convert(text, to_encoding, mode),
        }
    }
}
