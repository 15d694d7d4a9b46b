use crate::encoding::Encoding;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Separator written between lines when stringifying a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`
    Crlf,
}

impl LineEnding {
    /// Separator text.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::Crlf => "\r\n",
        }
    }
}

/// Options for a [`Codec`](crate::Codec).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Encoding assumed for byte input when none is named.
    pub encoding: Encoding,

    /// Separator used between stringified lines.
    pub line_ending: LineEnding,
}

impl CodecConfig {
    /// Parse options from TOML text. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`TodoTxtError::Config`](crate::TodoTxtError::Config) for
    /// malformed TOML or unknown values.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}
