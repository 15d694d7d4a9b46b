use crate::config::CodecConfig;
use crate::encoding::Encoding;
use crate::error::Result;
use crate::parse::{Source, parse};
use crate::stringify::{Stringify, render, render_value};
use crate::task::Task;
use serde_json::Value;

/// Parser and stringifier bound to a [`CodecConfig`].
#[derive(Debug, Clone, Default)]
pub struct Codec {
    config: CodecConfig,
}

impl Codec {
    /// Create a codec with the given options.
    #[must_use]
    pub const fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    /// Active options.
    #[must_use]
    pub const fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Parse a batch of lines; see [`parse`](crate::parse()).
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn parse<'a>(&self, source: impl Into<Source<'a>>) -> Vec<Option<Task>> {
        parse(source)
    }

    /// Decode `bytes` with the named encoding (or the configured default) and
    /// parse the result.
    ///
    /// # Errors
    ///
    /// Returns [`TodoTxtError::UnknownEncoding`](crate::TodoTxtError::UnknownEncoding)
    /// when `encoding` names an unsupported encoding.
    pub fn parse_bytes(&self, bytes: &[u8], encoding: Option<&str>) -> Result<Vec<Option<Task>>> {
        let encoding = match encoding {
            Some(name) => name.parse::<Encoding>()?,
            None => self.config.encoding,
        };
        Ok(parse((bytes, encoding)))
    }

    /// Render tasks using the configured line ending.
    ///
    /// # Errors
    ///
    /// Same as [`stringify`](crate::stringify()).
    pub fn stringify<'a>(&self, input: impl Into<Stringify<'a>>) -> Result<Option<String>> {
        render(input.into(), self.config.line_ending)
    }

    /// Render JSON-shaped task data using the configured line ending.
    ///
    /// # Errors
    ///
    /// Same as [`stringify_value`](crate::stringify_value).
    pub fn stringify_value(&self, value: &Value) -> Result<Option<String>> {
        render_value(value, self.config.line_ending)
    }
}

/// Decode `bytes` with the named encoding (UTF-8 when `None`) and parse them.
///
/// # Errors
///
/// Returns [`TodoTxtError::UnknownEncoding`](crate::TodoTxtError::UnknownEncoding)
/// when `encoding` names an unsupported encoding.
pub fn parse_bytes(bytes: &[u8], encoding: Option<&str>) -> Result<Vec<Option<Task>>> {
    Codec::default().parse_bytes(bytes, encoding)
}
