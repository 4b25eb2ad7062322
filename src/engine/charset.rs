//! Charset transcoding between a configured legacy encoding and UTF-8.
//!
//! Some target programs expect a legacy encoding (e.g. GBK) on their command
//! line or stdin and emit output in it. A [`Transcoder`] converts command
//! text outbound and captured output inbound. Labels are resolved through the
//! WHATWG encoding registry, so config values like `gbk`, `big5`, or
//! `windows-1251` all work.

use crate::error::{Result, TrayrunError};
use encoding_rs::Encoding;

/// Transcoder for one resolved encoding. Stateless per call; cheap to use
/// from concurrent invocations.
#[derive(Debug, Clone, Copy)]
pub struct Transcoder {
    encoding: &'static Encoding,
}

impl Transcoder {
    /// Resolve an encoding label.
    ///
    /// Returns `Ok(None)` for an empty label (transcoding disabled) and a
    /// hard error for an unknown label. Callers resolve before spawning so a
    /// bad label never launches a process.
    pub fn for_label(label: &str) -> Result<Option<Transcoder>> {
        if label.is_empty() {
            return Ok(None);
        }

        match Encoding::for_label(label.trim().as_bytes()) {
            Some(encoding) => Ok(Some(Transcoder { encoding })),
            None => Err(TrayrunError::UnknownCharset(label.to_string())),
        }
    }

    /// The canonical name of the resolved encoding.
    pub fn name(&self) -> &'static str {
        self.encoding.name()
    }

    /// Encode UTF-8 text into the target encoding.
    ///
    /// Input that cannot be represented in the target encoding is a hard
    /// error for the step.
    pub fn encode(&self, text: &str) -> Result<Vec<u8>> {
        let (bytes, _, had_errors) = self.encoding.encode(text);
        if had_errors {
            return Err(TrayrunError::CharsetEncode(self.encoding.name().to_string()));
        }
        Ok(bytes.into_owned())
    }

    /// Decode captured output bytes from the target encoding into UTF-8.
    ///
    /// Malformed input is a hard error for the step.
    pub fn decode(&self, bytes: &[u8]) -> Result<String> {
        let (text, _, had_errors) = self.encoding.decode(bytes);
        if had_errors {
            return Err(TrayrunError::OutputDecode(self.encoding.name().to_string()));
        }
        Ok(text.into_owned())
    }
}
