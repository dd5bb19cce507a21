//! Validator modules understood by the remote service.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::InputError;

/// Identifier selecting which remote format-validation plugin processes the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValidationModule {
    #[default]
    Aiff,
    Ascii,
    Bytestream,
    Epub,
    Gif,
    Gzip,
    Html,
    Jpeg,
    Jpeg2000,
    Pdf,
    Png,
    Tiff,
    Utf8,
    Warc,
    Wave,
    Xml,
}

impl ValidationModule {
    /// Every module, in selector order.
    pub const ALL: [ValidationModule; 16] = [
        Self::Aiff,
        Self::Ascii,
        Self::Bytestream,
        Self::Epub,
        Self::Gif,
        Self::Gzip,
        Self::Html,
        Self::Jpeg,
        Self::Jpeg2000,
        Self::Pdf,
        Self::Png,
        Self::Tiff,
        Self::Utf8,
        Self::Warc,
        Self::Wave,
        Self::Xml,
    ];

    /// Exact identifier sent in the `module` form field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aiff => "AIFF-hul",
            Self::Ascii => "ASCII-hul",
            Self::Bytestream => "BYTESTREAM",
            Self::Epub => "EPUB-ptc",
            Self::Gif => "GIF-hul",
            Self::Gzip => "GZIP-kb",
            Self::Html => "HTML-hul",
            Self::Jpeg => "JPEG-hul",
            Self::Jpeg2000 => "JPEG2000-hul",
            Self::Pdf => "PDF-hul",
            Self::Png => "PNG-gdm",
            Self::Tiff => "TIFF-hul",
            Self::Utf8 => "UTF8-hul",
            Self::Warc => "WARC-kb",
            Self::Wave => "WAVE-hul",
            Self::Xml => "XML-hul",
        }
    }

    fn position(&self) -> usize {
        Self::ALL.iter().position(|m| m == self).unwrap_or(0)
    }

    /// Next module in selector order, wrapping around.
    pub fn next(&self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    /// Previous module in selector order, wrapping around.
    pub fn previous(&self) -> Self {
        let len = Self::ALL.len();
        Self::ALL[(self.position() + len - 1) % len]
    }
}

impl fmt::Display for ValidationModule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValidationModule {
    type Err = InputError;

    // Case-sensitive: the service rejects "pdf-hul".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| InputError::UnknownModule { module: s.to_string() })
    }
}

impl Serialize for ValidationModule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ValidationModule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|e: InputError| serde::de::Error::custom(e.to_string()))
    }
}
