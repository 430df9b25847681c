//! The two supported binary format revisions.
//!
//! Everything that differs between 0xB and 0xC is answered here, so section
//! renderers branch on a [`BinaryVersion`] method instead of re-deriving the
//! rules.

use serde::{Deserialize, Serialize};

use crate::error::{RenderError, RenderResult};
use crate::writer::BinaryWriter;

/// Binary format revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum BinaryVersion {
    /// Named sections; imports numbered apart from defined functions.
    V0xB,
    /// Numbered sections; one combined function index space.
    #[default]
    V0xC,
}

impl BinaryVersion {
    /// The revision tag written after the magic number.
    pub fn tag(self) -> u32 {
        match self {
            Self::V0xB => 0xB,
            Self::V0xC => 0xC,
        }
    }

    /// Whether imported functions share the defined functions' index space.
    pub fn combined_function_space(self) -> bool {
        matches!(self, Self::V0xC)
    }

    /// Frame `payload` as a section and append it to `out`.
    ///
    /// 0xB writes the section name followed by the payload length. 0xC writes
    /// the numeric id and a length; custom sections (id 0) carry their name
    /// right after the length, and the length covers it.
    pub fn write_section(
        self,
        out: &mut BinaryWriter,
        id: u8,
        name: &str,
        payload: &[u8],
    ) -> RenderResult<()> {
        match self {
            Self::V0xB => {
                out.write_ascii_string(name)?;
                out.write_len(payload.len())?;
            }
            Self::V0xC if id == crate::types::SECTION_CUSTOM => {
                let mut header = BinaryWriter::new();
                header.write_ascii_string(name)?;
                out.write_byte(id);
                out.write_len(payload.len() + header.len())?;
                out.write_bytes(header.data());
            }
            Self::V0xC => {
                out.write_byte(id);
                out.write_len(payload.len())?;
            }
        }
        out.write_bytes(payload);
        Ok(())
    }
}

impl TryFrom<u32> for BinaryVersion {
    type Error = RenderError;

    fn try_from(tag: u32) -> RenderResult<Self> {
        match tag {
            0xB => Ok(Self::V0xB),
            0xC => Ok(Self::V0xC),
            other => Err(RenderError::UnsupportedVersion(other)),
        }
    }
}

impl From<BinaryVersion> for u32 {
    fn from(version: BinaryVersion) -> u32 {
        version.tag()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_round_trip() {
        assert_eq!(BinaryVersion::try_from(0xB).unwrap(), BinaryVersion::V0xB);
        assert_eq!(BinaryVersion::try_from(0xC).unwrap(), BinaryVersion::V0xC);
        assert!(matches!(
            BinaryVersion::try_from(0xD),
            Err(RenderError::UnsupportedVersion(0xD))
        ));
    }

    #[test]
    fn test_named_section_framing() {
        let mut out = BinaryWriter::new();
        BinaryVersion::V0xB
            .write_section(&mut out, 1, "type", &[9, 9])
            .unwrap();
        assert_eq!(out.data(), &[4, b't', b'y', b'p', b'e', 2, 9, 9]);
    }

    #[test]
    fn test_numbered_section_framing() {
        let mut out = BinaryWriter::new();
        BinaryVersion::V0xC
            .write_section(&mut out, 3, "function", &[1, 0])
            .unwrap();
        assert_eq!(out.data(), &[3, 2, 1, 0]);
    }

    #[test]
    fn test_custom_section_length_covers_name() {
        let mut out = BinaryWriter::new();
        BinaryVersion::V0xC
            .write_section(&mut out, 0, "name", &[7])
            .unwrap();
        assert_eq!(out.data(), &[0, 6, 4, b'n', b'a', b'm', b'e', 7]);
    }
}
