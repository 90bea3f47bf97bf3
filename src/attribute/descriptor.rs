//! Attribute kinds and descriptors.

use crate::util::ScalarType;
use std::fmt;

/// Semantic role of an attribute.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum AttributeKind {
    /// Point position
    Position = 0,
    /// Surface normal
    Normal = 1,
    /// Vertex color
    Color = 2,
    /// Texture coordinate
    TexCoord = 3,
    /// Any other attribute
    #[default]
    Generic = 4,
}

impl AttributeKind {
    /// All kinds, in tag order. Useful for structural comparisons that
    /// iterate over every named kind.
    pub const ALL: [Self; 5] =
        [Self::Position, Self::Normal, Self::Color, Self::TexCoord, Self::Generic];

    /// Returns the name of this kind as a string.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Position => "position",
            Self::Normal => "normal",
            Self::Color => "color",
            Self::TexCoord => "texcoord",
            Self::Generic => "generic",
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Describes the shape of one typed per-point value.
///
/// A position would typically be `(Position, 3, Float32)`, an 8-bit RGB
/// color `(Color, 3, UInt8)` with `normalized` set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AttributeDescriptor {
    /// Semantic kind.
    pub kind: AttributeKind,
    /// Number of scalar components per value, at least 1.
    pub component_count: u8,
    /// Storage type of each component.
    pub scalar_type: ScalarType,
    /// When true, integer values represent normalized fractions.
    pub normalized: bool,
    /// Layout hint for interleaved storage. Tightly packed stores set this
    /// to [`Self::byte_len`].
    pub byte_stride: usize,
    /// Layout hint for interleaved storage, 0 when not interleaved.
    pub byte_offset: usize,
}

impl AttributeDescriptor {
    /// Create a tightly packed descriptor.
    pub fn new(
        kind: AttributeKind,
        component_count: u8,
        scalar_type: ScalarType,
        normalized: bool,
    ) -> Self {
        Self {
            kind,
            component_count,
            scalar_type,
            normalized,
            byte_stride: scalar_type.byte_len() * component_count as usize,
            byte_offset: 0,
        }
    }

    /// Standard 3-component float32 position.
    pub fn position3f() -> Self {
        Self::new(AttributeKind::Position, 3, ScalarType::Float32, false)
    }

    /// Standard 3-component normalized 8-bit color.
    pub fn color3u8() -> Self {
        Self::new(AttributeKind::Color, 3, ScalarType::UInt8, true)
    }

    /// Size in bytes of one value (all components).
    #[inline]
    pub const fn byte_len(&self) -> usize {
        self.scalar_type.byte_len() * self.component_count as usize
    }

    /// Returns true if this is a usable descriptor.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.component_count >= 1 && self.scalar_type != ScalarType::Invalid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_byte_len() {
        assert_eq!(AttributeDescriptor::position3f().byte_len(), 12);
        assert_eq!(AttributeDescriptor::color3u8().byte_len(), 3);
        let d = AttributeDescriptor::new(AttributeKind::Generic, 2, ScalarType::Float64, false);
        assert_eq!(d.byte_len(), 16);
        assert_eq!(d.byte_stride, 16);
    }

    #[test]
    fn test_descriptor_validity() {
        assert!(AttributeDescriptor::position3f().is_valid());
        let d = AttributeDescriptor::new(AttributeKind::Generic, 0, ScalarType::Float32, false);
        assert!(!d.is_valid());
        let d = AttributeDescriptor::new(AttributeKind::Generic, 3, ScalarType::Invalid, false);
        assert!(!d.is_valid());
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(AttributeKind::Position.name(), "position");
        assert_eq!(format!("{}", AttributeKind::Color), "color");
        assert_eq!(AttributeKind::ALL.len(), 5);
    }
}
