//! Attribute value storage and point-to-value mapping.

use bytemuck::Pod;
use half::f16;

use super::AttributeDescriptor;
use crate::util::{Error, Result, ScalarType};

/// Mapping from point index to value index.
///
/// The text codecs only ever use [`PointMapping::Identity`]; the explicit
/// table exists so deduplicated attributes fit the same interface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PointMapping {
    /// Value index equals point index.
    Identity,
    /// Per-point value index table.
    Explicit(Vec<u32>),
}

impl PointMapping {
    /// Create an explicit mapping with all points referring to value 0.
    pub fn explicit(num_points: usize) -> Self {
        Self::Explicit(vec![0; num_points])
    }

    /// Resolve a point index to a value index.
    #[inline]
    pub fn value_index(&self, point_index: usize) -> usize {
        match self {
            Self::Identity => point_index,
            Self::Explicit(table) => table[point_index] as usize,
        }
    }

    /// Returns true for the identity mapping.
    #[inline]
    pub fn is_identity(&self) -> bool {
        matches!(self, Self::Identity)
    }
}

/// Indexed buffer of attribute values plus the point-to-value mapping.
///
/// Values live in one contiguous buffer, one slot per value index. All slots
/// are zeroed on creation and set by value index.
#[derive(Clone, Debug)]
pub struct AttributeStore {
    descriptor: AttributeDescriptor,
    buffer: Vec<u8>,
    num_values: usize,
    mapping: PointMapping,
}

impl AttributeStore {
    /// Allocate storage for `capacity` values with identity mapping.
    ///
    /// Fails if the descriptor has no components or an invalid scalar type.
    pub fn new(descriptor: AttributeDescriptor, capacity: usize) -> Result<Self> {
        Self::with_mapping(descriptor, capacity, PointMapping::Identity)
    }

    /// Allocate storage for `capacity` values with the given mapping.
    pub fn with_mapping(
        descriptor: AttributeDescriptor,
        capacity: usize,
        mapping: PointMapping,
    ) -> Result<Self> {
        if descriptor.component_count < 1 {
            return Err(Error::InvalidDescriptor(format!(
                "{} attribute has no components",
                descriptor.kind
            )));
        }
        if descriptor.scalar_type == ScalarType::Invalid {
            return Err(Error::InvalidDescriptor(format!(
                "{} attribute has an invalid scalar type",
                descriptor.kind
            )));
        }
        Ok(Self {
            buffer: vec![0; capacity * descriptor.byte_len()],
            descriptor,
            num_values: capacity,
            mapping,
        })
    }

    /// The descriptor this store was created with.
    #[inline]
    pub fn descriptor(&self) -> &AttributeDescriptor {
        &self.descriptor
    }

    /// Number of value slots in the buffer.
    #[inline]
    pub fn num_values(&self) -> usize {
        self.num_values
    }

    /// The point-to-value mapping.
    #[inline]
    pub fn mapping(&self) -> &PointMapping {
        &self.mapping
    }

    /// Point a point index at a value index. Only valid for explicit
    /// mappings.
    pub fn set_point_to_value(&mut self, point_index: usize, value_index: u32) {
        match &mut self.mapping {
            PointMapping::Identity => {
                debug_assert!(false, "set_point_to_value on identity mapping")
            }
            PointMapping::Explicit(table) => table[point_index] = value_index,
        }
    }

    /// Copy one value's worth of raw bytes into the buffer.
    ///
    /// The caller guarantees `value_index < num_values()` and that `raw` is
    /// exactly one value long.
    pub fn set_value(&mut self, value_index: usize, raw: &[u8]) {
        let len = self.descriptor.byte_len();
        debug_assert_eq!(raw.len(), len);
        let start = value_index * len;
        self.buffer[start..start + len].copy_from_slice(raw);
    }

    /// Copy one value from a typed component slice.
    pub fn set_typed_value<T: Pod>(&mut self, value_index: usize, components: &[T]) {
        debug_assert_eq!(components.len(), self.descriptor.component_count as usize);
        self.set_value(value_index, bytemuck::cast_slice(components));
    }

    /// Raw bytes of one value.
    #[inline]
    pub fn value(&self, value_index: usize) -> &[u8] {
        let len = self.descriptor.byte_len();
        let start = value_index * len;
        &self.buffer[start..start + len]
    }

    /// Resolve a point index through the mapping and copy the value's raw
    /// bytes into `out`.
    pub fn mapped_value(&self, point_index: usize, out: &mut [u8]) {
        let value_index = self.mapping.value_index(point_index);
        out.copy_from_slice(self.value(value_index));
    }

    /// Resolve a point index through the mapping and copy the value into a
    /// typed component slice.
    pub fn mapped_typed_value<T: Pod>(&self, point_index: usize, out: &mut [T]) {
        debug_assert_eq!(out.len(), self.descriptor.component_count as usize);
        let value_index = self.mapping.value_index(point_index);
        bytemuck::cast_slice_mut(out).copy_from_slice(self.value(value_index));
    }

    /// Decode one component of one value to f64, whatever the scalar type.
    fn component_f64(&self, value_index: usize, component: usize) -> f64 {
        let width = self.descriptor.scalar_type.byte_len();
        let value = self.value(value_index);
        let bytes = &value[component * width..(component + 1) * width];
        match self.descriptor.scalar_type {
            ScalarType::Invalid => 0.0,
            ScalarType::Int8 => bytes[0] as i8 as f64,
            ScalarType::UInt8 | ScalarType::Bool => bytes[0] as f64,
            ScalarType::Int16 => bytemuck::pod_read_unaligned::<i16>(bytes) as f64,
            ScalarType::UInt16 => bytemuck::pod_read_unaligned::<u16>(bytes) as f64,
            ScalarType::Int32 => bytemuck::pod_read_unaligned::<i32>(bytes) as f64,
            ScalarType::UInt32 => bytemuck::pod_read_unaligned::<u32>(bytes) as f64,
            ScalarType::Int64 => bytemuck::pod_read_unaligned::<i64>(bytes) as f64,
            ScalarType::UInt64 => bytemuck::pod_read_unaligned::<u64>(bytes) as f64,
            ScalarType::Float16 => bytemuck::pod_read_unaligned::<f16>(bytes).to_f64(),
            ScalarType::Float32 => bytemuck::pod_read_unaligned::<f32>(bytes) as f64,
            ScalarType::Float64 => bytemuck::pod_read_unaligned::<f64>(bytes),
        }
    }

    fn check_convert_components(&self, requested: usize) -> Result<()> {
        if requested > self.descriptor.component_count as usize {
            return Err(Error::Inconsistent(format!(
                "requested {} components from a {}-component {} attribute",
                requested, self.descriptor.component_count, self.descriptor.kind
            )));
        }
        Ok(())
    }

    /// Copy up to `out.len()` components of a value as unsigned bytes,
    /// converting scalar type and normalization as needed. Normalized float
    /// sources are scaled to the 0..=255 range; everything else saturates.
    pub fn convert_value_to_u8(&self, value_index: usize, out: &mut [u8]) -> Result<()> {
        self.check_convert_components(out.len())?;
        let st = self.descriptor.scalar_type;
        for (c, slot) in out.iter_mut().enumerate() {
            let raw = self.component_f64(value_index, c);
            let scaled = if st.is_float() && self.descriptor.normalized {
                (raw * 255.0).round()
            } else {
                raw
            };
            *slot = scaled as u8;
        }
        Ok(())
    }

    /// Copy up to `out.len()` components of a value as f32, converting
    /// scalar type and normalization as needed. Normalized integer sources
    /// are scaled to the 0..=1 range.
    pub fn convert_value_to_f32(&self, value_index: usize, out: &mut [f32]) -> Result<()> {
        self.check_convert_components(out.len())?;
        let st = self.descriptor.scalar_type;
        for (c, slot) in out.iter_mut().enumerate() {
            let raw = self.component_f64(value_index, c);
            *slot = if self.descriptor.normalized && st.is_integral() {
                (raw / st.integral_max().unwrap_or(1.0)) as f32
            } else {
                raw as f32
            };
        }
        Ok(())
    }
}
