//! Point cloud container.
//!
//! A [`PointCloud`] owns an insertion-ordered collection of
//! [`AttributeStore`]s plus a point count. Attribute ids are stable small
//! integers assigned at insertion.

use glam::Vec3;

use crate::attribute::{AttributeDescriptor, AttributeKind, AttributeStore, PointMapping};
use crate::util::{Error, Result};

/// Stable identifier of an attribute within one [`PointCloud`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttributeId(pub u32);

impl std::fmt::Display for AttributeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An ordered collection of attribute stores plus a point count.
///
/// Attributes are owned exclusively by the cloud that holds them and are
/// dropped with it.
#[derive(Clone, Debug, Default)]
pub struct PointCloud {
    num_points: usize,
    attributes: Vec<AttributeStore>,
}

impl PointCloud {
    /// Create an empty cloud with zero points.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of points.
    #[inline]
    pub fn num_points(&self) -> usize {
        self.num_points
    }

    /// Set the point count. Existing attributes are not resized; add
    /// attributes after this call with the new count as capacity.
    pub fn set_num_points(&mut self, n: usize) {
        self.num_points = n;
    }

    /// Number of attributes.
    #[inline]
    pub fn num_attributes(&self) -> usize {
        self.attributes.len()
    }

    /// Create and own a new attribute store, returning its id.
    ///
    /// With `identity_mapping` the value index equals the point index,
    /// which is the only mode the text codecs use. Otherwise an explicit
    /// per-point table sized to the current point count is created.
    pub fn add_attribute(
        &mut self,
        descriptor: AttributeDescriptor,
        identity_mapping: bool,
        capacity: usize,
    ) -> Result<AttributeId> {
        let mapping = if identity_mapping {
            PointMapping::Identity
        } else {
            PointMapping::explicit(self.num_points)
        };
        let store = AttributeStore::with_mapping(descriptor, capacity, mapping)?;
        Ok(self.add_attribute_store(store))
    }

    /// Take ownership of an already populated store, returning its id.
    pub fn add_attribute_store(&mut self, store: AttributeStore) -> AttributeId {
        let id = AttributeId(self.attributes.len() as u32);
        self.attributes.push(store);
        id
    }

    /// Attribute by id.
    pub fn attribute(&self, id: AttributeId) -> Option<&AttributeStore> {
        self.attributes.get(id.0 as usize)
    }

    /// Mutable attribute by id.
    pub fn attribute_mut(&mut self, id: AttributeId) -> Option<&mut AttributeStore> {
        self.attributes.get_mut(id.0 as usize)
    }

    /// Iterate over attributes in insertion order.
    pub fn attributes(&self) -> impl Iterator<Item = &AttributeStore> {
        self.attributes.iter()
    }

    /// First attribute of the given kind, in insertion order. Multiple
    /// attributes of one kind may coexist; only the first is reachable
    /// here.
    pub fn named_attribute(&self, kind: AttributeKind) -> Option<&AttributeStore> {
        self.attributes.iter().find(|a| a.descriptor().kind == kind)
    }

    /// Id of the first attribute of the given kind.
    pub fn named_attribute_id(&self, kind: AttributeKind) -> Option<AttributeId> {
        self.attributes
            .iter()
            .position(|a| a.descriptor().kind == kind)
            .map(|i| AttributeId(i as u32))
    }

    /// Number of attributes whose kind equals `kind`.
    pub fn num_named_attributes(&self, kind: AttributeKind) -> usize {
        self.attributes.iter().filter(|a| a.descriptor().kind == kind).count()
    }

    /// Collect all point positions as `Vec3`, converting the stored scalar
    /// type if needed. Fails when there is no position attribute or it has
    /// fewer than 3 components.
    pub fn positions(&self) -> Result<Vec<Vec3>> {
        let pos = self
            .named_attribute(AttributeKind::Position)
            .ok_or_else(|| Error::MissingAttribute(AttributeKind::Position.name().into()))?;
        let mut out = Vec::with_capacity(self.num_points);
        let mut p = [0.0f32; 3];
        for i in 0..self.num_points {
            let value_index = pos.mapping().value_index(i);
            pos.convert_value_to_f32(value_index, &mut p)?;
            out.push(Vec3::from_array(p));
        }
        Ok(out)
    }

    /// Axis-aligned bounding box over all point positions. None for an
    /// empty cloud or when positions are absent.
    pub fn compute_bounds(&self) -> Option<(Vec3, Vec3)> {
        let positions = self.positions().ok()?;
        let mut iter = positions.into_iter();
        let first = iter.next()?;
        let mut min = first;
        let mut max = first;
        for p in iter {
            min = min.min(p);
            max = max.max(p);
        }
        Some((min, max))
    }
}
