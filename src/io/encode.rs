//! Compressed point-cloud stream contract.
//!
//! The actual byte encoding is delegated to an external compression
//! pipeline through [`StreamEncoder`] / [`StreamDecoder`]; this module only
//! frames the stream (magic, version, encoding method) and plumbs the
//! per-attribute options through.

use std::collections::HashMap;
use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use tracing::trace;

use crate::attribute::AttributeKind;
use crate::cloud::PointCloud;
use crate::util::{Error, Result};

/// Magic bytes at the start of an encoded point-cloud stream.
pub const STREAM_MAGIC: &[u8; 4] = b"PNCT";

/// Version of the stream framing.
pub const STREAM_VERSION: u16 = 1;

/// Name of the per-attribute quantization precision option.
pub const QUANTIZATION_BITS: &str = "quantization_bits";

/// Encoding scheme selector, treated as opaque by the framing layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EncodingMethod {
    /// Sequential attribute encoding
    Sequential = 0,
    /// KD-tree encoding
    KdTree = 1,
}

impl EncodingMethod {
    /// Convert from the stream's method byte.
    pub const fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Sequential),
            1 => Some(Self::KdTree),
            _ => None,
        }
    }
}

/// Configuration passed through to the external encoder, keyed by attribute
/// kind. The one knob the framing layer recognizes by name is
/// [`QUANTIZATION_BITS`].
#[derive(Clone, Debug, Default)]
pub struct EncoderOptions {
    attribute_ints: HashMap<AttributeKind, HashMap<String, i32>>,
}

impl EncoderOptions {
    /// Options with no knobs set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a named integer option for one attribute kind.
    pub fn set_attribute_int(&mut self, kind: AttributeKind, name: &str, value: i32) {
        self.attribute_ints.entry(kind).or_default().insert(name.to_string(), value);
    }

    /// Get a named integer option for one attribute kind, falling back to
    /// `default` when unset.
    pub fn attribute_int(&self, kind: AttributeKind, name: &str, default: i32) -> i32 {
        self.attribute_ints
            .get(&kind)
            .and_then(|m| m.get(name))
            .copied()
            .unwrap_or(default)
    }
}

/// External encoder half of the compressed stream contract.
pub trait StreamEncoder {
    /// Encode the cloud into a self-contained payload.
    fn encode(&self, cloud: &PointCloud, options: &EncoderOptions) -> Result<Vec<u8>>;
}

/// External decoder half of the compressed stream contract.
pub trait StreamDecoder {
    /// Decode a payload produced by the matching encoder.
    fn decode(&self, payload: &[u8]) -> Result<PointCloud>;
}

/// Encode a point cloud into a stream.
///
/// Writes the framing header, then the payload produced by `encoder`. Any
/// encoder failure propagates before a single byte is written.
pub fn write_point_cloud_into_stream<W: Write>(
    cloud: &PointCloud,
    mut writer: W,
    method: EncodingMethod,
    options: &EncoderOptions,
    encoder: &dyn StreamEncoder,
) -> Result<()> {
    let payload = encoder.encode(cloud, options)?;
    trace!(?method, payload_len = payload.len(), "writing encoded point cloud stream");
    writer.write_all(STREAM_MAGIC)?;
    writer.write_u16::<LittleEndian>(STREAM_VERSION)?;
    writer.write_u8(method as u8)?;
    writer.write_u64::<LittleEndian>(payload.len() as u64)?;
    writer.write_all(&payload)?;
    writer.flush()?;
    Ok(())
}

/// Decode a point cloud from a stream written by
/// [`write_point_cloud_into_stream`].
pub fn read_point_cloud_from_stream<R: Read>(
    mut reader: R,
    decoder: &dyn StreamDecoder,
) -> Result<PointCloud> {
    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic)?;
    if &magic != STREAM_MAGIC {
        return Err(Error::InvalidStream("bad magic bytes".into()));
    }
    let version = reader.read_u16::<LittleEndian>()?;
    if version != STREAM_VERSION {
        return Err(Error::InvalidStream(format!("unsupported version {version}")));
    }
    let method_byte = reader.read_u8()?;
    let method = EncodingMethod::from_u8(method_byte)
        .ok_or_else(|| Error::InvalidStream(format!("unknown encoding method {method_byte}")))?;
    let payload_len = reader.read_u64::<LittleEndian>()?;
    let mut payload = vec![0u8; payload_len as usize];
    reader.read_exact(&mut payload)?;
    trace!(?method, payload_len, "decoding point cloud stream");
    decoder.decode(&payload)
}
