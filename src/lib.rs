//! # Puncta
//!
//! Point-cloud geometry stored as typed attribute buffers, with
//! readers/writers for common point file formats.
//!
//! A [`PointCloud`] owns a set of attribute stores (position, color,
//! normal, ...), each described by an [`AttributeDescriptor`] and addressed
//! by point index through a point-to-value mapping. File I/O is routed by a
//! fixed extension table; the plain-text XYZ codec lives in this crate,
//! while OBJ/PLY decoding and the compressed stream pipeline are external
//! collaborators reached through the contracts in [`io`].
//!
//! ## Modules
//!
//! - [`util`] - Basic types (scalar types, errors)
//! - [`attribute`] - Attribute descriptors and value stores
//! - [`cloud`] - The point cloud container
//! - [`io`] - Format dispatch, XYZ codec, stream contract
//!
//! ## Example
//!
//! ```ignore
//! use puncta::io::read_point_cloud_from_file;
//!
//! let cloud = read_point_cloud_from_file("scan.xyz")?;
//! println!("{} points", cloud.num_points());
//! ```

pub mod attribute;
pub mod cloud;
pub mod io;
pub mod util;

// Re-export commonly used types
pub use attribute::{AttributeDescriptor, AttributeKind, AttributeStore, PointMapping};
pub use cloud::{AttributeId, PointCloud};
pub use util::{Error, ErrorCode, Result, ScalarType};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::attribute::{AttributeDescriptor, AttributeKind, AttributeStore, PointMapping};
    pub use crate::cloud::{AttributeId, PointCloud};
    pub use crate::io::encode::{
        EncoderOptions, EncodingMethod, StreamDecoder, StreamEncoder, QUANTIZATION_BITS,
    };
    pub use crate::io::{read_point_cloud_from_file, write_point_cloud_to_file, FileFormat};
    pub use crate::util::{Error, ErrorCode, Result, ScalarType};
}
