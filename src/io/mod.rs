//! Format dispatch and file I/O entry points.
//!
//! The dispatcher maps a file extension to a [`FileFormat`] tag through a
//! fixed table and routes to the matching codec. The XYZ codec lives in
//! this crate; OBJ and PLY decoding, like the compressed stream pipeline in
//! [`encode`], are external collaborators reached through the same
//! contract.

pub mod encode;
mod xyz_reader;
mod xyz_writer;

pub use xyz_reader::{read_xyz_point_cloud, read_xyz_point_cloud_from_file};
pub use xyz_writer::{write_xyz_point_cloud, write_xyz_point_cloud_to_file};

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::debug;

use crate::cloud::PointCloud;
use crate::util::{Error, Result};

/// Known file formats, tagged by extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FileFormat {
    /// Wavefront OBJ (decoder is an external collaborator)
    Obj,
    /// Stanford PLY (decoder is an external collaborator)
    Ply,
    /// Plain-text XYZ
    Xyz,
}

impl FileFormat {
    /// Look up the format for a path by its extension.
    ///
    /// The table is fixed and case-sensitive: `.obj`, `.ply`, `.xyz`. Any
    /// other or missing extension returns None.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "obj" => Some(Self::Obj),
            "ply" => Some(Self::Ply),
            "xyz" => Some(Self::Xyz),
            _ => None,
        }
    }

    /// Returns the format name as a string.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Obj => "OBJ",
            Self::Ply => "PLY",
            Self::Xyz => "XYZ",
        }
    }
}

/// Open a file, mapping a missing file to [`Error::FileNotFound`].
pub(crate) fn open_file(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound(path.to_path_buf())
        } else {
            Error::Io(e)
        }
    })
}

/// Read a point cloud from a file, selecting the codec by extension.
///
/// Never returns a partially populated cloud: any failure anywhere in the
/// chain surfaces as an error.
pub fn read_point_cloud_from_file(path: impl AsRef<Path>) -> Result<PointCloud> {
    let path = path.as_ref();
    let format = FileFormat::from_path(path)
        .ok_or_else(|| Error::UnrecognizedFormat(path.to_path_buf()))?;
    debug!(?format, path = %path.display(), "reading point cloud");
    let file = open_file(path)?;
    match format {
        FileFormat::Xyz => read_xyz_point_cloud(BufReader::new(file)),
        FileFormat::Obj => Err(Error::DecoderUnavailable(FileFormat::Obj.name())),
        FileFormat::Ply => Err(Error::DecoderUnavailable(FileFormat::Ply.name())),
    }
}

/// Write a point cloud to a file, selecting the codec by extension.
pub fn write_point_cloud_to_file(cloud: &PointCloud, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let format = FileFormat::from_path(path)
        .ok_or_else(|| Error::UnrecognizedFormat(path.to_path_buf()))?;
    debug!(?format, path = %path.display(), "writing point cloud");
    match format {
        FileFormat::Xyz => write_xyz_point_cloud_to_file(cloud, path),
        FileFormat::Obj => Err(Error::EncoderUnavailable(FileFormat::Obj.name())),
        FileFormat::Ply => Err(Error::EncoderUnavailable(FileFormat::Ply.name())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_table() {
        assert_eq!(FileFormat::from_path(Path::new("cloud.xyz")), Some(FileFormat::Xyz));
        assert_eq!(FileFormat::from_path(Path::new("mesh.obj")), Some(FileFormat::Obj));
        assert_eq!(FileFormat::from_path(Path::new("scan.ply")), Some(FileFormat::Ply));
        assert_eq!(FileFormat::from_path(Path::new("dir/cloud.xyz")), Some(FileFormat::Xyz));
    }

    #[test]
    fn test_format_table_is_case_sensitive() {
        assert_eq!(FileFormat::from_path(Path::new("cloud.XYZ")), None);
        assert_eq!(FileFormat::from_path(Path::new("cloud.Xyz")), None);
    }

    #[test]
    fn test_format_table_rejects_unknown() {
        assert_eq!(FileFormat::from_path(Path::new("cloud.las")), None);
        assert_eq!(FileFormat::from_path(Path::new("no_extension")), None);
        assert_eq!(FileFormat::from_path(Path::new("trailing.")), None);
    }
}
