//! Writer for the plain-text XYZ point format.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::attribute::AttributeKind;
use crate::cloud::PointCloud;
use crate::util::{Error, Result};

/// Write a point cloud to an XYZ file.
///
/// Requires a position attribute; when a color attribute with at least 3
/// components is present, `r g b` channels are appended to every line.
pub fn write_xyz_point_cloud_to_file(cloud: &PointCloud, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    // Check the precondition before touching the filesystem.
    if cloud.named_attribute(AttributeKind::Position).is_none() {
        return Err(Error::MissingAttribute(AttributeKind::Position.name().into()));
    }
    let file = File::create(path)?;
    debug!(path = %path.display(), num_points = cloud.num_points(), "writing xyz point cloud");
    write_xyz_point_cloud(cloud, BufWriter::new(file))
}

/// Write a point cloud in XYZ format to any writer.
pub fn write_xyz_point_cloud<W: Write>(cloud: &PointCloud, mut writer: W) -> Result<()> {
    let positions = cloud
        .named_attribute(AttributeKind::Position)
        .ok_or_else(|| Error::MissingAttribute(AttributeKind::Position.name().into()))?;
    if positions.num_values() < cloud.num_points() && positions.mapping().is_identity() {
        return Err(Error::Inconsistent(format!(
            "position attribute has {} values for {} points",
            positions.num_values(),
            cloud.num_points()
        )));
    }

    let color = cloud
        .named_attribute(AttributeKind::Color)
        .filter(|a| a.descriptor().component_count >= 3);

    let mut p = [0.0f32; 3];
    let mut c = [0u8; 3];
    for i in 0..cloud.num_points() {
        positions.mapped_typed_value(i, &mut p);
        write!(writer, "{} {} {}", p[0], p[1], p[2])?;
        if let Some(color) = color {
            let value_index = color.mapping().value_index(i);
            color.convert_value_to_u8(value_index, &mut c)?;
            write!(writer, " {} {} {}", c[0], c[1], c[2])?;
        }
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::AttributeDescriptor;
    use crate::io::read_xyz_point_cloud;
    use std::io::Cursor;

    fn cloud(points: &[[f32; 3]], colors: Option<&[[u8; 3]]>) -> PointCloud {
        let mut pc = PointCloud::new();
        pc.set_num_points(points.len());
        let id = pc
            .add_attribute(AttributeDescriptor::position3f(), true, points.len())
            .unwrap();
        let store = pc.attribute_mut(id).unwrap();
        for (i, p) in points.iter().enumerate() {
            store.set_typed_value(i, p);
        }
        if let Some(colors) = colors {
            let id = pc
                .add_attribute(AttributeDescriptor::color3u8(), true, colors.len())
                .unwrap();
            let store = pc.attribute_mut(id).unwrap();
            for (i, c) in colors.iter().enumerate() {
                store.set_typed_value(i, c);
            }
        }
        pc
    }

    fn write_to_string(pc: &PointCloud) -> String {
        let mut out = Vec::new();
        write_xyz_point_cloud(pc, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_write_positions_only() {
        let pc = cloud(&[[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]], None);
        assert_eq!(write_to_string(&pc), "0 0 0\n1 1 1\n");
    }

    #[test]
    fn test_write_with_color() {
        let pc = cloud(&[[0.0, 0.0, 0.0]], Some(&[[255, 0, 128]]));
        assert_eq!(write_to_string(&pc), "0 0 0 255 0 128\n");
    }

    #[test]
    fn test_write_without_positions_fails() {
        let pc = PointCloud::new();
        let mut out = Vec::new();
        let err = write_xyz_point_cloud(&pc, &mut out).unwrap_err();
        assert!(matches!(err, Error::MissingAttribute(_)));
        assert!(out.is_empty());
    }

    #[test]
    fn test_two_component_color_is_skipped() {
        let mut pc = cloud(&[[1.0, 2.0, 3.0]], None);
        let d = AttributeDescriptor::new(
            AttributeKind::Color,
            2,
            crate::util::ScalarType::UInt8,
            true,
        );
        pc.add_attribute(d, true, 1).unwrap();
        assert_eq!(write_to_string(&pc), "1 2 3\n");
    }

    #[test]
    fn test_writer_output_reads_back() {
        let pc = cloud(&[[0.5, -1.25, 2.0], [3.0, 4.0, 5.0]], Some(&[[1, 2, 3], [4, 5, 6]]));
        let text = write_to_string(&pc);
        let back = read_xyz_point_cloud(Cursor::new(text)).unwrap();
        assert_eq!(back.num_points(), 2);
        assert_eq!(back.num_named_attributes(AttributeKind::Color), 1);
        let pos = back.named_attribute(AttributeKind::Position).unwrap();
        let mut p = [0.0f32; 3];
        pos.mapped_typed_value(0, &mut p);
        assert_eq!(p, [0.5, -1.25, 2.0]);
    }
}
