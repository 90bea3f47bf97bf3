//! Reader for the plain-text XYZ point format.
//!
//! Each non-comment line holds `x y z` as floats, optionally followed by
//! `r g b` as 8-bit integer channels. Lines that are empty or start with
//! `#` are skipped. Either every data line carries a color triple or none
//! does; a mix fails the whole read.

use std::io::BufRead;
use std::path::Path;

use tracing::debug;

use crate::attribute::{AttributeDescriptor, AttributeStore};
use crate::cloud::PointCloud;
use crate::util::{Error, Result};

use super::open_file;

/// Read an XYZ point cloud from a file.
pub fn read_xyz_point_cloud_from_file(path: impl AsRef<Path>) -> Result<PointCloud> {
    let file = open_file(path.as_ref())?;
    read_xyz_point_cloud(std::io::BufReader::new(file))
}

/// Read an XYZ point cloud from any buffered reader.
pub fn read_xyz_point_cloud<R: BufRead>(reader: R) -> Result<PointCloud> {
    let mut coords: Vec<f32> = Vec::new();
    let mut colors: Vec<u8> = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = line_no + 1;
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != 3 && tokens.len() != 6 {
            return Err(Error::parse(
                line_no,
                format!("expected 3 or 6 tokens, found {}", tokens.len()),
            ));
        }

        for token in &tokens[..3] {
            let v: f32 = token
                .parse()
                .map_err(|_| Error::parse(line_no, format!("invalid coordinate {token:?}")))?;
            coords.push(v);
        }

        if tokens.len() == 6 {
            for token in &tokens[3..] {
                let channel: i32 =
                    token.parse().map_err(|_| Error::MalformedColor { line: line_no })?;
                // 8-bit truncation, out-of-range channels are accepted.
                colors.push(channel as u8);
            }
        }
    }

    let num_points = coords.len() / 3;
    let mut cloud = PointCloud::new();
    cloud.set_num_points(num_points);

    let mut positions = AttributeStore::new(AttributeDescriptor::position3f(), num_points)?;
    for i in 0..num_points {
        positions.set_typed_value(i, &coords[i * 3..i * 3 + 3]);
    }
    cloud.add_attribute_store(positions);

    let has_color = !colors.is_empty();
    if has_color {
        if colors.len() / 3 != num_points {
            return Err(Error::ColorCountMismatch {
                expected: num_points,
                actual: colors.len() / 3,
            });
        }
        let mut store = AttributeStore::new(AttributeDescriptor::color3u8(), num_points)?;
        for i in 0..num_points {
            store.set_typed_value(i, &colors[i * 3..i * 3 + 3]);
        }
        cloud.add_attribute_store(store);
    }

    debug!(num_points, has_color, "parsed xyz point cloud");
    Ok(cloud)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::AttributeKind;
    use crate::util::ErrorCode;
    use std::io::Cursor;

    fn read(content: &str) -> Result<PointCloud> {
        read_xyz_point_cloud(Cursor::new(content))
    }

    #[test]
    fn test_positions_only() {
        let pc = read("0 0 0\n1 1 1\n").unwrap();
        assert_eq!(pc.num_points(), 2);
        assert_eq!(pc.num_named_attributes(AttributeKind::Position), 1);
        assert_eq!(pc.num_named_attributes(AttributeKind::Color), 0);

        let pos = pc.named_attribute(AttributeKind::Position).unwrap();
        let mut p = [0.0f32; 3];
        pos.mapped_typed_value(1, &mut p);
        assert_eq!(p, [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_positions_with_color() {
        let pc = read("0 0 0 255 0 0\n1 1 1 0 255 0\n").unwrap();
        assert_eq!(pc.num_points(), 2);
        assert_eq!(pc.num_named_attributes(AttributeKind::Color), 1);

        let color = pc.named_attribute(AttributeKind::Color).unwrap();
        assert!(color.descriptor().normalized);
        let mut c = [0u8; 3];
        color.mapped_typed_value(0, &mut c);
        assert_eq!(c, [255, 0, 0]);
        color.mapped_typed_value(1, &mut c);
        assert_eq!(c, [0, 255, 0]);
    }

    #[test]
    fn test_comments_and_blank_lines_skipped() {
        let pc = read("# header\n\n0.5 -1.25 2\n# trailing comment\n3 4 5\n\n").unwrap();
        assert_eq!(pc.num_points(), 2);
        let pos = pc.named_attribute(AttributeKind::Position).unwrap();
        let mut p = [0.0f32; 3];
        pos.mapped_typed_value(0, &mut p);
        assert_eq!(p, [0.5, -1.25, 2.0]);
    }

    #[test]
    fn test_empty_input_is_valid_empty_cloud() {
        let pc = read("# only a comment\n").unwrap();
        assert_eq!(pc.num_points(), 0);
        assert_eq!(pc.num_named_attributes(AttributeKind::Color), 0);
    }

    #[test]
    fn test_wrong_token_count_fails() {
        for content in ["1 2\n", "1 2 3 4\n", "1 2 3 4 5\n", "1 2 3 4 5 6 7\n"] {
            let err = read(content).unwrap_err();
            assert_eq!(err.code(), ErrorCode::Parse, "content {content:?}");
        }
    }

    #[test]
    fn test_bad_coordinate_fails() {
        let err = read("1 2 three\n").unwrap_err();
        assert!(matches!(err, Error::ParseLine { line: 1, .. }));
    }

    #[test]
    fn test_malformed_color_fails() {
        let err = read("1 2 3 255 0 x\n").unwrap_err();
        assert!(matches!(err, Error::MalformedColor { line: 1 }));
        // A float where a channel belongs is malformed color, not a new point.
        let err = read("1 2 3 0.5 0 0\n").unwrap_err();
        assert!(matches!(err, Error::MalformedColor { line: 1 }));
    }

    #[test]
    fn test_mixed_color_presence_fails() {
        let err = read("0 0 0 255 0 0\n1 1 1\n").unwrap_err();
        assert!(matches!(err, Error::ColorCountMismatch { expected: 2, actual: 1 }));
        assert_eq!(err.code(), ErrorCode::Consistency);
    }

    #[test]
    fn test_out_of_range_channels_truncate() {
        let pc = read("0 0 0 256 300 -1\n").unwrap();
        let color = pc.named_attribute(AttributeKind::Color).unwrap();
        let mut c = [0u8; 3];
        color.mapped_typed_value(0, &mut c);
        assert_eq!(c, [0, 44, 255]);
    }

    #[test]
    fn test_comment_lines_do_not_affect_color_consistency() {
        let pc = read("# colors below\n0 0 0 1 2 3\n# middle\n4 5 6 7 8 9\n").unwrap();
        assert_eq!(pc.num_points(), 2);
        assert_eq!(pc.num_named_attributes(AttributeKind::Color), 1);
    }
}
