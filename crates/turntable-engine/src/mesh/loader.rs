use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::buffer::{vertex_color, InterleavedBuffer, MeshData};
use super::scan::scan_vertex_line;

/// Geometry loading failure.
///
/// Only I/O can fail. Malformed vertex lines are scanned leniently and never
/// produce an error.
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("failed to open geometry file `{}`", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read geometry data")]
    Read(#[from] io::Error),
}

/// Loads a geometry file from disk.
pub fn load(path: impl AsRef<Path>) -> Result<MeshData, MeshError> {
    let path = path.as_ref();

    let file = File::open(path).map_err(|source| MeshError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mesh = load_from_reader(BufReader::new(file))?;

    log::info!(
        "loaded {} vertices ({} bytes) from {}",
        mesh.vertex_count(),
        mesh.buffer().byte_len(),
        path.display()
    );

    Ok(mesh)
}

/// Loads geometry from any buffered reader.
///
/// Lines are decoded lossily so stray non-UTF-8 bytes in comments or names do
/// not abort the load; vertex coordinates are plain ASCII either way.
pub fn load_from_reader<R: BufRead>(mut reader: R) -> Result<MeshData, MeshError> {
    let mut assembler = Assembler::default();
    let mut line = Vec::new();

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        let text: Cow<'_, str> = String::from_utf8_lossy(trim_line_ending(&line));
        assembler.push_line(&text);
    }

    Ok(assembler.finish())
}

/// Parses geometry already held in memory.
pub fn parse_str(src: &str) -> MeshData {
    let mut assembler = Assembler::default();
    for line in src.lines() {
        assembler.push_line(line);
    }
    assembler.finish()
}

/// Accumulates parallel position/color lists line by line.
#[derive(Default)]
struct Assembler {
    positions: Vec<[f32; 3]>,
    colors: Vec<[f32; 3]>,
    line_number: usize,
    partial_lines: usize,
}

impl Assembler {
    fn push_line(&mut self, line: &str) {
        self.line_number += 1;

        let Some(scanned) = scan_vertex_line(line) else {
            return;
        };

        if !scanned.is_complete() {
            self.partial_lines += 1;
            log::debug!(
                "line {}: read {} of 3 coordinates, rest set to 0",
                self.line_number,
                scanned.components_read
            );
        }

        self.positions.push(scanned.position);
        self.colors.push(vertex_color(scanned.position));
    }

    fn finish(self) -> MeshData {
        if self.partial_lines > 0 {
            log::warn!(
                "{} vertex line(s) had missing or malformed coordinates; unread components were set to 0",
                self.partial_lines
            );
        }

        MeshData::new(InterleavedBuffer::interleave(&self.positions, &self.colors))
    }
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};

    use crate::mesh::FLOATS_PER_VERTEX;

    const CUBE_CORNERS: &str = "\
# two opposite cube corners
o corners
v 1 1 1
vn 0 0 1
v -1 -1 -1
f 1 2 1
";

    #[test]
    fn opposite_corners_round_trip() {
        let mesh = parse_str(CUBE_CORNERS);
        assert_eq!(
            mesh.buffer().as_slice(),
            &[
                1.0, 1.0, 1.0, 1.0, 1.0, 1.0, //
                -1.0, -1.0, -1.0, 0.0, 0.0, 0.0,
            ]
        );
    }

    #[test]
    fn buffer_length_is_six_per_vertex_line() {
        let src = "v 0 0 0\nvt 1 1\nv 1 0 0\n\nv 0 1 0\nvn 1 0 0\nv 0 0 1\nf 1 2 3\n";
        let mesh = parse_str(src);
        let vertex_lines = src.lines().filter(|l| l.starts_with("v ")).count();

        assert_eq!(vertex_lines, 4);
        assert_eq!(mesh.buffer().len(), FLOATS_PER_VERTEX * vertex_lines);
        assert_eq!(mesh.vertex_count(), vertex_lines);
    }

    #[test]
    fn vertices_keep_file_order_and_duplicates() {
        let mesh = parse_str("v 0.5 0 0\nv -0.5 0 0\nv 0.5 0 0\n");
        let xs: Vec<f32> = mesh.buffer().vertices().map(|v| v.position[0]).collect();
        assert_eq!(xs, vec![0.5, -0.5, 0.5]);
    }

    #[test]
    fn every_color_is_derived_from_its_position() {
        let mesh = parse_str("v 0.25 -0.75 2\nv -3 0 0.5\n");
        for v in mesh.buffer().vertices() {
            let [x, y, z] = v.position;
            assert_eq!(v.color, [(x + 1.0) / 2.0, (y + 1.0) / 2.0, (z + 1.0) / 2.0]);
        }
    }

    #[test]
    fn no_vertex_lines_is_an_empty_mesh() {
        let mesh = parse_str("# nothing here\nvn 0 1 0\nf 1 2 3\n");
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
    }

    #[test]
    fn malformed_line_is_kept_with_zero_fill() {
        let mesh = parse_str("v 1 bad 1\n");
        assert_eq!(mesh.buffer().as_slice(), &[1.0, 0.0, 0.0, 1.0, 0.5, 0.5]);
    }

    #[test]
    fn reader_handles_crlf_and_missing_final_newline() {
        let src = b"v 1 0 0\r\nv 0 1 0\r\nv 0 0 1";
        let mesh = load_from_reader(&src[..]).unwrap();
        let positions: Vec<_> = mesh.buffer().vertices().map(|v| v.position).collect();
        assert_eq!(
            positions,
            vec![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]
        );
    }

    #[test]
    fn reader_tolerates_non_utf8_bytes_outside_vertex_data() {
        let src = b"# caf\xe9 model\nv 1 2 3\n";
        let mesh = load_from_reader(&src[..]).unwrap();
        assert_eq!(mesh.vertex_count(), 1);
    }

    #[test]
    fn load_reads_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CUBE_CORNERS.as_bytes()).unwrap();

        let mesh = load(file.path()).unwrap();
        assert_eq!(mesh, parse_str(CUBE_CORNERS));
    }

    #[test]
    fn load_missing_file_is_an_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.obj");

        match load(&path) {
            Err(MeshError::Open { path: p, source }) => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("expected open error, got {other:?}"),
        }
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("disk on fire"))
        }
    }

    #[test]
    fn read_failure_propagates() {
        let err = load_from_reader(BufReader::new(FailingReader)).unwrap_err();
        assert!(matches!(err, MeshError::Read(_)));
    }
}
