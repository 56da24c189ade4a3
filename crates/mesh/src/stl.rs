//! STL (stereolithography) reading and writing.
//!
//! Reading accepts both ASCII and binary files and welds identical corner
//! positions into shared vertices. Writing recomputes facet normals from the
//! triangle winding and is deterministic for a given mesh and format, so the
//! same surface always produces the same bytes.

use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufReader, Cursor, ErrorKind, Read, Seek};
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{MeshIoError, MeshIoResult};
use crate::mesh::TriMesh;

/// STL flavour used when exporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StlFormat {
    #[default]
    Ascii,
    Binary,
}

impl StlFormat {
    pub fn all() -> &'static [StlFormat] {
        &[StlFormat::Ascii, StlFormat::Binary]
    }

    pub fn label(&self) -> &'static str {
        match self {
            StlFormat::Ascii => "ASCII",
            StlFormat::Binary => "Binary",
        }
    }
}

/// Load an STL file (ASCII or binary).
pub fn read_stl<P: AsRef<Path>>(path: P) -> MeshIoResult<TriMesh> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            MeshIoError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            MeshIoError::Io(e)
        }
    })?;

    let mesh = read_stl_from(&mut BufReader::new(file))?;
    tracing::debug!(
        path = %path.display(),
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        "read STL"
    );
    Ok(mesh)
}

/// Decode STL data from any seekable reader.
pub fn read_stl_from<R: Read + Seek>(reader: &mut R) -> MeshIoResult<TriMesh> {
    let indexed = stl_io::read_stl(reader).map_err(|e| match e.kind() {
        ErrorKind::InvalidData | ErrorKind::UnexpectedEof | ErrorKind::InvalidInput => {
            MeshIoError::invalid_content(e.to_string())
        }
        _ => MeshIoError::Io(e),
    })?;

    let to_vec3 = |i: usize| -> MeshIoResult<Vec3> {
        let v = indexed
            .vertices
            .get(i)
            .ok_or_else(|| MeshIoError::invalid_content(format!("vertex index {i} out of range")))?;
        Ok(Vec3::new(v[0], v[1], v[2]))
    };

    let mut soup = Vec::with_capacity(indexed.faces.len());
    for face in &indexed.faces {
        let [a, b, c] = face.vertices;
        soup.push([to_vec3(a)?, to_vec3(b)?, to_vec3(c)?]);
    }

    if soup.is_empty() {
        return Err(MeshIoError::invalid_content("file contains no triangles"));
    }

    Ok(TriMesh::from_triangles(&soup))
}

/// Decode STL data held in memory.
pub fn read_stl_bytes(bytes: &[u8]) -> MeshIoResult<TriMesh> {
    read_stl_from(&mut Cursor::new(bytes))
}

/// Render `mesh` as an ASCII STL document named `name`.
pub fn to_stl_ascii(mesh: &TriMesh, name: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "solid {name}");
    for i in 0..mesh.face_count() {
        let n = mesh.face_normal(i);
        let _ = writeln!(out, "  facet normal {:.6e} {:.6e} {:.6e}", n.x, n.y, n.z);
        out.push_str("    outer loop\n");
        for p in mesh.triangle(i) {
            let _ = writeln!(out, "      vertex {:.6e} {:.6e} {:.6e}", p.x, p.y, p.z);
        }
        out.push_str("    endloop\n");
        out.push_str("  endfacet\n");
    }
    let _ = writeln!(out, "endsolid {name}");
    out
}

/// Encode `mesh` as binary STL.
pub fn to_stl_binary(mesh: &TriMesh) -> MeshIoResult<Vec<u8>> {
    use stl_io::{Normal, Triangle, Vertex};

    let triangles: Vec<Triangle> = (0..mesh.face_count())
        .map(|i| {
            let n = mesh.face_normal(i);
            Triangle {
                normal: Normal::new(n.to_array()),
                vertices: mesh.triangle(i).map(|p| Vertex::new(p.to_array())),
            }
        })
        .collect();

    let mut cursor = Cursor::new(Vec::new());
    stl_io::write_stl(&mut cursor, triangles.iter())?;
    Ok(cursor.into_inner())
}

/// Encode `mesh` in the requested format.
pub fn encode_stl(mesh: &TriMesh, format: StlFormat, name: &str) -> MeshIoResult<Vec<u8>> {
    match format {
        StlFormat::Ascii => Ok(to_stl_ascii(mesh, name).into_bytes()),
        StlFormat::Binary => to_stl_binary(mesh),
    }
}

/// Write `mesh` to `path`, replacing any existing file.
pub fn write_stl<P: AsRef<Path>>(
    mesh: &TriMesh,
    path: P,
    format: StlFormat,
    name: &str,
) -> MeshIoResult<()> {
    let path = path.as_ref();
    let bytes = encode_stl(mesh, format, name)?;
    std::fs::write(path, &bytes)?;
    tracing::debug!(
        path = %path.display(),
        faces = mesh.face_count(),
        bytes = bytes.len(),
        ?format,
        "wrote STL"
    );
    Ok(())
}
