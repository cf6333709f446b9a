//! Binary STL output.

use std::io::Cursor;

use stl_io::{Normal, Triangle, Vertex};
use tracing::debug;

use crate::error::{ExportError, Result};
use crate::math::Point3;
use crate::solid::{SolidId, SolidStore};
use crate::tessellation::{TessellateSolid, TriangleMesh};

/// Serializes meshes to one binary STL document.
///
/// # Errors
///
/// Returns [`ExportError::Empty`] when the meshes hold no triangles, or
/// [`ExportError::Io`] if writing fails.
#[allow(clippy::cast_possible_truncation)]
pub fn meshes_to_stl(meshes: &[TriangleMesh]) -> Result<Vec<u8>> {
    let to_vertex = |p: &Point3| Vertex::new([p.x as f32, p.y as f32, p.z as f32]);
    let triangles: Vec<Triangle> = meshes
        .iter()
        .flat_map(TriangleMesh::triangles)
        .map(|(n, [a, b, c])| Triangle {
            normal: Normal::new([n.x as f32, n.y as f32, n.z as f32]),
            vertices: [to_vertex(&a), to_vertex(&b), to_vertex(&c)],
        })
        .collect();
    if triangles.is_empty() {
        return Err(ExportError::Empty.into());
    }

    let mut cursor = Cursor::new(Vec::new());
    stl_io::write_stl(&mut cursor, triangles.iter()).map_err(ExportError::Io)?;
    debug!(triangles = triangles.len(), "wrote binary STL");
    Ok(cursor.into_inner())
}

/// Tessellates solids and serializes them to one binary STL document.
///
/// # Errors
///
/// Returns an error if a solid is missing, or as [`meshes_to_stl`].
pub fn solids_to_stl(store: &SolidStore, solids: &[SolidId]) -> Result<Vec<u8>> {
    let meshes = solids
        .iter()
        .map(|&id| TessellateSolid::new(id).execute(store))
        .collect::<Result<Vec<_>>>()?;
    meshes_to_stl(&meshes)
}

/// File name offered for a fused model: both texts joined by `_`, lower-cased,
/// with `.stl` appended. Characters that cannot appear in a file name become
/// `_`.
#[must_use]
pub fn download_name(text_a: &str, text_b: &str) -> String {
    let stem: String = format!("{text_a}_{text_b}")
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{stem}.stl")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point2;
    use crate::operations::shaping::ExtrudeLinear;
    use crate::solid::SolidData;

    #[test]
    fn download_name_joins_and_lowercases() {
        assert_eq!(download_name("Hello", "World"), "hello_world.stl");
        assert_eq!(download_name("A/B", "c d"), "a_b_c_d.stl");
    }

    #[test]
    fn cube_exports_binary_stl() {
        let mut store = SolidStore::new();
        let id = ExtrudeLinear::new(
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 0.0),
                Point2::new(1.0, 1.0),
                Point2::new(0.0, 1.0),
            ],
            1.0,
        )
        .execute(&mut store)
        .unwrap();
        let bytes = solids_to_stl(&store, &[id]).unwrap();
        // 80-byte header, u32 count, 50 bytes per triangle.
        assert_eq!(bytes.len(), 84 + 12 * 50);
        assert_eq!(u32::from_le_bytes(bytes[80..84].try_into().unwrap()), 12);

        let mesh = stl_io::read_stl(&mut Cursor::new(bytes)).unwrap();
        assert_eq!(mesh.faces.len(), 12);
    }

    #[test]
    fn nothing_to_export_is_an_error() {
        let mut store = SolidStore::new();
        let id = store.add_solid(SolidData::default());
        assert!(solids_to_stl(&store, &[id]).is_err());
        assert!(solids_to_stl(&store, &[]).is_err());
    }
}
