use std::path::Path;

use crate::{math::vec::Vec3, Error, Result};

use super::Mesh;

/// Load all the models of an OBJ file as a single triangulated mesh.
///
/// Materials referenced by the file are ignored: they are assigned when the
/// object is placed.
pub(super) fn load_obj(path: &Path) -> Result<Mesh> {
    let options = tobj::LoadOptions {
        single_index: true,
        triangulate: true,
        ..Default::default()
    };
    let (models, _materials) = tobj::load_obj(path, &options).map_err(|err| Error::AssetLoad {
        path: path.to_owned(),
        reason: err.to_string(),
    })?;

    let mut vertices: Vec<Vec3> = vec![];
    let mut indices: Vec<[u32; 3]> = vec![];
    for model in &models {
        let mesh = &model.mesh;
        log::debug!(
            "loading model {} ({} vertices)",
            model.name,
            mesh.positions.len() / 3
        );

        if mesh.positions.len() % 3 != 0 || mesh.indices.len() % 3 != 0 {
            return Err(Error::AssetLoad {
                path: path.to_owned(),
                reason: format!("model {} is not a triangle mesh", model.name),
            });
        }

        let offset = vertices.len() as u32;
        let positions: &[[f32; 3]] = bytemuck::cast_slice(&mesh.positions);
        vertices.extend(positions.iter().copied().map(Vec3::from_array));

        let triangles: &[[u32; 3]] = bytemuck::cast_slice(&mesh.indices);
        indices.extend(triangles.iter().map(|t| t.map(|i| i + offset)));
    }

    if indices.is_empty() {
        return Err(Error::AssetLoad {
            path: path.to_owned(),
            reason: "no triangle found".to_owned(),
        });
    }
    if let Some(bad) = indices.iter().flatten().find(|&&i| i as usize >= vertices.len()) {
        return Err(Error::AssetLoad {
            path: path.to_owned(),
            reason: format!("vertex index {bad} out of range"),
        });
    }

    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "asset".to_owned());

    Ok(Mesh::new(name, path.to_owned(), vertices, indices))
}
