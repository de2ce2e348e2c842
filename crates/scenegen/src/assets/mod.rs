//! Read-only catalog of the meshes objects can be drawn from.

mod obj;

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use rand::{seq::SliceRandom, Rng};

use crate::{
    math::{bounds::Bounds, point::Point, vec::Vec3},
    Result,
};

/// A triangle mesh in its own local frame
#[derive(Debug)]
pub struct Mesh {
    pub name: String,
    pub source: PathBuf,
    pub vertices: Vec<Vec3>,
    /// Triangles, as triplets of indices into `vertices`
    pub indices: Vec<[u32; 3]>,
    pub bounds: Bounds,
}

impl Mesh {
    pub fn new(name: String, source: PathBuf, vertices: Vec<Vec3>, indices: Vec<[u32; 3]>) -> Self {
        let bounds = Bounds::from_points(vertices.iter().copied().map(Point));
        Self {
            name,
            source,
            vertices,
            indices,
            bounds,
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }
}

/// All the assets found in a directory, shared between scenes and never mutated.
#[derive(Debug, Default, Clone)]
pub struct AssetCatalog {
    assets: Vec<Arc<Mesh>>,
}

impl AssetCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_meshes(meshes: Vec<Mesh>) -> Self {
        Self {
            assets: meshes.into_iter().map(Arc::new).collect(),
        }
    }

    /// Load every `.obj` file of `dir`, in path order.
    ///
    /// A missing directory gives an empty catalog; objects will then be
    /// primitives. A file that fails to load is an error.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            log::warn!(
                "asset directory {} does not exist, the catalog is empty",
                dir.display()
            );
            return Ok(Self::empty());
        }

        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            let is_obj = path
                .extension()
                .map_or(false, |ext| ext.eq_ignore_ascii_case("obj"));
            if path.is_file() && is_obj {
                paths.push(path);
            }
        }
        paths.sort();

        let meshes = paths
            .iter()
            .map(|path| obj::load_obj(path))
            .collect::<Result<Vec<_>>>()?;
        log::info!("loaded {} assets from {}", meshes.len(), dir.display());

        Ok(Self::from_meshes(meshes))
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Mesh>> {
        self.assets.iter()
    }

    /// Uniformly pick one asset, `None` if the catalog is empty
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Arc<Mesh>> {
        self.assets.choose(rng).cloned()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::path::PathBuf;

    use crate::math::vec::Vec3;

    use super::{AssetCatalog, Mesh};

    /// A tetrahedron with its base on z = -0.5 and apex at z = 1.5
    pub fn tetrahedron(name: &str) -> Mesh {
        Mesh::new(
            name.to_owned(),
            PathBuf::from(format!("{name}.obj")),
            vec![
                Vec3::new(-1.0, -1.0, -0.5),
                Vec3::new(1.0, -1.0, -0.5),
                Vec3::new(0.0, 1.0, -0.5),
                Vec3::new(0.0, 0.0, 1.5),
            ],
            vec![[0, 2, 1], [0, 1, 3], [1, 2, 3], [2, 0, 3]],
        )
    }

    #[test]
    fn mesh_bounds() {
        let mesh = tetrahedron("t");
        assert_eq!(mesh.bounds.height(), 2.0);
        assert_eq!(mesh.triangle_count(), 4);
    }

    #[test]
    fn missing_dir_is_empty_catalog() {
        let catalog = AssetCatalog::from_dir("this/dir/does/not/exist").unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.choose(&mut crate::seed_rng(0)).is_none());
    }

    #[test]
    fn choose_is_uniform_enough() {
        let catalog = AssetCatalog::from_meshes(vec![tetrahedron("a"), tetrahedron("b")]);
        let mut rng = crate::seed_rng(1);
        let picked_a = (0..1000)
            .filter(|_| catalog.choose(&mut rng).unwrap().name == "a")
            .count();
        assert!((400..600).contains(&picked_a), "{picked_a}");
    }

    #[test]
    fn loads_obj_files_from_dir() {
        let dir = std::env::temp_dir().join(format!("scenegen-assets-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("quad.obj"),
            "o Quad\nv 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 1\nf 1 2 3 4\n",
        )
        .unwrap();
        std::fs::write(dir.join("notes.txt"), "not an asset").unwrap();

        let catalog = AssetCatalog::from_dir(&dir).unwrap();
        assert_eq!(catalog.len(), 1);
        let mesh = catalog.iter().next().unwrap();
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.bounds.height(), 1.0);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
