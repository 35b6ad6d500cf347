use anyhow::{Context, Result};
use log::debug;
use serde::Deserialize;
use std::path::Path;
use trimesh_obj::{MaterialLibrary, Overwrite, WriteOptions};

use crate::utils;

/// Folder-wide settings shared by every mesh without its own file.
const FOLDER_META: &str = "obj.toml";

/// Per-file settings read from `<stem>.toml` or a folder-wide `obj.toml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub(crate) struct ObjMeta {
    pub(crate) header: bool,
    pub(crate) material_library: MaterialLibrary,
}

impl Default for ObjMeta {
    fn default() -> Self {
        ObjMeta {
            header: true,
            material_library: MaterialLibrary::Derived,
        }
    }
}

impl ObjMeta {
    pub(crate) fn parse(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        let meta: Self = toml::from_slice(&data)?;
        Ok(meta)
    }

    /// Settings for the mesh at `path`: its own `<stem>.toml` first, then the
    /// folder's `obj.toml`, then the defaults.
    pub(crate) fn locate(path: &Path) -> Result<Self> {
        let dir = path
            .parent()
            .with_context(|| format!("Path has no parent folder: {}", path.display()))?;
        let own = utils::combine_path(dir, utils::file_name(path)?, "toml")?;

        match [own, dir.join(FOLDER_META)]
            .iter()
            .find(|candidate| candidate.is_file())
        {
            Some(found) => {
                debug!("Reading mesh settings from {}", found.display());
                ObjMeta::parse(found)
            }
            None => Ok(ObjMeta::default()),
        }
    }

    pub(crate) fn write_options(&self, overwrite: Overwrite) -> WriteOptions {
        WriteOptions {
            header: self.header,
            material_library: self.material_library,
            overwrite,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_meta() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("cube.toml");
        std::fs::write(&path, "header = false\nmaterial_library = \"from_mesh\"\n")?;

        assert_eq!(
            ObjMeta::parse(&path)?,
            ObjMeta {
                header: false,
                material_library: MaterialLibrary::FromMesh,
            }
        );
        Ok(())
    }

    #[test]
    fn test_locate_prefers_own_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let mesh = dir.path().join("cube.obj");

        assert_eq!(ObjMeta::locate(&mesh)?, ObjMeta::default());

        std::fs::write(dir.path().join(FOLDER_META), "header = false\n")?;
        assert!(!ObjMeta::locate(&mesh)?.header);

        std::fs::write(dir.path().join("cube.toml"), "material_library = \"omit\"\n")?;
        assert_eq!(
            ObjMeta::locate(&mesh)?,
            ObjMeta {
                header: true,
                material_library: MaterialLibrary::Omit,
            }
        );
        assert!(!ObjMeta::locate(&dir.path().join("other.obj"))?.header);
        Ok(())
    }

    #[test]
    fn test_missing_keys_fall_back_to_defaults() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("obj.toml");
        std::fs::write(&path, "material_library = \"omit\"\n")?;

        let meta = ObjMeta::parse(&path)?;
        assert!(meta.header);
        assert_eq!(
            meta.write_options(Overwrite::Replace),
            WriteOptions {
                header: true,
                material_library: MaterialLibrary::Omit,
                overwrite: Overwrite::Replace,
            }
        );
        Ok(())
    }
}
