use anyhow::{anyhow, Context, Result};
use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};
use trimesh_obj::{probe_destination, Destination};

use crate::CliError;

pub fn file_name(path: &Path) -> Result<&str> {
    path.file_stem()
        .ok_or_else(|| anyhow!("No file stem found"))?
        .to_str()
        .ok_or_else(|| anyhow!("Can't convert file stem to string"))
}

pub fn combine_path(directory: &Path, file_name: &str, extension: &str) -> Result<PathBuf> {
    Ok(directory.join(format!("{}.{}", file_name, extension)))
}

/// The host side of a destination collision: refuse unless `force` was given.
pub fn ensure_destination(target: &Path, force: bool) -> Result<()> {
    if !force && probe_destination(target) == Destination::Occupied {
        return Err(CliError::DestinationExists(target.display().to_string()).into());
    }
    Ok(())
}

pub fn write_file(target: PathBuf, data: Vec<u8>) -> Result<File> {
    let mut buffer = File::create(&target)
        .with_context(|| format!("Could not create file: {}", &target.display()))?;
    buffer
        .write_all(data.as_slice())
        .with_context(|| format!("Could not write data to file: {}", &target.display()))?;
    Ok(buffer)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_combine_path() -> Result<()> {
        let path = combine_path(Path::new("out"), file_name(Path::new("in/cube.obj"))?, "tmesh")?;
        assert_eq!(path, Path::new("out").join("cube.tmesh"));
        Ok(())
    }

    #[test]
    fn test_ensure_destination() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let target = dir.path().join("cube.obj");

        ensure_destination(&target, false)?;
        write_file(target.clone(), b"v 0 0 0\n".to_vec())?;

        assert!(ensure_destination(&target, false).is_err());
        ensure_destination(&target, true)?;
        Ok(())
    }
}
