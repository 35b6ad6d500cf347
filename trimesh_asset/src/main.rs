pub(crate) mod mesh;
pub(crate) mod utils;

use anyhow::Result;
use log::{debug, warn};
use mesh::obj;
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use structopt::StructOpt;
use walkdir::WalkDir;

// Cli arguments
#[derive(StructOpt, Debug)]
#[structopt(name = "trimesh_asset")]
struct CliArgs {
    /// Output debug info
    #[structopt(short = "v", long = "verbose", global = true)]
    verbose: bool,
    #[structopt(subcommand)]
    command: Command,
}

#[derive(StructOpt, Debug)]
enum Command {
    /// Print record counts, face layout and barycenter of a mesh
    Info {
        #[structopt(parse(from_os_str))]
        input: PathBuf,
    },
    /// Read a mesh and write it back out
    Rewrite {
        #[structopt(parse(from_os_str))]
        input: PathBuf,
        #[structopt(parse(from_os_str))]
        output: PathBuf,
        /// Replace the output file if it exists
        #[structopt(short = "f", long = "force")]
        force: bool,
    },
    /// Convert every mesh in the input folder into a binary snapshot
    Pack {
        /// Specify the input folder
        #[structopt(parse(from_os_str))]
        input: PathBuf,
        /// Output directory, to place the snapshots in
        #[structopt(short = "o", long = "output", parse(from_os_str))]
        output: PathBuf,
        /// Replace snapshots that already exist
        #[structopt(short = "f", long = "force")]
        force: bool,
    },
    /// Turn a binary snapshot back into a mesh file
    Unpack {
        #[structopt(parse(from_os_str))]
        input: PathBuf,
        #[structopt(parse(from_os_str))]
        output: PathBuf,
        /// Replace the output file if it exists
        #[structopt(short = "f", long = "force")]
        force: bool,
    },
}

/// Happens during setup
#[derive(thiserror::Error, Debug)]
pub(crate) enum CliError {
    #[error("Input folder does not exist: {0}")]
    InputFolderNonExistant(String),
    #[error("Output folder structure could not be created: {0}")]
    ErrorCreatingOutputStructure(#[from] io::Error),
    #[error("Destination already exists, use --force to replace it: {0}")]
    DestinationExists(String),
}

fn main() -> Result<()> {
    let args = CliArgs::from_args();

    if !args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    } else {
        env_logger::Builder::new()
            .filter(None, log::LevelFilter::Debug)
            .init();
    }

    match args.command {
        Command::Info { input } => obj::info(&input),
        Command::Rewrite {
            input,
            output,
            force,
        } => obj::rewrite(&input, &output, force),
        Command::Pack {
            input,
            output,
            force,
        } => pack(&input, &output, force),
        Command::Unpack {
            input,
            output,
            force,
        } => obj::unpack(&input, &output, force),
    }
}

fn pack(input_path: &Path, output_path: &Path, force: bool) -> Result<()> {
    if !input_path.exists() || !input_path.is_dir() {
        return Err(CliError::InputFolderNonExistant(input_path.display().to_string()).into());
    }

    for entry in WalkDir::new(input_path) {
        let path = match &entry {
            Err(err) => {
                warn!("Error parsing path: {}", err);
                continue;
            }
            Ok(entry) => entry.path(),
        };

        if path.is_dir() {
            continue;
        }

        let output = match path.strip_prefix(input_path) {
            Ok(relative) => output_path.join(relative),
            Err(err) => {
                warn!("Error handling output path for {}: {}", path.display(), err);
                continue;
            }
        };

        // creating the output folder of the input file in the same structure
        let local_output_folder = output.parent().unwrap_or(output_path);
        if !local_output_folder.exists() {
            fs::create_dir_all(local_output_folder)
                .map_err(CliError::ErrorCreatingOutputStructure)?;
        }

        // check extension
        if let Some(Some(extension)) = path.extension().map(|x| x.to_str()) {
            match extension.to_ascii_lowercase().as_ref() {
                "obj" => obj::pack(path, local_output_folder, force)?,
                "toml" => debug!("Ignored toml file: {}", &path.display()),
                _ => warn!("Could not handle path: {}", &path.display()),
            }
        } else {
            warn!(
                "Ignored file \"{}\", because no file extension was found.",
                path.display()
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    const TRIANGLE: &str = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";

    fn entries(dir: &Path) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(dir)? {
            names.push(entry?.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }

    #[test]
    fn test_pack_mirrors_folders() -> Result<()> {
        let input = tempfile::tempdir()?;
        let output = tempfile::tempdir()?;
        let nested = input.path().join("props").join("small");
        fs::create_dir_all(&nested)?;
        fs::write(nested.join("tri.obj"), TRIANGLE)?;
        fs::write(input.path().join("top.OBJ"), TRIANGLE)?;
        fs::write(input.path().join("obj.toml"), "header = false\n")?;
        fs::write(input.path().join("README"), "notes")?;

        pack(input.path(), output.path(), false)?;

        assert_eq!(entries(output.path())?, vec!["props", "top.tmesh"]);
        assert_eq!(
            entries(&output.path().join("props").join("small"))?,
            vec!["tri.tmesh"]
        );

        // snapshots are only replaced when forced
        assert!(pack(input.path(), output.path(), false).is_err());
        pack(input.path(), output.path(), true)?;
        Ok(())
    }

    #[test]
    fn test_pack_requires_input_folder() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let file = dir.path().join("tri.obj");
        fs::write(&file, TRIANGLE)?;

        assert!(pack(&dir.path().join("missing"), dir.path(), false).is_err());
        assert!(pack(&file, dir.path(), false).is_err());
        Ok(())
    }
}
