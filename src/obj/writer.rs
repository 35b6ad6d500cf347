use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use log::{debug, info};
use serde::Deserialize;
use trimesh_format::{Face, Mesh, MeshArrays};

use crate::error::ObjError;

/// Where the `mtllib` reference of a written file comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialLibrary {
    /// The destination file name with its extension swapped for `mtl`.
    Derived,
    /// The mesh's own reference, or the derived one when it has none.
    FromMesh,
    Omit,
}

impl Default for MaterialLibrary {
    fn default() -> Self {
        MaterialLibrary::Derived
    }
}

/// What to do when the destination already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overwrite {
    Refuse,
    Replace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Emit the leading comment block with object name and counts.
    pub header: bool,
    pub material_library: MaterialLibrary,
    pub overwrite: Overwrite,
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions {
            header: true,
            material_library: MaterialLibrary::default(),
            overwrite: Overwrite::Refuse,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Vacant,
    Occupied,
}

/// Tells the caller whether writing to `path` would replace an existing file.
pub fn probe_destination<P: AsRef<Path>>(path: P) -> Destination {
    if path.as_ref().exists() {
        Destination::Occupied
    } else {
        Destination::Vacant
    }
}

/// Writes `mesh` to `destination` in Wavefront `.obj` layout.
///
/// With [`Overwrite::Refuse`] an existing destination is reported as
/// [`ObjError::DestinationExists`] and left untouched.
pub fn write_obj<P: AsRef<Path>>(
    mesh: &Mesh,
    destination: P,
    options: &WriteOptions,
) -> Result<(), ObjError> {
    let destination = destination.as_ref();
    let object_name = destination
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let file = match options.overwrite {
        Overwrite::Refuse => OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(destination)
            .map_err(|err| match err.kind() {
                io::ErrorKind::AlreadyExists => ObjError::DestinationExists {
                    path: destination.to_owned(),
                },
                _ => ObjError::Io(err),
            })?,
        Overwrite::Replace => File::create(destination)?,
    };

    let mut sink = BufWriter::new(file);
    render_obj(mesh, &object_name, options, &mut sink)?;
    sink.flush()?;

    info!(
        "Wrote {} vertices and {} faces to {}",
        mesh.vertices().len(),
        mesh.faces().len(),
        destination.display()
    );
    Ok(())
}

/// Validates host-supplied arrays and writes them. Shape errors surface before
/// the destination is looked at.
pub fn write_arrays<P: AsRef<Path>>(
    arrays: MeshArrays,
    destination: P,
    options: &WriteOptions,
) -> Result<Mesh, ObjError> {
    let mesh = Mesh::try_from(arrays)?;
    write_obj(&mesh, destination, options)?;
    Ok(mesh)
}

/// Emits the text of an `.obj` file for `mesh` named `object_name`.
pub fn render_obj<W: Write>(
    mesh: &Mesh,
    object_name: &str,
    options: &WriteOptions,
    sink: &mut W,
) -> io::Result<()> {
    if options.header {
        writeln!(sink, "#\n# OBJ File generated by trimesh\n# using 'write_obj'")?;
        writeln!(sink, "#\n# Object {}\n#", object_name)?;
        writeln!(sink, "# Vertices: {}", mesh.vertices().len())?;
        writeln!(sink, "# Faces: {}\n#\n#", mesh.faces().len())?;
    }

    let material_library = match options.material_library {
        MaterialLibrary::Derived => Some(derived_material_library(object_name)),
        MaterialLibrary::FromMesh => Some(
            mesh.material_library()
                .map(String::from)
                .unwrap_or_else(|| derived_material_library(object_name)),
        ),
        MaterialLibrary::Omit => None,
    };
    if let Some(name) = material_library {
        writeln!(sink, "mtllib ./{}\n", name)?;
    }

    for vertex in mesh.vertices() {
        let [x, y, z] = vertex.position;
        writeln!(sink, "v {} {} {}", x, y, z)?;
    }
    for tex_coord in mesh.tex_coords() {
        let [u, v] = tex_coord.uv;
        writeln!(sink, "vt {} {}", u, v)?;
    }
    for normal in mesh.normals() {
        let [x, y, z] = normal.direction;
        writeln!(sink, "vn {} {} {}", x, y, z)?;
    }

    debug!("Writing {} faces as {:?}", mesh.faces().len(), mesh.face_layout());
    for face in mesh.faces() {
        write_face(sink, face)?;
    }

    Ok(())
}

/// Writes one `f` line in the syntax its attribute references call for. All
/// faces of a mesh share one layout, so the whole block uses one syntax.
fn write_face<W: Write>(sink: &mut W, face: &Face) -> io::Result<()> {
    let [a, b, c] = face.vertices;
    match (face.texture, face.normals) {
        (None, None) => writeln!(sink, "f {} {} {}", a, b, c),
        (Some([ta, tb, tc]), None) => {
            writeln!(sink, "f {}/{} {}/{} {}/{}", a, ta, b, tb, c, tc)
        }
        (None, Some([na, nb, nc])) => {
            writeln!(sink, "f {}//{} {}//{} {}//{}", a, na, b, nb, c, nc)
        }
        (Some([ta, tb, tc]), Some([na, nb, nc])) => writeln!(
            sink,
            "f {}/{}/{} {}/{}/{} {}/{}/{}",
            a, ta, na, b, tb, nb, c, tc, nc
        ),
    }
}

/// `mesh.obj` becomes `mesh.mtl`; a name without extension gains one.
fn derived_material_library(object_name: &str) -> String {
    Path::new(object_name)
        .with_extension("mtl")
        .to_string_lossy()
        .into_owned()
}
