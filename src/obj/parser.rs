use std::fmt;
use std::fs;
use std::io::{self, BufRead};
use std::path::Path;

use log::{debug, info, trace};
use trimesh_format::{Face, Mesh, Normal, TexCoord, Vertex};

use super::classify::{classify, FaceError, FaceRecord};
use crate::error::ObjError;

/// The numeric record kinds a line can carry besides faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Vertex,
    TexCoord,
    Normal,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RecordKind::Vertex => "v",
            RecordKind::TexCoord => "vt",
            RecordKind::Normal => "vn",
        })
    }
}

/// How many records of each kind a read accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordCounts {
    pub vertices: usize,
    pub tex_coords: usize,
    pub normals: usize,
    pub faces: usize,
    /// Faces that carried texture references.
    pub textured_faces: usize,
    /// Faces that carried normal references.
    pub normal_faces: usize,
}

/// The result of a successful read.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedObj {
    pub mesh: Mesh,
    pub counts: RecordCounts,
}

impl ParsedObj {
    pub fn into_mesh(self) -> Mesh {
        self.mesh
    }
}

#[derive(Debug, Default)]
struct ObjMeshBuilder {
    vertices: Vec<Vertex>,
    tex_coords: Vec<TexCoord>,
    normals: Vec<Normal>,
    faces: Vec<Face>,
    material_library: Option<String>,
    counts: RecordCounts,
}

impl ObjMeshBuilder {
    fn push_vertex(&mut self, vertex: Vertex) {
        self.vertices.push(vertex);
        self.counts.vertices += 1;
    }

    fn push_tex_coord(&mut self, tex_coord: TexCoord) {
        self.tex_coords.push(tex_coord);
        self.counts.tex_coords += 1;
    }

    fn push_normal(&mut self, normal: Normal) {
        self.normals.push(normal);
        self.counts.normals += 1;
    }

    /// Appends exactly one face; the attribute counters follow the branch
    /// the record was classified into.
    fn push_face(&mut self, record: FaceRecord) {
        match record {
            FaceRecord::Bare { .. } => {}
            FaceRecord::TextureOnly { .. } => self.counts.textured_faces += 1,
            FaceRecord::NormalOnly { .. } => self.counts.normal_faces += 1,
            FaceRecord::Both { .. } => {
                self.counts.textured_faces += 1;
                self.counts.normal_faces += 1;
            }
        }
        self.faces.push(record.into());
        self.counts.faces += 1;
    }

    fn set_material_library(&mut self, name: &str) {
        self.material_library = if name.is_empty() {
            None
        } else {
            Some(name.into())
        };
    }

    fn build_mesh(self) -> Result<ParsedObj, ObjError> {
        let mesh = Mesh::with_attributes(
            self.vertices,
            self.tex_coords,
            self.normals,
            self.faces,
            self.material_library,
        )?;

        Ok(ParsedObj {
            mesh,
            counts: self.counts,
        })
    }
}

/// Reads a triangle mesh from a Wavefront `.obj` file.
///
/// The file handle is released when this returns, whichever way it returns.
pub fn read_obj<P: AsRef<Path>>(filepath: P) -> Result<ParsedObj, ObjError> {
    let filepath = filepath.as_ref();
    let file = fs::File::open(filepath).map_err(|source| ObjError::FileNotFound {
        path: filepath.to_owned(),
        source,
    })?;

    info!("Loading mesh: {}", filepath.display());
    let parsed = parse(io::BufReader::new(file))?;
    info!(
        "Loaded {} vertices and {} faces from {}",
        parsed.counts.vertices,
        parsed.counts.faces,
        filepath.display()
    );

    Ok(parsed)
}

/// Reads a triangle mesh from any line source.
///
/// Parsing stops at the first bad line, and the mesh is validated as a whole
/// once every line is read: either a complete mesh comes back or nothing.
pub fn parse<R: BufRead>(mut source: R) -> Result<ParsedObj, ObjError> {
    let mut builder = ObjMeshBuilder::default();
    let mut buffer = Vec::new();
    let mut number = 0;

    while source.read_until(b'\n', &mut buffer)? > 0 {
        number += 1;
        {
            // bytes outside UTF-8 decode to U+FFFD and can only spoil the
            // line they sit in
            let decoded = String::from_utf8_lossy(&buffer);
            let line: &str = &decoded;
            let line = line.strip_suffix('\n').unwrap_or(line);
            let line = line.strip_suffix('\r').unwrap_or(line);
            parse_line(line, number, &mut builder)?;
        }
        buffer.clear();
    }

    builder.build_mesh()
}

fn parse_line(line: &str, number: usize, builder: &mut ObjMeshBuilder) -> Result<(), ObjError> {
    // material libraries are recognized by prefix alone (`mtllib`, `mtl ...`)
    if line.starts_with("mtl") {
        builder.set_material_library(material_library_name(line));
        return Ok(());
    }

    // a record keyword only counts when a space follows it
    let token = line.split_once(' ').map(|(token, _)| token);
    match token {
        Some("v") => {
            let [x, y, z] = parse_fields::<3>(line, RecordKind::Vertex, number)?;
            builder.push_vertex(Vertex {
                position: [x, y, z],
            });
        }
        Some("vt") => {
            let [u, v] = parse_fields::<2>(line, RecordKind::TexCoord, number)?;
            builder.push_tex_coord(TexCoord { uv: [u, v] });
        }
        Some("vn") => {
            let [x, y, z] = parse_fields::<3>(line, RecordKind::Normal, number)?;
            builder.push_normal(Normal {
                direction: [x, y, z],
            });
        }
        Some("f") => {
            let record = classify(line).map_err(|err| match err {
                FaceError::NonTriangular(layout) => ObjError::NonTriangularFace {
                    line: number,
                    layout,
                },
                FaceError::Unrecognized => ObjError::UnrecognizedFaceSyntax { line: number },
            })?;
            builder.push_face(record);
        }
        _ if line.starts_with('#') => trace!("Comment: {:?}", line),
        _ if line.trim().is_empty() => {}
        _ => debug!("Ignoring unsupported statement on line {}: {:?}", number, line),
    }

    Ok(())
}

/// Reads the leading numeric fields of a `v`, `vt` or `vn` line. Anything
/// after them is ignored.
fn parse_fields<const N: usize>(
    line: &str,
    kind: RecordKind,
    number: usize,
) -> Result<[f64; N], ObjError> {
    let malformed = || ObjError::MalformedRecord { line: number, kind };
    let mut values = line.split_whitespace().skip(1);
    let mut fields = [0.0; N];
    for field in fields.iter_mut() {
        *field = values
            .next()
            .and_then(|value| value.parse().ok())
            .ok_or_else(malformed)?;
    }

    Ok(fields)
}

/// The file name a material-library line refers to: what follows the first
/// `./` if there is one, otherwise what follows the last space.
fn material_library_name(line: &str) -> &str {
    match line.find("./") {
        Some(start) => &line[start + 2..],
        None => line.rfind(' ').map_or(line, |start| &line[start + 1..]),
    }
}
