mod meta;

use anyhow::{Context, Result};
use log::info;
use std::path::Path;
use trimesh_format::Mesh;
use trimesh_obj::{barycenter, read_obj, write_obj, Overwrite, ParsedObj};

use crate::utils;

use self::meta::ObjMeta;

fn parse(path: &Path) -> Result<ParsedObj> {
    read_obj(path).with_context(|| format!("Could not read mesh: {}", path.display()))
}

fn serialize(mesh: &Mesh) -> Result<Vec<u8>> {
    mesh.to_bytes().context("Could not serialize mesh")
}

fn save(path: &Path, output_dir: &Path, data: Vec<u8>, force: bool) -> Result<()> {
    let file_name = utils::file_name(path)?;
    let target = utils::combine_path(output_dir, file_name, "tmesh")?;
    utils::ensure_destination(&target, force)?;
    utils::write_file(target, data)?;
    Ok(())
}

fn store(mesh: &Mesh, meta: ObjMeta, output: &Path, force: bool) -> Result<()> {
    let overwrite = if force {
        Overwrite::Replace
    } else {
        Overwrite::Refuse
    };
    write_obj(mesh, output, &meta.write_options(overwrite))
        .with_context(|| format!("Could not write mesh: {}", output.display()))
}

pub(crate) fn info(path: &Path) -> Result<()> {
    let parsed = parse(path)?;
    let mesh = &parsed.mesh;
    let counts = &parsed.counts;
    let [x, y, z] = barycenter::barycenter(mesh);

    println!("{}", path.display());
    println!("  vertices:            {}", counts.vertices);
    println!("  texture coordinates: {}", counts.tex_coords);
    println!("  normals:             {}", counts.normals);
    println!("  faces:               {} ({:?})", counts.faces, mesh.face_layout());
    if let Some(material_library) = mesh.material_library() {
        println!("  material library:    {}", material_library);
    }
    println!("  barycenter:          {} {} {}", x, y, z);
    Ok(())
}

pub(crate) fn rewrite(path: &Path, output: &Path, force: bool) -> Result<()> {
    info!("Rewriting Wavefront `.obj`-file: `{}`", path.display());
    let meta = ObjMeta::locate(path)?;
    let mesh = parse(path)?.into_mesh();
    store(&mesh, meta, output, force)
}

pub(crate) fn pack(path: &Path, output_dir: &Path, force: bool) -> Result<()> {
    info!("Packing Wavefront `.obj`-file: `{}`", path.display());
    let mesh = parse(path)?.into_mesh();
    save(path, output_dir, serialize(&mesh)?, force)
}

pub(crate) fn unpack(path: &Path, output: &Path, force: bool) -> Result<()> {
    info!("Unpacking mesh snapshot: `{}`", path.display());
    let meta = ObjMeta::locate(path)?;
    let mesh = Mesh::from_file(path)
        .with_context(|| format!("Could not load mesh snapshot: {}", path.display()))?;
    store(&mesh, meta, output, force)
}
