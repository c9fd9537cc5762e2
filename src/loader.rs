//! OBJ ingestion.
//!
//! Parsing is delegated to `tobj`; this module only feeds its output into a
//! [`MeshBuilder`]. Every object in the file becomes part of one mesh, with
//! indices offset past the objects before it. Polygons are triangulated by
//! the parser.
//!
//! `tobj` keeps only the positions some face refers to. Every `v` line
//! still grows the mesh extents and the reported vertex count, so a stray
//! vertex widens the canvas and shifts the centering exactly as it would
//! if it were stored.

use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::LoadError;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::mesh::{Face, MeshBuilder, RawMesh};

/// Counts gathered while loading a mesh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub objects: usize,
    /// Every `v` line in the file.
    pub vertices: usize,
    /// `v` lines no face refers to. They count toward the extents only.
    pub unreferenced_vertices: usize,
    pub faces: usize,
    pub texture_coords: usize,
}

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        triangulate: true,
        single_index: false,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    }
}

/// Loads an OBJ file from disk.
pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<(RawMesh, LoadReport), LoadError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse(path, &text)
}

/// Loads OBJ text from any reader. `name` only labels errors.
///
/// Material libraries are not resolved.
pub fn load_obj_from_reader<R: Read>(
    reader: &mut R,
    name: &str,
) -> Result<(RawMesh, LoadReport), LoadError> {
    let path = PathBuf::from(name);
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|source| LoadError::Read {
            path: path.clone(),
            source,
        })?;
    parse(&path, &text)
}

fn parse(path: &Path, text: &str) -> Result<(RawMesh, LoadReport), LoadError> {
    let (models, _materials) =
        tobj::load_obj_buf(&mut text.as_bytes(), &load_options(), |_| {
            Ok(Default::default())
        })
        .map_err(|source| LoadError::Obj {
            path: path.to_path_buf(),
            source,
        })?;
    assemble(path, &models, text)
}

/// `(x, y)` of every `v` line, whether a face uses it or not.
///
/// Runs after `tobj` accepted the text, so every coordinate parses.
fn raw_positions(text: &str) -> impl Iterator<Item = (f32, f32)> + '_ {
    text.lines().filter_map(|line| {
        let mut tokens = line.split_whitespace();
        if tokens.next() != Some("v") {
            return None;
        }
        let x = tokens.next()?.parse().ok()?;
        let y = tokens.next()?.parse().ok()?;
        Some((x, y))
    })
}

fn assemble(
    path: &Path,
    models: &[tobj::Model],
    text: &str,
) -> Result<(RawMesh, LoadReport), LoadError> {
    let mut builder = MeshBuilder::new();
    let mut texture_coords = 0;

    for model in models {
        let mesh = &model.mesh;
        let vertex_offset = builder.vertex_count() as u32;

        for p in mesh.positions.chunks_exact(3) {
            builder.add_vertex(Vec3::new(p[0], p[1], p[2]));
        }

        let mut texcoord_offset = None;
        if !mesh.texcoords.is_empty() {
            if mesh.texcoord_indices.len() == mesh.indices.len() {
                let mut first = None;
                for uv in mesh.texcoords.chunks_exact(2) {
                    let id = builder.add_texture_coord(Vec2::new(uv[0], uv[1]));
                    first.get_or_insert(id);
                }
                texture_coords += mesh.texcoords.len() / 2;
                texcoord_offset = first;
            } else {
                warn!(
                    object = %model.name,
                    "Texture coordinates do not cover every face; ignoring them"
                );
            }
        }

        for (i, tri) in mesh.indices.chunks_exact(3).enumerate() {
            let face = builder.add_face(Face::new(
                tri[0] + vertex_offset,
                tri[1] + vertex_offset,
                tri[2] + vertex_offset,
            ));
            if let Some(offset) = texcoord_offset {
                let t = &mesh.texcoord_indices[i * 3..i * 3 + 3];
                builder.add_face_texture(
                    face,
                    Face::new(t[0] + offset, t[1] + offset, t[2] + offset),
                );
            }
        }
    }

    let mut raw_vertices = 0;
    for (x, y) in raw_positions(text) {
        builder.set_min_max(x, y);
        raw_vertices += 1;
    }
    let referenced = builder.vertex_count();

    let report = LoadReport {
        objects: models.len(),
        vertices: raw_vertices.max(referenced),
        unreferenced_vertices: raw_vertices.saturating_sub(referenced),
        faces: builder.face_count(),
        texture_coords,
    };
    let mesh = builder.build().map_err(|source| LoadError::Mesh {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        path = %path.display(),
        objects = report.objects,
        vertices = report.vertices,
        unreferenced = report.unreferenced_vertices,
        faces = report.faces,
        texture_coords = report.texture_coords,
        "Loaded mesh"
    );
    Ok((mesh, report))
}
