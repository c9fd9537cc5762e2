//! Mesh data at each stage of the pipeline.
//!
//! Ownership flows one way:
//!
//! ```text
//! MeshBuilder --build--> RawMesh --center_align--> CenteredMesh --Camera::view--> ViewMesh
//! ```
//!
//! [`RawMesh`] and [`CenteredMesh`] are immutable once built. A
//! [`ViewMesh`] borrows its [`CenteredMesh`] and holds the per-render
//! vertex positions and normals, so re-rendering from a new camera never
//! touches the original snapshot.

use tracing::debug;

use crate::error::{MeshError, MeshResult};
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;

/// A triangle given as three zero-based indices.
///
/// Used both for vertex indices and for texture-coordinate indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Face {
    pub a: u32,
    pub b: u32,
    pub c: u32,
}

impl Face {
    pub const fn new(a: u32, b: u32, c: u32) -> Self {
        Self { a, b, c }
    }

    #[inline]
    pub fn indices(&self) -> [usize; 3] {
        [self.a as usize, self.b as usize, self.c as usize]
    }
}

/// Axis-aligned bounding box over vertex x/y.
///
/// Starts from an inverted sentinel so the first included point always
/// tightens every bound.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extents {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Default for Extents {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Extents {
    pub const EMPTY: Self = Self {
        min_x: f32::INFINITY,
        min_y: f32::INFINITY,
        max_x: f32::NEG_INFINITY,
        max_y: f32::NEG_INFINITY,
    };

    /// Grows the box to include `(x, y)`.
    pub fn include(&mut self, x: f32, y: f32) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    /// True until at least one point has been included.
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    /// Width over height.
    pub fn aspect_ratio(&self) -> MeshResult<f32> {
        if self.is_empty() {
            return Err(MeshError::NoVertices);
        }
        let height = self.height();
        if height <= f32::EPSILON {
            return Err(MeshError::ZeroHeightExtent);
        }
        Ok(self.width() / height)
    }

    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self {
            min_x: self.min_x + dx,
            min_y: self.min_y + dy,
            max_x: self.max_x + dx,
            max_y: self.max_y + dy,
        }
    }
}

/// Append-only accumulator fed by a mesh loader.
///
/// Indices are not checked while appending; [`MeshBuilder::build`]
/// validates every face before a [`RawMesh`] exists.
#[derive(Debug, Default)]
pub struct MeshBuilder {
    vertices: Vec<Vec3>,
    faces: Vec<Face>,
    face_textures: Vec<Option<Face>>,
    texture_coords: Vec<Vec2>,
    extents: Extents,
}

impl MeshBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a vertex and grows the extents. Returns the vertex id.
    pub fn add_vertex(&mut self, vertex: Vec3) -> u32 {
        self.set_min_max(vertex.x, vertex.y);
        self.vertices.push(vertex);
        (self.vertices.len() - 1) as u32
    }

    /// Grows the x/y extents. Called once per ingested vertex.
    pub fn set_min_max(&mut self, x: f32, y: f32) {
        self.extents.include(x, y);
    }

    /// Appends a triangle. Returns the face id.
    pub fn add_face(&mut self, face: Face) -> usize {
        self.faces.push(face);
        self.face_textures.push(None);
        self.faces.len() - 1
    }

    pub fn add_texture_coord(&mut self, uv: Vec2) -> u32 {
        self.texture_coords.push(uv);
        (self.texture_coords.len() - 1) as u32
    }

    /// Attaches texture-coordinate indices to an already added face.
    pub fn add_face_texture(&mut self, face: usize, texture: Face) {
        if face >= self.face_textures.len() {
            self.face_textures.resize(face + 1, None);
        }
        self.face_textures[face] = Some(texture);
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Validates indices and builds the vertex-to-face adjacency.
    pub fn build(mut self) -> MeshResult<RawMesh> {
        if self.vertices.is_empty() {
            return Err(MeshError::NoVertices);
        }

        let vertex_count = self.vertices.len();
        for (i, face) in self.faces.iter().enumerate() {
            for index in [face.a, face.b, face.c] {
                if index as usize >= vertex_count {
                    return Err(MeshError::FaceIndexOutOfRange {
                        face: i,
                        index,
                        vertex_count,
                    });
                }
            }
        }

        if self.face_textures.len() > self.faces.len() {
            return Err(MeshError::TextureForMissingFace {
                face: self.face_textures.len() - 1,
                face_count: self.faces.len(),
            });
        }
        let texcoord_count = self.texture_coords.len();
        for (i, texture) in self.face_textures.iter().enumerate() {
            let Some(texture) = texture else { continue };
            for index in [texture.a, texture.b, texture.c] {
                if index as usize >= texcoord_count {
                    return Err(MeshError::TextureIndexOutOfRange {
                        face: i,
                        index,
                        texcoord_count,
                    });
                }
            }
        }
        self.face_textures.resize(self.faces.len(), None);

        let adjacency = build_adjacency(vertex_count, &self.faces);

        Ok(RawMesh {
            vertices: self.vertices,
            faces: self.faces,
            face_textures: self.face_textures,
            texture_coords: self.texture_coords,
            extents: self.extents,
            adjacency,
        })
    }
}

/// Maps each vertex id to the ids of its incident faces.
///
/// A face appears at most once per vertex list, even if it repeats a
/// vertex index.
fn build_adjacency(vertex_count: usize, faces: &[Face]) -> Vec<Vec<usize>> {
    let mut adjacency = vec![Vec::new(); vertex_count];
    for (face_index, face) in faces.iter().enumerate() {
        for vertex in face.indices() {
            let incident: &mut Vec<usize> = &mut adjacency[vertex];
            if incident.last() != Some(&face_index) {
                incident.push(face_index);
            }
        }
    }
    adjacency
}

/// A fully loaded mesh in file coordinates.
#[derive(Debug, Clone)]
pub struct RawMesh {
    vertices: Vec<Vec3>,
    faces: Vec<Face>,
    face_textures: Vec<Option<Face>>,
    texture_coords: Vec<Vec2>,
    extents: Extents,
    adjacency: Vec<Vec<usize>>,
}

impl RawMesh {
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn texture_coords(&self) -> &[Vec2] {
        &self.texture_coords
    }

    pub fn extents(&self) -> Extents {
        self.extents
    }

    pub fn adjacency(&self) -> &[Vec<usize>] {
        &self.adjacency
    }

    /// Shifts the mesh so its x/y bounding box is centred on the origin.
    ///
    /// Vertices and extents move by the same amount. The shifted vertices
    /// become the immutable snapshot every camera transform starts from.
    pub fn center_align(self) -> CenteredMesh {
        let dx = -(self.extents.max_x + self.extents.min_x) / 2.0;
        let dy = -(self.extents.max_y + self.extents.min_y) / 2.0;
        debug!(dx, dy, "Center-aligning mesh");

        let original_vertices = self
            .vertices
            .into_iter()
            .map(|v| Vec3::new(v.x + dx, v.y + dy, v.z))
            .collect();

        CenteredMesh {
            original_vertices,
            faces: self.faces,
            face_textures: self.face_textures,
            texture_coords: self.texture_coords,
            extents: self.extents.translated(dx, dy),
            adjacency: self.adjacency,
        }
    }
}

/// A mesh whose x/y extents are symmetric about the origin.
#[derive(Debug, Clone)]
pub struct CenteredMesh {
    original_vertices: Vec<Vec3>,
    faces: Vec<Face>,
    face_textures: Vec<Option<Face>>,
    texture_coords: Vec<Vec2>,
    extents: Extents,
    adjacency: Vec<Vec<usize>>,
}

impl CenteredMesh {
    /// The centred vertices as loaded, before any camera transform.
    pub fn original_vertices(&self) -> &[Vec3] {
        &self.original_vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Texture-coordinate indices of a face, if the mesh has UV data for it.
    pub fn face_texture(&self, face: usize) -> Option<Face> {
        self.face_textures.get(face).copied().flatten()
    }

    pub fn texture_coords(&self) -> &[Vec2] {
        &self.texture_coords
    }

    pub fn has_texture_coords(&self) -> bool {
        !self.texture_coords.is_empty()
    }

    /// Extents of the centred, untransformed vertices.
    ///
    /// These stay the normalization reference for every camera, so a
    /// strongly rotated view may land partly outside the unit square.
    pub fn extents(&self) -> Extents {
        self.extents
    }

    pub fn adjacency(&self) -> &[Vec<usize>] {
        &self.adjacency
    }

    pub fn vertex_count(&self) -> usize {
        self.original_vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn aspect_ratio(&self) -> MeshResult<f32> {
        self.extents.aspect_ratio()
    }
}

/// Per-render positions and normals for a [`CenteredMesh`].
#[derive(Debug, Clone)]
pub struct ViewMesh<'a> {
    mesh: &'a CenteredMesh,
    vertices: Vec<Vec3>,
    face_normals: Vec<Vec3>,
    vertex_normals: Vec<Vec3>,
}

impl<'a> ViewMesh<'a> {
    /// Wraps transformed positions and derives face and vertex normals
    /// from them.
    ///
    /// # Panics
    /// Panics in debug builds if `vertices` does not match the mesh.
    pub fn from_positions(mesh: &'a CenteredMesh, vertices: Vec<Vec3>) -> Self {
        debug_assert_eq!(vertices.len(), mesh.vertex_count());
        let face_normals = compute_face_normals(&vertices, mesh.faces());
        let vertex_normals = compute_vertex_normals(&face_normals, mesh.adjacency());
        Self {
            mesh,
            vertices,
            face_normals,
            vertex_normals,
        }
    }

    pub fn mesh(&self) -> &'a CenteredMesh {
        self.mesh
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn face_normals(&self) -> &[Vec3] {
        &self.face_normals
    }

    pub fn vertex_normals(&self) -> &[Vec3] {
        &self.vertex_normals
    }

    /// Positions of the three corners of a face.
    pub fn face_positions(&self, face: usize) -> [Vec3; 3] {
        let [a, b, c] = self.mesh.faces()[face].indices();
        [self.vertices[a], self.vertices[b], self.vertices[c]]
    }

    /// Vertex normals at the three corners of a face.
    pub fn face_vertex_normals(&self, face: usize) -> [Vec3; 3] {
        let [a, b, c] = self.mesh.faces()[face].indices();
        [
            self.vertex_normals[a],
            self.vertex_normals[b],
            self.vertex_normals[c],
        ]
    }

    /// Texture coordinates at the three corners of a face, if any.
    pub fn face_uvs(&self, face: usize) -> Option<[Vec2; 3]> {
        let texture = self.mesh.face_texture(face)?;
        let uvs = self.mesh.texture_coords();
        let [a, b, c] = texture.indices();
        Some([uvs[a], uvs[b], uvs[c]])
    }
}

/// Unit normal of every face, `normalize((v2 - v0) x (v1 - v0))`.
///
/// The operand order fixes the outward direction for this renderer's
/// winding. Faces with zero area get the zero vector.
pub fn compute_face_normals(vertices: &[Vec3], faces: &[Face]) -> Vec<Vec3> {
    faces
        .iter()
        .map(|face| {
            let [a, b, c] = face.indices();
            let (v0, v1, v2) = (vertices[a], vertices[b], vertices[c]);
            (v2 - v0)
                .cross(v1 - v0)
                .try_normalize()
                .unwrap_or(Vec3::ZERO)
        })
        .collect()
}

/// Unit normal of every vertex: the normalized mean of its incident face
/// normals.
///
/// A vertex without incident faces, or whose face normals cancel out,
/// gets the zero vector. Such a vertex is never a face corner, or sits on
/// a surface with no defined side, so shading treats it as unlit.
pub fn compute_vertex_normals(face_normals: &[Vec3], adjacency: &[Vec<usize>]) -> Vec<Vec3> {
    let mut isolated = 0usize;
    let normals = adjacency
        .iter()
        .map(|incident| {
            if incident.is_empty() {
                isolated += 1;
                return Vec3::ZERO;
            }
            let mut sum = Vec3::ZERO;
            for &face in incident {
                sum += face_normals[face];
            }
            (sum / incident.len() as f32)
                .try_normalize()
                .unwrap_or(Vec3::ZERO)
        })
        .collect();
    if isolated > 0 {
        debug!(isolated, "Vertices without incident faces get a zero normal");
    }
    normals
}
