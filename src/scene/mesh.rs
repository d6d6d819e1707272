use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::Color;
use crate::math::Vec3;

/// Failures while reading Wavefront OBJ text. Line numbers are 1-based.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ObjError {
    #[error("line {line}: vertex record needs three numeric coordinates")]
    InvalidVertex { line: usize },
    #[error("line {line}: invalid face index `{token}`")]
    InvalidIndex { line: usize, token: String },
    #[error("line {line}: vertex index {index} is out of range ({count} vertices defined)")]
    IndexOutOfRange { line: usize, index: i64, count: usize },
    #[error("line {line}: a face needs at least 3 vertices")]
    DegenerateFace { line: usize },
}

/// Planar polygon with a flat color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Face3D {
    pub vertices: Vec<Vec3>,
    pub color: Color,
    /// `normalize((p2 - p0) x (p1 - p0))`.
    pub normal: Vec3,
}

impl Face3D {
    /// `None` for fewer than three vertices.
    #[must_use]
    pub fn new(vertices: Vec<Vec3>, color: Color) -> Option<Self> {
        let normal = face_normal(&vertices)?;
        Some(Self {
            vertices,
            color,
            normal,
        })
    }

    /// Mean z of the vertices, used as the painter's-algorithm depth.
    #[must_use]
    pub fn average_depth(&self) -> f64 {
        average_z(&self.vertices)
    }
}

pub(crate) fn face_normal(vertices: &[Vec3]) -> Option<Vec3> {
    match vertices {
        [p0, p1, p2, ..] => Some((*p2 - *p0).cross(*p1 - *p0).normalized()),
        _ => None,
    }
}

pub(crate) fn average_z(vertices: &[Vec3]) -> f64 {
    if vertices.is_empty() {
        return 0.0;
    }
    vertices.iter().map(|p| p.z).sum::<f64>() / vertices.len() as f64
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh3D {
    pub faces: Vec<Face3D>,
}

impl Mesh3D {
    #[must_use]
    pub fn new(faces: Vec<Face3D>) -> Self {
        Self { faces }
    }

    /// Reads the `v` and `f` records of an OBJ document.
    ///
    /// Face entries may use the `v`, `v/vt`, `v//vn` and `v/vt/vn` forms;
    /// only the position index is used. Negative indices count back from the
    /// most recent vertex. Every other record type is ignored.
    pub fn from_obj(text: &str, color: Color) -> Result<Self, ObjError> {
        let mut vertices: Vec<Vec3> = Vec::new();
        let mut faces = Vec::new();

        for (index, raw_line) in text.lines().enumerate() {
            let line = index + 1;
            let mut tokens = raw_line.split_whitespace();
            match tokens.next() {
                Some("v") => vertices.push(parse_vertex(tokens, line)?),
                Some("f") => {
                    let corners = tokens
                        .map(|token| resolve_index(token, vertices.len(), line))
                        .collect::<Result<Vec<_>, _>>()?;
                    let face_vertices: Vec<Vec3> = corners.iter().map(|&i| vertices[i]).collect();
                    let face = Face3D::new(face_vertices, color)
                        .ok_or(ObjError::DegenerateFace { line })?;
                    faces.push(face);
                }
                _ => {}
            }
        }

        log::debug!(
            "OBJ parsed: {} vertices, {} faces",
            vertices.len(),
            faces.len()
        );
        Ok(Self { faces })
    }

    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }
}

fn parse_vertex<'a>(
    mut tokens: impl Iterator<Item = &'a str>,
    line: usize,
) -> Result<Vec3, ObjError> {
    let mut coordinate = || {
        tokens
            .next()
            .and_then(|token| token.parse::<f64>().ok())
            .ok_or(ObjError::InvalidVertex { line })
    };
    Ok(Vec3::new(coordinate()?, coordinate()?, coordinate()?))
}

fn resolve_index(token: &str, count: usize, line: usize) -> Result<usize, ObjError> {
    let position = token.split('/').next().unwrap_or(token);
    let index: i64 = position.parse().map_err(|_| ObjError::InvalidIndex {
        line,
        token: token.to_owned(),
    })?;

    let resolved = match index {
        0 => None,
        i if i > 0 => usize::try_from(i - 1).ok(),
        i => usize::try_from(count as i64 + i).ok(),
    };
    resolved
        .filter(|&i| i < count)
        .ok_or(ObjError::IndexOutOfRange { line, index, count })
}
