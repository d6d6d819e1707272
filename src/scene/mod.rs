//! Flat-shaded 3D scenes rendered with the painter's algorithm.
//!
//! The camera sits at the origin looking down +z. Faces are pushed
//! `depth_offset` units in front of it after the scene matrix is applied,
//! culled and shaded, sorted by average depth and finally projected onto the
//! xy plane.

mod mesh;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::math::{Mat3x3, Vec2, Vec3};

pub use mesh::{Face3D, Mesh3D, ObjError};

/// Closest depth a vertex may have before the perspective divide.
const NEAR_PLANE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepthOrder {
    /// Farthest faces first, so nearer faces paint over them.
    #[default]
    BackToFront,
    FrontToBack,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Projection {
    /// Drops z.
    #[default]
    Orthographic,
    /// Divides x and y by z, scaled by `focal_length`.
    Perspective { focal_length: f64 },
}

impl Projection {
    #[must_use]
    pub fn project(self, point: Vec3) -> Vec2 {
        match self {
            Self::Orthographic => Vec2::new(point.x, point.y),
            Self::Perspective { focal_length } => {
                let z = point.z.max(NEAR_PLANE);
                Vec2::new(point.x * focal_length / z, point.y * focal_length / z)
            }
        }
    }
}

/// Renderer flags of a [`Scene3D`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneOptions {
    pub fill: bool,
    pub line_width: f64,
    pub light_direction: Vec3,
    pub shading: bool,
    pub culling: bool,
    pub depth_offset: f64,
    pub depth_order: DepthOrder,
    pub projection: Projection,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            fill: true,
            line_width: 1.0,
            light_direction: Vec3::new(0.0, 0.0, -1.0),
            shading: true,
            culling: true,
            depth_offset: 3.0,
            depth_order: DepthOrder::BackToFront,
            projection: Projection::Orthographic,
        }
    }
}

/// A face after transformation and projection, ready to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedFace {
    /// Projected vertices in graph units.
    pub points: Vec<Vec2>,
    /// Average transformed z.
    pub depth: f64,
    /// Shaded color.
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene3D {
    pub meshes: Vec<Mesh3D>,
    pub matrix: Mat3x3,
    pub fill: bool,
    pub line_width: f64,
    pub light_direction: Vec3,
    pub shading: bool,
    pub culling: bool,
    pub depth_offset: f64,
    pub depth_order: DepthOrder,
    pub projection: Projection,
}

/// Transformed face that survived culling, before sorting and projection.
struct VisibleFace {
    vertices: Vec<Vec3>,
    depth: f64,
    color: Color,
}

impl Scene3D {
    #[must_use]
    pub fn new(meshes: Vec<Mesh3D>, matrix: Mat3x3) -> Self {
        Self::with_options(meshes, matrix, &SceneOptions::default())
    }

    #[must_use]
    pub fn with_options(meshes: Vec<Mesh3D>, matrix: Mat3x3, options: &SceneOptions) -> Self {
        Self {
            meshes,
            matrix,
            fill: options.fill,
            line_width: options.line_width,
            light_direction: options.light_direction,
            shading: options.shading,
            culling: options.culling,
            depth_offset: options.depth_offset,
            depth_order: options.depth_order,
            projection: options.projection,
        }
    }

    pub fn apply_options(&mut self, options: &SceneOptions) {
        self.fill = options.fill;
        self.line_width = options.line_width;
        self.light_direction = options.light_direction;
        self.shading = options.shading;
        self.culling = options.culling;
        self.depth_offset = options.depth_offset;
        self.depth_order = options.depth_order;
        self.projection = options.projection;
    }

    #[must_use]
    pub fn face_count(&self) -> usize {
        self.meshes.iter().map(Mesh3D::face_count).sum()
    }

    /// Runs the full pipeline and returns faces in drawing order.
    #[must_use]
    pub fn project(&self) -> Vec<ProjectedFace> {
        let faces: Vec<&Face3D> = self.meshes.iter().flat_map(|mesh| &mesh.faces).collect();
        let mut visible = self.collect_visible(&faces);

        // stable: equal depths keep mesh order
        match self.depth_order {
            DepthOrder::BackToFront => visible.sort_by(|a, b| b.depth.total_cmp(&a.depth)),
            DepthOrder::FrontToBack => visible.sort_by(|a, b| a.depth.total_cmp(&b.depth)),
        }

        log::debug!(
            "scene projected: {} of {} faces visible",
            visible.len(),
            faces.len()
        );

        visible
            .into_iter()
            .map(|face| ProjectedFace {
                points: face
                    .vertices
                    .iter()
                    .map(|&p| self.projection.project(p))
                    .collect(),
                depth: face.depth,
                color: face.color,
            })
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn collect_visible(&self, faces: &[&Face3D]) -> Vec<VisibleFace> {
        faces
            .par_iter()
            .filter_map(|face| self.transform_face(face))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn collect_visible(&self, faces: &[&Face3D]) -> Vec<VisibleFace> {
        faces
            .iter()
            .filter_map(|face| self.transform_face(face))
            .collect()
    }

    fn transform_face(&self, face: &Face3D) -> Option<VisibleFace> {
        let offset = Vec3::new(0.0, 0.0, self.depth_offset);
        let vertices: Vec<Vec3> = face
            .vertices
            .iter()
            .map(|&p| p * &self.matrix + offset)
            .collect();
        let first = *vertices.first()?;
        let normal = face.normal * &self.matrix;

        if self.culling && normal.dot(first) >= 0.0 {
            return None;
        }
        if first.z < 0.0 {
            return None;
        }

        let color = if self.shading {
            face.color * self.light_direction.dot(normal)
        } else {
            face.color
        };

        Some(VisibleFace {
            depth: mesh::average_z(&vertices),
            vertices,
            color,
        })
    }
}

#[cfg(test)]
mod tests;
