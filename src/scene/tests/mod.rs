use crate::color::Color;
use crate::math::Vec3;
use crate::scene::{Face3D, Mesh3D};

mod test_culling_basic;

/// Triangle in the plane `z`, wound so its normal points at the camera.
fn facing_triangle(z: f64, color: Color) -> Face3D {
    Face3D::new(
        vec![
            Vec3::new(0.0, 0.0, z),
            Vec3::new(1.0, 0.0, z),
            Vec3::new(0.0, 1.0, z),
        ],
        color,
    )
    .expect("three vertices")
}

/// Same triangle with the opposite winding.
fn away_triangle(z: f64, color: Color) -> Face3D {
    Face3D::new(
        vec![
            Vec3::new(0.0, 0.0, z),
            Vec3::new(0.0, 1.0, z),
            Vec3::new(1.0, 0.0, z),
        ],
        color,
    )
    .expect("three vertices")
}

fn mesh(faces: Vec<Face3D>) -> Mesh3D {
    Mesh3D::new(faces)
}

const CUBE_OBJ: &str = "\
v -0.5 -0.5 -0.5
v  0.5 -0.5 -0.5
v  0.5  0.5 -0.5
v -0.5  0.5 -0.5
v -0.5 -0.5  0.5
v  0.5 -0.5  0.5
v  0.5  0.5  0.5
v -0.5  0.5  0.5
f 1 2 3 4
f 6 5 8 7
f 5 1 4 8
f 2 6 7 3
f 4 3 7 8
f 5 6 2 1
";
