use super::{CUBE_OBJ, away_triangle, facing_triangle, mesh};
use crate::color::Color;
use crate::math::{Mat3x3, Vec3};
use crate::scene::{Mesh3D, Scene3D, SceneOptions};

#[test]
fn back_faces_are_culled() {
    let scene = Scene3D::new(
        vec![mesh(vec![
            facing_triangle(0.0, Color::RED),
            away_triangle(0.0, Color::BLUE),
        ])],
        Mat3x3::identity(),
    );
    let faces = scene.project();
    assert_eq!(faces.len(), 1);
    assert_eq!(faces[0].color, Color::RED);
}

#[test]
fn disabling_culling_keeps_back_faces_and_shades_them_black() {
    let options = SceneOptions {
        culling: false,
        ..SceneOptions::default()
    };
    let scene = Scene3D::with_options(
        vec![mesh(vec![
            facing_triangle(0.0, Color::RED),
            away_triangle(0.0, Color::BLUE),
        ])],
        Mat3x3::identity(),
        &options,
    );
    let faces = scene.project();
    assert_eq!(faces.len(), 2);
    assert_eq!(faces[0].color, Color::RED);
    assert_eq!(faces[1].color.to_bytes(), [0, 0, 0, 255]);
}

#[test]
fn faces_behind_the_camera_are_dropped() {
    let options = SceneOptions {
        culling: false,
        ..SceneOptions::default()
    };
    let scene = Scene3D::with_options(
        vec![mesh(vec![
            facing_triangle(-5.0, Color::RED),
            facing_triangle(-2.0, Color::GREEN),
        ])],
        Mat3x3::identity(),
        &options,
    );
    let faces = scene.project();
    assert_eq!(faces.len(), 1);
    assert_eq!(faces[0].color, Color::GREEN);
}

#[test]
fn rotation_turns_a_back_face_around() {
    let scene = Scene3D::new(
        vec![mesh(vec![away_triangle(0.0, Color::RED)])],
        Mat3x3::rotation_y(std::f64::consts::PI),
    );
    let faces = scene.project();
    assert_eq!(faces.len(), 1);
    assert!((faces[0].points[2].x + 1.0).abs() < 1e-9);
}

#[test]
fn closed_cube_shows_at_most_three_faces() {
    let cube = Mesh3D::from_obj(CUBE_OBJ, Color::WHITE).unwrap();
    assert_eq!(cube.face_count(), 6);

    let front_on = Scene3D::new(vec![cube.clone()], Mat3x3::identity());
    assert_eq!(front_on.project().len(), 1);

    let turned = Scene3D::new(
        vec![cube],
        Mat3x3::rotation_y(0.5) * Mat3x3::rotation_x(0.4),
    );
    let visible = turned.project();
    assert!(!visible.is_empty());
    assert!(visible.len() <= 3);
}

#[test]
fn shading_scales_by_light_alignment() {
    let scene = Scene3D::new(
        vec![mesh(vec![facing_triangle(0.0, Color::WHITE)])],
        Mat3x3::rotation_x(std::f64::consts::FRAC_PI_3),
    );
    let faces = scene.project();
    assert_eq!(faces.len(), 1);
    assert_eq!(faces[0].color.to_bytes(), [128, 128, 128, 255]);

    let unshaded = Scene3D::with_options(
        scene.meshes.clone(),
        scene.matrix,
        &SceneOptions {
            shading: false,
            ..SceneOptions::default()
        },
    );
    assert_eq!(unshaded.project()[0].color, Color::WHITE);
}

#[test]
fn custom_light_direction() {
    let options = SceneOptions {
        light_direction: Vec3::new(0.0, 0.0, -0.25),
        ..SceneOptions::default()
    };
    let scene = Scene3D::with_options(
        vec![mesh(vec![facing_triangle(0.0, Color::rgb(200.0, 100.0, 40.0))])],
        Mat3x3::identity(),
        &options,
    );
    assert_eq!(scene.project()[0].color.to_bytes(), [50, 25, 10, 255]);
}
