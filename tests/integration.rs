use canvas_graph::color::Color;
use canvas_graph::graph::{Graph, GraphOptions, NumberLine, OptionsError};
use canvas_graph::math::{Mat3x3, Vec2};
use canvas_graph::render::{CommandRecorder, DrawCommand, LineCap, RenderError};
use canvas_graph::scene::{Mesh3D, Scene3D};
use canvas_graph::shape::{Drawable, FunctionGraph, MAX_SAMPLES, Shape2D, Sprite, Text2D};

/// 200x100 graph with the origin in the middle and no recorded setup calls.
fn centered_graph() -> Graph<CommandRecorder> {
    let options = GraphOptions {
        width: 200.0,
        height: 100.0,
        centered: true,
        ..GraphOptions::default()
    };
    let mut graph = Graph::with_options(CommandRecorder::new(1.0, 1.0), &options).expect("valid options");
    graph.context_mut().clear();
    graph
}

fn count(commands: &[DrawCommand], wanted: &DrawCommand) -> usize {
    commands.iter().filter(|command| *command == wanted).count()
}

#[test]
fn options_resize_and_center() {
    let options = GraphOptions {
        width: 200.0,
        height: 100.0,
        centered: true,
        ..GraphOptions::default()
    };
    let graph = Graph::with_options(CommandRecorder::new(1.0, 1.0), &options).expect("valid options");

    assert_eq!(
        graph.context().commands(),
        &[
            DrawCommand::SetSize {
                width: 200.0,
                height: 100.0
            },
            DrawCommand::LineCap { cap: LineCap::Round },
            DrawCommand::Font {
                font: "30px Arial".to_owned()
            },
        ]
    );
    assert_eq!(graph.translation(), Vec2::new(100.0, 50.0));
    assert_eq!(graph.to_pixel(Vec2::new(1.0, 1.0)), Vec2::new(140.0, 10.0));
    assert_eq!(graph.to_graph(140.0, 10.0), Vec2::new(1.0, 1.0));
}

#[test]
fn invalid_options_are_rejected() {
    let options = GraphOptions {
        width: 0.0,
        ..GraphOptions::default()
    };
    let result = Graph::with_options(CommandRecorder::new(1.0, 1.0), &options);
    assert!(matches!(result, Err(OptionsError::InvalidSize { .. })));
}

#[test]
fn transform_setters_compose() {
    let mut graph = Graph::new(CommandRecorder::new(100.0, 100.0));
    assert_eq!(graph.scale_factors(), Vec2::new(40.0, -40.0));

    graph.set_translation(10.0, 20.0);
    graph.translate(5.0, -5.0);
    graph.scale(0.5, 2.0);
    assert_eq!(graph.translation(), Vec2::new(15.0, 15.0));
    assert_eq!(graph.scale_factors(), Vec2::new(20.0, -80.0));

    graph.center_x();
    assert_eq!(graph.translation(), Vec2::new(50.0, 15.0));
    graph.set_scale_y(-10.0);
    assert_eq!(graph.to_pixel(Vec2::new(1.0, 1.0)), Vec2::new(70.0, 5.0));
}

#[test]
fn line_is_drawn_in_pixels() {
    let mut graph = centered_graph();
    graph.draw_line(Vec2::ZERO, Vec2::new(1.0, 0.0), &Color::RED, 2.0);

    assert_eq!(
        graph.context().commands(),
        &[
            DrawCommand::LineWidth { width: 2.0 },
            DrawCommand::StrokeStyle {
                style: Color::RED.to_string()
            },
            DrawCommand::BeginPath,
            DrawCommand::MoveTo { x: 100.0, y: 50.0 },
            DrawCommand::LineTo { x: 140.0, y: 50.0 },
            DrawCommand::Stroke,
        ]
    );
}

#[test]
fn filled_shape_restores_alpha() {
    let mut graph = centered_graph();
    let triangle = Shape2D::new(
        vec![Vec2::ZERO, Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)],
        Color::BLUE,
        true,
        true,
    );
    graph.draw_shape(&triangle);
    let commands = graph.context().commands();

    let fill = commands
        .iter()
        .position(|c| *c == DrawCommand::Fill)
        .expect("shape is filled");
    assert_eq!(commands[fill - 2], DrawCommand::GlobalAlpha { alpha: 0.2 });
    assert_eq!(commands[fill + 1], DrawCommand::GlobalAlpha { alpha: 1.0 });
    // closing segment back to the first point
    assert!(commands.contains(&DrawCommand::LineTo { x: 100.0, y: 50.0 }));
    assert_eq!(commands.last(), Some(&DrawCommand::Stroke));
}

#[test]
fn empty_shape_draws_nothing() {
    let mut graph = centered_graph();
    graph.draw_shape(&Shape2D::new(Vec::new(), Color::BLACK, true, true));
    assert!(graph.context().commands().is_empty());
}

#[test]
fn non_finite_samples_break_the_line() {
    let mut graph = centered_graph();
    let plot = FunctionGraph {
        points: vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, f64::NAN),
            Vec2::new(2.0, 0.0),
            Vec2::new(3.0, 0.0),
        ],
        outline_color: Color::BLACK,
        outline_width: 1.0,
    };
    graph.draw_function_graph(&plot);
    let commands = graph.context().commands();

    assert_eq!(count(commands, &DrawCommand::Stroke), 2);
    assert_eq!(count(commands, &DrawCommand::BeginPath), 2);
    assert!(commands.contains(&DrawCommand::MoveTo { x: 180.0, y: 50.0 }));
    assert!(commands.contains(&DrawCommand::LineTo { x: 220.0, y: 50.0 }));
}

#[test]
fn function_graph_covers_visible_range() {
    let graph = Graph::new(CommandRecorder::new(200.0, 100.0));
    let plot = graph.function_graph(|x| x * 2.0, Color::GREEN, 1.0, 2);

    assert_eq!(plot.points.len(), 7);
    assert_eq!(plot.points.first(), Some(&Vec2::new(-1.0, -2.0)));
    assert_eq!(plot.points.last(), Some(&Vec2::new(5.0, 10.0)));

    assert!(
        graph
            .function_graph_expression("x +", Color::GREEN, 1.0, 2)
            .is_err()
    );
}

#[test]
fn number_line_labels_within_bounds() {
    let mut graph = centered_graph();
    let line = NumberLine {
        min: -1.0,
        max: 1.0,
        ..NumberLine::default()
    };
    graph.draw_number_line_x(&line).expect("labels drawn");

    let labels: Vec<(String, f64, f64)> = graph
        .context()
        .commands()
        .iter()
        .filter_map(|command| match command {
            DrawCommand::FillText { text, x, y } => Some((text.clone(), *x, *y)),
            _ => None,
        })
        .collect();
    assert_eq!(
        labels,
        vec![
            ("-1".to_owned(), 60.0, 50.0),
            ("0".to_owned(), 100.0, 50.0),
            ("1".to_owned(), 140.0, 50.0),
        ]
    );
}

#[test]
fn zero_step_grid_draws_nothing() {
    let mut graph = centered_graph();
    graph.draw_grid(0.0, 1.0, &Color::BLACK);
    assert!(graph.context().commands().is_empty());
}

#[test]
fn sub_pixel_scale_draws_no_grid_or_labels() {
    let mut graph = centered_graph();
    graph.set_scale(1e-9, -1e-9);

    graph.draw_grid(1.0, 1.0, &Color::BLACK);
    assert!(graph.context().commands().is_empty());

    graph.draw_number_line_x(&NumberLine::default()).expect("no labels");
    graph.draw_number_line_y(&NumberLine::default()).expect("no labels");
    assert!(
        !graph
            .context()
            .commands()
            .iter()
            .any(|c| matches!(c, DrawCommand::FillText { .. }))
    );

    let plot = graph.function_graph(|x| x, Color::BLACK, 0.01, 2);
    assert!(plot.points.is_empty());
    let plot = graph
        .function_graph_expression("sin(x)", Color::BLACK, 0.01, 2)
        .expect("valid expression");
    assert!(plot.points.is_empty());
}

#[test]
fn far_translation_stays_bounded() {
    let mut graph = Graph::new(CommandRecorder::new(200.0, 100.0));
    graph.set_translation(-4e18, 0.0);

    let plot = graph.function_graph(|x| x, Color::BLACK, 0.01, 2);
    assert!(!plot.points.is_empty());
    assert!(plot.points.len() <= MAX_SAMPLES + 1);

    graph.context_mut().clear();
    graph.draw_grid(1.0, 1.0, &Color::BLACK);
    let moves = graph
        .context()
        .commands()
        .iter()
        .filter(|c| matches!(c, DrawCommand::MoveTo { .. }))
        .count();
    assert!(moves > 0 && moves <= 12, "{moves} grid lines");
}

#[test]
fn points_use_arcs() {
    let mut graph = centered_graph();
    graph
        .draw_point(Vec2::new(1.0, 0.0), &Color::RED, 7.0)
        .expect("valid radius");
    assert!(graph.context().commands().contains(&DrawCommand::Arc {
        x: 140.0,
        y: 50.0,
        radius: 7.0,
        start_angle: 0.0,
        end_angle: std::f64::consts::TAU,
    }));

    graph.context_mut().clear();
    let error = graph
        .draw_point(Vec2::ZERO, &Color::RED, -1.0)
        .expect_err("negative radius");
    assert!(matches!(error, RenderError::InvalidArgument { .. }));
    assert!(
        !graph
            .context()
            .commands()
            .iter()
            .any(|c| matches!(c, DrawCommand::Arc { .. }))
    );
}

#[test]
fn sprite_resets_transform_even_without_texture() {
    let mut graph = centered_graph();
    let sprite = Sprite::new("missing", Vec2::ZERO);
    let error = graph.draw_sprite(&sprite).expect_err("texture not registered");
    assert_eq!(error, RenderError::UnknownTexture("missing".to_owned()));
    assert_eq!(
        graph.context().commands().last(),
        Some(&DrawCommand::ResetTransform)
    );

    graph.context_mut().clear();
    graph.context_mut().register_texture("ball");
    graph
        .draw_sprite(&Sprite::new("ball", Vec2::ZERO))
        .expect("registered texture");
    assert!(graph.context().commands().contains(&DrawCommand::DrawImage {
        texture: "ball".to_owned(),
        x: 100.0,
        y: 50.0,
        width: 40.0,
        height: -40.0,
    }));
}

#[test]
fn scene_faces_are_closed_polygons() {
    let mut graph = centered_graph();
    let mesh = Mesh3D::from_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n", Color::RED).expect("valid obj");
    let scene = Scene3D::new(vec![mesh], Mat3x3::identity());
    graph.draw_scene3d(&scene);

    let style = Color::RED.to_string();
    assert_eq!(
        graph.context().commands(),
        &[
            DrawCommand::LineWidth { width: 1.0 },
            DrawCommand::BeginPath,
            DrawCommand::MoveTo { x: 100.0, y: 50.0 },
            DrawCommand::LineTo { x: 140.0, y: 50.0 },
            DrawCommand::LineTo { x: 100.0, y: 10.0 },
            DrawCommand::LineTo { x: 100.0, y: 50.0 },
            DrawCommand::FillStyle {
                style: style.clone()
            },
            DrawCommand::Fill,
            DrawCommand::StrokeStyle { style },
            DrawCommand::Stroke,
        ]
    );
}

#[test]
fn drawable_dispatch() {
    let mut graph = centered_graph();
    let text = Text2D::new("hi", Vec2::new(0.0, 1.0));
    graph.draw(&Drawable::from(text)).expect("text drawn");

    let commands = graph.context().commands();
    assert!(commands.contains(&DrawCommand::Font {
        font: "30px arial".to_owned()
    }));
    assert_eq!(
        commands.last(),
        Some(&DrawCommand::FillText {
            text: "hi".to_owned(),
            x: 100.0,
            y: 10.0
        })
    );
}
