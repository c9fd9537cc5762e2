use std::io::Cursor;

use approx::assert_relative_eq;
use shadery::colors::unpack_rgba;
use shadery::prelude::*;
use shadery::{CameraError, LoadError, RenderError};

const WHITE: [u8; 4] = [255, 255, 255, 255];
const AMBIENT_ONLY: [u8; 4] = [5, 5, 5, 255];

fn obj(text: &str) -> CenteredMesh {
    let (mesh, _) = load_obj_from_reader(&mut Cursor::new(text.as_bytes()), "scene.obj").unwrap();
    mesh.center_align()
}

fn matte(height: u32, scale: f32) -> RenderConfig {
    RenderConfig {
        height,
        scale,
        specular: 0.0,
        ..RenderConfig::default()
    }
}

fn color_at(frame: &Frame, x: u32, y: u32) -> [u8; 4] {
    unpack_rgba(frame.renderer.pixel(x, y).unwrap())
}

const UNIT_TRIANGLE: &str = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";

#[test]
fn unit_triangle_facing_light_is_fully_lit() {
    let mesh = obj(UNIT_TRIANGLE);
    let engine = Engine::new(matte(100, 1.5)).unwrap();
    let frame = engine.render(&mesh, None).unwrap();

    assert_eq!(frame.renderer.width(), 100);
    assert_eq!(frame.renderer.height(), 100);
    // Corners land on (16, 16), (83, 16) and (16, 83).
    assert_eq!(color_at(&frame, 30, 30), WHITE);
    assert_eq!(color_at(&frame, 16, 16), WHITE);
    assert_eq!(frame.renderer.pixel(80, 80), Some(0));
    assert_eq!(frame.renderer.pixel(5, 5), Some(0));
}

#[test]
fn every_shading_model_agrees_on_a_flat_face() {
    let mesh = obj(UNIT_TRIANGLE);
    for shading in [ShadingMode::Flat, ShadingMode::Gouraud, ShadingMode::Phong] {
        let engine = Engine::new(RenderConfig {
            shading,
            ..matte(100, 1.5)
        })
        .unwrap();
        let frame = engine.render(&mesh, None).unwrap();
        assert_eq!(color_at(&frame, 30, 30), WHITE, "{shading:?}");
    }
}

#[test]
fn canvas_width_follows_aspect_ratio() {
    let mesh = obj("v 0 0 0\nv 1 0 0\nv 0 2 0\nf 1 2 3\n");
    assert_relative_eq!(mesh.aspect_ratio().unwrap(), 0.5);

    let frame = Engine::new(matte(100, 1.5)).unwrap().render(&mesh, None).unwrap();
    assert_eq!(frame.renderer.width(), 50);
    assert_eq!(frame.renderer.height(), 100);
}

#[test]
fn nearer_triangle_wins_regardless_of_order() {
    // A lit triangle at z = 0.5 and a back-facing one behind it at z = -0.5.
    let near = "v 0 0 0.5\nv 1 0 0.5\nv 0 1 0.5\n";
    let far = "v 0 0 -0.5\nv 0 1 -0.5\nv 1 0 -0.5\n";
    let engine = Engine::new(matte(100, 1.5)).unwrap();

    for text in [
        format!("{near}{far}f 1 2 3\nf 4 5 6\n"),
        format!("{near}{far}f 4 5 6\nf 1 2 3\n"),
    ] {
        let frame = engine.render(&obj(&text), None).unwrap();
        assert_eq!(color_at(&frame, 30, 30), WHITE);
        assert_relative_eq!(frame.renderer.depth(30, 30).unwrap(), 0.5, epsilon = 1e-4);
    }

    let frame = engine
        .render(&obj(&format!("{far}f 1 2 3\n")), None)
        .unwrap();
    assert_eq!(color_at(&frame, 30, 30), AMBIENT_ONLY);
}

#[test]
fn textured_obj_samples_its_texture() {
    let mesh = obj(
        "v 0 0 0\nv 1 0 0\nv 0 1 0\n\
         vt 0 0\nvt 1 0\nvt 0 1\n\
         f 1/1 2/2 3/3\n",
    );
    let mut img = image::RgbaImage::new(1, 1);
    img.put_pixel(0, 0, image::Rgba([40, 80, 120, 255]));
    let texture = Texture::from_image(&img).unwrap();

    let frame = Engine::new(matte(100, 1.5))
        .unwrap()
        .render(&mesh, Some(&texture))
        .unwrap();
    assert_eq!(frame.stats.textured, 1);
    assert_eq!(color_at(&frame, 30, 30), [45, 85, 125, 255]);
}

#[test]
fn malformed_obj_is_rejected() {
    let err = load_obj_from_reader(
        &mut Cursor::new("v 0 0 0\nv 1 0.0.0 0\nv 0 1 0\nf 1 2 3\n".as_bytes()),
        "bad.obj",
    )
    .unwrap_err();
    assert!(matches!(err, LoadError::Obj { .. }));
    assert!(format!("{err}").contains("bad.obj"));
}

#[test]
fn face_past_last_vertex_is_rejected() {
    let result = load_obj_from_reader(
        &mut Cursor::new("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 4\n".as_bytes()),
        "short.obj",
    );
    assert!(result.is_err());
}

#[test]
fn degenerate_cameras_are_rejected() {
    let coincident = RenderConfig {
        eye: Vec3::ZERO,
        ..RenderConfig::default()
    };
    assert!(matches!(
        Engine::new(coincident),
        Err(RenderError::Camera(CameraError::CoincidentEyeCenter))
    ));

    let parallel = RenderConfig {
        eye: Vec3::UP,
        ..RenderConfig::default()
    };
    assert!(matches!(
        Engine::new(parallel),
        Err(RenderError::Camera(CameraError::UpParallelToView))
    ));
}

#[test]
fn edge_on_view_draws_nothing() {
    let mesh = obj(UNIT_TRIANGLE);
    let engine = Engine::new(RenderConfig {
        eye: Vec3::RIGHT,
        ..matte(100, 1.5)
    })
    .unwrap();
    let frame = engine.render(&mesh, None).unwrap();

    assert_eq!(frame.stats.degenerate, 1);
    assert_eq!(frame.stats.pixels, 0);
    assert!(frame.renderer.color_buffer().iter().all(|&c| c == 0));
}

#[test]
fn rendering_does_not_change_the_mesh() {
    let mesh = obj(UNIT_TRIANGLE);
    let before = mesh.original_vertices().to_vec();

    let front = Engine::new(matte(64, 1.5)).unwrap();
    let first = front.render(&mesh, None).unwrap();

    let side = Engine::new(RenderConfig {
        eye: Vec3::new(1.0, 0.5, 1.0),
        ..matte(64, 1.5)
    })
    .unwrap();
    side.render(&mesh, None).unwrap();

    assert_eq!(mesh.original_vertices(), &before[..]);
    let again = front.render(&mesh, None).unwrap();
    assert_eq!(first.renderer.color_buffer(), again.renderer.color_buffer());
}

#[test]
fn png_is_flipped_so_y_points_up() {
    let mesh = obj(UNIT_TRIANGLE);
    let frame = Engine::new(matte(100, 1.5)).unwrap().render(&mesh, None).unwrap();

    let path = std::env::temp_dir().join(format!("shadery-flip-{}.png", std::process::id()));
    frame.renderer.save_png(&path).unwrap();
    let img = image::open(&path).unwrap().to_rgba8();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(img.dimensions(), (100, 100));
    // Buffer row 19 is image row 80.
    assert_eq!(img.get_pixel(75, 80).0, WHITE);
    assert_eq!(img.get_pixel(75, 19).0, [0, 0, 0, 0]);
}

#[test]
fn flat_mesh_too_wide_for_canvas_is_an_error() {
    // Aspect 5000 at the default height of 1000.
    let mesh = obj("v 0 0 0\nv 10 0 0\nv 0 0.002 0\nf 1 2 3\n");
    let engine = Engine::new(RenderConfig::default()).unwrap();
    assert!(matches!(
        engine.render(&mesh, None),
        Err(RenderError::CanvasTooLarge { height: 1000, .. })
    ));
}

#[test]
fn thin_tall_mesh_gets_an_empty_canvas_error() {
    let mesh = obj("v 0 0 0\nv 0.0001 0 0\nv 0 1 0\nf 1 2 3\n");
    let engine = Engine::new(matte(1000, 1.5)).unwrap();
    assert!(matches!(
        engine.render(&mesh, None),
        Err(RenderError::EmptyCanvas { width: 0, height: 1000 })
    ));
}

#[test]
fn unreferenced_vertex_widens_canvas() {
    let (mesh, report) = load_obj_from_reader(
        &mut Cursor::new("v 0 0 0\nv 1 0 0\nv 0 1 0\nv 4 2 0\nf 1 2 3\n".as_bytes()),
        "stray.obj",
    )
    .unwrap();
    assert_eq!(report.vertices, 4);

    let frame = Engine::new(matte(100, 1.5))
        .unwrap()
        .render(&mesh.center_align(), None)
        .unwrap();
    assert_eq!(frame.renderer.width(), 200);
    // The triangle sits in the lower-left of a frame spanning the stray
    // vertex: corners at (33, 16), (66, 16) and (33, 50).
    assert_eq!(color_at(&frame, 40, 20), WHITE);
    assert_eq!(frame.renderer.pixel(70, 60), Some(0));
    assert_eq!(frame.renderer.pixel(150, 80), Some(0));
}

#[test]
fn empty_texture_image_is_rejected() {
    assert!(Texture::from_image(&image::RgbaImage::new(0, 0)).is_err());
}
