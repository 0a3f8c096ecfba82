//! Simple raytracer example.
//!
//! Builds a small scene in code and saves it as `spheres.png`.

use glint_core::{Camera, Light, Material, Scene, Surface};
use glint_math::{Direction, Frame, Point};
use glint_renderer::{raytrace, Color, RenderConfig};

fn main() {
    env_logger::init();

    println!("Glint Raytracer - Spheres Example");
    println!("=================================");

    let scene = build_scene();
    let config = RenderConfig::default();

    println!(
        "Rendering {}x{} @ {}x{} samples...",
        scene.resolution_width, scene.resolution_height, scene.pixel_samples, scene.pixel_samples
    );

    let start = std::time::Instant::now();
    let image = raytrace(&scene, &config);
    println!("Rendered in {:?}", start.elapsed());

    let filename = "spheres.png";
    if let Err(e) = image.save_png(filename) {
        eprintln!("Failed to save image: {}", e);
        std::process::exit(1);
    }
    println!("Saved to {}", filename);
}

fn build_scene() -> Scene {
    let camera = Camera::new(Point::new(0.0, 1.5, 6.0), Point::new(0.0, 0.5, 0.0), Direction::Y)
        .with_image_plane(1.6, 0.9, 1.5);

    let mut scene = Scene::empty(camera)
        .with_resolution(640, 360)
        .with_pixel_samples(2)
        .with_background(Color::new(0.05, 0.05, 0.1))
        .with_ambient(Color::splat(0.1));

    // Ground
    scene.add_surface(Surface::quad(
        Frame::from_z(Point::new(0.0, -0.5, 0.0), Direction::Y),
        6.0,
        Material::diffuse(Color::splat(0.6)).with_reflection(Color::splat(0.2)),
    ));

    scene.add_surface(Surface::sphere(
        Point::new(-1.5, 0.5, 0.0),
        1.0,
        Material::diffuse(Color::new(0.8, 0.2, 0.1)).with_specular(Color::splat(0.5), 40.0),
    ));
    scene.add_surface(Surface::sphere(
        Point::new(1.5, 0.5, 0.0),
        1.0,
        Material::diffuse(Color::splat(0.1)).with_reflection(Color::splat(0.8)),
    ));
    scene.add_surface(Surface::circle(
        Frame::from_z(Point::new(0.0, 0.0, -3.0), Direction::Z),
        1.5,
        Material::diffuse(Color::new(0.2, 0.4, 0.9)),
    ));

    scene.add_light(Light::point(Point::new(3.0, 5.0, 4.0), Color::splat(40.0)));
    scene.add_light(Light::directional(Direction::from_xyz(-1.0, 1.0, 0.5), Color::splat(0.3)));

    scene
}
