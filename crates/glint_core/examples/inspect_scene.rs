//! Example: Load and inspect a JSON scene file.
//!
//! Run with: cargo run --example inspect_scene -- scenes/spheres.json

use std::env;

use glint_core::{load_scene, Geometry};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: inspect_scene <path-to-scene.json>");
        return;
    }

    let path = &args[1];
    println!("Loading scene file: {}", path);

    match load_scene(path) {
        Ok(scene) => {
            println!(
                "\n=== {}x{} @ {}x{} samples ===",
                scene.resolution_width,
                scene.resolution_height,
                scene.pixel_samples,
                scene.pixel_samples
            );
            let (eye, center, up) = (scene.camera.eye(), scene.camera.center(), scene.camera.up());
            println!("Camera eye: ({:.2}, {:.2}, {:.2})", eye.x, eye.y, eye.z);
            println!("Camera center: ({:.2}, {:.2}, {:.2})", center.x, center.y, center.z);
            println!("Camera up: ({:.2}, {:.2}, {:.2})", up.x, up.y, up.z);
            println!("Primary rays: {}", scene.primary_ray_count());

            println!("\n--- Lights ---");
            for (i, light) in scene.lights.iter().enumerate() {
                let (label, v) = if light.is_point() {
                    ("point at", light.frame.origin().to_vector())
                } else {
                    ("directional toward", light.frame.z().to_vector())
                };
                println!(
                    "  [{}] {} ({:.2}, {:.2}, {:.2}), intensity {:?}",
                    i, label, v.x, v.y, v.z, light.intensity
                );
            }

            println!("\n--- Surfaces ---");
            for (i, surface) in scene.surfaces.iter().enumerate() {
                let o = surface.frame.origin();
                let size = match surface.geometry {
                    Geometry::Quad => "half-extent",
                    Geometry::Sphere | Geometry::Circle => "radius",
                };
                println!(
                    "  [{}] {:?} at ({:.2}, {:.2}, {:.2}), {} {:.2}, reflective: {}",
                    i,
                    surface.geometry,
                    o.x,
                    o.y,
                    o.z,
                    size,
                    surface.radius,
                    surface.material.is_reflective()
                );
            }
        }
        Err(e) => {
            eprintln!("Error loading scene file: {}", e);
        }
    }
}
