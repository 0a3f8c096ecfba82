//! Primary ray generation for the pinhole camera.

use glint_core::Camera;
use glint_math::Ray;

/// Ray from the eye through normalized image coordinates `(u, v)`.
///
/// `(0, 0)` is the bottom-left corner of the image plane and `(1, 1)` the
/// top-right.
pub fn camera_ray(camera: &Camera, u: f64, v: f64) -> Ray {
    let frame = camera.frame();
    let o = frame.origin();
    let q = o + (u - 0.5) * camera.width * *frame.x() + (v - 0.5) * camera.height * *frame.y()
        - camera.dist * *frame.z();
    Ray::from_segment_unbounded(o, q)
}

/// Image coordinates of sub-sample `(sub_x, sub_y)` of pixel `(x, y)`.
///
/// Each pixel is split into a regular `samples` x `samples` grid and the
/// centre of the requested cell is returned. Row 0 is the top of the image,
/// so v is flipped.
pub fn sample_uv(
    x: u32,
    y: u32,
    sub_x: u32,
    sub_y: u32,
    samples: u32,
    width: u32,
    height: u32,
) -> (f64, f64) {
    let n = samples as f64;
    let u = (x as f64 + (sub_x as f64 + 0.5) / n) / width as f64;
    let v = 1.0 - (y as f64 + (sub_y as f64 + 0.5) / n) / height as f64;
    (u, v)
}
