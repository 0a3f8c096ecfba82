//! JSON scene loading.
//!
//! Every key in a scene file is optional; anything left out keeps the value
//! of the stock scene (see [`Scene::default`]). Unknown keys are skipped with
//! a warning. Scalars are coerced to the type of the field they fill: integer
//! fields truncate floats, booleans accept any JSON value by truthiness.
//!
//! ```json
//! {
//!     "camera": { "eye": [0, 2, 6], "center": [0, 0, 0], "up": [0, 1, 0] },
//!     "resolution_width": 256,
//!     "resolution_height": 256,
//!     "lights": [ { "frame": { "o": [0, 5, 0] }, "intensity": [20, 20, 20] } ],
//!     "surfaces": [
//!         { "radius": 1, "material": { "kd": [1, 0, 0] } },
//!         { "frame": { "o": [0, -1, 0] }, "radius": 5, "is_quad": true }
//!     ]
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use glint_math::{Color, Direction, Frame, Point};
use serde::de::{Deserializer, Error as _};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::scene::{Camera, Geometry, Light, LightKind, Material, Scene, Surface};

/// Errors that can occur while loading a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid resolution: {width}x{height}")]
    InvalidResolution { width: u32, height: u32 },
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

type Triple = [f64; 3];

/// Keys a description did not recognise, with their values.
type Extra = BTreeMap<String, Value>;

/// Integer view of a JSON scalar, truncating toward zero.
fn int_value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let int = match &value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::Bool(b) => Some(*b as i64),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    int.ok_or_else(|| D::Error::custom(format!("expected an integer, found {}", value)))
}

fn coerce_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let int = int_value(deserializer)?;
    u32::try_from(int)
        .map_err(|_| D::Error::custom(format!("expected a non-negative integer, found {}", int)))
}

/// Integer-valued field stored as a float.
fn coerce_whole<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    int_value(deserializer).map(|int| int as f64)
}

fn coerce_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let float = match &value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    float.ok_or_else(|| D::Error::custom(format!("expected a number, found {}", value)))
}

/// Truthiness: zero, empty and null are false.
fn coerce_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => false,
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    })
}

fn collect_unknown(path: &str, extra: &Extra, out: &mut Vec<String>) {
    out.extend(extra.keys().map(|key| {
        if path.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", path, key)
        }
    }));
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct FrameDesc {
    o: Option<Triple>,
    x: Option<Triple>,
    y: Option<Triple>,
    z: Option<Triple>,
    #[serde(flatten)]
    extra: Extra,
}

impl FrameDesc {
    fn build(&self) -> Frame {
        let o = self.o.map(Point::from).unwrap_or(Point::ORIGIN);
        Frame::new(
            o,
            self.x.map(Direction::from),
            self.y.map(Direction::from),
            self.z.map(Direction::from),
        )
    }
}

#[derive(Deserialize)]
#[serde(default)]
struct MaterialDesc {
    kd: Triple,
    ks: Triple,
    #[serde(deserialize_with = "coerce_whole")]
    n: f64,
    kr: Triple,
    #[serde(flatten)]
    extra: Extra,
}

impl Default for MaterialDesc {
    fn default() -> Self {
        Self {
            kd: [1.0; 3],
            ks: [0.0; 3],
            n: 10.0,
            kr: [0.0; 3],
            extra: Extra::new(),
        }
    }
}

impl From<MaterialDesc> for Material {
    fn from(desc: MaterialDesc) -> Self {
        Material {
            kd: Color::from_array(desc.kd),
            ks: Color::from_array(desc.ks),
            n: desc.n,
            kr: Color::from_array(desc.kr),
        }
    }
}

#[derive(Deserialize)]
#[serde(default)]
struct SurfaceDesc {
    frame: FrameDesc,
    #[serde(deserialize_with = "coerce_f64")]
    radius: f64,
    #[serde(deserialize_with = "coerce_bool")]
    is_quad: bool,
    #[serde(deserialize_with = "coerce_bool")]
    is_circle: bool,
    material: MaterialDesc,
    #[serde(flatten)]
    extra: Extra,
}

impl Default for SurfaceDesc {
    fn default() -> Self {
        Self {
            frame: FrameDesc::default(),
            radius: 1.0,
            is_quad: false,
            is_circle: false,
            material: MaterialDesc::default(),
            extra: Extra::new(),
        }
    }
}

impl SurfaceDesc {
    fn build(self, index: usize) -> Surface {
        let geometry = match (self.is_quad, self.is_circle) {
            (true, circle) => {
                if circle {
                    log::warn!("Surface {} is flagged both quad and circle, using quad", index);
                }
                Geometry::Quad
            }
            (false, true) => Geometry::Circle,
            (false, false) => Geometry::Sphere,
        };
        Surface {
            frame: self.frame.build(),
            radius: self.radius,
            geometry,
            material: self.material.into(),
        }
    }
}

#[derive(Deserialize)]
#[serde(default)]
struct LightDesc {
    frame: FrameDesc,
    intensity: Triple,
    #[serde(deserialize_with = "coerce_bool")]
    is_point: bool,
    #[serde(flatten)]
    extra: Extra,
}

impl Default for LightDesc {
    fn default() -> Self {
        Self {
            frame: FrameDesc::default(),
            intensity: [1.0; 3],
            is_point: true,
            extra: Extra::new(),
        }
    }
}

impl From<LightDesc> for Light {
    fn from(desc: LightDesc) -> Self {
        Light {
            frame: desc.frame.build(),
            intensity: Color::from_array(desc.intensity),
            kind: if desc.is_point {
                LightKind::Point
            } else {
                LightKind::Directional
            },
        }
    }
}

#[derive(Deserialize)]
#[serde(default)]
struct CameraDesc {
    eye: Triple,
    center: Triple,
    up: Triple,
    #[serde(deserialize_with = "coerce_f64")]
    width: f64,
    #[serde(deserialize_with = "coerce_f64")]
    height: f64,
    #[serde(deserialize_with = "coerce_f64")]
    dist: f64,
    #[serde(flatten)]
    extra: Extra,
}

impl Default for CameraDesc {
    fn default() -> Self {
        Self {
            eye: [0.0, 0.0, 1.0],
            center: [0.0; 3],
            up: [0.0, 1.0, 0.0],
            width: 1.0,
            height: 1.0,
            dist: 1.0,
            extra: Extra::new(),
        }
    }
}

impl From<CameraDesc> for Camera {
    fn from(desc: CameraDesc) -> Self {
        Camera::new(desc.eye.into(), desc.center.into(), desc.up.into()).with_image_plane(
            desc.width,
            desc.height,
            desc.dist,
        )
    }
}

#[derive(Deserialize)]
#[serde(default)]
struct SceneDesc {
    camera: CameraDesc,
    #[serde(deserialize_with = "coerce_u32")]
    resolution_width: u32,
    #[serde(deserialize_with = "coerce_u32")]
    resolution_height: u32,
    #[serde(deserialize_with = "coerce_u32")]
    pixel_samples: u32,
    background: Triple,
    ambient: Triple,
    lights: Vec<LightDesc>,
    surfaces: Vec<SurfaceDesc>,
    #[serde(flatten)]
    extra: Extra,
}

impl Default for SceneDesc {
    fn default() -> Self {
        Self {
            camera: CameraDesc::default(),
            resolution_width: 512,
            resolution_height: 512,
            pixel_samples: 1,
            background: [0.2; 3],
            ambient: [0.2; 3],
            lights: vec![LightDesc::default()],
            surfaces: vec![SurfaceDesc::default()],
            extra: Extra::new(),
        }
    }
}

impl SceneDesc {
    /// Dotted paths of every key that matched no field.
    fn unknown_keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        collect_unknown("", &self.extra, &mut keys);
        collect_unknown("camera", &self.camera.extra, &mut keys);
        for (i, light) in self.lights.iter().enumerate() {
            let path = format!("lights[{}]", i);
            collect_unknown(&path, &light.extra, &mut keys);
            collect_unknown(&format!("{}.frame", path), &light.frame.extra, &mut keys);
        }
        for (i, surface) in self.surfaces.iter().enumerate() {
            let path = format!("surfaces[{}]", i);
            collect_unknown(&path, &surface.extra, &mut keys);
            collect_unknown(&format!("{}.frame", path), &surface.frame.extra, &mut keys);
            collect_unknown(&format!("{}.material", path), &surface.material.extra, &mut keys);
        }
        keys
    }
}

impl From<SceneDesc> for Scene {
    fn from(desc: SceneDesc) -> Self {
        Scene {
            camera: desc.camera.into(),
            resolution_width: desc.resolution_width,
            resolution_height: desc.resolution_height,
            pixel_samples: desc.pixel_samples,
            background: Color::from_array(desc.background),
            ambient: Color::from_array(desc.ambient),
            lights: desc.lights.into_iter().map(Light::from).collect(),
            surfaces: desc
                .surfaces
                .into_iter()
                .enumerate()
                .map(|(i, s)| s.build(i))
                .collect(),
        }
    }
}

/// Load a scene from a JSON file.
pub fn load_scene<P: AsRef<Path>>(path: P) -> SceneResult<Scene> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    log::debug!("Read {} bytes from {}", content.len(), path.display());
    load_scene_from_str(&content)
}

/// Load a scene from JSON text (useful for testing).
pub fn load_scene_from_str(content: &str) -> SceneResult<Scene> {
    let desc: SceneDesc = serde_json::from_str(content)?;
    for key in desc.unknown_keys() {
        log::warn!("Ignoring unknown scene key \"{}\"", key);
    }
    let scene = Scene::from(desc);
    scene.validate()?;

    log::debug!(
        "Loaded scene: {}x{} @ {} samples, {} lights, {} surfaces",
        scene.resolution_width,
        scene.resolution_height,
        scene.pixel_samples,
        scene.lights.len(),
        scene.surfaces.len()
    );

    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_math::Vector;

    #[test]
    fn test_empty_document_gives_stock_scene() {
        let scene = load_scene_from_str("{}").unwrap();
        assert_eq!(scene, Scene::default());
    }

    #[test]
    fn test_load_full_scene() {
        let json = r#"{
            "camera": { "eye": [0, 0, 5], "center": [0, 0, 0], "up": [0, 1, 0],
                        "width": 2, "height": 1.5, "dist": 2 },
            "resolution_width": 64,
            "resolution_height": 48,
            "pixel_samples": 3,
            "background": [0, 0, 0],
            "ambient": [0.1, 0.1, 0.1],
            "lights": [
                { "frame": { "o": [0, 5, 0] }, "intensity": [10, 10, 10] },
                { "frame": { "z": [0, 1, 0] }, "intensity": [0.5, 0.5, 0.5], "is_point": false }
            ],
            "surfaces": [
                { "frame": { "o": [1, 0, 0] }, "radius": 0.5,
                  "material": { "kd": [1, 0, 0], "ks": [0.5, 0.5, 0.5], "n": 50, "kr": [0.2, 0.2, 0.2] } },
                { "frame": { "o": [0, -1, 0], "z": [0, 1, 0] }, "radius": 4, "is_quad": true },
                { "radius": 2, "is_circle": true }
            ]
        }"#;

        let scene = load_scene_from_str(json).unwrap();

        assert_eq!(scene.resolution_width, 64);
        assert_eq!(scene.resolution_height, 48);
        assert_eq!(scene.pixel_samples, 3);
        assert_eq!(scene.background, Color::ZERO);
        assert_eq!(scene.camera.width, 2.0);
        assert_eq!(scene.camera.dist, 2.0);
        assert_eq!(scene.camera.eye(), Point::new(0.0, 0.0, 5.0));

        assert_eq!(scene.lights.len(), 2);
        assert_eq!(scene.lights[0].kind, LightKind::Point);
        assert_eq!(scene.lights[0].frame.origin(), Point::new(0.0, 5.0, 0.0));
        assert_eq!(scene.lights[1].kind, LightKind::Directional);
        assert!((scene.lights[1].frame.z().to_vector() - Vector::Y).length() < 1e-9);

        assert_eq!(scene.surfaces.len(), 3);
        assert_eq!(scene.surfaces[0].geometry, Geometry::Sphere);
        assert_eq!(scene.surfaces[0].material.n, 50.0);
        assert_eq!(scene.surfaces[0].material.kd, Color::new(1.0, 0.0, 0.0));
        assert_eq!(scene.surfaces[1].geometry, Geometry::Quad);
        assert_eq!(scene.surfaces[1].radius, 4.0);
        assert_eq!(scene.surfaces[2].geometry, Geometry::Circle);
        // Omitted material keeps the default
        assert_eq!(scene.surfaces[2].material, Material::default());
    }

    #[test]
    fn test_frame_axes_are_normalized() {
        let json = r#"{ "surfaces": [ { "frame": { "z": [0, 0, 3] }, "is_quad": true } ] }"#;
        let scene = load_scene_from_str(json).unwrap();
        let z = scene.surfaces[0].frame.z();
        assert!((z.length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_quad_flag_wins_over_circle() {
        let json = r#"{ "surfaces": [ { "is_quad": true, "is_circle": true } ] }"#;
        let scene = load_scene_from_str(json).unwrap();
        assert_eq!(scene.surfaces[0].geometry, Geometry::Quad);
    }

    #[test]
    fn test_empty_lists_are_kept_empty() {
        let scene = load_scene_from_str(r#"{ "lights": [], "surfaces": [] }"#).unwrap();
        assert!(scene.lights.is_empty());
        assert!(scene.surfaces.is_empty());
    }

    #[test]
    fn test_unknown_keys_are_reported() {
        let json = r#"{
            "title": "demo",
            "camera": { "fov": 45 },
            "lights": [ { "frame": { "w": [1, 0, 0] } } ],
            "surfaces": [ { "shape": "torus", "material": { "shininess": 3 } } ]
        }"#;
        let desc: SceneDesc = serde_json::from_str(json).unwrap();
        assert_eq!(
            desc.unknown_keys(),
            vec![
                "title",
                "camera.fov",
                "lights[0].frame.w",
                "surfaces[0].shape",
                "surfaces[0].material.shininess",
            ]
        );

        // Unknown keys never stop a load
        let scene = load_scene_from_str(json).unwrap();
        assert_eq!(scene.surfaces[0].geometry, Geometry::Sphere);
        assert_eq!(scene.surfaces[0].material, Material::default());
    }

    #[test]
    fn test_known_keys_leave_nothing_unknown() {
        let json = r#"{ "camera": { "eye": [0, 0, 2] }, "surfaces": [ { "radius": 2 } ] }"#;
        let desc: SceneDesc = serde_json::from_str(json).unwrap();
        assert!(desc.unknown_keys().is_empty());
    }

    #[test]
    fn test_integer_fields_truncate_floats() {
        let json = r#"{
            "resolution_width": 64.9,
            "resolution_height": 32.0,
            "pixel_samples": 2.0,
            "surfaces": [ { "material": { "n": 2.7 } } ]
        }"#;
        let scene = load_scene_from_str(json).unwrap();
        assert_eq!(scene.resolution_width, 64);
        assert_eq!(scene.resolution_height, 32);
        assert_eq!(scene.pixel_samples, 2);
        assert_eq!(scene.surfaces[0].material.n, 2.0);
    }

    #[test]
    fn test_boolean_fields_use_truthiness() {
        let json = r#"{
            "lights": [ { "is_point": 0 } ],
            "surfaces": [ { "is_quad": 1 }, { "is_circle": "yes" }, { "is_quad": [] } ]
        }"#;
        let scene = load_scene_from_str(json).unwrap();
        assert_eq!(scene.lights[0].kind, LightKind::Directional);
        assert_eq!(scene.surfaces[0].geometry, Geometry::Quad);
        assert_eq!(scene.surfaces[1].geometry, Geometry::Circle);
        assert_eq!(scene.surfaces[2].geometry, Geometry::Sphere);
    }

    #[test]
    fn test_float_fields_accept_integers() {
        let json = r#"{ "camera": { "width": 2, "dist": true }, "surfaces": [ { "radius": 3 } ] }"#;
        let scene = load_scene_from_str(json).unwrap();
        assert_eq!(scene.camera.width, 2.0);
        assert_eq!(scene.camera.dist, 1.0);
        assert_eq!(scene.surfaces[0].radius, 3.0);
    }

    #[test]
    fn test_negative_resolution_is_an_error() {
        let result = load_scene_from_str(r#"{ "resolution_width": -4 }"#);
        assert!(matches!(result, Err(SceneError::Json(_))));
    }

    #[test]
    fn test_zero_resolution_is_an_error() {
        let result = load_scene_from_str(r#"{ "resolution_width": 0 }"#);
        assert!(matches!(result, Err(SceneError::InvalidResolution { .. })));
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let result = load_scene_from_str(r#"{ "surfaces": [ "#);
        assert!(matches!(result, Err(SceneError::Json(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_scene("/nonexistent/scene.json");
        assert!(matches!(result, Err(SceneError::Io(_))));
    }
}
