//! Text scene file parser.
//!
//! One object per line: a tag followed by whitespace-separated numbers.
//! Blank lines and lines starting with `#` are skipped.
//!
//! # Supported Syntax
//!
//! - `cam px py pz  lx ly lz  ux uy uz  screen_distance screen_width`
//! - `set r g b  root_number_shadow_rays max_recursions`
//! - `mtl dr dg db  sr sg sb  rr rg rb  shininess transparency`
//! - `sph cx cy cz radius material`
//! - `pln nx ny nz offset material`
//! - `box cx cy cz scale material`
//! - `lgt px py pz  r g b  specular_intensity shadow_intensity radius`
//!
//! Material indices are 1-based and must refer to an earlier `mtl` line.

use std::path::Path;

use log::{debug, info, warn};
use phos_math::DVec3;
use thiserror::Error;

use crate::scene::{Camera, Light, Material, Primitive, Scene, SceneError, SceneSettings};

/// Errors that can occur while reading a scene file.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown object type '{tag}' at line {line}")]
    UnknownObject { line: usize, tag: String },

    #[error("'{tag}' at line {line} expects {expected} parameters, found {found}")]
    ParameterCount {
        line: usize,
        tag: String,
        expected: usize,
        found: usize,
    },

    #[error("Invalid number '{token}' at line {line}")]
    InvalidNumber { line: usize, token: String },

    #[error("Line {line}: {message}")]
    InvalidValue { line: usize, message: String },

    #[error("Invalid scene: {0}")]
    Scene(#[from] SceneError),
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Read and validate a scene file.
pub fn load_scene<P: AsRef<Path>>(path: P) -> ParseResult<Scene> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let scene = parse_scene(&content)?;

    info!(
        "Loaded {}: {} materials, {} surfaces, {} lights",
        path.display(),
        scene.material_count(),
        scene.surface_count(),
        scene.light_count()
    );

    Ok(scene)
}

/// Parse scene file contents and validate the result.
pub fn parse_scene(content: &str) -> ParseResult<Scene> {
    let mut camera = None;
    let mut settings = None;
    let mut materials = Vec::new();
    let mut primitives = Vec::new();
    let mut lights = Vec::new();

    for (index, raw) in content.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut tokens = trimmed.split_whitespace();
        let Some(tag) = tokens.next() else {
            continue;
        };
        let params = tokens
            .map(|token| {
                token.parse::<f64>().map_err(|_| ParseError::InvalidNumber {
                    line,
                    token: token.to_string(),
                })
            })
            .collect::<ParseResult<Vec<f64>>>()?;

        let fields = Fields {
            line,
            tag,
            params: &params,
        };

        match tag {
            "cam" => {
                let p = fields.expect(11)?;
                if camera.is_some() {
                    warn!("Line {line}: camera redefined, the last definition wins");
                }
                camera = Some(Camera {
                    position: vec3(&p[0..3]),
                    look_at: vec3(&p[3..6]),
                    up_vector: vec3(&p[6..9]),
                    screen_distance: p[9],
                    screen_width: p[10],
                });
            }
            "set" => {
                let p = fields.expect(5)?;
                if settings.is_some() {
                    warn!("Line {line}: settings redefined, the last definition wins");
                }
                settings = Some(SceneSettings {
                    background_color: vec3(&p[0..3]),
                    root_number_shadow_rays: fields.count(p[3], "root number of shadow rays")?,
                    max_recursions: fields.count(p[4], "max recursions")?,
                });
            }
            "mtl" => {
                let p = fields.expect(11)?;
                materials.push(Material {
                    diffuse_color: vec3(&p[0..3]),
                    specular_color: vec3(&p[3..6]),
                    reflection_color: vec3(&p[6..9]),
                    shininess: p[9],
                    transparency: p[10],
                });
            }
            "sph" => {
                let p = fields.expect(5)?;
                primitives.push(Primitive::Sphere {
                    center: vec3(&p[0..3]),
                    radius: p[3],
                    material: fields.material(p[4], materials.len())?,
                });
            }
            "pln" => {
                let p = fields.expect(5)?;
                primitives.push(Primitive::Plane {
                    normal: vec3(&p[0..3]),
                    offset: p[3],
                    material: fields.material(p[4], materials.len())?,
                });
            }
            "box" => {
                let p = fields.expect(5)?;
                primitives.push(Primitive::Cube {
                    center: vec3(&p[0..3]),
                    scale: p[3],
                    material: fields.material(p[4], materials.len())?,
                });
            }
            "lgt" => {
                let p = fields.expect(9)?;
                lights.push(Light {
                    position: vec3(&p[0..3]),
                    color: vec3(&p[3..6]),
                    specular_intensity: p[6],
                    shadow_intensity: p[7],
                    radius: p[8],
                });
            }
            _ => {
                return Err(ParseError::UnknownObject {
                    line,
                    tag: tag.to_string(),
                })
            }
        }

        debug!("Line {line}: parsed '{tag}'");
    }

    let mut scene = Scene::new(
        camera.ok_or(SceneError::MissingCamera)?,
        settings.ok_or(SceneError::MissingSettings)?,
    );
    for material in materials {
        scene.add_material(material);
    }
    for primitive in primitives {
        scene.add_primitive(primitive);
    }
    for light in lights {
        scene.add_light(light);
    }

    scene.validate()?;
    Ok(scene)
}

fn vec3(p: &[f64]) -> DVec3 {
    DVec3::new(p[0], p[1], p[2])
}

/// The numeric fields of one scene line.
struct Fields<'a> {
    line: usize,
    tag: &'a str,
    params: &'a [f64],
}

impl<'a> Fields<'a> {
    fn expect(&self, expected: usize) -> ParseResult<&'a [f64]> {
        if self.params.len() == expected {
            Ok(self.params)
        } else {
            Err(ParseError::ParameterCount {
                line: self.line,
                tag: self.tag.to_string(),
                expected,
                found: self.params.len(),
            })
        }
    }

    /// A non-negative whole number written as a float.
    fn count(&self, value: f64, what: &str) -> ParseResult<u32> {
        if value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as f64 {
            Ok(value as u32)
        } else {
            Err(ParseError::InvalidValue {
                line: self.line,
                message: format!("{what} must be a non-negative integer, got {value}"),
            })
        }
    }

    /// Convert a 1-based material reference into an index.
    fn material(&self, value: f64, declared: usize) -> ParseResult<usize> {
        let index = self.count(value, "material index")? as usize;
        if index == 0 || index > declared {
            return Err(ParseError::InvalidValue {
                line: self.line,
                message: format!(
                    "material {index} is not defined ({declared} materials declared so far)"
                ),
            });
        }
        Ok(index - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phos_math::Color;

    const SIMPLE_SCENE: &str = "
# Camera: position, look at, up, screen distance, screen width
cam 0 10 -10   0 0 0   0 1 0   1.4 1
set 1 1 1   5 10

mtl 0.95 0.07 0.07   1 1 1   0.2 0.1 0.1   30 0
mtl 0.1 0.1 0.1      1 1 1   0 0 0         50 0.5

sph -2 1 0   1   1
pln 0 1 0   -1   2
box 2 1 0   1.5  1

lgt 0 3 0   0.9 0.9 0.9   1 0.85 1
";

    #[test]
    fn test_parse_simple_scene() {
        let scene = parse_scene(SIMPLE_SCENE).expect("scene parses");

        assert_eq!(scene.camera.position, DVec3::new(0.0, 10.0, -10.0));
        assert_eq!(scene.camera.screen_distance, 1.4);
        assert_eq!(scene.settings.background_color, Color::ONE);
        assert_eq!(scene.settings.root_number_shadow_rays, 5);
        assert_eq!(scene.settings.max_recursions, 10);

        assert_eq!(scene.material_count(), 2);
        assert_eq!(scene.surface_count(), 3);
        assert_eq!(scene.light_count(), 1);

        assert_eq!(scene.materials[1].transparency, 0.5);
        assert_eq!(
            scene.primitives[1],
            Primitive::Plane {
                normal: DVec3::Y,
                offset: -1.0,
                material: 1,
            }
        );
        assert_eq!(scene.primitives[2].material(), 0);
        assert_eq!(scene.lights[0].shadow_intensity, 0.85);
    }

    #[test]
    fn test_unknown_object_type() {
        let content = "cam 0 0 -5 0 0 0 0 1 0 1 1\nset 0 0 0 1 3\ncyl 0 0 0 1 1\n";
        match parse_scene(content) {
            Err(ParseError::UnknownObject { line, tag }) => {
                assert_eq!(line, 3);
                assert_eq!(tag, "cyl");
            }
            other => panic!("expected unknown object error, got {other:?}"),
        }
    }

    #[test]
    fn test_wrong_parameter_count() {
        let content = "cam 0 0 -5 0 0 0 0 1 0 1\n";
        assert!(matches!(
            parse_scene(content),
            Err(ParseError::ParameterCount {
                line: 1,
                expected: 11,
                found: 10,
                ..
            })
        ));
    }

    #[test]
    fn test_invalid_number() {
        let content = "set 0 0 zero 1 3\n";
        assert!(matches!(
            parse_scene(content),
            Err(ParseError::InvalidNumber { line: 1, .. })
        ));
    }

    #[test]
    fn test_material_must_be_declared_first() {
        let content = "cam 0 0 -5 0 0 0 0 1 0 1 1\nset 0 0 0 1 3\nsph 0 0 0 1 1\n";
        assert!(matches!(
            parse_scene(content),
            Err(ParseError::InvalidValue { line: 3, .. })
        ));
    }

    #[test]
    fn test_fractional_shadow_rays_rejected() {
        let content = "cam 0 0 -5 0 0 0 0 1 0 1 1\nset 0 0 0 2.5 3\n";
        assert!(matches!(
            parse_scene(content),
            Err(ParseError::InvalidValue { line: 2, .. })
        ));
    }

    #[test]
    fn test_missing_camera() {
        let content = "set 0 0 0 1 3\n";
        assert!(matches!(
            parse_scene(content),
            Err(ParseError::Scene(SceneError::MissingCamera))
        ));
    }

    #[test]
    fn test_invariants_checked_after_parsing() {
        let content = "cam 0 0 -5 0 0 0 0 1 0 1 1\nset 0 0 0 1 3\nmtl 2 0 0 0 0 0 0 0 0 1 0\n";
        assert!(matches!(
            parse_scene(content),
            Err(ParseError::Scene(SceneError::Invalid { .. }))
        ));
    }

    #[test]
    fn test_bundled_scenes_parse() {
        for content in [
            include_str!("../../../scenes/pool.txt"),
            include_str!("../../../scenes/spheres.txt"),
        ] {
            let scene = parse_scene(content).expect("bundled scene is valid");
            assert!(scene.surface_count() > 0);
            assert!(scene.light_count() > 0);
        }
    }
}
