//! Scene graph, camera, lights and the host that owns them.

use std::f32::consts::FRAC_1_PI;

use glam::{EulerRot, Mat4, Quat, Vec3};
use okascii_core::{BackdropConfig, CameraRig, LightRig};
use tracing::debug;

use crate::geometry::Mesh;
use crate::raster::Raster;

/// Emissive term of the flat-shaded material (0x22 / 0xff).
const EMISSIVE: f32 = 0x22 as f32 / 255.0;

/// Position, XYZ Euler rotation and uniform scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: f32,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: 1.0,
    };

    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    pub fn matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), rotation, self.position)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// What a scene object draws.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Flat-shaded, lit triangle mesh.
    Mesh(Mesh),
    /// Unlit line segment in object space.
    Segment { start: Vec3, end: Vec3 },
    /// Unlit single cell at the object's origin.
    Point,
}

/// A drawable owned by a [`Scene`].
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub primitive: Primitive,
    pub transform: Transform,
    /// Multiplier for meshes, absolute luminance for segments and points.
    pub brightness: f32,
}

/// Handle to an object owned by a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(usize);

/// Ownership root for every drawable of a backdrop.
#[derive(Debug, Default)]
pub struct Scene {
    root: Transform,
    objects: Vec<SceneObject>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, object: SceneObject) -> ObjectId {
        self.objects.push(object);
        ObjectId(self.objects.len() - 1)
    }

    pub fn add_mesh(&mut self, mesh: Mesh, transform: Transform) -> ObjectId {
        self.add(SceneObject {
            primitive: Primitive::Mesh(mesh),
            transform,
            brightness: 1.0,
        })
    }

    pub fn add_segment(&mut self, start: Vec3, end: Vec3, brightness: f32) -> ObjectId {
        self.add(SceneObject {
            primitive: Primitive::Segment { start, end },
            transform: Transform::IDENTITY,
            brightness,
        })
    }

    pub fn add_point(&mut self, position: Vec3, brightness: f32) -> ObjectId {
        self.add(SceneObject {
            primitive: Primitive::Point,
            transform: Transform::at(position),
            brightness,
        })
    }

    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id.0)
    }

    pub fn transform_mut(&mut self, id: ObjectId) -> Option<&mut Transform> {
        self.objects.get_mut(id.0).map(|object| &mut object.transform)
    }

    /// Move the endpoints of a segment. Other primitives are left alone.
    pub fn set_segment(&mut self, id: ObjectId, start: Vec3, end: Vec3) {
        if let Some(SceneObject {
            primitive: Primitive::Segment { start: s, end: e },
            ..
        }) = self.objects.get_mut(id.0)
        {
            *s = start;
            *e = end;
        }
    }

    /// Transform applied on top of every object.
    pub fn root(&self) -> &Transform {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Transform {
        &mut self.root
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Drop every object, returning how many were released.
    pub fn release(&mut self) -> usize {
        let released = self.objects.len();
        self.objects.clear();
        self.root = Transform::IDENTITY;
        released
    }
}

/// Perspective camera looking down -Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
}

impl Camera {
    pub fn from_rig(rig: &CameraRig, aspect: f32) -> Self {
        Self {
            fov_degrees: rig.fov_degrees,
            aspect,
            near: rig.near,
            far: rig.far,
            position: Vec3::from(rig.position),
        }
    }

    pub fn view_projection(&self) -> Mat4 {
        let projection = Mat4::perspective_rh_gl(
            self.fov_degrees.to_radians(),
            self.aspect,
            self.near,
            self.far,
        );
        let view = Mat4::look_at_rh(self.position, self.position + Vec3::NEG_Z, Vec3::Y);
        projection * view
    }
}

/// Point light without falloff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub intensity: f32,
}

/// Owns the scene, camera and lights for one mounted backdrop.
#[derive(Debug)]
pub struct SceneHost {
    scene: Scene,
    camera: Camera,
    lights: [PointLight; 2],
    width: u32,
    height: u32,
}

impl SceneHost {
    /// Set up an empty scene for a surface of `width x height` pixels.
    ///
    /// Returns `None` while the surface has no area.
    pub fn new(config: &BackdropConfig, width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        let LightRig {
            key_position,
            key_intensity,
            fill_position,
            fill_intensity,
        } = config.lights;
        Some(Self {
            scene: Scene::new(),
            camera: Camera::from_rig(&config.camera, width as f32 / height as f32),
            lights: [
                PointLight {
                    position: Vec3::from(key_position),
                    intensity: key_intensity,
                },
                PointLight {
                    position: Vec3::from(fill_position),
                    intensity: fill_intensity,
                },
            ],
            width,
            height,
        })
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn lights(&self) -> &[PointLight; 2] {
        &self.lights
    }

    /// Renderer output size in pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Match the camera and output size to the surface.
    ///
    /// A zero-sized surface keeps the previous size.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            debug!(width, height, "ignoring resize to empty surface");
            return;
        }
        self.width = width;
        self.height = height;
        self.camera.aspect = width as f32 / height as f32;
    }

    /// Draw every object into `raster`, which covers the whole surface.
    pub fn rasterize(&self, raster: &mut Raster) {
        let view_projection = self.camera.view_projection();
        let root = self.scene.root.matrix();
        let (w, h) = (raster.width() as f32, raster.height() as f32);
        let project = |world: Vec3| -> Option<Vec3> {
            let clip = view_projection * world.extend(1.0);
            if clip.w <= f32::EPSILON {
                return None;
            }
            let ndc = clip.truncate() / clip.w;
            if !(-1.0..=1.0).contains(&ndc.z) {
                return None;
            }
            Some(Vec3::new(
                (ndc.x + 1.0) * 0.5 * w,
                (1.0 - ndc.y) * 0.5 * h,
                ndc.z,
            ))
        };

        for object in &self.scene.objects {
            let model = root * object.transform.matrix();
            match &object.primitive {
                Primitive::Mesh(mesh) => {
                    for face in mesh.faces() {
                        let world = face.map(|v| model.transform_point3(v));
                        let [Some(a), Some(b), Some(c)] = world.map(project) else {
                            continue;
                        };
                        let luma = self.shade(world) * object.brightness;
                        raster.fill_triangle([a, b, c], luma.min(1.0));
                    }
                }
                Primitive::Segment { start, end } => {
                    let a = project(model.transform_point3(*start));
                    let b = project(model.transform_point3(*end));
                    if let (Some(a), Some(b)) = (a, b) {
                        raster.draw_line(a, b, object.brightness);
                    }
                }
                Primitive::Point => {
                    if let Some(p) = project(model.transform_point3(Vec3::ZERO)) {
                        raster.plot(p, object.brightness);
                    }
                }
            }
        }
    }

    /// Flat Lambert shading of a world-space face, lit from the side facing
    /// the camera.
    fn shade(&self, [a, b, c]: [Vec3; 3]) -> f32 {
        let centroid = (a + b + c) / 3.0;
        let mut normal = (b - a).cross(c - a).normalize_or_zero();
        if normal.dot(self.camera.position - centroid) < 0.0 {
            normal = -normal;
        }
        let diffuse: f32 = self
            .lights
            .iter()
            .map(|light| {
                let to_light = (light.position - centroid).normalize_or_zero();
                light.intensity * normal.dot(to_light).max(0.0)
            })
            .sum();
        (EMISSIVE + diffuse * FRAC_1_PI).clamp(0.0, 1.0)
    }

    /// Release every scene object. Returns how many were released.
    pub fn dispose(mut self) -> usize {
        let released = self.scene.release();
        debug!(released, "scene host disposed");
        released
    }
}
