//! Scene state owned by the render loop.
//!
//! One explicit struct holds everything mutable the loop touches: the
//! perspective camera, the live material parameters, the displaced mesh and
//! the viewport size. The tracking side only ever hands poses in; nothing
//! here reads raw sensor samples.

use crate::{
    assets::ImagePair,
    constants::{
        CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR, DEFAULT_AMBIENT_INTENSITY, DEFAULT_DISPLACEMENT_BIAS,
        DEFAULT_DISPLACEMENT_SCALE, DEFAULT_METALNESS, DEFAULT_ROUGHNESS, MESH_PLANE_HEIGHT, MESH_PLANE_WIDTH,
        MESH_UNIFORM_SCALE, NEUTRAL_CAMERA_POSITION,
    },
    depth::depth_value,
    error::{Error, Result},
};
use image::RgbaImage;
use nalgebra::{Matrix4, Perspective3, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Material parameters bound to the live scene
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialSettings {
    /// Ambient light intensity (0.0-1.0)
    pub ambient_intensity: f64,
    /// Displacement scale (0.0-30.0)
    pub displacement_scale: f64,
    /// Displacement bias (-10.0-10.0)
    pub displacement_bias: f64,
    /// Metalness (0.0-1.0)
    pub metalness: f64,
    /// Roughness (0.0-1.0)
    pub roughness: f64,
}

impl Default for MaterialSettings {
    fn default() -> Self {
        Self {
            ambient_intensity: DEFAULT_AMBIENT_INTENSITY,
            displacement_scale: DEFAULT_DISPLACEMENT_SCALE,
            displacement_bias: DEFAULT_DISPLACEMENT_BIAS,
            metalness: DEFAULT_METALNESS,
            roughness: DEFAULT_ROUGHNESS,
        }
    }
}

/// Perspective camera for the viewport
#[derive(Debug, Clone)]
pub struct SceneCamera {
    /// Camera position in world space
    pub position: Point3<f64>,
    aspect: f64,
    fovy_degrees: f64,
    near: f64,
    far: f64,
}

impl SceneCamera {
    /// Create a camera at the neutral resting pose
    #[must_use]
    pub fn new(aspect: f64) -> Self {
        Self {
            position: Point3::new(
                NEUTRAL_CAMERA_POSITION[0],
                NEUTRAL_CAMERA_POSITION[1],
                NEUTRAL_CAMERA_POSITION[2],
            ),
            aspect,
            fovy_degrees: CAMERA_FOV_DEGREES,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
        }
    }

    /// Current aspect ratio
    #[must_use]
    pub fn aspect(&self) -> f64 {
        self.aspect
    }

    /// Update the aspect ratio after a surface-size change
    pub fn set_aspect(&mut self, aspect: f64) {
        self.aspect = aspect;
    }

    /// Homogeneous projection matrix for the current aspect
    #[must_use]
    pub fn projection(&self) -> Matrix4<f64> {
        Perspective3::new(self.aspect, self.fovy_degrees.to_radians(), self.near, self.far).to_homogeneous()
    }
}

/// One vertex of the displaced plane
#[derive(Debug, Clone, Copy)]
pub struct MeshVertex {
    /// Flat plane position before displacement
    pub position: Point3<f64>,
    /// Texture coordinate
    pub uv: (f64, f64),
    /// Normalized depth in `[0,1]` sampled from the depth map
    pub displacement: f64,
}

/// Plane mesh whose vertices carry sampled depth for displacement
pub struct DisplacedMesh {
    vertices: Vec<MeshVertex>,
    indices: Vec<u32>,
    segments: (u32, u32),
    /// Transform scale: aspect-corrected vertically, then uniform
    pub scale: Vector3<f64>,
}

impl DisplacedMesh {
    /// Tessellate a plane and sample the depth map at each vertex.
    ///
    /// Displacement stays normalized here; the material's scale and bias are
    /// applied per frame so tuning them never rebuilds the mesh.
    pub fn build(depth: &RgbaImage, segments_x: u32, segments_y: u32, image_aspect: f64) -> Result<Self> {
        if segments_x == 0 || segments_y == 0 {
            return Err(Error::InvalidInput("mesh segment counts must be nonzero".to_string()));
        }

        let (depth_w, depth_h) = depth.dimensions();
        if depth_w == 0 || depth_h == 0 {
            return Err(Error::InvalidInput("depth map has zero dimensions".to_string()));
        }
        let mut vertices = Vec::with_capacity(((segments_x + 1) * (segments_y + 1)) as usize);

        for row in 0..=segments_y {
            let v = f64::from(row) / f64::from(segments_y);
            for col in 0..=segments_x {
                let u = f64::from(col) / f64::from(segments_x);

                let px = (u * f64::from(depth_w - 1)).round() as u32;
                let py = (v * f64::from(depth_h - 1)).round() as u32;
                let displacement = f64::from(depth_value(depth, px, py)) / 255.0;

                vertices.push(MeshVertex {
                    position: Point3::new((u - 0.5) * MESH_PLANE_WIDTH, (0.5 - v) * MESH_PLANE_HEIGHT, 0.0),
                    uv: (u, 1.0 - v),
                    displacement,
                });
            }
        }

        let mut indices = Vec::with_capacity((segments_x * segments_y * 6) as usize);
        let stride = segments_x + 1;
        for row in 0..segments_y {
            for col in 0..segments_x {
                let a = row * stride + col;
                let b = a + 1;
                let c = a + stride;
                let d = c + 1;
                indices.extend_from_slice(&[a, c, b, b, c, d]);
            }
        }

        Ok(Self {
            vertices,
            indices,
            segments: (segments_x, segments_y),
            scale: Vector3::new(
                MESH_UNIFORM_SCALE,
                MESH_UNIFORM_SCALE / image_aspect,
                MESH_UNIFORM_SCALE,
            ),
        })
    }

    /// Vertices with sampled displacement
    #[must_use]
    pub fn vertices(&self) -> &[MeshVertex] {
        &self.vertices
    }

    /// Triangle indices
    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Segment grid used for tessellation
    #[must_use]
    pub fn segments(&self) -> (u32, u32) {
        self.segments
    }

    /// Displaced height of a vertex under the given material parameters
    #[must_use]
    pub fn height_at(&self, index: usize, material: &MaterialSettings) -> f64 {
        let vertex = &self.vertices[index];
        material.displacement_scale * vertex.displacement + material.displacement_bias
    }
}

/// All mutable state the render loop owns
pub struct SceneState {
    /// Viewport camera
    pub camera: SceneCamera,
    /// Live material parameters; `displacement_scale` here is the
    /// panel-tunable "active" value, not what the current frame applies
    pub material: MaterialSettings,
    /// Displacement magnitude applied this frame, written by the loop
    pub applied_displacement: f64,
    /// Depth-displaced photo mesh
    pub mesh: DisplacedMesh,
    /// Render surface size in pixels
    pub viewport: (u32, u32),
}

impl SceneState {
    /// Build a scene from a loaded image pair
    pub fn new(
        images: &ImagePair,
        material: MaterialSettings,
        viewport: (u32, u32),
        segments: (u32, u32),
    ) -> Result<Self> {
        let mesh = DisplacedMesh::build(&images.depth, segments.0, segments.1, images.aspect_ratio())?;

        Ok(Self {
            camera: SceneCamera::new(f64::from(viewport.0) / f64::from(viewport.1)),
            material,
            applied_displacement: material.displacement_scale,
            mesh,
            viewport,
        })
    }

    /// Apply a surface-size change: new aspect, new viewport, nothing else
    pub fn handle_resize(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
        self.camera.set_aspect(f64::from(width) / f64::from(height));
    }

    /// Replace the photograph, rebuilding the mesh in place
    pub fn replace_images(&mut self, images: &ImagePair, segments: (u32, u32)) -> Result<()> {
        self.mesh = DisplacedMesh::build(&images.depth, segments.0, segments.1, images.aspect_ratio())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn test_pair(width: u32, height: u32) -> ImagePair {
        ImagePair::from_rasters(RgbaImage::new(width, height), RgbaImage::new(width, height)).unwrap()
    }

    #[test]
    fn test_resize_updates_aspect_and_viewport_only() {
        let pair = test_pair(4, 4);
        let mut scene = SceneState::new(&pair, MaterialSettings::default(), (800, 600), (2, 2)).unwrap();
        let position_before = scene.camera.position;

        scene.handle_resize(1920, 1080);

        assert_eq!(scene.viewport, (1920, 1080));
        assert!((scene.camera.aspect() - 1920.0 / 1080.0).abs() < f64::EPSILON);
        assert_eq!(scene.camera.position, position_before);
    }

    #[test]
    fn test_mesh_vertex_and_index_counts() {
        let pair = test_pair(8, 8);
        let mesh = DisplacedMesh::build(&pair.depth, 4, 3, 1.0).unwrap();

        assert_eq!(mesh.vertices().len(), 5 * 4);
        assert_eq!(mesh.indices().len(), 4 * 3 * 6);
        assert_eq!(mesh.segments(), (4, 3));
    }

    #[test]
    fn test_mesh_heights_follow_depth_map() {
        // Depth raster: top-left pixel bright, rest dark
        let color = RgbaImage::new(2, 2);
        let mut depth = RgbaImage::new(2, 2);
        depth.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        let pair = ImagePair::from_rasters(color, depth).unwrap();

        let mesh = DisplacedMesh::build(&pair.depth, 1, 1, 1.0).unwrap();
        let material = MaterialSettings {
            displacement_scale: 10.0,
            displacement_bias: -0.5,
            ..MaterialSettings::default()
        };

        // Inversion turned the bright corner into zero depth
        assert!((mesh.height_at(0, &material) - -0.5).abs() < 1e-12);
        // The dark corners inverted to full depth: 10 * 255/255 - 0.5
        assert!((mesh.height_at(1, &material) - 9.5).abs() < 1e-12);
    }

    #[test]
    fn test_mesh_scale_corrects_for_image_aspect() {
        let pair = test_pair(4, 2);
        let mesh = DisplacedMesh::build(&pair.depth, 2, 2, pair.aspect_ratio()).unwrap();

        assert!((mesh.scale.x - MESH_UNIFORM_SCALE).abs() < f64::EPSILON);
        assert!((mesh.scale.y - MESH_UNIFORM_SCALE / 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_segments_rejected() {
        let pair = test_pair(4, 4);
        assert!(DisplacedMesh::build(&pair.depth, 0, 4, 1.0).is_err());
    }

    #[test]
    fn test_projection_is_finite() {
        let camera = SceneCamera::new(16.0 / 9.0);
        let projection = camera.projection();
        assert!(projection.iter().all(|v| v.is_finite()));
    }
}
