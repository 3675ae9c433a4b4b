//! Morph operations - Pure DOP functions
//!
//! CPU reference of the displacement-shading model. `shaders/morph.wgsl`
//! mirrors every function here; keep the two in sync.

use super::morph_data::{
    DisplacedVertex, MorphParams, ShadingParams, GLOW_COLOR, NORMAL_SAMPLE_OFFSET,
};
use crate::mesh::MeshData;
use cgmath::{InnerSpace, Vector3};
use rayon::prelude::*;

// ============================================================================
// SCALAR HELPERS
// ============================================================================

/// Cubic Hermite step between `edge0` and `edge1`.
///
/// Reversed edges give a reversed transition. Equal edges degrade to a
/// hard step at the edge instead of dividing by zero.
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge0 == edge1 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }

    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Linear blend between two colors
pub fn mix(a: Vector3<f32>, b: Vector3<f32>, t: f32) -> Vector3<f32> {
    a * (1.0 - t) + b * t
}

// ============================================================================
// VERTEX STAGE
// ============================================================================

/// Scalar displacement of `point` towards/away from the morph point
pub fn displace(point: Vector3<f32>, params: &MorphParams) -> f32 {
    let d = (params.morph - point).magnitude();
    smoothstep(params.threshold_min, params.threshold_max, params.radius - d)
}

/// Unit vector perpendicular to `v`
pub fn orthogonal(v: Vector3<f32>) -> Vector3<f32> {
    let t = if v.x.abs() > v.z.abs() {
        Vector3::new(-v.y, v.x, 0.0)
    } else {
        Vector3::new(0.0, -v.z, v.y)
    };
    t.normalize()
}

/// Displace a vertex along its normal and rebuild the normal from two
/// displaced neighbours sampled `offset` away in the tangent plane.
pub fn recompute_normal(
    position: Vector3<f32>,
    normal: Vector3<f32>,
    params: &MorphParams,
    offset: f32,
) -> DisplacedVertex {
    let displaced = position + normal * displace(position, params);

    let tangent = orthogonal(normal);
    let bitangent = normal.cross(tangent).normalize();

    let neighbour1 = position + tangent * offset;
    let neighbour2 = position + bitangent * offset;
    let displaced_neighbour1 = neighbour1 + normal * displace(neighbour1, params);
    let displaced_neighbour2 = neighbour2 + normal * displace(neighbour2, params);

    let displaced_tangent = displaced_neighbour1 - displaced;
    let displaced_bitangent = displaced_neighbour2 - displaced;
    let displaced_normal = displaced_tangent.cross(displaced_bitangent).normalize();

    // The color falloff uses a unit radius, independent of params.radius
    let distance_factor = smoothstep(
        params.threshold_min,
        params.threshold_max,
        1.0 - (params.morph - displaced).magnitude(),
    );

    DisplacedVertex {
        position: displaced,
        normal: displaced_normal,
        distance_factor,
    }
}

/// Vertex stage with the standard sampling offset
pub fn evaluate_vertex(
    position: Vector3<f32>,
    normal: Vector3<f32>,
    params: &MorphParams,
) -> DisplacedVertex {
    recompute_normal(position, normal, params, NORMAL_SAMPLE_OFFSET)
}

/// Refraction direction for a unit incident vector and unit normal.
/// Returns the zero vector on total internal reflection.
pub fn refraction_vector(incident: Vector3<f32>, normal: Vector3<f32>, eta: f32) -> Vector3<f32> {
    let n_dot_i = normal.dot(incident);
    let k = 1.0 - eta * eta * (1.0 - n_dot_i * n_dot_i);
    if k < 0.0 {
        return Vector3::new(0.0, 0.0, 0.0);
    }
    incident * eta - normal * (eta * n_dot_i + k.sqrt())
}

/// Evaluate the vertex stage for a whole mesh in parallel
pub fn displace_mesh(mesh: &MeshData, params: &MorphParams) -> Vec<DisplacedVertex> {
    mesh.vertices
        .par_iter()
        .map(|v| evaluate_vertex(Vector3::from(v.position), Vector3::from(v.normal), params))
        .collect()
}

// ============================================================================
// FRAGMENT STAGE
// ============================================================================

/// Ambient plus diffuse directional light for a normal
pub fn light_weighting(normal: Vector3<f32>, shading: &ShadingParams) -> Vector3<f32> {
    let directional = normal.normalize().dot(shading.light_direction).max(0.0);
    shading.ambient_color + shading.light_color * directional
}

/// Glow blend: `1 - 2 (1 - intensity) (1 - color)` per channel, unclamped
pub fn screen_blend(intensity: f32, color: Vector3<f32>) -> [f32; 4] {
    let k = 2.0 * (1.0 - intensity);
    [
        1.0 - k * (1.0 - color.x),
        1.0 - k * (1.0 - color.y),
        1.0 - k * (1.0 - color.z),
        1.0,
    ]
}

/// Final fragment color for an interpolated normal and distance factor
pub fn shade(normal: Vector3<f32>, distance_factor: f32, shading: &ShadingParams) -> [f32; 4] {
    let lw = light_weighting(normal, shading).magnitude();

    let mut intensity = smoothstep(-0.5, 1.0, lw.powf(20.0));
    intensity += lw * 0.2;
    intensity = intensity * 0.2 + 0.3 + 0.4 * distance_factor;

    let color = mix(
        shading.base_color,
        Vector3::from(GLOW_COLOR),
        smoothstep(0.0, 0.6, distance_factor),
    );

    screen_blend(intensity, color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::generate_torus;
    use cgmath::{Matrix3, Rad};

    const EPS: f32 = 1e-5;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < EPS
    }

    fn params_at(morph: Vector3<f32>) -> MorphParams {
        MorphParams {
            morph,
            ..Default::default()
        }
    }

    #[test]
    fn test_smoothstep_saturates_outside_edges() {
        for x in [-5.0, -1.0, -0.2] {
            assert_eq!(smoothstep(-0.2, 2.0, x), 0.0);
        }
        for x in [2.0, 2.5, 100.0] {
            assert_eq!(smoothstep(-0.2, 2.0, x), 1.0);
        }
    }

    #[test]
    fn test_smoothstep_monotonic() {
        let mut previous = 0.0;
        for i in 0..=220 {
            let x = -0.2 + i as f32 * 0.01;
            let y = smoothstep(-0.2, 2.0, x);
            assert!(y + EPS >= previous, "decreased at x={}", x);
            previous = y;
        }
    }

    #[test]
    fn test_smoothstep_degenerate_edges_is_step() {
        assert_eq!(smoothstep(0.5, 0.5, 0.4), 0.0);
        assert_eq!(smoothstep(0.5, 0.5, 0.5), 1.0);
        assert!(!smoothstep(0.5, 0.5, 0.6).is_nan());
    }

    #[test]
    fn test_smoothstep_reversed_edges() {
        // Reversed thresholds flip the transition rather than erroring
        assert_eq!(smoothstep(1.0, -1.0, 2.0), 0.0);
        assert_eq!(smoothstep(1.0, -1.0, -2.0), 1.0);
        assert!(approx(smoothstep(1.0, -1.0, 0.0), 0.5));
    }

    #[test]
    fn test_displace_unit_distance() {
        let params = params_at(Vector3::new(0.0, 0.0, 0.0));
        let value = displace(Vector3::new(1.0, 0.0, 0.0), &params);

        let t = 0.2_f32 / 2.2;
        let expected = t * t * (3.0 - 2.0 * t);
        assert!(approx(value, expected));
        assert!((value - 0.02329).abs() < 1e-4);
    }

    #[test]
    fn test_displace_at_morph_point() {
        let morph = Vector3::new(0.3, -0.1, 0.7);
        let params = params_at(morph);
        assert!(approx(displace(morph, &params), smoothstep(-0.2, 2.0, 1.0)));

        let wide = MorphParams {
            radius: 2.5,
            ..params
        };
        assert_eq!(displace(morph, &wide), 1.0);
    }

    #[test]
    fn test_displace_rotation_invariant() {
        let morph = Vector3::new(0.2, 0.5, -0.3);
        let point = Vector3::new(1.0, -0.4, 0.6);
        let rotation = Matrix3::from_axis_angle(Vector3::new(1.0, 2.0, -0.5).normalize(), Rad(1.1));

        let before = displace(point, &params_at(morph));
        let after = displace(rotation * point, &params_at(rotation * morph));
        assert!(approx(before, after));
    }

    #[test]
    fn test_orthogonal_is_perpendicular_unit() {
        for v in [
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(0.3, -0.8, 0.5).normalize(),
        ] {
            let t = orthogonal(v);
            assert!(approx(t.magnitude(), 1.0));
            assert!(t.dot(v).abs() < EPS);
        }
    }

    #[test]
    fn test_recompute_normal_unit_length() {
        let params = params_at(Vector3::new(-1.0, 0.4, 0.4));
        let mesh = generate_torus(1.0, 0.25, 24, 24).expect("valid torus");
        for v in displace_mesh(&mesh, &params) {
            assert!(approx(v.normal.magnitude(), 1.0));
            assert!((0.0..=1.0).contains(&v.distance_factor));
        }
    }

    #[test]
    fn test_recompute_normal_flat_field_keeps_normal() {
        // Morph point far away: no displacement anywhere nearby
        let params = params_at(Vector3::new(100.0, 0.0, 0.0));
        let normal = Vector3::new(0.0, 0.6, 0.8);
        let out = evaluate_vertex(Vector3::new(0.0, 1.0, 0.0), normal, &params);

        assert_eq!(out.position, Vector3::new(0.0, 1.0, 0.0));
        assert!((out.normal - normal).magnitude() < 1e-4);
        assert_eq!(out.distance_factor, 0.0);
    }

    #[test]
    fn test_recompute_normal_moves_along_normal() {
        let params = params_at(Vector3::new(0.0, 0.0, 0.0));
        let position = Vector3::new(0.5, 0.0, 0.0);
        let normal = Vector3::new(1.0, 0.0, 0.0);
        let out = evaluate_vertex(position, normal, &params);

        let expected = position + normal * displace(position, &params);
        assert!((out.position - expected).magnitude() < EPS);
        assert!(out.distance_factor > 0.0);
    }

    #[test]
    fn test_refraction_normal_incidence_passes_straight() {
        let normal = Vector3::new(0.0, 0.0, 1.0);
        let r = refraction_vector(-normal, normal, 1.02);
        assert!((r - (-normal)).magnitude() < EPS);
    }

    #[test]
    fn test_refraction_grazing_total_internal_reflection() {
        let r = refraction_vector(
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
            1.02,
        );
        assert_eq!(r, Vector3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_screen_blend_full_intensity_is_white() {
        assert_eq!(screen_blend(1.0, Vector3::new(1.0, 1.0, 1.0)), [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(screen_blend(1.0, Vector3::new(0.2, 0.4, 0.0)), [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_screen_blend_zero_intensity() {
        let color = Vector3::new(0.25, 0.5, 1.0);
        let out = screen_blend(0.0, color);
        assert!(approx(out[0], 2.0 * 0.25 - 1.0));
        assert!(approx(out[1], 0.0));
        assert!(approx(out[2], 1.0));
        assert_eq!(out[3], 1.0);
    }

    #[test]
    fn test_shade_unlit_side_ambient_only() {
        let shading = ShadingParams::default();
        // Facing away from the light: only ambient contributes
        let normal = -shading.light_direction;
        let out = shade(normal, 0.0, &shading);

        let lw = (3.0_f32 * 0.04).sqrt();
        let intensity = (7.0 / 27.0 + lw * 0.2) * 0.2 + 0.3;
        assert!(approx(out[0], 1.0));
        assert!(approx(out[1], 1.0 - 2.0 * (1.0 - intensity)));
        assert!(approx(out[2], out[1]));
        assert_eq!(out[3], 1.0);
    }

    #[test]
    fn test_shade_full_glow_is_yellow_tinted() {
        let shading = ShadingParams::default();
        let out = shade(Vector3::new(0.0, 0.0, 1.0), 1.0, &shading);

        // Fully lit: intensity exceeds 1 and the output is not clamped
        let lw = 3.0_f32.sqrt() * (0.2 + 0.93 * 3.0);
        let intensity = (1.0 + lw * 0.2) * 0.2 + 0.3 + 0.4;
        assert!(intensity > 1.0);

        // color saturates to (1, 1, 0): red and green stay at 1
        assert!(approx(out[0], 1.0));
        assert!(approx(out[1], 1.0));
        assert!(approx(out[2], 1.0 - 2.0 * (1.0 - intensity)));
        assert!(out[2] > 1.0);
    }
}
