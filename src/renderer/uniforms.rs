//! GPU uniform layouts for the morph and marker shaders
//!
//! Every field is a vec4 so the Rust and WGSL layouts agree without
//! manual padding.

use crate::config::ShadingSettings;
use crate::morph::NORMAL_SAMPLE_OFFSET;
use cgmath::Vector3;

/// Must match `Morph` in morph.wgsl
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MorphUniform {
    /// xyz: morph point, w: radius
    pub morph: [f32; 4],

    /// x: threshold min, y: threshold max, z: normal sample offset,
    /// w: refraction ratio
    pub thresholds: [f32; 4],

    pub base_color: [f32; 4],
    pub light_direction: [f32; 4],
    pub light_color: [f32; 4],
    pub ambient_color: [f32; 4],
}

/// Must match `Marker` in marker.wgsl
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MarkerUniform {
    pub offset: [f32; 4],
    pub color: [f32; 4],
}

static_assertions::const_assert_eq!(std::mem::size_of::<MorphUniform>(), 96);
static_assertions::const_assert_eq!(std::mem::size_of::<MarkerUniform>(), 32);

fn extend(v: [f32; 3], w: f32) -> [f32; 4] {
    [v[0], v[1], v[2], w]
}

/// Pack the committed shading settings and this frame's morph point
pub fn build_morph_uniform(shading: &ShadingSettings, morph: Vector3<f32>) -> MorphUniform {
    MorphUniform {
        morph: [morph.x, morph.y, morph.z, shading.radius],
        thresholds: [
            shading.threshold_min,
            shading.threshold_max,
            NORMAL_SAMPLE_OFFSET,
            shading.refraction_ratio,
        ],
        base_color: extend(shading.base_color, 1.0),
        light_direction: extend(shading.dir_light_direction, 0.0),
        light_color: extend(shading.dir_light_color, 1.0),
        ambient_color: extend(shading.ambient_color, 1.0),
    }
}

/// White marker translated to the morph point
pub fn build_marker_uniform(morph: Vector3<f32>) -> MarkerUniform {
    MarkerUniform {
        offset: [morph.x, morph.y, morph.z, 0.0],
        color: [1.0, 1.0, 1.0, 1.0],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraUniform;

    #[test]
    fn test_morph_uniform_packing() {
        let shading = ShadingSettings::default();
        let uniform = build_morph_uniform(&shading, Vector3::new(-1.0, 0.4, 0.4));

        assert_eq!(uniform.morph, [-1.0, 0.4, 0.4, 1.0]);
        assert_eq!(uniform.thresholds, [-0.2, 2.0, 0.1, 1.02]);
        assert_eq!(uniform.light_direction, [2.0, 3.0, 3.0, 0.0]);
        assert_eq!(uniform.ambient_color, [0.2, 0.2, 0.2, 1.0]);

        let bytes: &[u8] = bytemuck::bytes_of(&uniform);
        assert_eq!(bytes.len(), 96);
    }

    const MORPH_WGSL: &str = include_str!("shaders/morph.wgsl");
    const MARKER_WGSL: &str = include_str!("shaders/marker.wgsl");

    fn validated_module(source: &str) -> naga::Module {
        let module = naga::front::wgsl::parse_str(source)
            .unwrap_or_else(|e| panic!("{}", e.emit_to_string(source)));
        naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::empty(),
        )
        .validate(&module)
        .unwrap_or_else(|e| panic!("{:?}", e));
        module
    }

    fn struct_size(module: &naga::Module, name: &str) -> u32 {
        module
            .types
            .iter()
            .find_map(|(_, ty)| match ty.inner {
                naga::TypeInner::Struct { span, .. } if ty.name.as_deref() == Some(name) => {
                    Some(span)
                }
                _ => None,
            })
            .unwrap_or_else(|| panic!("struct {} not found", name))
    }

    fn uniform_bindings(module: &naga::Module) -> Vec<(String, u32)> {
        let mut bindings: Vec<(String, u32)> = module
            .global_variables
            .iter()
            .filter(|(_, var)| var.space == naga::AddressSpace::Uniform)
            .filter_map(|(_, var)| {
                let binding = var.binding.as_ref()?;
                assert_eq!(binding.group, 0);
                Some((var.name.clone().unwrap_or_default(), binding.binding))
            })
            .collect();
        bindings.sort_by_key(|(_, binding)| *binding);
        bindings
    }

    fn entry_points(module: &naga::Module) -> Vec<(&str, naga::ShaderStage)> {
        module
            .entry_points
            .iter()
            .map(|ep| (ep.name.as_str(), ep.stage))
            .collect()
    }

    #[test]
    fn test_morph_shader_validates_and_matches_uniforms() {
        let module = validated_module(MORPH_WGSL);

        assert_eq!(
            struct_size(&module, "Camera") as usize,
            std::mem::size_of::<CameraUniform>()
        );
        assert_eq!(
            struct_size(&module, "Morph") as usize,
            std::mem::size_of::<MorphUniform>()
        );
        assert_eq!(
            uniform_bindings(&module),
            vec![("camera".to_string(), 0), ("params".to_string(), 1)]
        );

        let stages = entry_points(&module);
        assert!(stages.contains(&("vs_main", naga::ShaderStage::Vertex)));
        assert!(stages.contains(&("fs_main", naga::ShaderStage::Fragment)));
    }

    #[test]
    fn test_marker_shader_validates_and_matches_uniforms() {
        let module = validated_module(MARKER_WGSL);

        assert_eq!(
            struct_size(&module, "Camera") as usize,
            std::mem::size_of::<CameraUniform>()
        );
        assert_eq!(
            struct_size(&module, "Marker") as usize,
            std::mem::size_of::<MarkerUniform>()
        );
        assert_eq!(
            uniform_bindings(&module),
            vec![("camera".to_string(), 0), ("marker".to_string(), 2)]
        );

        let stages = entry_points(&module);
        for (name, stage) in [
            ("vs_marker", naga::ShaderStage::Vertex),
            ("fs_marker", naga::ShaderStage::Fragment),
            ("vs_line", naga::ShaderStage::Vertex),
            ("fs_line", naga::ShaderStage::Fragment),
        ] {
            assert!(stages.contains(&(name, stage)), "missing entry point {}", name);
        }
    }

    #[test]
    fn test_marker_uniform_follows_morph_point() {
        let uniform = build_marker_uniform(Vector3::new(0.5, -0.25, 2.0));
        assert_eq!(uniform.offset, [0.5, -0.25, 2.0, 0.0]);
        assert_eq!(uniform.color, [1.0; 4]);
    }
}
