/// Morph Module - Data-Oriented Programming (DOP) style
///
/// Displacement-shading model for the morphing torus:
/// - morph_data.rs: Pure data structures with NO methods
/// - morph_operations.rs: Pure functions that operate on data
///
/// The GPU pipeline in renderer/shaders/morph.wgsl evaluates the same model.

pub mod morph_data;
pub mod morph_operations;

// Re-export data structures
pub use morph_data::{
    DisplacedVertex, MorphParams, ShadingParams, DEFAULT_REFRACTION_RATIO, GLOW_COLOR,
    NORMAL_SAMPLE_OFFSET,
};

// Re-export all operations
pub use morph_operations::{
    // Scalar helpers
    mix,
    smoothstep,

    // Vertex stage
    displace,
    displace_mesh,
    evaluate_vertex,
    orthogonal,
    recompute_normal,
    refraction_vector,

    // Fragment stage
    light_weighting,
    screen_blend,
    shade,
};
