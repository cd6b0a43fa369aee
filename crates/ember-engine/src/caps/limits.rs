use crate::backend::{Backend, Source};

/// Logs the limits of `source`.
///
/// A failed query is skipped without a report and yields `None`; it never
/// fails the caller.
pub fn report_limits<B: Backend>(backend: &B, source: Source<'_, B>) -> Option<wgpu::Limits> {
    let (limits, signal) = backend.limits(source);
    if !signal.succeeded() {
        return None;
    }

    log::info!("{} limits:", source.label());
    for line in format_limits(&limits) {
        log::info!(" - {line}");
    }

    Some(limits)
}

fn format_limits(limits: &wgpu::Limits) -> Vec<String> {
    vec![
        format!("maxTextureDimension1D: {}", limits.max_texture_dimension_1d),
        format!("maxTextureDimension2D: {}", limits.max_texture_dimension_2d),
        format!("maxTextureDimension3D: {}", limits.max_texture_dimension_3d),
        format!("maxTextureArrayLayers: {}", limits.max_texture_array_layers),
        format!("maxBindGroups: {}", limits.max_bind_groups),
        format!("maxBufferSize: {}", limits.max_buffer_size),
        format!(
            "maxComputeWorkgroupStorageSize: {}",
            limits.max_compute_workgroup_storage_size
        ),
        format!(
            "maxComputeInvocationsPerWorkgroup: {}",
            limits.max_compute_invocations_per_workgroup
        ),
    ]
}
