use std::fmt;

use crate::observers::DeviceLostCallback;

/// Parameters for instance creation.
#[derive(Debug, Clone)]
pub struct InstanceConfig {
    /// Backends the instance may enumerate adapters from.
    ///
    /// Defaults to `WGPU_BACKEND` when set, otherwise all backends.
    pub backends: wgpu::Backends,
}

impl Default for InstanceConfig {
    fn default() -> Self {
        Self {
            backends: wgpu::Backends::from_env().unwrap_or(wgpu::Backends::all()),
        }
    }
}

/// Adapter selection options, passed through to the backend unmodified.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct AdapterOptions {
    pub power_preference: wgpu::PowerPreference,
    pub force_fallback_adapter: bool,
}

impl Default for AdapterOptions {
    fn default() -> Self {
        Self {
            power_preference: wgpu::PowerPreference::default(),
            force_fallback_adapter: false,
        }
    }
}

/// Everything a backend needs to create a logical device.
///
/// The device-loss observer travels with the request so that it is attached at
/// creation time; it is never replaced afterwards.
#[derive(Clone)]
pub struct DeviceRequest {
    pub label: String,
    pub default_queue_label: String,
    pub required_features: wgpu::Features,
    pub required_limits: wgpu::Limits,
    pub on_device_lost: DeviceLostCallback,
}

impl fmt::Debug for DeviceRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceRequest")
            .field("label", &self.label)
            .field("default_queue_label", &self.default_queue_label)
            .field("required_features", &self.required_features)
            .finish_non_exhaustive()
    }
}

/// Status carried by a failed adapter/device request.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RequestStatus {
    /// No adapter/device matches the request.
    Unavailable,
    /// The backend rejected the request.
    Error,
    /// The backend went away before answering.
    InstanceDropped,
}

/// Failure payload handed to a request callback.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RequestFailure {
    pub status: RequestStatus,
    pub message: Option<String>,
}

impl RequestFailure {
    pub fn new(status: RequestStatus, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            status,
            message: (!message.is_empty()).then_some(message),
        }
    }
}

impl fmt::Display for RequestFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{:?}: {}", self.status, message),
            None => write!(f, "{:?}", self.status),
        }
    }
}

impl std::error::Error for RequestFailure {}

/// Status enum some backends return from the limits query.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum QueryStatus {
    Success,
    Error,
}

/// Raw success signal of a limits query.
///
/// Backends disagree on the shape (a status enum or a plain boolean); callers
/// branch on [`LimitsSignal::succeeded`] only.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LimitsSignal {
    Status(QueryStatus),
    Bool(bool),
}

impl LimitsSignal {
    pub fn succeeded(self) -> bool {
        match self {
            Self::Status(status) => status == QueryStatus::Success,
            Self::Bool(ok) => ok,
        }
    }
}

/// Identity of an adapter.
///
/// String fields are optional: a backend that does not know a value leaves it
/// `None` rather than reporting an empty string.
#[derive(Debug, Clone, PartialEq)]
pub struct AdapterProperties {
    pub vendor_id: u32,
    pub vendor_name: Option<String>,
    pub architecture: Option<String>,
    pub device_id: u32,
    pub name: Option<String>,
    pub driver_description: Option<String>,
    pub adapter_type: wgpu::DeviceType,
    pub backend_type: wgpu::Backend,
}

/// Optional WebGPU features an adapter or device may expose.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum FeatureName {
    /// Placeholder for unfilled enumeration slots.
    #[default]
    Undefined,
    DepthClipControl,
    Depth32FloatStencil8,
    TimestampQuery,
    TextureCompressionBc,
    TextureCompressionEtc2,
    TextureCompressionAstc,
    IndirectFirstInstance,
    ShaderF16,
    Rg11b10UfloatRenderable,
    Bgra8UnormStorage,
    Float32Filterable,
    DualSourceBlending,
}

impl FeatureName {
    /// Every concrete feature, in WebGPU declaration order.
    pub const ALL: [FeatureName; 12] = [
        Self::DepthClipControl,
        Self::Depth32FloatStencil8,
        Self::TimestampQuery,
        Self::TextureCompressionBc,
        Self::TextureCompressionEtc2,
        Self::TextureCompressionAstc,
        Self::IndirectFirstInstance,
        Self::ShaderF16,
        Self::Rg11b10UfloatRenderable,
        Self::Bgra8UnormStorage,
        Self::Float32Filterable,
        Self::DualSourceBlending,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::DepthClipControl => "depth-clip-control",
            Self::Depth32FloatStencil8 => "depth32float-stencil8",
            Self::TimestampQuery => "timestamp-query",
            Self::TextureCompressionBc => "texture-compression-bc",
            Self::TextureCompressionEtc2 => "texture-compression-etc2",
            Self::TextureCompressionAstc => "texture-compression-astc",
            Self::IndirectFirstInstance => "indirect-first-instance",
            Self::ShaderF16 => "shader-f16",
            Self::Rg11b10UfloatRenderable => "rg11b10ufloat-renderable",
            Self::Bgra8UnormStorage => "bgra8unorm-storage",
            Self::Float32Filterable => "float32-filterable",
            Self::DualSourceBlending => "dual-source-blending",
        }
    }

    /// The matching `wgpu` feature flag, if any.
    pub fn to_wgpu(self) -> Option<wgpu::Features> {
        let flag = match self {
            Self::Undefined => return None,
            Self::DepthClipControl => wgpu::Features::DEPTH_CLIP_CONTROL,
            Self::Depth32FloatStencil8 => wgpu::Features::DEPTH32FLOAT_STENCIL8,
            Self::TimestampQuery => wgpu::Features::TIMESTAMP_QUERY,
            Self::TextureCompressionBc => wgpu::Features::TEXTURE_COMPRESSION_BC,
            Self::TextureCompressionEtc2 => wgpu::Features::TEXTURE_COMPRESSION_ETC2,
            Self::TextureCompressionAstc => wgpu::Features::TEXTURE_COMPRESSION_ASTC,
            Self::IndirectFirstInstance => wgpu::Features::INDIRECT_FIRST_INSTANCE,
            Self::ShaderF16 => wgpu::Features::SHADER_F16,
            Self::Rg11b10UfloatRenderable => wgpu::Features::RG11B10UFLOAT_RENDERABLE,
            Self::Bgra8UnormStorage => wgpu::Features::BGRA8UNORM_STORAGE,
            Self::Float32Filterable => wgpu::Features::FLOAT32_FILTERABLE,
            Self::DualSourceBlending => wgpu::Features::DUAL_SOURCE_BLENDING,
        };
        Some(flag)
    }
}

impl fmt::Display for FeatureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
