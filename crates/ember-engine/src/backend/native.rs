use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use crate::observers::{
    DeviceLostReason, ErrorKind, UncapturedErrorCallback, WorkDoneCallback, WorkDoneStatus,
};

use super::{
    AdapterOptions, AdapterProperties, Backend, DeviceRequest, FeatureName, InstanceConfig,
    LimitsSignal, RequestCallback, RequestFailure, RequestStatus, Source,
};

/// `Backend` over `wgpu`.
///
/// `wgpu` exposes adapter/device acquisition as futures; they are driven to
/// completion with `pollster` inside the request call, so callbacks always fire
/// before the request returns. That needs a thread that may block, so browser
/// targets are not supported.
#[derive(Debug, Default, Copy, Clone)]
pub struct WgpuBackend;

/// Logical device together with the queue `wgpu` hands out alongside it.
pub struct WgpuDevice {
    device: wgpu::Device,
    queue: WgpuQueue,
}

impl WgpuDevice {
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue.queue
    }
}

/// Queue handle plus the work-done callbacks waiting on its submissions.
///
/// `wgpu::Queue::on_submitted_work_done` tracks the submission made before it
/// is called, and fires right away when nothing is in flight. Callbacks are
/// therefore held until a `submit` and attached from the next `poll`, so they
/// cover that submission and only run inside a progress call.
#[derive(Clone)]
pub struct WgpuQueue {
    queue: wgpu::Queue,
    work_done: Rc<RefCell<WorkDoneSlots>>,
}

#[derive(Default)]
struct WorkDoneSlots {
    registered: Vec<WorkDoneCallback>,
    submitted: Vec<WorkDoneCallback>,
}

impl WgpuQueue {
    fn new(queue: wgpu::Queue) -> Self {
        Self {
            queue,
            work_done: Rc::default(),
        }
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    fn mark_submitted(&self) {
        let mut slots = self.work_done.borrow_mut();
        let registered = std::mem::take(&mut slots.registered);
        slots.submitted.extend(registered);
    }

    fn attach_submitted(&self) {
        let submitted = std::mem::take(&mut self.work_done.borrow_mut().submitted);
        for callback in submitted {
            // wgpu only reports success; a lost device surfaces through the loss observer.
            self.queue
                .on_submitted_work_done(move || callback(WorkDoneStatus::Success));
        }
    }
}

impl Backend for WgpuBackend {
    type Instance = wgpu::Instance;
    type Adapter = wgpu::Adapter;
    type Device = WgpuDevice;
    type Queue = WgpuQueue;
    type CommandEncoder = wgpu::CommandEncoder;
    type CommandBuffer = wgpu::CommandBuffer;

    fn create_instance(&self, config: &InstanceConfig) -> Option<wgpu::Instance> {
        Some(wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: config.backends,
            ..Default::default()
        }))
    }

    fn request_adapter(
        &self,
        instance: &wgpu::Instance,
        options: &AdapterOptions,
        callback: RequestCallback<wgpu::Adapter>,
    ) {
        let outcome = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: options.power_preference,
            force_fallback_adapter: options.force_fallback_adapter,
            compatible_surface: None,
        }))
        .map_err(|e| RequestFailure::new(RequestStatus::Unavailable, e.to_string()));

        callback(outcome);
    }

    fn request_device(
        &self,
        adapter: &wgpu::Adapter,
        request: &DeviceRequest,
        callback: RequestCallback<WgpuDevice>,
    ) {
        log::debug!(
            "requesting device {:?} (queue {:?})",
            request.label,
            request.default_queue_label
        );

        let outcome = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some(request.label.as_str()),
            required_features: request.required_features.clone(),
            required_limits: request.required_limits.clone(),
            experimental_features: wgpu::ExperimentalFeatures::disabled(),
            memory_hints: wgpu::MemoryHints::Performance,
            trace: wgpu::Trace::Off,
        }));

        let outcome = match outcome {
            Ok((device, queue)) => {
                let on_lost = Arc::clone(&request.on_device_lost);
                device.set_device_lost_callback(move |reason, message| {
                    on_lost(map_lost_reason(reason), non_empty(&message));
                });
                Ok(WgpuDevice {
                    device,
                    queue: WgpuQueue::new(queue),
                })
            }
            Err(e) => Err(RequestFailure::new(RequestStatus::Error, e.to_string())),
        };

        callback(outcome);
    }

    fn set_uncaptured_error_callback(&self, device: &WgpuDevice, callback: UncapturedErrorCallback) {
        device
            .device
            .on_uncaptured_error(Arc::new(move |error: wgpu::Error| {
                let message = error.to_string();
                callback(map_error_kind(&error), non_empty(&message));
            }));
    }

    fn limits(&self, source: Source<'_, Self>) -> (wgpu::Limits, LimitsSignal) {
        // wgpu limits queries cannot fail.
        let limits = match source {
            Source::Adapter(adapter) => adapter.limits(),
            Source::Device(device) => device.device.limits(),
        };
        (limits, LimitsSignal::Bool(true))
    }

    fn enumerate_features(
        &self,
        source: Source<'_, Self>,
        dest: Option<&mut [FeatureName]>,
    ) -> usize {
        let supported = match source {
            Source::Adapter(adapter) => adapter.features(),
            Source::Device(device) => device.device.features(),
        };

        let names = FeatureName::ALL
            .into_iter()
            .filter(|name| name.to_wgpu().is_some_and(|flag| supported.contains(flag)));

        match dest {
            None => names.count(),
            Some(dest) => {
                let mut written = 0;
                for (slot, name) in dest.iter_mut().zip(names) {
                    *slot = name;
                    written += 1;
                }
                written
            }
        }
    }

    fn adapter_properties(&self, adapter: &wgpu::Adapter) -> AdapterProperties {
        let info = adapter.get_info();

        let driver_description = match (non_empty(&info.driver), non_empty(&info.driver_info)) {
            (Some(driver), Some(details)) => Some(format!("{driver} ({details})")),
            (Some(only), None) | (None, Some(only)) => Some(only.to_owned()),
            (None, None) => None,
        };

        AdapterProperties {
            vendor_id: info.vendor,
            vendor_name: vendor_name(info.vendor).map(str::to_owned),
            architecture: None,
            device_id: info.device,
            name: non_empty(&info.name).map(str::to_owned),
            driver_description,
            adapter_type: info.device_type,
            backend_type: info.backend,
        }
    }

    fn queue(&self, device: &WgpuDevice) -> WgpuQueue {
        device.queue.clone()
    }

    fn on_submitted_work_done(&self, queue: &WgpuQueue, callback: WorkDoneCallback) {
        queue.work_done.borrow_mut().registered.push(callback);
    }

    fn create_command_encoder(&self, device: &WgpuDevice, label: &str) -> wgpu::CommandEncoder {
        device
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some(label) })
    }

    fn finish(&self, encoder: wgpu::CommandEncoder) -> wgpu::CommandBuffer {
        encoder.finish()
    }

    fn submit(&self, queue: &WgpuQueue, buffer: wgpu::CommandBuffer) {
        queue.queue.submit(std::iter::once(buffer));
        queue.mark_submitted();
    }

    fn tick(&self, device: &WgpuDevice) {
        // wgpu has no separate tick entry point; a non-blocking poll flushes callbacks.
        self.poll(device);
    }

    fn poll(&self, device: &WgpuDevice) {
        if let Err(e) = device.device.poll(wgpu::PollType::Poll) {
            log::warn!("device poll failed: {e}");
        }
        device.queue.attach_submitted();
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

fn non_empty(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}

fn map_lost_reason(reason: wgpu::DeviceLostReason) -> DeviceLostReason {
    match reason {
        wgpu::DeviceLostReason::Destroyed => DeviceLostReason::Destroyed,
        _ => DeviceLostReason::Unknown,
    }
}

fn map_error_kind(error: &wgpu::Error) -> ErrorKind {
    match error {
        wgpu::Error::Validation { .. } => ErrorKind::Validation,
        wgpu::Error::OutOfMemory { .. } => ErrorKind::OutOfMemory,
        _ => ErrorKind::Internal,
    }
}

/// Vendor name for well-known PCI vendor ids.
fn vendor_name(vendor_id: u32) -> Option<&'static str> {
    let name = match vendor_id {
        0x1002 | 0x1022 => "AMD",
        0x10de => "NVIDIA",
        0x8086 => "Intel",
        0x106b => "Apple",
        0x13b5 => "ARM",
        0x5143 => "Qualcomm",
        0x1010 => "ImgTec",
        0x1414 => "Microsoft",
        0x10005 => "Mesa",
        _ => return None,
    };
    Some(name)
}
