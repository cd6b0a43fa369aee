//! Scripted in-memory backend used by the unit tests.
//!
//! Every handle records its creation and release in a shared event log, so
//! tests can assert ordering across the whole ownership chain. Out-of-band
//! notifications are queued and only delivered from inside `tick`, `poll` or
//! `sleep` once the caller holds a device, the way native backends behave.
//! Work-done callbacks wait for the next `submit` before they are queued.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use crate::observers::{ErrorKind, UncapturedErrorCallback, WorkDoneCallback, WorkDoneStatus};

use super::{
    AdapterOptions, AdapterProperties, Backend, DeviceRequest, FeatureName, InstanceConfig,
    LimitsSignal, RequestCallback, RequestFailure, RequestStatus, Source,
};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum Kind {
    Instance,
    Adapter,
    Device,
    Queue,
    Encoder,
    CommandBuffer,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) enum Event {
    Created(Kind),
    Released(Kind),
    AdapterRequested,
    DeviceRequested,
    AdapterCallback { success: bool },
    DeviceCallback { success: bool },
    ErrorCallbackSet,
    WorkDoneRegistered,
    FeaturesCounted,
    FeaturesFilled,
    Submitted,
    Tick,
    Poll,
    Sleep,
    DeviceLostDelivered,
    ErrorDelivered,
    WorkDoneDelivered,
}

type EventLog = Rc<RefCell<Vec<Event>>>;

/// Handle type used for every associated type of the fake backend.
#[derive(Debug)]
pub(crate) struct FakeHandle {
    kind: Kind,
    log: EventLog,
}

impl FakeHandle {
    fn new(kind: Kind, log: &EventLog) -> Self {
        log.borrow_mut().push(Event::Created(kind));
        Self {
            kind,
            log: Rc::clone(log),
        }
    }

    pub(crate) fn kind(&self) -> Kind {
        self.kind
    }
}

impl Drop for FakeHandle {
    fn drop(&mut self) {
        self.log.borrow_mut().push(Event::Released(self.kind));
    }
}

/// When request callbacks run.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum Delivery {
    /// Inside the request call.
    Immediate,
    /// During the n-th `sleep` after the request.
    AfterSleeps(u32),
}

/// What the fake answers.
#[derive(Debug, Clone)]
pub(crate) struct Script {
    pub instance: bool,
    pub adapter: bool,
    pub device: bool,
    pub delivery: Delivery,
    pub features: Vec<FeatureName>,
    pub limits_signal: LimitsSignal,
    pub properties: AdapterProperties,
    pub inject_error: Option<(ErrorKind, Option<String>)>,
    pub lose_device: bool,
}

impl Default for Script {
    fn default() -> Self {
        Self {
            instance: true,
            adapter: true,
            device: true,
            delivery: Delivery::Immediate,
            features: vec![FeatureName::DepthClipControl, FeatureName::TimestampQuery],
            limits_signal: LimitsSignal::Bool(true),
            properties: AdapterProperties {
                vendor_id: 0x10de,
                vendor_name: Some("NVIDIA".to_owned()),
                architecture: Some("ada".to_owned()),
                device_id: 0x2684,
                name: Some("Fake RTX".to_owned()),
                driver_description: Some("fake driver 1.0".to_owned()),
                adapter_type: wgpu::DeviceType::DiscreteGpu,
                backend_type: wgpu::Backend::Vulkan,
            },
            inject_error: None,
            lose_device: false,
        }
    }
}

type Deferred = Box<dyn FnOnce()>;

pub(crate) struct FakeBackend {
    script: Script,
    log: EventLog,
    deferred: RefCell<Vec<(u32, Deferred)>>,
    out_of_band: RefCell<Vec<Deferred>>,
    work_done: RefCell<Vec<WorkDoneCallback>>,
    device_live: Rc<Cell<bool>>,
    sleeps: Cell<u32>,
}

impl FakeBackend {
    pub(crate) fn new(script: Script) -> Self {
        Self {
            script,
            log: Rc::default(),
            deferred: RefCell::default(),
            out_of_band: RefCell::default(),
            work_done: RefCell::default(),
            device_live: Rc::default(),
            sleeps: Cell::new(0),
        }
    }

    pub(crate) fn events(&self) -> Vec<Event> {
        self.log.borrow().clone()
    }

    pub(crate) fn count(&self, event: &Event) -> usize {
        self.log.borrow().iter().filter(|e| *e == event).count()
    }

    /// Index of the first occurrence of `event`.
    pub(crate) fn position(&self, event: &Event) -> Option<usize> {
        self.log.borrow().iter().position(|e| e == event)
    }

    pub(crate) fn sleeps(&self) -> u32 {
        self.sleeps.get()
    }

    /// A handle that did not come from a request, for direct reporter tests.
    pub(crate) fn handle(&self, kind: Kind) -> FakeHandle {
        FakeHandle::new(kind, &self.log)
    }

    fn record(&self, event: Event) {
        self.log.borrow_mut().push(event);
    }

    fn deliver(&self, action: impl FnOnce() + 'static) {
        match self.script.delivery {
            Delivery::Immediate => action(),
            Delivery::AfterSleeps(n) => self.deferred.borrow_mut().push((n, Box::new(action))),
        }
    }

    fn queue_out_of_band(&self, action: impl FnOnce() + 'static) {
        self.out_of_band.borrow_mut().push(Box::new(action));
    }

    fn flush_out_of_band(&self) {
        let pending: Vec<Deferred> = self.out_of_band.borrow_mut().drain(..).collect();
        for action in pending {
            action();
        }
    }
}

impl Backend for FakeBackend {
    type Instance = FakeHandle;
    type Adapter = FakeHandle;
    type Device = FakeHandle;
    type Queue = FakeHandle;
    type CommandEncoder = FakeHandle;
    type CommandBuffer = FakeHandle;

    fn create_instance(&self, _config: &InstanceConfig) -> Option<FakeHandle> {
        self.script
            .instance
            .then(|| FakeHandle::new(Kind::Instance, &self.log))
    }

    fn request_adapter(
        &self,
        _instance: &FakeHandle,
        _options: &AdapterOptions,
        callback: RequestCallback<FakeHandle>,
    ) {
        self.record(Event::AdapterRequested);

        let log = Rc::clone(&self.log);
        let success = self.script.adapter;
        self.deliver(move || {
            log.borrow_mut().push(Event::AdapterCallback { success });
            let outcome = if success {
                Ok(FakeHandle::new(Kind::Adapter, &log))
            } else {
                Err(RequestFailure::new(
                    RequestStatus::Unavailable,
                    "no matching adapter",
                ))
            };
            callback(outcome);
        });
    }

    fn request_device(
        &self,
        _adapter: &FakeHandle,
        request: &DeviceRequest,
        callback: RequestCallback<FakeHandle>,
    ) {
        self.record(Event::DeviceRequested);

        if self.script.device && self.script.lose_device {
            let log = Rc::clone(&self.log);
            let on_lost = Arc::clone(&request.on_device_lost);
            self.queue_out_of_band(move || {
                log.borrow_mut().push(Event::DeviceLostDelivered);
                on_lost(crate::observers::DeviceLostReason::Unknown, Some("fake loss"));
            });
        }

        let log = Rc::clone(&self.log);
        let live = Rc::clone(&self.device_live);
        let success = self.script.device;
        self.deliver(move || {
            log.borrow_mut().push(Event::DeviceCallback { success });
            let outcome = if success {
                live.set(true);
                Ok(FakeHandle::new(Kind::Device, &log))
            } else {
                Err(RequestFailure::new(RequestStatus::Error, "limits exceeded"))
            };
            callback(outcome);
        });
    }

    fn set_uncaptured_error_callback(&self, _device: &FakeHandle, callback: UncapturedErrorCallback) {
        self.record(Event::ErrorCallbackSet);

        if let Some((kind, message)) = self.script.inject_error.clone() {
            let log = Rc::clone(&self.log);
            self.queue_out_of_band(move || {
                log.borrow_mut().push(Event::ErrorDelivered);
                callback(kind, message.as_deref());
            });
        }
    }

    fn limits(&self, _source: Source<'_, Self>) -> (wgpu::Limits, LimitsSignal) {
        (wgpu::Limits::default(), self.script.limits_signal)
    }

    fn enumerate_features(
        &self,
        _source: Source<'_, Self>,
        dest: Option<&mut [FeatureName]>,
    ) -> usize {
        let features = &self.script.features;
        match dest {
            None => {
                self.record(Event::FeaturesCounted);
                features.len()
            }
            Some(dest) => {
                self.record(Event::FeaturesFilled);
                let n = dest.len().min(features.len());
                dest[..n].copy_from_slice(&features[..n]);
                n
            }
        }
    }

    fn adapter_properties(&self, _adapter: &FakeHandle) -> AdapterProperties {
        self.script.properties.clone()
    }

    fn queue(&self, _device: &FakeHandle) -> FakeHandle {
        FakeHandle::new(Kind::Queue, &self.log)
    }

    fn on_submitted_work_done(&self, _queue: &FakeHandle, callback: WorkDoneCallback) {
        self.record(Event::WorkDoneRegistered);
        self.work_done.borrow_mut().push(callback);
    }

    fn create_command_encoder(&self, _device: &FakeHandle, _label: &str) -> FakeHandle {
        FakeHandle::new(Kind::Encoder, &self.log)
    }

    fn finish(&self, encoder: FakeHandle) -> FakeHandle {
        let buffer = FakeHandle::new(Kind::CommandBuffer, &self.log);
        drop(encoder);
        buffer
    }

    fn submit(&self, _queue: &FakeHandle, buffer: FakeHandle) {
        self.record(Event::Submitted);
        drop(buffer);

        let waiting: Vec<WorkDoneCallback> = self.work_done.borrow_mut().drain(..).collect();
        for callback in waiting {
            let log = Rc::clone(&self.log);
            self.queue_out_of_band(move || {
                log.borrow_mut().push(Event::WorkDoneDelivered);
                callback(WorkDoneStatus::Success);
            });
        }
    }

    fn tick(&self, _device: &FakeHandle) {
        self.record(Event::Tick);
        self.flush_out_of_band();
    }

    fn poll(&self, _device: &FakeHandle) {
        self.record(Event::Poll);
        self.flush_out_of_band();
    }

    fn sleep(&self, _duration: Duration) {
        self.record(Event::Sleep);
        self.sleeps.set(self.sleeps.get() + 1);

        // Only notifications for a device the caller already holds; the sleep
        // that delivers the device does not flush.
        if self.device_live.get() {
            self.flush_out_of_band();
        }

        let ready = {
            let mut deferred = self.deferred.borrow_mut();
            for (remaining, _) in deferred.iter_mut() {
                *remaining = remaining.saturating_sub(1);
            }
            let (ready, waiting): (Vec<_>, Vec<_>) =
                deferred.drain(..).partition(|(remaining, _)| *remaining == 0);
            *deferred = waiting;
            ready
        };
        for (_, action) in ready {
            action();
        }
    }
}
