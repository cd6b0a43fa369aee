use crate::backend::{AdapterProperties, Backend};

/// Logs the identity of `adapter` and returns the logged lines.
pub fn report_properties<B: Backend>(backend: &B, adapter: &B::Adapter) -> Vec<String> {
    let lines = format_properties(&backend.adapter_properties(adapter));

    log::info!("adapter properties:");
    for line in &lines {
        log::info!(" - {line}");
    }

    lines
}

/// Formats adapter identity, one field per line.
///
/// Absent string fields are omitted rather than printed empty.
pub fn format_properties(props: &AdapterProperties) -> Vec<String> {
    let mut lines = vec![format!("vendorID: {:#06x}", props.vendor_id)];

    if let Some(vendor_name) = &props.vendor_name {
        lines.push(format!("vendorName: {vendor_name}"));
    }
    if let Some(architecture) = &props.architecture {
        lines.push(format!("architecture: {architecture}"));
    }

    lines.push(format!("deviceID: {:#06x}", props.device_id));

    if let Some(name) = &props.name {
        lines.push(format!("name: {name}"));
    }
    if let Some(driver_description) = &props.driver_description {
        lines.push(format!("driverDescription: {driver_description}"));
    }

    lines.push(format!("adapterType: {:?}", props.adapter_type));
    lines.push(format!("backendType: {:?}", props.backend_type));

    lines
}
