//! Plain-text inventory report.

use std::collections::HashSet;

use dwellhub_domain::error::DwellHubError;

use crate::wiring::Services;

/// Render every dwelling with its hubs and devices, then hubs not installed
/// anywhere, then devices not paired to any hub.
///
/// # Errors
///
/// Returns an error propagated from the services.
pub fn render(services: &Services) -> Result<String, DwellHubError> {
    let mut lines = Vec::new();
    let mut placed_hubs = HashSet::new();

    for dwelling in services.dwellings.list_dwellings()? {
        let id = dwelling.require_id()?;
        lines.push(format!("dwelling {id} ({})", dwelling.state()));
        for hub in dwelling.hubs() {
            let hub_id = hub.require_id()?;
            placed_hubs.insert(hub_id.clone());
            lines.push(format!("  hub {hub_id}"));
            lines.extend(hub.devices().map(|device| format!("    {device}")));
        }
    }

    let loose_hubs: Vec<_> = services
        .hubs
        .list_hubs()?
        .into_iter()
        .filter(|hub| hub.id.as_ref().is_some_and(|id| !placed_hubs.contains(id)))
        .collect();
    if !loose_hubs.is_empty() {
        lines.push("hubs without dwelling".to_string());
        for hub in &loose_hubs {
            lines.push(format!("  hub {}", hub.require_id()?));
            lines.extend(hub.devices().map(|device| format!("    {device}")));
        }
    }

    let loose_devices: Vec<_> = services
        .devices
        .list_devices()?
        .into_iter()
        .filter(|device| device.hub().is_none())
        .collect();
    if !loose_devices.is_empty() {
        lines.push("unpaired devices".to_string());
        lines.extend(loose_devices.iter().map(|device| format!("  {device}")));
    }

    lines.push(String::new());
    Ok(lines.join("\n"))
}
