// ── Topology view model ──
//
// Selection state and link resolution for the network map. Link targets
// in device data are a mix of raw ids and name-derived slugs, so both
// forms resolve here.

use campusgate_api::types::{DeviceStatus, NetworkDevice};
use tracing::debug;

/// The campus network is laid out as three fixed segments (edge, core,
/// access); the map legend reports this rather than deriving it.
pub const NETWORK_SEGMENTS: u64 = 3;

/// Slug form of a device name used in connection references:
/// lowercased, with the first space replaced by a hyphen.
///
/// Only the first space -- "Lab Switch B" becomes "lab-switch b".
/// Service data was authored against this rule, so it stays.
pub fn name_slug(name: &str) -> String {
    name.to_lowercase().replacen(' ', "-", 1)
}

/// A resolved edge between two devices, by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopologyLink {
    pub from_id: String,
    pub to_id: String,
}

/// Summary counters for the map's side panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TopologyStats {
    pub total_devices: u64,
    pub active_devices: u64,
    pub security_appliances: u64,
    pub network_segments: u64,
}

/// Interactive view over the device list.
#[derive(Debug, Clone, Default)]
pub struct TopologyView {
    devices: Vec<NetworkDevice>,
    selected: Option<String>,
}

impl TopologyView {
    pub fn new(devices: Vec<NetworkDevice>) -> Self {
        Self {
            devices,
            selected: None,
        }
    }

    pub fn devices(&self) -> &[NetworkDevice] {
        &self.devices
    }

    // ── Selection ────────────────────────────────────────────────────

    pub fn selected_device(&self) -> Option<&NetworkDevice> {
        let id = self.selected.as_deref()?;
        self.devices.iter().find(|d| d.id == id)
    }

    /// Select a device. Selecting the already-selected device is a
    /// no-op; unknown ids are ignored.
    pub fn select(&mut self, device_id: &str) {
        if self.selected.as_deref() == Some(device_id) {
            return;
        }
        if self.devices.iter().any(|d| d.id == device_id) {
            self.selected = Some(device_id.to_owned());
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    // ── Links ────────────────────────────────────────────────────────

    /// Resolve every connection reference into an id-to-id link.
    ///
    /// Each reference matches either a device id or a device name slug.
    /// Dangling references are dropped without error; the map just
    /// doesn't draw that edge.
    pub fn links(&self) -> Vec<TopologyLink> {
        let mut links = Vec::new();

        for device in &self.devices {
            for reference in &device.connections {
                match self.resolve(reference) {
                    Some(target) => links.push(TopologyLink {
                        from_id: device.id.clone(),
                        to_id: target.id.clone(),
                    }),
                    None => {
                        debug!(
                            "dropping dangling connection {reference:?} on device {}",
                            device.id
                        );
                    }
                }
            }
        }

        links
    }

    fn resolve(&self, reference: &str) -> Option<&NetworkDevice> {
        self.devices
            .iter()
            .find(|d| d.id == reference || name_slug(&d.name) == reference)
    }

    // ── Stats ────────────────────────────────────────────────────────

    pub fn stats(&self) -> TopologyStats {
        TopologyStats {
            total_devices: self.devices.len() as u64,
            active_devices: self
                .devices
                .iter()
                .filter(|d| d.status == DeviceStatus::Active)
                .count() as u64,
            security_appliances: self
                .devices
                .iter()
                .filter(|d| d.device_type.is_security_appliance())
                .count() as u64,
            network_segments: NETWORK_SEGMENTS,
        }
    }
}
