//! Static id→label lookup tables, with an "Unknown (0xXX)" fallback for unmapped keys.
use std::collections::HashMap;
use std::sync::OnceLock;

/// A read-only map from a small unsigned integer to a display string.
///
/// Built lazily from a fixed `(key, label)` list on first use. When the list
/// contains a duplicate key, the *last* entry wins — this is a deliberate
/// choice (the reference table this is transcribed from relies on an
/// ordered-map's first-insertion-wins behavior for its two duplicate keys;
/// see `DESIGN.md`).
pub struct LookupTable {
    entries: &'static [(u8, &'static str)],
    cache: OnceLock<HashMap<u8, &'static str>>,
}

impl LookupTable {
    const fn new(entries: &'static [(u8, &'static str)]) -> Self {
        Self {
            entries,
            cache: OnceLock::new(),
        }
    }

    fn map(&self) -> &HashMap<u8, &'static str> {
        self.cache.get_or_init(|| {
            let mut map = HashMap::with_capacity(self.entries.len());
            for &(key, label) in self.entries {
                map.insert(key, label);
            }
            map
        })
    }

    /// Returns the mapped label, or `"Unknown (0xXX)"` when `key` is absent.
    pub fn get(&self, key: u8) -> String {
        match self.map().get(&key) {
            Some(label) => label.to_string(),
            None => format!("Unknown (0x{key:02x})"),
        }
    }
}

pub static SUBSYSTEM_NAME: LookupTable = LookupTable::new(&[
    (0x00, "Not Applicable"),
    (0x10, "Processor subsystem"),
    (0x11, "Processor FRU"),
    (0x12, "Processor chip including internal cache"),
    (0x13, "Processor unit (CPU)"),
    (0x14, "Processor/system bus controller & interface"),
    (0x20, "Memory subsystem"),
    (0x21, "Memory controller"),
    (0x22, "Memory bus interface including SMI"),
    (0x23, "Memory DIMM"),
    (0x24, "Memory card/FRU"),
    (0x25, "External cache"),
    (0x30, "I/O (hub, bridge, bus)"),
    (0x31, "I/O hub RIO"),
    (0x32, "I/O bridge, general (PHB, PCI/PCI, PCI/ISA, EADS, etc.)"),
    (0x33, "I/O bus interface"),
    (0x34, "I/O processor"),
    (0x35, "I/O hub others (SMA, Torrent, etc.)"),
    (0x36, "RIO loop and associated RIO hub"),
    (0x37, "RIO loop and associated RIO bridge"),
    (0x38, "PHB"),
    (0x39, "EADS/EADS-X global"),
    (0x3a, "EADS/EADS-X slot"),
    (0x3b, "InfiniBand hub"),
    (0x3c, "Infiniband bridge"),
    (0x40, "I/O (adapter, device, peripheral)"),
    (0x41, "I/O adapter - communication"),
    (0x46, "I/O device"),
    (0x47, "I/O device - DASD"),
    (0x4c, "I/O peripheral"),
    (0x4d, "I/O peripheral - local workstation"),
    (0x4e, "Storage mezzanine expansion subsystem"),
    (0x50, "CEC Hardware"),
    (0x51, "CEC Hardware - service processor A"),
    (0x52, "CEC Hardware - service processor B"),
    (0x53, "CEC Hardware - node controller"),
    (0x54, "Reserved for CEC hardware"),
    (0x55, "CEC hardware - VPD device and interface (smart chip and I2C device)"),
    (0x56, "CEC hardware - I2C devices and interface (non VPD)"),
    (0x57, "CEC hardware - CEC chip interface (JTAG, FSI, etc.)"),
    (0x57, "CEC hardware - CEC chip interface (JTAG, FSI, etc.)"),
    (0x58, "CEC hardware - clock & control"),
    (0x59, "CEC hardware - Op. panel"),
    (0x5a, "CEC hardware - time of day hardware including its battery"),
    (0x5b, "CEC hardware - storage/memory device (NVRAM, Flash, SP DRAM, etc.)"),
    (0x5c, "CEC hardware - Service processor-Hypervisor hardware interface (PSI, PCI, etc.)"),
    (0x5d, "CEC hardware - Service network"),
    (0x5e, "CEC hardware - Service processor-Hostboot hardware interface (FSI Mailbox)"),
    (0x60, "Power/Cooling System"),
    (0x61, "Power supply"),
    (0x62, "Power control hardware"),
    (0x63, "Fan, air moving devices"),
    (0x64, "DPSS"),
    (0x70, "Other Subsystems"),
    (0x71, "Hypervisor subsystem & hardware (excluding code)"),
    (0x72, "Test tool"),
    (0x73, "Removable media"),
    (0x74, "Multiple subsystems"),
    (0x75, "Not applicable (unknown, invalid value, etc.)"),
    (0x76, "Reserved"),
    (0x77, "CMM A"),
    (0x78, "CMM B"),
    (0x7a, "Connection Monitoring - Hypervisor lost communication with service processor"),
    (0x7b, "Connection Monitoring - Service processor lost communication with hypervisor"),
    (0x7c, "Connection Monitoring - Service processor lost communication with hypervisor"),
    (0x7e, "Connection Monitoring - Hypervisor lost communication with logical partition"),
    (0x7e, "Connection Monitoring - Hypervisor lost communication with BPA"),
    (0x7f, "Connection Monitoring - Hypervisor lost communication with another hypervisor"),
    (0x80, "Platform Firmware"),
    (0x81, "Service processor firmware"),
    (0x82, "Hypervisor firmware"),
    (0x83, "Partition firmware"),
    (0x84, "SLIC firmware"),
    (0x85, "SPCN firmware"),
    (0x86, "Bulk power firmware side A"),
    (0x87, "Hypervisor code/firmware"),
    (0x88, "Bulk power firmware side B"),
    (0x89, "Virtual service processor firmware (VSP)"),
    (0x8a, "Hostboot"),
    (0x8b, "OCC"),
    (0x90, "Software"),
    (0x91, "Operating system software"),
    (0x92, "XPF software"),
    (0x93, "Application software"),
    (0xa0, "External Environment"),
    (0xa1, "Input power source (AC)"),
    (0xa2, "Room ambient temperature"),
    (0xa3, "User error"),
]);

pub static EVENT_SEVERITY: LookupTable = LookupTable::new(&[
    (0x00, "Informational Event"),
    (0x10, "Recoverable Error"),
    (0x20, "Predictive Error"),
    (0x21, "Predicting degraded performance."),
    (0x22, "Predicting fault may be corrected after platform re-IPL."),
    (0x23, "Predicting fault may be corrected after IPL, degraded performance"),
    (0x24, "Predicting loss of redundancy"),
    (0x40, "Unrecoverable Error"),
    (0x41, "Error bypassed with degraded performance"),
    (0x44, "Error bypassed with loss of redundancy"),
    (0x45, "Error bypassed with loss of redundancy and performance"),
    (0x48, "Error bypassed with loss of function"),
    (0x50, "Critical Error"),
    (0x51, "Critical error system termination"),
    (0x52, "Critical error failure likely or imminent"),
    (0x53, "Critical error partition(s) terminal"),
    (0x54, "Critical error partition(s) failure likely or imminent"),
    (0x60, "Error on diag test"),
    (0x61, "Error on diag test, resource may produce incorrect results"),
    (0x70, "Symptom"),
    (0x71, "Symptom recovered"),
    (0x72, "Symptom predictive"),
    (0x74, "Symptom unrecoverable"),
    (0x75, "Symptom critical"),
    (0x76, "Symptom diagnosis error"),
]);

pub static EVENT_SCOPE: LookupTable = LookupTable::new(&[
    (0x01, "Single partition"),
    (0x02, "Multiple partitions"),
    (0x03, "Single platform"),
    (0x04, "Possibly multiple platforms"),
]);

pub static EVENT_TYPE: LookupTable = LookupTable::new(&[
    (0x00, "Not applicable"),
    (0x01, "Miscellaneous, informational only."),
    (0x02, "Tracing event"),
    (0x08, "Dump notification"),
    (0x10, "Previously reported error has been corrected by system"),
    (0x20, "System resources manually deconfigured by user"),
    (0x21, "System resources deconfigured by system due to prior error event"),
    (0x22, "Resource deallocation event notification"),
    (0x30, "Customer environmental problem has returned to normal"),
    (0x40, "Concurrent maintenance event"),
    (0x60, "Capacity upgrade event"),
    (0x70, "Resource sparing event"),
    (0x80, "Dynamic reconfiguration event"),
    (0xd0, "Normal system/platform shutdown or powered off"),
    (0xe0, "Platform powered off by user without normal shutdown"),
]);

/// The creator-subsystem table is not part of the core: the core ships it
/// empty and every key falls back to `"Unknown (0xXX)"` until the host
/// registers its own contents.
pub static CREATOR_SUB_SYS: LookupTable = LookupTable::new(&[]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_key_returns_mapped_label() {
        assert_eq!(SUBSYSTEM_NAME.get(0x20), "Memory subsystem");
        assert_eq!(EVENT_SEVERITY.get(0x40), "Unrecoverable Error");
        assert_eq!(EVENT_SCOPE.get(0x03), "Single platform");
    }

    #[test]
    fn unknown_key_falls_back_to_hex_label() {
        assert_eq!(SUBSYSTEM_NAME.get(0x42), "Unknown (0x42)");
        assert_eq!(CREATOR_SUB_SYS.get(0x42), "Unknown (0x42)");
    }

    #[test]
    fn duplicate_key_resolves_to_the_last_entry() {
        // 0x7e appears twice in the reference table with different labels;
        // last-write-wins picks the second one.
        assert_eq!(
            SUBSYSTEM_NAME.get(0x7e),
            "Connection Monitoring - Hypervisor lost communication with BPA"
        );
    }
}
