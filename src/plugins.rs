//! The plugin registry: three process-wide, component-id-keyed tables that let
//! external decoders extend the core without the core ever naming them.
//!
//! Registration is the *only* extension point (§4.4 of the design): the core
//! ships no hard-coded decoder for any specific component. All registration
//! and deregistration is expected to happen before [`crate::Event::parse`] is
//! ever called (§5); during parsing the tables are only ever read.
use crate::collector::ParamCollector;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

/// A User-Defined-Data decoder: given the section's raw payload plus its
/// `version`/`subtype`, emits params through `collector` and returns whether
/// it produced a meaningful rendering. `false` tells the framer to fall back
/// to a hex dump of the payload.
pub type UddDecoder = dyn Fn(&mut dyn ParamCollector, &[u8], u8, u8) -> bool + Send + Sync;

/// The pair of values a PSRC decoder is invoked with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SrcDescriptor {
    pub primary_ref_code: u32,
    pub extended_ref_code_3: u32,
}

impl SrcDescriptor {
    /// `(extended_ref_code_3 >> 8) & 0xff`.
    pub fn module_id(&self) -> u8 {
        ((self.extended_ref_code_3 >> 8) & 0xff) as u8
    }

    /// `primary_ref_code & 0xffff`.
    pub fn reason_code(&self) -> u16 {
        (self.primary_ref_code & 0xffff) as u16
    }
}

/// A PSRC source-description decoder, invoked with the parsed reference code pair.
pub type PsrcDecoder = dyn Fn(&mut dyn ParamCollector, &SrcDescriptor) -> bool + Send + Sync;

fn udd_table() -> &'static Mutex<HashMap<u16, Arc<UddDecoder>>> {
    static TABLE: OnceLock<Mutex<HashMap<u16, Arc<UddDecoder>>>> = OnceLock::new();
    TABLE.get_or_init(|| Mutex::new(HashMap::new()))
}

fn psrc_table() -> &'static Mutex<HashMap<u16, Arc<PsrcDecoder>>> {
    static TABLE: OnceLock<Mutex<HashMap<u16, Arc<PsrcDecoder>>>> = OnceLock::new();
    TABLE.get_or_init(|| Mutex::new(HashMap::new()))
}

fn component_name_table() -> &'static Mutex<HashMap<u16, String>> {
    static TABLE: OnceLock<Mutex<HashMap<u16, String>>> = OnceLock::new();
    TABLE.get_or_init(|| Mutex::new(HashMap::new()))
}

/// Registers (or replaces) the UDD decoder for `component_id`; last-write-wins.
pub fn register_udd_plugin<F>(component_id: u16, decoder: F)
where
    F: Fn(&mut dyn ParamCollector, &[u8], u8, u8) -> bool + Send + Sync + 'static,
{
    udd_table()
        .lock()
        .expect("UDD plugin registry poisoned")
        .insert(component_id, Arc::new(decoder));
}

/// Removes the UDD decoder registered for `component_id`, if any.
pub fn unregister_udd_plugin(component_id: u16) {
    udd_table()
        .lock()
        .expect("UDD plugin registry poisoned")
        .remove(&component_id);
}

/// Looks up the UDD decoder registered for `component_id`.
pub fn lookup_udd_plugin(component_id: u16) -> Option<Arc<UddDecoder>> {
    udd_table()
        .lock()
        .expect("UDD plugin registry poisoned")
        .get(&component_id)
        .cloned()
}

/// Registers (or replaces) the PSRC decoder for `component_id`; last-write-wins.
pub fn register_psrc_plugin<F>(component_id: u16, decoder: F)
where
    F: Fn(&mut dyn ParamCollector, &SrcDescriptor) -> bool + Send + Sync + 'static,
{
    psrc_table()
        .lock()
        .expect("PSRC plugin registry poisoned")
        .insert(component_id, Arc::new(decoder));
}

/// Removes the PSRC decoder registered for `component_id`, if any.
pub fn unregister_psrc_plugin(component_id: u16) {
    psrc_table()
        .lock()
        .expect("PSRC plugin registry poisoned")
        .remove(&component_id);
}

/// Looks up the PSRC decoder registered for `component_id`.
pub fn lookup_psrc_plugin(component_id: u16) -> Option<Arc<PsrcDecoder>> {
    psrc_table()
        .lock()
        .expect("PSRC plugin registry poisoned")
        .get(&component_id)
        .cloned()
}

/// Registers (or replaces) the display name for `component_id`; last-write-wins.
pub fn register_component_name(component_id: u16, name: impl Into<String>) {
    component_name_table()
        .lock()
        .expect("component name registry poisoned")
        .insert(component_id, name.into());
}

/// Removes the registered name for `component_id`, if any.
pub fn unregister_component_name(component_id: u16) {
    component_name_table()
        .lock()
        .expect("component name registry poisoned")
        .remove(&component_id);
}

/// Invokes the UDD plugin registered for `component_id`, or returns `false`
/// if none is registered.
pub fn parse_user_defined(
    collector: &mut dyn ParamCollector,
    component_id: u16,
    subtype: u8,
    version: u8,
    bytes: &[u8],
) -> bool {
    match lookup_udd_plugin(component_id) {
        Some(decoder) => decoder(collector, bytes, version, subtype),
        None => {
            tracing::debug!(component_id, "no UDD plugin registered");
            false
        }
    }
}

/// Extracts a component id from `primary_ref_code` (the low 16 bits masked
/// with `0xff00`) and invokes the registered PSRC plugin, if any.
pub fn get_source_description(
    collector: &mut dyn ParamCollector,
    primary_ref_code: u32,
    ext_ref_code_3: u32,
) -> bool {
    let component_id = (primary_ref_code as u16) & 0xff00;
    match lookup_psrc_plugin(component_id) {
        Some(decoder) => {
            let descriptor = SrcDescriptor {
                primary_ref_code,
                extended_ref_code_3: ext_ref_code_3,
            };
            decoder(collector, &descriptor)
        }
        None => {
            tracing::debug!(component_id, "no PSRC plugin registered");
            false
        }
    }
}

/// Returns the display name registered for `component_id`, or the fallback
/// `"Undefined [0xXXXX]"` when none is registered.
pub fn get_component_name(component_id: u16) -> String {
    match component_name_table()
        .lock()
        .expect("component name registry poisoned")
        .get(&component_id)
    {
        Some(name) => name.clone(),
        None => format!("Undefined [0x{component_id:04X}]"),
    }
}

/// Registers a UDD decoder on construction, unregisters it on drop.
///
/// Ties a plugin's registration to a scope (a test, a `static` holder owned
/// by the plugin crate, ...) instead of requiring manually paired
/// `register`/`unregister` calls, mirroring the reference implementation's
/// `errl::DataPlugin` guard.
pub struct UddPluginGuard {
    component_id: u16,
}

impl UddPluginGuard {
    pub fn register<F>(component_id: u16, decoder: F) -> Self
    where
        F: Fn(&mut dyn ParamCollector, &[u8], u8, u8) -> bool + Send + Sync + 'static,
    {
        register_udd_plugin(component_id, decoder);
        Self { component_id }
    }
}

impl Drop for UddPluginGuard {
    fn drop(&mut self) {
        unregister_udd_plugin(self.component_id);
    }
}

/// Registers a PSRC decoder on construction, unregisters it on drop.
/// Mirrors the reference implementation's `errl::SrcPlugin` guard.
pub struct PsrcPluginGuard {
    component_id: u16,
}

impl PsrcPluginGuard {
    pub fn register<F>(component_id: u16, decoder: F) -> Self
    where
        F: Fn(&mut dyn ParamCollector, &SrcDescriptor) -> bool + Send + Sync + 'static,
    {
        register_psrc_plugin(component_id, decoder);
        Self { component_id }
    }
}

impl Drop for PsrcPluginGuard {
    fn drop(&mut self) {
        unregister_psrc_plugin(self.component_id);
    }
}

/// Registers a component display name on construction, unregisters it on drop.
pub struct ComponentNameGuard {
    component_id: u16,
}

impl ComponentNameGuard {
    pub fn register(component_id: u16, name: impl Into<String>) -> Self {
        register_component_name(component_id, name);
        Self { component_id }
    }
}

impl Drop for ComponentNameGuard {
    fn drop(&mut self) {
        unregister_component_name(self.component_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::param::Params;

    #[test]
    fn unregistered_component_falls_back_to_false() {
        let mut params = Params::new();
        let mut collector = crate::collector::ParamsCollector::new(&mut params);
        assert!(!parse_user_defined(&mut collector, 0xfeed, 0, 0, &[1, 2, 3]));
    }

    #[test]
    fn registration_guard_unregisters_on_drop() {
        let component_id = 0x1234;
        {
            let _guard = UddPluginGuard::register(component_id, |_c, _b, _v, _s| true);
            assert!(lookup_udd_plugin(component_id).is_some());
        }
        assert!(lookup_udd_plugin(component_id).is_none());
    }

    #[test]
    fn last_write_wins_on_reregistration() {
        let component_id = 0x5555;
        register_udd_plugin(component_id, |_c, _b, _v, _s| false);
        register_udd_plugin(component_id, |_c, _b, _v, _s| true);
        let decoder = lookup_udd_plugin(component_id).unwrap();
        let mut params = Params::new();
        let mut collector = crate::collector::ParamsCollector::new(&mut params);
        assert!(decoder(&mut collector, &[], 0, 0));
        unregister_udd_plugin(component_id);
    }

    #[test]
    fn unknown_component_name_has_undefined_fallback() {
        assert_eq!(get_component_name(0xabcd), "Undefined [0xABCD]");
    }

    #[test]
    fn component_name_guard_round_trip() {
        let component_id = 0x9988;
        {
            let _guard = ComponentNameGuard::register(component_id, "Test Component");
            assert_eq!(get_component_name(component_id), "Test Component");
        }
        assert_eq!(get_component_name(component_id), "Undefined [0x9988]");
    }

    #[test]
    fn src_descriptor_accessors() {
        let descriptor = SrcDescriptor {
            primary_ref_code: 0xbc810406,
            extended_ref_code_3: 0x0000ab00,
        };
        assert_eq!(descriptor.module_id(), 0xab);
        assert_eq!(descriptor.reason_code(), 0x0406);
    }
}
