//! The byte-level section framer and the typed section constructors it
//! dispatches to (`PH`, `UH`, `PS`, `UD`, and a generic fallback).
use crate::collector::{ParamCollector, ParamsCollector};
use crate::error::FormatError;
use crate::io::{be_u16, be_u32, be_u64};
use crate::param::{Numeric, Param, Params};
use crate::plugins;
use crate::tables;

/// Wire size of a [`Header`], in bytes.
pub const HEADER_SIZE: usize = 8;

/// Wire size of a Private Header section's payload; the minimum buffer
/// length `Event::parse` requires at entry (it reads this many bytes before
/// it has even framed a header, mirroring the reference implementation's
/// `len < sizeof(PHData)` entry check).
pub const PH_PAYLOAD_SIZE: usize = 40;
const UH_PAYLOAD_SIZE: usize = 16;
const PS_PAYLOAD_SIZE: usize = 72;

/// Wire size of a Private Header section (header + payload).
pub const PH_SECTION_SIZE: usize = HEADER_SIZE + PH_PAYLOAD_SIZE;

const PH_ID: u16 = 0x5048; // "PH"
const UH_ID: u16 = 0x5548; // "UH"
const PS_ID: u16 = 0x5053; // "PS"
const UD_ID: u16 = 0x5544; // "UD"

/// A section header, as it appears on the wire: 8 bytes, big-endian, packed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub id: u16,
    pub length: u16,
    pub version: u8,
    pub subtype: u8,
    pub component: u16,
}

impl Header {
    fn parse(bytes: &[u8]) -> Self {
        debug_assert!(bytes.len() >= HEADER_SIZE);
        Self {
            id: be_u16(&bytes[0..2]),
            length: be_u16(&bytes[2..4]),
            version: bytes[4],
            subtype: bytes[5],
            component: be_u16(&bytes[6..8]),
        }
    }

    /// Re-serializes the header to its 8-byte wire form.
    pub fn to_bytes(self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        out[0..2].copy_from_slice(&self.id.to_be_bytes());
        out[2..4].copy_from_slice(&self.length.to_be_bytes());
        out[4] = self.version;
        out[5] = self.subtype;
        out[6..8].copy_from_slice(&self.component.to_be_bytes());
        out
    }
}

/// The big-endian-unflattened payload of a Private Header section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhData {
    pub create_timestamp: u64,
    pub commit_timestamp: u64,
    pub subsystem_id: u8,
    pub section_count: u8,
    pub creator_sub_id_hi: u32,
    pub creator_sub_id_lo: u32,
    pub platform_id: u32,
    pub log_entry_id: u32,
}

impl PhData {
    fn parse(payload: &[u8]) -> Self {
        debug_assert_eq!(payload.len(), PH_PAYLOAD_SIZE);
        Self {
            create_timestamp: be_u64(&payload[0..8]),
            commit_timestamp: be_u64(&payload[8..16]),
            subsystem_id: payload[16],
            section_count: payload[19],
            creator_sub_id_hi: be_u32(&payload[24..28]),
            creator_sub_id_lo: be_u32(&payload[28..32]),
            platform_id: be_u32(&payload[32..36]),
            log_entry_id: be_u32(&payload[36..40]),
        }
    }

    fn params(&self) -> Params {
        let mut params = Params::new();
        let mut collector = ParamsCollector::new(&mut params);
        collector.emit_number_u64("Create timestamp", "%16x", self.create_timestamp);
        collector.emit_number_u64("Commit timestamp", "%16x", self.commit_timestamp);
        collector.emit_string(
            "Creator subsystem",
            Some(&tables::CREATOR_SUB_SYS.get(self.subsystem_id)),
        );
        collector.emit_number_u64("Section count", "", self.section_count as u64);
        collector.emit_number_u64("Creator ID Lo", "%8x", self.creator_sub_id_lo as u64);
        collector.emit_number_u64("Creator ID Hi", "%8x", self.creator_sub_id_hi as u64);
        collector.emit_number_u64("Platform log ID", "%8x", self.platform_id as u64);
        collector.emit_number_u64("Log entry ID", "%8x", self.log_entry_id as u64);
        params
    }
}

/// The big-endian-unflattened payload of a User Header section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UhData {
    pub subsystem_id: u8,
    pub event_data: u8,
    pub event_severity: u8,
    pub event_type: u8,
    pub problem_domain: u8,
    pub problem_vector: u8,
    pub action: u16,
}

impl UhData {
    fn parse(payload: &[u8]) -> Self {
        debug_assert_eq!(payload.len(), UH_PAYLOAD_SIZE);
        Self {
            subsystem_id: payload[0],
            event_data: payload[1],
            event_severity: payload[2],
            event_type: payload[3],
            problem_domain: payload[8],
            problem_vector: payload[9],
            action: be_u16(&payload[10..12]),
        }
    }

    /// The scope nibble of the event-data byte.
    pub fn event_scope(&self) -> u8 {
        self.event_data & 0x0f
    }

    fn params(&self) -> Params {
        let mut params = Params::new();
        let mut collector = ParamsCollector::new(&mut params);
        collector.emit_string(
            "Subsystem",
            Some(&tables::SUBSYSTEM_NAME.get(self.subsystem_id)),
        );
        collector.emit_string(
            "Event severity",
            Some(&tables::EVENT_SEVERITY.get(self.event_severity)),
        );
        collector.emit_string("Event type", Some(&tables::EVENT_TYPE.get(self.event_type)));
        collector.emit_string(
            "Event scope",
            Some(&tables::EVENT_SCOPE.get(self.event_scope())),
        );
        collector.emit_number_u64("Problem domain", "", self.problem_domain as u64);
        collector.emit_number_u64("Problem vector", "", self.problem_vector as u64);
        collector.emit_number_u64("Action", "%4x", self.action as u64);
        params
    }
}

/// The big-endian-unflattened payload of a Primary System Reference Code section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PsData {
    pub version: u8,
    pub flags: u8,
    pub word_count: u8,
    pub src_length: u16,
    pub ext_ref_code: [u32; 8],
}

impl PsData {
    fn parse(payload: &[u8]) -> Self {
        debug_assert_eq!(payload.len(), PS_PAYLOAD_SIZE);
        let mut ext_ref_code = [0u32; 8];
        for (i, word) in ext_ref_code.iter_mut().enumerate() {
            let offset = 8 + i * 4;
            *word = be_u32(&payload[offset..offset + 4]);
        }
        Self {
            version: payload[0],
            flags: payload[1],
            word_count: payload[3],
            src_length: be_u16(&payload[6..8]),
            ext_ref_code,
        }
    }

    fn params(&self, primary_ref_code_text: &str) -> Params {
        let mut params = Params::new();
        let mut collector = ParamsCollector::new(&mut params);

        let trimmed = primary_ref_code_text.trim();
        let mut parsed_ref_code = None;
        match u32::from_str_radix(trimmed, 16) {
            Ok(parsed) => {
                let component_id = (parsed as u16) & 0xff00;
                collector.emit_string("Module ID", Some(&plugins::get_component_name(component_id)));
                collector.emit_string("Reference code", Some(&format!("0x{parsed:08x}")));
                parsed_ref_code = Some(parsed);
            }
            Err(_) => {
                tracing::warn!(
                    text = %primary_ref_code_text,
                    "primary reference code is not valid ASCII hex"
                );
                collector.emit_string("Reference code", Some(primary_ref_code_text));
            }
        }

        collector.emit_number_u64("Flags", "", self.flags as u64);
        collector.emit_number_u64("Valid word count", "", self.word_count as u64);

        collector.emit_string(
            "Words 2-5",
            Some(&format!(
                "{:08x} {:08x} {:08x} {:08x}",
                self.ext_ref_code[0], self.ext_ref_code[1], self.ext_ref_code[2], self.ext_ref_code[3]
            )),
        );
        collector.emit_string(
            "Words 6-9",
            Some(&format!(
                "{:08x} {:08x} {:08x} {:08x}",
                self.ext_ref_code[4], self.ext_ref_code[5], self.ext_ref_code[6], self.ext_ref_code[7]
            )),
        );

        if let Some(parsed) = parsed_ref_code.filter(|&p| p != 0) {
            if !plugins::get_source_description(&mut collector, parsed, self.ext_ref_code[1]) {
                tracing::debug!(parsed, "no PSRC plugin produced a description");
            }
        }

        params
    }
}

/// The variant-specific data a [`Section`] carries, per its wire `id`.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionKind {
    /// Any section id the core does not recognize.
    Generic,
    Ph(PhData),
    Uh(UhData),
    Ps(PsData),
    /// User-Defined Data; no fixed layout, rendered through the UDD plugin registry.
    Ud,
}

/// A single framed section: its header, its raw payload, and the human-readable
/// `Params` describing that payload, built eagerly at construction time.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    header: Header,
    payload: Vec<u8>,
    kind: SectionKind,
    params: Params,
}

impl Section {
    /// The section's header.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// The section's raw payload bytes.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// The section's variant-specific data.
    pub fn kind(&self) -> &SectionKind {
        &self.kind
    }

    /// The Private Header data, if this section is a `PH`.
    pub fn ph_data(&self) -> Option<&PhData> {
        match &self.kind {
            SectionKind::Ph(data) => Some(data),
            _ => None,
        }
    }

    /// The payload-level params built for this section.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Display name for the section's type.
    pub fn name(&self) -> &'static str {
        match &self.kind {
            SectionKind::Generic => "General data (unknown section type)",
            SectionKind::Ph(_) => "Private header",
            SectionKind::Uh(_) => "User Header",
            SectionKind::Ps(_) => "Primary System Reference Code",
            SectionKind::Ud => "User Defined Data",
        }
    }

    /// Human-readable view of the header itself: exactly five entries, in
    /// wire field order, including a printable-ASCII echo of the id bytes
    /// when both bytes are printable.
    pub fn header_params(&self) -> Params {
        let id_hi = (self.header.id >> 8) as u8;
        let id_lo = (self.header.id & 0xff) as u8;
        let id_value = if id_hi.is_ascii_graphic() && id_lo.is_ascii_graphic() {
            format!("0x{:04x} ({}{})", self.header.id, id_hi as char, id_lo as char)
        } else {
            format!("0x{:04x}", self.header.id)
        };
        vec![
            Param::string("Section ID", id_value),
            Param::numeric("Section length", Numeric::U16(self.header.length)),
            Param::numeric("Section version", Numeric::U8(self.header.version)),
            Param::numeric("Section subtype", Numeric::U8(self.header.subtype)),
            Param::string(
                "Section component",
                plugins::get_component_name(self.header.component),
            ),
        ]
    }
}

/// Frames one section starting at the beginning of `bytes`.
///
/// Reads and validates the 8-byte header, slices out its declared payload,
/// dispatches to the typed constructor for `header.id`, and returns the
/// fully-built [`Section`]. The number of bytes consumed is `header.length`.
pub fn frame_section(bytes: &[u8]) -> Result<Section, FormatError> {
    if bytes.len() < HEADER_SIZE {
        return Err(FormatError::new(format!(
            "Section header truncated: {} bytes available, {} required",
            bytes.len(),
            HEADER_SIZE
        )));
    }
    let header = Header::parse(&bytes[..HEADER_SIZE]);
    tracing::trace!(id = format!("{:#06x}", header.id), length = header.length, "framing section");
    if header.length as usize <= HEADER_SIZE {
        return Err(FormatError::new(format!(
            "Section claims invalid length {} (must exceed header size {})",
            header.length, HEADER_SIZE
        )));
    }
    if header.length as usize > bytes.len() {
        return Err(FormatError::new(format!(
            "Section claims length {} but only {} bytes remain",
            header.length,
            bytes.len()
        )));
    }
    let payload = bytes[HEADER_SIZE..header.length as usize].to_vec();
    build_section(header, payload)
}

fn build_section(header: Header, payload: Vec<u8>) -> Result<Section, FormatError> {
    match header.id {
        PH_ID => {
            if payload.len() != PH_PAYLOAD_SIZE {
                return Err(FormatError::new(format!(
                    "Private Header section has invalid payload size: {} (expected {})",
                    payload.len(),
                    PH_PAYLOAD_SIZE
                )));
            }
            let data = PhData::parse(&payload);
            let params = data.params();
            Ok(Section {
                header,
                payload,
                kind: SectionKind::Ph(data),
                params,
            })
        }
        UH_ID => {
            if payload.len() != UH_PAYLOAD_SIZE {
                return Err(FormatError::new(format!(
                    "User Header section has invalid payload size: {} (expected {})",
                    payload.len(),
                    UH_PAYLOAD_SIZE
                )));
            }
            let data = UhData::parse(&payload);
            let params = data.params();
            Ok(Section {
                header,
                payload,
                kind: SectionKind::Uh(data),
                params,
            })
        }
        PS_ID => {
            if payload.len() != PS_PAYLOAD_SIZE {
                return Err(FormatError::new(format!(
                    "Primary System Reference Code section has invalid payload size: {} (expected {})",
                    payload.len(),
                    PS_PAYLOAD_SIZE
                )));
            }
            let data = PsData::parse(&payload);
            let primary_ref_code_text = String::from_utf8_lossy(&payload[40..72]).into_owned();
            let params = data.params(&primary_ref_code_text);
            Ok(Section {
                header,
                payload,
                kind: SectionKind::Ps(data),
                params,
            })
        }
        UD_ID => {
            let mut params = Params::new();
            let mut collector = ParamsCollector::new(&mut params);
            let rendered = plugins::parse_user_defined(
                &mut collector,
                header.component,
                header.subtype,
                header.version,
                &payload,
            );
            if !rendered {
                tracing::debug!(component = header.component, "UDD plugin miss, falling back to hex dump");
                collector.emit_hex_dump(&payload);
            }
            Ok(Section {
                header,
                payload,
                kind: SectionKind::Ud,
                params,
            })
        }
        _ => Ok(Section {
            header,
            payload,
            kind: SectionKind::Generic,
            params: Params::new(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ph_fixture(section_count: u8) -> Vec<u8> {
        let mut bytes = vec![
            0x50, 0x48, // id "PH"
            0x00, 0x30, // length 48
            0x01, // version
            0x00, // subtype
            0x0a, 0x00, // component
        ];
        bytes.extend_from_slice(&[0u8; PH_PAYLOAD_SIZE]);
        bytes[HEADER_SIZE + 16] = 0x10; // subsystemId
        bytes[HEADER_SIZE + 19] = section_count;
        bytes[HEADER_SIZE + 32..HEADER_SIZE + 36].copy_from_slice(&0x9000_0047u32.to_be_bytes());
        bytes
    }

    #[test]
    fn ph_section_frames_and_reports_platform_id() {
        let bytes = ph_fixture(0x10);
        let section = frame_section(&bytes).unwrap();
        assert_eq!(section.name(), "Private header");
        let data = section.ph_data().unwrap();
        assert_eq!(data.section_count, 0x10);
        assert_eq!(data.platform_id, 0x9000_0047);
    }

    #[test]
    fn header_params_has_exactly_five_entries_in_order() {
        let bytes = ph_fixture(1);
        let section = frame_section(&bytes).unwrap();
        let params = section.header_params();
        assert_eq!(params.len(), 5);
        assert_eq!(params[0].name(), "Section ID");
        assert_eq!(params[1].name(), "Section length");
        assert_eq!(params[2].name(), "Section version");
        assert_eq!(params[3].name(), "Section subtype");
        assert_eq!(params[4].name(), "Section component");
        assert!(params[0].value().contains("(PH)"));
    }

    #[test]
    fn ps_flags_renders_as_an_8_bit_field_not_widened() {
        let mut bytes = vec![
            0x50, 0x53, // id "PS"
            0x00, 0x50, // length 80
            0x01, 0x00, 0x0a, 0x00,
        ];
        bytes.extend_from_slice(&[0u8; PS_PAYLOAD_SIZE]);
        bytes[HEADER_SIZE + 40..HEADER_SIZE + 72].fill(b' ');
        let section = frame_section(&bytes).unwrap();
        assert!(section
            .params()
            .iter()
            .any(|p| p.name() == "Flags" && p.value() == "0x00"));
    }

    #[test]
    fn typed_section_params_carry_no_heading() {
        let bytes = ph_fixture(1);
        let section = frame_section(&bytes).unwrap();
        assert!(!section.params().iter().any(|p| matches!(p, Param::Heading(_))));
    }

    #[test]
    fn header_length_equal_to_header_size_is_rejected() {
        let mut bytes = ph_fixture(1);
        bytes[2..4].copy_from_slice(&(HEADER_SIZE as u16).to_be_bytes());
        assert!(frame_section(&bytes).is_err());
    }

    #[test]
    fn header_length_one_more_than_header_size_is_payload_size_mismatch() {
        let mut bytes = ph_fixture(1);
        bytes.truncate(HEADER_SIZE + 1);
        bytes[2..4].copy_from_slice(&((HEADER_SIZE + 1) as u16).to_be_bytes());
        assert!(frame_section(&bytes).is_err());
    }

    #[test]
    fn unknown_section_id_is_generic_with_no_payload_params() {
        let mut bytes = ph_fixture(1);
        bytes[0] = b'Z';
        bytes[1] = b'Z';
        let section = frame_section(&bytes).unwrap();
        assert_eq!(section.name(), "General data (unknown section type)");
        assert!(section.params().is_empty());
    }

    #[test]
    fn ud_section_without_a_registered_plugin_falls_back_to_hex_dump() {
        let mut bytes = vec![
            0x55, 0x44, // "UD"
            0x00, 0x0c, // length 12
            0x01, 0x00, 0xfe, 0xed,
        ];
        bytes.extend_from_slice(&[0xaa, 0xbb, 0xcc, 0xdd]);
        let section = frame_section(&bytes).unwrap();
        assert_eq!(section.params().len(), 1);
        assert!(matches!(&section.params()[0], Param::Raw(_)));
    }

    #[test]
    fn round_trip_header_and_payload_bytes() {
        let bytes = ph_fixture(1);
        let section = frame_section(&bytes).unwrap();
        let mut round = section.header().to_bytes().to_vec();
        round.extend_from_slice(section.payload());
        let reparsed = frame_section(&round).unwrap();
        assert_eq!(reparsed.header(), section.header());
        assert_eq!(reparsed.payload(), section.payload());
    }
}
