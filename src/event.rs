//! The top-level parse driver: peels an optional leading IPMI SEL record,
//! then frames and accumulates sections, honoring the section count the
//! Private Header declares.
use crate::error::FormatError;
use crate::io::be_u16;
use crate::section::{self, Section};
use crate::sel_record::{SelRecord, SEL_RECORD_SIZE};

/// A decoded eSEL/PEL record: an optional IPMI SEL prefix, and the ordered
/// list of sections the Private Header's section count declared.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    sel_record: Option<SelRecord>,
    sections: Vec<Section>,
}

impl Event {
    /// Parses `bytes` as an eSEL/PEL blob.
    ///
    /// A caller that wants to observe a partially-built event after a
    /// `FormatError` raised mid-loop should catch the error at a higher
    /// level and re-run parsing on a truncated prefix; `parse` itself does
    /// not return partial results (see the error-handling design notes).
    pub fn parse(bytes: &[u8]) -> Result<Self, FormatError> {
        if bytes.len() < section::PH_PAYLOAD_SIZE {
            return Err(FormatError::new("eSEL buffer too small"));
        }

        let mut cursor = 0usize;
        let mut sel_record = None;
        let leading_id = be_u16(&bytes[0..2]);
        if leading_id != 0x5048 {
            sel_record = Some(SelRecord::parse(bytes)?);
            cursor = SEL_RECORD_SIZE;
            tracing::trace!(record_id = sel_record.unwrap().record_id, "peeled leading SEL record");
        }

        if bytes.len() < cursor + section::PH_PAYLOAD_SIZE {
            return Err(FormatError::new(
                "eSEL buffer too small to fit Private Header",
            ));
        }
        if be_u16(&bytes[cursor..cursor + 2]) != 0x5048 {
            return Err(FormatError::new("Private Header section not found"));
        }

        let ph_section = section::frame_section(&bytes[cursor..])?;
        let section_count = ph_section
            .ph_data()
            .expect("section framed from a PH id always carries PhData")
            .section_count;
        tracing::debug!(section_count, "Private Header framed");

        let mut sections = Vec::with_capacity(section_count as usize);
        cursor += ph_section.header().length as usize;
        sections.push(ph_section);

        for _ in 1..section_count {
            if cursor >= bytes.len() {
                return Err(FormatError::new(format!(
                    "Unexpected buffer end at offset {cursor}"
                )));
            }
            let next = section::frame_section(&bytes[cursor..])?;
            cursor += next.header().length as usize;
            sections.push(next);
        }

        Ok(Self {
            sel_record,
            sections,
        })
    }

    /// The optional leading IPMI SEL record.
    pub fn sel_record(&self) -> Option<&SelRecord> {
        self.sel_record.as_ref()
    }

    /// The event's sections, in wire order; the first is always `PH` after
    /// a successful parse.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }
}
