//! The optional leading IPMI System Event Log record.
use crate::error::FormatError;
use crate::io::{be_u16, be_u32};
use crate::param::{Numeric, Param, Params};

/// Wire size of a [`SelRecord`], in bytes.
pub const SEL_RECORD_SIZE: usize = 16;

/// An IPMI System Event Log record, optionally prepended to an eSEL blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelRecord {
    pub record_id: u16,
    pub record_type: u8,
    pub time_stamp: u32,
    pub generator_id: u16,
    pub event_revision: u8,
    pub sensor_type: u8,
    pub sensor_num: u8,
    pub event_type: u8,
    pub event_data1: u8,
    pub event_data2: u8,
    pub event_data3: u8,
}

impl SelRecord {
    /// Parses a [`SelRecord`] from the first [`SEL_RECORD_SIZE`] bytes of `data`.
    pub fn parse(data: &[u8]) -> Result<Self, FormatError> {
        if data.len() < SEL_RECORD_SIZE {
            return Err(FormatError::new(format!(
                "Buffer too small to fit SEL record: {} bytes, expected {}",
                data.len(),
                SEL_RECORD_SIZE
            )));
        }
        Ok(Self {
            record_id: be_u16(&data[0..2]),
            record_type: data[2],
            time_stamp: be_u32(&data[3..7]),
            generator_id: be_u16(&data[7..9]),
            event_revision: data[9],
            sensor_type: data[10],
            sensor_num: data[11],
            event_type: data[12],
            event_data1: data[13],
            event_data2: data[14],
            event_data3: data[15],
        })
    }

    /// Human-readable view of the record, in wire field order.
    pub fn params(&self) -> Params {
        vec![
            Param::numeric("Record ID", Numeric::U16(self.record_id)),
            Param::numeric("Record type", Numeric::U8(self.record_type)),
            Param::numeric("Timestamp", Numeric::U32(self.time_stamp)),
            Param::numeric("Generator ID", Numeric::U16(self.generator_id)),
            Param::numeric("Event revision", Numeric::U8(self.event_revision)),
            Param::numeric("Sensor type", Numeric::U8(self.sensor_type)),
            Param::numeric("Sensor number", Numeric::U8(self.sensor_num)),
            Param::numeric("Event type", Numeric::U8(self.event_type)),
            Param::numeric("Event data 1", Numeric::U8(self.event_data1)),
            Param::numeric("Event data 2", Numeric::U8(self.event_data2)),
            Param::numeric("Event data 3", Numeric::U8(self.event_data3)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_small_buffer_is_rejected() {
        let data = [0u8; 15];
        assert!(SelRecord::parse(&data).is_err());
    }

    #[test]
    fn fields_are_read_big_endian() {
        let data = [
            0x12, 0x34, // record id
            0x01, // record type
            0xaa, 0xbb, 0xcc, 0xdd, // timestamp
            0x56, 0x78, // generator id
            0x02, // event revision
            0x03, // sensor type
            0x04, // sensor number
            0x05, // event type
            0x06, 0x07, 0x08, // event data 1..3
        ];
        let record = SelRecord::parse(&data).unwrap();
        assert_eq!(record.record_id, 0x1234);
        assert_eq!(record.time_stamp, 0xaabbccdd);
        assert_eq!(record.generator_id, 0x5678);
        assert_eq!(record.params().len(), 11);
    }
}
