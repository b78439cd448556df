//! Low-level protocol buffer primitives: varints, tags, fixed-width scalars
//! and length-delimited payloads.

use super::error::DecodeError;

const MAX_VARINT_LEN: usize = 10;
const MAX_FIELD_NUMBER: u64 = (1 << 29) - 1;
pub const MAX_GROUP_DEPTH: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum WireType {
    Varint = 0,
    Fixed64 = 1,
    LengthDelimited = 2,
    StartGroup = 3,
    EndGroup = 4,
    Fixed32 = 5,
}

impl WireType {
    fn from_u8(value: u8, offset: usize) -> Result<Self, DecodeError> {
        match value {
            0 => Ok(WireType::Varint),
            1 => Ok(WireType::Fixed64),
            2 => Ok(WireType::LengthDelimited),
            3 => Ok(WireType::StartGroup),
            4 => Ok(WireType::EndGroup),
            5 => Ok(WireType::Fixed32),
            _ => Err(DecodeError::InvalidWireType {
                wire_type: value,
                offset,
            }),
        }
    }
}

pub struct WireReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.buf.len()
    }

    pub fn read_varint(&mut self) -> Result<u64, DecodeError> {
        let start = self.pos;
        let mut value: u64 = 0;

        for index in 0..MAX_VARINT_LEN {
            let byte = *self
                .buf
                .get(self.pos)
                .ok_or(DecodeError::UnexpectedEof { offset: self.pos })?;
            self.pos += 1;

            value |= ((byte & 0x7f) as u64).wrapping_shl(7 * index as u32);

            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }

        Err(DecodeError::VarintOverflow { offset: start })
    }

    pub fn read_tag(&mut self) -> Result<(u32, WireType), DecodeError> {
        let offset = self.pos;
        let key = self.read_varint()?;

        let number = key >> 3;
        if number == 0 || number > MAX_FIELD_NUMBER {
            return Err(DecodeError::InvalidFieldNumber { number, offset });
        }

        Ok((number as u32, WireType::from_u8((key & 0x7) as u8, offset)?))
    }

    // uint32 fields are truncated from the full 64 bit varint
    pub fn read_uint32(&mut self) -> Result<u32, DecodeError> {
        Ok(self.read_varint()? as u32)
    }

    pub fn read_int32(&mut self) -> Result<i32, DecodeError> {
        Ok(self.read_varint()? as i32)
    }

    pub fn read_int64(&mut self) -> Result<i64, DecodeError> {
        Ok(self.read_varint()? as i64)
    }

    pub fn read_float(&mut self) -> Result<f32, DecodeError> {
        let bytes = self.take(4)?;

        Ok(f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn read_bytes(&mut self) -> Result<&'a [u8], DecodeError> {
        let offset = self.pos;
        let len = self.read_varint()?;
        let len = usize::try_from(len).map_err(|_| DecodeError::UnexpectedEof { offset })?;

        self.take(len)
    }

    pub fn read_string(&mut self, field: u32) -> Result<String, DecodeError> {
        let bytes = self.read_bytes()?;

        String::from_utf8(bytes.to_vec()).map_err(|_| DecodeError::InvalidUtf8 { field })
    }

    /// Skips the value of a field this reader has no schema entry for.
    pub fn skip(&mut self, field: u32, wire_type: WireType) -> Result<(), DecodeError> {
        self.skip_nested(field, wire_type, 0)
    }

    fn skip_nested(&mut self, field: u32, wire_type: WireType, depth: u32) -> Result<(), DecodeError> {
        match wire_type {
            WireType::Varint => {
                self.read_varint()?;
            }
            WireType::Fixed64 => {
                self.take(8)?;
            }
            WireType::LengthDelimited => {
                self.read_bytes()?;
            }
            WireType::Fixed32 => {
                self.take(4)?;
            }
            WireType::StartGroup => self.skip_group(field, depth + 1)?,
            WireType::EndGroup => return Err(DecodeError::UnexpectedEndGroup { field }),
        }

        Ok(())
    }

    fn skip_group(&mut self, field: u32, depth: u32) -> Result<(), DecodeError> {
        if depth > MAX_GROUP_DEPTH {
            return Err(DecodeError::RecursionLimitExceeded {
                field,
                limit: MAX_GROUP_DEPTH,
            });
        }

        loop {
            if self.is_at_end() {
                return Err(DecodeError::UnterminatedGroup { field });
            }

            let (inner_field, wire_type) = self.read_tag()?;
            if wire_type == WireType::EndGroup {
                if inner_field == field {
                    return Ok(());
                }
                return Err(DecodeError::UnexpectedEndGroup { field: inner_field });
            }

            self.skip_nested(inner_field, wire_type, depth)?;
        }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= self.buf.len())
            .ok_or(DecodeError::UnexpectedEof { offset: self.pos })?;

        let bytes = &self.buf[self.pos..end];
        self.pos = end;

        Ok(bytes)
    }
}

#[derive(Default)]
pub struct WireWriter {
    buf: Vec<u8>,
}

impl WireWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn write_varint(&mut self, mut value: u64) {
        while value >= 0x80 {
            self.buf.push((value as u8 & 0x7f) | 0x80);
            value >>= 7;
        }
        self.buf.push(value as u8);
    }

    pub fn write_tag(&mut self, field: u32, wire_type: WireType) {
        self.write_varint(((field as u64) << 3) | wire_type as u64);
    }

    pub fn write_uint32(&mut self, field: u32, value: u32) {
        self.write_tag(field, WireType::Varint);
        self.write_varint(value as u64);
    }

    // Negative values are sign extended to ten bytes
    pub fn write_int32(&mut self, field: u32, value: i32) {
        self.write_tag(field, WireType::Varint);
        self.write_varint(value as i64 as u64);
    }

    pub fn write_int64(&mut self, field: u32, value: i64) {
        self.write_tag(field, WireType::Varint);
        self.write_varint(value as u64);
    }

    pub fn write_float(&mut self, field: u32, value: f32) {
        self.write_tag(field, WireType::Fixed32);
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_bytes(&mut self, field: u32, bytes: &[u8]) {
        self.write_tag(field, WireType::LengthDelimited);
        self.write_varint(bytes.len() as u64);
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_string(&mut self, field: u32, value: &str) {
        self.write_bytes(field, value.as_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_varint_encoding() {
        let mut writer = WireWriter::new();
        writer.write_varint(1);
        writer.write_varint(300);
        writer.write_varint(u64::MAX);

        let bytes = writer.into_bytes();
        assert_eq!(&bytes[..3], &[0x01, 0xac, 0x02]);
        assert_eq!(bytes.len(), 3 + 10);

        let mut reader = WireReader::new(&bytes);
        assert_eq!(reader.read_varint().unwrap(), 1);
        assert_eq!(reader.read_varint().unwrap(), 300);
        assert_eq!(reader.read_varint().unwrap(), u64::MAX);
        assert!(reader.is_at_end());
    }

    #[test]
    fn test_truncated_varint() {
        let mut reader = WireReader::new(&[0xac]);

        assert_eq!(
            reader.read_varint(),
            Err(DecodeError::UnexpectedEof { offset: 1 })
        );
    }

    #[test]
    fn test_overlong_varint() {
        let bytes = [0xff; 11];
        let mut reader = WireReader::new(&bytes);

        assert_eq!(
            reader.read_varint(),
            Err(DecodeError::VarintOverflow { offset: 0 })
        );
    }

    #[test]
    fn test_uint32_truncates_wide_varint() {
        let mut writer = WireWriter::new();
        writer.write_varint((1u64 << 32) + 7);
        let bytes = writer.into_bytes();

        assert_eq!(WireReader::new(&bytes).read_uint32().unwrap(), 7);
    }

    #[test]
    fn test_negative_int32_is_ten_bytes() {
        let mut writer = WireWriter::new();
        writer.write_int32(2, -1);
        let bytes = writer.into_bytes();

        // one tag byte plus ten varint bytes
        assert_eq!(bytes.len(), 11);

        let mut reader = WireReader::new(&bytes);
        assert_eq!(reader.read_tag().unwrap(), (2, WireType::Varint));
        assert_eq!(reader.read_int32().unwrap(), -1);
    }

    #[test]
    fn test_tag_rejects_field_zero() {
        let mut reader = WireReader::new(&[0x00]);

        assert_eq!(
            reader.read_tag(),
            Err(DecodeError::InvalidFieldNumber {
                number: 0,
                offset: 0
            })
        );
    }

    #[test]
    fn test_tag_rejects_unknown_wire_type() {
        // field 1, wire type 7
        let mut reader = WireReader::new(&[0x0f]);

        assert_eq!(
            reader.read_tag(),
            Err(DecodeError::InvalidWireType {
                wire_type: 7,
                offset: 0
            })
        );
    }

    #[test]
    fn test_length_past_end_of_buffer() {
        // length 5, only 2 bytes follow
        let mut reader = WireReader::new(&[0x05, b'a', b'b']);

        assert!(matches!(
            reader.read_bytes(),
            Err(DecodeError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn test_invalid_utf8_string() {
        let mut reader = WireReader::new(&[0x02, 0xc3, 0x28]);

        assert_eq!(
            reader.read_string(9),
            Err(DecodeError::InvalidUtf8 { field: 9 })
        );
    }

    #[test]
    fn test_float_is_little_endian() {
        let mut writer = WireWriter::new();
        writer.write_float(5, 1.5);
        let bytes = writer.into_bytes();

        assert_eq!(bytes, vec![0x2d, 0x00, 0x00, 0xc0, 0x3f]);
    }

    #[test]
    fn test_skip_every_wire_type() {
        let mut writer = WireWriter::new();
        writer.write_uint32(20, 150);
        writer.write_tag(21, WireType::Fixed64);
        writer.write_varint(0);
        let mut bytes = writer.into_bytes();
        bytes.extend_from_slice(&[0; 7]);

        let mut writer = WireWriter::new();
        writer.write_string(22, "ignored");
        writer.write_float(23, 2.0);
        writer.write_tag(24, WireType::StartGroup);
        writer.write_uint32(1, 3);
        writer.write_tag(24, WireType::EndGroup);
        bytes.extend(writer.into_bytes());

        let mut reader = WireReader::new(&bytes);
        let mut skipped = Vec::new();
        while !reader.is_at_end() {
            let (field, wire_type) = reader.read_tag().unwrap();
            reader.skip(field, wire_type).unwrap();
            skipped.push(field);
        }

        assert_eq!(skipped, vec![20, 21, 22, 23, 24]);
    }

    #[test]
    fn test_unterminated_group() {
        let mut writer = WireWriter::new();
        writer.write_tag(24, WireType::StartGroup);
        writer.write_uint32(1, 3);
        let bytes = writer.into_bytes();

        let mut reader = WireReader::new(&bytes);
        let (field, wire_type) = reader.read_tag().unwrap();

        assert_eq!(
            reader.skip(field, wire_type),
            Err(DecodeError::UnterminatedGroup { field: 24 })
        );
    }

    fn nested_groups(field: u32, depth: usize) -> Vec<u8> {
        let mut writer = WireWriter::new();
        for _ in 0..depth {
            writer.write_tag(field, WireType::StartGroup);
        }
        for _ in 0..depth {
            writer.write_tag(field, WireType::EndGroup);
        }

        writer.into_bytes()
    }

    #[test]
    fn test_group_nesting_up_to_limit() {
        let bytes = nested_groups(20, MAX_GROUP_DEPTH as usize);

        let mut reader = WireReader::new(&bytes);
        let (field, wire_type) = reader.read_tag().unwrap();

        assert_eq!(reader.skip(field, wire_type), Ok(()));
        assert!(reader.is_at_end());
    }

    #[test]
    fn test_group_nesting_past_limit() {
        let bytes = nested_groups(20, MAX_GROUP_DEPTH as usize + 1);

        let mut reader = WireReader::new(&bytes);
        let (field, wire_type) = reader.read_tag().unwrap();

        assert_eq!(
            reader.skip(field, wire_type),
            Err(DecodeError::RecursionLimitExceeded {
                field: 20,
                limit: MAX_GROUP_DEPTH
            })
        );
    }

    #[test]
    fn test_deep_unterminated_groups_do_not_exhaust_stack() {
        // field 20, start group, repeated well past any sane nesting
        let bytes = [0xa3, 0x01].repeat(200_000);

        let mut reader = WireReader::new(&bytes);
        let (field, wire_type) = reader.read_tag().unwrap();

        assert!(matches!(
            reader.skip(field, wire_type),
            Err(DecodeError::RecursionLimitExceeded { .. })
        ));
    }

    #[test]
    fn test_mismatched_end_group() {
        let mut writer = WireWriter::new();
        writer.write_tag(24, WireType::StartGroup);
        writer.write_tag(25, WireType::EndGroup);
        let bytes = writer.into_bytes();

        let mut reader = WireReader::new(&bytes);
        let (field, wire_type) = reader.read_tag().unwrap();

        assert_eq!(
            reader.skip(field, wire_type),
            Err(DecodeError::UnexpectedEndGroup { field: 25 })
        );
    }
}
