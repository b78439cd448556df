use crate::data_types::survey::{Survey, Surveys, Timestamp};

use super::{
    codec::{WireReader, WireType, WireWriter},
    error::DecodeError,
    schema::{survey_field, FieldKind, FieldSpec, FieldValue, SURVEY_SCHEMA},
};

const SURVEYS_FIELD: u32 = 1;
const TIMESTAMP_SECONDS_FIELD: u32 = 1;
const TIMESTAMP_NANOS_FIELD: u32 = 2;

/// Encodes a survey, writing only fields that differ from their default.
pub fn encode_survey(survey: &Survey) -> Vec<u8> {
    let mut writer = WireWriter::new();
    write_survey(&mut writer, survey);

    writer.into_bytes()
}

pub fn encode_surveys(surveys: &Surveys) -> Vec<u8> {
    let mut writer = WireWriter::new();

    for survey in surveys {
        writer.write_bytes(SURVEYS_FIELD, &encode_survey(survey));
    }

    writer.into_bytes()
}

pub fn decode_survey(bytes: &[u8]) -> Result<Survey, DecodeError> {
    let mut reader = WireReader::new(bytes);
    let mut survey = Survey::default();

    while !reader.is_at_end() {
        let (number, wire_type) = reader.read_tag()?;

        match survey_field(number) {
            Some(spec) => {
                let value = read_field(&mut reader, spec, wire_type)?;
                survey
                    .set(spec.field, value)
                    .map_err(|_| mismatch(spec, wire_type))?;
            }
            None => reader.skip(number, wire_type)?,
        }
    }

    Ok(survey)
}

pub fn decode_surveys(bytes: &[u8]) -> Result<Surveys, DecodeError> {
    let mut reader = WireReader::new(bytes);
    let mut surveys: Vec<Survey> = Vec::new();

    while !reader.is_at_end() {
        let (number, wire_type) = reader.read_tag()?;

        if number != SURVEYS_FIELD {
            reader.skip(number, wire_type)?;
            continue;
        }

        if wire_type != WireType::LengthDelimited {
            return Err(DecodeError::WireTypeMismatch {
                field: SURVEYS_FIELD,
                name: "surveys",
                expected: WireType::LengthDelimited,
                found: wire_type,
            });
        }

        surveys.push(decode_survey(reader.read_bytes()?)?);
    }

    Ok(Surveys { surveys })
}

fn write_survey(writer: &mut WireWriter, survey: &Survey) {
    for spec in &SURVEY_SCHEMA {
        let value = survey.get(spec.field);
        if value.is_default() {
            continue;
        }

        match value {
            FieldValue::UInt32(value) => writer.write_uint32(spec.number, value),
            FieldValue::String(value) => writer.write_string(spec.number, &value),
            FieldValue::Float(value) => writer.write_float(spec.number, value),
            FieldValue::Timestamp(Some(timestamp)) => {
                writer.write_bytes(spec.number, &encode_timestamp(&timestamp))
            }
            FieldValue::Timestamp(None) => {}
        }
    }
}

fn read_field(
    reader: &mut WireReader,
    spec: &FieldSpec,
    wire_type: WireType,
) -> Result<FieldValue, DecodeError> {
    if wire_type != spec.kind.wire_type() {
        return Err(mismatch(spec, wire_type));
    }

    let value = match spec.kind {
        FieldKind::UInt32 => FieldValue::UInt32(reader.read_uint32()?),
        FieldKind::String => FieldValue::String(reader.read_string(spec.number)?),
        FieldKind::Float => FieldValue::Float(reader.read_float()?),
        FieldKind::Timestamp => FieldValue::Timestamp(Some(decode_timestamp(reader.read_bytes()?)?)),
    };

    Ok(value)
}

fn mismatch(spec: &FieldSpec, found: WireType) -> DecodeError {
    DecodeError::WireTypeMismatch {
        field: spec.number,
        name: spec.name,
        expected: spec.kind.wire_type(),
        found,
    }
}

fn encode_timestamp(timestamp: &Timestamp) -> Vec<u8> {
    let mut writer = WireWriter::new();

    if timestamp.seconds != 0 {
        writer.write_int64(TIMESTAMP_SECONDS_FIELD, timestamp.seconds);
    }
    if timestamp.nanos != 0 {
        writer.write_int32(TIMESTAMP_NANOS_FIELD, timestamp.nanos);
    }

    writer.into_bytes()
}

fn decode_timestamp(bytes: &[u8]) -> Result<Timestamp, DecodeError> {
    let mut reader = WireReader::new(bytes);
    let mut timestamp = Timestamp::default();

    while !reader.is_at_end() {
        let (number, wire_type) = reader.read_tag()?;

        match (number, wire_type) {
            (TIMESTAMP_SECONDS_FIELD, WireType::Varint) => timestamp.seconds = reader.read_int64()?,
            (TIMESTAMP_NANOS_FIELD, WireType::Varint) => timestamp.nanos = reader.read_int32()?,
            (TIMESTAMP_SECONDS_FIELD, found) => {
                return Err(DecodeError::WireTypeMismatch {
                    field: number,
                    name: "seconds",
                    expected: WireType::Varint,
                    found,
                })
            }
            (TIMESTAMP_NANOS_FIELD, found) => {
                return Err(DecodeError::WireTypeMismatch {
                    field: number,
                    name: "nanos",
                    expected: WireType::Varint,
                    found,
                })
            }
            _ => reader.skip(number, wire_type)?,
        }
    }

    Ok(timestamp)
}
