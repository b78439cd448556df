use crate::data_types::survey::{Survey, Timestamp};

use super::codec::WireType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    UInt32,
    String,
    Float,
    Timestamp,
}

impl FieldKind {
    pub fn wire_type(self) -> WireType {
        match self {
            FieldKind::UInt32 => WireType::Varint,
            FieldKind::String | FieldKind::Timestamp => WireType::LengthDelimited,
            FieldKind::Float => WireType::Fixed32,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurveyField {
    Id,
    RoadId,
    RoadCode,
    User,
    Source,
    DateUpdated,
    DateSurveyed,
    ChainageStart,
    ChainageEnd,
    Values,
    AddedBy,
}

#[derive(Debug)]
pub struct FieldSpec {
    pub number: u32,
    pub name: &'static str,
    pub kind: FieldKind,
    pub field: SurveyField,
}

/// Survey message layout, in the order fields are written.
pub static SURVEY_SCHEMA: [FieldSpec; 11] = [
    FieldSpec { number: 1, name: "id", kind: FieldKind::UInt32, field: SurveyField::Id },
    FieldSpec { number: 12, name: "roadId", kind: FieldKind::UInt32, field: SurveyField::RoadId },
    FieldSpec { number: 2, name: "roadCode", kind: FieldKind::String, field: SurveyField::RoadCode },
    FieldSpec { number: 3, name: "user", kind: FieldKind::UInt32, field: SurveyField::User },
    FieldSpec { number: 9, name: "source", kind: FieldKind::String, field: SurveyField::Source },
    FieldSpec { number: 4, name: "dateUpdated", kind: FieldKind::Timestamp, field: SurveyField::DateUpdated },
    FieldSpec { number: 8, name: "dateSurveyed", kind: FieldKind::Timestamp, field: SurveyField::DateSurveyed },
    FieldSpec { number: 5, name: "chainageStart", kind: FieldKind::Float, field: SurveyField::ChainageStart },
    FieldSpec { number: 6, name: "chainageEnd", kind: FieldKind::Float, field: SurveyField::ChainageEnd },
    FieldSpec { number: 7, name: "values", kind: FieldKind::String, field: SurveyField::Values },
    FieldSpec { number: 11, name: "addedBy", kind: FieldKind::String, field: SurveyField::AddedBy },
];

pub fn survey_field(number: u32) -> Option<&'static FieldSpec> {
    SURVEY_SCHEMA.iter().find(|spec| spec.number == number)
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    UInt32(u32),
    String(String),
    Float(f32),
    Timestamp(Option<Timestamp>),
}

impl FieldValue {
    pub fn default_for(kind: FieldKind) -> Self {
        match kind {
            FieldKind::UInt32 => FieldValue::UInt32(0),
            FieldKind::String => FieldValue::String(String::new()),
            FieldKind::Float => FieldValue::Float(0.0),
            FieldKind::Timestamp => FieldValue::Timestamp(None),
        }
    }

    pub fn is_default(&self) -> bool {
        match self {
            FieldValue::UInt32(value) => *value == 0,
            FieldValue::String(value) => value.is_empty(),
            FieldValue::Float(value) => *value == 0.0,
            FieldValue::Timestamp(value) => value.is_none(),
        }
    }
}

impl Survey {
    pub fn get(&self, field: SurveyField) -> FieldValue {
        match field {
            SurveyField::Id => FieldValue::UInt32(self.id),
            SurveyField::RoadId => FieldValue::UInt32(self.road_id),
            SurveyField::RoadCode => FieldValue::String(self.road_code.clone()),
            SurveyField::User => FieldValue::UInt32(self.user),
            SurveyField::Source => FieldValue::String(self.source.clone()),
            SurveyField::DateUpdated => FieldValue::Timestamp(self.date_updated),
            SurveyField::DateSurveyed => FieldValue::Timestamp(self.date_surveyed),
            SurveyField::ChainageStart => FieldValue::Float(self.chainage_start),
            SurveyField::ChainageEnd => FieldValue::Float(self.chainage_end),
            SurveyField::Values => FieldValue::String(self.values.clone()),
            SurveyField::AddedBy => FieldValue::String(self.added_by.clone()),
        }
    }

    /// Assigns `value` to `field`, handing the value back when its kind does
    /// not match the field.
    pub fn set(&mut self, field: SurveyField, value: FieldValue) -> Result<(), FieldValue> {
        match (field, value) {
            (SurveyField::Id, FieldValue::UInt32(value)) => self.id = value,
            (SurveyField::RoadId, FieldValue::UInt32(value)) => self.road_id = value,
            (SurveyField::RoadCode, FieldValue::String(value)) => self.road_code = value,
            (SurveyField::User, FieldValue::UInt32(value)) => self.user = value,
            (SurveyField::Source, FieldValue::String(value)) => self.source = value,
            (SurveyField::DateUpdated, FieldValue::Timestamp(value)) => self.date_updated = value,
            (SurveyField::DateSurveyed, FieldValue::Timestamp(value)) => self.date_surveyed = value,
            (SurveyField::ChainageStart, FieldValue::Float(value)) => self.chainage_start = value,
            (SurveyField::ChainageEnd, FieldValue::Float(value)) => self.chainage_end = value,
            (SurveyField::Values, FieldValue::String(value)) => self.values = value,
            (SurveyField::AddedBy, FieldValue::String(value)) => self.added_by = value,
            (_, value) => return Err(value),
        }

        Ok(())
    }
}
