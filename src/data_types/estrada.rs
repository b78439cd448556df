use std::ops::Deref;

use serde_derive::Serialize;

use crate::util::chainage::format_chainage;

use super::survey::Survey;

/// A presentation object built from a decoded record.
///
/// The object owns a copy of every attribute of its source and adds
/// display helpers as methods, never as extra attributes.
pub trait EstradaObject: Sized {
    type Source: Clone;

    fn from_source(source: Self::Source) -> Self;

    fn source(&self) -> &Self::Source;
}

/// Copies `record` into a new presentation object of type `T`. The record is
/// left untouched.
pub fn make_estrada_object<T: EstradaObject>(record: &T::Source) -> T {
    T::from_source(record.clone())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EstradaSurvey {
    survey: Survey,
}

impl EstradaObject for EstradaSurvey {
    type Source = Survey;

    fn from_source(survey: Survey) -> Self {
        Self { survey }
    }

    fn source(&self) -> &Survey {
        &self.survey
    }
}

impl Deref for EstradaSurvey {
    type Target = Survey;

    fn deref(&self) -> &Survey {
        &self.survey
    }
}

impl EstradaSurvey {
    pub fn chainage_start_display(&self) -> String {
        format_chainage(self.survey.chainage_start as f64)
    }

    pub fn chainage_end_display(&self) -> String {
        format_chainage(self.survey.chainage_end as f64)
    }

    pub fn chainage_interval(&self) -> String {
        format!(
            "{} - {}",
            self.chainage_start_display(),
            self.chainage_end_display()
        )
    }

    pub fn date_surveyed_display(&self) -> Option<String> {
        self.survey.date_surveyed.and_then(|date| date.to_display())
    }

    pub fn date_updated_display(&self) -> Option<String> {
        self.survey.date_updated.and_then(|date| date.to_display())
    }

    /// The `values` attribute carries a JSON document of surveyed attributes.
    pub fn values_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(&self.survey.values)
    }

    pub fn into_inner(self) -> Survey {
        self.survey
    }
}
