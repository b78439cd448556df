use data_types::{
    estrada::{make_estrada_object, EstradaSurvey},
    feature::Properties,
};
use map::{MapError, MapSession, MapSurface, RenderedLayerGroup};
use util::settings::{Settings, SettingsError};
use wire::DecodeError;

pub mod data_types;
pub mod map;
pub mod wire;

mod util;

pub use util::{chainage, geo, logging, settings, DateTimeUtils};

pub struct App {
    settings: Settings,
    map_session: MapSession,
}

impl App {
    const CC: &'static str = "App";

    /// Builds the app from `estrada.toml` in the working directory.
    pub fn new() -> Result<Self, SettingsError> {
        Ok(Self::with_settings(Settings::load()?))
    }

    pub fn with_settings(settings: Settings) -> Self {
        settings.apply_logging();

        Self {
            map_session: MapSession::with_settings(&settings.map),
            settings,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn map_session(&self) -> &MapSession {
        &self.map_session
    }

    pub fn decode_survey(&self, bytes: &[u8]) -> Result<EstradaSurvey, DecodeError> {
        let survey = wire::decode_survey(bytes)?;

        Ok(make_estrada_object(&survey))
    }

    pub fn decode_surveys(&self, bytes: &[u8]) -> Result<Vec<EstradaSurvey>, DecodeError> {
        let surveys = match wire::decode_surveys(bytes) {
            Ok(surveys) => surveys,
            Err(err) => {
                logln!("Rejected {} bytes of survey data: {}", bytes.len(), err);
                return Err(err);
            }
        };

        logvbln!("Decoded {} surveys from {} bytes", surveys.len(), bytes.len());

        Ok(surveys
            .iter()
            .map(|survey| make_estrada_object::<EstradaSurvey>(survey))
            .collect())
    }

    pub fn render_features<S: MapSurface>(
        &mut self,
        geojson: &str,
        surface: &mut S,
    ) -> Result<RenderedLayerGroup, MapError> {
        self.map_session.render_json(geojson, surface)
    }

    pub fn filter_features<S, P>(&self, predicate: P, surface: &mut S)
    where
        S: MapSurface,
        P: FnMut(&Properties) -> bool,
    {
        self.map_session.filter(predicate, surface)
    }

    pub fn clear_map(&mut self) {
        self.map_session.clear();
    }
}
