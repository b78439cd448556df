//! Road feature layer: draws GeoJSON features on a [`MapSurface`], colours
//! them by road type and dims the ones a filter predicate rejects.

use thiserror::Error;

use crate::data_types::feature::FeaturePk;

pub mod session;
pub mod style;
pub mod surface;

pub use session::{MapSession, RenderedLayerGroup};
pub use style::{road_color, style_from_feature, LayerStyle, RoadColor};
pub use surface::{LayerId, MapSurface, MemorySurface, SurfaceLayer};

#[derive(Debug, Error)]
pub enum MapError {
    #[error("feature #{index} has no pk property")]
    MissingPk { index: usize },
    #[error("feature {pk} has an invalid geometry")]
    InvalidGeometry {
        pk: FeaturePk,
        #[source]
        source: geojson::Error,
    },
    #[error("malformed GeoJSON")]
    Json(#[from] serde_json::Error),
}
