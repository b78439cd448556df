use std::collections::BTreeMap;

use geo_types::{Geometry, Rect};

use crate::{
    data_types::feature::{
        parse_feature_collection, Feature, FeatureCollection, FeaturePk, Properties, RoadFeature,
    },
    logln, logvbln,
    util::{geo::GeoUtils, settings::MapSettings},
};

use super::{
    style::style_from_feature,
    surface::{LayerId, MapSurface},
    MapError,
};

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedLayerGroup {
    pub layers: Vec<LayerId>,
    pub bounds: Option<Rect>,
}

/// Features and their layers for one map, keyed by feature pk.
///
/// Rendering a new collection adds to the tables; entries for features that
/// are no longer rendered stay until [`MapSession::clear`] is called.
pub struct MapSession {
    features: BTreeMap<FeaturePk, Feature>,
    layers: BTreeMap<FeaturePk, LayerId>,
    full_opacity: f32,
    dimmed_opacity: f32,
}

impl Default for MapSession {
    fn default() -> Self {
        Self::with_settings(&MapSettings::default())
    }
}

impl MapSession {
    const CC: &'static str = "MapSession";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: &MapSettings) -> Self {
        Self {
            features: BTreeMap::new(),
            layers: BTreeMap::new(),
            full_opacity: settings.full_opacity,
            dimmed_opacity: settings.dimmed_opacity,
        }
    }

    /// Draws every feature of `collection` on `surface` and tracks it by pk.
    ///
    /// Every feature is checked before anything is drawn, so a collection
    /// with a missing pk or a broken geometry leaves surface and session
    /// untouched.
    pub fn render<S: MapSurface>(
        &mut self,
        collection: &FeatureCollection,
        surface: &mut S,
    ) -> Result<RenderedLayerGroup, MapError> {
        let mut prepared: Vec<(FeaturePk, &Feature, Option<Geometry>)> = Vec::new();

        for (index, feature) in collection.features.iter().enumerate() {
            let pk = feature.pk().ok_or(MapError::MissingPk { index })?;

            let geometry = feature
                .geo_geometry()
                .map_err(|source| MapError::InvalidGeometry {
                    pk: pk.clone(),
                    source,
                })?;

            prepared.push((pk, feature, geometry));
        }

        let mut group = RenderedLayerGroup {
            layers: Vec::with_capacity(prepared.len()),
            bounds: None,
        };

        for (pk, feature, geometry) in prepared {
            if let Some(geometry) = &geometry {
                let bounds = GeoUtils::get_bounding_box(&GeoUtils::coords_of(geometry));
                group.bounds = GeoUtils::merge_bounding_boxes(group.bounds, bounds);
            }

            let style = style_from_feature(feature).with_opacity(self.full_opacity);
            let layer = surface.add_layer(feature, geometry, style);

            if self.layers.insert(pk.clone(), layer).is_some() {
                logvbln!("Feature {} rendered again, tracking newest layer", pk);
            }
            self.features.insert(pk, feature.clone());
            group.layers.push(layer);
        }

        logln!(
            "Rendered {} features, tracking {}",
            group.layers.len(),
            self.features.len()
        );

        Ok(group)
    }

    /// Parses a GeoJSON FeatureCollection and renders it.
    pub fn render_json<S: MapSurface>(
        &mut self,
        geojson: &str,
        surface: &mut S,
    ) -> Result<RenderedLayerGroup, MapError> {
        let collection = parse_feature_collection(geojson)?;

        self.render(&collection, surface)
    }

    /// Highlights features whose properties satisfy `predicate` and dims the
    /// rest. Nothing is hidden or removed.
    pub fn filter<S, P>(&self, mut predicate: P, surface: &mut S)
    where
        S: MapSurface,
        P: FnMut(&Properties) -> bool,
    {
        let never_fails: Result<(), std::convert::Infallible> =
            self.try_filter(|properties| Ok(predicate(properties)), surface);

        if let Err(never) = never_fails {
            match never {}
        }
    }

    /// Like [`MapSession::filter`], but stops at the first predicate error.
    /// Layers visited before the error keep their new style.
    pub fn try_filter<S, P, E>(&self, mut predicate: P, surface: &mut S) -> Result<(), E>
    where
        S: MapSurface,
        P: FnMut(&Properties) -> Result<bool, E>,
    {
        let no_properties = Properties::new();
        let mut highlighted = 0;

        for (pk, feature) in &self.features {
            let Some(&layer) = self.layers.get(pk) else {
                continue;
            };

            let base = style_from_feature(feature);
            let properties = feature.properties.as_ref().unwrap_or(&no_properties);
            let style = if predicate(properties)? {
                highlighted += 1;
                base.with_opacity(self.full_opacity)
            } else {
                base.with_opacity(self.dimmed_opacity)
            };

            surface.set_style(layer, style);
        }

        logvbln!(
            "Filter highlighted {} of {} features",
            highlighted,
            self.features.len()
        );

        Ok(())
    }

    /// Forgets every tracked feature and layer. The surface is not touched.
    pub fn clear(&mut self) {
        logln!("Clearing {} tracked features", self.features.len());

        self.features.clear();
        self.layers.clear();
    }

    pub fn feature(&self, pk: &str) -> Option<&Feature> {
        self.features.get(pk)
    }

    pub fn layer(&self, pk: &str) -> Option<LayerId> {
        self.layers.get(pk).copied()
    }

    pub fn pks(&self) -> impl Iterator<Item = &FeaturePk> {
        self.features.keys()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
