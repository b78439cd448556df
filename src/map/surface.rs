use geo_types::Geometry;

use crate::data_types::feature::{Feature, FeaturePk, RoadFeature};

use super::style::LayerStyle;

pub type LayerId = usize;

/// Anything features can be drawn on.
pub trait MapSurface {
    fn add_layer(&mut self, feature: &Feature, geometry: Option<Geometry>, style: LayerStyle) -> LayerId;

    fn set_style(&mut self, layer: LayerId, style: LayerStyle);
}

#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceLayer {
    pub pk: Option<FeaturePk>,
    pub geometry: Option<Geometry>,
    pub style: LayerStyle,
}

/// Keeps drawn layers in memory, in the order they were added.
#[derive(Debug, Default)]
pub struct MemorySurface {
    layers: Vec<SurfaceLayer>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layer(&self, id: LayerId) -> Option<&SurfaceLayer> {
        self.layers.get(id)
    }

    pub fn layers(&self) -> impl Iterator<Item = (LayerId, &SurfaceLayer)> {
        self.layers.iter().enumerate()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn clear(&mut self) {
        self.layers.clear();
    }
}

impl MapSurface for MemorySurface {
    fn add_layer(&mut self, feature: &Feature, geometry: Option<Geometry>, style: LayerStyle) -> LayerId {
        self.layers.push(SurfaceLayer {
            pk: feature.pk(),
            geometry,
            style,
        });

        self.layers.len() - 1
    }

    fn set_style(&mut self, layer: LayerId, style: LayerStyle) {
        if let Some(layer) = self.layers.get_mut(layer) {
            layer.style = style;
        }
    }
}
