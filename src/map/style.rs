use serde_derive::Serialize;

use crate::data_types::feature::{Feature, RoadFeature};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RoadColor {
    Black,
    Blue,
    Red,
    Pink,
}

impl RoadColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoadColor::Black => "black",
            RoadColor::Blue => "blue",
            RoadColor::Red => "red",
            RoadColor::Pink => "pink",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayerStyle {
    pub color: RoadColor,
    pub opacity: f32,
}

impl LayerStyle {
    pub fn with_opacity(self, opacity: f32) -> Self {
        Self { opacity, ..self }
    }
}

/// National roads are black, municipal blue, rural red; anything else,
/// including a missing road type, falls back to pink.
pub fn road_color(road_type: Option<&str>) -> RoadColor {
    match road_type {
        Some("NAT") => RoadColor::Black,
        Some("MUN") => RoadColor::Blue,
        Some("RUR") => RoadColor::Red,
        _ => RoadColor::Pink,
    }
}

pub fn style_from_feature(feature: &Feature) -> LayerStyle {
    LayerStyle {
        color: road_color(feature.road_type()),
        opacity: 1.0,
    }
}
