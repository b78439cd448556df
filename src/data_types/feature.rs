use geo_types::Geometry;
use serde_json::Value;

pub use geojson::{Feature, FeatureCollection, JsonObject as Properties};

pub type FeaturePk = String;

pub fn parse_feature_collection(json: &str) -> Result<FeatureCollection, serde_json::Error> {
    serde_json::from_str(json)
}

/// Road attributes read from a GeoJSON feature's properties.
pub trait RoadFeature {
    /// The `pk` property as a lookup key; numeric and string pks both work.
    fn pk(&self) -> Option<FeaturePk>;

    fn road_type(&self) -> Option<&str>;

    fn geo_geometry(&self) -> Result<Option<Geometry>, geojson::Error>;
}

impl RoadFeature for Feature {
    fn pk(&self) -> Option<FeaturePk> {
        match self.property("pk")? {
            Value::String(pk) => Some(pk.clone()),
            Value::Number(pk) => Some(pk.to_string()),
            _ => None,
        }
    }

    fn road_type(&self) -> Option<&str> {
        self.property("roadType")?.as_str()
    }

    fn geo_geometry(&self) -> Result<Option<Geometry>, geojson::Error> {
        match &self.geometry {
            Some(geometry) => Ok(Some(Geometry::<f64>::try_from(geometry.clone())?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use geo_types::Coord;

    use super::*;

    const ROADS: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": {"type": "LineString", "coordinates": [[125.57, -8.55, 12.0], [125.6, -8.56]]},
                "properties": {"pk": 17, "roadType": "NAT", "code": "A01"}
            },
            {
                "type": "Feature",
                "geometry": null,
                "properties": {"pk": "r-9", "roadType": "RUR"}
            },
            {
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [125.0, -9.0]},
                "properties": null
            }
        ]
    }"#;

    #[test]
    fn test_parse_feature_collection() {
        let collection = parse_feature_collection(ROADS).unwrap();

        assert_eq!(collection.features.len(), 3);
        assert_eq!(collection.features[0].pk().as_deref(), Some("17"));
        assert_eq!(collection.features[0].road_type(), Some("NAT"));
        assert_eq!(collection.features[1].pk().as_deref(), Some("r-9"));
        assert!(collection.features[1].geometry.is_none());
        assert!(collection.features[2].properties.is_none());
        assert_eq!(collection.features[2].pk(), None);
    }

    #[test]
    fn test_line_string_to_geo_drops_elevation() {
        let collection = parse_feature_collection(ROADS).unwrap();
        let geometry = collection.features[0].geo_geometry().unwrap().unwrap();

        match geometry {
            Geometry::LineString(line) => {
                assert_eq!(line.0.len(), 2);
                assert_eq!(line.0[0], Coord { x: 125.57, y: -8.55 });
            }
            other => panic!("unexpected geometry {:?}", other),
        }
    }

    #[test]
    fn test_null_geometry_has_no_geo_geometry() {
        let collection = parse_feature_collection(ROADS).unwrap();

        assert_eq!(collection.features[1].geo_geometry().unwrap(), None);
    }

    #[test]
    fn test_polygon_rings() {
        let feature: Feature = serde_json::from_str(
            r#"{
                "type": "Feature",
                "geometry": {"type": "Polygon", "coordinates": [
                    [[0, 0], [2, 0], [2, 2], [0, 0]],
                    [[0.5, 0.5], [1, 0.5], [0.5, 0.5]]
                ]},
                "properties": {"pk": 1}
            }"#,
        )
        .unwrap();

        match feature.geo_geometry().unwrap().unwrap() {
            Geometry::Polygon(polygon) => assert_eq!(polygon.interiors().len(), 1),
            other => panic!("unexpected geometry {:?}", other),
        }
    }

    #[test]
    fn test_geometry_collection_converts() {
        let feature: Feature = serde_json::from_str(
            r#"{
                "type": "Feature",
                "geometry": {"type": "GeometryCollection", "geometries": [
                    {"type": "Point", "coordinates": [125.1, -8.7]},
                    {"type": "LineString", "coordinates": [[125.2, -8.8], [125.3, -8.9]]}
                ]},
                "properties": {"pk": 5}
            }"#,
        )
        .unwrap();

        match feature.geo_geometry().unwrap().unwrap() {
            Geometry::GeometryCollection(collection) => assert_eq!(collection.len(), 2),
            other => panic!("unexpected geometry {:?}", other),
        }
    }

    #[test]
    fn test_short_position_is_rejected() {
        let parsed = parse_feature_collection(
            r#"{"type": "FeatureCollection", "features": [{"type": "Feature",
                "geometry": {"type": "MultiLineString", "coordinates": [[[1.0, 2.0], [3.0]]]},
                "properties": {"pk": 1}}]}"#,
        );

        assert!(parsed.is_err());
    }

    #[test]
    fn test_boolean_pk_is_not_a_key() {
        let feature: Feature = serde_json::from_str(
            r#"{"type": "Feature", "geometry": null, "properties": {"pk": true}}"#,
        )
        .unwrap();

        assert_eq!(feature.pk(), None);
    }
}
