use geo_types::{Coord, Geometry, LineString, Polygon, Rect};

pub struct GeoUtils;

impl GeoUtils {
    // Returns every vertex of the geometry, polygon interiors included
    pub fn coords_of(geometry: &Geometry) -> Vec<Coord> {
        let mut coords: Vec<Coord> = Vec::new();
        GeoUtils::collect_coords(geometry, &mut coords);

        coords
    }

    fn collect_coords(geometry: &Geometry, coords: &mut Vec<Coord>) {
        let line_coords = |line: &LineString, coords: &mut Vec<Coord>| {
            coords.extend(line.coords().cloned());
        };

        let polygon_coords = |polygon: &Polygon, coords: &mut Vec<Coord>| {
            line_coords(polygon.exterior(), coords);
            polygon
                .interiors()
                .iter()
                .for_each(|interior| line_coords(interior, coords));
        };

        match geometry {
            Geometry::Point(point) => coords.push(point.0),
            Geometry::Line(line) => coords.extend([line.start, line.end]),
            Geometry::LineString(line) => line_coords(line, coords),
            Geometry::Polygon(polygon) => polygon_coords(polygon, coords),
            Geometry::MultiPoint(points) => coords.extend(points.iter().map(|point| point.0)),
            Geometry::MultiLineString(lines) => {
                lines.iter().for_each(|line| line_coords(line, coords))
            }
            Geometry::MultiPolygon(polygons) => polygons
                .iter()
                .for_each(|polygon| polygon_coords(polygon, coords)),
            Geometry::GeometryCollection(collection) => collection
                .iter()
                .for_each(|inner| GeoUtils::collect_coords(inner, coords)),
            Geometry::Rect(rect) => coords.extend([rect.min(), rect.max()]),
            Geometry::Triangle(triangle) => coords.extend([triangle.0, triangle.1, triangle.2]),
        }
    }

    pub fn get_bounding_box<'a>(coords: impl IntoIterator<Item = &'a Coord>) -> Option<Rect> {
        let mut coords = coords.into_iter();
        let first = *coords.next()?;

        let (min, max) = coords.fold((first, first), |(min, max), coord| {
            (
                Coord::from((coord.x.min(min.x), coord.y.min(min.y))),
                Coord::from((coord.x.max(max.x), coord.y.max(max.y))),
            )
        });

        Some(Rect::new(min, max))
    }

    pub fn merge_bounding_boxes(left: Option<Rect>, right: Option<Rect>) -> Option<Rect> {
        match (left, right) {
            (Some(left), Some(right)) => {
                GeoUtils::get_bounding_box(&[left.min(), left.max(), right.min(), right.max()])
            }
            (left, None) => left,
            (None, right) => right,
        }
    }

    pub fn get_center_of_bbox(bbox: &Rect) -> Coord {
        Coord::from((
            (bbox.min().x + bbox.max().x) / 2.,
            (bbox.min().y + bbox.max().y) / 2.,
        ))
    }
}
