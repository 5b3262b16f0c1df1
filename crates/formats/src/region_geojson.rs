//! GeoJSON FeatureCollection -> named region polygons.
//!
//! Each feature yields at most one `RegionGeometry`:
//! - `Polygon`: the outer ring.
//! - `MultiPolygon`: the outer ring of the member with the largest area.
//!
//! Features without geometry or with other geometry types are skipped.
//! Malformed features are logged and skipped; only a payload that is not a
//! FeatureCollection at all is an error.

use foundation::math::{Vec2, largest_ring};
use scene::RegionGeometry;
use serde_json::{Map, Value};

/// Natural Earth's placeholder for "no ISO code".
const MISSING_ISO: &str = "-99";

const CODE_PROPERTIES: [&str; 4] = ["iso_a2", "ISO_A2", "iso_a3", "ISO_A3"];

#[derive(Debug)]
pub enum RegionGeometryError {
    Json(serde_json::Error),
    NotAFeatureCollection,
}

impl std::fmt::Display for RegionGeometryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegionGeometryError::Json(e) => write!(f, "JSON parse error: {e}"),
            RegionGeometryError::NotAFeatureCollection => {
                write!(f, "expected GeoJSON FeatureCollection")
            }
        }
    }
}

impl std::error::Error for RegionGeometryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RegionGeometryError::Json(e) => Some(e),
            RegionGeometryError::NotAFeatureCollection => None,
        }
    }
}

pub fn regions_from_geojson_str(payload: &str) -> Result<Vec<RegionGeometry>, RegionGeometryError> {
    let value: Value = serde_json::from_str(payload).map_err(RegionGeometryError::Json)?;
    regions_from_geojson_value(&value)
}

pub fn regions_from_geojson_value(
    value: &Value,
) -> Result<Vec<RegionGeometry>, RegionGeometryError> {
    let obj = value
        .as_object()
        .ok_or(RegionGeometryError::NotAFeatureCollection)?;
    if obj.get("type").and_then(|v| v.as_str()) != Some("FeatureCollection") {
        return Err(RegionGeometryError::NotAFeatureCollection);
    }
    let features = obj
        .get("features")
        .and_then(|v| v.as_array())
        .ok_or(RegionGeometryError::NotAFeatureCollection)?;

    let mut out = Vec::with_capacity(features.len());
    for (index, feature) in features.iter().enumerate() {
        match parse_feature(index, feature) {
            Ok(Some(region)) => out.push(region),
            Ok(None) => {}
            Err(reason) => tracing::warn!(index, %reason, "skipping region feature"),
        }
    }

    tracing::info!(features = features.len(), regions = out.len(), "parsed region geometry");
    Ok(out)
}

fn parse_feature(index: usize, feature: &Value) -> Result<Option<RegionGeometry>, String> {
    let obj = feature
        .as_object()
        .ok_or("feature must be an object".to_string())?;
    let geometry = match obj.get("geometry") {
        None | Some(Value::Null) => return Ok(None),
        Some(g) => g,
    };

    let empty = Map::new();
    let properties = obj
        .get("properties")
        .and_then(|v| v.as_object())
        .unwrap_or(&empty);

    let Some(ring) = outer_ring(geometry)? else {
        return Ok(None);
    };

    let name = ["name", "name_en"]
        .iter()
        .find_map(|key| non_empty_str(properties.get(*key)))
        .map(str::to_string)
        .unwrap_or_else(|| format!("Region {index}"));

    let mut region = RegionGeometry::new(name, ring);
    region.code = CODE_PROPERTIES
        .iter()
        .filter_map(|key| non_empty_str(properties.get(*key)))
        .find(|code| *code != MISSING_ISO)
        .map(str::to_string);
    Ok(Some(region))
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// The ring a region is built from, or `None` for unsupported geometry types.
fn outer_ring(geometry: &Value) -> Result<Option<Vec<Vec2>>, String> {
    let obj = geometry
        .as_object()
        .ok_or("geometry must be an object".to_string())?;
    let ty = obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or("geometry missing type".to_string())?;
    let coords = obj
        .get("coordinates")
        .ok_or("geometry missing coordinates".to_string())?;

    match ty {
        "Polygon" => {
            let rings = parse_polygon(coords)?;
            rings
                .into_iter()
                .next()
                .map(Some)
                .ok_or("Polygon has no rings".to_string())
        }
        "MultiPolygon" => {
            let polys = coords
                .as_array()
                .ok_or("MultiPolygon coordinates must be an array of polygons".to_string())?;
            let mut outers = Vec::with_capacity(polys.len());
            for poly in polys {
                if let Some(outer) = parse_polygon(poly)?.into_iter().next() {
                    outers.push(outer);
                }
            }
            let best = largest_ring(&outers).ok_or("MultiPolygon has no rings".to_string())?;
            Ok(Some(outers.swap_remove(best)))
        }
        _ => Ok(None),
    }
}

fn parse_polygon(coords: &Value) -> Result<Vec<Vec<Vec2>>, String> {
    let rings = coords
        .as_array()
        .ok_or("Polygon coordinates must be an array of rings".to_string())?;
    let mut out = Vec::with_capacity(rings.len());
    for ring in rings {
        out.push(parse_ring(ring)?);
    }
    Ok(out)
}

fn parse_ring(coords: &Value) -> Result<Vec<Vec2>, String> {
    let arr = coords
        .as_array()
        .ok_or("ring must be an array of positions".to_string())?;
    let mut out = Vec::with_capacity(arr.len());
    for pos in arr {
        let pair = pos
            .as_array()
            .filter(|p| p.len() >= 2)
            .ok_or("position must be [lon, lat]".to_string())?;
        let lon = pair[0].as_f64().ok_or("lon must be a number".to_string())?;
        let lat = pair[1].as_f64().ok_or("lat must be a number".to_string())?;
        out.push(Vec2::new(lon, lat));
    }
    Ok(out)
}
