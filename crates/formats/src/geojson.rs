//! Country borders from a GeoJSON `FeatureCollection`.
//!
//! Parsing is lenient per feature: a broken feature is set aside as a
//! [`MalformedFeature`] and the rest of the collection still loads. Only a
//! payload that is not a FeatureCollection at all fails as a whole.

use foundation::math::LonLat;
use scene::CountryIdentity;
use serde_json::{Map, Value};
use thiserror::Error;

/// Name reported for features without a usable `properties.name`.
pub const UNKNOWN_FEATURE_NAME: &str = "unknown";

/// Rings of one polygon: ring 0 is the outer boundary, the rest are holes.
/// Rings are implicitly closed; a repeated first vertex is allowed.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoPolygon {
    pub rings: Vec<Vec<LonLat>>,
}

impl GeoPolygon {
    pub fn outer(&self) -> Option<&[LonLat]> {
        self.rings.first().map(Vec::as_slice)
    }

    pub fn holes(&self) -> &[Vec<LonLat>] {
        self.rings.get(1..).unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CountryFeature {
    pub identity: CountryIdentity,
    pub polygons: Vec<GeoPolygon>,
}

impl CountryFeature {
    pub fn rings(&self) -> impl Iterator<Item = &[LonLat]> {
        self.polygons
            .iter()
            .flat_map(|p| p.rings.iter().map(Vec::as_slice))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("feature {index} ({name}): {reason}")]
pub struct MalformedFeature {
    pub index: usize,
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Error)]
pub enum GeoJsonError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected GeoJSON FeatureCollection")]
    NotAFeatureCollection,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountryCollection {
    pub features: Vec<CountryFeature>,
    /// Features that could not be read, in input order.
    pub rejected: Vec<MalformedFeature>,
}

impl CountryCollection {
    pub fn from_geojson_str(payload: &str) -> Result<Self, GeoJsonError> {
        let value: Value = serde_json::from_str(payload)?;
        Self::from_geojson_value(&value)
    }

    pub fn from_geojson_value(value: &Value) -> Result<Self, GeoJsonError> {
        let obj = value.as_object().ok_or(GeoJsonError::NotAFeatureCollection)?;
        let ty = obj
            .get("type")
            .and_then(|v| v.as_str())
            .ok_or(GeoJsonError::NotAFeatureCollection)?;
        if ty != "FeatureCollection" {
            return Err(GeoJsonError::NotAFeatureCollection);
        }

        let features_val = obj
            .get("features")
            .and_then(|v| v.as_array())
            .ok_or(GeoJsonError::NotAFeatureCollection)?;

        let mut out = Self::default();
        for (index, feat_val) in features_val.iter().enumerate() {
            match parse_feature(feat_val) {
                Ok(feature) => out.features.push(feature),
                Err(reason) => out.rejected.push(MalformedFeature {
                    index,
                    name: feature_name(feat_val).to_string(),
                    reason,
                }),
            }
        }
        Ok(out)
    }

    pub fn find_by_code(&self, code: &str) -> Option<&CountryFeature> {
        self.features
            .iter()
            .find(|f| f.identity.code.as_deref() == Some(code))
    }
}

fn properties(feat_val: &Value) -> Option<&Map<String, Value>> {
    feat_val.get("properties").and_then(|v| v.as_object())
}

fn feature_name(feat_val: &Value) -> &str {
    properties(feat_val)
        .and_then(|p| p.get("name"))
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .unwrap_or(UNKNOWN_FEATURE_NAME)
}

fn parse_feature(feat_val: &Value) -> Result<CountryFeature, String> {
    let feat_obj = feat_val
        .as_object()
        .ok_or("feature must be an object".to_string())?;
    match feat_obj.get("type").and_then(|v| v.as_str()) {
        Some("Feature") => {}
        Some(other) => return Err(format!("unexpected feature type: {other}")),
        None => return Err("feature missing type".to_string()),
    }

    let code = properties(feat_val)
        .and_then(|p| p.get("iso_a2"))
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    let identity = CountryIdentity::new(feature_name(feat_val), code);

    let geometry = match feat_obj.get("geometry") {
        None | Some(Value::Null) => return Err("feature missing geometry".to_string()),
        Some(g) => g,
    };
    let polygons = parse_geometry(geometry)?;

    Ok(CountryFeature { identity, polygons })
}

fn parse_geometry(value: &Value) -> Result<Vec<GeoPolygon>, String> {
    let obj = value
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
        "Polygon" => Ok(vec![parse_polygon(coords)?]),
        "MultiPolygon" => parse_multi_polygon(coords),
        other => Err(format!("unsupported geometry type: {other}")),
    }
}

fn parse_position(coords: &Value) -> Result<LonLat, String> {
    let arr = coords
        .as_array()
        .ok_or("position must be an array".to_string())?;
    if arr.len() < 2 {
        return Err("position must have [lon, lat]".to_string());
    }
    let lon = arr[0].as_f64().ok_or("lon must be a number".to_string())?;
    let lat = arr[1].as_f64().ok_or("lat must be a number".to_string())?;
    let p = LonLat::new(lon, lat);
    if !p.is_finite() {
        return Err("position must be finite".to_string());
    }
    if !(-90.0..=90.0).contains(&lat) {
        return Err(format!("latitude {lat} out of range"));
    }
    Ok(p)
}

fn parse_ring(coords: &Value) -> Result<Vec<LonLat>, String> {
    let arr = coords
        .as_array()
        .ok_or("ring must be an array of positions".to_string())?;
    arr.iter().map(parse_position).collect()
}

fn parse_polygon(coords: &Value) -> Result<GeoPolygon, String> {
    let rings = coords
        .as_array()
        .ok_or("Polygon coordinates must be an array of rings".to_string())?;
    if rings.is_empty() {
        return Err("polygon has no rings".to_string());
    }
    let rings = rings.iter().map(parse_ring).collect::<Result<_, _>>()?;
    Ok(GeoPolygon { rings })
}

fn parse_multi_polygon(coords: &Value) -> Result<Vec<GeoPolygon>, String> {
    let polys = coords
        .as_array()
        .ok_or("MultiPolygon coordinates must be an array of polygons".to_string())?;
    if polys.is_empty() {
        return Err("multipolygon has no polygons".to_string());
    }
    polys.iter().map(parse_polygon).collect()
}
