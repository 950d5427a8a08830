use anyhow::anyhow;
use anyhow::Context;
use anyhow::Result;
use geo_types::MultiPolygon;
use geo_types::Polygon;
use shapefile::dbase::FieldValue;
use std::collections::HashMap;
use std::path::Path;

/// One shapefile feature, normalized and ready to insert.
pub struct Parcel {
    pub name: String,
    pub age: i32,
    pub community: String,
    pub shape_length: f64,
    pub shape_area: f64,
    pub contact: String,
    pub sex: String,
    pub species: String,
    pub boundary: Polygon<f64>,
}

/// Read every feature from the shapefile. Features that cannot become a
/// Parcel are logged and counted, not fatal; an unreadable file is.
pub fn read(path: &Path) -> Result<(Vec<Parcel>, usize)> {
    let mut reader = shapefile::Reader::from_path(path)
        .with_context(|| format!("opening shapefile {}", path.display()))?;
    let mut parcels = Vec::new();
    let mut skipped = 0;
    for (index, result) in reader
        .iter_shapes_and_records_as::<shapefile::Polygon, shapefile::dbase::Record>()
        .enumerate()
    {
        let (shape, record) = result.with_context(|| format!("reading feature {}", index))?;
        match parcel(shape, record) {
            Ok(p) => parcels.push(p),
            Err(e) => {
                log::warn!("skipping feature {}: {}", index, e);
                skipped += 1;
            }
        }
    }
    Ok((parcels, skipped))
}

fn parcel(shape: shapefile::Polygon, record: shapefile::dbase::Record) -> Result<Parcel> {
    let fields = lowercased(record);
    Ok(Parcel {
        name: text(&fields, &["name"]),
        age: integer(&fields, &["age"]),
        community: text(&fields, &["community"]),
        shape_length: float(&fields, &["shape_length", "shape_leng"]),
        shape_area: float(&fields, &["shape_area"]),
        contact: text(&fields, &["contact"]),
        sex: text(&fields, &["sex"]),
        species: text(&fields, &["species"]),
        boundary: boundary(shape)?,
    })
}

/// Attribute names match case-insensitively: keys are lower-cased up front.
fn lowercased(record: impl IntoIterator<Item = (String, FieldValue)>) -> HashMap<String, FieldValue> {
    record
        .into_iter()
        .map(|(name, value)| (name.to_lowercase(), value))
        .collect()
}

/// First match wins; callers list DBF-truncated spellings after the full one.
fn field<'a>(fields: &'a HashMap<String, FieldValue>, names: &[&str]) -> Option<&'a FieldValue> {
    names.iter().find_map(|name| fields.get(*name))
}

fn text(fields: &HashMap<String, FieldValue>, names: &[&str]) -> String {
    match field(fields, names) {
        Some(FieldValue::Character(value)) => value.clone().unwrap_or_default(),
        Some(FieldValue::Memo(value)) => value.clone(),
        _ => String::new(),
    }
}

fn integer(fields: &HashMap<String, FieldValue>, names: &[&str]) -> i32 {
    match field(fields, names) {
        Some(FieldValue::Integer(value)) => *value,
        Some(FieldValue::Numeric(value)) => value.unwrap_or_default() as i32,
        Some(FieldValue::Float(value)) => value.unwrap_or_default() as i32,
        Some(FieldValue::Double(value)) => *value as i32,
        _ => 0,
    }
}

fn float(fields: &HashMap<String, FieldValue>, names: &[&str]) -> f64 {
    match field(fields, names) {
        Some(FieldValue::Numeric(value)) => value.unwrap_or_default(),
        Some(FieldValue::Double(value)) => *value,
        Some(FieldValue::Float(value)) => f64::from(value.unwrap_or_default()),
        Some(FieldValue::Integer(value)) => f64::from(*value),
        _ => 0.0,
    }
}

/// The table only admits single polygons; multi-part shapes are a per-feature
/// error for the caller to skip.
fn boundary(shape: shapefile::Polygon) -> Result<Polygon<f64>> {
    let mut polygons = MultiPolygon::<f64>::from(shape).0;
    match polygons.len() {
        1 => Ok(polygons.remove(0)),
        n => Err(anyhow!("expected a single-part polygon, found {} parts", n)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapefile::Point;
    use shapefile::PolygonRing;

    fn fields(pairs: Vec<(&str, FieldValue)>) -> HashMap<String, FieldValue> {
        lowercased(pairs.into_iter().map(|(k, v)| (k.to_string(), v)))
    }

    fn ring(origin: f64) -> Vec<Point> {
        vec![
            Point::new(origin, 0.0),
            Point::new(origin, 1.0),
            Point::new(origin + 1.0, 1.0),
            Point::new(origin + 1.0, 0.0),
            Point::new(origin, 0.0),
        ]
    }

    #[test]
    fn attribute_names_match_case_insensitively() {
        let fields = fields(vec![
            ("Name", FieldValue::Character(Some("Kofi Asante".to_string()))),
            ("AGE", FieldValue::Numeric(Some(52.0))),
        ]);
        assert_eq!(text(&fields, &["name"]), "Kofi Asante");
        assert_eq!(integer(&fields, &["age"]), 52);
    }

    #[test]
    fn truncated_field_names_are_tolerated() {
        let fields = fields(vec![("Shape_Leng", FieldValue::Numeric(Some(12.5)))]);
        assert_eq!(float(&fields, &["shape_length", "shape_leng"]), 12.5);
    }

    #[test]
    fn absent_and_null_attributes_default() {
        let fields = fields(vec![
            ("name", FieldValue::Character(None)),
            ("age", FieldValue::Numeric(None)),
        ]);
        assert_eq!(text(&fields, &["name"]), "");
        assert_eq!(integer(&fields, &["age"]), 0);
        assert_eq!(text(&fields, &["species"]), "");
        assert_eq!(float(&fields, &["shape_area"]), 0.0);
    }

    #[test]
    fn single_part_shapes_become_boundaries() {
        let shape = shapefile::Polygon::with_rings(vec![PolygonRing::Outer(ring(0.0))]);
        let boundary = boundary(shape).unwrap();
        assert_eq!(boundary.exterior().0.len(), 5);
        assert!(boundary.exterior().0.iter().any(|c| c.x == 0.0 && c.y == 1.0));
    }

    #[test]
    fn multi_part_shapes_are_rejected() {
        let shape = shapefile::Polygon::with_rings(vec![
            PolygonRing::Outer(ring(0.0)),
            PolygonRing::Outer(ring(10.0)),
        ]);
        assert!(boundary(shape).is_err());
    }
}
