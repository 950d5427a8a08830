use geojson::Feature;
use geojson::FeatureCollection;
use geojson::JsonObject;

/// One farms row as it comes off the wire: nullable attributes plus the
/// ST_AsGeoJSON text of the stored polygon.
pub struct ParcelRow {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub community: Option<String>,
    pub contact: Option<String>,
    pub species: Option<String>,
    pub geometry: String,
}

impl From<tokio_postgres::Row> for ParcelRow {
    fn from(row: tokio_postgres::Row) -> Self {
        Self {
            name: row.get::<_, Option<String>>(0),
            age: row.get::<_, Option<i32>>(1),
            community: row.get::<_, Option<String>>(2),
            contact: row.get::<_, Option<String>>(3),
            species: row.get::<_, Option<String>>(4),
            geometry: row.get::<_, Option<String>>(5).unwrap_or_default(),
        }
    }
}

impl TryFrom<ParcelRow> for Feature {
    type Error = serde_json::Error;
    fn try_from(row: ParcelRow) -> Result<Self, Self::Error> {
        let geometry = serde_json::from_str::<geojson::Geometry>(&row.geometry)?;
        let mut properties = JsonObject::new();
        properties.insert("name".into(), row.name.unwrap_or_default().into());
        properties.insert("age".into(), row.age.unwrap_or_default().into());
        properties.insert("community".into(), row.community.unwrap_or_default().into());
        properties.insert("contact".into(), row.contact.unwrap_or_default().into());
        properties.insert("species".into(), row.species.unwrap_or_default().into());
        Ok(Self {
            bbox: None,
            geometry: Some(geometry),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        })
    }
}

/// Fallible per-row transform: rows whose geometry will not parse are logged
/// and skipped, never allowed to fail the whole response.
pub fn collect(rows: Vec<ParcelRow>) -> FeatureCollection {
    let features = rows
        .into_iter()
        .filter_map(|row| match Feature::try_from(row) {
            Ok(feature) => Some(feature),
            Err(e) => {
                log::warn!("skipping row with malformed geometry: {}", e);
                None
            }
        })
        .collect();
    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POLYGON: &str = r#"{"type":"Polygon","coordinates":[[[-1.5,5.0],[-1.4,5.0],[-1.4,5.1],[-1.5,5.0]]]}"#;

    fn row(geometry: &str) -> ParcelRow {
        ParcelRow {
            name: None,
            age: None,
            community: None,
            contact: None,
            species: None,
            geometry: geometry.to_string(),
        }
    }

    #[test]
    fn null_attributes_default() {
        let feature = Feature::try_from(row(POLYGON)).unwrap();
        let properties = feature.properties.unwrap();
        assert_eq!(properties["name"], "");
        assert_eq!(properties["age"], 0);
        assert_eq!(properties["community"], "");
        assert_eq!(properties["contact"], "");
        assert_eq!(properties["species"], "");
    }

    #[test]
    fn present_attributes_survive() {
        let mut parcel = row(POLYGON);
        parcel.name = Some("Ama Mensah".to_string());
        parcel.age = Some(43);
        parcel.species = Some("Rhizophora mangle".to_string());
        let feature = Feature::try_from(parcel).unwrap();
        let properties = feature.properties.unwrap();
        assert_eq!(properties["name"], "Ama Mensah");
        assert_eq!(properties["age"], 43);
        assert_eq!(properties["species"], "Rhizophora mangle");
        assert!(properties.get("sex").is_none());
    }

    #[test]
    fn ring_coordinates_survive() {
        let feature = Feature::try_from(row(POLYGON)).unwrap();
        match feature.geometry.unwrap().value {
            geojson::Value::Polygon(rings) => {
                assert_eq!(rings.len(), 1);
                assert_eq!(rings[0].len(), 4);
                assert!((rings[0][0][0] - -1.5).abs() < 1e-9);
                assert!((rings[0][0][1] - 5.0).abs() < 1e-9);
            }
            other => panic!("expected polygon, got {:?}", other),
        }
    }

    #[test]
    fn malformed_geometry_is_an_error() {
        assert!(Feature::try_from(row("not geojson")).is_err());
        assert!(Feature::try_from(row("")).is_err());
    }

    #[test]
    fn malformed_rows_are_skipped_not_fatal() {
        let rows = vec![row(POLYGON), row("{\"type\":\"Garbage\"}"), row(POLYGON)];
        assert_eq!(collect(rows).features.len(), 2);
    }

    #[test]
    fn empty_table_yields_empty_collection() {
        let json = serde_json::to_value(collect(vec![])).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "type": "FeatureCollection", "features": [] })
        );
    }
}
