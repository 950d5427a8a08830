/// SQL text for the farms table.
/// Identifiers arrive from validated Config values, never raw user input.
pub struct Farms;

impl Farms {
    /// Spatial extension, schema, and table DDL in one idempotent batch.
    pub fn creates(schema: &str, table: &str) -> String {
        format!(
            r#"
            CREATE EXTENSION IF NOT EXISTS postgis;
            CREATE SCHEMA IF NOT EXISTS {s};
            CREATE TABLE IF NOT EXISTS {s}.{t} (
                id           SERIAL                    PRIMARY KEY,
                name         VARCHAR(100)              NOT NULL,
                age          INTEGER                   NOT NULL,
                community    VARCHAR(100)              NOT NULL,
                shape_length DOUBLE PRECISION          NOT NULL,
                shape_area   DOUBLE PRECISION          NOT NULL,
                contact      VARCHAR(100)              NOT NULL,
                sex          VARCHAR(100)              NOT NULL,
                species      VARCHAR(100)              NOT NULL,
                geom         GEOMETRY(POLYGON, {srid}) NOT NULL
            );
            "#,
            s = schema,
            t = table,
            srid = crate::WGS84,
        )
    }

    /// Replace semantics: empty the table before every bulk load.
    pub fn truncates(schema: &str, table: &str) -> String {
        format!("TRUNCATE {s}.{t}", s = schema, t = table)
    }

    /// One parcel per execution; geometry comes in as WKT in its source
    /// reference system and is reprojected by PostGIS on the way in.
    pub fn inserts(schema: &str, table: &str) -> String {
        format!(
            r#"
            INSERT INTO {s}.{t}
                (name, age, community, shape_length, shape_area, contact, sex, species, geom)
            VALUES
                ($1, $2, $3, $4, $5, $6, $7, $8,
                 ST_Transform(ST_GeomFromText($9, $10), {srid}))
            "#,
            s = schema,
            t = table,
            srid = crate::WGS84,
        )
    }

    /// The one feed query. sex and the shape metrics stay out of the response.
    pub fn selects(schema: &str, table: &str) -> String {
        format!(
            r#"
            SELECT
                name,
                age,
                community,
                contact,
                species,
                ST_AsGeoJSON(geom)
            FROM {s}.{t}
            "#,
            s = schema,
            t = table,
        )
    }

    /// Existence check against the maintenance database.
    pub fn database_exists() -> &'static str {
        "SELECT 1 FROM pg_database WHERE datname = $1"
    }

    /// CREATE DATABASE cannot be parameterized, hence the validated name.
    pub fn database_creates(database: &str) -> String {
        format!("CREATE DATABASE {d}", d = database)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selects_excludes_private_columns() {
        let sql = Farms::selects("farm_inventory", "farms");
        assert!(sql.contains("ST_AsGeoJSON(geom)"));
        assert!(!sql.contains("sex"));
        assert!(!sql.contains("shape_length"));
        assert!(!sql.contains("shape_area"));
    }

    #[test]
    fn inserts_reproject_to_wgs84() {
        let sql = Farms::inserts("farm_inventory", "farms");
        assert!(sql.contains("ST_Transform(ST_GeomFromText($9, $10), 4326)"));
        assert!(sql.contains("INSERT INTO farm_inventory.farms"));
    }

    #[test]
    fn creates_constrain_every_column() {
        let sql = Farms::creates("farm_inventory", "farms");
        assert_eq!(sql.matches("NOT NULL").count(), 9);
        assert!(sql.contains("GEOMETRY(POLYGON, 4326)"));
    }
}
