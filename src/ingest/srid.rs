use std::path::Path;

const AUTHORITY: &str = "AUTHORITY[\"EPSG\",\"";

/// EPSG code declared by the shapefile's .prj sidecar, if present.
pub fn sniff(shapefile: &Path) -> Option<i32> {
    let sidecar = shapefile.with_extension("prj");
    let wkt = std::fs::read_to_string(&sidecar).ok()?;
    let code = epsg(&wkt);
    match code {
        Some(code) => log::info!("source reference system: EPSG:{}", code),
        None => log::warn!("no EPSG authority found in {}", sidecar.display()),
    }
    code
}

/// The last AUTHORITY["EPSG","<code>"] entry in a CRS WKT names the whole
/// system; earlier entries belong to nested datum and unit nodes.
pub fn epsg(wkt: &str) -> Option<i32> {
    let upper = wkt.to_ascii_uppercase();
    let at = upper.rfind(AUTHORITY)?;
    wkt[at + AUTHORITY.len()..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect::<String>()
        .parse()
        .ok()
}
