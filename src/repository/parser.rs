use crate::models::CropSoilRecord;

/// Rows with fewer fields than this are dropped.
pub const MIN_FIELDS: usize = 6;

const DEFAULT_WATER_MM: f32 = 0.0;
const DEFAULT_MULTIPLIER: f32 = 1.0;

/// Parse one comma-delimited data row.
///
/// Column order: crop name, category, soil type, base water, adjusted water,
/// frequency multiplier, source. Every field is trimmed. The source column is
/// optional and anything past it is ignored. Numeric fields that don't parse
/// fall back to 0 for the water figures and 1 for the multiplier, so a bad cell
/// never costs the whole row.
pub fn parse_row(line: &str) -> Option<CropSoilRecord> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();

    if fields.len() < MIN_FIELDS {
        return None;
    }

    Some(CropSoilRecord {
        crop_name: fields[0].to_string(),
        category: fields[1].to_string(),
        soil_type: fields[2].to_string(),
        base_water_mm_per_season: parse_or(fields[3], DEFAULT_WATER_MM),
        adjusted_water_mm_per_season: parse_or(fields[4], DEFAULT_WATER_MM),
        irrigation_frequency_multiplier: parse_or(fields[5], DEFAULT_MULTIPLIER),
        source: fields.get(6).map(|s| s.to_string()).unwrap_or_default(),
    })
}

fn parse_or(field: &str, default: f32) -> f32 {
    field.parse::<f32>().unwrap_or(default)
}
