use crate::models::{CropSoilRecord, IrrigationRecommendation};

/// Days the seasonal water figure is spread over to get a daily need.
pub const DAYS_PER_SEASON: f32 = 30.0;

/// Soil moisture (%) at or above which no irrigation is recommended.
pub const IRRIGATION_THRESHOLD_PERCENT: f32 = 70.0;

/// Turn a crop/soil record and a soil moisture reading into a recommendation.
///
/// The daily need is the adjusted seasonal water over [`DAYS_PER_SEASON`],
/// scaled by the moisture deficit. Duration is that amount times the frequency
/// multiplier, truncated toward zero.
///
/// `current_moisture_percent` is not clamped. Readings outside 0..=100 give
/// out-of-range amounts (negative water above 100%) but never panic; callers
/// that need a bounded input must clamp it themselves.
pub fn calculate(record: &CropSoilRecord, current_moisture_percent: f32) -> IrrigationRecommendation {
    let moisture_deficit = 100.0 - current_moisture_percent;
    let daily_base_water_need = record.adjusted_water_mm_per_season / DAYS_PER_SEASON;
    let adjusted_water_need = daily_base_water_need * (moisture_deficit / 100.0);

    // `as` truncates toward zero and saturates, NaN becomes 0
    let irrigation_minutes =
        (adjusted_water_need * record.irrigation_frequency_multiplier) as i32;

    IrrigationRecommendation {
        recommended_water_mm: adjusted_water_need,
        irrigation_duration_minutes: irrigation_minutes,
        needs_irrigation: current_moisture_percent < IRRIGATION_THRESHOLD_PERCENT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(adjusted_mm: f32, multiplier: f32) -> CropSoilRecord {
        CropSoilRecord::new("Tomato", "Vegetable", "Loam")
            .with_water(adjusted_mm, adjusted_mm)
            .with_multiplier(multiplier)
    }

    #[test]
    fn half_dry_soil_worked_example() {
        // 300 mm/season -> 10 mm/day, 50% deficit -> 5 mm, x1.5 -> 7.5 -> 7 min
        let rec = calculate(&record(300.0, 1.5), 50.0);
        assert_eq!(rec.recommended_water_mm, 5.0);
        assert_eq!(rec.irrigation_duration_minutes, 7);
        assert!(rec.needs_irrigation);
    }

    #[test]
    fn threshold_boundary() {
        let r = record(300.0, 1.5);
        assert!(!calculate(&r, 70.0).needs_irrigation);
        assert!(calculate(&r, 69.999).needs_irrigation);
        assert!(!calculate(&r, 85.0).needs_irrigation);
    }

    #[test]
    fn saturated_soil_needs_nothing() {
        let rec = calculate(&record(300.0, 1.5), 100.0);
        assert_eq!(rec.recommended_water_mm, 0.0);
        assert_eq!(rec.irrigation_duration_minutes, 0);
        assert!(!rec.needs_irrigation);
    }

    #[test]
    fn bone_dry_soil_needs_full_daily_amount() {
        let rec = calculate(&record(300.0, 2.0), 0.0);
        assert_eq!(rec.recommended_water_mm, 10.0);
        assert_eq!(rec.irrigation_duration_minutes, 20);
        assert!(rec.needs_irrigation);
    }

    #[test]
    fn uses_adjusted_not_base_water() {
        let r = CropSoilRecord::new("Basil", "Herb", "Sandy")
            .with_water(900.0, 300.0)
            .with_multiplier(1.0);
        assert_eq!(calculate(&r, 0.0).recommended_water_mm, 10.0);
    }

    #[test]
    fn deterministic_bit_for_bit() {
        let r = record(437.3, 1.37);
        let a = calculate(&r, 41.7);
        let b = calculate(&r, 41.7);
        assert_eq!(a.recommended_water_mm.to_bits(), b.recommended_water_mm.to_bits());
        assert_eq!(a, b);
    }

    #[test]
    fn out_of_range_moisture_is_not_clamped() {
        let r = record(300.0, 1.5);

        // Over-saturated: negative deficit, duration truncates toward zero
        let wet = calculate(&r, 150.0);
        assert_eq!(wet.recommended_water_mm, -5.0);
        assert_eq!(wet.irrigation_duration_minutes, -7);
        assert!(!wet.needs_irrigation);

        let dry = calculate(&r, -100.0);
        assert_eq!(dry.recommended_water_mm, 20.0);
        assert_eq!(dry.irrigation_duration_minutes, 30);
        assert!(dry.needs_irrigation);
    }

    #[test]
    fn non_finite_inputs_do_not_panic() {
        let r = record(300.0, 1.5);
        let nan = calculate(&r, f32::NAN);
        assert!(nan.recommended_water_mm.is_nan());
        assert_eq!(nan.irrigation_duration_minutes, 0);
        assert!(!nan.needs_irrigation);

        let huge = calculate(&record(f32::MAX, 10.0), 0.0);
        assert_eq!(huge.irrigation_duration_minutes, i32::MAX);
    }

    #[test]
    fn zero_water_records_produce_zero() {
        let rec = calculate(&record(0.0, 1.0), 10.0);
        assert_eq!(rec.recommended_water_mm, 0.0);
        assert_eq!(rec.irrigation_duration_minutes, 0);
        assert!(rec.needs_irrigation);
    }
}
