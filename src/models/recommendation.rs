use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IrrigationStatus {
    Needed,
    NotNeeded,
}

impl IrrigationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            IrrigationStatus::Needed => "Irrigation needed",
            IrrigationStatus::NotNeeded => "No irrigation needed",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            IrrigationStatus::Needed => "⚠",
            IrrigationStatus::NotNeeded => "✓",
        }
    }
}

impl std::fmt::Display for IrrigationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of running a moisture reading through the calculator.
///
/// Recreated on every input change; carries no identity of its own.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IrrigationRecommendation {
    pub recommended_water_mm: f32,
    pub irrigation_duration_minutes: i32,
    pub needs_irrigation: bool,
}

impl IrrigationRecommendation {
    pub fn status(&self) -> IrrigationStatus {
        if self.needs_irrigation {
            IrrigationStatus::Needed
        } else {
            IrrigationStatus::NotNeeded
        }
    }
}

impl std::fmt::Display for IrrigationRecommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}: {:.2} mm over {} min",
            self.status().symbol(),
            self.status(),
            self.recommended_water_mm,
            self.irrigation_duration_minutes
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_follows_need_flag() {
        let mut rec = IrrigationRecommendation {
            recommended_water_mm: 5.0,
            irrigation_duration_minutes: 7,
            needs_irrigation: true,
        };
        assert_eq!(rec.status(), IrrigationStatus::Needed);

        rec.needs_irrigation = false;
        assert_eq!(rec.status(), IrrigationStatus::NotNeeded);
    }

    #[test]
    fn display_formats_amount_and_duration() {
        let rec = IrrigationRecommendation {
            recommended_water_mm: 5.0,
            irrigation_duration_minutes: 7,
            needs_irrigation: true,
        };
        let text = rec.to_string();
        assert!(text.contains("Irrigation needed"));
        assert!(text.contains("5.00 mm"));
        assert!(text.contains("7 min"));
    }
}
