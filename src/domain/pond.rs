// Pond domain model
use serde::Serialize;

/// Operator-facing assessment of a pond
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Condition {
    Healthy,
    #[serde(rename = "At Risk")]
    AtRisk,
    Critical,
}

impl Condition {
    pub fn severity(self) -> Severity {
        match self {
            Condition::Healthy => Severity::Optimal,
            Condition::AtRisk => Severity::Warning,
            Condition::Critical => Severity::Critical,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Optimal,
    Warning,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PondVitals {
    pub temperature: f64,
    pub ph: f64,
    pub dissolved_oxygen: f64,
    pub tds: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pond {
    pub id: u32,
    pub name: String,
    pub location: Option<String>,
    pub species: Option<String>,
    pub vitals: PondVitals,
    pub condition: Condition,
    pub status: Severity,
    pub connected: bool,
}

impl Pond {
    pub fn new(id: u32, vitals: PondVitals, condition: Condition, connected: bool) -> Self {
        Self {
            id,
            name: Self::format_name(id),
            location: None,
            species: None,
            vitals,
            condition,
            status: condition.severity(),
            connected,
        }
    }

    pub fn located_at(mut self, location: &str) -> Self {
        self.location = Some(location.to_string());
        self
    }

    pub fn stocked_with(mut self, species: &str) -> Self {
        self.species = Some(species.to_string());
        self
    }

    fn format_name(id: u32) -> String {
        format!("Pond {}", id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vitals() -> PondVitals {
        PondVitals {
            temperature: 31.2,
            ph: 6.2,
            dissolved_oxygen: 5.5,
            tds: 720,
        }
    }

    #[test]
    fn test_name_and_severity_follow_id_and_condition() {
        let pond = Pond::new(4, vitals(), Condition::Critical, true);
        assert_eq!(pond.name, "Pond 4");
        assert_eq!(pond.status, Severity::Critical);

        let pond = Pond::new(3, vitals(), Condition::AtRisk, false);
        assert_eq!(pond.status, Severity::Warning);
    }

    #[test]
    fn test_condition_serializes_with_display_names() {
        let pond = Pond::new(3, vitals(), Condition::AtRisk, false).located_at("West Pond");
        let json = serde_json::to_value(&pond).unwrap();
        assert_eq!(json["condition"], "At Risk");
        assert_eq!(json["status"], "warning");
        assert_eq!(json["location"], "West Pond");
        assert!(json["species"].is_null());
    }
}
