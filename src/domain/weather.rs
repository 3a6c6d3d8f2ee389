//! Weather value object

/// Conditions at the time of an entry, temperature in Celsius
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Weather {
    pub conditions: Option<String>,
    pub temperature: Option<f64>,
}

impl Weather {
    pub fn new(conditions: impl Into<String>, temperature: f64) -> Self {
        Weather {
            conditions: Some(conditions.into()),
            temperature: Some(temperature),
        }
    }
}
