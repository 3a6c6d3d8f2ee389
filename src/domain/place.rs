//! Place value object

/// A named location; every field is optional and coordinates are not range-checked
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Place {
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Place {
    /// Place carrying only coordinates
    pub fn at(latitude: f64, longitude: f64) -> Self {
        Place {
            latitude: Some(latitude),
            longitude: Some(longitude),
            ..Place::default()
        }
    }

    /// Both coordinates, if both are known
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }

    /// Render as markdown: a heading, a locality line and a GPS line,
    /// each only when there is something to show
    pub fn markdown(&self) -> String {
        let mut lines = Vec::new();

        if let Some(name) = &self.name {
            lines.push(format!("## {}", name));
        }

        let locality: Vec<&str> = [&self.city, &self.state, &self.country]
            .into_iter()
            .filter_map(|part| part.as_deref())
            .filter(|part| !part.is_empty())
            .collect();
        if !locality.is_empty() {
            lines.push(locality.join(", "));
        }

        if let Some((latitude, longitude)) = self.coordinates() {
            lines.push(format!("GPS: {}, {}", latitude, longitude));
        }

        lines.join("\n")
    }
}
