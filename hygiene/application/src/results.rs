use hygiene_domain::{Authority, RatingBucket};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AuthoritiesResult {
    pub duration: Duration,
    pub records: Vec<Authority>,
}

impl AuthoritiesResult {
    /// Projects the authorities onto the fields the query API exposes.
    pub fn output(&self) -> Vec<OutputAuthority> {
        self.records
            .iter()
            .map(|authority| OutputAuthority {
                name: authority.name().to_string(),
                local_id: authority.local_id(),
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct EstablishmentsResult {
    pub local_id: String,
    pub duration: Duration,
    pub records: Vec<RatingBucket>,
}

impl EstablishmentsResult {
    pub fn output(&self) -> Vec<OutputRating> {
        self.records
            .iter()
            .map(|bucket| OutputRating {
                name: bucket.label().to_string(),
                rating: format_percentage(bucket.percentage()),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputAuthority {
    pub name: String,
    pub local_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRating {
    pub name: String,
    pub rating: String,
}

fn format_percentage(percentage: f64) -> String {
    format!("{:.2}%", percentage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hygiene_domain::{aggregate_ratings, Establishment};

    #[test]
    fn test_authorities_output_drops_establishment_count() {
        let result = AuthoritiesResult {
            duration: Duration::from_millis(3),
            records: vec![Authority::new("Yorkshire".to_string(), 123, 4000)],
        };

        assert_eq!(
            result.output(),
            vec![OutputAuthority {
                name: "Yorkshire".to_string(),
                local_id: 123,
            }]
        );
    }

    #[test]
    fn test_establishments_output_formats_two_decimals() {
        let establishments: Vec<Establishment> = ["5", "4", "4"]
            .iter()
            .map(|r| Establishment::new("Bobs Burgers".to_string(), r.to_string()))
            .collect();
        let result = EstablishmentsResult {
            local_id: "1".to_string(),
            duration: Duration::from_millis(3),
            records: aggregate_ratings(&establishments),
        };

        let output = result.output();
        assert_eq!(output.len(), 2);
        assert_eq!(output[0].name, "4-Star");
        assert_eq!(output[0].rating, "66.67%");
        assert_eq!(output[1].name, "5-Star");
        assert_eq!(output[1].rating, "33.33%");
    }

    #[test]
    fn test_full_share_formats_as_hundred() {
        assert_eq!(format_percentage(100.0), "100.00%");
        assert_eq!(format_percentage(0.0), "0.00%");
    }
}
