use anyhow::anyhow;
use std::{fmt, str::FromStr};

/// Disclosure types the feed query can filter on. The pipeline defaults to
/// 8-K (event-driven current reports), where product announcements land.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportType {
    Form8K,
    Form10K,
    Form10Q,
    Form6K,
    Other(String),
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportType::Form8K => write!(f, "8-K"),
            ReportType::Form10K => write!(f, "10-K"),
            ReportType::Form10Q => write!(f, "10-Q"),
            ReportType::Form6K => write!(f, "6-K"),
            ReportType::Other(s) => write!(f, "{}", s),
        }
    }
}

impl FromStr for ReportType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        match normalized.as_str() {
            "8-K" => Ok(ReportType::Form8K),
            "10-K" => Ok(ReportType::Form10K),
            "10-Q" => Ok(ReportType::Form10Q),
            "6-K" => Ok(ReportType::Form6K),
            "" => Err(anyhow!("Report type cannot be empty")),
            _ => Ok(ReportType::Other(normalized)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_round_trips_known_forms() {
        for s in ["8-K", "10-K", "10-Q", "6-K"] {
            let parsed: ReportType = s.parse().unwrap();
            assert_eq!(parsed.to_string(), s);
        }
    }

    #[test]
    fn unknown_forms_are_preserved() {
        let parsed: ReportType = "def 14a".parse().unwrap();
        assert_eq!(parsed, ReportType::Other("DEF 14A".to_string()));
        assert_eq!(parsed.to_string(), "DEF 14A");
    }
}
