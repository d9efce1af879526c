// Non-fatal findings raised while postprocessing an analysis
use std::fmt;
use std::sync::Mutex;
use tracing::warn;

#[derive(Debug, Clone, PartialEq)]
pub enum Finding {
    MissingCompetitorFields {
        competitor: Option<String>,
        missing: Vec<String>,
    },
    InvalidMarketShare {
        competitor: Option<String>,
    },
    TooFewCompetitors {
        count: usize,
        min: usize,
    },
    TooFewTrends {
        count: usize,
        min: usize,
    },
    TooManyWeaknesses {
        count: usize,
        max: usize,
    },
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = |c: &Option<String>| c.clone().unwrap_or_else(|| "<unnamed>".into());
        match self {
            Finding::MissingCompetitorFields { competitor, missing } => write!(
                f,
                "competitor {} is missing fields: {}",
                name(competitor),
                missing.join(", ")
            ),
            Finding::InvalidMarketShare { competitor } => {
                write!(f, "competitor {} has a non-numeric market_share", name(competitor))
            }
            Finding::TooFewCompetitors { count, min } => {
                write!(f, "only {} competitors identified (expected at least {})", count, min)
            }
            Finding::TooFewTrends { count, min } => {
                write!(f, "only {} trends identified (expected at least {})", count, min)
            }
            Finding::TooManyWeaknesses { count, max } => {
                write!(f, "{} weaknesses found (more than {})", count, max)
            }
        }
    }
}

/// Receives findings as the postprocessor observes them.
pub trait FindingSink: Send + Sync {
    fn record(&self, finding: Finding);
}

/// Logs every finding as a warning.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl FindingSink for TracingSink {
    fn record(&self, finding: Finding) {
        warn!(finding = %finding, "Analysis quality finding");
    }
}

/// Keeps findings in memory so callers can inspect them after a run.
#[derive(Debug, Default)]
pub struct RecordingSink {
    findings: Mutex<Vec<Finding>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn findings(&self) -> Vec<Finding> {
        self.findings
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl FindingSink for RecordingSink {
    fn record(&self, finding: Finding) {
        if let Ok(mut guard) = self.findings.lock() {
            guard.push(finding);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_sink_keeps_order() {
        let sink = RecordingSink::new();
        sink.record(Finding::TooFewTrends { count: 1, min: 2 });
        sink.record(Finding::InvalidMarketShare { competitor: None });
        assert_eq!(
            sink.findings(),
            vec![
                Finding::TooFewTrends { count: 1, min: 2 },
                Finding::InvalidMarketShare { competitor: None },
            ]
        );
    }

    #[test]
    fn display_names_the_competitor() {
        let finding = Finding::MissingCompetitorFields {
            competitor: Some("BYD".into()),
            missing: vec!["market_share".into()],
        };
        assert_eq!(finding.to_string(), "competitor BYD is missing fields: market_share");
    }
}
