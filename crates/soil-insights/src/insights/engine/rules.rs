use super::super::domain::{Breach, Rule, Severity};
use super::super::views::AlertDiscriminator;

/// Classification of one reading against one rule.
pub(crate) struct Finding<'a> {
    pub discriminator: AlertDiscriminator,
    pub title: String,
    pub severity: Severity,
    pub recommendation: Option<&'a str>,
}

impl Finding<'_> {
    /// Info-level band matches surface as guidance only. Threshold breaches
    /// always raise an alert.
    pub fn raises_alert(&self) -> bool {
        match self.discriminator {
            AlertDiscriminator::Band(_) => self.severity != Severity::Info,
            AlertDiscriminator::Low | AlertDiscriminator::High => true,
        }
    }
}

pub(crate) fn classify(rule: &Rule, value: f64) -> Option<Finding<'_>> {
    if let Some(band) = rule.matching_band(value) {
        let severity = band.severity.unwrap_or_else(|| rule.default_severity());
        return Some(Finding {
            discriminator: AlertDiscriminator::Band(band.name.clone()),
            title: format!("{}: {}", rule.label(), band.name),
            severity,
            recommendation: band.recommendation.as_deref(),
        });
    }

    let breach = rule.threshold.breach(value)?;
    let title = match breach {
        Breach::Low => format!("{} below recommended", rule.label()),
        Breach::High => format!("{} above recommended", rule.label()),
    };

    Some(Finding {
        discriminator: breach.into(),
        title,
        severity: rule.default_severity(),
        recommendation: rule.threshold.recommendation(breach),
    })
}
