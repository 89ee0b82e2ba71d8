use super::super::domain::SourceDocument;
use super::super::readings::ReadingSnapshot;
use super::super::views::{Alert, AlertKey, DocumentInsights};
use super::rules::classify;
use std::collections::HashSet;

/// Appends one document's findings to its bucket and to the global feed.
pub(crate) fn collect_document(
    document: &SourceDocument,
    readings: &ReadingSnapshot,
    bucket: &mut DocumentInsights,
    global: &mut Vec<Alert>,
) {
    bucket
        .recommendations
        .extend(document.static_recommendations.iter().cloned());

    for rule in &document.rules {
        let Some(value) = readings.get(rule.metric) else {
            continue;
        };
        let Some(finding) = classify(rule, value) else {
            continue;
        };

        if finding.raises_alert() {
            let alert = Alert {
                key: AlertKey {
                    document: document.id.clone(),
                    metric: rule.metric,
                    discriminator: finding.discriminator,
                },
                metric: rule.metric,
                title: finding.title,
                severity: finding.severity,
                value,
                source_document_id: document.id.clone(),
                source_document_title: document.title.clone(),
                recommendation: finding.recommendation.map(str::to_string),
            };
            bucket.alerts.push(alert.clone());
            global.push(alert);
        }

        if let Some(text) = finding.recommendation.filter(|text| !text.is_empty()) {
            bucket.recommendations.push(text.to_string());
        }
    }

    dedup_recommendations(&mut bucket.recommendations);
}

/// Keeps the first occurrence of each recommendation, compared trimmed.
pub(crate) fn dedup_recommendations(recommendations: &mut Vec<String>) {
    let mut seen = HashSet::new();
    recommendations.retain(|text| seen.insert(text.trim().to_string()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_compares_trimmed_text_and_keeps_first_occurrence() {
        let mut recommendations = vec![
            "Water early".to_string(),
            "Mulch".to_string(),
            "  Water early ".to_string(),
            "Mulch".to_string(),
            "Drain".to_string(),
        ];

        dedup_recommendations(&mut recommendations);

        assert_eq!(recommendations, vec!["Water early", "Mulch", "Drain"]);
    }
}
