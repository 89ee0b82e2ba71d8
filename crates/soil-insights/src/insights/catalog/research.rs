use super::super::domain::{
    Band, DocumentId, Metric, Rule, RuleContext, Severity, SourceDocument, Threshold,
};

fn text(value: &str) -> Option<String> {
    Some(value.to_string())
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

pub(super) fn research_documents() -> Vec<SourceDocument> {
    vec![winter_wheat(), gobustan_barley(), azerbaijan_rice()]
}

fn winter_wheat() -> SourceDocument {
    SourceDocument {
        id: DocumentId::from("1"),
        title: "On The Evaluation of The Effect of Soil and Fertilizer Treatment on The Cultivation of Cereal Crops".to_string(),
        source: "https://www.mediresonline.org/secure/uploads/articles/Article-15-20251106234246.pdf".to_string(),
        year: Some(2022),
        summary: text("Study on winter wheat in Ganja-Gazakh area showing fertilizer + soil treatment impact on yield. Notes best fertilizer effect when soil reaction is close to neutrality; measured soil pH is alkaline."),
        tags: strings(&["wheat", "fertilizer", "pH", "NPK", "yield"]),
        static_recommendations: strings(&[
            "Recommended annual fertilizer plan for winter wheat: manure 10 t/ha + N90P90K60.",
            "Traditional loosening (20–22 cm) or minimal tillage; replace minimal with traditional after ~3 years.",
        ]),
        // The study measured pH 7.8–8.4 and favours near-neutral soil; 6.5–7.5 is
        // the common neutral window.
        rules: vec![Rule {
            metric: Metric::Ph,
            metric_label: text("Soil pH"),
            bands: vec![Band {
                name: "alkaline (measured in study)".to_string(),
                min: Some(7.8),
                max: None,
                severity: Some(Severity::Warning),
                recommendation: text("Study soils were alkaline (pH ~7.8–8.4). If your field pH is in this range, fertilizer response may improve if pH is managed closer to neutral."),
            }],
            threshold: Threshold {
                min: Some(6.5),
                max: Some(7.5),
                recommend_low: text("Soil is acidic. Consider gradual pH correction based on soil test (e.g., liming) to approach near-neutral conditions."),
                recommend_high: text("Soil is alkaline. Aim to move pH closer to neutral for better fertilizer efficiency; consider organic matter additions and soil-test-guided acidifying amendments."),
            },
            severity: Some(Severity::Warning),
            context: Some(RuleContext::Wheat),
        }],
    }
}

fn gobustan_barley() -> SourceDocument {
    SourceDocument {
        id: DocumentId::from("2"),
        title: "Impact of varied NPK fertilizer application rates and seed quantities on barley yield (Gobustan chestnut soils)".to_string(),
        source: "https://ejss.fesss.org/10.18393/ejss.1356604/pdf".to_string(),
        year: Some(2023),
        summary: text("Barley field study in Gobustan (2016–2019): yield increases with NPK, and soil pH is alkaline (~8.25–8.60 by depth). Best yield observed with 140 kg/ha seed rate and N60P45K45."),
        tags: strings(&["barley", "NPK", "pH", "Gobustan", "yield"]),
        static_recommendations: strings(&[
            "Best-performing treatment reported: 140 kg/ha seed rate with N60P45K45 (highest average grain yield ~5.14 t/ha).",
            "Higher NPK rates increase available soil nutrients, but nutrients decline over plant growth stages due to uptake.",
        ]),
        rules: vec![Rule {
            metric: Metric::Ph,
            metric_label: text("Soil pH"),
            bands: vec![
                Band {
                    name: "slightly alkaline".to_string(),
                    min: Some(7.1),
                    max: Some(7.5),
                    severity: Some(Severity::Info),
                    recommendation: text("Slightly alkaline pH. Monitor trends and manage with organic matter / soil-test-guided practices if needed."),
                },
                Band {
                    name: "alkaline".to_string(),
                    min: Some(7.6),
                    max: Some(8.1),
                    severity: Some(Severity::Warning),
                    recommendation: text("Alkaline pH. Consider management strategies (organic matter, amendments) based on soil test to support nutrient availability."),
                },
                Band {
                    name: "strongly alkaline (chestnut soil baseline in study)".to_string(),
                    min: Some(8.2),
                    max: None,
                    severity: Some(Severity::Critical),
                    recommendation: text("Strongly alkaline. Study chestnut soils in Gobustan showed pH ~8.25–8.60. High pH can reduce availability of some nutrients; apply corrective actions based on soil test."),
                },
            ],
            threshold: Threshold::default(),
            severity: Some(Severity::Warning),
            context: Some(RuleContext::Barley),
        }],
    }
}

fn azerbaijan_rice() -> SourceDocument {
    SourceDocument {
        id: DocumentId::from("3"),
        title: "Soil fertility status, productivity challenges, and solutions in rice farming landscapes of Azerbaijan".to_string(),
        source: "https://ejss.fesss.org/10.18393/ejss.1399553/pdf".to_string(),
        year: Some(2024),
        summary: text("Rice field soils across Azerbaijan: highlights challenges from unsuitable pH, high salinity (EC), high exchangeable sodium (sodicity), low organic matter, and Zn/Mn deficiencies. Provides corrective measures."),
        tags: strings(&["rice", "pH", "salinity", "EC", "soil health", "recommendations"]),
        static_recommendations: strings(&[
            "For rice, optimal pH is around 6; many sampled soils are alkaline (pH > 7.3).",
            "If salinity is present: install drainage systems and leach soils to remove salts.",
            "Increase organic matter toward ~3% using low-salt composts (plant/animal sources).",
            "If sodicity (high sodium/ESP) is present: apply gypsum (CaSO4) and leach sodium.",
            "If Zn or Mn deficiencies exist: foliar application may be necessary.",
            "Apply potassium before rice planting; Ca/K imbalance means rice may still respond positively to potassium.",
        ]),
        rules: vec![
            Rule {
                metric: Metric::Ph,
                metric_label: text("Soil pH (Rice)"),
                bands: Vec::new(),
                threshold: Threshold {
                    min: None,
                    max: Some(7.3),
                    recommend_low: None,
                    recommend_high: text("Soil is too alkaline for rice. Use soil acidifying materials (e.g., sulfur-based compounds) where appropriate; if sodium/sodicity is also high, address sodicity first (e.g., gypsum + leaching)."),
                },
                severity: Some(Severity::Warning),
                context: Some(RuleContext::Rice),
            },
            // Rice tolerates EC below 0.90 dS/m; above 4 dS/m is severe.
            Rule {
                metric: Metric::Ec,
                metric_label: text("Salinity (EC, dS/m)"),
                bands: vec![Band {
                    name: "severe salinity".to_string(),
                    min: Some(4.0),
                    max: None,
                    severity: Some(Severity::Critical),
                    recommendation: text("Severe salinity (>4 dS/m). Drainage + leaching is strongly recommended before rice cultivation."),
                }],
                threshold: Threshold {
                    min: None,
                    max: Some(0.9),
                    recommend_low: None,
                    recommend_high: text("EC indicates salinity risk for rice. Improve drainage and leach soil to remove excess salts."),
                },
                severity: Some(Severity::Warning),
                context: Some(RuleContext::Rice),
            },
        ],
    }
}
