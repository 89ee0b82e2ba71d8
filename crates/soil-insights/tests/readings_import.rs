use chrono::NaiveDate;
use soil_insights::insights::{
    DocumentCatalog, InsightsEngine, ReadingHistory, ReadingImportError, ReadingSnapshot,
};

#[test]
fn history_import_keeps_file_order_and_blank_cells() {
    let data = include_bytes!("../data/field_readings.csv");

    let history = ReadingHistory::from_reader(&data[..]).expect("history imports");

    assert_eq!(history.entries().len(), 4);
    let third = &history.entries()[2];
    assert_eq!(
        third.recorded_at,
        NaiveDate::from_ymd_opt(2025, 5, 30)
            .expect("valid date")
            .and_hms_opt(6, 0, 0)
            .expect("valid time")
    );
    assert_eq!(third.snapshot.ph, Some(7.9));
    assert!(third.snapshot.ec.is_none());
    assert!(third.snapshot.nutrients.is_empty());
}

#[test]
fn latest_imported_reading_drives_evaluation() {
    let data = include_bytes!("../data/field_readings.csv");
    let history = ReadingHistory::from_reader(&data[..]).expect("history imports");

    let latest = history.latest().expect("latest reading");
    assert_eq!(latest.snapshot.ph, Some(8.3));

    let engine = InsightsEngine::new(DocumentCatalog::research());
    let result = engine.evaluate(&latest.snapshot);

    let ids: Vec<_> = result.alerts.iter().map(|alert| alert.id()).collect();
    assert_eq!(
        ids,
        vec![
            "1-ph-band-alkaline (measured in study)",
            "2-ph-band-strongly alkaline (chestnut soil baseline in study)",
            "3-ph-high",
            "3-ec-high",
        ]
    );
}

#[test]
fn partial_rows_can_be_completed_from_a_fallback() {
    let csv = "time,ph\n2025-06-01,7.2\n";
    let history = ReadingHistory::from_reader(csv.as_bytes()).expect("history imports");

    let snapshot = history
        .latest()
        .expect("latest reading")
        .snapshot
        .clone()
        .or(&ReadingSnapshot::demo());

    assert_eq!(snapshot.ph, Some(7.2));
    assert_eq!(snapshot.moisture, Some(53.0));
    assert_eq!(snapshot.nutrients.nitrogen, Some(115.0));
}

#[test]
fn malformed_values_are_rejected() {
    let csv = "time,moisture\n2025-06-01,damp\n";

    let err = ReadingHistory::from_reader(csv.as_bytes()).expect_err("non-numeric moisture");

    assert!(matches!(err, ReadingImportError::Csv(_)));
    assert!(err.to_string().contains("damp"));
}
