use super::common::*;
use crate::insights::domain::{DocumentId, Metric};
use crate::insights::readings::ReadingSnapshot;
use crate::insights::{DocumentCatalog, InsightsStore};

#[test]
fn insights_are_memoized_until_readings_change() {
    let mut store = InsightsStore::new(DocumentCatalog::research(), ReadingSnapshot::demo());
    assert_eq!(store.evaluations(), 0);

    let first = store.insights().clone();
    let _ = store.insights();
    assert_eq!(store.evaluations(), 1);

    store.replace_readings(ReadingSnapshot::demo());
    let again = store.insights().clone();
    assert_eq!(store.evaluations(), 1);
    assert_eq!(first, again);

    store.update_readings(|readings| readings.ph = Some(8.4));
    let updated = store.insights().clone();
    assert_eq!(store.evaluations(), 2);
    assert_ne!(first, updated);
    assert_eq!(store.readings().ph, Some(8.4));
}

#[test]
fn no_op_update_keeps_cached_result() {
    let mut store = InsightsStore::new(DocumentCatalog::research(), ph(7.0));
    let _ = store.insights();

    store.update_readings(|readings| readings.set(Metric::Ph, Some(7.0)));
    let _ = store.insights();

    assert_eq!(store.evaluations(), 1);
}

#[test]
fn store_results_match_direct_evaluation() {
    let catalog = DocumentCatalog::new(vec![neutral_ph_document()]);
    let mut store = InsightsStore::new(catalog.clone(), ph(8.0));

    let expected = crate::insights::evaluate(&ph(8.0), catalog.documents());

    assert_eq!(store.insights(), &expected);
    assert_eq!(store.catalog(), &catalog);
    let bucket = store
        .insights()
        .document(&DocumentId::from("D1"))
        .expect("bucket for D1");
    assert_eq!(bucket.alerts.len(), 1);
}
