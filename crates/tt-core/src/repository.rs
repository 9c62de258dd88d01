//! # Trip Repository
//!
//! Reads the trips collection through a `DocumentStore` and turns the raw
//! documents into validated `Trip`s.

use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;

use crate::decode::decode_trip;
use crate::error::{AppError, Rejection, Result};
use crate::models::Trip;
use crate::traits::DocumentStore;

pub const TRIPS_COLLECTION: &str = "trips";

/// Result of one collection scan: decoded trips plus what was turned away.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TripBatch {
    pub trips: Vec<Trip>,
    pub rejected: Vec<Rejection>,
}

#[derive(Clone)]
pub struct TripRepository {
    store: Arc<dyn DocumentStore>,
    collection: String,
}

impl TripRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            collection: TRIPS_COLLECTION.to_string(),
        }
    }

    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Fetches and decodes every trip.
    ///
    /// A store failure fails the whole call; a bad document only drops that
    /// document. Repeated ids keep their first occurrence that decodes.
    pub async fn fetch_all_trips(&self) -> Result<TripBatch> {
        let docs = self
            .store
            .list_documents(&self.collection)
            .await
            .map_err(|e| {
                log::error!("Error fetching trips from '{}': {:#}", self.collection, e);
                AppError::Unavailable(e)
            })?;

        let now = Utc::now();
        let mut seen = HashSet::new();
        let mut batch = TripBatch::default();

        for doc in docs {
            if seen.contains(&doc.id) {
                log::warn!("Skipping duplicate trip document {}", doc.id);
                continue;
            }
            match decode_trip(&doc, now) {
                Ok(trip) => {
                    seen.insert(doc.id);
                    batch.trips.push(trip);
                }
                Err(error) => {
                    log::warn!("Rejected trip document {}: {}", doc.id, error);
                    batch.rejected.push(Rejection {
                        document_id: doc.id,
                        error,
                    });
                }
            }
        }

        log::info!(
            "Fetched {} trips from '{}' ({} rejected)",
            batch.trips.len(),
            self.collection,
            batch.rejected.len()
        );
        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;
    use crate::models::RawDocument;
    use crate::traits::MockDocumentStore;
    use serde_json::json;

    fn raw(id: &str, fields: serde_json::Value) -> RawDocument {
        RawDocument {
            id: id.to_string(),
            fields: fields.as_object().cloned().unwrap_or_default(),
        }
    }

    fn valid(title: &str) -> serde_json::Value {
        json!({
            "title": title,
            "destination": "Kyoto",
            "description": "Temples and tea.",
            "startDate": "2025-04-01T00:00:00Z",
            "endDate": "2025-04-09T00:00:00Z",
            "maxGroupSize": 4,
            "currentMemberCount": 1,
            "userId": "u1",
        })
    }

    #[tokio::test]
    async fn keeps_good_documents_and_reports_bad_ones() {
        let mut store = MockDocumentStore::new();
        store
            .expect_list_documents()
            .withf(|c| c == TRIPS_COLLECTION)
            .times(1)
            .returning(|_| {
                let mut orphan = valid("No Creator");
                orphan.as_object_mut().unwrap().remove("userId");
                Ok(vec![raw("a", valid("Blossoms")), raw("b", orphan)])
            });

        let batch = TripRepository::new(Arc::new(store))
            .fetch_all_trips()
            .await
            .unwrap();

        assert_eq!(batch.trips.len(), 1);
        assert_eq!(batch.trips[0].title, "Blossoms");
        assert_eq!(
            batch.rejected,
            vec![Rejection {
                document_id: "b".into(),
                error: DecodeError::MissingField("userId"),
            }]
        );
    }

    #[tokio::test]
    async fn store_failure_is_a_single_unavailable_error() {
        let mut store = MockDocumentStore::new();
        store
            .expect_list_documents()
            .returning(|_| Err(anyhow::anyhow!("connection reset")));

        let err = TripRepository::new(Arc::new(store))
            .fetch_all_trips()
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Unavailable(_)));
        assert_eq!(err.to_string(), crate::error::FETCH_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn duplicate_ids_keep_the_first_document() {
        let mut store = MockDocumentStore::new();
        store
            .expect_list_documents()
            .withf(|c| c == "staging_trips")
            .returning(|_| Ok(vec![raw("x", valid("First")), raw("x", valid("Second"))]));

        let batch = TripRepository::new(Arc::new(store))
            .with_collection("staging_trips")
            .fetch_all_trips()
            .await
            .unwrap();

        assert_eq!(batch.trips.len(), 1);
        assert_eq!(batch.trips[0].title, "First");
    }

    #[tokio::test]
    async fn rejected_first_copy_does_not_shadow_a_valid_duplicate() {
        let mut store = MockDocumentStore::new();
        store.expect_list_documents().returning(|_| {
            let mut broken = valid("Broken");
            broken.as_object_mut().unwrap().remove("userId");
            Ok(vec![
                raw("x", broken),
                raw("x", valid("Repaired")),
                raw("x", valid("Later")),
            ])
        });

        let batch = TripRepository::new(Arc::new(store))
            .fetch_all_trips()
            .await
            .unwrap();

        assert_eq!(batch.trips.len(), 1);
        assert_eq!(batch.trips[0].title, "Repaired");
        assert_eq!(batch.rejected.len(), 1);
        assert_eq!(batch.rejected[0].document_id, "x");
    }
}
