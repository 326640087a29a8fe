//! Place operations.

use geocore_domain::{GeocoreResult, Place};
use serde_json::Value;

use super::{require_sid, save_taggable};
use crate::request::Params;
use crate::session::Geocore;

const UNSAVED_DELETE: &str = "unsaved object cannot be deleted";

/// Operations on places.
pub struct PlaceService<'g> {
    pub(crate) geocore: &'g Geocore,
}

impl PlaceService<'_> {
    /// Fetches a place by its textual ID.
    pub async fn get(&self, id: &str) -> GeocoreResult<Place> {
        self.geocore.get(&format!("/places/{id}"), None).await
    }

    /// Fetches all places visible to the current user.
    pub async fn all(&self) -> GeocoreResult<Vec<Place>> {
        self.geocore.get_list("/places", None).await
    }

    /// Searches for places within the given bounding rectangle.
    pub async fn within_rect(
        &self,
        min_lat: f64,
        min_lon: f64,
        max_lat: f64,
        max_lon: f64,
    ) -> GeocoreResult<Vec<Place>> {
        let mut params = Params::new();
        params.insert("min_lat".to_owned(), Value::from(min_lat));
        params.insert("min_lon".to_owned(), Value::from(min_lon));
        params.insert("max_lat".to_owned(), Value::from(max_lat));
        params.insert("max_lon".to_owned(), Value::from(max_lon));
        self.geocore
            .get_list("/places/search/within/rect", Some(params))
            .await
    }

    /// Searches for the places nearest to the given coordinate.
    pub async fn nearest(&self, latitude: f64, longitude: f64) -> GeocoreResult<Vec<Place>> {
        let mut params = Params::new();
        params.insert("lat".to_owned(), Value::from(latitude));
        params.insert("lon".to_owned(), Value::from(longitude));
        self.geocore
            .get_list("/places/search/nearest", Some(params))
            .await
    }

    /// Saves the place, submitting pending tags as request parameters.
    pub async fn save(&self, place: &Place) -> GeocoreResult<Place> {
        save_taggable(self.geocore, "places", &place.core, &place.tagging, place).await
    }

    /// Deletes a persisted place.
    pub async fn delete(&self, place: &Place) -> GeocoreResult<Place> {
        let sid = require_sid(&place.core, UNSAVED_DELETE)?;
        self.geocore.delete(&format!("/places/{sid}"), None).await
    }
}
