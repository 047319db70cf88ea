//! Remote lookup client for TheMealDB.
//!
//! The [`MealLookup`] trait is the seam the reconciler and the browse flows
//! depend on; [`MealDbClient`] is the HTTP implementation. Every endpoint
//! answers `{"meals": [...]}` or `{"meals": null}`.

use crate::defaults;
use crate::meal::MealRecord;
use async_trait::async_trait;
use log::{debug, error};
use serde::Deserialize;
use std::fmt;

/// Errors raised by remote lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The request could not be sent or the connection failed.
    Network(String),
    /// The server answered with a non-success status code.
    Status(u16),
    /// The payload could not be decoded.
    Parse(String),
    /// The lookup succeeded but returned no record.
    NotFound(String),
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::Network(reason) => write!(f, "Network error: {}", reason),
            LookupError::Status(code) => write!(f, "Unexpected HTTP status {}", code),
            LookupError::Parse(reason) => write!(f, "Malformed response: {}", reason),
            LookupError::NotFound(what) => write!(f, "No meal found for {}", what),
        }
    }
}

impl std::error::Error for LookupError {}

/// Read access to the remote meal catalogue.
///
/// Futures are not `Send`: the client runs on the browser event loop.
#[async_trait(?Send)]
pub trait MealLookup {
    async fn random_meal(&self) -> Result<MealRecord, LookupError>;

    /// Fetch one meal. A missing record is reported as [`LookupError::NotFound`].
    async fn meal_by_id(&self, id: &str) -> Result<MealRecord, LookupError>;

    /// Search meals by name. No match yields an empty list, not an error.
    async fn search_meals(&self, term: &str) -> Result<Vec<MealRecord>, LookupError>;
}

#[derive(Debug, Clone)]
pub struct MealDbConfig {
    /// Base URL, without trailing slash.
    pub base_url: String,
}

impl Default for MealDbConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::MEALDB_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct MealsResponse {
    meals: Option<Vec<MealRecord>>,
}

impl MealsResponse {
    fn first(self, what: &str) -> Result<MealRecord, LookupError> {
        self.meals
            .and_then(|meals| meals.into_iter().next())
            .ok_or_else(|| LookupError::NotFound(what.to_string()))
    }
}

/// HTTP client for TheMealDB.
pub struct MealDbClient {
    config: MealDbConfig,
    http_client: reqwest::Client,
}

impl MealDbClient {
    pub fn new(config: MealDbConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    async fn fetch(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<MealsResponse, LookupError> {
        let url = format!("{}/{}", self.config.base_url, endpoint);
        debug!("GET {} {:?}", url, query);

        let response = self
            .http_client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| LookupError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(LookupError::Status(response.status().as_u16()));
        }

        response
            .json::<MealsResponse>()
            .await
            .map_err(|e| LookupError::Parse(e.to_string()))
    }
}

impl Default for MealDbClient {
    fn default() -> Self {
        Self::new(MealDbConfig::default())
    }
}

#[async_trait(?Send)]
impl MealLookup for MealDbClient {
    async fn random_meal(&self) -> Result<MealRecord, LookupError> {
        self.fetch("random.php", &[])
            .await
            .and_then(|body| body.first("random request"))
            .inspect_err(|e| error!("Failed to fetch random meal: {}", e))
    }

    async fn meal_by_id(&self, id: &str) -> Result<MealRecord, LookupError> {
        self.fetch("lookup.php", &[("i", id)])
            .await
            .and_then(|body| body.first(&format!("id {}", id)))
            .inspect_err(|e| error!("Failed to fetch meal by ID {}: {}", id, e))
    }

    async fn search_meals(&self, term: &str) -> Result<Vec<MealRecord>, LookupError> {
        let body = self
            .fetch("search.php", &[("s", term)])
            .await
            .inspect_err(|e| error!("Failed to search meals for {:?}: {}", term, e))?;
        Ok(body.meals.unwrap_or_default())
    }
}
