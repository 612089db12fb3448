//! Requests to the transaction service.
//!
//! Every call is a single request with no retry. Failures are returned to the
//! caller as [ApiError] and never fall back to a default value here.

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

use crate::{
    config::Config,
    error::ApiError,
    filter::Filter,
    models::{NewTransaction, Summary, Transaction, TransactionId},
};

#[derive(Clone, Debug, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_base_url.clone())
    }

    pub fn transactions_url(&self, filter: &Filter) -> String {
        format!("{}/transactions?{}", self.base_url, filter.query_string())
    }

    pub fn summary_url(&self, filter: &Filter) -> String {
        format!("{}/transactions/summary?{}", self.base_url, filter.query_string())
    }

    pub fn collection_url(&self) -> String {
        format!("{}/transactions", self.base_url)
    }

    pub fn transaction_url(&self, id: &TransactionId) -> String {
        format!("{}/transactions/{}", self.base_url, id)
    }

    pub async fn list_transactions(&self, filter: &Filter) -> Result<Vec<Transaction>, ApiError> {
        let url = self.transactions_url(filter);
        tracing::debug!("GET {url}");

        let response = Request::get(&url).send().await?;
        read_json(response, &url).await
    }

    pub async fn get_summary(&self, filter: &Filter) -> Result<Summary, ApiError> {
        let url = self.summary_url(filter);
        tracing::debug!("GET {url}");

        let response = Request::get(&url).send().await?;
        read_json(response, &url).await
    }

    pub async fn create_transaction(
        &self,
        payload: &NewTransaction,
    ) -> Result<Transaction, ApiError> {
        let url = self.collection_url();
        tracing::debug!("POST {url}");

        let request = Request::post(&url)
            .json(payload)
            .map_err(|error| ApiError::Encode(error.to_string()))?;
        let response = request.send().await?;
        read_json(response, &url).await
    }

    pub async fn update_transaction(
        &self,
        transaction: &Transaction,
    ) -> Result<Transaction, ApiError> {
        let url = self.transaction_url(&transaction.id);
        tracing::debug!("PUT {url}");

        let request = Request::put(&url)
            .json(transaction)
            .map_err(|error| ApiError::Encode(error.to_string()))?;
        let response = request.send().await?;
        read_json(response, &url).await
    }

    pub async fn delete_transaction(&self, id: &TransactionId) -> Result<(), ApiError> {
        let url = self.transaction_url(id);
        tracing::debug!("DELETE {url}");

        let response = Request::delete(&url).send().await?;
        check_status(&response, &url)
    }
}

fn check_status(response: &Response, url: &str) -> Result<(), ApiError> {
    if response.ok() {
        Ok(())
    } else {
        Err(ApiError::Status {
            status: response.status(),
            url: url.to_string(),
        })
    }
}

async fn read_json<T: DeserializeOwned>(response: Response, url: &str) -> Result<T, ApiError> {
    check_status(&response, url)?;
    Ok(response.json::<T>().await?)
}

#[cfg(test)]
mod tests {
    use time::Month;

    use super::ApiClient;
    use crate::{config::Config, filter::Filter, models::TransactionId};

    fn client() -> ApiClient {
        ApiClient::new("http://localhost:3000")
    }

    #[test]
    fn list_url_carries_filter() {
        let url = client().transactions_url(&Filter::new(Month::May, 2024));

        assert_eq!(url, "http://localhost:3000/transactions?month=05&year=2024");
    }

    #[test]
    fn summary_url_carries_filter() {
        let url = client().summary_url(&Filter::new(Month::November, 2021));

        assert_eq!(
            url,
            "http://localhost:3000/transactions/summary?month=11&year=2021"
        );
    }

    #[test]
    fn item_url_uses_id() {
        let url = client().transaction_url(&TransactionId::new("abc-123"));

        assert_eq!(url, "http://localhost:3000/transactions/abc-123");
    }

    #[test]
    fn client_uses_configured_base_url() {
        let config = Config {
            api_base_url: "https://api.example.com".to_string(),
            ..Config::default()
        };

        let client = ApiClient::from_config(&config);

        assert_eq!(client.collection_url(), "https://api.example.com/transactions");
    }
}
