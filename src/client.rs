//! Order service client.
//!
//! [`OrderSubmitter`] is the seam between the order form and the service:
//! it never fails, unreachable or misbehaving services are reported as a
//! rejection with [`crate::types::SERVICE_UNAVAILABLE`]. [`HttpClient`]
//! implements it over HTTP and also exposes the fallible calls.

use reqwest::Response;
use tracing::{debug, warn};

use crate::{
    Endpoint,
    error::ClientError,
    types::{OrderRequest, OrderResponse},
};

/// Collaborator the order form hands valid drafts to.
pub trait OrderSubmitter {
    /// Creates an order. Transport failures resolve to an unsuccessful
    /// [`OrderResponse`] instead of an error.
    fn create_order(&self, request: &OrderRequest) -> impl Future<Output = OrderResponse> + Send;
}

/// HTTP client of the order service.
#[derive(Clone, Debug)]
pub struct HttpClient {
    http: reqwest::Client,
    endpoint: Endpoint,
}

impl HttpClient {
    pub fn new(endpoint: Endpoint) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = endpoint.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            endpoint,
        })
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.endpoint.base_url().as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// `POST /orders`.
    ///
    /// The body is decoded whatever the HTTP status is, so a service refusing
    /// with a non-2xx status and a `{success, message}` body is relayed as a
    /// regular rejection.
    pub async fn try_create_order(
        &self,
        request: &OrderRequest,
    ) -> Result<OrderResponse, ClientError> {
        let url = self.url("orders");
        debug!(%url, ?request, "order service request");

        let response = self.http.post(&url).json(request).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        match serde_json::from_slice::<OrderResponse>(&body) {
            Ok(reply) => {
                debug!(%status, ?reply, "order service response");
                Ok(reply)
            }
            Err(e) if status.is_success() => Err(ClientError::Decode(e.to_string())),
            Err(_) => Err(ClientError::Status {
                status_code: status.as_u16(),
                text: String::from_utf8_lossy(&body).into_owned(),
            }),
        }
    }

    /// `GET /rates`, arbitrary JSON.
    pub async fn get_rates(&self) -> Result<serde_json::Value, ClientError> {
        let url = self.url("rates");
        debug!(%url, "order service request");

        let response = check_success(self.http.get(&url).send().await?).await?;
        Ok(response.json().await?)
    }
}

impl OrderSubmitter for HttpClient {
    fn create_order(&self, request: &OrderRequest) -> impl Future<Output = OrderResponse> + Send {
        async move {
            match self.try_create_order(request).await {
                Ok(reply) => reply,
                Err(e) => {
                    warn!(%e, "order service unavailable");
                    OrderResponse::unavailable()
                }
            }
        }
    }
}

async fn check_success(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ClientError::Status {
            status_code: status.as_u16(),
            text: response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read response text".to_string()),
        });
    }
    Ok(response)
}
