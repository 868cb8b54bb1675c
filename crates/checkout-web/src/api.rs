//! API Client

use async_trait::async_trait;

use checkout_core::{PaymentApi, PaymentRequest, PaymentResponse, TransportError};

/// Backend payment endpoint over fetch.
///
/// One POST per submission; no timeout, no retry. The HTTP status is not
/// branched on — the parsed body's `status` field decides the outcome,
/// and a body that fails to parse becomes a transport error.
pub struct HttpPaymentApi {
    endpoint: String,
}

impl HttpPaymentApi {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait(?Send)]
impl PaymentApi for HttpPaymentApi {
    async fn submit_payment(
        &self,
        request: &PaymentRequest,
    ) -> Result<PaymentResponse, TransportError> {
        let client = reqwest::Client::new();

        let response = client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        response
            .json::<PaymentResponse>()
            .await
            .map_err(|e| TransportError(e.to_string()))
    }
}
