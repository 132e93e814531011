//! Driven port for payment-intent creation.

use async_trait::async_trait;

use super::ApiError;
use crate::domain::{ClientSecret, PaymentIntentRequest};

/// Port for the payment endpoint.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentsApi: Send + Sync {
    /// Create a payment intent and return the secret the payment sheet needs.
    async fn create_payment_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> Result<ClientSecret, ApiError>;
}
