//! Connection-fee payment intents.

use async_trait::async_trait;

use super::client::ApiClient;
use super::dto::{ClientSecretDto, PaymentIntentBody};
use crate::domain::ports::{ApiError, PaymentsApi};
use crate::domain::{ClientSecret, PaymentIntentRequest};

pub(super) const PAYMENT_INTENT_PATH: &str = "payment/create-payment-intent/";

#[async_trait]
impl PaymentsApi for ApiClient {
    async fn create_payment_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> Result<ClientSecret, ApiError> {
        let body = PaymentIntentBody::from(request);
        let reply: ClientSecretDto = self.post_json(PAYMENT_INTENT_PATH, &body).await?;
        reply.into_domain().map_err(ApiError::decode)
    }
}
