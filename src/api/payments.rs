use http::Method;
use serde::{Deserialize, Serialize};

use crate::{
    api::{Api, ApiError},
    prelude::*,
    quantity::Money,
};

/// Payment intent opened with the payment provider, confirmed by the provider's own client.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntent {
    pub client_secret: String,
}

impl PaymentIntent {
    /// Intent identifier, the part of the client secret before `_secret_`.
    pub fn id(&self) -> &str {
        self.client_secret.split_once("_secret_").map_or(&self.client_secret, |(id, _)| id)
    }
}

impl Api {
    #[instrument(skip_all, fields(amount = ?amount))]
    pub async fn create_payment_intent(&self, amount: Money) -> Result<PaymentIntent, ApiError> {
        #[derive(Serialize)]
        struct IntentRequest {
            amount: Money,
        }

        info!("creating a payment intent…");
        let request = IntentRequest { amount };
        self.call_with_body(Method::POST, &["payments", "create-intent"], &request).await
    }
}
