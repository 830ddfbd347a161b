//! Webhook integration tests.

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use shopsign_auth::{RequestView, webhook};

    use crate::{API_SECRET, test_verifier};

    const ORDER_BODY: &[u8] =
        br#"{"id":820982911946154508,"email":"jon@example.com","total_price":"598.94"}"#;

    fn delivery(body: &'static [u8], signature: &str) -> http::Request<Bytes> {
        http::Request::builder()
            .method("POST")
            .uri("https://app.example.com/webhooks/orders/create")
            .header("X-Shopify-Topic", "orders/create")
            .header("X-Shopify-Shop-Domain", "demo.myshopify.com")
            .header(webhook::SIGNATURE_HEADER, signature)
            .body(Bytes::from_static(body))
            .unwrap()
    }

    #[test]
    fn test_should_accept_signed_delivery() {
        let signature = webhook::sign(ORDER_BODY, API_SECRET);
        assert!(test_verifier().webhook(&delivery(ORDER_BODY, &signature)));
    }

    #[test]
    fn test_should_reject_reserialized_body() {
        let signature = webhook::sign(ORDER_BODY, API_SECRET);
        let reserialized: serde_json::Value = serde_json::from_slice(ORDER_BODY).unwrap();
        let pretty = serde_json::to_vec_pretty(&reserialized).unwrap();
        let view = RequestView::new()
            .with_header(
                http::HeaderName::from_static("x-shopify-hmac-sha256"),
                http::HeaderValue::from_str(&signature).unwrap(),
            )
            .with_body(pretty);
        assert!(!test_verifier().webhook(&view));
    }

    #[test]
    fn test_should_reject_delivery_without_signature() {
        let request = http::Request::builder()
            .method("POST")
            .uri("/webhooks/orders/create")
            .body(Bytes::from_static(ORDER_BODY))
            .unwrap();
        assert!(!test_verifier().webhook(&request));
    }

    #[test]
    fn test_should_reject_signature_for_other_secret() {
        let signature = webhook::sign(ORDER_BODY, "another-app-secret");
        assert!(!test_verifier().webhook(&delivery(ORDER_BODY, &signature)));
    }
}
