//! Concurrent use of a shared verifier.

#[cfg(test)]
mod tests {
    use std::thread;

    use shopsign_auth::{QueryParams, RequestView, SignedRequest, oauth, webhook};

    use crate::{API_SECRET, session_claims, sign_session_token, test_verifier};

    #[test]
    fn test_should_give_identical_verdicts_across_threads() {
        let verifier = test_verifier();

        let query = "code=abc&shop=demo.myshopify.com&timestamp=1717000000";
        let signed = format!(
            "{query}&hmac={}",
            oauth::sign(&QueryParams::parse(query), API_SECRET)
        );
        let callback = RequestView::new().with_query(&signed);

        let token = sign_session_token(&session_claims("demo.myshopify.com"), API_SECRET);
        let bearer = http::Request::builder()
            .header(http::header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Vec::<u8>::new())
            .unwrap();

        let body = br#"{"id":1}"#;
        let delivery = http::Request::builder()
            .header(webhook::SIGNATURE_HEADER, webhook::sign(body, API_SECRET))
            .body(body.to_vec())
            .unwrap();

        thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for _ in 0..50 {
                        assert!(verifier.oauth(&callback));
                        assert_eq!(
                            verifier.session_token(&bearer),
                            ("demo.myshopify.com".to_owned(), true)
                        );
                        assert!(verifier.webhook(&delivery));
                    }
                });
            }
        });

        assert_eq!(callback.query_params().first("code"), Some("abc"));
    }
}
