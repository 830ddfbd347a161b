//! App proxy integration tests.

#[cfg(test)]
mod tests {
    use shopsign_auth::{QueryParams, RequestView, app_proxy};

    use crate::{API_SECRET, test_verifier};

    const PROXY_QUERY: &str = "shop=demo.myshopify.com\
        &logged_in_customer_id=7421\
        &path_prefix=%2Fapps%2Freviews\
        &timestamp=1717000000\
        &tags=sale&tags=new";

    fn proxied(query: &str) -> http::Request<Vec<u8>> {
        http::Request::builder()
            .method("GET")
            .uri(format!("https://app.example.com/proxy/reviews?{query}"))
            .body(Vec::new())
            .unwrap()
    }

    #[test]
    fn test_should_accept_signed_proxy_request() {
        let signature = app_proxy::sign(&QueryParams::parse(PROXY_QUERY), API_SECRET);
        let request = proxied(&format!("{PROXY_QUERY}&signature={signature}"));
        assert!(test_verifier().app_proxy(&request));
    }

    #[test]
    fn test_should_pin_canonical_form() {
        let params = QueryParams::parse(PROXY_QUERY);
        assert_eq!(
            app_proxy::canonical_query(&params),
            b"logged_in_customer_id=7421\
              path_prefix=/apps/reviews\
              shop=demo.myshopify.com\
              tags=sale,new\
              timestamp=1717000000"
        );
    }

    #[test]
    fn test_should_accept_shuffled_keys() {
        let signature = app_proxy::sign(&QueryParams::parse(PROXY_QUERY), API_SECRET);
        let shuffled = format!(
            "tags=sale&timestamp=1717000000&signature={signature}\
             &path_prefix=%2Fapps%2Freviews&tags=new&shop=demo.myshopify.com\
             &logged_in_customer_id=7421"
        );
        assert!(test_verifier().app_proxy(&proxied(&shuffled)));
    }

    #[test]
    fn test_should_reject_reordered_values_of_one_key() {
        let signature = app_proxy::sign(&QueryParams::parse(PROXY_QUERY), API_SECRET);
        let reordered = PROXY_QUERY.replace("tags=sale&tags=new", "tags=new&tags=sale");
        let request = proxied(&format!("{reordered}&signature={signature}"));
        assert!(!test_verifier().app_proxy(&request));
    }

    #[test]
    fn test_should_reject_oauth_style_signature() {
        let params = QueryParams::parse(PROXY_QUERY);
        let oauth_style = shopsign_auth::oauth::sign(&params, API_SECRET);
        let view = RequestView::new().with_query(&format!("{PROXY_QUERY}&signature={oauth_style}"));
        assert!(!test_verifier().app_proxy(&view));
    }

    #[test]
    fn test_should_reject_appended_undecodable_parameter() {
        let signature = app_proxy::sign(&QueryParams::parse(PROXY_QUERY), API_SECRET);
        let request = proxied(&format!("{PROXY_QUERY}&signature={signature}&customer=%FF"));
        assert!(!test_verifier().app_proxy(&request));
    }
}
