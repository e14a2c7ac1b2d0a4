//! Provider tests with HTTP mocking.

mod namesilo_tests {
    use crate::config::Settings;
    use crate::error::DdnsError;
    use crate::providers::{DnsRecord, NameSiloProvider, RecordType, Registrar};
    use std::net::IpAddr;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn settings() -> Settings {
        Settings::new("secret-key", "example.com").unwrap()
    }

    fn provider(server: &MockServer) -> NameSiloProvider {
        NameSiloProvider::with_base_url(format!("{}/api", server.uri()), Duration::from_secs(2))
    }

    fn a_record() -> DnsRecord {
        DnsRecord {
            record_id: "rec-a".to_string(),
            record_type: RecordType::A,
            host: "vpn.example.com".to_string(),
            value: "1.1.1.1".to_string(),
            ttl: 3600,
            distance: 0,
        }
    }

    #[tokio::test]
    async fn test_list_records_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/dnsListRecords"))
            .and(query_param("version", "1"))
            .and(query_param("type", "json"))
            .and(query_param("key", "secret-key"))
            .and(query_param("domain", "example.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "request": {"operation": "dnsListRecords", "ip": "203.0.113.1"},
                "reply": {
                    "code": 300,
                    "detail": "success",
                    "resource_record": [
                        {"record_id": "rec-a", "type": "A", "host": "example.com",
                         "value": "1.1.1.1", "ttl": 7207, "distance": 0},
                        {"record_id": "rec-aaaa", "type": "AAAA", "host": "www.example.com",
                         "value": "2001:db8::1", "ttl": "3600", "distance": "0"},
                        {"record_id": "rec-mx", "type": "MX", "host": "example.com",
                         "value": "mx.example.net", "ttl": 7207, "distance": 10}
                    ]
                }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let records = provider(&mock_server).list_records(&settings()).await.unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].record_type, RecordType::A);
        assert_eq!(records[0].host, "example.com");
        assert_eq!(records[1].record_type, RecordType::Aaaa);
        assert_eq!(records[1].ttl, 3600);
        assert_eq!(records[2].record_type, RecordType::Other("MX".to_string()));
        assert_eq!(records[2].distance, 10);
    }

    #[tokio::test]
    async fn test_list_single_record_object() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/dnsListRecords"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"reply":{"code":"300","detail":"success","resource_record":
                    {"record_id":"only","type":"A","host":"example.com","value":"1.2.3.4","ttl":"7207"}}}"#,
            ))
            .mount(&mock_server)
            .await;

        let records = provider(&mock_server).list_records(&settings()).await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].record_id, "only");
        assert_eq!(records[0].distance, 0);
    }

    #[tokio::test]
    async fn test_list_without_records() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/dnsListRecords"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"reply":{"code":300,"detail":"success"}}"#),
            )
            .mount(&mock_server)
            .await;

        let records = provider(&mock_server).list_records(&settings()).await.unwrap();

        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_list_invalid_api_key() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/dnsListRecords"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"reply":{"code":110,"detail":"Invalid API Key"}}"#),
            )
            .mount(&mock_server)
            .await;

        let err = provider(&mock_server)
            .list_records(&settings())
            .await
            .unwrap_err();

        match err {
            DdnsError::Registrar { code, detail, .. } => {
                assert_eq!(code, 110);
                assert_eq!(detail, "Invalid API Key");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_list_malformed_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/dnsListRecords"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<namesilo>oops"))
            .mount(&mock_server)
            .await;

        let result = provider(&mock_server).list_records(&settings()).await;

        assert!(matches!(result, Err(DdnsError::Serialization(_))));
    }

    #[tokio::test]
    async fn test_list_http_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/dnsListRecords"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&mock_server)
            .await;

        let result = provider(&mock_server).list_records(&settings()).await;

        assert!(matches!(result, Err(DdnsError::Network(_))));
    }

    #[tokio::test]
    async fn test_update_record_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/dnsUpdateRecord"))
            .and(query_param("key", "secret-key"))
            .and(query_param("domain", "example.com"))
            .and(query_param("rrid", "rec-a"))
            .and(query_param("rrhost", "vpn"))
            .and(query_param("rrvalue", "1.2.3.4"))
            .and(query_param("rrttl", "3600"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"reply":{"code":300,"detail":"success","record_id":"rec-a2"}}"#,
            ))
            .expect(1)
            .mount(&mock_server)
            .await;

        let ip: IpAddr = "1.2.3.4".parse().unwrap();
        let result = provider(&mock_server)
            .update_record(&settings(), &a_record(), ip)
            .await
            .unwrap();

        assert_eq!(result.host, "vpn.example.com");
        assert_eq!(result.value, ip);
        assert_eq!(result.previous_value, "1.1.1.1");
        assert_eq!(result.record_id.as_deref(), Some("rec-a2"));
    }

    #[tokio::test]
    async fn test_update_apex_sends_empty_host() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/dnsUpdateRecord"))
            .and(query_param("rrhost", ""))
            .and(query_param("rrvalue", "::1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"reply":{"code":300,"detail":"success"}}"#),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let record = DnsRecord {
            record_type: RecordType::Aaaa,
            host: "example.com".to_string(),
            ..a_record()
        };
        let ip: IpAddr = "::1".parse().unwrap();
        let result = provider(&mock_server)
            .update_record(&settings(), &record, ip)
            .await
            .unwrap();

        assert_eq!(result.record_id, None);
    }

    #[tokio::test]
    async fn test_update_record_rejected() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/dnsUpdateRecord"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"reply":{"code":280,"detail":"DNS modification error"}}"#,
            ))
            .mount(&mock_server)
            .await;

        let ip: IpAddr = "1.2.3.4".parse().unwrap();
        let result = provider(&mock_server)
            .update_record(&settings(), &a_record(), ip)
            .await;

        assert!(matches!(result, Err(DdnsError::Registrar { code: 280, .. })));
    }

    #[test]
    fn test_provider_name() {
        assert_eq!(NameSiloProvider::new().name(), "namesilo");
    }
}

mod record_tests {
    use crate::providers::namesilo::relative_host;
    use crate::providers::{DnsRecord, RecordType};

    #[test]
    fn test_record_type_parsing() {
        assert_eq!(RecordType::from("A"), RecordType::A);
        assert_eq!(RecordType::from("aaaa"), RecordType::Aaaa);
        assert_eq!(
            RecordType::from("CNAME"),
            RecordType::Other("CNAME".to_string())
        );
        assert_eq!(RecordType::Aaaa.to_string(), "AAAA");
        assert_eq!(RecordType::from("TXT").to_string(), "TXT");
    }

    #[test]
    fn test_record_defaults_ttl() {
        let record: DnsRecord = serde_json::from_str(
            r#"{"record_id":"x","type":"A","host":"example.com","value":"1.2.3.4"}"#,
        )
        .unwrap();
        assert_eq!(record.ttl, 7207);
        assert_eq!(record.distance, 0);
    }

    #[test]
    fn test_record_rejects_non_numeric_ttl() {
        let result: Result<DnsRecord, _> = serde_json::from_str(
            r#"{"record_id":"x","type":"A","host":"example.com","value":"1.2.3.4","ttl":"soon"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_relative_host() {
        assert_eq!(relative_host("vpn.example.com", "example.com"), "vpn");
        assert_eq!(relative_host("a.b.example.com", "example.com"), "a.b");
        assert_eq!(relative_host("example.com", "example.com"), "");
        assert_eq!(relative_host("Example.COM.", "example.com"), "");
        assert_eq!(relative_host("home.example.co.uk", "example.co.uk"), "home");
        assert_eq!(relative_host("notexample.com", "example.com"), "notexample.com");
    }
}
