//! Tests for the HTTP request parser.

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use crate::http::{parse_request, Error, HttpRequest, HttpVersion, Method};

    #[test]
    fn test_parse_simple_get_request() {
        let request = b"GET /users HTTP/1.1\r\nHost: example.com\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.method, Method::GET);
        assert_eq!(result.path, "/users");
        assert_eq!(result.version, HttpVersion::Http11);
        assert_eq!(result.headers.get("Host").unwrap(), "example.com");
        assert!(result.body.is_empty());
    }

    #[test]
    fn test_parse_request_with_multiple_headers() {
        let request =
            b"GET /users HTTP/1.1\r\nHost: example.com\r\nUser-Agent: test\r\nAccept: */*\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.headers.get("Host").unwrap(), "example.com");
        assert_eq!(result.headers.get("User-Agent").unwrap(), "test");
        assert_eq!(result.headers.get("Accept").unwrap(), "*/*");
    }

    #[test]
    fn test_case_insensitive_header_lookup() {
        let request = b"GET /users HTTP/1.1\r\nHost: example.com\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert!(result.has_header("host"));
        assert!(result.has_header("HOST"));
        assert!(result.has_header("Host"));
    }

    #[test]
    fn test_missing_host_header() {
        let request = b"GET /users HTTP/1.1\r\n\r\n";
        let result = parse_request(request);
        assert!(matches!(result, Err(Error::MissingHeader(ref h)) if h == "Host"));
    }

    #[test]
    fn test_http10_without_host() {
        // HTTP/1.0 doesn't require a Host header
        let request = b"GET /users HTTP/1.0\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.version, HttpVersion::Http10);
        assert!(result.headers.is_empty());
    }

    #[test]
    fn test_invalid_method() {
        let request = b"INVALID /users HTTP/1.1\r\nHost: example.com\r\n\r\n";
        let result = parse_request(request);
        assert!(matches!(result, Err(Error::InvalidMethod(ref m)) if m == "INVALID"));
    }

    #[test]
    fn test_invalid_http_version() {
        let request = b"GET /users HTTP/9.9\r\nHost: example.com\r\n\r\n";
        let result = parse_request(request);
        assert!(matches!(result, Err(Error::InvalidVersion(ref v)) if v == "HTTP/9.9"));
    }

    #[test]
    fn test_invalid_header_format() {
        let request = b"GET /users HTTP/1.1\r\nInvalidHeader\r\n\r\n";
        let result = parse_request(request);
        assert!(matches!(result, Err(Error::InvalidHeaderFormat)));
    }

    #[test]
    fn test_empty_request() {
        let result = parse_request(b"");
        assert!(matches!(result, Err(Error::EmptyRequest)));
    }

    #[test]
    fn test_incomplete_request_line() {
        let request = b"GET\r\n";
        let result = parse_request(request);
        assert!(matches!(result, Err(Error::MalformedRequestLine(_))));
    }

    #[test]
    fn test_headers_with_multiple_colons() {
        let request = b"GET /users HTTP/1.1\r\nHost: example.com\r\nX-Test: value:with:colons\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.headers.get("X-Test").unwrap(), "value:with:colons");
    }

    #[test]
    fn test_headers_with_trailing_whitespace() {
        let request = b"GET /users HTTP/1.1\r\nHost: example.com  \r\nUser-Agent:  test  \r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.headers.get("Host").unwrap(), "example.com");
        assert_eq!(result.headers.get("User-Agent").unwrap(), "test");
    }

    #[test]
    fn test_mixed_line_endings() {
        let request = b"GET /users HTTP/1.1\r\nHost: example.com\nUser-Agent: test\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.headers.get("Host").unwrap(), "example.com");
        assert_eq!(result.headers.get("User-Agent").unwrap(), "test");
    }

    #[test]
    fn test_duplicate_headers() {
        let request =
            b"GET /users HTTP/1.1\r\nHost: example.com\r\nX-Test: value1\r\nX-Test: value2\r\n\r\n";
        let result = parse_request(request).unwrap();
        // The second value overwrites the first
        assert_eq!(result.headers.get("X-Test").unwrap(), "value2");
    }

    #[test]
    fn test_empty_header_value() {
        let request = b"GET /users HTTP/1.1\r\nHost: example.com\r\nX-Empty:\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.headers.get("X-Empty").unwrap(), "");
    }

    #[test]
    fn test_malformed_utf8_in_head() {
        let request = b"GET /users HTTP/1.1\r\nHost: example.com\r\nX-Test: \xFF\xFF\xFF\r\n\r\n";
        let result = parse_request(request);
        assert!(matches!(result, Err(Error::MalformedRequestLine(ref s)) if s == "Invalid UTF-8"));
    }

    #[test]
    fn test_body_with_content_length() {
        let request = b"POST /users HTTP/1.1\r\n\
            Host: example.com\r\n\
            Content-Length: 9\r\n\
            \r\n\
            {\"age\":1}";
        let result = parse_request(request).unwrap();
        assert_eq!(result.method, Method::POST);
        assert_eq!(result.body, b"{\"age\":1}");
    }

    #[test]
    fn test_body_truncated_to_content_length() {
        let request = b"POST /users HTTP/1.1\r\n\
            Host: example.com\r\n\
            Content-Length: 4\r\n\
            \r\n\
            abcdEXTRA";
        let result = parse_request(request).unwrap();
        assert_eq!(result.body, b"abcd");
    }

    #[test]
    fn test_body_without_content_length_takes_remainder() {
        let request = b"POST /users HTTP/1.0\r\n\r\n{\"name\":\"Ivan\"}";
        let result = parse_request(request).unwrap();
        assert_eq!(result.body, b"{\"name\":\"Ivan\"}");
    }

    #[test]
    fn test_oversized_content_length_takes_available_bytes() {
        let request = b"POST /users HTTP/1.1\r\n\
            Host: example.com\r\n\
            Content-Length: 9999\r\n\
            \r\n\
            partial";
        let result = parse_request(request).unwrap();
        assert_eq!(result.body, b"partial");
    }

    #[test]
    fn test_request_without_blank_line_has_empty_body() {
        let request = b"GET /users HTTP/1.1\r\nHost: example.com";
        let result = parse_request(request).unwrap();
        assert!(result.body.is_empty());
    }

    #[test]
    fn test_complex_post_request() {
        let request = b"POST /users HTTP/1.1\r\n\
            Host: example.com\r\n\
            User-Agent: test-client/1.0\r\n\
            Content-Type: application/json\r\n\
            Content-Length: 25\r\n\
            \r\n\
            {\"name\":\"Ivan\",\"age\":40}X";
        let result = parse_request(request).unwrap();
        assert_eq!(result.method, Method::POST);
        assert_eq!(result.path, "/users");
        assert_eq!(result.get_header("content-type").unwrap(), "application/json");
        assert_eq!(result.body, b"{\"name\":\"Ivan\",\"age\":40}X");
    }

    #[test]
    fn test_method_display() {
        assert_eq!(Method::GET.to_string(), "GET");
        assert_eq!(Method::POST.to_string(), "POST");
        assert_eq!(Method::PUT.to_string(), "PUT");
        assert_eq!(Method::DELETE.to_string(), "DELETE");
    }

    #[test]
    fn test_http_version_display() {
        assert_eq!(HttpVersion::Http10.to_string(), "HTTP/1.0");
        assert_eq!(HttpVersion::Http11.to_string(), "HTTP/1.1");
    }

    #[test]
    fn test_constructors() {
        let mut headers = HashMap::new();
        headers.insert("Host".to_string(), "example.com".to_string());

        let request =
            HttpRequest::new(Method::GET, "/users".to_string(), HttpVersion::Http11, headers.clone());
        assert!(request.body.is_empty());
        assert_eq!(request.get_header("host").unwrap(), "example.com");
        assert!(request.get_header("X-Test").is_none());

        let body = b"{\"name\":\"Ivan\"}".to_vec();
        let request = HttpRequest::with_body(
            Method::POST,
            "/users".to_string(),
            HttpVersion::Http11,
            headers,
            body.clone(),
        );
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.body, body);
    }
}
