use std::net::SocketAddr;

use lantern::http::parser::{ParseError, parse_http_request};
use lantern::http::request::Method;

fn peer() -> SocketAddr {
    "192.168.1.20:51234".parse().unwrap()
}

#[test]
fn test_parse_simple_get_request() {
    let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let parsed = parse_http_request(req, peer()).unwrap();

    assert_eq!(parsed.method, Method::GET);
    assert_eq!(parsed.path, "/");
    assert_eq!(parsed.version, "HTTP/1.1");
    assert_eq!(parsed.headers.get("Host").unwrap(), "example.com");
    assert_eq!(parsed.remote_addr, peer());
    assert!(parsed.query.is_empty());
}

#[test]
fn test_parse_post_request_with_body() {
    let req = b"POST /api HTTP/1.1\r\nHost: localhost\r\nContent-Length: 5\r\n\r\nhello";
    let parsed = parse_http_request(req, peer()).unwrap();

    assert_eq!(parsed.method, Method::POST);
    assert_eq!(parsed.path, "/api");
    assert_eq!(parsed.body, b"hello".to_vec());
}

#[test]
fn test_parse_body_taken_verbatim_beyond_content_length() {
    let req = b"POST / HTTP/1.1\r\nContent-Length: 2\r\n\r\nabcdef";
    let parsed = parse_http_request(req, peer()).unwrap();

    assert_eq!(parsed.body, b"abcdef".to_vec());
}

#[test]
fn test_parse_multiple_headers() {
    let req = b"GET /path HTTP/1.1\r\nHost: example.com\r\nUser-Agent: test-client\r\nAccept: */*\r\n\r\n";
    let parsed = parse_http_request(req, peer()).unwrap();

    assert_eq!(parsed.headers.get("Host").unwrap(), "example.com");
    assert_eq!(parsed.headers.get("User-Agent").unwrap(), "test-client");
    assert_eq!(parsed.headers.get("Accept").unwrap(), "*/*");
}

#[test]
fn test_parse_query_string() {
    let req = b"GET /?a=1&b=dos HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let parsed = parse_http_request(req, peer()).unwrap();

    assert_eq!(parsed.path, "/");
    assert_eq!(parsed.query.len(), 2);
    assert_eq!(parsed.query.get("a"), Some("1"));
    assert_eq!(parsed.query.get("b"), Some("dos"));
}

#[test]
fn test_parse_query_key_without_value() {
    let req = b"GET /?x HTTP/1.1\r\n\r\n";
    let parsed = parse_http_request(req, peer()).unwrap();

    assert_eq!(parsed.query.len(), 1);
    assert_eq!(parsed.query.get("x"), Some(""));
}

#[test]
fn test_parse_query_percent_decoding() {
    let req = b"GET /search?q=hello%20world&name%3F=a%26b&plus=a+b HTTP/1.1\r\n\r\n";
    let parsed = parse_http_request(req, peer()).unwrap();

    assert_eq!(parsed.path, "/search");
    assert_eq!(parsed.query.get("q"), Some("hello world"));
    assert_eq!(parsed.query.get("name?"), Some("a&b"));
    // '+' is not a space outside form bodies
    assert_eq!(parsed.query.get("plus"), Some("a+b"));
}

#[test]
fn test_parse_query_splits_on_first_equals_and_skips_empty_pairs() {
    let req = b"GET /?expr=a=b&&k=v HTTP/1.1\r\n\r\n";
    let parsed = parse_http_request(req, peer()).unwrap();

    assert_eq!(parsed.query.len(), 2);
    assert_eq!(parsed.query.get("expr"), Some("a=b"));
    assert_eq!(parsed.query.get("k"), Some("v"));
}

#[test]
fn test_parse_path_is_percent_decoded() {
    let req = b"GET /my%20docs/file%2Ename.txt HTTP/1.1\r\n\r\n";
    let parsed = parse_http_request(req, peer()).unwrap();

    assert_eq!(parsed.path, "/my docs/file.name.txt");
}

#[test]
fn test_parse_missing_header_terminator() {
    let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n";
    let result = parse_http_request(req, peer());

    assert!(matches!(result, Err(ParseError::MissingTerminator)));
}

#[test]
fn test_parse_short_request_line() {
    let result = parse_http_request(b"GET /\r\n\r\n", peer());
    assert!(matches!(result, Err(ParseError::InvalidRequestLine)));

    let result = parse_http_request(b"\r\n\r\n", peer());
    assert!(matches!(result, Err(ParseError::InvalidRequestLine)));
}

#[test]
fn test_parse_unknown_method_is_not_an_error() {
    let req = b"brew /pot HTTP/1.1\r\n\r\n";
    let parsed = parse_http_request(req, peer()).unwrap();

    assert_eq!(parsed.method, Method::Other("BREW".to_string()));
    assert_eq!(parsed.method.as_str(), "BREW");
}

#[test]
fn test_parse_method_is_uppercased() {
    let parsed = parse_http_request(b"post / HTTP/1.1\r\n\r\n", peer()).unwrap();
    assert_eq!(parsed.method, Method::POST);
}

#[test]
fn test_parse_malformed_header_lines_are_skipped() {
    let req = b"GET / HTTP/1.1\r\nBrokenHeader\r\n: no-name\r\nHost: ok\r\n\r\n";
    let parsed = parse_http_request(req, peer()).unwrap();

    assert_eq!(parsed.headers.len(), 1);
    assert_eq!(parsed.headers.get("Host"), Some("ok"));
}

#[test]
fn test_parse_header_value_split_on_first_colon() {
    let req = b"GET / HTTP/1.1\r\nHost:  localhost:8080  \r\n\r\n";
    let parsed = parse_http_request(req, peer()).unwrap();

    assert_eq!(parsed.headers.get("host"), Some("localhost:8080"));
}

#[test]
fn test_parse_various_http_methods() {
    let methods = vec![
        ("GET", Method::GET),
        ("POST", Method::POST),
        ("PUT", Method::PUT),
        ("DELETE", Method::DELETE),
        ("HEAD", Method::HEAD),
        ("OPTIONS", Method::OPTIONS),
        ("PATCH", Method::PATCH),
    ];

    for (method_str, expected_method) in methods {
        let req = format!("{} / HTTP/1.1\r\n\r\n", method_str);
        let parsed = parse_http_request(req.as_bytes(), peer()).unwrap();
        assert_eq!(parsed.method, expected_method);
    }
}

#[test]
fn test_parse_request_with_binary_body() {
    let req = b"POST /upload HTTP/1.1\r\nContent-Length: 4\r\n\r\n\x00\x01\x02\x03";
    let parsed = parse_http_request(req, peer()).unwrap();

    assert_eq!(parsed.body, vec![0, 1, 2, 3]);
}

#[test]
fn test_parse_header_lookup_case_insensitive() {
    let lower = parse_http_request(b"GET / HTTP/1.1\r\ncontent-type: foo\r\n\r\n", peer()).unwrap();
    let upper = parse_http_request(b"GET / HTTP/1.1\r\nContent-Type: foo\r\n\r\n", peer()).unwrap();

    for spelling in ["content-type", "Content-Type", "CONTENT-TYPE", "cOnTeNt-TyPe"] {
        assert_eq!(lower.header(spelling), Some("foo"));
        assert_eq!(upper.header(spelling), lower.header(spelling));
    }
}

#[test]
fn test_parse_duplicate_header_last_wins() {
    let req = b"GET / HTTP/1.1\r\nX-Id: 1\r\nx-id: 2\r\n\r\n";
    let parsed = parse_http_request(req, peer()).unwrap();

    assert_eq!(parsed.header("X-ID"), Some("2"));
}
