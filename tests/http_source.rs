use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread;
use std::time::Duration;

use tunestats::error::FetchError;
use tunestats::model::{GenreCount, TimeWindow};
use tunestats::source::{GenreDataSource, HttpGenreSource};

fn serve_once(status_line: &'static str, body: &'static str) -> (String, thread::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub");
    let addr = listener.local_addr().expect("stub addr");
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept");
        let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
        let mut request = String::new();
        loop {
            let mut line = String::new();
            let read = reader.read_line(&mut line).expect("read request");
            if read == 0 || line == "\r\n" {
                break;
            }
            request.push_str(&line);
        }
        let response = format!(
            "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).expect("write response");
        request
    });
    (format!("http://{addr}"), handle)
}

fn source(base_url: &str, cookie: Option<&str>) -> HttpGenreSource {
    HttpGenreSource::new(
        base_url,
        Duration::from_secs(5),
        cookie.map(str::to_string),
    )
    .expect("client")
}

#[test]
fn fetches_genres_for_requested_window() {
    let (base_url, server) = serve_once(
        "HTTP/1.1 200 OK",
        r#"{"genres":[{"name":"indie","count":50},{"name":"pop","count":30}]}"#,
    );

    let genres = source(&base_url, Some("session=abc"))
        .fetch(TimeWindow::Short)
        .expect("fetch");
    let request = server.join().expect("stub thread").to_ascii_lowercase();

    assert_eq!(
        genres,
        vec![GenreCount::new("indie", 50), GenreCount::new("pop", 30)]
    );
    assert!(request.starts_with("get /api/top-genres?time_range=short_term "));
    assert!(request.contains("cookie: session=abc"));
}

#[test]
fn non_success_status_is_http_error() {
    let (base_url, server) = serve_once("HTTP/1.1 500 Internal Server Error", r#"{"error":"boom"}"#);

    let err = source(&base_url, None)
        .fetch(TimeWindow::Medium)
        .unwrap_err();
    server.join().expect("stub thread");

    assert_eq!(err, FetchError::Http { status: 500 });
}

#[test]
fn legacy_items_field_is_rejected() {
    let (base_url, server) = serve_once(
        "HTTP/1.1 200 OK",
        r#"{"items":[{"name":"indie","count":50}]}"#,
    );

    let err = source(&base_url, None).fetch(TimeWindow::Long).unwrap_err();
    server.join().expect("stub thread");

    assert!(matches!(err, FetchError::Decode(_)));
}

#[test]
fn refused_connection_is_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let err = source(&format!("http://{addr}"), None)
        .fetch(TimeWindow::Medium)
        .unwrap_err();

    assert!(matches!(err, FetchError::Network(_)));
}

#[test]
fn unanswered_request_times_out_as_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    let hold = thread::spawn(move || {
        let (stream, _) = listener.accept().expect("accept");
        thread::sleep(Duration::from_millis(800));
        drop(stream);
    });

    let slow = HttpGenreSource::new(
        &format!("http://{addr}"),
        Duration::from_millis(200),
        None,
    )
    .expect("client");
    let err = slow.fetch(TimeWindow::Medium).unwrap_err();
    hold.join().expect("hold thread");

    assert!(matches!(err, FetchError::Network(_)));
}
