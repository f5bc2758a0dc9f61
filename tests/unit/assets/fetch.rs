use super::*;

#[tokio::test]
async fn malformed_url_is_an_acquisition_error() {
    let fetcher = HttpFetcher::with_client(reqwest::Client::new());
    assert!(matches!(
        fetcher.fetch("definitely not a url").await,
        Err(UnboxError::Acquisition(_))
    ));
}

#[tokio::test]
async fn unreachable_host_is_an_acquisition_error() {
    let fetcher = HttpFetcher::new(Duration::from_millis(500)).unwrap();
    // Port 9 (discard) on loopback is closed on any sane test machine.
    let res = fetcher.fetch("http://127.0.0.1:9/thumb.png").await;
    assert!(matches!(res, Err(UnboxError::Acquisition(_))));
}
