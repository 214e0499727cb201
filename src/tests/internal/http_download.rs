//! 通过本地 HTTP 服务器的端到端下载测试。

use std::sync::Arc;

use rand::RngCore;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_LENGTH};
use url::Url;

use crate::internal::downloader::impl_traits::impl_http_range_source::parse_content_length;
use crate::sources::HttpRangeSource;
use crate::tests::{
    payload, spawn_range_server, spawn_range_server_with, RangedReply, RecordingLogger,
};
use crate::traits::RangeSource;
use crate::{download, download_with_logger, ByteRange, DownloadError};

#[tokio::test]
async fn probe_reads_total_size() {
    let address = spawn_range_server(payload(1234), true).await;
    let source = HttpRangeSource::new(reqwest::Client::new(), Url::parse(&address).unwrap());

    let probe = source.probe().await.unwrap();
    assert_eq!(probe.total, 1234);
}

#[tokio::test]
async fn probe_without_accept_ranges_is_unsupported() {
    let address = spawn_range_server(payload(10), false).await;
    let source = HttpRangeSource::new(reqwest::Client::new(), Url::parse(&address).unwrap());

    assert!(matches!(
        source.probe().await,
        Err(DownloadError::UnsupportedServer)
    ));
}

#[tokio::test]
async fn fetch_declares_range_length() {
    let data = payload(100);
    let address = spawn_range_server(data.clone(), true).await;
    let source = HttpRangeSource::new(reqwest::Client::new(), Url::parse(&address).unwrap());

    let body = source.fetch(ByteRange::new(10, 19)).await.unwrap();
    assert_eq!(body.content_length, Some(10));
}

#[tokio::test]
async fn download_hundred_bytes_with_four_workers() {
    let data = payload(100);
    let address = spawn_range_server(data.clone(), true).await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.bin");

    let summary = download(&address, &path, 4).await.unwrap();

    assert_eq!(summary.parts, 4);
    assert_eq!(summary.total_bytes, 100);
    assert_eq!(std::fs::read(&path).unwrap(), data);
}

#[tokio::test]
async fn download_uneven_split_through_http() {
    let data = payload(100);
    let address = spawn_range_server(data.clone(), true).await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("uneven.bin");

    // 最后一段请求 bytes=66-100，服务器截到 99，长度 34
    let summary = download(&address, &path, 3).await.unwrap();

    assert_eq!(summary.parts, 3);
    assert_eq!(std::fs::read(&path).unwrap(), data);
}

#[tokio::test]
async fn download_random_megabyte() {
    let mut data = vec![0u8; 1024 * 1024 + 5];
    rand::thread_rng().fill_bytes(&mut data);
    let address = spawn_range_server(data.clone(), true).await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("random.bin");

    let logger = Arc::new(RecordingLogger::default());
    let summary = download_with_logger(&address, &path, 7, logger.clone())
        .await
        .unwrap();

    assert_eq!(summary.parts, 7);
    let written = std::fs::read(&path).unwrap();
    assert_eq!(written.len(), data.len());
    assert!(written == data, "下载内容与源数据不一致");
    assert!(logger.errors.lock().unwrap().is_empty());
}

#[tokio::test]
async fn download_truncates_existing_file() {
    let data = payload(50);
    let address = spawn_range_server(data.clone(), true).await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("old.bin");
    std::fs::write(&path, vec![0xFF; 500]).unwrap();

    download(&address, &path, 2).await.unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), data);
}

#[tokio::test]
async fn empty_destination_is_rejected() {
    let address = spawn_range_server(payload(10), true).await;
    assert!(matches!(
        download(&address, "", 2).await,
        Err(DownloadError::InvalidDestination)
    ));
}

#[tokio::test]
async fn server_without_ranges_fails_download() {
    let address = spawn_range_server(payload(100), false).await;
    let dir = tempfile::tempdir().unwrap();

    let result = download(&address, dir.path().join("x.bin"), 4).await;
    assert!(matches!(result, Err(DownloadError::UnsupportedServer)));
}

#[tokio::test]
async fn zero_workers_fails_download() {
    let address = spawn_range_server(payload(100), true).await;
    let dir = tempfile::tempdir().unwrap();

    let result = download(&address, dir.path().join("x.bin"), 0).await;
    assert!(matches!(result, Err(DownloadError::InvalidInput(_))));
}

#[test]
fn blocking_download_outside_runtime() {
    let data = payload(300);
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let address = runtime.block_on(spawn_range_server(data.clone(), true));
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blocking.bin");

    let summary = crate::download_blocking(&address, &path, 3).unwrap();
    assert_eq!(summary.total_bytes, 300);
    assert_eq!(std::fs::read(&path).unwrap(), data);
}

#[tokio::test]
async fn fetch_error_status_is_request_error() {
    let address = spawn_range_server_with(payload(100), true, RangedReply::Status(416)).await;
    let source = HttpRangeSource::new(reqwest::Client::new(), Url::parse(&address).unwrap());

    source.probe().await.unwrap();
    assert!(matches!(
        source.fetch(ByteRange::new(0, 9)).await,
        Err(DownloadError::Request(_))
    ));
}

#[tokio::test]
async fn fetch_without_length_reports_none() {
    let address = spawn_range_server_with(payload(100), true, RangedReply::NoLength).await;
    let source = HttpRangeSource::new(reqwest::Client::new(), Url::parse(&address).unwrap());

    let body = source.fetch(ByteRange::new(0, 9)).await.unwrap();
    assert_eq!(body.content_length, None);
}

#[tokio::test]
async fn range_responses_without_length_fail_every_part() {
    let address = spawn_range_server_with(payload(100), true, RangedReply::NoLength).await;
    let dir = tempfile::tempdir().unwrap();

    match download(&address, dir.path().join("x.bin"), 2).await {
        Err(DownloadError::PartsFailed(failures)) => {
            let indexes: Vec<usize> = failures.iter().map(|f| f.index).collect();
            assert_eq!(indexes, vec![0, 1]);
            assert!(failures
                .iter()
                .all(|f| matches!(f.error, DownloadError::MissingSizeHeader)));
        }
        other => panic!("预期 PartsFailed，得到 {other:?}"),
    }
}

#[tokio::test]
async fn error_status_fails_download_per_part() {
    let address = spawn_range_server_with(payload(100), true, RangedReply::Status(500)).await;
    let dir = tempfile::tempdir().unwrap();

    match download(&address, dir.path().join("x.bin"), 3).await {
        Err(DownloadError::PartsFailed(failures)) => {
            assert_eq!(failures.len(), 3);
            assert!(failures
                .iter()
                .all(|f| matches!(f.error, DownloadError::Request(_))));
        }
        other => panic!("预期 PartsFailed，得到 {other:?}"),
    }
}

#[test]
fn content_length_parsing() {
    let mut headers = HeaderMap::new();
    assert!(matches!(
        parse_content_length(&headers),
        Err(DownloadError::MissingSizeHeader)
    ));

    headers.insert(CONTENT_LENGTH, HeaderValue::from_static("4096"));
    assert_eq!(parse_content_length(&headers).unwrap(), 4096);

    headers.insert(CONTENT_LENGTH, HeaderValue::from_static("12ab"));
    assert!(matches!(
        parse_content_length(&headers),
        Err(DownloadError::InvalidSizeHeader(_))
    ));

    headers.insert(CONTENT_LENGTH, HeaderValue::from_static("-1"));
    assert!(matches!(
        parse_content_length(&headers),
        Err(DownloadError::InvalidSizeHeader(_))
    ));
}
