//! range-dl：按字节区间切分、多任务并发下载单个远程文件。

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use url::Url;

use range_dl::sources::TracingLogger;
use range_dl::{download_with_logger, DownloadError};

/// 默认并发分片数
const DEFAULT_WORKERS: usize = 4;

/// 多分片并发下载单个文件（服务器需支持 Range 请求）。
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 下载地址
    #[arg(index = 1)]
    url: String,

    /// 保存路径，默认取地址最后一段
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// 并发分片数
    #[arg(short, long, default_value_t = DEFAULT_WORKERS)]
    workers: usize,

    /// 以 JSON 输出结果
    #[arg(long)]
    json: bool,

    /// 输出每个分片的日志（等价于 RUST_LOG=range_dl=info）
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "range_dl=info" } else { "range_dl=warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();
}

/// 从地址推导文件名；推导不出时使用 `download.bin`。
fn default_output(url: &str) -> PathBuf {
    Url::parse(url)
        .ok()
        .and_then(|u| {
            Path::new(u.path())
                .file_name()
                .map(|name| PathBuf::from(name.to_os_string()))
        })
        .unwrap_or_else(|| PathBuf::from("download.bin"))
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let output = args.output.unwrap_or_else(|| default_output(&args.url));
    let result = download_with_logger(
        &args.url,
        &output,
        args.workers,
        Arc::new(TracingLogger),
    )
    .await;

    match result {
        Ok(summary) => {
            if args.json {
                match serde_json::to_string_pretty(&summary) {
                    Ok(text) => println!("{text}"),
                    Err(e) => {
                        eprintln!("序列化结果失败: {e}");
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                println!("已保存到 {}：{summary}", output.display());
            }
            ExitCode::SUCCESS
        }
        Err(DownloadError::PartsFailed(failures)) => {
            eprintln!("{} 个分片下载失败，{} 内容不完整：", failures.len(), output.display());
            for failure in &failures {
                eprintln!("  {failure}");
            }
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("下载失败: {e}");
            ExitCode::FAILURE
        }
    }
}
