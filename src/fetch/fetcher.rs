//! Fetch one resource and write it to disk.
//!
//! [`fetch`] never fails: transport errors, non-2xx statuses and filesystem
//! errors are all turned into a [`FetchResult`]. [`fetch_guarded`] adds a
//! deadline and a cancellation signal on top, still producing exactly one
//! result. A copy stopped halfway keeps its status, path and byte count.

use super::result::FetchResult;
use crate::error::Error;
use crate::game::FetchTask;
use crate::http::Transport;

use futures::StreamExt;
use std::future::{self, Future};
use std::io;
use std::path::Path;
use std::pin::pin;
use std::time::Duration;
use tokio::fs::{DirBuilder, File};
use tokio::io::AsyncWriteExt;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Permissions of created game directories.
#[cfg(unix)]
const DIR_MODE: u32 = 0o700;

/// Fetches `task` and writes its body under `root`.
pub async fn fetch(transport: &dyn Transport, task: &FetchTask, root: &Path) -> FetchResult {
    fetch_until(transport, task, root, future::pending()).await
}

/// Like [`fetch`], bounded by an optional deadline and a cancellation token.
///
/// A fetch that runs out of time yields [`Error::Timeout`]; one interrupted by
/// `cancel` yields [`Error::Cancelled`]. Once a response was received, the
/// result also carries its status and whatever was already written.
pub async fn fetch_guarded(
    transport: &dyn Transport,
    task: &FetchTask,
    root: &Path,
    timeout: Option<Duration>,
    cancel: &CancellationToken,
) -> FetchResult {
    fetch_until(transport, task, root, stop_signal(timeout, cancel)).await
}

/// Resolves with the reason to stop once the deadline passes or `cancel` fires.
async fn stop_signal(timeout: Option<Duration>, cancel: &CancellationToken) -> Error {
    let expired = async {
        match timeout {
            Some(limit) => {
                tokio::time::sleep(limit).await;
                Error::Timeout(limit)
            }
            None => future::pending().await,
        }
    };

    tokio::select! {
        biased;
        _ = cancel.cancelled() => Error::Cancelled,
        err = expired => err,
    }
}

/// Runs the fetch, abandoning it at whichever step is pending when `stop` resolves.
async fn fetch_until<S>(
    transport: &dyn Transport,
    task: &FetchTask,
    root: &Path,
    stop: S,
) -> FetchResult
where
    S: Future<Output = Error>,
{
    let mut stop = pin!(stop);

    let res = tokio::select! {
        biased;
        err = stop.as_mut() => return FetchResult::failed(task, err),
        res = transport.get(&task.url) => match res {
            Ok(res) => res,
            Err(e) => return FetchResult::failed(task, e),
        },
    };

    // Exit early if the response is not ok.
    let status = res.status;
    if !status.is_success() {
        return FetchResult::rejected(task, status);
    }

    let output_dir = task.destination_dir(root);
    debug!("Creating destination directory {:?}", output_dir);
    tokio::select! {
        biased;
        err = stop.as_mut() => return FetchResult::interrupted(task, status, None, 0, err),
        created = create_dir_all(&output_dir) => {
            if let Err(e) = created {
                return FetchResult::interrupted(task, status, None, 0, e.into());
            }
        }
    }

    let output = output_dir.join(&task.filename);
    debug!("Creating destination file {:?}", &output);
    let mut file = tokio::select! {
        biased;
        err = stop.as_mut() => return FetchResult::interrupted(task, status, None, 0, err),
        file = File::create(&output) => match file {
            Ok(file) => file,
            Err(e) => return FetchResult::interrupted(task, status, Some(output), 0, e.into()),
        },
    };

    let mut written: u64 = 0;
    let mut body = res.body;
    loop {
        let item = tokio::select! {
            biased;
            err = stop.as_mut() => {
                return FetchResult::interrupted(task, status, Some(output), written, err)
            }
            item = body.next() => item,
        };
        let Some(item) = item else { break };

        let mut chunk = match item {
            Ok(chunk) => chunk,
            Err(e) => return FetchResult::interrupted(task, status, Some(output), written, e),
        };
        let chunk_size = chunk.len() as u64;

        tokio::select! {
            biased;
            err = stop.as_mut() => {
                return FetchResult::interrupted(task, status, Some(output), written, err)
            }
            res = file.write_all_buf(&mut chunk) => {
                if let Err(e) = res {
                    return FetchResult::interrupted(task, status, Some(output), written, e.into());
                }
            }
        }
        written += chunk_size;
    }

    if let Err(e) = file.flush().await {
        return FetchResult::interrupted(task, status, Some(output), written, e.into());
    }

    FetchResult::saved(task, status, output, written)
}

async fn create_dir_all(dir: &Path) -> io::Result<()> {
    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    builder.mode(DIR_MODE);
    builder.create(dir).await
}
