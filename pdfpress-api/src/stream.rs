//! Streaming ZIP response bodies.
//!
//! The archive is produced on a blocking thread and handed to the response
//! body through a bounded channel, so the client receives entries while later
//! files are still being compressed and a slow client holds back the writer.

use crate::error::COMPRESSION_FAILED;
use crate::upload::UploadedFile;
use axum::body::{Body, Bytes};
use pdfpress::{compress_file, output_name, ArchiveWriter, CompressOptions};
use std::io::{self, Write};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{error, info, warn};

type Chunk = Result<Bytes, io::Error>;

const CHUNK_SIZE: usize = 64 * 1024;
const CHANNEL_DEPTH: usize = 8;

/// Blocking `Write` adapter feeding a response body channel.
///
/// Must only be written, flushed or dropped off the async runtime, e.g. from
/// `spawn_blocking`.
pub struct ChannelWriter {
    tx: mpsc::Sender<Chunk>,
    buffer: Vec<u8>,
}

impl ChannelWriter {
    pub fn new(tx: mpsc::Sender<Chunk>) -> Self {
        Self {
            tx,
            buffer: Vec::with_capacity(CHUNK_SIZE),
        }
    }

    fn send_buffer(&mut self) -> io::Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        let chunk = std::mem::replace(&mut self.buffer, Vec::with_capacity(CHUNK_SIZE));
        self.tx
            .blocking_send(Ok(Bytes::from(chunk)))
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "response body closed"))
    }
}

impl Write for ChannelWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        if self.buffer.len() >= CHUNK_SIZE {
            self.send_buffer()?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.send_buffer()
    }
}

impl Drop for ChannelWriter {
    fn drop(&mut self) {
        let _ = self.send_buffer();
    }
}

/// Build a response body that streams a ZIP of `files`, in order.
///
/// `first` is the already compressed content of `files[0]`; the rest are
/// compressed one at a time right before they are appended. A failure after
/// this point can no longer change the response status, so it is logged and
/// the body ends with an error, which aborts the transfer.
pub fn zip_body(files: Vec<UploadedFile>, first: Vec<u8>, options: CompressOptions) -> Body {
    let (tx, rx) = mpsc::channel::<Chunk>(CHANNEL_DEPTH);
    let failure_tx = tx.clone();

    tokio::task::spawn_blocking(move || {
        let mut archive = ArchiveWriter::new(ChannelWriter::new(tx));

        match append_all(&mut archive, &files, first, &options) {
            Ok(()) => {
                if let Err(e) = archive.finish() {
                    warn!(error = %e, "failed to finalize archive");
                }
            }
            Err(e) => {
                error!(error = %e, "batch compression failed after response started");
                let _ = failure_tx.blocking_send(Err(io::Error::other(COMPRESSION_FAILED)));
            }
        }
    });

    Body::from_stream(ReceiverStream::new(rx))
}

fn append_all<W: Write>(
    archive: &mut ArchiveWriter<W>,
    files: &[UploadedFile],
    first: Vec<u8>,
    options: &CompressOptions,
) -> pdfpress::Result<()> {
    let mut first = Some(first);

    for file in files {
        let data = match first.take() {
            Some(data) => data,
            None => compress_file(file.path(), options)?,
        };
        let stored = archive.append(&output_name(&file.original_filename), &data)?;
        info!(entry = %stored, bytes = data.len(), "archive entry written");
    }
    Ok(())
}
