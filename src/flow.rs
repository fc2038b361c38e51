use crate::{
    domain::{MemberId, NotificationRequest, OutgoingNotification, RelaySummary},
    wire,
};
use snafu::{ensure, OptionExt, ResultExt, Snafu};
use std::io;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, trace_span, warn, Instrument};

/// Resolves a loosely-filled request into something a delivery client
/// can send without further checks.
#[derive(Debug, Clone, Default)]
pub struct PrepareFlow {
    default_title: Option<String>,
}

impl PrepareFlow {
    pub fn new(default_title: Option<String>) -> Self {
        Self { default_title }
    }

    pub fn prepare(
        &self,
        request: NotificationRequest,
    ) -> Result<OutgoingNotification, PrepareError> {
        let Self { default_title } = self;

        let (target, title, body) = request.into_parts();

        let target = target.context(MissingTargetSnafu)?;
        let title = title
            .or_else(|| default_title.clone())
            .context(MissingTitleSnafu { target })?;
        let body = body.context(MissingBodySnafu { target })?;

        Ok(OutgoingNotification {
            target,
            title,
            body,
        })
    }
}

#[derive(Debug, Clone)]
pub struct RelayFlow {
    prepare: PrepareFlow,
    max_line_bytes: usize,
}

impl RelayFlow {
    pub fn new(prepare: PrepareFlow, max_line_bytes: usize) -> Self {
        Self {
            prepare,
            max_line_bytes,
        }
    }

    /// Output is flushed before returning, including when reading or
    /// writing fails part way through.
    pub async fn relay<R, W>(&self, mut input: R, mut output: W) -> Result<RelaySummary>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let s = trace_span!("relay", max_line_bytes = self.max_line_bytes);

        async {
            let mut summary = RelaySummary::default();

            let relayed = self.relay_lines(&mut input, &mut output, &mut summary).await;
            let flushed = output.flush().await.context(UnableToWriteOutputSnafu);

            info!(
                accepted = summary.accepted,
                rejected = summary.rejected,
                skipped = summary.skipped,
                "Finished relaying notification requests",
            );

            relayed?;
            flushed?;

            Ok::<_, Error>(summary)
        }
        .instrument(s)
        .await
    }

    async fn relay_lines<R, W>(
        &self,
        input: &mut R,
        output: &mut W,
        summary: &mut RelaySummary,
    ) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut buf = Vec::new();
        let mut line_number = 0usize;

        while let Some(len) = self
            .read_line(input, &mut buf)
            .await
            .context(UnableToReadInputSnafu)?
        {
            line_number += 1;

            let n = match self.accept(len, &buf) {
                Ok(Some(n)) => n,
                Ok(None) => {
                    summary.skipped += 1;
                    continue;
                }
                Err(e) => {
                    warn!(line = line_number, "Rejected notification request: {}", e);
                    summary.rejected += 1;
                    continue;
                }
            };

            let mut encoded = wire::encode_outgoing(&n).context(UnableToEncodeSnafu)?;
            encoded.push('\n');
            output
                .write_all(encoded.as_bytes())
                .await
                .context(UnableToWriteOutputSnafu)?;

            debug!(
                line = line_number,
                member = n.target.0,
                "Accepted notification request",
            );
            summary.accepted += 1;
        }

        Ok(())
    }

    /// Reads one line into `buf` without its `\n` or `\r\n` terminator.
    ///
    /// At most `max_line_bytes` plus the terminator is buffered; the rest
    /// of a longer line is consumed and dropped. Returns the length of the
    /// whole line, or `None` at end of input.
    async fn read_line<R>(&self, input: &mut R, buf: &mut Vec<u8>) -> io::Result<Option<usize>>
    where
        R: AsyncBufRead + Unpin,
    {
        buf.clear();

        let limit = self.max_line_bytes as u64 + 2;
        let read = (&mut *input).take(limit).read_until(b'\n', buf).await?;
        if read == 0 {
            return Ok(None);
        }

        let mut len = buf.len();
        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
            len = buf.len();
        } else if read as u64 == limit {
            len += discard_line(input).await?;
        }

        Ok(Some(len))
    }

    fn accept(
        &self,
        len: usize,
        line: &[u8],
    ) -> Result<Option<OutgoingNotification>, RejectError> {
        let max_line_bytes = self.max_line_bytes;
        ensure!(
            len <= max_line_bytes,
            LineTooLongSnafu {
                len,
                max: max_line_bytes,
            }
        );

        let line = std::str::from_utf8(line).context(NotUtf8Snafu)?;
        if line.trim().is_empty() {
            return Ok(None);
        }

        let request = wire::decode_request(line).context(UndecodableSnafu)?;
        let n = self.prepare.prepare(request).context(IncompleteSnafu)?;

        Ok(Some(n))
    }
}

/// Consumes input up to and including the next `\n`, returning how many
/// bytes before it were dropped.
async fn discard_line<R>(input: &mut R) -> io::Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    let mut discarded = 0;

    loop {
        let (used, done) = {
            let available = input.fill_buf().await?;
            if available.is_empty() {
                return Ok(discarded);
            }
            match available.iter().position(|&b| b == b'\n') {
                Some(i) => (i + 1, true),
                None => (available.len(), false),
            }
        };
        input.consume(used);

        if done {
            return Ok(discarded + used - 1);
        }
        discarded += used;
    }
}

#[derive(Debug, Snafu)]
pub enum PrepareError {
    #[snafu(display("The request has no target member"))]
    MissingTarget,

    #[snafu(display("The request for member {} has no title", target.0))]
    MissingTitle { target: MemberId },

    #[snafu(display("The request for member {} has no body", target.0))]
    MissingBody { target: MemberId },
}

#[derive(Debug, Snafu)]
pub enum RejectError {
    #[snafu(display("Line is at least {} bytes, the limit is {}", len, max))]
    LineTooLong { len: usize, max: usize },

    #[snafu(display("Line is not valid UTF-8: {}", source))]
    NotUtf8 { source: std::str::Utf8Error },

    #[snafu(display("{}", source))]
    Undecodable { source: wire::Error },

    #[snafu(display("{}", source))]
    Incomplete { source: PrepareError },
}

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Unable to read notification requests"))]
    UnableToReadInput { source: io::Error },

    #[snafu(display("Unable to write prepared notifications"))]
    UnableToWriteOutput { source: io::Error },

    #[snafu(display("Unable to encode a prepared notification"))]
    UnableToEncode { source: wire::Error },
}

type Result<T, E = Error> = std::result::Result<T, E>;
