/*
[INPUT]:  Ticker stream URL, run duration and grace period
[OUTPUT]: Bounded-lifetime stream session; parsed frames via channel + SessionReport
[POS]:    WebSocket layer - single subscription with guaranteed teardown
[UPDATE]: When changing connection lifecycle, frame handling or shutdown semantics
*/

use futures_util::StreamExt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until, timeout};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::http::{BinanceError, Result};
use crate::ws::message::StreamMessage;

pub const DEFAULT_GRACE_PERIOD: Duration = Duration::from_secs(5);
const DEFAULT_FRAME_BUFFER: usize = 100;
const RAW_LOG_MAX_BYTES: usize = 256;

/// Session tuning
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// How long to wait for the connection task after the stop signal
    pub grace_period: Duration,
    /// Capacity of the frame channel handed out by `take_receiver`
    pub frame_buffer: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            grace_period: DEFAULT_GRACE_PERIOD,
            frame_buffer: DEFAULT_FRAME_BUFFER,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Running,
    Closed,
}

impl SessionState {
    fn as_u8(self) -> u8 {
        match self {
            SessionState::Idle => 0,
            SessionState::Running => 1,
            SessionState::Closed => 2,
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            0 => SessionState::Idle,
            1 => SessionState::Running,
            _ => SessionState::Closed,
        }
    }
}

/// How the connection task ended relative to the grace period
#[derive(Debug)]
pub enum SessionOutcome {
    /// Task finished within the grace period
    Finished,
    /// Task still alive after the grace period; the handle lets callers
    /// observe or await the leaked task
    Detached(JoinHandle<()>),
}

#[derive(Debug)]
pub struct SessionReport {
    /// Well-formed frames processed
    pub frames: u64,
    /// Frames that failed to parse and were skipped
    pub malformed: u64,
    /// Time from `run` start to the stop signal
    pub close_requested_after: Duration,
    pub outcome: SessionOutcome,
}

impl SessionReport {
    pub fn is_detached(&self) -> bool {
        matches!(self.outcome, SessionOutcome::Detached(_))
    }
}

/// State shared between the caller and the connection task.
///
/// The task bumps the frame counters; `run` reads them when it builds the report.
#[derive(Debug)]
struct Shared {
    running: AtomicBool,
    state: AtomicU8,
    frames: AtomicU64,
    malformed: AtomicU64,
}

impl Shared {
    fn new() -> Self {
        Self {
            running: AtomicBool::new(false),
            state: AtomicU8::new(SessionState::Idle.as_u8()),
            frames: AtomicU64::new(0),
            malformed: AtomicU64::new(0),
        }
    }

    fn close(&self) {
        self.running.store(false, Ordering::Release);
        self.state
            .store(SessionState::Closed.as_u8(), Ordering::Release);
    }
}

/// One ticker subscription with a wall-clock lifetime.
///
/// `Idle -> Running -> Closed`; a closed session cannot be run again.
#[derive(Debug)]
pub struct TimedStreamSession {
    url: String,
    config: SessionConfig,
    shared: Arc<Shared>,
    frame_tx: mpsc::Sender<StreamMessage>,
    frame_rx: Option<mpsc::Receiver<StreamMessage>>,
}

impl TimedStreamSession {
    pub fn new(url: impl Into<String>, config: SessionConfig) -> Result<Self> {
        let url = url.into();
        if url.trim().is_empty() {
            return Err(BinanceError::Config("WebSocket URL is required".to_string()));
        }

        let (frame_tx, frame_rx) = mpsc::channel(config.frame_buffer.max(1));
        Ok(Self {
            url,
            config,
            shared: Arc::new(Shared::new()),
            frame_tx,
            frame_rx: Some(frame_rx),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn state(&self) -> SessionState {
        SessionState::from_u8(self.shared.state.load(Ordering::Acquire))
    }

    /// True while the socket is open and has not errored or closed
    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::Acquire)
    }

    /// Parsed frames; a full or dropped receiver never stalls the socket
    pub fn take_receiver(&mut self) -> Option<mpsc::Receiver<StreamMessage>> {
        self.frame_rx.take()
    }

    /// `run` with the duration given in (fractional) seconds
    pub async fn run_for_secs(&self, secs: f64) -> Result<SessionReport> {
        if !secs.is_finite() || secs <= 0.0 {
            return Err(BinanceError::Config(format!(
                "duration must be positive, got {secs}"
            )));
        }
        let duration = Duration::try_from_secs_f64(secs).map_err(|err| {
            BinanceError::Config(format!("duration {secs} out of range: {err}"))
        })?;
        self.run(duration).await
    }

    /// Stream for `duration`, then request close and wait up to the grace period.
    pub async fn run(&self, duration: Duration) -> Result<SessionReport> {
        if duration.is_zero() {
            return Err(BinanceError::Config(
                "duration must be positive".to_string(),
            ));
        }
        let started = Instant::now();
        let deadline = started.checked_add(duration).ok_or_else(|| {
            BinanceError::Config(format!("duration {duration:?} is too large"))
        })?;
        self.shared
            .state
            .compare_exchange(
                SessionState::Idle.as_u8(),
                SessionState::Running.as_u8(),
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .map_err(|_| BinanceError::Stream("session already used".to_string()))?;

        let cancel = CancellationToken::new();
        let (open_tx, open_rx) = oneshot::channel();

        let worker = StreamWorker {
            url: self.url.clone(),
            shared: self.shared.clone(),
            frame_tx: self.frame_tx.clone(),
            cancel: cancel.clone(),
        };
        let mut handle = tokio::spawn(worker.run(open_tx));

        tokio::select! {
            opened = open_rx => match opened {
                Ok(Ok(())) => {
                    info!(url = %self.url, duration_ms = duration.as_millis() as u64, "ticker stream opened");
                }
                Ok(Err(err)) => {
                    self.shared.close();
                    let _ = timeout(self.config.grace_period, &mut handle).await;
                    return Err(err);
                }
                Err(_) => {
                    self.shared.close();
                    return Err(BinanceError::Stream(
                        "stream task ended before the connection opened".to_string(),
                    ));
                }
            },
            _ = sleep_until(deadline) => {
                warn!(url = %self.url, "ticker stream did not open before the deadline");
            }
        }

        sleep_until(deadline).await;

        let close_requested_after = started.elapsed();
        cancel.cancel();
        debug!(
            elapsed_ms = close_requested_after.as_millis() as u64,
            "stop requested, closing ticker stream"
        );

        let outcome = match timeout(self.config.grace_period, &mut handle).await {
            Ok(Ok(())) => SessionOutcome::Finished,
            Ok(Err(err)) => {
                warn!(error = %err, "ticker stream task failed");
                SessionOutcome::Finished
            }
            Err(_) => {
                warn!(
                    grace_ms = self.config.grace_period.as_millis() as u64,
                    "ticker stream task did not terminate within the grace period"
                );
                SessionOutcome::Detached(handle)
            }
        };
        self.shared.close();

        let report = SessionReport {
            frames: self.shared.frames.load(Ordering::Acquire),
            malformed: self.shared.malformed.load(Ordering::Acquire),
            close_requested_after,
            outcome,
        };
        info!(
            frames = report.frames,
            malformed = report.malformed,
            detached = report.is_detached(),
            "ticker stream session closed"
        );
        Ok(report)
    }
}

/// Owns the live socket on the background task
struct StreamWorker {
    url: String,
    shared: Arc<Shared>,
    frame_tx: mpsc::Sender<StreamMessage>,
    cancel: CancellationToken,
}

impl StreamWorker {
    async fn run(self, open_tx: oneshot::Sender<Result<()>>) {
        let connected = tokio::select! {
            result = connect_async(self.url.as_str()) => result,
            _ = self.cancel.cancelled() => {
                debug!(url = %self.url, "stop requested before the stream opened");
                self.shared.close();
                return;
            }
        };

        let mut ws = match connected {
            Ok((ws, _response)) => ws,
            Err(err) => {
                error!(url = %self.url, error = %err, "WebSocket connection failed");
                self.shared.close();
                let _ = open_tx.send(Err(BinanceError::Stream(format!(
                    "failed to establish WebSocket connection: {err}"
                ))));
                return;
            }
        };

        self.shared.running.store(true, Ordering::Release);
        let _ = open_tx.send(Ok(()));

        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => {
                    if let Err(err) = ws.close(None).await {
                        debug!(error = %err, "close request failed");
                    }
                    // Drain until the peer acknowledges the close
                    while let Some(Ok(_)) = ws.next().await {}
                    break;
                }
                incoming = ws.next() => match incoming {
                    Some(Ok(WsMessage::Text(text))) => self.handle_text(text.as_str()),
                    Some(Ok(WsMessage::Binary(bytes))) => match std::str::from_utf8(&bytes) {
                        Ok(text) => self.handle_text(text),
                        Err(err) => {
                            self.shared.malformed.fetch_add(1, Ordering::AcqRel);
                            warn!(error = %err, bytes = bytes.len(), "binary frame is not utf-8");
                        }
                    },
                    Some(Ok(WsMessage::Close(frame))) => {
                        info!(?frame, "WebSocket closed by server");
                        break;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(err)) => {
                        error!(error = %err, "WebSocket error");
                        break;
                    }
                    None => {
                        info!("WebSocket stream ended");
                        break;
                    }
                }
            }
        }

        self.shared.close();
    }

    fn handle_text(&self, text: &str) {
        let message = match StreamMessage::parse(text) {
            Ok(message) => message,
            Err(err) => {
                self.shared.malformed.fetch_add(1, Ordering::AcqRel);
                warn!(
                    error = %err,
                    bytes = text.len(),
                    message = %truncate_for_log(text, RAW_LOG_MAX_BYTES),
                    "failed to parse message"
                );
                return;
            }
        };

        self.shared.frames.fetch_add(1, Ordering::AcqRel);
        match &message {
            StreamMessage::Ticker(ticker) => info!(
                symbol = %ticker.symbol,
                last_price = %ticker.last_price,
                change_pct = %ticker.price_change_percent,
                "ticker update"
            ),
            StreamMessage::Other(value) => debug!(
                message = %truncate_for_log(&value.to_string(), RAW_LOG_MAX_BYTES),
                "stream message"
            ),
        }

        match self.frame_tx.try_send(message) {
            Ok(()) | Err(TrySendError::Closed(_)) => {}
            Err(TrySendError::Full(_)) => debug!("frame receiver full, dropping frame"),
        }
    }
}

fn truncate_for_log(value: &str, max_len: usize) -> String {
    if value.len() <= max_len {
        return value.to_string();
    }
    let mut end = max_len;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    let mut out = String::with_capacity(end + 3);
    out.push_str(&value[..end]);
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_requires_url() {
        assert!(matches!(
            TimedStreamSession::new("", SessionConfig::default()),
            Err(BinanceError::Config(_))
        ));
    }

    #[test]
    fn test_receiver_take_once() {
        let mut session =
            TimedStreamSession::new("ws://127.0.0.1:1/ws/btcusdt@ticker", SessionConfig::default())
                .unwrap();
        assert_eq!(session.state(), SessionState::Idle);
        assert!(!session.is_running());
        assert!(session.take_receiver().is_some());
        assert!(session.take_receiver().is_none());
    }

    #[tokio::test]
    async fn test_non_positive_duration_rejected() {
        let session =
            TimedStreamSession::new("ws://127.0.0.1:1/ws/btcusdt@ticker", SessionConfig::default())
                .unwrap();

        assert!(matches!(
            session.run(Duration::ZERO).await,
            Err(BinanceError::Config(_))
        ));
        assert!(matches!(
            session.run_for_secs(-1.0).await,
            Err(BinanceError::Config(_))
        ));
        assert!(matches!(
            session.run_for_secs(f64::NAN).await,
            Err(BinanceError::Config(_))
        ));
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn test_truncate_for_log_respects_char_boundary() {
        assert_eq!(truncate_for_log("abc", 10), "abc");
        assert_eq!(truncate_for_log("abcdef", 3), "abc...");
        assert_eq!(truncate_for_log("ééé", 3), "é...");
    }
}
