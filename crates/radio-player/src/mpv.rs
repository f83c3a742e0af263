/// mpv playback engine over JSON IPC, with separated reader/writer tasks.
///
/// ```text
///   MpvLauncher::launch()  → spawns mpv, connects to its IPC socket
///         │
///         ├── writer_task   ← receives PendingRequest via mpsc, serialises → socket
///         └── reader_task   ← reads JSON lines from socket
///                                ├── response (has request_id) → matched oneshot::Sender
///                                └── event                     → logged
/// ```
///
/// Platform notes:
/// - Unix:    Unix domain socket in the temp dir
/// - Windows: Named pipe  \\.\pipe\<name>
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::{mpsc, oneshot, Mutex};
use tracing::{debug, info, warn};

use radio_core::engine::{Engine, EngineLauncher, EngineOptions};
use radio_core::platform;

#[cfg(unix)]
use tokio::net::UnixStream;

#[cfg(windows)]
use tokio::net::windows::named_pipe::ClientOptions;

static NEXT_REQ_ID: AtomicU64 = AtomicU64::new(1);

const IPC_TIMEOUT: tokio::time::Duration = tokio::time::Duration::from_secs(5);

type PendingMap = Arc<Mutex<HashMap<u64, oneshot::Sender<anyhow::Result<Value>>>>>;

struct PendingRequest {
    req_id: u64,
    payload: String, // serialised JSON line (already has '\n')
    reply: oneshot::Sender<anyhow::Result<Value>>,
}

// ── handle ────────────────────────────────────────────────────────────────────

/// Cloneable handle to the writer task.
#[derive(Clone)]
pub struct MpvHandle {
    tx: mpsc::Sender<PendingRequest>,
}

impl MpvHandle {
    pub async fn send(&self, command: Value) -> anyhow::Result<Value> {
        let req_id = NEXT_REQ_ID.fetch_add(1, Ordering::Relaxed);
        let msg = json!({ "command": command, "request_id": req_id });
        let mut raw = serde_json::to_string(&msg)?;
        raw.push('\n');

        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(PendingRequest {
                req_id,
                payload: raw,
                reply: reply_tx,
            })
            .await
            .map_err(|_| anyhow::anyhow!("mpv writer task gone"))?;

        tokio::time::timeout(IPC_TIMEOUT, reply_rx)
            .await
            .map_err(|_| anyhow::anyhow!("mpv IPC timeout for req={}", req_id))?
            .map_err(|_| anyhow::anyhow!("mpv reply channel dropped req={}", req_id))?
    }

    pub async fn load_stream(&self, url: &str) -> anyhow::Result<()> {
        self.send(json!(["loadfile", url, "replace"])).await?;
        Ok(())
    }

    pub async fn stop(&self) -> anyhow::Result<()> {
        self.send(json!(["stop"])).await?;
        Ok(())
    }

    pub async fn set_volume(&self, volume: f32) -> anyhow::Result<()> {
        let vol_pct = volume.clamp(0.0, 100.0);
        self.send(json!(["set_property", "volume", vol_pct])).await?;
        Ok(())
    }

    pub async fn quit(&self) -> anyhow::Result<()> {
        self.send(json!(["quit"])).await?;
        Ok(())
    }
}

/// Wire a reader and a writer half to a fresh pair of IO tasks.
fn start_io_tasks<R, W>(read_half: R, write_half: W) -> MpvHandle
where
    R: tokio::io::AsyncRead + Unpin + Send + 'static,
    W: tokio::io::AsyncWrite + Unpin + Send + 'static,
{
    // req_id → reply channel.  Writer inserts, reader resolves.
    let pending: PendingMap = Arc::new(Mutex::new(HashMap::new()));
    let (cmd_tx, cmd_rx) = mpsc::channel::<PendingRequest>(64);

    tokio::spawn(writer_task(write_half, cmd_rx, pending.clone()));
    tokio::spawn(reader_task(BufReader::new(read_half), pending));

    MpvHandle { tx: cmd_tx }
}

// ── launcher / engine ─────────────────────────────────────────────────────────

/// Spawns the mpv process on first play.
pub struct MpvLauncher {
    socket_name: String,
}

impl MpvLauncher {
    pub fn new() -> Self {
        Self {
            socket_name: platform::mpv_socket_name(),
        }
    }
}

impl Default for MpvLauncher {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineLauncher for MpvLauncher {
    type Engine = MpvEngine;

    async fn launch(&mut self, options: &EngineOptions) -> anyhow::Result<MpvEngine> {
        let (process, handle) = spawn_and_connect(&self.socket_name, options).await?;
        Ok(MpvEngine {
            socket_name: self.socket_name.clone(),
            options: options.clone(),
            process: Some(process),
            handle,
            volume: options.initial_volume,
        })
    }
}

/// A running mpv process plus its IPC handle.
pub struct MpvEngine {
    socket_name: String,
    options: EngineOptions,
    process: Option<tokio::process::Child>,
    handle: MpvHandle,
    volume: f32,
}

impl MpvEngine {
    fn process_alive(&mut self) -> bool {
        match self.process.as_mut() {
            Some(child) => child.try_wait().ok().flatten().is_none(),
            None => false,
        }
    }

    /// Respawn mpv if it exited behind our back (crash, killed by the user).
    async fn ensure_alive(&mut self) -> anyhow::Result<()> {
        if self.process_alive() {
            return Ok(());
        }
        warn!("mpv: process gone, respawning");
        let mut options = self.options.clone();
        options.initial_volume = self.volume;
        let (process, handle) = spawn_and_connect(&self.socket_name, &options).await?;
        self.process = Some(process);
        self.handle = handle;
        Ok(())
    }
}

impl Engine for MpvEngine {
    async fn play(&mut self, url: &str) -> anyhow::Result<()> {
        self.ensure_alive().await?;
        self.handle.load_stream(url).await
    }

    async fn stop(&mut self) -> anyhow::Result<()> {
        if !self.process_alive() {
            return Ok(());
        }
        self.handle.stop().await
    }

    async fn set_volume(&mut self, volume: f32) -> anyhow::Result<()> {
        self.volume = volume;
        if !self.process_alive() {
            return Ok(());
        }
        self.handle.set_volume(volume).await
    }

    async fn shutdown(&mut self) {
        if let Err(e) = self.handle.quit().await {
            debug!("mpv: quit failed: {}", e);
        }
        if let Some(mut p) = self.process.take() {
            let exited = tokio::time::timeout(
                tokio::time::Duration::from_secs(1),
                p.wait(),
            )
            .await;
            if exited.is_err() {
                let _ = p.kill().await;
            }
        }
        #[cfg(unix)]
        {
            let _ = tokio::fs::remove_file(&self.socket_name).await;
        }
    }
}

// ── spawn / connect ───────────────────────────────────────────────────────────

fn spawn_process(
    socket_name: &str,
    options: &EngineOptions,
) -> anyhow::Result<tokio::process::Child> {
    let mpv_binary =
        platform::find_mpv_binary().ok_or_else(|| anyhow::anyhow!("mpv binary not found"))?;
    info!("mpv: spawning {}", mpv_binary.display());

    let child = tokio::process::Command::new(mpv_binary)
        .args(mpv_args(socket_name, options))
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .kill_on_drop(true)
        .spawn()?;
    Ok(child)
}

fn mpv_args(socket_name: &str, options: &EngineOptions) -> Vec<String> {
    vec![
        "--no-video".to_string(),
        "--idle=yes".to_string(),
        "--quiet".to_string(),
        "--audio-display=no".to_string(),
        format!("--ytdl={}", if options.ytdl { "yes" } else { "no" }),
        format!("--audio-client-name={}", options.client_name),
        format!(
            "--volume={}",
            options.initial_volume.clamp(0.0, 100.0).round() as i64
        ),
        platform::mpv_socket_arg(socket_name),
    ]
}

#[cfg(unix)]
async fn spawn_and_connect(
    socket_name: &str,
    options: &EngineOptions,
) -> anyhow::Result<(tokio::process::Child, MpvHandle)> {
    let socket_path = std::path::PathBuf::from(socket_name);
    let _ = tokio::fs::remove_file(&socket_path).await;

    let mut child = spawn_process(socket_name, options)?;

    // Wait for the socket to appear
    for _ in 0..50 {
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
        if socket_path.exists() {
            break;
        }
        if let Ok(Some(status)) = child.try_wait() {
            anyhow::bail!("mpv exited during startup ({})", status);
        }
    }
    if !socket_path.exists() {
        let _ = child.kill().await;
        anyhow::bail!("mpv IPC socket did not appear");
    }

    let stream = UnixStream::connect(&socket_path).await?;
    info!("mpv: connected to IPC socket");
    let (read_half, write_half) = stream.into_split();
    Ok((child, start_io_tasks(read_half, write_half)))
}

#[cfg(windows)]
async fn spawn_and_connect(
    socket_name: &str,
    options: &EngineOptions,
) -> anyhow::Result<(tokio::process::Child, MpvHandle)> {
    let mut child = spawn_process(socket_name, options)?;

    let pipe_path = format!(r"\\.\pipe\{}", socket_name);
    for _ in 0..50 {
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
        if let Ok(client) = ClientOptions::new().open(&pipe_path) {
            info!("mpv: connected to named pipe");
            let (read_half, write_half) = tokio::io::split(client);
            return Ok((child, start_io_tasks(read_half, write_half)));
        }
    }
    let _ = child.kill().await;
    anyhow::bail!("mpv named pipe did not appear")
}

// ── reader task ───────────────────────────────────────────────────────────────

async fn reader_task<R>(mut reader: BufReader<R>, pending: PendingMap)
where
    R: tokio::io::AsyncRead + Unpin,
{
    let mut line = String::new();
    loop {
        line.clear();
        match reader.read_line(&mut line).await {
            Ok(0) => {
                debug!("mpv reader: connection closed");
                fail_all(&pending, "mpv IPC connection closed").await;
                break;
            }
            Ok(_) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let val: Value = match serde_json::from_str(trimmed) {
                    Ok(v) => v,
                    Err(e) => {
                        debug!("mpv reader: invalid json '{}': {}", trimmed, e);
                        continue;
                    }
                };

                if let Some(req_id) = val.get("request_id").and_then(|v| v.as_u64()) {
                    let mut map = pending.lock().await;
                    if let Some(tx) = map.remove(&req_id) {
                        let result = if val["error"].as_str() == Some("success") {
                            debug!("mpv reader: response req={} ok", req_id);
                            Ok(val)
                        } else {
                            let err = val["error"]
                                .as_str()
                                .unwrap_or("unknown error")
                                .to_string();
                            debug!("mpv reader: response req={} err={}", req_id, err);
                            Err(anyhow::anyhow!("mpv error: {}", err))
                        };
                        let _ = tx.send(result);
                    } else {
                        debug!("mpv reader: response for unknown req={}", req_id);
                    }
                } else {
                    log_event(&val);
                }
            }
            Err(e) => {
                warn!("mpv reader: read error: {}", e);
                fail_all(&pending, &format!("mpv IPC read error: {}", e)).await;
                break;
            }
        }
    }
}

async fn fail_all(pending: &PendingMap, reason: &str) {
    let mut map = pending.lock().await;
    for (_, tx) in map.drain() {
        let _ = tx.send(Err(anyhow::anyhow!("{}", reason)));
    }
}

/// Unsolicited events are not fed back into the controller; a stream that
/// dies on its own only shows up in the log.
fn log_event(val: &Value) {
    match val.get("event").and_then(|e| e.as_str()) {
        Some("end-file") if val["reason"].as_str() == Some("error") => {
            let detail = val["file_error"].as_str().unwrap_or("unknown error");
            warn!("mpv: stream ended with error: {}", detail);
        }
        Some(name) => debug!("mpv event: {}", name),
        None => debug!("mpv reader: unrecognised message {}", val),
    }
}

// ── writer task ───────────────────────────────────────────────────────────────

async fn writer_task<W>(mut writer: W, mut rx: mpsc::Receiver<PendingRequest>, pending: PendingMap)
where
    W: tokio::io::AsyncWrite + Unpin,
{
    while let Some(req) = rx.recv().await {
        // Register reply channel before writing so reader can match it
        {
            let mut map = pending.lock().await;
            map.insert(req.req_id, req.reply);
        }
        debug!("mpv writer: send req={} payload={}", req.req_id, req.payload.trim());
        let written = match writer.write_all(req.payload.as_bytes()).await {
            Ok(()) => writer.flush().await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            warn!("mpv writer: write error: {}", e);
            let mut map = pending.lock().await;
            if let Some(tx) = map.remove(&req.req_id) {
                let _ = tx.send(Err(anyhow::anyhow!("mpv write error: {}", e)));
            }
            break;
        }
    }
    debug!("mpv writer: task exiting");
}
