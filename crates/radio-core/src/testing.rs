//! Scripted engine for tests.  Every call lands in a shared journal so tests
//! can assert on ordering; failures can be switched on per operation.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::engine::{Engine, EngineLauncher, EngineOptions};

#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    /// Launch with this initial volume.
    Launch(f32),
    Play(String),
    Stop,
    SetVolume(f32),
    Shutdown,
}

#[derive(Debug, Default)]
struct Journal {
    calls: Vec<EngineCall>,
    launches: usize,
    fail_launch: bool,
    fail_play: bool,
    fail_stop: bool,
}

/// Cloning shares the journal, so keep a clone to inspect before handing the
/// launcher to a controller.
#[derive(Debug, Clone, Default)]
pub struct RecordingLauncher {
    journal: Arc<Mutex<Journal>>,
}

impl RecordingLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    fn journal(&self) -> MutexGuard<'_, Journal> {
        // A panicking test poisons the lock; the journal is still readable.
        self.journal.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.journal().calls.clone()
    }

    pub fn clear(&self) {
        self.journal().calls.clear();
    }

    pub fn launches(&self) -> usize {
        self.journal().launches
    }

    pub fn fail_launch(&self, fail: bool) {
        self.journal().fail_launch = fail;
    }

    pub fn fail_play(&self, fail: bool) {
        self.journal().fail_play = fail;
    }

    pub fn fail_stop(&self, fail: bool) {
        self.journal().fail_stop = fail;
    }
}

pub struct RecordingEngine {
    journal: Arc<Mutex<Journal>>,
}

impl RecordingEngine {
    fn journal(&self) -> MutexGuard<'_, Journal> {
        self.journal.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl EngineLauncher for RecordingLauncher {
    type Engine = RecordingEngine;

    async fn launch(&mut self, options: &EngineOptions) -> anyhow::Result<RecordingEngine> {
        let mut journal = self.journal();
        journal.launches += 1;
        if journal.fail_launch {
            anyhow::bail!("mpv binary not found");
        }
        journal.calls.push(EngineCall::Launch(options.initial_volume));
        Ok(RecordingEngine {
            journal: Arc::clone(&self.journal),
        })
    }
}

impl Engine for RecordingEngine {
    async fn play(&mut self, url: &str) -> anyhow::Result<()> {
        let mut journal = self.journal();
        if journal.fail_play {
            anyhow::bail!("mpv error: loading failed");
        }
        journal.calls.push(EngineCall::Play(url.to_string()));
        Ok(())
    }

    async fn stop(&mut self) -> anyhow::Result<()> {
        let mut journal = self.journal();
        journal.calls.push(EngineCall::Stop);
        if journal.fail_stop {
            anyhow::bail!("mpv IPC timeout");
        }
        Ok(())
    }

    async fn set_volume(&mut self, volume: f32) -> anyhow::Result<()> {
        self.journal().calls.push(EngineCall::SetVolume(volume));
        Ok(())
    }

    async fn shutdown(&mut self) {
        self.journal().calls.push(EngineCall::Shutdown);
    }
}
