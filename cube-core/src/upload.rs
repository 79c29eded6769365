/// Upload intents recorded by the developer page
use log::info;

use crate::cube::CubeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadIntent {
    pub cube: CubeId,
}

/// Receives upload intents; no transfer happens behind it
pub trait UploadSink {
    fn record(&mut self, intent: UploadIntent);
}

/// Writes each intent to the diagnostic log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogUploadSink;

impl UploadSink for LogUploadSink {
    fn record(&mut self, intent: UploadIntent) {
        info!("Uploading media for cube {}", intent.cube);
    }
}

/// Keeps every intent in memory
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    intents: Vec<UploadIntent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intents(&self) -> &[UploadIntent] {
        &self.intents
    }

    pub fn last(&self) -> Option<UploadIntent> {
        self.intents.last().copied()
    }
}

impl UploadSink for RecordingSink {
    fn record(&mut self, intent: UploadIntent) {
        self.intents.push(intent);
    }
}
