use crate::config::ClinicConfig;
use crate::model::Patient;
use crate::stats::Stats;
use std::path::PathBuf;

pub mod config;
pub mod create;
pub mod delete;
pub mod list;
pub mod search;
pub mod stats;
pub mod storage;
pub mod update;
pub mod view;

#[derive(Debug, Clone)]
pub struct ClinicPaths {
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_patients: Vec<Patient>,
    pub listed_patients: Vec<Patient>,
    pub stats: Option<Stats>,
    pub config: Option<ClinicConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_patients(mut self, patients: Vec<Patient>) -> Self {
        self.affected_patients = patients;
        self
    }

    pub fn with_listed_patients(mut self, patients: Vec<Patient>) -> Self {
        self.listed_patients = patients;
        self
    }

    pub fn with_stats(mut self, stats: Stats) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn with_config(mut self, config: ClinicConfig) -> Self {
        self.config = Some(config);
        self
    }
}
