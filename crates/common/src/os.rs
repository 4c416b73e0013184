//! Platform family definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Host platform family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsType {
    Linux,
    Windows,
    MacOs,
    Unknown,
}

impl fmt::Display for OsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OsType::Linux => write!(f, "linux"),
            OsType::Windows => write!(f, "windows"),
            OsType::MacOs => write!(f, "macos"),
            OsType::Unknown => write!(f, "unknown"),
        }
    }
}

impl FromStr for OsType {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "linux" => Ok(OsType::Linux),
            "windows" => Ok(OsType::Windows),
            "macos" | "darwin" => Ok(OsType::MacOs),
            _ => Ok(OsType::Unknown),
        }
    }
}

impl OsType {
    /// Platform family of the running host.
    pub fn current() -> Self {
        Self::from_str(std::env::consts::OS).unwrap_or(OsType::Unknown)
    }

    /// Three-letter code used in snapshot file names.
    pub fn tag(&self) -> &'static str {
        match self {
            OsType::Linux => "LIN",
            OsType::Windows => "WIN",
            OsType::MacOs => "MAC",
            OsType::Unknown => "GEN",
        }
    }
}
