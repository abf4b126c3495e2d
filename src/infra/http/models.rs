//! Request and response bodies that are not recipes themselves.

use serde::{Deserialize, Serialize};

use crate::application::recipes::HealthReport;

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub tags: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    pub const UPDATED: Self = Self {
        message: "Recipe has been updated",
    };
    pub const DELETED: Self = Self {
        message: "Recipe Deleted",
    };
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    #[serde(flatten)]
    pub report: HealthReport,
}

impl From<HealthReport> for HealthResponse {
    fn from(report: HealthReport) -> Self {
        let status = if report.is_serving() {
            "ok"
        } else {
            "unavailable"
        };
        Self { status, report }
    }
}
