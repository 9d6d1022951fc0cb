//! JSON reporter
//!
//! Outputs the full AssessmentReport as pretty-printed JSON, with the chart
//! series and overall level inlined so consumers never recompute them.

use crate::models::{AssessmentReport, CategoryKey};
use crate::scoring::{MatrixPoint, RadarPoint, Status};
use anyhow::Result;
use serde::Serialize;

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    report: &'a AssessmentReport,
    recommendation: Option<CategoryKey>,
    overall_level: Option<Status>,
    radar: Vec<RadarPoint>,
    matrix: Vec<MatrixPoint>,
}

impl<'a> JsonReport<'a> {
    fn new(report: &'a AssessmentReport) -> Self {
        let eval = &report.evaluation;
        Self {
            report,
            recommendation: eval.recommendation(),
            overall_level: eval.overall_level(),
            radar: eval.radar(),
            matrix: eval.matrix(),
        }
    }
}

/// Render report as JSON
pub fn render(report: &AssessmentReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(&JsonReport::new(report))?)
}
