/// Stage timing for a draw run
use colored::*;
use instant::Instant;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Loading,
    Validation,
    Drawing,
    Export,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Loading => write!(f, "loading"),
            Stage::Validation => write!(f, "validation"),
            Stage::Drawing => write!(f, "drawing"),
            Stage::Export => write!(f, "export"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StageMetrics {
    pub stage: Stage,
    pub duration_ms: f64,
    pub rows_processed: Option<u64>,
}

#[derive(Debug, Default)]
pub struct StageTimer {
    started: HashMap<Stage, Instant>,
    recorded: Vec<StageMetrics>,
}

impl StageTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, stage: Stage) {
        self.started.insert(stage, Instant::now());
    }

    /// Stop timing a stage. A stage that was never started records zero.
    pub fn end(&mut self, stage: Stage, rows_processed: Option<u64>) -> StageMetrics {
        let duration_ms = self
            .started
            .remove(&stage)
            .map(|start| start.elapsed().as_secs_f64() * 1000.0)
            .unwrap_or(0.0);

        let metrics = StageMetrics {
            stage,
            duration_ms,
            rows_processed,
        };
        self.recorded.push(metrics.clone());
        metrics
    }

    pub fn recorded(&self) -> &[StageMetrics] {
        &self.recorded
    }

    pub fn total_ms(&self) -> f64 {
        self.recorded.iter().map(|m| m.duration_ms).sum()
    }

    pub fn print_summary(&self) {
        println!("\n{}", "⏱️  Stage Timings".bright_cyan().bold());
        println!("{}", "=".repeat(40).bright_cyan());

        for metric in &self.recorded {
            let stage_color = match metric.stage {
                Stage::Loading => "blue",
                Stage::Validation => "magenta",
                Stage::Drawing => "yellow",
                Stage::Export => "green",
            };

            println!(
                "{}: {} ms{}",
                metric.stage.to_string().color(stage_color),
                format!("{:.3}", metric.duration_ms).bright_white(),
                if let Some(rows) = metric.rows_processed {
                    format!(" ({} rows)", rows.to_string().bright_yellow())
                } else {
                    String::new()
                }
            );
        }

        println!("{}", "-".repeat(40).bright_cyan());
        println!(
            "{}: {} ms",
            "Total".bright_white().bold(),
            format!("{:.3}", self.total_ms()).bright_green().bold()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_stages_in_completion_order() {
        let mut timer = StageTimer::new();
        timer.start(Stage::Loading);
        timer.start(Stage::Drawing);
        timer.end(Stage::Drawing, None);
        timer.end(Stage::Loading, Some(12));

        let stages: Vec<Stage> = timer.recorded().iter().map(|m| m.stage).collect();
        assert_eq!(stages, vec![Stage::Drawing, Stage::Loading]);
        assert_eq!(timer.recorded()[1].rows_processed, Some(12));
        assert!(timer.total_ms() >= 0.0);
    }

    #[test]
    fn ending_an_unstarted_stage_records_zero() {
        let mut timer = StageTimer::new();
        let metrics = timer.end(Stage::Export, None);
        assert_eq!(metrics.duration_ms, 0.0);
    }
}
