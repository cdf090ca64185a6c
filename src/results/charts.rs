//! @ai:module:intent Charts over a run's round outcomes
//! @ai:module:layer infrastructure
//! @ai:module:public_api ChartGenerator
//! @ai:module:stateless true

use crate::ladder::PrizeLadder;
use crate::results::types::RoundResult;
use anyhow::Result;
use plotters::prelude::*;
use std::path::Path;

/// @ai:intent Trait for rendering result charts
pub trait ChartGeneratorTrait: Send + Sync {
    /// @ai:intent Render every chart for a run's rounds
    fn generate_all(&self, rounds: &[RoundResult], output_dir: &Path) -> Result<Vec<String>>;
}

/// @ai:intent Renders PNG charts from round results
pub struct ChartGenerator;

impl ChartGenerator {
    /// @ai:intent Create a chart generator
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Bar chart of levels cleared, one bar per round
    /// @ai:effects fs:write
    fn render_levels_chart(&self, rounds: &[RoundResult], output_path: &Path) -> Result<()> {
        let root = BitMapBackend::new(output_path, (960, 540)).into_drawing_area();
        root.fill(&WHITE)?;

        let max_round = rounds
            .iter()
            .map(|round| round.start_question)
            .max()
            .unwrap_or(1) as i32;

        let mut chart = ChartBuilder::on(&root)
            .caption("Levels cleared per round", ("sans-serif", 28))
            .margin(16)
            .x_label_area_size(36)
            .y_label_area_size(44)
            .build_cartesian_2d(1..max_round + 1, 0i32..PrizeLadder::LEVELS as i32 + 1)?;

        chart
            .configure_mesh()
            .x_desc("Round")
            .y_desc("Levels cleared")
            .draw()?;

        chart.draw_series(rounds.iter().map(|round| {
            let x = round.start_question as i32;
            Rectangle::new(
                [(x, 0), (x + 1, round.correct_answers as i32)],
                BLUE.mix(0.6).filled(),
            )
        }))?;

        root.present()?;
        Ok(())
    }

    /// @ai:intent Histogram of rounds grouped by levels cleared
    /// @ai:effects fs:write
    fn render_distribution_chart(
        &self,
        rounds: &[RoundResult],
        output_path: &Path,
    ) -> Result<()> {
        let root = BitMapBackend::new(output_path, (720, 480)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut counts = [0i32; PrizeLadder::LEVELS as usize + 1];
        for round in rounds {
            counts[round.correct_answers.min(PrizeLadder::LEVELS) as usize] += 1;
        }
        let max_count = counts.iter().copied().max().unwrap_or(0).max(1);

        let mut chart = ChartBuilder::on(&root)
            .caption("Rounds by levels cleared", ("sans-serif", 24))
            .margin(16)
            .x_label_area_size(36)
            .y_label_area_size(44)
            .build_cartesian_2d(0i32..PrizeLadder::LEVELS as i32 + 1, 0i32..max_count + 1)?;

        chart
            .configure_mesh()
            .x_desc("Levels cleared")
            .y_desc("Rounds")
            .draw()?;

        chart.draw_series(counts.iter().enumerate().map(|(cleared, count)| {
            let x = cleared as i32;
            Rectangle::new([(x, 0), (x + 1, *count)], GREEN.mix(0.6).filled())
        }))?;

        root.present()?;
        Ok(())
    }
}

impl Default for ChartGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartGeneratorTrait for ChartGenerator {
    /// @ai:intent Render both charts into the output directory
    /// @ai:effects fs:write
    fn generate_all(&self, rounds: &[RoundResult], output_dir: &Path) -> Result<Vec<String>> {
        std::fs::create_dir_all(output_dir)?;

        let mut generated = Vec::new();

        let levels_path = output_dir.join("levels_per_round.png");
        self.render_levels_chart(rounds, &levels_path)?;
        generated.push("levels_per_round.png".to_string());

        let distribution_path = output_dir.join("level_distribution.png");
        self.render_distribution_chart(rounds, &distribution_path)?;
        generated.push("level_distribution.png".to_string());

        Ok(generated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_generate_all_charts() {
        let generator = ChartGenerator::new();
        let temp = TempDir::new().unwrap();

        let rounds: Vec<RoundResult> = (1..=10)
            .map(|question| {
                let mut result = RoundResult::new(question, (question * 2).min(15));
                result.question_number = Some(question);
                result
            })
            .collect();

        let files = generator.generate_all(&rounds, temp.path()).unwrap();

        assert_eq!(files.len(), 2);
        assert!(temp.path().join("levels_per_round.png").exists());
        assert!(temp.path().join("level_distribution.png").exists());
    }
}
