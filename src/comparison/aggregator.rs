use serde::{Deserialize, Serialize};

use crate::entities::comparison_result::{BenchmarkUnit, ComparisonResult, Efficiency, GamingBenchmark};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SummaryStats {
    pub winner: String,
    pub is_single: bool,
    /// Signed mean of the per-game percentage gaps. Positive favours GPU1.
    pub avg_diff: f64,
    /// `|avg_diff|` rounded to one decimal, absent in single mode.
    pub display_magnitude: Option<f64>,
    pub qualifying_entries: usize,
}

impl SummaryStats {
    pub fn headline(&self) -> Option<String> {
        self.display_magnitude
            .map(|magnitude| format!("{} is ~{:.1}% faster on average", self.winner, magnitude))
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct EfficiencyBars {
    pub gpu1_percent: f64,
    pub gpu2_percent: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GameDelta {
    pub winner: String,
    pub percent_faster: f64,
}

impl GameDelta {
    pub fn label(&self) -> String {
        format!("{} is +{:.1}% faster", self.winner, self.percent_faster)
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Percentage by which the faster side beats the slower one.
fn percent_gap(fps1: f64, fps2: f64) -> f64 {
    let faster = fps1.max(fps2);
    let slower = fps1.min(fps2);
    if slower > 0.0 {
        (faster - slower) / slower * 100.0
    } else {
        0.0
    }
}

pub fn summarize(result: &ComparisonResult) -> SummaryStats {
    let Some(gpu2_name) = result.second_gpu() else {
        return SummaryStats {
            winner: result.gpu1_name.clone(),
            is_single: true,
            avg_diff: 0.0,
            display_magnitude: None,
            qualifying_entries: 0,
        };
    };

    let mut signed_total = 0.0;
    let mut count = 0usize;
    for benchmark in &result.gaming_benchmarks {
        if benchmark.gpu1_fps > 0.0 && benchmark.gpu2_fps > 0.0 {
            let pct = percent_gap(benchmark.gpu1_fps, benchmark.gpu2_fps);
            if benchmark.gpu1_fps > benchmark.gpu2_fps {
                signed_total += pct;
            } else {
                signed_total -= pct;
            }
            count += 1;
        }
    }

    let avg_diff = if count > 0 { signed_total / count as f64 } else { 0.0 };
    let winner = if avg_diff > 0.0 {
        result.gpu1_name.clone()
    } else {
        gpu2_name.to_string()
    };

    SummaryStats {
        winner,
        is_single: false,
        avg_diff,
        display_magnitude: Some(round_one_decimal(avg_diff.abs())),
        qualifying_entries: count,
    }
}

pub fn efficiency_bars(efficiency: &Efficiency) -> EfficiencyBars {
    let max_efficiency = efficiency.gpu1_fps_per_watt.max(efficiency.gpu2_fps_per_watt);
    if max_efficiency <= 0.0 {
        return EfficiencyBars {
            gpu1_percent: 0.0,
            gpu2_percent: 0.0,
        };
    }
    EfficiencyBars {
        gpu1_percent: efficiency.gpu1_fps_per_watt.max(0.0) / max_efficiency * 100.0,
        gpu2_percent: efficiency.gpu2_fps_per_watt.max(0.0) / max_efficiency * 100.0,
    }
}

/// Per-game tooltip line. `None` when there is nothing to compare against.
pub fn game_delta(benchmark: &GamingBenchmark, gpu1_name: &str, gpu2_name: Option<&str>) -> Option<GameDelta> {
    let gpu2_name = gpu2_name.filter(|name| !name.trim().is_empty())?;
    let winner = if benchmark.gpu1_fps > benchmark.gpu2_fps {
        gpu1_name
    } else {
        gpu2_name
    };
    Some(GameDelta {
        winner: winner.to_string(),
        percent_faster: percent_gap(benchmark.gpu1_fps, benchmark.gpu2_fps),
    })
}

/// Minutes and seconds for long render times, raw value and unit otherwise.
pub fn format_render_time(value: f64, unit: BenchmarkUnit) -> String {
    if unit == BenchmarkUnit::Seconds && value > 60.0 {
        let mut minutes = (value / 60.0).floor() as u64;
        let mut seconds = (value % 60.0).round() as u64;
        if seconds == 60 {
            minutes += 1;
            seconds = 0;
        }
        return format!("{}m {}s", minutes, seconds);
    }
    format!("{} {}", value, unit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::comparison_result::{GpuSpecs, Specs};

    fn game(name: &str, gpu1_fps: f64, gpu2_fps: f64) -> GamingBenchmark {
        GamingBenchmark {
            game_name: name.to_string(),
            resolution: "1440p".to_string(),
            gpu1_fps,
            gpu2_fps,
        }
    }

    fn result(gpu2_name: Option<&str>, games: Vec<GamingBenchmark>) -> ComparisonResult {
        let gpu_specs = GpuSpecs {
            vram: "16GB".to_string(),
            tdp: "250W".to_string(),
            release_year: "2023".to_string(),
            price: "$599".to_string(),
        };
        ComparisonResult {
            gpu1_name: "RTX 4070 Ti Super".to_string(),
            gpu2_name: gpu2_name.map(str::to_string),
            gaming_benchmarks: games,
            productivity_benchmarks: vec![],
            gaming_analysis: String::new(),
            productivity_analysis: String::new(),
            cpu_bottleneck_analysis: None,
            verdict: String::new(),
            specs: Specs {
                gpu1: gpu_specs.clone(),
                gpu2: gpu2_name.map(|_| gpu_specs),
                cpu: None,
            },
            efficiency: Efficiency {
                gpu1_fps_per_watt: 0.5,
                gpu2_fps_per_watt: 0.4,
                analysis: String::new(),
            },
        }
    }

    #[test]
    fn single_mode_makes_no_comparative_claim() {
        for gpu2_name in [None, Some(""), Some("   ")] {
            let stats = summarize(&result(gpu2_name, vec![game("Starfield", 80.0, 0.0)]));
            assert!(stats.is_single);
            assert_eq!(stats.winner, "RTX 4070 Ti Super");
            assert_eq!(stats.display_magnitude, None);
            assert_eq!(stats.headline(), None);
        }
    }

    #[test]
    fn double_fps_is_a_hundred_percent_lead() {
        let stats = summarize(&result(Some("RX 7800 XT"), vec![game("Doom Eternal", 100.0, 50.0)]));
        assert_eq!(stats.avg_diff, 100.0);
        assert_eq!(stats.display_magnitude, Some(100.0));
        assert_eq!(stats.winner, "RTX 4070 Ti Super");
    }

    #[test]
    fn gpu1_faster_everywhere_wins() {
        let stats = summarize(&result(
            Some("RX 7800 XT"),
            vec![game("A", 120.0, 100.0), game("B", 90.0, 60.0), game("C", 61.0, 60.0)],
        ));
        assert!(stats.avg_diff > 0.0);
        assert_eq!(stats.winner, "RTX 4070 Ti Super");
        assert_eq!(stats.qualifying_entries, 3);
    }

    #[test]
    fn gpu2_leads_produce_negative_average() {
        let stats = summarize(&result(
            Some("RX 7900 XTX"),
            vec![game("A", 50.0, 100.0), game("B", 110.0, 100.0)],
        ));
        assert_eq!(stats.avg_diff, -45.0);
        assert_eq!(stats.winner, "RX 7900 XTX");
        assert_eq!(stats.headline().unwrap(), "RX 7900 XTX is ~45.0% faster on average");
    }

    #[test]
    fn zero_fps_entries_are_excluded_from_the_average() {
        let stats = summarize(&result(
            Some("RX 7800 XT"),
            vec![game("A", 0.0, 70.0), game("B", 75.0, 50.0)],
        ));
        assert_eq!(stats.qualifying_entries, 1);
        assert_eq!(stats.avg_diff, 50.0);
    }

    #[test]
    fn no_qualifying_entries_avoids_division_by_zero() {
        let stats = summarize(&result(Some("RX 7800 XT"), vec![game("A", 0.0, 0.0)]));
        assert_eq!(stats.avg_diff, 0.0);
        assert_eq!(stats.winner, "RX 7800 XT");
        assert_eq!(stats.display_magnitude, Some(0.0));
    }

    #[test]
    fn magnitude_is_rounded_to_one_decimal() {
        let stats = summarize(&result(Some("RX 7800 XT"), vec![game("A", 100.0, 90.0)]));
        assert_eq!(stats.display_magnitude, Some(11.1));
    }

    #[test]
    fn efficiency_bars_are_normalized_to_the_best_card() {
        let bars = efficiency_bars(&Efficiency {
            gpu1_fps_per_watt: 2.0,
            gpu2_fps_per_watt: 1.0,
            analysis: String::new(),
        });
        assert_eq!(bars, EfficiencyBars { gpu1_percent: 100.0, gpu2_percent: 50.0 });

        let bars = efficiency_bars(&Efficiency {
            gpu1_fps_per_watt: 0.0,
            gpu2_fps_per_watt: 0.0,
            analysis: String::new(),
        });
        assert_eq!(bars, EfficiencyBars { gpu1_percent: 0.0, gpu2_percent: 0.0 });
    }

    #[test]
    fn render_times_over_a_minute_use_minutes() {
        assert_eq!(format_render_time(125.0, BenchmarkUnit::Seconds), "2m 5s");
        assert_eq!(format_render_time(45.0, BenchmarkUnit::Seconds), "45 Seconds");
        assert_eq!(format_render_time(60.0, BenchmarkUnit::Seconds), "60 Seconds");
        assert_eq!(format_render_time(119.7, BenchmarkUnit::Seconds), "2m 0s");
        assert_eq!(format_render_time(1250.0, BenchmarkUnit::Points), "1250 Points");
    }

    #[test]
    fn game_delta_names_the_faster_card() {
        let delta = game_delta(&game("A", 80.0, 100.0), "RTX 4070", Some("RX 7800 XT")).unwrap();
        assert_eq!(delta.label(), "RX 7800 XT is +25.0% faster");
        assert_eq!(game_delta(&game("A", 80.0, 0.0), "RTX 4070", None), None);
        let delta = game_delta(&game("A", 80.0, 0.0), "RTX 4070", Some("RX 7800 XT")).unwrap();
        assert_eq!(delta.percent_faster, 0.0);
    }
}
