use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::entities::hardware_query::HardwareQuery;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum BenchmarkUnit {
    Points,
    Seconds,
}

impl BenchmarkUnit {
    pub fn label(self) -> &'static str {
        match self {
            BenchmarkUnit::Points => "Points",
            BenchmarkUnit::Seconds => "Seconds",
        }
    }
}

impl fmt::Display for BenchmarkUnit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Second-GPU figures are `null` or 0 when unused; both read as 0.
fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GamingBenchmark {
    pub game_name: String,
    pub resolution: String,
    pub gpu1_fps: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub gpu2_fps: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductivityBenchmark {
    pub workload: String,
    pub gpu1_score: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub gpu2_score: f64,
    pub unit: BenchmarkUnit,
    pub lower_is_better: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GpuSpecs {
    pub vram: String,
    pub tdp: String,
    pub release_year: String,
    pub price: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CpuSpecs {
    pub model: String,
    pub price: String,
    pub tdp: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Specs {
    pub gpu1: GpuSpecs,
    pub gpu2: Option<GpuSpecs>,
    pub cpu: Option<CpuSpecs>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Efficiency {
    pub gpu1_fps_per_watt: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub gpu2_fps_per_watt: f64,
    pub analysis: String,
}

/// The structured answer of the model for one submission.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub gpu1_name: String,
    pub gpu2_name: Option<String>,
    pub gaming_benchmarks: Vec<GamingBenchmark>,
    pub productivity_benchmarks: Vec<ProductivityBenchmark>,
    pub gaming_analysis: String,
    pub productivity_analysis: String,
    pub cpu_bottleneck_analysis: Option<String>,
    pub verdict: String,
    pub specs: Specs,
    pub efficiency: Efficiency,
}

impl ComparisonResult {
    /// Second GPU name, `None` when absent or blank.
    pub fn second_gpu(&self) -> Option<&str> {
        self.gpu2_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Brings the model's answer in line with what was asked: every GPU2 field
    /// is cleared in single mode and the CPU record is dropped when no CPU was
    /// given.
    pub fn normalize_for_query(&mut self, query: &HardwareQuery) {
        if query.is_single() {
            self.gpu2_name = None;
            self.specs.gpu2 = None;
            self.efficiency.gpu2_fps_per_watt = 0.0;
            for benchmark in self.gaming_benchmarks.iter_mut() {
                benchmark.gpu2_fps = 0.0;
            }
            for benchmark in self.productivity_benchmarks.iter_mut() {
                benchmark.gpu2_score = 0.0;
            }
        } else if self.second_gpu().is_none() {
            self.gpu2_name = Some(query.gpu2.clone());
        }

        if query.cpu_for_analysis().is_none() {
            self.specs.cpu = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::hardware_query::CpuConfig;

    fn sample_json() -> serde_json::Value {
        serde_json::json!({
            "gpu1Name": "GeForce RTX 4080 Super",
            "gpu2Name": "Radeon RX 7900 XTX",
            "gamingBenchmarks": [
                { "gameName": "Cyberpunk 2077", "resolution": "1440p", "gpu1Fps": 110.0, "gpu2Fps": 98.0 }
            ],
            "productivityBenchmarks": [
                { "workload": "Blender Classroom", "gpu1Score": 42.0, "gpu2Score": 71.0, "unit": "Seconds", "lowerIsBetter": true }
            ],
            "gamingAnalysis": "Close at 1440p.",
            "productivityAnalysis": "OptiX wins.",
            "cpuBottleneckAnalysis": "N/A",
            "verdict": "Pick the cheaper one.",
            "specs": {
                "gpu1": { "vram": "16GB", "tdp": "320W", "releaseYear": "2024", "price": "$999" },
                "gpu2": { "vram": "24GB", "tdp": "355W", "releaseYear": "2022", "price": "$899" },
                "cpu": { "model": "Ryzen 7 7800X3D", "price": "$399", "tdp": "120W" }
            },
            "efficiency": { "gpu1FpsPerWatt": 0.34, "gpu2FpsPerWatt": 0.28, "analysis": "Ada is leaner." }
        })
    }

    #[test]
    fn parses_the_camel_case_contract() {
        let result: ComparisonResult = serde_json::from_value(sample_json()).unwrap();
        assert_eq!(result.second_gpu(), Some("Radeon RX 7900 XTX"));
        assert_eq!(result.productivity_benchmarks[0].unit, BenchmarkUnit::Seconds);
        assert_eq!(result.specs.gpu1.release_year, "2024");
    }

    #[test]
    fn missing_required_field_is_rejected() {
        let mut json = sample_json();
        json.as_object_mut().unwrap().remove("verdict");
        assert!(serde_json::from_value::<ComparisonResult>(json).is_err());
    }

    #[test]
    fn null_second_gpu_figures_read_as_zero() {
        let mut json = sample_json();
        json["gamingBenchmarks"][0]["gpu2Fps"] = serde_json::Value::Null;
        json["productivityBenchmarks"][0]["gpu2Score"] = serde_json::Value::Null;
        json["efficiency"]["gpu2FpsPerWatt"] = serde_json::Value::Null;
        let result: ComparisonResult = serde_json::from_value(json).unwrap();
        assert_eq!(result.gaming_benchmarks[0].gpu2_fps, 0.0);
        assert_eq!(result.productivity_benchmarks[0].gpu2_score, 0.0);
        assert_eq!(result.efficiency.gpu2_fps_per_watt, 0.0);
    }

    #[test]
    fn null_first_gpu_figure_is_rejected() {
        let mut json = sample_json();
        json["gamingBenchmarks"][0]["gpu1Fps"] = serde_json::Value::Null;
        assert!(serde_json::from_value::<ComparisonResult>(json).is_err());
    }

    #[test]
    fn unknown_unit_is_rejected() {
        let mut json = sample_json();
        json["productivityBenchmarks"][0]["unit"] = serde_json::json!("Minutes");
        assert!(serde_json::from_value::<ComparisonResult>(json).is_err());
    }

    #[test]
    fn single_mode_normalization_clears_second_gpu() {
        let mut result: ComparisonResult = serde_json::from_value(sample_json()).unwrap();
        result.normalize_for_query(&HardwareQuery::single("RTX 4080 Super 16GB"));

        assert_eq!(result.gpu2_name, None);
        assert_eq!(result.specs.gpu2, None);
        assert_eq!(result.specs.cpu, None);
        assert_eq!(result.efficiency.gpu2_fps_per_watt, 0.0);
        assert!(result.gaming_benchmarks.iter().all(|b| b.gpu2_fps == 0.0));
        assert!(result.productivity_benchmarks.iter().all(|b| b.gpu2_score == 0.0));
    }

    #[test]
    fn comparison_normalization_keeps_cpu_when_requested() {
        let mut result: ComparisonResult = serde_json::from_value(sample_json()).unwrap();
        result.gpu2_name = Some("".to_string());
        let query = HardwareQuery::comparison("RTX 4080 Super 16GB", "RX 7900 XTX 24GB").with_cpu(CpuConfig {
            model: "Ryzen 7 7800X3D".to_string(),
            ram_amount: "32GB".to_string(),
            ram_speed: "6000MHz".to_string(),
            ram_brand: None,
        });
        result.normalize_for_query(&query);

        assert_eq!(result.second_gpu(), Some("RX 7900 XTX 24GB"));
        assert!(result.specs.cpu.is_some());
    }
}
