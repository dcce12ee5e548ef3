use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::entities::error::ComparatorError;
use crate::openai_handler::{GptRequestConfig, LlmInvoker};

/// Invoker answering every call with the same canned output.
pub struct StubInvoker {
    response: Result<String, ComparatorError>,
    calls: AtomicUsize,
    last_request: Mutex<Option<GptRequestConfig>>,
}

impl StubInvoker {
    pub fn answering(text: impl Into<String>) -> StubInvoker {
        StubInvoker::with_response(Ok(text.into()))
    }

    pub fn failing(error: ComparatorError) -> StubInvoker {
        StubInvoker::with_response(Err(error))
    }

    fn with_response(response: Result<String, ComparatorError>) -> StubInvoker {
        StubInvoker {
            response,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<GptRequestConfig> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmInvoker for StubInvoker {
    async fn invoke(&self, request: &GptRequestConfig) -> Result<String, ComparatorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        self.response.clone()
    }
}

pub fn head_to_head_json() -> serde_json::Value {
    serde_json::json!({
        "gpu1Name": "GeForce RTX 4070 Super",
        "gpu2Name": "Radeon RX 7800 XT",
        "gamingBenchmarks": [
            { "gameName": "Cyberpunk 2077", "resolution": "1440p", "gpu1Fps": 90, "gpu2Fps": 75 },
            { "gameName": "Call of Duty: Modern Warfare III", "resolution": "1440p", "gpu1Fps": 140, "gpu2Fps": 160 },
            { "gameName": "Red Dead Redemption 2", "resolution": "1440p", "gpu1Fps": 0, "gpu2Fps": 88 }
        ],
        "productivityBenchmarks": [
            { "workload": "Blender Classroom", "gpu1Score": 38, "gpu2Score": 64, "unit": "Seconds", "lowerIsBetter": true },
            { "workload": "DaVinci Resolve 4K H.265 Export", "gpu1Score": 145, "gpu2Score": 160, "unit": "Seconds", "lowerIsBetter": true }
        ],
        "gamingAnalysis": "Trade blows at 1440p.",
        "productivityAnalysis": "CUDA and OptiX give the 4070 Super a clear lead.",
        "cpuBottleneckAnalysis": "N/A",
        "verdict": "4070 Super for creators, 7800 XT for raster value.",
        "specs": {
            "gpu1": { "vram": "12GB", "tdp": "220W", "releaseYear": "2024", "price": "$599" },
            "gpu2": { "vram": "16GB", "tdp": "263W", "releaseYear": "2023", "price": "$499" },
            "cpu": null
        },
        "efficiency": { "gpu1FpsPerWatt": 0.5, "gpu2FpsPerWatt": 0.4, "analysis": "Ada draws less power." }
    })
}
