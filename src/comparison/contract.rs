use crate::comparison::schema::SchemaDescriptor;

pub const COMPARISON_SCHEMA_VERSION: &str = "benchmark_comparison_v1";
pub const SPEC_EXTRACTION_SCHEMA_VERSION: &str = "hardware_spec_extraction_v1";

fn gpu_specs(example_tdp: &str, example_price: &str) -> SchemaDescriptor {
    SchemaDescriptor::object()
        .required("vram", SchemaDescriptor::string())
        .required(
            "tdp",
            SchemaDescriptor::string().describe(format!(
                "Typical Board Power (TBP/TDP) in Watts, e.g., '{}'",
                example_tdp
            )),
        )
        .required("releaseYear", SchemaDescriptor::string())
        .required(
            "price",
            SchemaDescriptor::string().describe(format!(
                "Current estimated market price in USD, e.g. '{}'",
                example_price
            )),
        )
}

/// Response contract of a comparison request. The shape is the same in single
/// and comparison mode; GPU2 fields are nullable or zeroed when unused.
pub fn comparison_schema() -> SchemaDescriptor {
    let gaming_entry = SchemaDescriptor::object()
        .required(
            "gameName",
            SchemaDescriptor::string().describe("Name of the game (e.g., 'Cyberpunk 2077')"),
        )
        .required(
            "resolution",
            SchemaDescriptor::string()
                .describe("Resolution used for this specific benchmark (e.g., '1440p')"),
        )
        .required("gpu1Fps", SchemaDescriptor::non_negative_number())
        .required(
            "gpu2Fps",
            SchemaDescriptor::non_negative_number()
                .describe("Set to 0 or null if single mode")
                .nullable(),
        );

    let productivity_entry = SchemaDescriptor::object()
        .required(
            "workload",
            SchemaDescriptor::string()
                .describe("Name of the task, e.g. 'Premiere Pro 4K Export' or 'Blender Classroom'"),
        )
        .required("gpu1Score", SchemaDescriptor::number())
        .required(
            "gpu2Score",
            SchemaDescriptor::number()
                .describe("Set to 0 or null if single mode")
                .nullable(),
        )
        .required("unit", SchemaDescriptor::string_enum(&["Points", "Seconds"]))
        .required("lowerIsBetter", SchemaDescriptor::boolean());

    let specs = SchemaDescriptor::object()
        .required("gpu1", gpu_specs("285W", "$799"))
        .optional("gpu2", gpu_specs("245W", "$549").nullable())
        .optional(
            "cpu",
            SchemaDescriptor::object()
                .required("model", SchemaDescriptor::string())
                .required(
                    "price",
                    SchemaDescriptor::string().describe("Current estimated market price in USD"),
                )
                .required("tdp", SchemaDescriptor::string())
                .nullable(),
        );

    let efficiency = SchemaDescriptor::object()
        .describe("Performance per Watt analysis")
        .required(
            "gpu1FpsPerWatt",
            SchemaDescriptor::non_negative_number()
                .describe("Calculated average FPS divided by typical power draw"),
        )
        .required(
            "gpu2FpsPerWatt",
            SchemaDescriptor::non_negative_number()
                .describe("Calculated average FPS divided by typical power draw (0 or null if single mode)")
                .nullable(),
        )
        .required(
            "analysis",
            SchemaDescriptor::string().describe("Brief comment on power efficiency and electricity costs."),
        );

    SchemaDescriptor::object()
        .required(
            "gpu1Name",
            SchemaDescriptor::string().describe("Normalized name of the first GPU"),
        )
        .optional(
            "gpu2Name",
            SchemaDescriptor::string()
                .describe("Normalized name of the second GPU (or empty string if single mode)")
                .nullable(),
        )
        .required(
            "gamingBenchmarks",
            SchemaDescriptor::array(gaming_entry).describe(
                "Estimated FPS for 10 distinct AAA games. Include a diverse mix of engines (Unreal 5, proprietary) and genres (FPS, RPG, Racing).",
            ),
        )
        .required(
            "productivityBenchmarks",
            SchemaDescriptor::array(productivity_entry).describe(
                "Productivity scores or times. Use 3-4 representative workloads (e.g., Blender, Video Export). If a specific software is requested, include it.",
            ),
        )
        .required("specs", specs)
        .required("efficiency", efficiency)
        .required(
            "gamingAnalysis",
            SchemaDescriptor::string().describe("Concise technical analysis for gamers. No fluff."),
        )
        .required(
            "productivityAnalysis",
            SchemaDescriptor::string().describe("Concise technical analysis for creators. No fluff."),
        )
        .optional(
            "cpuBottleneckAnalysis",
            SchemaDescriptor::string()
                .describe("Analysis of CPU pairing fit.")
                .nullable(),
        )
        .required(
            "verdict",
            SchemaDescriptor::string().describe("Final concise recommendation."),
        )
}

/// Response contract of a document spec extraction. Absent values are empty strings.
pub fn spec_extraction_schema() -> SchemaDescriptor {
    SchemaDescriptor::object()
        .required("gpu1", SchemaDescriptor::string().describe("The dedicated GPU model found"))
        .required("cpuModel", SchemaDescriptor::string().describe("The specific CPU model"))
        .required("ramAmount", SchemaDescriptor::string().describe("Total RAM size, e.g. 16GB"))
        .required("ramSpeed", SchemaDescriptor::string().describe("RAM Frequency, e.g. 3200MHz"))
        .required(
            "ramBrand",
            SchemaDescriptor::string().describe("The manufacturer of the RAM, e.g. Corsair, G.Skill, Kingston"),
        )
}
