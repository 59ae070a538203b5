//! Full runs from input files on disk to published tables.
//!
//! Run with:
//! ```bash
//! cargo test -p steelflow --test end_to_end
//! ```

use std::fs;
use std::path::Path;

use steelflow::loader::config::{InputsConfig, LoaderConfig, OutputPathsConfig};
use steelflow::models::{Correction, Direction, OutputShape, PipelineConfig};

const ALLOCATION: &str = "SITC_code,description,sector_code,stage,multiplier\n\
X1,Reinforcing bars,S1,Primary,1\n\
X2,Wire products,S1,Intermediate,0.4\n\
X2,Wire products,S2,Final,0.6\n\
X9,Live animals,,,\n";

const CATEGORIES: &str = "sector_code,sector_group,sector_name,iron_content\n\
S1,Construction,\"Structural, heavy\",0.9\n\
S2,Vehicles,Cars,0.5\n";

fn comtrade_doc(year: i32, rows: &[(&str, &str, f64)]) -> String {
    let dataset: Vec<serde_json::Value> = rows
        .iter()
        .map(|(code, flow, weight)| {
            serde_json::json!({
                "yr": year,
                "period": year,
                "rt3ISO": "GBR",
                "pt3ISO": "WLD",
                "rgDesc": flow,
                "cmdCode": code,
                "NetWeight": weight,
            })
        })
        .collect();
    serde_json::json!({
        "validation": {
            "status": {"name": "Ok", "value": 0, "category": 0},
            "count": {"value": rows.len()},
        },
        "dataset": dataset,
    })
    .to_string()
}

fn setup(dir: &Path) -> LoaderConfig {
    let allocation = dir.join("allocation.csv");
    let categories = dir.join("steel_contents.csv");
    let comtrade = dir.join("2010.json");
    fs::write(&allocation, ALLOCATION).unwrap();
    fs::write(&categories, CATEGORIES).unwrap();
    fs::write(
        &comtrade,
        comtrade_doc(
            2010,
            &[
                ("X1", "Import", 3_000_000.0),
                ("X2", "Export", 1_000_000.0),
                ("X9", "Import", 500.0),
                ("X1", "Re-Import", 7.0),
            ],
        ),
    )
    .unwrap();

    let out = |name: &str| dir.join(name).display().to_string();
    LoaderConfig {
        pipeline: PipelineConfig {
            corrections: vec![],
            ..Default::default()
        },
        inputs: InputsConfig {
            allocation: out("allocation.csv"),
            steel_contents: out("steel_contents.csv"),
            comtrade_files: vec![out("2010.json")],
            trade_table: None,
            comtrade_pattern: None,
            years: vec![],
        },
        acquisition: Default::default(),
        output: OutputPathsConfig {
            combined: out("data/trade.csv"),
            imports: out("data/trade_imports.csv"),
            exports: out("data/trade_exports.csv"),
            checking_table: Some(out("build/checking_table.csv")),
        },
    }
}

fn read_table(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let header = reader.headers().unwrap().iter().map(String::from).collect();
    let rows = reader
        .records()
        .map(|r| r.unwrap().iter().map(String::from).collect())
        .collect();
    (header, rows)
}

#[tokio::test]
async fn combined_run_writes_aggregated_table() {
    let dir = tempfile::tempdir().unwrap();
    let config = setup(dir.path());

    let summary = steelflow::run(&config).await.unwrap();
    assert_eq!(summary.records, 3);
    assert_eq!(summary.unmatched_records, 1);
    assert_eq!(summary.corrected_rows, 0);
    assert_eq!(summary.flows, 3);
    assert_eq!(summary.groups, 3);
    assert_eq!(summary.tables.len(), 1);

    let (header, rows) = read_table(&summary.tables[0]);
    assert_eq!(
        header,
        [
            "sector_code",
            "sector_group",
            "sector_name",
            "direction",
            "stage",
            "year",
            "iron_content",
            "mass",
            "mass_iron"
        ]
    );
    assert_eq!(
        rows,
        [
            ["S1", "Construction", "Structural, heavy", "export", "Intermediate", "2010", "0.90", "0.4", "0.4"],
            ["S2", "Vehicles", "Cars", "export", "Final", "2010", "0.50", "0.6", "0.3"],
            ["S1", "Construction", "Structural, heavy", "import", "Primary", "2010", "0.90", "3.0", "2.7"],
        ]
    );
}

#[tokio::test]
async fn checking_table_lists_each_allocated_flow() {
    let dir = tempfile::tempdir().unwrap();
    let config = setup(dir.path());

    let summary = steelflow::run(&config).await.unwrap();
    let checking = summary.checking_table.unwrap();
    let (header, rows) = read_table(&checking);
    assert_eq!(header.len(), 14);
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|row| row[2] != "X9"));
}

#[tokio::test]
async fn split_run_writes_both_direction_tables() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = setup(dir.path());
    config.pipeline.output_shape = OutputShape::SplitByDirection;
    config.output.checking_table = None;

    let summary = steelflow::run(&config).await.unwrap();
    assert!(summary.checking_table.is_none());
    assert_eq!(summary.tables.len(), 2);
    assert!(summary.tables[0].ends_with("data/trade_imports.csv"));
    assert!(summary.tables[1].ends_with("data/trade_exports.csv"));

    let (_, imports) = read_table(&summary.tables[0]);
    let (_, exports) = read_table(&summary.tables[1]);
    assert_eq!(imports.len(), 1);
    assert_eq!(imports[0][7], "3.0");
    assert_eq!(exports.len(), 2);
    assert!(exports.iter().all(|row| row[3] == "export"));
    assert!(!dir.path().join("data/trade.csv").exists());
}

#[tokio::test]
async fn bad_multiplier_sum_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let config = setup(dir.path());
    fs::write(
        dir.path().join("allocation.csv"),
        "SITC_code,sector_code,stage,multiplier\nX1,S1,Primary,0.5\n",
    )
    .unwrap();

    let err = steelflow::run(&config).await.unwrap_err();
    assert!(err.to_string().contains("X1"), "unexpected error: {err}");
    assert!(!dir.path().join("data/trade.csv").exists());
    assert!(!dir.path().join("build/checking_table.csv").exists());
}

#[tokio::test]
async fn wrong_reporter_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = setup(dir.path());
    config.pipeline.identity.reporter = "FRA".to_string();

    assert!(steelflow::run(&config).await.is_err());
}

#[tokio::test]
async fn default_corrections_need_their_reference_year() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = setup(dir.path());
    config.pipeline.corrections = PipelineConfig::default().corrections;

    let err = steelflow::run(&config).await.unwrap_err();
    assert!(err.to_string().contains("69402"), "unexpected error: {err}");
}

#[tokio::test]
async fn correction_rewrites_before_aggregation() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = setup(dir.path());
    fs::write(
        dir.path().join("2011.json"),
        comtrade_doc(2011, &[("X1", "Import", 9_000_000.0)]),
    )
    .unwrap();
    config
        .inputs
        .comtrade_files
        .push(dir.path().join("2011.json").display().to_string());
    config.pipeline.corrections = vec![Correction::new("X1", Direction::Import, vec![2010, 2011])];

    let summary = steelflow::run(&config).await.unwrap();
    assert_eq!(summary.corrected_rows, 2);

    let (_, rows) = read_table(&summary.tables[0]);
    let imports: Vec<_> = rows.iter().filter(|row| row[3] == "import").collect();
    assert_eq!(imports.len(), 2);
    assert!(imports.iter().all(|row| row[7] == "3.0"));
}

#[tokio::test]
async fn empty_checking_path_skips_audit_table() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = setup(dir.path());
    let overrides = LoaderConfig::from_toml(
        "[inputs]\nallocation = \"a.csv\"\nsteel_contents = \"b.csv\"\n\n[output]\nchecking_table = \"\"\n",
    )
    .unwrap();
    config.output.checking_table = overrides.output.checking_table;

    let summary = steelflow::run(&config).await.unwrap();
    assert!(summary.checking_table.is_none());
    assert!(!dir.path().join("build").exists());
    assert_eq!(summary.tables.len(), 1);
}
