use foodscrape::config::{OutputConfig, OutputFormat};
use foodscrape::export::{sink_for, CsvSink, MISSING_VALUE};
use foodscrape::extractors::CANONICAL_NUTRIENTS;
use foodscrape::{Dataset, DatasetRow, DatasetSink};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;

fn row(title: &str, rating: f32, ingredients: &[&str], nutrition: &[(&str, &str)]) -> DatasetRow {
    DatasetRow {
        title: title.to_string(),
        rating,
        ingredients: ingredients.iter().map(|s| s.to_string()).collect::<BTreeSet<_>>(),
        nutrition: nutrition
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<BTreeMap<_, _>>(),
    }
}

fn dataset() -> Dataset {
    Dataset {
        rows: vec![
            row(
                "Mac, Cheese",
                4.5,
                &["cheddar cheese ", "macaroni "],
                &[("Total Fat", "22g"), ("Sodium", "600mg")],
            ),
            row("Plain Rice", 3.0, &["rice "], &[]),
        ],
        failed: vec![2],
    }
}

#[test]
fn test_csv_file_layout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("recipes.csv");

    CsvSink::new(&path).write(&dataset()).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);

    let header: Vec<&str> = lines[0].split(',').collect();
    assert_eq!(header[..2], ["Recipe Title", "Rating"]);
    assert_eq!(header[2..2 + CANONICAL_NUTRIENTS.len()], CANONICAL_NUTRIENTS[..]);
    assert_eq!(
        header[2 + CANONICAL_NUTRIENTS.len()..],
        ["cheddar cheese", "macaroni", "rice"]
    );

    assert!(lines[1].starts_with("\"Mac, Cheese\",4.5,22g,-,-,600mg,"));
    assert!(lines[1].ends_with(",1,1,0"));

    let rice: Vec<&str> = lines[2].split(',').collect();
    assert_eq!(rice[0], "Plain Rice");
    assert!(rice[2..2 + CANONICAL_NUTRIENTS.len()]
        .iter()
        .all(|cell| *cell == MISSING_VALUE));
    assert!(lines[2].ends_with(",0,0,1"));
}

#[test]
fn test_sink_follows_output_format() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("recipes.json");
    let output = OutputConfig {
        path: path.to_string_lossy().into_owned(),
        format: OutputFormat::Json,
    };

    sink_for(&output).write(&dataset()).unwrap();

    let rows: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 2);
    assert_eq!(rows[0]["title"], "Mac, Cheese");
    assert_eq!(rows[1]["ingredients"][0], "rice ");
}
