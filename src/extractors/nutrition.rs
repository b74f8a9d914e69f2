/// Lower-cased label as printed on the page, mapped to its column name.
const STANDARD: &[(&str, &str)] = &[
    ("fat", "Total Fat"),
    ("saturated fat", "Saturated Fat"),
    ("cholesterol", "Cholesterol"),
    ("sodium", "Sodium"),
    ("potassium", "Potassium"),
    ("carbohydrates", "Total Carbohydrates"),
    ("dietary fiber", "Dietary Fiber"),
    ("protein", "Protein"),
    ("sugars", "Sugars"),
    ("vitamin a iu", "Vitamin A"),
    ("vitamin c", "Vitamin C"),
    ("calcium", "Calcium"),
    ("iron", "Iron"),
    ("thiamin", "Thiamin"),
    ("niacin equivalents", "Niacin"),
    // misspelled on some pages
    ("niacin equivilants", "Niacin"),
    ("vitamin b6", "Vitamin B6"),
    ("magnesium", "Magnesium"),
    ("folate", "Folate"),
];

/// Every nutrition column a dataset row can carry, in column order.
pub const CANONICAL_NUTRIENTS: &[&str] = &[
    "Total Fat",
    "Saturated Fat",
    "Cholesterol",
    "Sodium",
    "Potassium",
    "Total Carbohydrates",
    "Dietary Fiber",
    "Protein",
    "Sugars",
    "Vitamin A",
    "Vitamin C",
    "Calcium",
    "Iron",
    "Thiamin",
    "Niacin",
    "Vitamin B6",
    "Magnesium",
    "Folate",
];

/// Column name for a raw nutrient label such as `"Fat:"` or `"Total Fat"`.
pub fn canonical_name(raw: &str) -> Option<&'static str> {
    let label = raw.trim().trim_end_matches(':').trim().to_lowercase();

    if let Some((_, canonical)) = STANDARD.iter().find(|(key, _)| *key == label) {
        return Some(*canonical);
    }
    CANONICAL_NUTRIENTS
        .iter()
        .find(|canonical| canonical.to_lowercase() == label)
        .copied()
}

/// Rewrite `names` to column names, dropping every pair whose name is not a
/// known nutrient. Both vectors end up the same length; pairs beyond the
/// shorter of the two inputs are dropped.
pub fn standardize(names: &mut Vec<String>, values: &mut Vec<String>) {
    let kept: Vec<(String, String)> = names
        .drain(..)
        .zip(values.drain(..))
        .filter_map(|(name, value)| {
            canonical_name(&name).map(|canonical| (canonical.to_string(), value.trim().to_string()))
        })
        .collect();

    for (name, value) in kept {
        names.push(name);
        values.push(value);
    }
}
