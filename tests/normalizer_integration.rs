//! Integration tests for the HTML normalizer using fixture files.

use pdp_normalizer::html::{normalize, normalize_str, Block, TableValue, ITEMS_KEY};

const SPEC_SHEET_FIXTURE: &str = include_str!("fixtures/spec_sheet.html");
const DESCRIPTION_FIXTURE: &str = include_str!("fixtures/description.html");

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_sectioned_spec_sheet() {
    let result = normalize_str(SPEC_SHEET_FIXTURE);
    assert_eq!(result.len(), 1);

    let table = result.tables().next().unwrap();
    assert_eq!(
        table.labels().collect::<Vec<_>>(),
        vec![
            "Specifications",
            "Blade Span",
            "Number of Blades",
            "Light Kit Included",
            "Package Contents",
            "Warranty",
            "Motor",
            "Parts"
        ]
    );
    assert_eq!(table.get("Blade Span"), Some(&TableValue::from("52 in")));
    assert_eq!(
        table.get("Package Contents"),
        Some(&TableValue::List(strings(&["Fan", "Remote", "Mounting Hardware"])))
    );
    // Header rows followed only by label rows keep an empty section
    assert_eq!(table.get("Specifications"), Some(&TableValue::List(Vec::new())));
    assert_eq!(table.get("Warranty"), Some(&TableValue::List(Vec::new())));
}

#[test]
fn test_mixed_description() {
    let result = normalize_str(DESCRIPTION_FIXTURE);

    let kinds: Vec<&str> = result.blocks().iter().map(Block::kind).collect();
    assert_eq!(kinds, vec!["list", "list", "table", "paragraph_map"]);

    let lists: Vec<&[String]> = result.lists().collect();
    assert_eq!(lists[0].len(), 3);
    assert_eq!(lists[0][0], "Motion sensor lid opens with a wave of your hand");
    assert_eq!(lists[1], strings(&["Height: 25.6 in", "Width: 11.8 in"]).as_slice());

    let table = result.tables().next().unwrap();
    assert_eq!(table.get("Material"), Some(&TableValue::from("Stainless Steel")));
    assert_eq!(
        table.get(ITEMS_KEY),
        Some(&TableValue::List(strings(&["4 AA batteries (not included)"])))
    );

    // Bold headings without text after them are not label/value pairs
    let details = result.paragraphs().unwrap();
    assert_eq!(details.labels().collect::<Vec<_>>(), vec!["Net Volume", "Assembly Required"]);
    assert_eq!(details.get("Net Volume").map(String::as_str), Some("13.2 Gallons"));
    assert_eq!(details.get("Assembly Required").map(String::as_str), Some("No"));
}

#[test]
fn test_description_json_shape() {
    let result = normalize_str(DESCRIPTION_FIXTURE);
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json[2]["table"]["Color"], "Silver");
    assert_eq!(json[2]["table"]["Items"][0], "4 AA batteries (not included)");
    assert_eq!(json[3]["paragraph_map"]["Net Volume"], "13.2 Gallons");
}

#[test]
fn test_reference_examples() {
    assert_eq!(
        normalize_str("<ul><li>A</li><li>B</li></ul>").into_blocks(),
        vec![Block::List(strings(&["A", "B"]))]
    );
    assert_eq!(
        normalize_str("<li>X</li><li>Y</li>").into_blocks(),
        vec![Block::List(strings(&["X", "Y"]))]
    );

    let result = normalize_str("<table><tr><td>Color</td><td>Red</td></tr></table>");
    assert_eq!(
        result.tables().next().and_then(|t| t.get("Color")),
        Some(&TableValue::from("Red"))
    );

    let result = normalize_str("<p><strong>Net Volume: </strong>15.99 Liters</p>");
    assert_eq!(
        result.paragraphs().and_then(|p| p.get("Net Volume")).map(String::as_str),
        Some("15.99 Liters")
    );
}

#[test]
fn test_empty_inputs() {
    assert!(normalize(None).is_empty());
    assert!(normalize(Some("")).is_empty());
    assert!(normalize(Some("Color: Red, Size: L")).is_empty());
}

#[test]
fn test_concurrent_calls() {
    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(|| normalize_str(SPEC_SHEET_FIXTURE).len()))
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 1);
    }
}
