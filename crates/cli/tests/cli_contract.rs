// End-to-end checks of the binary's shell contract: exit codes and the JSON
// report shape. Fixtures are written into a temp dir per test.

use std::path::Path;
use std::process::{Command, Output};

const INTENTS: &str = "\
Category,Model,Quantity,Color
Laptop,X,1,GRAY
Laptop,X,2,BLACK
";

const PRICES: &str = "\
Category,Model,Color,UnitPrice
Laptop,X,Gray,100.00
Laptop,X,Black,100.00
";

const CART_CLEAN: &str = "\
Product,Color,Quantity,LineTotal
X,Gray,1,100.00
X,Black,2,200.00
";

const CART_DRIFT: &str = "\
Product,Color,Quantity,LineTotal
X,Gray,2,200.00
X,Black,2,200.00
";

const CONFIG: &str = r#"
name = "Contract check"

[intents]
file = "intents.csv"

[storefront]
price_book  = "prices.csv"
cart_export = "cart.csv"
"#;

fn write_fixtures(dir: &Path, cart: &str) {
    std::fs::write(dir.join("intents.csv"), INTENTS).unwrap();
    std::fs::write(dir.join("prices.csv"), PRICES).unwrap();
    std::fs::write(dir.join("cart.csv"), cart).unwrap();
    std::fs::write(dir.join("run.toml"), CONFIG).unwrap();
}

fn trolley(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_trolley"))
        .current_dir(dir)
        .args(args)
        .output()
        .expect("failed to run trolley")
}

#[test]
fn clean_run_exits_zero_with_json_contract() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path(), CART_CLEAN);

    let output = trolley(dir.path(), &["run", "run.toml", "--json"]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("invalid JSON output");
    let obj = json.as_object().unwrap();
    for key in ["meta", "cardinality", "rows", "grand_total", "summary"] {
        assert!(obj.contains_key(key), "{key} key must exist");
    }
    assert_eq!(json["summary"]["passed"], true);
    assert_eq!(json["meta"]["config_name"], "Contract check");
    assert_eq!(json["grand_total"]["expected_cents"], 30000);
}

#[test]
fn drifted_run_exits_mismatch() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path(), CART_DRIFT);

    let output = trolley(dir.path(), &["run", "run.toml", "--json"]);
    assert_eq!(output.status.code(), Some(3));

    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("invalid JSON output");
    assert_eq!(json["summary"]["passed"], false);
    assert_eq!(json["summary"]["quantity_mismatches"], 1);
}

#[test]
fn run_writes_the_report_file() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path(), CART_CLEAN);

    let output = trolley(dir.path(), &["run", "run.toml", "--output", "report.json"]);
    assert_eq!(output.status.code(), Some(0));

    let written = std::fs::read_to_string(dir.path().join("report.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(json["summary"]["passed"], true);
}

#[test]
fn invalid_config_exits_four() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path(), CART_CLEAN);
    std::fs::write(dir.path().join("bad.toml"), "name = \"x\"").unwrap();

    let output = trolley(dir.path(), &["run", "bad.toml"]);
    assert_eq!(output.status.code(), Some(4));
}

#[test]
fn missing_config_exits_io() {
    let dir = tempfile::tempdir().unwrap();
    let output = trolley(dir.path(), &["run", "nonesuch.toml"]);
    assert_eq!(output.status.code(), Some(6));
}

#[test]
fn unlisted_product_exits_cart_action() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path(), CART_CLEAN);
    std::fs::write(
        dir.path().join("intents.csv"),
        "Category,Model,Quantity,Color\nLaptop,Nonesuch,1,Gray\n",
    )
    .unwrap();

    let output = trolley(dir.path(), &["run", "run.toml"]);
    assert_eq!(output.status.code(), Some(5));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("select_product"), "stderr: {stderr}");
}

#[test]
fn validate_accepts_and_rejects() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path(), CART_CLEAN);

    let ok = trolley(dir.path(), &["validate", "run.toml"]);
    assert_eq!(ok.status.code(), Some(0));

    std::fs::write(dir.path().join("bad.toml"), CONFIG.replace("prices.csv", "")).unwrap();
    let bad = trolley(dir.path(), &["validate", "bad.toml"]);
    assert_eq!(bad.status.code(), Some(4));
}

#[test]
fn plan_prints_expected_groups() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path(), CART_CLEAN);

    let output = trolley(dir.path(), &["plan", "run.toml", "--json"]);
    assert_eq!(output.status.code(), Some(0));

    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("invalid JSON output");
    assert_eq!(json["grand_total_cents"], 30000);
    let groups = json["groups"].as_array().unwrap();
    assert_eq!(groups.len(), 2);
}
