/// Golden report test — renders the compiled-in tables and asserts the
/// text matches the frozen v1 report byte for byte.
///
/// This test must NEVER be modified to match new behavior.
/// If it fails, the engine has been broken.

use std::fs;

use rot_engine::domain::{BaseParameters, ExponentSet, ReferenceTable};
use rot_engine::engine::derive;
use rot_engine::hashing::canonical_hash;
use rot_engine::report::Report;
use rot_engine::ENGINE_VERSION;

fn load_expected_report(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {}: {}", path, e))
}

fn render_default() -> String {
    let params = BaseParameters::default();
    let exponents = ExponentSet::default();
    let reference = ReferenceTable::default();
    let derivation = derive(&params, &exponents).expect("default tables derive");
    Report {
        params: &params,
        exponents: &exponents,
        derivation: &derivation,
        reference: &reference,
    }
    .render()
    .expect("default tables are consistent")
}

#[test]
fn golden_report_matches() {
    let report = render_default();
    let expected = load_expected_report("tests/golden/expected_report.txt");
    assert_eq!(
        report, expected,
        "GOLDEN TEST FAILED: the v1 report text has changed.\n\
         Got:\n{}\n\
         Expected:\n{}",
        report, expected
    );
}

#[test]
fn golden_derivation_is_deterministic() {
    let params = BaseParameters::default();
    let exponents = ExponentSet::default();

    let h1 = canonical_hash(&derive(&params, &exponents).unwrap());
    let h2 = canonical_hash(&derive(&params, &exponents).unwrap());

    assert_eq!(
        h1, h2,
        "DETERMINISM FAILURE: two derivations of the same tables produced different hashes.\n\
         Run 1: {}\n\
         Run 2: {}",
        h1, h2
    );
}

#[test]
fn golden_report_has_nine_rows_in_reference_order() {
    let report = render_default();
    let table = report
        .split("Derived Constants vs CODATA:\n")
        .nth(1)
        .expect("comparison section present");
    let symbols: Vec<&str> = table
        .lines()
        .filter_map(|l| l.split_whitespace().next())
        .collect();
    assert_eq!(
        symbols,
        ["c", "hbar", "G", "alpha", "Lambda", "m_e", "alpha_s", "m_p", "e"]
    );
}

#[test]
fn engine_version_is_one() {
    assert_eq!(ENGINE_VERSION, 1, "ENGINE_VERSION must be 1 and never change");
}
