//! End-to-end pattern detection over the Java fixture project.
//!
//! The fixture directory holds a small project that exercises the Factory
//! Method, Singleton, Facade, and Observer detectors, plus one file that
//! intentionally fails to parse.

use patternscout::analysis::{ProjectAnalyzer, ProjectReport};
use patternscout::config::Config;
use patternscout::patterns::PatternEvidence;
use std::path::PathBuf;

/// Get the path to the test fixtures directory
fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/java")
}

fn analyze_fixture() -> ProjectReport {
    let analyzer = ProjectAnalyzer::new(Config::default());
    analyzer
        .analyze(&fixtures_path())
        .expect("fixture project should analyze")
}

fn evidence<'a>(report: &'a ProjectReport, pattern: &str) -> &'a PatternEvidence {
    &report
        .findings
        .iter()
        .find(|f| f.pattern == pattern)
        .unwrap_or_else(|| panic!("pattern {pattern} should fire"))
        .evidence
}

#[test]
fn fixture_project_parses_with_one_stub() {
    let report = analyze_fixture();

    assert_eq!(report.failed_files, 1, "only Broken.java should fail");
    assert!(report.files >= 10);
    // The broken file still contributes a stub entry.
    assert_eq!(report.types, report.files);
}

#[test]
fn findings_are_in_registry_order() {
    let report = analyze_fixture();
    let names: Vec<_> = report.findings.iter().map(|f| f.pattern).collect();

    assert_eq!(names, vec!["singleton", "factory_method", "facade", "observer"]);
}

#[test]
fn singleton_finds_app_settings() {
    let report = analyze_fixture();
    match evidence(&report, "singleton") {
        PatternEvidence::Singleton(classes) => {
            assert_eq!(
                classes.iter().collect::<Vec<_>>(),
                vec!["AppSettings"]
            );
        }
        other => panic!("unexpected evidence: {other:?}"),
    }
}

#[test]
fn factory_method_fills_the_shape_roles() {
    let report = analyze_fixture();
    match evidence(&report, "factory_method") {
        PatternEvidence::FactoryMethod(factories) => {
            let roles = &factories["ShapeCreator"];
            assert_eq!(roles.abstract_product, "Shape");
            assert_eq!(
                roles.concrete_product,
                ["Circle", "Square"].map(String::from).into()
            );
            assert_eq!(
                roles.concrete_factory,
                ["CircleCreator", "SquareCreator"].map(String::from).into()
            );
        }
        other => panic!("unexpected evidence: {other:?}"),
    }
}

#[test]
fn facade_finds_the_video_pipeline() {
    let report = analyze_fixture();
    match evidence(&report, "facade") {
        PatternEvidence::Facade(facades) => {
            assert_eq!(
                facades["VideoFacade"],
                ["Codec", "Muxer"].map(String::from).into()
            );
        }
        other => panic!("unexpected evidence: {other:?}"),
    }
}

#[test]
fn observer_finds_the_event_bus() {
    let report = analyze_fixture();
    match evidence(&report, "observer") {
        PatternEvidence::Observer(subscribers) => {
            let roles = &subscribers["Listener"];
            assert!(roles.publisher.contains_key("EventBus"));
            assert_eq!(
                roles.concrete_observer,
                ["LogListener".to_string()].into()
            );
        }
        other => panic!("unexpected evidence: {other:?}"),
    }
}

#[test]
fn detection_is_idempotent_over_the_fixture() {
    let first = analyze_fixture();
    let second = analyze_fixture();

    let render = |report: &ProjectReport| {
        report
            .findings
            .iter()
            .map(|f| format!("{}={}", f.pattern, serde_json::to_string(&f.evidence).unwrap()))
            .collect::<Vec<_>>()
            .join(";")
    };
    assert_eq!(render(&first), render(&second));
}
