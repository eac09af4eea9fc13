//! Roundtrip serialisation and name-normalisation tests for `docsee-core` types.
//!
//! Each `#[case]` is isolated — no shared state.

use docsee_core::types::{Config, Source, SourceName};
use rstest::rstest;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn minimal_config() -> Config {
    Config::default()
}

fn full_config() -> Config {
    let mut config = Config {
        agents_md: "./docs/AGENTS.md".to_string(),
        sources: vec![],
    };
    let mut synced = Source::new("ai", "vercel/ai", "content/docs", "main");
    synced.commit = Some("4f2a9c1e0b7d".to_string());
    config.add_source(synced).expect("ai");
    config
        .add_source(Source::new("next js", "vercel/next.js", "docs/", "canary"))
        .expect("next js");
    config
}

fn unicode_config() -> Config {
    let mut config = Config::default();
    config
        .add_source(Source::new("доки-文档", "owner/repo", "docs", "main"))
        .expect("unicode");
    config
}

// ---------------------------------------------------------------------------
// Roundtrip cases
// ---------------------------------------------------------------------------

#[rstest]
#[case::minimal(minimal_config())]
#[case::full(full_config())]
#[case::unicode(unicode_config())]
fn yaml_roundtrip_preserves_config(#[case] config: Config) {
    let yaml = serde_yaml::to_string(&config).expect("serialize");
    let back: Config = serde_yaml::from_str(&yaml).expect("deserialize");
    assert_eq!(back, config);
}

#[test]
fn never_synced_commit_serializes_as_null() {
    let yaml = serde_yaml::to_string(&full_config()).expect("serialize");
    assert!(yaml.contains("commit: null"), "yaml was:\n{yaml}");
}

// ---------------------------------------------------------------------------
// Marker normalisation cases
// ---------------------------------------------------------------------------

#[rstest]
#[case("my docs", "MY-DOCS")]
#[case("my_docs", "MY-DOCS")]
#[case("my-docs", "MY-DOCS")]
#[case("ai", "AI")]
#[case("Next.js", "NEXT.JS")]
#[case("a  _ b", "A-B")]
fn marker_base_cases(#[case] name: &str, #[case] expected: &str) {
    assert_eq!(SourceName::from(name).marker_base(), expected);
}

#[rstest]
#[case("my docs", "MY DOCS")]
#[case("next-js_docs", "NEXT JS DOCS")]
#[case("--ai--", "AI")]
fn display_name_cases(#[case] name: &str, #[case] expected: &str) {
    assert_eq!(SourceName::from(name).display_name(), expected);
}
