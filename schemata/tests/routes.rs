use schemata::{Method, Provider, ProviderAddr, RouteKind, synthesize};
use std::collections::HashSet;

mod common;
use common::{aws_only, provider};

#[test]
fn test_example_route_set() {
    let table = synthesize(&aws_only());
    let patterns: Vec<&str> = table.iter().map(|r| r.pattern.as_str()).collect();
    assert_eq!(
        patterns,
        vec![
            "/",
            "/health",
            "/hashicorp/aws",
            "/hashicorp/aws/datasource",
            "/hashicorp/aws/datasource/{name}",
            "/routes",
        ]
    );
    assert!(table.iter().all(|r| r.method == Method::Get));
}

#[test]
fn test_route_counts_follow_item_kinds() {
    let registry = vec![
        provider("hashicorp", "google", &["google_project"], &["google_storage_bucket"]),
        provider("hashicorp", "null", &[], &["null_resource"]),
        provider("hashicorp", "empty", &[], &[]),
    ];
    let table = synthesize(&registry);
    let count = |name: &str| table.iter().filter(|r| r.name == name).count();

    assert_eq!(count("google"), 5);
    assert_eq!(count("null"), 3);
    assert_eq!(count("empty"), 1);
    assert!(
        !table
            .iter()
            .any(|r| r.name == "null" && r.kind == RouteKind::DataSource)
    );
}

#[test]
fn test_routes_are_unique() {
    let registry = vec![
        provider("hashicorp", "aws", &["aws_ami"], &["aws_instance"]),
        provider("hashicorp", "aws", &["aws_vpc"], &[]),
        provider("community", "aws", &["aws_ami"], &[]),
    ];
    let table = synthesize(&registry);

    let mut seen = HashSet::new();
    for route in &table {
        assert!(seen.insert((route.method, route.pattern.clone())), "duplicate {}", route.pattern);
    }
    assert!(table.get(Method::Get, "/community/aws").is_some());
}

#[test]
fn test_synthesis_is_idempotent() {
    let registry = vec![
        provider("hashicorp", "google", &["google_project"], &["google_storage_bucket"]),
        Provider::malformed(ProviderAddr::new("hashicorp", "broken")),
        provider("hashicorp", "aws", &["aws_ami"], &[]),
    ];
    let first = synthesize(&registry).to_json(false).unwrap();
    let second = synthesize(&registry).to_json(false).unwrap();
    assert_eq!(first, second);
}
