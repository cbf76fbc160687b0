#![allow(dead_code)]

// ============================================================================
// Registry documents
// ============================================================================

pub const NATIVE_DOCUMENT: &str = r#"{
    "providers": [
        {
            "namespace": "hashicorp",
            "type": "aws",
            "schema": {
                "data_sources": {"aws_ami": {"block": {"description": "Amazon Machine Image"}}}
            }
        },
        {"namespace": "hashicorp", "type": "broken"}
    ]
}"#;

pub const TERRAFORM_DOCUMENT: &str = r#"{
    "format_version": "1.0",
    "provider_schemas": {
        "registry.terraform.io/hashicorp/random": {
            "provider": {"version": 0, "block": {}},
            "resource_schemas": {
                "random_id": {"version": 0, "block": {}},
                "random_pet": {"version": 0, "block": {}}
            }
        }
    }
}"#;

pub const MIRRORED_DOCUMENT: &str = r#"{
    "format_version": "1.0",
    "provider_schemas": {
        "registry.terraform.io/hashicorp/aws": {
            "data_source_schemas": {"aws_ami": {"version": 0, "block": {}}}
        },
        "example.com/hashicorp/aws": {
            "resource_schemas": {"aws_instance": {"version": 1, "block": {}}}
        },
        "registry.terraform.io/hashicorp/random": {
            "resource_schemas": {"random_id": {"version": 0, "block": {}}}
        }
    }
}"#;

/// Write `contents` to a fresh file under the system temp directory.
pub fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("schemata-{}-{name}", std::process::id()));
    std::fs::write(&path, contents).expect("temp file should be writable");
    path
}
