//! Integration tests for opcompare
//!
//! These tests verify the end-to-end behavior of the comparison pipeline and
//! the command-line binary.

use opcompare::{
    BenchmarkDocument, Cell, CompareOptions, ReportError, compare_documents, generate_json_report,
    parse_params, type_size, with_human_readable,
};
use serde_json::{Number, Value, json};
use std::path::Path;
use std::process::Command;

const MUL_MAT: &str = "m=4096,n=4096,k=4096,bs=[1,1],nr=[1,1],type_a=f16,type_b=f16";

fn document(backend: &str, op_perfs: Value) -> BenchmarkDocument {
    serde_json::from_value(json!({
        "backends": [{"backend": backend, "op_perfs": op_perfs}]
    }))
    .unwrap()
}

fn run_pipeline(a: &BenchmarkDocument, b: &BenchmarkDocument) -> Value {
    let (table, _) = compare_documents(a, b, &CompareOptions::default()).unwrap();
    let json = generate_json_report(&table, 4).unwrap();
    serde_json::from_str(&json).unwrap()
}

/// Two MUL_MAT measurements of the same shape get diff, theoretical and
/// both deviations, with magnitudes scaled.
#[test]
fn test_mul_mat_end_to_end() {
    let vulkan = document(
        "Vulkan0",
        json!([{"op": "MUL_MAT", "params": MUL_MAT, "perf": 1.0e13}]),
    );
    let rocm = document(
        "ROCm0",
        json!([{"op": "MUL_MAT", "params": MUL_MAT, "perf": 1.05e13}]),
    );

    let output = run_pipeline(&vulkan, &rocm);
    let entry = &output["MUL_MAT"][MUL_MAT];

    assert_eq!(entry["Vulkan0"], "10.0T");
    assert_eq!(entry["ROCm0"], "10.5T");
    assert_eq!(entry["diff"], "5.0%");
    assert_eq!(entry["theoretical"], "195.0T");
    assert_eq!(entry["diff_rocm_theoretical"], "-94.6%");
    assert_eq!(entry["diff_vulkan_theoretical"], "-94.9%");
}

/// Operators without a model keep their raw values and only gain `diff`.
#[test]
fn test_unsupported_op_passes_through() {
    let params = "type=f32,ne=[10,5,4,3],v=0";
    let vulkan = document(
        "Vulkan0",
        json!([{"op": "SOFT_MAX", "params": params, "bandwidth": 250}]),
    );
    let rocm = document(
        "ROCm0",
        json!([{"op": "SOFT_MAX", "params": params, "bandwidth": 200}]),
    );

    let output = run_pipeline(&vulkan, &rocm);
    let entry = output["SOFT_MAX"][params].as_object().unwrap();

    assert_eq!(entry["Vulkan0"], 250);
    assert_eq!(entry["ROCm0"], 200);
    assert_eq!(entry["diff"], "-20.0%");
    assert_eq!(entry.len(), 3);
}

/// Every configuration from either document survives the merge.
#[test]
fn test_union_of_configurations() {
    let vulkan = document(
        "Vulkan0",
        json!([
            {"op": "ADD", "params": "ne=[1,1]", "bandwidth": 10},
            {"op": "ADD", "params": "ne=[2,2]", "bandwidth": 20}
        ]),
    );
    let rocm = document(
        "ROCm0",
        json!([
            {"op": "ADD", "params": "ne=[2,2]", "bandwidth": 30},
            {"op": "MUL", "params": "ne=[3,3]", "bandwidth": 40}
        ]),
    );

    let output = run_pipeline(&vulkan, &rocm);

    assert_eq!(output["ADD"]["ne=[1,1]"], json!({"Vulkan0": 10}));
    assert_eq!(
        output["ADD"]["ne=[2,2]"],
        json!({"Vulkan0": 20, "ROCm0": 30, "diff": "50.0%"})
    );
    assert_eq!(output["MUL"]["ne=[3,3]"], json!({"ROCm0": 40}));
}

/// A record that fails the model is kept, without any theoretical fields.
#[test]
fn test_failed_model_keeps_entry() {
    let params = "type_src=f32,type_dst=q,ne=[4,4,1,1]";
    let vulkan = document(
        "Vulkan0",
        json!([{"op": "CPY", "params": params, "bandwidth": 100}]),
    );
    let rocm = document(
        "ROCm0",
        json!([{"op": "CPY", "params": params, "bandwidth": 150}]),
    );

    let (table, summary) =
        compare_documents(&vulkan, &rocm, &CompareOptions::default()).unwrap();

    assert_eq!(summary.failures.len(), 1);
    let entry = table.get("CPY", params).unwrap();
    assert_eq!(entry.diff.as_deref(), Some("50.0%"));
    assert!(entry.theoretical.is_none());
    assert!(entry.deviations.is_empty());
}

#[test]
fn test_copy_and_im2col_models() {
    let cpy = "type_src=f16,type_dst=f16,ne=[256,4,4,1],permute=[0,0,0,0]";
    let im2col = "type_input=f32,type_kernel=f16,dst_type=f16,ne_input=[32,32,64,1],ne_kernel=[3,3,64,128],s0=1,s1=1,p0=1,p1=1,d0=1,d1=1,is_2D=1";
    let vulkan = document(
        "Vulkan0",
        json!([
            {"op": "CPY", "params": cpy, "bandwidth": 512},
            {"op": "IM2COL", "params": im2col, "bandwidth": 300}
        ]),
    );
    let rocm = document(
        "ROCm0",
        json!([
            {"op": "CPY", "params": cpy, "bandwidth": 576},
            {"op": "IM2COL", "params": im2col, "bandwidth": 330}
        ]),
    );

    let output = run_pipeline(&vulkan, &rocm);

    // 320e9 elements/s * 4 bytes
    let cpy_entry = &output["CPY"][cpy];
    assert_eq!(cpy_entry["theoretical"], 1280.0);
    assert_eq!(cpy_entry["diff_rocm_theoretical"], "-55.0%");
    assert_eq!(cpy_entry["diff_vulkan_theoretical"], "-60.0%");

    // min(640e9/4, 640e9/(2*9)) elements/s, 4 + 18 bytes each
    let rate = f64::min(640e9 / 4.0, 640e9 / 18.0);
    let im2col_entry = &output["IM2COL"][im2col];
    assert_eq!(im2col_entry["theoretical"].as_f64(), Some(rate * 22.0 / 1e9));
    assert_eq!(im2col_entry["diff"], "10.0%");
    assert_eq!(im2col_entry["diff_rocm_theoretical"], "-57.8%");
    assert_eq!(im2col_entry["diff_vulkan_theoretical"], "-61.6%");
}

#[test]
fn test_documented_properties() {
    let params = parse_params("ne=[1,2,3],type=f16").unwrap();
    assert_eq!(params.array("ne").unwrap(), &[1.0, 2.0, 3.0]);
    assert_eq!(params.scalar("type").unwrap(), "f16");

    assert_eq!(type_size("q4").unwrap(), 0.5);
    assert_eq!(type_size("iq4").unwrap(), 0.5);
    assert_eq!(type_size("f32").unwrap(), 4.0);
    assert!(type_size("unknown").is_err());

    assert_eq!(
        with_human_readable(&Number::from(1_000_000)),
        Cell::Number(Number::from(1_000_000))
    );
    assert_eq!(
        with_human_readable(&Number::from(1_000_001)),
        Cell::Text("1.0M".to_string())
    );
}

#[test]
fn test_duplicate_backend_rejected() {
    let a = document("Vulkan0", json!([]));
    let b = document("Vulkan0", json!([]));
    assert!(matches!(
        compare_documents(&a, &b, &CompareOptions::default()),
        Err(ReportError::DuplicateBackend { .. })
    ));
}

fn write(path: &Path, value: &Value) {
    std::fs::write(path, value.to_string()).unwrap();
}

#[test]
fn test_binary_writes_report() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("vulkan.json");
    let b = dir.path().join("rocm.json");
    let out = dir.path().join("out.json");
    write(
        &a,
        &json!({"backends": [{"backend": "Vulkan0", "op_perfs": [
            {"op": "MUL_MAT", "params": MUL_MAT, "perf": 1.0e13}
        ]}]}),
    );
    write(
        &b,
        &json!({"backends": [{"backend": "ROCm0", "op_perfs": [
            {"op": "MUL_MAT", "params": MUL_MAT, "perf": 1.05e13}
        ]}]}),
    );

    let status = Command::new(env!("CARGO_BIN_EXE_opcompare"))
        .current_dir(dir.path())
        .args([&a, &b, &out])
        .status()
        .unwrap();
    assert!(status.success());

    let written: Value = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(written["MUL_MAT"][MUL_MAT]["diff"], "5.0%");
}

#[test]
fn test_binary_fails_on_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_opcompare"))
        .current_dir(dir.path())
        .args(["missing1.json", "missing2.json", "out.json"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing1.json"));
    assert!(!dir.path().join("out.json").exists());
}

#[test]
fn test_binary_fails_on_invalid_json() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.json");
    std::fs::write(&a, "{not json").unwrap();

    let status = Command::new(env!("CARGO_BIN_EXE_opcompare"))
        .current_dir(dir.path())
        .args([&a, &a, &dir.path().join("out.json")])
        .status()
        .unwrap();
    assert!(!status.success());
}
