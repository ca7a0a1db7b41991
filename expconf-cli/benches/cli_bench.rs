use std::fs;
use std::process::{Command, Stdio};

use assert_cmd::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tempfile::TempDir;

fn write_configs(dir: &TempDir) -> std::path::PathBuf {
    fs::write(
        dir.path().join("base.yaml"),
        "__variables__:\n  root: /data\nmodel:\n  depth: 18\ntags: [base]\n",
    )
    .expect("failed to write base config");
    let leaf = dir.path().join("run.yaml");
    fs::write(
        &leaf,
        "__inherit__: base.yaml\nmodel:\n  depth: 50\nout: ${root}/runs\n",
    )
    .expect("failed to write run config");
    leaf
}

fn bench_cli_startup(c: &mut Criterion) {
    c.bench_function("cli_startup_version", |b| {
        b.iter(|| {
            let mut cmd = Command::cargo_bin("expconf").expect("failed to locate expconf binary");
            let output = cmd.arg("--version").output().expect("failed to run expconf");
            black_box(output);
        });
    });
}

fn bench_cli_dump(c: &mut Criterion) {
    let dir = TempDir::new().expect("failed to create temp dir");
    let leaf = write_configs(&dir);

    let mut group = c.benchmark_group("cli_dump");
    for format in ["yaml", "json", "toml"] {
        group.bench_function(format, |b| {
            b.iter(|| {
                let mut cmd =
                    Command::cargo_bin("expconf").expect("failed to locate expconf binary");
                cmd.stdout(Stdio::null()).stderr(Stdio::null());
                let status = cmd
                    .arg("-c")
                    .arg(&leaf)
                    .args(["dump", "--format", format])
                    .status()
                    .expect("failed to execute expconf dump");
                assert!(status.success(), "expconf dump failed");
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_cli_startup, bench_cli_dump);
criterion_main!(benches);
