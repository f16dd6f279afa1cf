use clap::Parser;
use cpe2pkg::{run, Cli};
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use tempfile::{tempdir, TempDir};

const PACKAGES: &str = "\
org.apache.poi,poi
org.apache.poi,poi-ooxml
org.apache.poi,poi
other,poiwidget
weird-one
io.vertx,vertx-core
io.vertx,vertx-auth
";

fn write_catalog() -> (TempDir, String) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("packages.csv");
    fs::write(&path, PACKAGES).unwrap();
    let path = path.to_string_lossy().to_string();
    (dir, path)
}

fn run_cli(args: &[&str]) -> anyhow::Result<String> {
    let cli = Cli::try_parse_from(std::iter::once("cpe2pkg").chain(args.iter().copied()))?;
    let mut out = Vec::new();
    run(&cli, &mut out)?;
    Ok(String::from_utf8(out)?)
}

#[test]
fn sanity_top_one() {
    let (_dir, pkgfile) = write_catalog();
    let out = run_cli(&["--pkgfile", &pkgfile, "--top", "1", "vendor:( apache poi ) AND product:( poi )"]).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 1);
    let pair: Vec<&str> = lines[0].split(' ').collect();
    assert_eq!(pair.len(), 2);
    assert_eq!(pair[1], "org.apache.poi:poi");
    assert!(pair[0].parse::<f32>().unwrap() > 0.0);
}

#[test]
fn no_duplicates() {
    let (_dir, pkgfile) = write_catalog();
    let out = run_cli(&["-p", &pkgfile, "-t", "10", "vendor:( apache poi ) AND product:( poi )"]).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    let unique: HashSet<&str> = lines.iter().map(|l| l.split(' ').nth(1).unwrap()).collect();
    assert_eq!(unique.len(), lines.len());
    assert_eq!(lines.len(), 2);
}

#[test]
fn no_match_prints_nothing() {
    let (_dir, pkgfile) = write_catalog();
    let out = run_cli(&["-p", &pkgfile, "vendor:( nonexistentvendor )"]).unwrap();
    assert!(out.is_empty());
}

#[test]
fn bad_query_fails() {
    let (_dir, pkgfile) = write_catalog();
    let err = run_cli(&["-p", &pkgfile, "vendor:( apache"]).unwrap_err();
    assert!(err.to_string().contains("Unable to parse given query"));
}

#[test]
fn missing_catalog_fails() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope").to_string_lossy().to_string();
    assert!(run_cli(&["-p", &missing, "product:( poi )"]).is_err());
}

#[test]
fn empty_catalog_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty");
    fs::write(&path, "only-one-field\n").unwrap();
    assert!(run_cli(&["-p", &path.to_string_lossy(), "product:( poi )"]).is_err());
}

#[test]
fn json_output() {
    let (_dir, pkgfile) = write_catalog();
    let out = run_cli(&["-p", &pkgfile, "--json", "vendor:( vertx ) AND product:( core )"]).unwrap();
    let json: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["total_hits"].as_u64(), Some(1));
    let results = json["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["vendor"], "io.vertx");
    assert_eq!(results[0]["product"], "vertx-core");
}

#[test]
fn json_total_hits_counts_before_dedup() {
    let (_dir, pkgfile) = write_catalog();
    let out = run_cli(&["-p", &pkgfile, "--json", "vendor:( apache poi ) AND product:( poi )"]).unwrap();
    let json: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["total_hits"].as_u64(), Some(3));
    assert_eq!(json["results"].as_array().unwrap().len(), 2);
}
