// src/tests/restart_tests.rs

#![allow(non_snake_case)]

use crate::data::logrecord::{BinaryKind, RestartMarker};
use crate::data::restart::{banner_kind, banner_version, find_restart, is_banner_candidate};

use ::test_case::test_case;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[test_case("db version v4.0.1", true)]
#[test_case("mongos version v4.2.0", true)]
#[test_case("mongod starting", false)]
#[test_case("VERSION 4.0.1", false; "keyword is case sensitive")]
#[test_case("", false; "empty")]
fn test_is_banner_candidate(
    line: &str,
    expect: bool,
) {
    assert_eq!(is_banner_candidate(line.as_bytes()), expect);
}

#[test_case(
    "Wed Jan  6 10:11:12 [initandlisten] db version v2.4.5",
    Some(BinaryKind::Mongod);
    "db version"
)]
#[test_case(
    "[2021-01-01T00:00:00] version 4.2.1 mongod",
    Some(BinaryKind::Mongod);
    "mongod"
)]
#[test_case(
    "2021-01-04T00:00:00.000+0000 I CONTROL [main] mongos version v4.2.0",
    Some(BinaryKind::Mongos);
    "mongos"
)]
#[test_case(
    "2021-01-04T00:00:00.000+0000 I CONTROL [main] MongoS version v4.2.0",
    Some(BinaryKind::Mongos);
    "MongoS"
)]
#[test_case(
    "2021-01-04T00:00:00.000+0000 mongos version v4.2.0 connected to mongod",
    Some(BinaryKind::Mongos);
    "mongos wins over mongod"
)]
#[test_case(
    "2021-01-04T00:00:00.000+0000 I CONTROL [main] OpenSSL version: OpenSSL 1.1.1",
    None;
    "version without marker"
)]
#[test_case(
    "2021-01-04T00:00:00.000+0000 I NETWORK [conn1] mongod connected",
    None;
    "marker without version keyword"
)]
fn test_banner_kind(
    line: &str,
    expect: Option<BinaryKind>,
) {
    assert_eq!(banner_kind(line.as_bytes()), expect);
}

#[test_case("db version v2.4.5", Some("2.4.5"))]
#[test_case("mongos version v4.2.0-rc1", Some("4.2.0"))]
#[test_case("version 10.20.30 then 1.2.3", Some("10.20.30"); "first of two")]
#[test_case("version 4.2", None; "two components")]
#[test_case("version unknown", None)]
fn test_banner_version(
    line: &str,
    expect: Option<&str>,
) {
    assert_eq!(
        banner_version(line.as_bytes()),
        expect.map(String::from)
    );
}

#[test]
fn test_find_restart() {
    let restart = find_restart(b"[2021-01-01T00:00:00] version 4.2.1 mongod");
    assert_eq!(
        restart,
        Some(RestartMarker {
            version: String::from("4.2.1"),
            kind: BinaryKind::Mongod,
        })
    );
}

#[test_case("db version unknown"; "banner without version")]
#[test_case("2021-01-01T00:00:00 message 4.2.1"; "version number without keyword")]
fn test_find_restart_none(line: &str) {
    assert_eq!(find_restart(line.as_bytes()), None);
}

#[test]
fn test_BinaryKind_display() {
    assert_eq!(BinaryKind::Mongod.to_string(), "mongod");
    assert_eq!(BinaryKind::Mongos.to_string(), "mongos");
}
