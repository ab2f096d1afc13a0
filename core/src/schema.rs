//! Static schema table for the Server Density v1.3 API.
//!
//! # Design
//! The table is an immutable map-of-maps (`module -> method -> CallSpec`)
//! built once behind a `OnceLock` and never mutated afterwards. Keys are
//! lowercase on both levels; callers lowercase module and method before
//! `lookup`, so `devices/getById` and `devices/getbyid` resolve to the same
//! entry. There is no dynamic registration.
//!
//! Parameter specs keep their declaration order so diagnostics come out in
//! a stable order.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use crate::http::HttpMethod;

/// The closed set of parameter kinds the schema can declare.
///
/// `Composite` covers key-value and list structures; on validation these
/// are serialized in place to a JSON string (the postback payload
/// contract).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    String,
    Integer,
    Composite,
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The words used in diagnostics, matching the service docs.
        match self {
            ParameterKind::String => write!(f, "string"),
            ParameterKind::Integer => write!(f, "integer"),
            ParameterKind::Composite => write!(f, "array"),
        }
    }
}

/// Declared type and necessity of a single parameter.
#[derive(Debug, Clone, Copy)]
pub struct ParameterSpec {
    pub kind: ParameterKind,
    pub required: bool,
}

/// Everything the schema knows about one (module, method) call.
#[derive(Debug, Clone)]
pub struct CallSpec {
    pub verb: HttpMethod,
    pub params: Vec<(&'static str, ParameterSpec)>,
}

impl CallSpec {
    fn new(verb: HttpMethod, params: &[(&'static str, ParameterKind, bool)]) -> Self {
        Self {
            verb,
            params: params
                .iter()
                .map(|&(name, kind, required)| (name, ParameterSpec { kind, required }))
                .collect(),
        }
    }
}

type Table = HashMap<&'static str, HashMap<&'static str, CallSpec>>;

static TABLE: OnceLock<Table> = OnceLock::new();

/// Look up the spec for an already-lowercased (module, method) pair.
pub fn lookup(module: &str, method: &str) -> Option<&'static CallSpec> {
    table().get(module)?.get(method)
}

/// Iterate every (module, method, spec) triple in the table.
pub fn all_calls() -> impl Iterator<Item = (&'static str, &'static str, &'static CallSpec)> {
    table()
        .iter()
        .flat_map(|(module, methods)| {
            methods.iter().map(move |(method, spec)| (*module, *method, spec))
        })
}

fn table() -> &'static Table {
    TABLE.get_or_init(|| {
        use HttpMethod::{Get, Post};
        use ParameterKind::{Composite, Integer, String as Str};

        let mut table: Table = HashMap::new();

        table.insert(
            "alerts",
            HashMap::from([
                ("gethistory", CallSpec::new(Get, &[("alertId", Str, true)])),
                ("getlast", CallSpec::new(Get, &[])),
                ("getopen", CallSpec::new(Get, &[])),
                ("getopennotified", CallSpec::new(Get, &[])),
                // The upstream docs describe list as a no-argument call.
                ("list", CallSpec::new(Get, &[])),
                ("pause", CallSpec::new(Post, &[("alertId", Str, true)])),
                ("resume", CallSpec::new(Post, &[("alertId", Str, true)])),
            ]),
        );

        table.insert(
            "devices",
            HashMap::from([
                (
                    "add",
                    CallSpec::new(
                        Post,
                        &[
                            ("name", Str, true),
                            ("ip", Str, false),
                            ("group", Str, false),
                            ("location", Str, false),
                            ("provider", Str, false),
                            ("notes", Str, false),
                            ("userId", Str, false),
                        ],
                    ),
                ),
                ("addgroup", CallSpec::new(Post, &[("name", Str, true)])),
                ("delete", CallSpec::new(Post, &[("deviceId", Str, true)])),
                ("getbygroup", CallSpec::new(Get, &[("group", Str, true)])),
                ("getbyhostname", CallSpec::new(Get, &[("hostName", Str, true)])),
                ("getbyid", CallSpec::new(Get, &[("deviceId", Str, true)])),
                ("getbyip", CallSpec::new(Get, &[("ip", Str, true)])),
                ("getbyname", CallSpec::new(Get, &[("name", Str, true)])),
                ("list", CallSpec::new(Get, &[])),
                ("listgroups", CallSpec::new(Get, &[])),
                (
                    "rename",
                    CallSpec::new(Get, &[("deviceId", Str, true), ("newName", Str, true)]),
                ),
            ]),
        );

        table.insert(
            "metrics",
            HashMap::from([
                (
                    "getlatest",
                    CallSpec::new(
                        Get,
                        &[
                            ("deviceId", Str, true),
                            ("metricGroup", Str, false),
                            ("metricName", Str, false),
                        ],
                    ),
                ),
                (
                    "getrange",
                    CallSpec::new(
                        Get,
                        &[
                            ("deviceId", Str, true),
                            ("metricGroup", Str, true),
                            ("metricName", Str, true),
                            // UTC, ISO 8601 without timezone, eg 2011-08-30T20:30:00
                            ("rangeStart", Str, true),
                            ("rangeEnd", Str, true),
                        ],
                    ),
                ),
                // os: linux, windows, freebsd or mac
                ("list", CallSpec::new(Get, &[("os", Str, true)])),
                (
                    "postback",
                    CallSpec::new(
                        Post,
                        &[("deviceId", Str, true), ("payload", Composite, true)],
                    ),
                ),
            ]),
        );

        table.insert(
            "mongo",
            HashMap::from([
                ("getmaster", CallSpec::new(Get, &[("replSetName", Str, true)])),
                ("getreplicaset", CallSpec::new(Get, &[])),
            ]),
        );

        table.insert(
            "processes",
            HashMap::from([
                (
                    "getbytime",
                    CallSpec::new(Get, &[("deviceId", Str, true), ("time", Str, true)]),
                ),
                (
                    "getrange",
                    CallSpec::new(
                        Get,
                        &[
                            ("deviceId", Str, true),
                            ("rangeStart", Str, true),
                            ("rangeEnd", Str, true),
                        ],
                    ),
                ),
            ]),
        );

        table.insert(
            "users",
            HashMap::from([
                (
                    "add",
                    CallSpec::new(
                        Post,
                        &[
                            ("username", Str, true),
                            ("password", Str, true),
                            ("firstName", Str, true),
                            ("lastName", Str, true),
                            ("email", Str, false),
                            ("apiEnabled", Integer, false),
                            ("admin", Integer, false),
                            ("timezone", Str, false),
                            // Comma separated; unknown groups are created server-side.
                            ("groups", Str, false),
                            ("groupPermissions", Integer, false),
                        ],
                    ),
                ),
                ("delete", CallSpec::new(Get, &[("userId", Str, true)])),
                ("getbyid", CallSpec::new(Get, &[("userId", Str, true)])),
            ]),
        );

        table
    })
}
