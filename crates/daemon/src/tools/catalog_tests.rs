// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::{Path, PathBuf};

use serde_json::{json, Map, Value};
use sr_exec::CommandLine;

use crate::tools::{lookup, registry, OutputParser, Prepared, ToolError};

const WORK: &str = "/tmp/sr-work";

fn body(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("not an object: {other}"),
    }
}

fn prepare(tool: &str, value: Value) -> Result<Prepared, ToolError> {
    lookup(tool).unwrap().prepare(&body(value), Path::new(WORK))
}

fn argv(prepared: &Prepared) -> (String, Vec<String>) {
    match &prepared.plan.command {
        CommandLine::Argv { program, args } => (program.clone(), args.clone()),
        CommandLine::Shell(script) => panic!("templated tool used a shell: {script}"),
    }
}

/// Program and args with artifact paths replaced by `<out>`.
fn rendered(tool: &str, value: Value) -> Vec<String> {
    let prepared = prepare(tool, value).unwrap();
    let artifacts: Vec<String> =
        prepared.artifacts.paths().iter().map(|p| p.to_string_lossy().into_owned()).collect();
    let (program, args) = argv(&prepared);
    std::iter::once(program)
        .chain(args.into_iter().map(|a| if artifacts.contains(&a) { "<out>".to_string() } else { a }))
        .collect()
}

fn words(line: &str) -> Vec<String> {
    line.split(' ').map(str::to_string).collect()
}

#[yare::parameterized(
    nmap_defaults   = { "nmap", json!({"target": "10.0.0.1"}), "nmap -sCV -T4 -Pn 10.0.0.1" },
    nmap_full       = { "nmap", json!({"target": "h", "scan_type": "-sS -sV", "ports": "22,80", "additional_args": "-v"}), "nmap -sS -sV -p 22,80 -v h" },
    nmap_empty_args = { "nmap", json!({"target": "h", "additional_args": ""}), "nmap -sCV h" },
    gobuster        = { "gobuster", json!({"url": "http://x"}), "gobuster dir -u http://x -w /usr/share/wordlists/dirb/common.txt" },
    gobuster_dns    = { "gobuster", json!({"url": "x.com", "mode": "dns", "wordlist": "w.txt", "additional_args": "-q"}), "gobuster dns -u x.com -w w.txt -q" },
    feroxbuster     = { "feroxbuster", json!({"url": "http://x"}), "feroxbuster -u http://x -w /usr/share/wordlists/dirb/common.txt -t 50 -o <out> --json -C 404" },
    ferox_filter    = { "feroxbuster", json!({"url": "http://x", "threads": 10, "additional_args": "--filter-status 500"}), "feroxbuster -u http://x -w /usr/share/wordlists/dirb/common.txt -t 10 -o <out> --json --filter-status 500" },
    nikto           = { "nikto", json!({"target": "http://x", "additional_args": "-Tuning 1"}), "nikto -h http://x -Tuning 1" },
    sqlmap          = { "sqlmap", json!({"url": "http://x/?id=1", "data": "a=1&b=2"}), "sqlmap -u http://x/?id=1 --batch --data=a=1&b=2" },
    metasploit      = { "metasploit", json!({"module": "auxiliary/scanner/ssh/ssh_version"}), "msfconsole -q -r <out>" },
    hydra_user      = { "hydra", json!({"target": "h", "service": "ssh", "username": "root", "password_file": "p.txt"}), "hydra -t 4 -l root -P p.txt h ssh" },
    hydra_files     = { "hydra", json!({"target": "h", "service": "ftp", "username_file": "u.txt", "password": "pw"}), "hydra -t 4 -L u.txt -p pw h ftp" },
    john            = { "john", json!({"hash_file": "h.txt", "format": "raw-md5"}), "john --format=raw-md5 --wordlist=/usr/share/wordlists/rockyou.txt h.txt" },
    wpscan          = { "wpscan", json!({"url": "http://wp"}), "wpscan --url http://wp" },
    enum4linux      = { "enum4linux-ng", json!({"target": "10.0.0.5"}), "enum4linux-ng -A 10.0.0.5" },
    ffuf_dir        = { "ffuf", json!({"url": "http://x"}), "ffuf -u http://x/FUZZ -w /usr/share/wordlists/dirb/common.txt -o <out> -of json -fc 404 -rate 100" },
    ffuf_own_flags  = { "ffuf", json!({"url": "http://x/", "additional_args": "-mc 200 -rate 10"}), "ffuf -u http://x/FUZZ -w /usr/share/wordlists/dirb/common.txt -o <out> -of json -mc 200 -rate 10" },
    ffuf_vhost      = { "ffuf", json!({"url": "http://x", "mode": "vhost"}), "ffuf -u http://x -w /usr/share/wordlists/dirb/common.txt -o <out> -of json -fc 404 -rate 100" },
    amass           = { "amass", json!({"domain": "x.com"}), "amass enum -d x.com" },
    hashcat         = { "hashcat", json!({"hash_file": "h.txt", "hash_type": 0, "attack_mode": 3}), "hashcat -a 3 -m 0 h.txt /usr/share/wordlists/rockyou.txt" },
    nuclei          = { "nuclei", json!({"target": "http://x", "templates": "cves/"}), "nuclei -u http://x -t cves/ -severity critical,high,medium" },
    masscan         = { "masscan", json!({"target": "10.0.0.0/24"}), "masscan 10.0.0.0/24 -p 1-65535 --rate 1000" },
    subfinder       = { "subfinder", json!({"domain": "x.com"}), "subfinder -d x.com -silent" },
    searchsploit    = { "searchsploit", json!({"query": "apache 2.4"}), "searchsploit apache 2.4" },
    whatweb         = { "whatweb", json!({"target": "http://x", "aggression": 3}), "whatweb -a 3 http://x" },
)]
fn builds_argv(tool: &str, value: Value, expected: &str) {
    assert_eq!(rendered(tool, value), words(expected));
}

#[test]
fn openvas_escapes_target_into_xml() {
    let prepared = prepare("openvas", json!({"target": "a<b>&c"})).unwrap();
    let (program, args) = argv(&prepared);
    assert_eq!(program, "gvm-cli");
    assert_eq!(
        args,
        vec![
            "socket".to_string(),
            "--xml".into(),
            "<create_target><name>sr target</name><hosts>a&lt;b&gt;&amp;c</hosts></create_target>".into(),
        ]
    );
}

#[test]
fn argument_values_are_never_split_or_interpreted() {
    let prepared = prepare("nmap", json!({"target": "10.0.0.1; rm -rf /"})).unwrap();
    let (_, args) = argv(&prepared);
    assert_eq!(args.last().unwrap(), "10.0.0.1; rm -rf /");
}

#[test]
fn metasploit_writes_resource_script() {
    let prepared = prepare(
        "metasploit",
        json!({"module": "exploit/x", "options": {"RHOSTS": "10.0.0.1", "RPORT": 445}}),
    )
    .unwrap();
    let (path, script) = &prepared.plan.inputs[0];
    assert!(path.starts_with(WORK));
    assert!(path.to_string_lossy().ends_with(".rc"));
    assert_eq!(script, "use exploit/x\nset RHOSTS 10.0.0.1\nset RPORT 445\nrun\nexit\n");
}

#[test]
fn metasploit_rejects_multiline_values() {
    let err = prepare("metasploit", json!({"module": "x", "options": {"A": "1\nrun"}})).unwrap_err();
    assert!(matches!(err, ToolError::Invalid { key: "options", .. }));
}

#[test]
fn output_parsers_point_at_reserved_artifacts() {
    let ferox = prepare("feroxbuster", json!({"url": "http://x", "max_results": 5})).unwrap();
    let out: PathBuf = ferox.artifacts.paths()[0].clone();
    assert_eq!(ferox.plan.output, Some(OutputParser::JsonLines { path: out, max_results: 5 }));

    let ffuf = prepare("ffuf", json!({"url": "http://x"})).unwrap();
    assert!(matches!(ffuf.plan.output, Some(OutputParser::JsonResults { max_results: 100, .. })));
}

#[test]
fn concurrent_plans_get_distinct_artifacts() {
    let a = prepare("ffuf", json!({"url": "http://x"})).unwrap();
    let b = prepare("ffuf", json!({"url": "http://x"})).unwrap();
    assert_ne!(a.artifacts.paths(), b.artifacts.paths());
}

#[yare::parameterized(
    nmap      = { "nmap", json!({}), "Target parameter is required" },
    gobuster  = { "gobuster", json!({"url": ""}), "URL parameter is required" },
    bad_mode  = { "gobuster", json!({"url": "x", "mode": "bogus"}), "Invalid mode: bogus. Must be one of: dir, dns, fuzz, vhost" },
    amass     = { "amass", json!({"domain": "x", "mode": "scan"}), "Invalid mode: scan. Must be one of: enum, intel, viz, track, db" },
    domain    = { "subfinder", json!({}), "Domain parameter is required" },
    module    = { "metasploit", json!({}), "Module parameter is required" },
    hash_file = { "john", json!({}), "Hash file parameter is required" },
    hydra     = { "hydra", json!({"target": "h"}), "Target and service parameters are required" },
    hydra_cred = { "hydra", json!({"target": "h", "service": "ssh", "username": "root"}), "Username/username_file and password/password_file are required" },
    query     = { "searchsploit", json!({"query": ""}), "Query parameter is required" },
)]
fn validation_errors(tool: &str, value: Value, message: &str) {
    assert_eq!(prepare(tool, value).unwrap_err().to_string(), message);
}

#[test]
fn registry_names_are_unique_and_resolvable() {
    let names: Vec<_> = registry().iter().map(|t| t.name).collect();
    assert_eq!(names.len(), 19);
    for name in &names {
        assert_eq!(lookup(name).unwrap().name, *name);
        assert_eq!(names.iter().filter(|n| *n == name).count(), 1, "{name} listed twice");
    }
    assert!(lookup("telnet").is_none());
    assert_eq!(registry().iter().filter(|t| t.essential).count(), 12);
}
