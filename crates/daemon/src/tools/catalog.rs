// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The tool table and its argv builders.

use serde_json::Value;

use super::args::has_flag;
use super::output::OutputParser;
use super::params::{Params, ToolError};
use super::plan::{Artifacts, Plan};
use super::ToolSpec;

const DIRB_COMMON: &str = "/usr/share/wordlists/dirb/common.txt";
const ROCKYOU: &str = "/usr/share/wordlists/rockyou.txt";

const GOBUSTER_MODES: &[&str] = &["dir", "dns", "fuzz", "vhost"];
const AMASS_MODES: &[&str] = &["enum", "intel", "viz", "track", "db"];

const FEROX_MAX_RESULTS: usize = 200;
const FFUF_MAX_RESULTS: usize = 100;

pub(super) static TOOLS: &[ToolSpec] = &[
    ToolSpec { name: "nmap", binary: "nmap", essential: true, build: nmap },
    ToolSpec { name: "gobuster", binary: "gobuster", essential: true, build: gobuster },
    ToolSpec { name: "feroxbuster", binary: "feroxbuster", essential: true, build: feroxbuster },
    ToolSpec { name: "nikto", binary: "nikto", essential: true, build: nikto },
    ToolSpec { name: "sqlmap", binary: "sqlmap", essential: true, build: sqlmap },
    ToolSpec { name: "metasploit", binary: "msfconsole", essential: false, build: metasploit },
    ToolSpec { name: "hydra", binary: "hydra", essential: true, build: hydra },
    ToolSpec { name: "john", binary: "john", essential: true, build: john },
    ToolSpec { name: "wpscan", binary: "wpscan", essential: true, build: wpscan },
    ToolSpec { name: "enum4linux-ng", binary: "enum4linux-ng", essential: true, build: enum4linux_ng },
    ToolSpec { name: "ffuf", binary: "ffuf", essential: true, build: ffuf },
    ToolSpec { name: "amass", binary: "amass", essential: true, build: amass },
    ToolSpec { name: "hashcat", binary: "hashcat", essential: true, build: hashcat },
    ToolSpec { name: "openvas", binary: "gvm-cli", essential: false, build: openvas },
    ToolSpec { name: "nuclei", binary: "nuclei", essential: false, build: nuclei },
    ToolSpec { name: "masscan", binary: "masscan", essential: false, build: masscan },
    ToolSpec { name: "subfinder", binary: "subfinder", essential: false, build: subfinder },
    ToolSpec { name: "searchsploit", binary: "searchsploit", essential: false, build: searchsploit },
    ToolSpec { name: "whatweb", binary: "whatweb", essential: false, build: whatweb },
];

fn nmap(p: Params<'_>, _: &mut Artifacts) -> Result<Plan, ToolError> {
    let target = p.required("target", "Target")?;
    let mut args = p.words_or("scan_type", "-sCV")?;
    if let Some(ports) = p.optional("ports")? {
        args.extend(["-p".to_string(), ports]);
    }
    args.extend(p.words_or("additional_args", "-T4 -Pn")?);
    args.push(target);
    Ok(Plan::argv("nmap", args))
}

fn gobuster(p: Params<'_>, _: &mut Artifacts) -> Result<Plan, ToolError> {
    let url = p.required("url", "URL")?;
    let mode = p.mode("mode", "dir", GOBUSTER_MODES)?;
    let wordlist = p.text_or("wordlist", DIRB_COMMON)?;
    let mut args = vec![mode, "-u".into(), url, "-w".into(), wordlist];
    args.extend(p.extra()?);
    Ok(Plan::argv("gobuster", args))
}

fn feroxbuster(p: Params<'_>, artifacts: &mut Artifacts) -> Result<Plan, ToolError> {
    let url = p.required("url", "URL")?;
    let wordlist = p.text_or("wordlist", DIRB_COMMON)?;
    let threads = p.text_or("threads", "50")?;
    let max_results = p.count_or("max_results", FEROX_MAX_RESULTS)?;
    let extra = p.extra()?;

    let out = artifacts.path("ferox", "json");
    let mut args = vec![
        "-u".into(),
        url,
        "-w".into(),
        wordlist,
        "-t".into(),
        threads,
        "-o".into(),
        out.to_string_lossy().into_owned(),
        "--json".into(),
    ];
    if !has_flag(&extra, &["-C", "--filter-status"]) {
        args.extend(["-C".to_string(), "404".to_string()]);
    }
    args.extend(extra);
    Ok(Plan::argv("feroxbuster", args)
        .output(Some(OutputParser::JsonLines { path: out, max_results })))
}

fn nikto(p: Params<'_>, _: &mut Artifacts) -> Result<Plan, ToolError> {
    let target = p.required("target", "Target")?;
    let mut args = vec!["-h".to_string(), target];
    args.extend(p.extra()?);
    Ok(Plan::argv("nikto", args))
}

fn sqlmap(p: Params<'_>, _: &mut Artifacts) -> Result<Plan, ToolError> {
    let url = p.required("url", "URL")?;
    let mut args = vec!["-u".to_string(), url, "--batch".into()];
    if let Some(data) = p.optional("data")? {
        args.push(format!("--data={data}"));
    }
    args.extend(p.extra()?);
    Ok(Plan::argv("sqlmap", args))
}

/// Writes a resource script (`use`, one `set` per option, `run`, `exit`)
/// and runs it with `msfconsole -q -r`.
fn metasploit(p: Params<'_>, artifacts: &mut Artifacts) -> Result<Plan, ToolError> {
    let module = p.required("module", "Module")?;
    let mut script = format!("use {}\n", single_line("module", &module)?);
    if let Some(options) = p.object("options")? {
        for (key, value) in options {
            let value = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            script.push_str(&format!(
                "set {} {}\n",
                single_line("options", key)?,
                single_line("options", &value)?
            ));
        }
    }
    script.push_str("run\nexit\n");

    let rc = artifacts.path("msf", "rc");
    let args = vec!["-q".to_string(), "-r".into(), rc.to_string_lossy().into_owned()];
    Ok(Plan::argv("msfconsole", args).with_input(rc, script))
}

fn hydra(p: Params<'_>, _: &mut Artifacts) -> Result<Plan, ToolError> {
    let (Some(target), Some(service)) = (p.optional("target")?, p.optional("service")?) else {
        return Err(ToolError::MissingGroup("Target and service parameters"));
    };
    let login = match (p.optional("username")?, p.optional("username_file")?) {
        (Some(user), _) => Some(["-l".to_string(), user]),
        (None, Some(file)) => Some(["-L".to_string(), file]),
        (None, None) => None,
    };
    let secret = match (p.optional("password")?, p.optional("password_file")?) {
        (Some(password), _) => Some(["-p".to_string(), password]),
        (None, Some(file)) => Some(["-P".to_string(), file]),
        (None, None) => None,
    };
    let (Some(login), Some(secret)) = (login, secret) else {
        return Err(ToolError::MissingGroup(
            "Username/username_file and password/password_file",
        ));
    };

    let mut args = vec!["-t".to_string(), "4".into()];
    args.extend(login);
    args.extend(secret);
    args.extend([target, service]);
    args.extend(p.extra()?);
    Ok(Plan::argv("hydra", args))
}

fn john(p: Params<'_>, _: &mut Artifacts) -> Result<Plan, ToolError> {
    let hash_file = p.required("hash_file", "Hash file")?;
    let mut args = Vec::new();
    if let Some(format) = p.optional("format")? {
        args.push(format!("--format={format}"));
    }
    let wordlist = p.text_or("wordlist", ROCKYOU)?;
    if !wordlist.is_empty() {
        args.push(format!("--wordlist={wordlist}"));
    }
    args.extend(p.extra()?);
    args.push(hash_file);
    Ok(Plan::argv("john", args))
}

fn wpscan(p: Params<'_>, _: &mut Artifacts) -> Result<Plan, ToolError> {
    let url = p.required("url", "URL")?;
    let mut args = vec!["--url".to_string(), url];
    args.extend(p.extra()?);
    Ok(Plan::argv("wpscan", args))
}

fn enum4linux_ng(p: Params<'_>, _: &mut Artifacts) -> Result<Plan, ToolError> {
    let target = p.required("target", "Target")?;
    let mut args = p.words_or("additional_args", "-A")?;
    args.push(target);
    Ok(Plan::argv("enum4linux-ng", args))
}

/// Directory mode appends `/FUZZ` to the URL when the keyword is missing.
/// Adds `-fc 404` and `-rate 100` unless the caller set their own filters
/// or rate.
fn ffuf(p: Params<'_>, artifacts: &mut Artifacts) -> Result<Plan, ToolError> {
    let mut url = p.required("url", "URL")?;
    let wordlist = p.text_or("wordlist", DIRB_COMMON)?;
    let mode = p.text_or("mode", "dir")?;
    let max_results = p.count_or("max_results", FFUF_MAX_RESULTS)?;
    let extra = p.extra()?;

    if mode == "dir" && !url.contains("FUZZ") {
        if !url.ends_with('/') {
            url.push('/');
        }
        url.push_str("FUZZ");
    }

    let out = artifacts.path("ffuf", "json");
    let mut args = vec![
        "-u".into(),
        url,
        "-w".into(),
        wordlist,
        "-o".into(),
        out.to_string_lossy().into_owned(),
        "-of".into(),
        "json".into(),
    ];
    if !has_flag(&extra, &["-fc", "-mc"]) {
        args.extend(["-fc".to_string(), "404".to_string()]);
    }
    if !has_flag(&extra, &["-rate"]) {
        args.extend(["-rate".to_string(), "100".to_string()]);
    }
    args.extend(extra);
    Ok(Plan::argv("ffuf", args).output(Some(OutputParser::JsonResults { path: out, max_results })))
}

fn amass(p: Params<'_>, _: &mut Artifacts) -> Result<Plan, ToolError> {
    let domain = p.required("domain", "Domain")?;
    let mode = p.mode("mode", "enum", AMASS_MODES)?;
    let mut args = vec![mode, "-d".into(), domain];
    args.extend(p.extra()?);
    Ok(Plan::argv("amass", args))
}

fn hashcat(p: Params<'_>, _: &mut Artifacts) -> Result<Plan, ToolError> {
    let hash_file = p.required("hash_file", "Hash file")?;
    let wordlist = p.text_or("wordlist", ROCKYOU)?;
    let attack_mode = p.text_or("attack_mode", "0")?;
    let mut args = vec!["-a".to_string(), attack_mode];
    if let Some(hash_type) = p.optional("hash_type")? {
        args.extend(["-m".to_string(), hash_type]);
    }
    args.extend([hash_file, wordlist]);
    args.extend(p.extra()?);
    Ok(Plan::argv("hashcat", args))
}

/// Creates a GVM target over the local socket. The scan itself is driven
/// from the GVM side.
fn openvas(p: Params<'_>, _: &mut Artifacts) -> Result<Plan, ToolError> {
    let target = p.required("target", "Target")?;
    let xml = format!(
        "<create_target><name>sr target</name><hosts>{}</hosts></create_target>",
        xml_escape(&target)
    );
    let mut args = vec!["socket".to_string(), "--xml".into(), xml];
    args.extend(p.extra()?);
    Ok(Plan::argv("gvm-cli", args))
}

fn nuclei(p: Params<'_>, _: &mut Artifacts) -> Result<Plan, ToolError> {
    let target = p.required("target", "Target")?;
    let mut args = vec!["-u".to_string(), target];
    if let Some(templates) = p.optional("templates")? {
        args.extend(["-t".to_string(), templates]);
    }
    let severity = p.text_or("severity", "critical,high,medium")?;
    if !severity.is_empty() {
        args.extend(["-severity".to_string(), severity]);
    }
    args.extend(p.extra()?);
    Ok(Plan::argv("nuclei", args))
}

fn masscan(p: Params<'_>, _: &mut Artifacts) -> Result<Plan, ToolError> {
    let target = p.required("target", "Target")?;
    let ports = p.text_or("ports", "1-65535")?;
    let rate = p.count_or("rate", 1000)?;
    let mut args = vec![target, "-p".into(), ports, "--rate".into(), rate.to_string()];
    args.extend(p.extra()?);
    Ok(Plan::argv("masscan", args))
}

fn subfinder(p: Params<'_>, _: &mut Artifacts) -> Result<Plan, ToolError> {
    let domain = p.required("domain", "Domain")?;
    let mut args = vec!["-d".to_string(), domain];
    args.extend(p.words_or("additional_args", "-silent")?);
    Ok(Plan::argv("subfinder", args))
}

/// Search terms are separate arguments, as on the command line.
fn searchsploit(p: Params<'_>, _: &mut Artifacts) -> Result<Plan, ToolError> {
    let query = p.required("query", "Query")?;
    let mut args = p.extra()?;
    args.extend(query.split_whitespace().map(str::to_string));
    Ok(Plan::argv("searchsploit", args))
}

fn whatweb(p: Params<'_>, _: &mut Artifacts) -> Result<Plan, ToolError> {
    let target = p.required("target", "Target")?;
    let aggression = p.count_or("aggression", 1)?;
    let mut args = vec!["-a".to_string(), aggression.to_string()];
    args.extend(p.extra()?);
    args.push(target);
    Ok(Plan::argv("whatweb", args))
}

fn single_line<'s>(key: &'static str, value: &'s str) -> Result<&'s str, ToolError> {
    if value.contains(['\n', '\r']) {
        Err(ToolError::Invalid { key, reason: "values must be a single line".into() })
    } else {
        Ok(value)
    }
}

fn xml_escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
