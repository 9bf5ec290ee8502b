//! Fact extraction from raw device command output
//!
//! The crawler retrieves exactly two facts per device:
//! - its identity, from `show version` output
//! - its adjacency table, from `show cdp neighbors detail` output
//!
//! Extraction is line-oriented: each fact is located by its stable marker text
//! rather than by position, so banner noise and pagination artifacts around the
//! interesting lines are ignored. Output that lacks the expected markers fails
//! with [`ParseError`](crate::ParseError); that failure is local to the address
//! being interrogated and never aborts the crawl.

use crate::{ParseError, ParseResult};

/// Command whose output identifies a device
pub const SHOW_VERSION: &str = "show version";

/// Command whose output lists a device's CDP adjacencies
pub const SHOW_CDP_NEIGHBORS_DETAIL: &str = "show cdp neighbors detail";

/// Identity facts extracted from `show version` output
///
/// The hostname is kept exactly as reported; normalization happens when the
/// fact is turned into a [`DeviceIdentity`](crate::DeviceIdentity).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityFact {
    pub hostname: String,
    pub serial: String,
    pub uptime: String,
}

/// One adjacency extracted from a `show cdp neighbors detail` block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborRecord {
    /// Neighbor hostname exactly as advertised (possibly fully qualified)
    pub device_id: String,
    pub management_ip: String,
    pub platform: String,
    pub capabilities: String,
    pub local_port: String,
    pub remote_port: String,
    pub software_version: String,
}

/// Extracts identity facts from raw `show version` output
///
/// The hostname and uptime come from the `<hostname> uptime is <uptime>`
/// line; the serial number from the `Processor board ID` line. The uptime
/// line is the anchor: output without it does not identify a device and is
/// rejected. A missing serial line yields an empty serial, matching devices
/// that do not report one.
pub fn parse_identity(raw: &str) -> ParseResult<IdentityFact> {
    let mut hostname = None;
    let mut uptime = None;
    let mut serial = String::new();

    for line in raw.lines() {
        let line = line.trim();

        if hostname.is_none() {
            if let Some((host, rest)) = line.split_once(" uptime is ") {
                if !host.trim().is_empty() {
                    hostname = Some(host.trim().to_string());
                    uptime = Some(rest.trim().to_string());
                }
            }
        }

        if let Some(rest) = line.strip_prefix("Processor board ID ") {
            serial = rest.trim().to_string();
        }
    }

    match (hostname, uptime) {
        (Some(hostname), Some(uptime)) => Ok(IdentityFact {
            hostname,
            serial,
            uptime,
        }),
        _ => Err(ParseError::MissingField {
            command: SHOW_VERSION,
            field: "uptime",
        }),
    }
}

/// Extracts adjacency records from raw `show cdp neighbors detail` output
///
/// Blocks are separated by dashed rules; each block holding a `Device ID:`
/// line contributes one record. An empty adjacency table (blank output or
/// just the trailing entry count) yields an empty list. Non-empty output
/// with no recognizable block is rejected, which catches commands that
/// landed on a device without CDP.
pub fn parse_neighbor_detail(raw: &str) -> ParseResult<Vec<NeighborRecord>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with("Total cdp entries displayed") {
        return Ok(Vec::new());
    }

    let mut records = Vec::new();
    for block in split_blocks(raw) {
        if let Some(record) = parse_neighbor_block(&block) {
            records.push(record);
        }
    }

    if records.is_empty() {
        return Err(ParseError::UnrecognizedOutput {
            command: SHOW_CDP_NEIGHBORS_DETAIL,
            message: "no Device ID entries found".to_string(),
        });
    }

    Ok(records)
}

/// Splits neighbor-detail output into per-neighbor blocks on dashed rules
fn split_blocks(raw: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current = String::new();

    for line in raw.lines() {
        let trimmed = line.trim();
        if trimmed.len() >= 4 && trimmed.chars().all(|c| c == '-') {
            if !current.trim().is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push_str(line);
            current.push('\n');
        }
    }

    if !current.trim().is_empty() {
        blocks.push(current);
    }

    blocks
}

/// Parses one dashed-rule-delimited block; returns None for blocks without
/// a Device ID line (preamble, trailing entry counts)
fn parse_neighbor_block(block: &str) -> Option<NeighborRecord> {
    let mut device_id = None;
    let mut management_ip = String::new();
    let mut platform = String::new();
    let mut capabilities = String::new();
    let mut local_port = String::new();
    let mut remote_port = String::new();
    let mut software_version = String::new();
    let mut version_marker_seen = false;

    for line in block.lines() {
        let line = line.trim();

        if let Some(rest) = line.strip_prefix("Device ID:") {
            device_id = Some(rest.trim().to_string());
        } else if let Some(rest) = line.strip_prefix("IP address:") {
            // First entry address wins; later ones repeat under the version text
            if management_ip.is_empty() {
                management_ip = rest.trim().to_string();
            }
        } else if let Some(rest) = line.strip_prefix("Platform:") {
            match rest.split_once("Capabilities:") {
                Some((plat, caps)) => {
                    platform = plat.trim().trim_end_matches(',').trim().to_string();
                    capabilities = caps.trim().to_string();
                }
                None => platform = rest.trim().trim_end_matches(',').trim().to_string(),
            }
        } else if let Some(rest) = line.strip_prefix("Interface:") {
            match rest.split_once("Port ID (outgoing port):") {
                Some((local, remote)) => {
                    local_port = local.trim().trim_end_matches(',').trim().to_string();
                    remote_port = remote.trim().to_string();
                }
                None => local_port = rest.trim().trim_end_matches(',').trim().to_string(),
            }
        } else if line.starts_with("Version") && line.trim_end_matches(':').trim() == "Version" {
            version_marker_seen = true;
        } else if version_marker_seen && software_version.is_empty() && !line.is_empty() {
            software_version = line.to_string();
        }
    }

    Some(NeighborRecord {
        device_id: device_id?,
        management_ip,
        platform,
        capabilities,
        local_port,
        remote_port,
        software_version,
    })
}
