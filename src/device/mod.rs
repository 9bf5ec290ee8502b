//! Device data model
//!
//! This module defines the value records the crawl produces:
//! - [`DeviceIdentity`]: the canonical, deduplicating key for a device
//! - [`NeighborEdge`]: one directed adjacency record
//!
//! Devices report their hostname in inconsistent shapes (bare label, fully
//! qualified, mixed case), so every hostname that participates in identity
//! comparison goes through [`normalize_hostname`] exactly once, at the edge of
//! the system.

use crate::facts::{IdentityFact, NeighborRecord};

/// Normalizes a reported hostname to its canonical form
///
/// The canonical form is the first label (everything before the first `.`),
/// upper-cased. Both device identities and edge destinations are normalized
/// with this function, so identity comparison is case-insensitive and
/// domain-suffix-insensitive everywhere.
///
/// # Examples
///
/// ```
/// use cdp_atlas::normalize_hostname;
///
/// assert_eq!(normalize_hostname("sw1.example.net"), "SW1");
/// assert_eq!(normalize_hostname("Core1"), "CORE1");
/// ```
pub fn normalize_hostname(raw: &str) -> String {
    raw.trim()
        .split('.')
        .next()
        .unwrap_or("")
        .to_uppercase()
}

/// The canonical key for a discovered device
///
/// Two addresses that report the same normalized hostname are the same
/// logical device; only the first one seen is interrogated for neighbors.
/// Serial number and uptime are supplementary facts carried onto edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceIdentity {
    /// Normalized hostname (first label, upper-cased)
    pub hostname: String,

    /// Serial number as reported by the device (may be empty)
    pub serial: String,

    /// Uptime string as reported by the device
    pub uptime: String,
}

impl DeviceIdentity {
    /// Builds an identity from an extracted identity fact, normalizing the hostname
    pub fn from_fact(fact: &IdentityFact) -> Self {
        Self {
            hostname: normalize_hostname(&fact.hostname),
            serial: fact.serial.clone(),
            uptime: fact.uptime.clone(),
        }
    }
}

/// One directed adjacency record: local device → advertised neighbor
///
/// Field names follow the columns of the generated inventory; every edge is
/// stamped with the full local identity so rows are self-contained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborEdge {
    pub local_host: String,
    pub local_ip: String,
    pub local_port: String,
    pub local_serial: String,
    pub local_uptime: String,

    /// Neighbor hostname, normalized like [`DeviceIdentity::hostname`]
    pub destination_host: String,
    pub remote_port: String,

    /// Management address advertised by the neighbor (may be empty)
    pub management_ip: String,
    pub platform: String,
    pub software_version: String,

    /// Capability flags as advertised, e.g. "Switch IGMP"
    pub capabilities: String,
}

impl NeighborEdge {
    /// Builds an edge from a parsed neighbor record, stamping it with the
    /// interrogated device's identity and address
    pub fn from_record(local: &DeviceIdentity, local_ip: &str, record: NeighborRecord) -> Self {
        Self {
            local_host: local.hostname.clone(),
            local_ip: local_ip.to_string(),
            local_port: record.local_port,
            local_serial: local.serial.clone(),
            local_uptime: local.uptime.clone(),
            destination_host: normalize_hostname(&record.device_id),
            remote_port: record.remote_port,
            management_ip: record.management_ip,
            platform: record.platform,
            software_version: record.software_version,
            capabilities: record.capabilities,
        }
    }

    /// Whether the neighbor behind this edge should itself be crawled
    ///
    /// A neighbor is a crawl candidate when it advertises the `Switch`
    /// capability and not the `Host` capability (IP phones and servers
    /// advertise `Host` and terminate the walk).
    pub fn is_crawl_candidate(&self) -> bool {
        self.capabilities.contains("Switch") && !self.capabilities.contains("Host")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_record() -> NeighborRecord {
        NeighborRecord {
            device_id: "sw1.example.net".to_string(),
            management_ip: "10.0.0.2".to_string(),
            platform: "cisco WS-C2960-24TT-L".to_string(),
            capabilities: "Switch IGMP".to_string(),
            local_port: "GigabitEthernet0/1".to_string(),
            remote_port: "GigabitEthernet0/2".to_string(),
            software_version: "12.2(55)SE5".to_string(),
        }
    }

    #[test]
    fn test_normalize_strips_domain_suffix() {
        assert_eq!(normalize_hostname("core1.campus.example.net"), "CORE1");
    }

    #[test]
    fn test_normalize_uppercases() {
        assert_eq!(normalize_hostname("sw1"), "SW1");
        assert_eq!(normalize_hostname("Sw1"), "SW1");
    }

    #[test]
    fn test_normalize_trims_whitespace() {
        assert_eq!(normalize_hostname("  sw1.example.net  "), "SW1");
    }

    #[test]
    fn test_normalize_empty_input() {
        assert_eq!(normalize_hostname(""), "");
    }

    #[test]
    fn test_identity_from_fact_normalizes_hostname() {
        let fact = IdentityFact {
            hostname: "core1.campus.example.net".to_string(),
            serial: "FOC1709W1DB".to_string(),
            uptime: "5 weeks, 2 days".to_string(),
        };

        let identity = DeviceIdentity::from_fact(&fact);
        assert_eq!(identity.hostname, "CORE1");
        assert_eq!(identity.serial, "FOC1709W1DB");
    }

    #[test]
    fn test_edge_stamped_with_local_identity() {
        let local = DeviceIdentity {
            hostname: "CORE1".to_string(),
            serial: "FOC1709W1DB".to_string(),
            uptime: "5 weeks, 2 days".to_string(),
        };

        let edge = NeighborEdge::from_record(&local, "10.0.0.1", create_test_record());

        assert_eq!(edge.local_host, "CORE1");
        assert_eq!(edge.local_ip, "10.0.0.1");
        assert_eq!(edge.local_serial, "FOC1709W1DB");
        assert_eq!(edge.destination_host, "SW1");
        assert_eq!(edge.remote_port, "GigabitEthernet0/2");
    }

    #[test]
    fn test_switch_without_host_is_crawl_candidate() {
        let local = DeviceIdentity {
            hostname: "CORE1".to_string(),
            serial: String::new(),
            uptime: String::new(),
        };
        let edge = NeighborEdge::from_record(&local, "10.0.0.1", create_test_record());
        assert!(edge.is_crawl_candidate());
    }

    #[test]
    fn test_host_capability_is_not_crawl_candidate() {
        let local = DeviceIdentity {
            hostname: "CORE1".to_string(),
            serial: String::new(),
            uptime: String::new(),
        };

        let mut record = create_test_record();
        record.capabilities = "Host Phone".to_string();
        let phone = NeighborEdge::from_record(&local, "10.0.0.1", record);
        assert!(!phone.is_crawl_candidate());

        // A switch that also advertises Host still terminates the walk
        let mut record = create_test_record();
        record.capabilities = "Switch IGMP Host".to_string();
        let hybrid = NeighborEdge::from_record(&local, "10.0.0.1", record);
        assert!(!hybrid.is_crawl_candidate());
    }
}
