//! Validation for IP allowlist entries.

use std::fmt;
use std::net::IpAddr;

use ipnet::IpNet;

use crate::error::ValidationError;

/// Longest description accepted on a rule.
pub const MAX_DESCRIPTION_LEN: usize = 120;

/// A parsed allowlist entry: a single host or a CIDR network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllowlistTarget {
    Address(IpAddr),
    Network(IpNet),
}

impl AllowlistTarget {
    /// Whether `addr` falls under this entry.
    #[must_use]
    pub fn contains(&self, addr: IpAddr) -> bool {
        match self {
            Self::Address(a) => *a == addr,
            Self::Network(net) => net.contains(&addr),
        }
    }
}

impl fmt::Display for AllowlistTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address(a) => a.fmt(f),
            Self::Network(n) => n.fmt(f),
        }
    }
}

/// Parse the address field of the add-rule form.
///
/// Accepts a bare IPv4/IPv6 address or a network in CIDR notation.
/// Networks are normalized to their base address, so `10.1.2.3/8` becomes
/// `10.0.0.0/8`.
///
/// # Errors
///
/// Returns [`ValidationError::Empty`] for blank input and
/// [`ValidationError::InvalidAddress`] when the text parses as neither.
pub fn parse_allowlist_entry(raw: &str) -> Result<AllowlistTarget, ValidationError> {
    let input = raw.trim();
    if input.is_empty() {
        return Err(ValidationError::Empty { field: "IP" });
    }

    if input.contains('/') {
        input
            .parse::<IpNet>()
            .map(|net| AllowlistTarget::Network(net.trunc()))
            .map_err(|e| ValidationError::InvalidAddress {
                input: input.to_owned(),
                reason: e.to_string(),
            })
    } else {
        input
            .parse::<IpAddr>()
            .map(AllowlistTarget::Address)
            .map_err(|e| ValidationError::InvalidAddress {
                input: input.to_owned(),
                reason: e.to_string(),
            })
    }
}

/// Check the optional description field.
///
/// # Errors
///
/// Returns [`ValidationError::TooLong`] past [`MAX_DESCRIPTION_LEN`] chars.
pub fn validate_description(raw: &str) -> Result<String, ValidationError> {
    let description = raw.trim();
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::TooLong {
            field: "Descrição",
            max: MAX_DESCRIPTION_LEN,
        });
    }
    Ok(description.to_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn accepts_fixture_entries() {
        for raw in ["192.168.1.0/24", "200.189.10.55", "10.0.0.0/8"] {
            assert_eq!(parse_allowlist_entry(raw).unwrap().to_string(), raw);
        }
    }

    #[test]
    fn accepts_ipv6() {
        assert!(matches!(
            parse_allowlist_entry("2001:db8::/32"),
            Ok(AllowlistTarget::Network(_))
        ));
        assert!(matches!(
            parse_allowlist_entry("::1"),
            Ok(AllowlistTarget::Address(_))
        ));
    }

    #[test]
    fn network_is_truncated_to_base() {
        let entry = parse_allowlist_entry("10.1.2.3/8").unwrap();
        assert_eq!(entry.to_string(), "10.0.0.0/8");
        assert!(entry.contains("10.200.0.1".parse().unwrap()));
    }

    #[test]
    fn rejects_garbage() {
        for raw in ["999.1.1.1", "10.0.0.0/33", "localhost", "1.2.3"] {
            assert!(
                matches!(
                    parse_allowlist_entry(raw),
                    Err(ValidationError::InvalidAddress { .. })
                ),
                "{raw}"
            );
        }
    }

    #[test]
    fn rejects_blank() {
        assert_eq!(
            parse_allowlist_entry("   "),
            Err(ValidationError::Empty { field: "IP" })
        );
    }

    #[test]
    fn description_length_is_capped() {
        assert_eq!(validate_description("  VPN  ").unwrap(), "VPN");
        let long = "x".repeat(MAX_DESCRIPTION_LEN + 1);
        assert!(matches!(
            validate_description(&long),
            Err(ValidationError::TooLong { .. })
        ));
    }
}
