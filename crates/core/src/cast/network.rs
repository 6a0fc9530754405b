//! Host name, email, URL and address casts. All return the input unchanged on success.

use std::net::IpAddr;
use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use super::CastError;

const MAX_DOMAIN_LENGTH: usize = 253;
const MAX_LOCAL_PART_LENGTH: usize = 64;

static HOSTNAME_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?$")
        .expect("static regex must compile")
});

static EMAIL_LOCAL_PART: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*$")
        .expect("static regex must compile")
});

static MAC_COLON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9A-Fa-f]{2}(?::[0-9A-Fa-f]{2}){5}$").expect("static regex must compile")
});

static MAC_DASH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9A-Fa-f]{2}(?:-[0-9A-Fa-f]{2}){5}$").expect("static regex must compile")
});

static MAC_DOT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9A-Fa-f]{4}(?:\.[0-9A-Fa-f]{4}){2}$").expect("static regex must compile")
});

/// Schemes that are valid without a host part.
const HOSTLESS_SCHEMES: [&str; 3] = ["mailto", "news", "file"];

fn is_hostname(value: &str) -> bool {
    let value = value.strip_suffix('.').unwrap_or(value);

    !value.is_empty()
        && value.len() <= MAX_DOMAIN_LENGTH
        && value.split('.').all(|label| HOSTNAME_LABEL.is_match(label))
}

pub fn cast_domain(value: &str) -> Result<String, CastError> {
    if is_hostname(value) {
        Ok(value.to_string())
    } else {
        Err(CastError::Domain)
    }
}

/// `local@domain` where the domain has at least two labels.
pub fn cast_email(value: &str) -> Result<String, CastError> {
    let Some((local_part, domain)) = value.rsplit_once('@') else {
        return Err(CastError::Email);
    };

    let valid = local_part.len() <= MAX_LOCAL_PART_LENGTH
        && EMAIL_LOCAL_PART.is_match(local_part)
        && !domain.ends_with('.')
        && domain.contains('.')
        && is_hostname(domain);

    if valid {
        Ok(value.to_string())
    } else {
        Err(CastError::Email)
    }
}

pub fn cast_url(value: &str) -> Result<String, CastError> {
    let url = Url::parse(value).map_err(|_| CastError::Url)?;

    let has_host = url.host_str().is_some_and(|host| !host.is_empty());
    if has_host || HOSTLESS_SCHEMES.contains(&url.scheme()) {
        Ok(value.to_string())
    } else {
        Err(CastError::Url)
    }
}

pub fn cast_ip_address(value: &str) -> Result<String, CastError> {
    value
        .parse::<IpAddr>()
        .map(|_| value.to_string())
        .map_err(|_| CastError::IpAddr)
}

/// Six hex pairs separated uniformly by `:` or `-`, or three dotted hex quads.
pub fn cast_mac_address(value: &str) -> Result<String, CastError> {
    if MAC_COLON.is_match(value) || MAC_DASH.is_match(value) || MAC_DOT.is_match(value) {
        Ok(value.to_string())
    } else {
        Err(CastError::MacAddr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cast_domain() {
        assert_eq!(cast_domain("example.com").unwrap(), "example.com");
        assert_eq!(cast_domain("localhost").unwrap(), "localhost");
        assert_eq!(cast_domain("a-b.example.org.").unwrap(), "a-b.example.org.");
        assert_eq!(cast_domain("invalid-.domain"), Err(CastError::Domain));
        assert_eq!(cast_domain("-lead.example"), Err(CastError::Domain));
        assert_eq!(cast_domain("double..dot"), Err(CastError::Domain));
        assert_eq!(cast_domain(""), Err(CastError::Domain));
        assert_eq!(
            cast_domain(&format!("{}.com", "a".repeat(64))),
            Err(CastError::Domain)
        );
    }

    #[test]
    fn test_cast_email() {
        assert_eq!(
            cast_email("test@example.com").unwrap(),
            "test@example.com"
        );
        assert_eq!(
            cast_email("first.last+tag@mail.example.co").unwrap(),
            "first.last+tag@mail.example.co"
        );
        assert_eq!(cast_email("invalid-email"), Err(CastError::Email));
        assert_eq!(cast_email("user@localhost"), Err(CastError::Email));
        assert_eq!(cast_email("a..b@example.com"), Err(CastError::Email));
        assert_eq!(cast_email("@example.com"), Err(CastError::Email));
    }

    #[test]
    fn test_cast_url() {
        assert_eq!(
            cast_url("https://www.example.com").unwrap(),
            "https://www.example.com"
        );
        assert_eq!(
            cast_url("ftp://files.example.com/pub?x=1").unwrap(),
            "ftp://files.example.com/pub?x=1"
        );
        assert_eq!(
            cast_url("mailto:someone@example.com").unwrap(),
            "mailto:someone@example.com"
        );
        assert_eq!(cast_url("invalid-url"), Err(CastError::Url));
        assert_eq!(cast_url("http://"), Err(CastError::Url));
    }

    #[test]
    fn test_cast_ip_address() {
        assert_eq!(cast_ip_address("192.168.1.1").unwrap(), "192.168.1.1");
        assert_eq!(cast_ip_address("::1").unwrap(), "::1");
        assert_eq!(cast_ip_address("2001:db8::ff00:42:8329").unwrap(), "2001:db8::ff00:42:8329");
        assert_eq!(cast_ip_address("notanip"), Err(CastError::IpAddr));
        assert_eq!(cast_ip_address("256.1.1.1"), Err(CastError::IpAddr));
    }

    #[test]
    fn test_cast_mac_address() {
        assert_eq!(
            cast_mac_address("00:1A:2B:3C:4D:5E").unwrap(),
            "00:1A:2B:3C:4D:5E"
        );
        assert_eq!(
            cast_mac_address("00-1a-2b-3c-4d-5e").unwrap(),
            "00-1a-2b-3c-4d-5e"
        );
        assert_eq!(cast_mac_address("001a.2b3c.4d5e").unwrap(), "001a.2b3c.4d5e");
        assert_eq!(cast_mac_address("00:1A-2B:3C:4D:5E"), Err(CastError::MacAddr));
        assert_eq!(cast_mac_address("notamac"), Err(CastError::MacAddr));
    }
}
