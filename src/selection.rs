/// Control value reserved for endpoints documented elsewhere
pub const UNSUPPORTED_SENTINEL: &str = "other";

/// Control value of the placeholder option
pub const UNSELECTED_SENTINEL: &str = "0";

/// The value of the endpoint selection control at the moment the user triggers a call
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EndpointSelection {
    /// Nothing was chosen yet
    Unselected,
    /// An endpoint that is only described in the API reference
    Unsupported,
    /// An url (absolute or relative to the page) to call
    Concrete(String),
}

impl EndpointSelection {
    /// Classify a raw control value.
    ///
    /// The unsupported sentinel is checked first. Every value that reads as zero
    /// (blank, `0`, `0.0`, `-0`, `0x0`, ...) means nothing was selected.
    pub fn parse(value: &str) -> Self {
        if value == UNSUPPORTED_SENTINEL {
            EndpointSelection::Unsupported
        } else if is_zero_like(value) {
            EndpointSelection::Unselected
        } else {
            EndpointSelection::Concrete(value.to_string())
        }
    }
}

impl From<&str> for EndpointSelection {
    fn from(value: &str) -> Self {
        EndpointSelection::parse(value)
    }
}

fn is_zero_like(value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() {
        return true;
    }

    for prefix in &["0x", "0X", "0o", "0O", "0b", "0B"] {
        if let Some(digits) = value.strip_prefix(*prefix) {
            return !digits.is_empty() && digits.bytes().all(|b| b == b'0');
        }
    }

    // Rust accepts "inf" and "nan" here, neither of which compares equal to zero
    match value.parse::<f64>() {
        Ok(number) => number == 0.0,
        Err(_) => false,
    }
}
