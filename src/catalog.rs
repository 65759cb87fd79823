use crate::selection::{UNSELECTED_SENTINEL, UNSUPPORTED_SENTINEL};

/// One entry of the endpoint selection control
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EndpointOption {
    pub value: &'static str,
    pub label: &'static str,
    /// Permission the token needs for the call to succeed
    pub permission: Option<&'static str>,
}

const DEFAULT_OPTIONS: &[EndpointOption] = &[
    EndpointOption {
        value: UNSELECTED_SENTINEL,
        label: "Select one API endpoint ...",
        permission: None,
    },
    EndpointOption {
        value: "/movies",
        label: "Movies",
        permission: Some("get:movies"),
    },
    EndpointOption {
        value: "/actors",
        label: "Actors",
        permission: Some("get:actors"),
    },
    EndpointOption {
        value: "/performances",
        label: "Performances",
        permission: Some("get:performance"),
    },
    EndpointOption {
        value: UNSUPPORTED_SENTINEL,
        label: "Other (see API reference)",
        permission: None,
    },
];

/// The options offered by the selection control, in display order
pub fn default_options() -> &'static [EndpointOption] {
    DEFAULT_OPTIONS
}
