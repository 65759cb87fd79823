//! # Endpoint Caller
//! The goal of this library is to make it extremely easy to try out rest endpoints with the
//! access token an oauth 2.0 implicit flow left in the fragment of the page url.
//! The client is based on the `Reqwest` and `Oauth2` library
//!
//! The token is captured once when the caller is loaded. Every activation reads the selected
//! endpoint, calls it with `Authorization: Bearer <token>` and renders the json body,
//! pretty-printed, into the output area.
//!
//! For now this library only supports `GET` endpoints which return `json` bodies.
//!
//! ## Example code
//! ```no_run
//!# async fn doc_test() -> anyhow::Result<()> {
//! use endpoint_caller::{EndpointCaller, Outcome, Settings};
//!
//! // Load the caller, this captures the access token from the page fragment
//! let settings = Settings::new("https://casting.example.com/#access_token=xxxxxxxxxx&expires_in=7200");
//! let caller = EndpointCaller::load(settings)?;
//!
//! // Relative endpoints resolve against the page url
//! if caller.invoke("/movies").await == Outcome::Rendered {
//!     println!("{}", caller.output().content().await);
//! }
//!
//!# Ok(())
//!# }
//! ```
pub mod catalog;
mod endpoint_caller;
mod output;
mod selection;
mod settings;
mod token;

pub use crate::catalog::EndpointOption;
pub use crate::endpoint_caller::{
    EndpointCaller, Outcome, UNSELECTED_MESSAGE, UNSUPPORTED_MESSAGE,
};
pub use crate::output::OutputArea;
pub use crate::selection::{EndpointSelection, UNSELECTED_SENTINEL, UNSUPPORTED_SENTINEL};
pub use crate::settings::{FailureDisplay, RenderPolicy, Settings, BASE_URL_VAR};
pub use crate::token::CapturedToken;
