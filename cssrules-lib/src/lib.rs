//! Get/set/add access to the rules of one dedicated stylesheet, addressed by
//! selector, with a small index of the rules this crate wrote itself.
//!
//! The stylesheet is any [`style::sheet::StyleSheet`] host: the in-memory
//! [`style::owned_css::OwnedStyleSheet`], or with the `web` feature the live
//! document stylesheet in [`style::web_sheet::DocumentStyleSheet`].

pub mod error;
pub mod rule_store;
pub mod style;

pub use error::RuleError;
pub use rule_store::{RuleRecord, RuleStore};
pub use style::declarations::{parse_declarations, DeclarationMap};
pub use style::owned_css::OwnedStyleSheet;
pub use style::sheet::StyleSheet;
