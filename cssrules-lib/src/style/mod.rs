pub mod declarations;
pub mod owned_css;
pub mod rule_parser;
pub mod sheet;

#[cfg(feature = "web")]
pub mod web_sheet;
