//! Localized routing.
//!
//! - `table`: canonical route identifiers and their slug in every locale
//! - `resolver`: language switches on static pages, through the table
//! - `entity`: detail pages of content store entities and their fallbacks
//! - `navigation`: the outcome of a language switch

mod entity;
mod navigation;
mod resolver;
mod table;

pub use entity::{
    detect_entity_path, resolve_entity_target, EntityKind, EntityLocalization, EntityPath,
    LocalizedSlug,
};
pub use navigation::{LocaleSwitch, Navigation, NavigationKind, Resolution};
pub use resolver::resolve_static_path;
pub use table::RouteTable;
