//! LeadForge Copy — ad copy generation without external calls.
//!
//! Normalises campaign inputs into a [`GenerationContext`], ranks keyword
//! signals, renders fixed creative angles into Facebook and Google packs,
//! and sanitizes arbitrary JSON into those packs so every field respects
//! its platform character limit.

pub mod asset_pack;
pub mod context;
pub mod keywords;
pub mod packs;
pub mod rule_based;
pub mod text;
pub mod types;

pub use asset_pack::{generate_asset_pack, AssetPack, AssetPackInput, AssetPackResult};
pub use context::{build_context, infer_offer, parse_custom_inputs, GenerationContext};
pub use keywords::extract_keywords;
pub use packs::{
    build_facebook_pack, build_google_pack, sanitize_facebook_pack, sanitize_google_pack, AngleCopy,
};
pub use rule_based::{generate_rule_based, rule_based_options, MAX_OPTIONS};
pub use text::{normalize_text, sanitize_string_list, slugify, truncate};
pub use types::*;
