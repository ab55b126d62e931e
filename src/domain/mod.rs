//! Domain logic - pure version rules independent of files and git

pub mod compare;
pub mod increment;
pub mod version;

pub use compare::{compare, is_valid_major, is_valid_minor, is_valid_patch};
pub use increment::{get_bump_options, BumpOptions};
pub use version::{Segment, SemVer, VersionBump};
