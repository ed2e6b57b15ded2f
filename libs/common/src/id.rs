use ulid::Ulid;

/// Generates a new ULID-based ID with the given prefix.
///
/// # Examples
/// ```
/// let id = moyeora_common::id::prefixed_ulid("usr");
/// assert!(id.starts_with("usr_"));
/// ```
pub fn prefixed_ulid(prefix: &str) -> String {
    format!("{}_{}", prefix, Ulid::new())
}

/// Marker trait for document types that carry a prefixed ID.
pub trait PrefixedId {
    const PREFIX: &'static str;

    fn generate() -> String {
        prefixed_ulid(Self::PREFIX)
    }
}

/// Well-known ID prefixes.
pub mod prefix {
    pub const USER: &str = "usr";
    pub const SESSION: &str = "ses";
    pub const CLUB: &str = "clb";
    pub const CLUB_MEMBER: &str = "mem";
    pub const CLUB_APPLICATION: &str = "app";
    pub const EVENT: &str = "evt";
    pub const SCHEDULE: &str = "sch";
    pub const PARTICIPANT: &str = "prt";
    pub const NOTIFICATION: &str = "ntf";
    pub const RATING: &str = "rat";
}
