pub mod admins;
pub mod clients;
pub mod contacts;
pub mod newsletters;
pub mod projects;

/// Whether a submitted field overrides the stored value on update.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Patch {
    #[default]
    Keep,
    Set(String),
}

impl Patch {
    /// An empty submission counts as "not provided".
    pub fn non_empty(value: Option<String>) -> Self {
        match value {
            Some(v) if !v.is_empty() => Patch::Set(v),
            _ => Patch::Keep,
        }
    }

    /// Any submission overrides, including an explicit empty string.
    pub fn present(value: Option<String>) -> Self {
        match value {
            Some(v) => Patch::Set(v),
            None => Patch::Keep,
        }
    }
}
