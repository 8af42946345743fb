use crate::data::models::{LookupError, RawEntry};
use crate::features::profiles::DictionaryProfile;

/// Redirect chains longer than this are cut off with a link stub.
pub const MAX_REDIRECT_DEPTH: usize = 32;

/// Anything that can answer a key lookup with raw entries.
pub trait EntrySource {
    fn lookup_entries(&self, key: &str) -> Result<Vec<RawEntry>, LookupError>;
}

/// Expands alias entries into the entries they point at.
pub struct RedirectResolver<'a, S: EntrySource + ?Sized> {
    source: &'a S,
    profile: &'a dyn DictionaryProfile,
}

impl<'a, S: EntrySource + ?Sized> RedirectResolver<'a, S> {
    pub fn new(source: &'a S, profile: &'a dyn DictionaryProfile) -> Self {
        Self { source, profile }
    }

    /// Looks `key` up and replaces every redirect entry, in place, either with
    /// the entries of its target (`recursive`) or with a link to the target.
    pub fn resolve(&self, key: &str, recursive: bool) -> Result<Vec<RawEntry>, LookupError> {
        let mut chain = Vec::new();
        self.resolve_along(key, recursive, &mut chain)
    }

    fn resolve_along(
        &self,
        key: &str,
        recursive: bool,
        chain: &mut Vec<String>,
    ) -> Result<Vec<RawEntry>, LookupError> {
        let entries = self.source.lookup_entries(key)?;
        // Same key equality as the store's COLLATE NOCASE: ASCII folding only
        chain.push(key.to_ascii_lowercase());

        let mut resolved = Vec::with_capacity(entries.len());
        for entry in entries {
            let Some(target) = self.profile.redirect_target(&entry.html) else {
                resolved.push(entry);
                continue;
            };

            if !recursive {
                resolved.push(RawEntry::redirect_stub(entry.key, &target));
                continue;
            }

            if chain.contains(&target.to_ascii_lowercase()) || chain.len() >= MAX_REDIRECT_DEPTH {
                log::warn!(
                    "Not following redirect {:?} -> {:?}: chain {:?} loops or is too deep",
                    entry.key,
                    target,
                    chain
                );
                resolved.push(RawEntry::redirect_stub(entry.key, &target));
                continue;
            }

            log::debug!("Following redirect {:?} -> {:?}", entry.key, target);
            resolved.extend(self.resolve_along(&target, true, chain)?);
        }

        chain.pop();
        Ok(resolved)
    }
}
