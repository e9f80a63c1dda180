//! Name records.

/// Windows platform, Unicode BMP encoding, US English.
pub const WINDOWS_PLATFORM: u16 = 3;
pub const WINDOWS_UNICODE_BMP: u16 = 1;
pub const WINDOWS_ENGLISH_US: u16 = 0x409;

/// A single decoded name record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameEntry {
    pub platform_id: u16,
    pub encoding_id: u16,
    pub language_id: u16,
    pub name_id: u16,
    pub value: String,
}

impl NameEntry {
    /// Record order required by the `name` table.
    pub fn sort_key(&self) -> (u16, u16, u16, u16) {
        (self.platform_id, self.encoding_id, self.language_id, self.name_id)
    }

    fn is_windows_english(&self) -> bool {
        self.platform_id == WINDOWS_PLATFORM
            && self.encoding_id == WINDOWS_UNICODE_BMP
            && self.language_id == WINDOWS_ENGLISH_US
    }
}

/// Decoded `name` table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameTable {
    entries: Vec<NameEntry>,
}

impl NameTable {
    pub fn new(entries: Vec<NameEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[NameEntry] {
        &self.entries
    }

    /// The Windows English record for `name_id`, falling back to any record
    /// with that ID.
    pub fn get(&self, name_id: u16) -> Option<&str> {
        let mut candidates = self.entries.iter().filter(|e| e.name_id == name_id);
        let first = candidates.clone().next();
        candidates
            .find(|e| e.is_windows_english())
            .or(first)
            .map(|e| e.value.as_str())
    }

    /// Insert or replace the Windows English record for `name_id`.
    pub fn set_windows(&mut self, name_id: u16, value: impl Into<String>) {
        let value = value.into();
        match self
            .entries
            .iter_mut()
            .find(|e| e.name_id == name_id && e.is_windows_english())
        {
            Some(entry) => entry.value = value,
            None => {
                let entry = NameEntry {
                    platform_id: WINDOWS_PLATFORM,
                    encoding_id: WINDOWS_UNICODE_BMP,
                    language_id: WINDOWS_ENGLISH_US,
                    name_id,
                    value,
                };
                let at = self.entries.partition_point(|e| e.sort_key() < entry.sort_key());
                self.entries.insert(at, entry);
            }
        }
    }
}
