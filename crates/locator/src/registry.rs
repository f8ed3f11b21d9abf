//! Read-only view of the Windows registry.
//!
//! The locator only needs string values and subkey names, so the registry is
//! reached through [`RegistryView`]. `WinRegistry` is the real thing; tests
//! use an in-memory map so the probing logic runs on every platform.

/// Predefined registry root key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegRoot {
    CurrentUser,
    LocalMachine,
}

/// String-value and subkey lookups. Failures of any kind are `None`/empty.
pub trait RegistryView: Send + Sync {
    /// Reads a string value from `root\path`.
    fn string_value(&self, root: RegRoot, path: &str, name: &str) -> Option<String>;

    /// Lists the direct subkeys of `root\path`.
    fn subkeys(&self, root: RegRoot, path: &str) -> Vec<String>;
}

/// The live Windows registry.
#[cfg(windows)]
#[derive(Debug, Default, Clone, Copy)]
pub struct WinRegistry;

#[cfg(windows)]
impl WinRegistry {
    fn open(root: RegRoot, path: &str) -> Option<winreg::RegKey> {
        use winreg::RegKey;
        use winreg::enums::{HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE};

        let hkey = match root {
            RegRoot::CurrentUser => HKEY_CURRENT_USER,
            RegRoot::LocalMachine => HKEY_LOCAL_MACHINE,
        };
        RegKey::predef(hkey).open_subkey(path).ok()
    }
}

#[cfg(windows)]
impl RegistryView for WinRegistry {
    fn string_value(&self, root: RegRoot, path: &str, name: &str) -> Option<String> {
        let key = Self::open(root, path)?;
        key.get_value::<String, _>(name).ok()
    }

    fn subkeys(&self, root: RegRoot, path: &str) -> Vec<String> {
        match Self::open(root, path) {
            Some(key) => key.enum_keys().flatten().collect(),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
pub(crate) mod memory {
    use std::collections::HashMap;

    use super::{RegRoot, RegistryView};

    /// In-memory registry keyed by `(root, path)`.
    #[derive(Debug, Default)]
    pub(crate) struct MemoryRegistry {
        keys: HashMap<(RegRoot, String), HashMap<String, String>>,
    }

    impl MemoryRegistry {
        pub(crate) fn set(&mut self, root: RegRoot, path: &str, name: &str, value: &str) {
            self.keys
                .entry((root, path.to_string()))
                .or_default()
                .insert(name.to_string(), value.to_string());
        }
    }

    impl RegistryView for MemoryRegistry {
        fn string_value(&self, root: RegRoot, path: &str, name: &str) -> Option<String> {
            self.keys.get(&(root, path.to_string()))?.get(name).cloned()
        }

        fn subkeys(&self, root: RegRoot, path: &str) -> Vec<String> {
            let prefix = format!("{path}\\");
            let mut names: Vec<String> = self
                .keys
                .keys()
                .filter(|(r, p)| *r == root && p.starts_with(&prefix))
                .filter_map(|(_, p)| p[prefix.len()..].split('\\').next().map(String::from))
                .collect();
            names.sort();
            names.dedup();
            names
        }
    }
}
