/// Operating system family the integration runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Windows,
    MacOs,
    /// Anything else; launchers are never found here.
    Other,
}

impl Platform {
    /// Returns the platform this binary was built for.
    pub fn current() -> Self {
        current_inner()
    }

    /// Returns `true` on Windows.
    pub fn is_windows(&self) -> bool {
        matches!(self, Platform::Windows)
    }
}

#[cfg(target_os = "windows")]
fn current_inner() -> Platform {
    Platform::Windows
}

#[cfg(target_os = "macos")]
fn current_inner() -> Platform {
    Platform::MacOs
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn current_inner() -> Platform {
    Platform::Other
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(target_os = "windows")]
    #[test]
    fn current_platform_windows() {
        assert_eq!(Platform::current(), Platform::Windows);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn current_platform_linux_is_other() {
        assert_eq!(Platform::current(), Platform::Other);
    }
}
