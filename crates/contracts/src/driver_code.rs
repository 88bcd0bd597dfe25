//! DriverCode - Cheap-to-clone driver identifier
//!
//! Uses Arc<str> internally for O(1) clone operations.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

/// Driver abbreviation with cheap cloning.
///
/// Internally uses `Arc<str>` so cloning only increments a reference count
/// instead of allocating new memory. Codes are normalized to uppercase on
/// construction, matching the timing-sheet convention ("VER", "LEC").
///
/// # Examples
/// ```
/// use contracts::DriverCode;
///
/// let code: DriverCode = "ver".into();
/// let code2 = code.clone();  // O(1) - just increments ref count
/// assert_eq!(code, code2);
/// assert_eq!(code.as_str(), "VER");
/// ```
#[derive(Clone, Default)]
pub struct DriverCode(Arc<str>);

impl DriverCode {
    /// Create a new DriverCode from a string slice, uppercasing it.
    #[inline]
    pub fn new(s: &str) -> Self {
        Self(Arc::from(s.trim().to_ascii_uppercase().as_str()))
    }

    /// Get the underlying string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Deref to &str for easy string operations
impl Deref for DriverCode {
    type Target = str;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for DriverCode {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for DriverCode {
    #[inline]
    fn borrow(&self) -> &str {
        &self.0
    }
}

// Conversions
impl From<&str> for DriverCode {
    #[inline]
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for DriverCode {
    #[inline]
    fn from(s: String) -> Self {
        Self::new(&s)
    }
}

// Display and Debug
impl fmt::Display for DriverCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for DriverCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DriverCode({:?})", self.0)
    }
}

// Equality - can compare with &str, String, etc.
impl PartialEq for DriverCode {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        // Fast path: same Arc pointer
        Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
    }
}

impl Eq for DriverCode {}

impl PartialEq<str> for DriverCode {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        self.0.as_ref() == other
    }
}

impl PartialEq<&str> for DriverCode {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        self.0.as_ref() == *other
    }
}

impl PartialEq<String> for DriverCode {
    #[inline]
    fn eq(&self, other: &String) -> bool {
        self.0.as_ref() == other
    }
}

// Hash - same as str hash for HashMap compatibility
impl Hash for DriverCode {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state)
    }
}

// Serde support
impl Serialize for DriverCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for DriverCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::new(&s))
    }
}
