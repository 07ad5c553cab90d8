//! File sizes and their human-readable rendering.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;

/// Unit a [`FileSize`] can be expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FileSizeUnit {
    /// Bytes.
    Byte,
    /// 10^3 bytes.
    Kb,
    /// 10^6 bytes.
    Mb,
    /// 10^9 bytes.
    Gb,
    /// 10^12 bytes.
    Tb,
    /// 2^10 bytes.
    Kib,
    /// 2^20 bytes.
    Mib,
    /// 2^30 bytes.
    Gib,
    /// 2^40 bytes.
    Tib,
}

impl FileSizeUnit {
    const DECIMAL: [FileSizeUnit; 5] = [
        FileSizeUnit::Byte,
        FileSizeUnit::Kb,
        FileSizeUnit::Mb,
        FileSizeUnit::Gb,
        FileSizeUnit::Tb,
    ];

    /// Number of bytes in one of this unit.
    pub const fn bytes(self) -> u64 {
        match self {
            FileSizeUnit::Byte => 1,
            FileSizeUnit::Kb => 1_000,
            FileSizeUnit::Mb => 1_000_000,
            FileSizeUnit::Gb => 1_000_000_000,
            FileSizeUnit::Tb => 1_000_000_000_000,
            FileSizeUnit::Kib => 1 << 10,
            FileSizeUnit::Mib => 1 << 20,
            FileSizeUnit::Gib => 1 << 30,
            FileSizeUnit::Tib => 1 << 40,
        }
    }

    /// Unit suffix, e.g. `"KiB"`.
    pub const fn symbol(self) -> &'static str {
        match self {
            FileSizeUnit::Byte => "B",
            FileSizeUnit::Kb => "KB",
            FileSizeUnit::Mb => "MB",
            FileSizeUnit::Gb => "GB",
            FileSizeUnit::Tb => "TB",
            FileSizeUnit::Kib => "KiB",
            FileSizeUnit::Mib => "MiB",
            FileSizeUnit::Gib => "GiB",
            FileSizeUnit::Tib => "TiB",
        }
    }
}

impl fmt::Display for FileSizeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Size of a file in bytes.
///
/// Sizes are ordered and compared by byte count and can be added together.
///
/// ```rust
/// use fluentfs::{FileSize, FileSizeUnit};
///
/// let size = FileSize::from_bytes(1500);
/// assert_eq!(size.unit(), FileSizeUnit::Kb);
/// assert_eq!(size.to_string(), "1.5KB");
/// assert_eq!(size.format(FileSizeUnit::Byte, 3), "1500.0B");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileSize(u64);

impl FileSize {
    /// Create a size from a byte count.
    #[inline]
    pub const fn from_bytes(bytes: u64) -> Self {
        Self(bytes)
    }

    /// The byte count.
    #[inline]
    pub const fn bytes(self) -> u64 {
        self.0
    }

    /// The largest decimal unit the size reaches (at least one of it).
    pub fn unit(self) -> FileSizeUnit {
        FileSizeUnit::DECIMAL
            .iter()
            .rev()
            .copied()
            .find(|unit| self.0 >= unit.bytes())
            .unwrap_or(FileSizeUnit::Byte)
    }

    /// The size expressed as a fraction of `unit`.
    pub fn size_in(self, unit: FileSizeUnit) -> f64 {
        self.0 as f64 / unit.bytes() as f64
    }

    /// Render the size in `unit`, rounded to `rounding` decimal places.
    pub fn format(self, unit: FileSizeUnit, rounding: i32) -> String {
        let scale = 10f64.powi(rounding);
        let value = (self.size_in(unit) * scale).round() / scale;
        format!("{value:?}{unit}")
    }
}

impl fmt::Display for FileSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(self.unit(), 3))
    }
}

impl From<u64> for FileSize {
    fn from(bytes: u64) -> Self {
        Self(bytes)
    }
}

impl From<FileSize> for u64 {
    fn from(size: FileSize) -> Self {
        size.0
    }
}

impl Add for FileSize {
    type Output = FileSize;

    fn add(self, other: FileSize) -> FileSize {
        FileSize(self.0 + other.0)
    }
}

impl Sum for FileSize {
    fn sum<I: Iterator<Item = FileSize>>(iter: I) -> Self {
        iter.fold(FileSize::default(), Add::add)
    }
}
