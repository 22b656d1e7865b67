use std::collections::HashMap;

use bitflags::bitflags;

bitflags! {
    /// Coarse classification of a measured width against [`Breakpoints`].
    #[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
    #[must_use]
    pub struct SizeFlags: u8 {
        const MOBILE = 1;
        const WIDE = 2;
    }
}

/// Width thresholds in pixels.
///
/// Defaults to `mobile = 760` and `wide = 1000`. Caller overrides merge
/// field by field: start from [`Breakpoints::default`] and override what you
/// need, the rest keeps its default. Named custom thresholds are stored
/// alongside the two built-in ones but never influence [`SizeFlags`].
#[derive(Debug, Clone, PartialEq)]
pub struct Breakpoints {
    mobile: u32,
    wide: u32,
    custom: HashMap<String, u32>,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            mobile: 760,
            wide: 1000,
            custom: HashMap::new(),
        }
    }
}

impl Breakpoints {
    /// Set the width below which [`SizeFlags::MOBILE`] is reported.
    pub fn with_mobile(mut self, width: u32) -> Self {
        self.mobile = width;
        self
    }

    /// Set the width above which [`SizeFlags::WIDE`] is reported.
    pub fn with_wide(mut self, width: u32) -> Self {
        self.wide = width;
        self
    }

    /// Store a named custom threshold. It is queryable through
    /// [`threshold`](Breakpoints::threshold) but ignored by the flags.
    pub fn with_threshold(mut self, name: impl Into<String>, width: u32) -> Self {
        self.custom.insert(name.into(), width);
        self
    }

    pub fn mobile(&self) -> u32 {
        self.mobile
    }

    pub fn wide(&self) -> u32 {
        self.wide
    }

    pub fn threshold(&self, name: &str) -> Option<u32> {
        self.custom.get(name).copied()
    }

    /// Classify `width`: `MOBILE` strictly below the mobile threshold,
    /// `WIDE` strictly above the wide one.
    pub fn flags(&self, width: u32) -> SizeFlags {
        let mut flags = SizeFlags::empty();
        if width < self.mobile {
            flags |= SizeFlags::MOBILE;
        }
        if width > self.wide {
            flags |= SizeFlags::WIDE;
        }
        flags
    }

    pub fn is_mobile(&self, width: u32) -> bool {
        self.flags(width).contains(SizeFlags::MOBILE)
    }

    pub fn is_wide(&self, width: u32) -> bool {
        self.flags(width).contains(SizeFlags::WIDE)
    }
}
