use bitflags::bitflags;

bitflags! {
    /// Kind of modification seen on one side (index or working tree) of a path.
    ///
    /// The empty set means the side is unmodified.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
    pub struct StatusFlags: u8 {
        const MODIFIED = 0b00001;
        const ADDED = 0b00010;
        const DELETED = 0b00100;
        const RENAMED = 0b01000;
        const UNTRACKED = 0b10000;
    }
}

impl StatusFlags {
    /// Maps one porcelain status character; `None` for characters that carry no
    /// meaning for the workflow (ignored entries and unknown codes).
    pub fn try_parse(code: char) -> Option<Self> {
        match code {
            ' ' => Some(Self::empty()),
            'M' | 'T' | 'U' => Some(Self::MODIFIED),
            'A' | 'C' => Some(Self::ADDED),
            'D' => Some(Self::DELETED),
            'R' => Some(Self::RENAMED),
            '?' => Some(Self::UNTRACKED),
            _ => None,
        }
    }

    pub fn is_unmodified(&self) -> bool {
        self.is_empty()
    }

    pub fn as_char(&self) -> char {
        if self.contains(Self::UNTRACKED) {
            '?'
        } else if self.contains(Self::RENAMED) {
            'R'
        } else if self.contains(Self::DELETED) {
            'D'
        } else if self.contains(Self::ADDED) {
            'A'
        } else if self.contains(Self::MODIFIED) {
            'M'
        } else {
            ' '
        }
    }
}

bitflags! {
    /// Numeric-diff listings a path showed up in.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
    pub struct DiffSources: u8 {
        const WORKING = 0b01;
        const STAGED = 0b10;
    }
}

impl std::fmt::Display for DiffSources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.contains(Self::WORKING) {
            write!(f, "W")?;
        }
        if self.contains(Self::STAGED) {
            write!(f, "S")?;
        }

        Ok(())
    }
}

/// Both status axes of a path, as reported by a porcelain `XY` code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FileStatus {
    pub index: StatusFlags,
    pub working: StatusFlags,
}

impl FileStatus {
    pub fn new(index: StatusFlags, working: StatusFlags) -> Self {
        FileStatus { index, working }
    }

    /// Parses the two-character porcelain code. Untracked (`??`) is only
    /// recorded on the working-tree side; ignored entries (`!!`) yield `None`.
    pub fn try_parse(code: &str) -> Option<Self> {
        let mut chars = code.chars();
        let (x, y) = (chars.next()?, chars.next()?);

        if x == '?' && y == '?' {
            return Some(FileStatus::new(StatusFlags::empty(), StatusFlags::UNTRACKED));
        }

        Some(FileStatus::new(
            StatusFlags::try_parse(x)?,
            StatusFlags::try_parse(y)?,
        ))
    }

    pub fn any(&self) -> StatusFlags {
        self.index | self.working
    }

    pub fn is_deleted(&self) -> bool {
        self.any().contains(StatusFlags::DELETED)
    }

    pub fn is_new(&self) -> bool {
        self.working.contains(StatusFlags::UNTRACKED) || self.index.contains(StatusFlags::ADDED)
    }

    pub fn is_renamed(&self) -> bool {
        self.any().contains(StatusFlags::RENAMED)
    }
}

impl From<&FileStatus> for String {
    fn from(status: &FileStatus) -> Self {
        if status.working.contains(StatusFlags::UNTRACKED) {
            return "??".to_string();
        }

        format!("{}{}", status.index.as_char(), status.working.as_char())
    }
}

impl std::fmt::Display for FileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status_str: String = self.into();
        write!(f, "{}", status_str)
    }
}
