//! The interactive text menu.
use std::fmt;

/// One of the five menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    ScanPrimary,
    ScanAttached,
    ScanAll,
    ListDrives,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 5] = [
        Self::ScanPrimary,
        Self::ScanAttached,
        Self::ScanAll,
        Self::ListDrives,
        Self::Exit,
    ];

    /// Parse a line of operator input. Anything other than an integer 1–5 is `None`.
    pub fn parse(input: &str) -> Option<Self> {
        let n: usize = input.trim().parse().ok()?;
        Self::ALL.get(n.checked_sub(1)?).copied()
    }

    pub fn number(self) -> usize {
        Self::ALL.iter().position(|c| *c == self).unwrap_or(0) + 1
    }
}

/// Renders the menu text for a given primary volume.
pub struct Menu<'a> {
    pub primary: &'a str,
}

impl fmt::Display for Menu<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "Select an option:")?;
        writeln!(f, "1. Scan main drive ({})", self.primary)?;
        writeln!(f, "2. Scan attached drives")?;
        writeln!(f, "3. Scan all drives")?;
        writeln!(f, "4. Show all drives")?;
        writeln!(f, "5. Exit")?;
        write!(f, "Enter your choice: ")
    }
}
