// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Case conversion requested by `\u`, `\l`, `\U`, `\L` and `\E` in a replacement.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CaseChange {
    /// `\u`: upper case the next char.
    UpperNext,
    /// `\l`: lower case the next char.
    LowerNext,
    /// `\U`: upper case until `\E`.
    Upper,
    /// `\L`: lower case until `\E`.
    Lower,
    /// `\E`.
    End,
}

/// Tracks the conversions in effect while a template is expanded. A one char conversion
/// wins over an ongoing one for that char.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct CaseState {
    next: Option<CaseChange>,
    ongoing: Option<CaseChange>,
}

impl CaseState {
    pub(crate) fn apply(&mut self, change: CaseChange) {
        match change {
            CaseChange::UpperNext | CaseChange::LowerNext => self.next = Some(change),
            CaseChange::Upper | CaseChange::Lower => self.ongoing = Some(change),
            CaseChange::End => *self = Self::default(),
        }
    }

    pub(crate) fn push_str(&mut self, acc: &mut String, text: &str) {
        for it in text.chars() {
            match self.next.take().or(self.ongoing) {
                Some(CaseChange::UpperNext | CaseChange::Upper) => acc.extend(it.to_uppercase()),
                Some(CaseChange::LowerNext | CaseChange::Lower) => acc.extend(it.to_lowercase()),
                Some(CaseChange::End) | None => acc.push(it),
            }
        }
    }
}
