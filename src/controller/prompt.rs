// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Blocking user dialogs.

/// Alert and confirmation dialogs shown to the user.
pub trait UserPrompt {
    /// Show a blocking notification.
    fn alert(&mut self, message: &str);

    /// Ask a yes/no question. `true` means the user confirmed.
    fn confirm(&mut self, message: &str) -> bool;
}
