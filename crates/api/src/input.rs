// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Parsing of wire-format fields into domain values.
//!
//! Everything here fails before any domain logic runs.

use thiserror::Error;

/// Input parsing errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    /// An actor role label was not recognized.
    #[error("Unknown role '{value}': expected requester, buyer, or administrator")]
    UnknownRole { value: String },
}
