// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Date;

/// Field changes applied by `Persistence::update_document`.
///
/// `None` leaves a field untouched. For the nullable fields, `Some(None)`
/// clears the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentChanges {
    pub display_name: Option<String>,
    pub document_date: Option<Option<Date>>,
    pub notes: Option<Option<String>>,
}

impl DocumentChanges {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.display_name.is_none() && self.document_date.is_none() && self.notes.is_none()
    }
}
