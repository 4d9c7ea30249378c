use std::fmt;

use crate::types::{
    EMAIL_OFFSET, EMAIL_SIZE, ID_OFFSET, ID_SIZE, ROW_SIZE, USERNAME_OFFSET, USERNAME_SIZE,
    error::DatabaseError,
};

/*
 * Row Layout on Disk (291 bytes, fixed width)
 * ┌──────────┬─────────────────────┬──────────────────────────────┐
 * │  id (4)  │   username (32)     │         email (255)          │
 * │  u32 LE  │ ASCII, zero-padded  │      ASCII, zero-padded      │
 * └──────────┴─────────────────────┴──────────────────────────────┘
 *  0          4                     36                            291
 */

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: u32,
    pub username: String,
    pub email: String,
}

impl Row {
    /// Builds a row, rejecting fields that would not fit their column.
    pub fn new(
        id: u32,
        username: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, DatabaseError> {
        let row = Self {
            id,
            username: username.into(),
            email: email.into(),
        };
        row.validate()?;
        Ok(row)
    }

    pub fn validate(&self) -> Result<(), DatabaseError> {
        check_field("username", &self.username, USERNAME_SIZE)?;
        check_field("email", &self.email, EMAIL_SIZE)
    }

    /// Encodes the row into its fixed-width layout, checking field limits
    /// first.
    pub fn to_bytes(&self) -> Result<[u8; ROW_SIZE], DatabaseError> {
        self.validate()?;

        let mut buffer = [0u8; ROW_SIZE];
        buffer[ID_OFFSET..ID_OFFSET + ID_SIZE].copy_from_slice(&self.id.to_le_bytes());

        let username = self.username.as_bytes();
        buffer[USERNAME_OFFSET..USERNAME_OFFSET + username.len()].copy_from_slice(username);

        let email = self.email.as_bytes();
        buffer[EMAIL_OFFSET..EMAIL_OFFSET + email.len()].copy_from_slice(email);

        Ok(buffer)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DatabaseError> {
        if bytes.len() != ROW_SIZE {
            return Err(DatabaseError::MalformedRow {
                expected: ROW_SIZE,
                actual: bytes.len(),
            });
        }

        let id = u32::from_le_bytes([
            bytes[ID_OFFSET],
            bytes[ID_OFFSET + 1],
            bytes[ID_OFFSET + 2],
            bytes[ID_OFFSET + 3],
        ]);
        let username = read_field(
            "username",
            &bytes[USERNAME_OFFSET..USERNAME_OFFSET + USERNAME_SIZE],
        )?;
        let email = read_field("email", &bytes[EMAIL_OFFSET..EMAIL_OFFSET + EMAIL_SIZE])?;

        Ok(Row {
            id,
            username,
            email,
        })
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.id, self.username, self.email)
    }
}

fn check_field(field: &'static str, value: &str, max: usize) -> Result<(), DatabaseError> {
    if !value.is_ascii() {
        return Err(DatabaseError::NonAsciiField { field });
    }
    // NUL is the padding byte and would be lost on the way back
    if value.contains('\0') {
        return Err(DatabaseError::NulByteInField { field });
    }
    if value.len() > max {
        return Err(DatabaseError::FieldTooLong {
            field,
            max,
            actual: value.len(),
        });
    }
    Ok(())
}

/// Decodes a zero-padded column, dropping the trailing padding.
fn read_field(field: &'static str, bytes: &[u8]) -> Result<String, DatabaseError> {
    let end = bytes
        .iter()
        .rposition(|&b| b != 0)
        .map_or(0, |last| last + 1);
    let value = &bytes[..end];
    if !value.is_ascii() {
        return Err(DatabaseError::NonAsciiField { field });
    }
    // ASCII is always valid UTF-8
    Ok(value.iter().map(|&b| b as char).collect())
}
