//! Contact header bitmask.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::field::ContactField;

/// The set of optional fields present in one contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactHeader(u8);

impl ContactHeader {
    /// Creates a header from raw bits.
    #[must_use]
    pub const fn from_raw(raw: u8) -> Self {
        Self(raw)
    }

    /// Creates a header from wire bits. Bits past the declared fields are
    /// ignored.
    #[must_use]
    pub const fn from_bits(bits: u64) -> Self {
        Self((bits & 0xFF) as u8)
    }

    /// Returns the raw header bits.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Returns `true` if `field` is present.
    #[must_use]
    pub const fn contains(self, field: ContactField) -> bool {
        self.0 & field.bit() != 0
    }

    /// Returns this header with `field` set.
    #[must_use]
    pub const fn with(self, field: ContactField) -> Self {
        Self(self.0 | field.bit())
    }

    /// Number of present fields, which is also the number of trailing slots
    /// the contact consumes.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates present fields in bit order.
    pub fn iter(self) -> impl Iterator<Item = ContactField> {
        ContactField::ORDER
            .into_iter()
            .filter(move |&field| self.contains(field))
    }
}

impl FromIterator<ContactField> for ContactHeader {
    fn from_iter<I: IntoIterator<Item = ContactField>>(iter: I) -> Self {
        iter.into_iter().fold(Self::default(), Self::with)
    }
}

impl fmt::Display for ContactHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, field) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(field.name())?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_zero_is_velocity() {
        let header = ContactHeader::from_raw(0b0000_0001);
        assert!(header.contains(ContactField::Velocity));
        assert_eq!(header.len(), 1);
        assert_eq!(header.iter().collect::<Vec<_>>(), vec![ContactField::Velocity]);
    }

    #[test]
    fn high_bits_ignored() {
        let header = ContactHeader::from_bits(0x1_0000_0120);
        assert_eq!(header.raw(), 0x20);
        assert_eq!(header.iter().collect::<Vec<_>>(), vec![ContactField::EntityType]);
    }

    #[test]
    fn len_is_popcount_for_all_headers() {
        for raw in 0..=u8::MAX {
            let header = ContactHeader::from_raw(raw);
            assert_eq!(header.len(), raw.count_ones() as usize);
            assert_eq!(header.iter().count(), header.len());
        }
    }

    #[test]
    fn iter_is_ascending() {
        let header = ContactHeader::from_raw(0b1010_0110);
        let fields: Vec<_> = header.iter().collect();
        assert_eq!(
            fields,
            vec![
                ContactField::Altitude,
                ContactField::DirectionTarget,
                ContactField::EntityType,
                ContactField::Reloads,
            ]
        );
    }

    #[test]
    fn collect_from_fields() {
        let header: ContactHeader = [ContactField::Damage, ContactField::PlayerId]
            .into_iter()
            .collect();
        assert_eq!(header.raw(), 0b0101_0000);
    }

    #[test]
    fn display_lists_names() {
        let header = ContactHeader::from_raw(0b0010_0001);
        assert_eq!(header.to_string(), "[velocity, type]");
        assert_eq!(ContactHeader::default().to_string(), "[]");
        assert!(ContactHeader::default().is_empty());
    }
}
