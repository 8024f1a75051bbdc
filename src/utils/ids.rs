//! Random record and group identifiers

use uuid::Uuid;

/// Fresh random (v4) identifier in canonical hyphenated form.
pub fn new_identifier() -> String {
    Uuid::new_v4().hyphenated().to_string()
}

/// `true` when `value` is a 36-char canonical hyphenated UUID.
///
/// `Uuid::parse_str` also accepts simple, braced and URN forms; those are not
/// what the store writes, so the length check keeps them out.
pub fn is_identifier(value: &str) -> bool {
    value.len() == 36 && Uuid::parse_str(value).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn new_identifier_is_canonical() {
        let id = new_identifier();
        assert_eq!(id.len(), 36);
        assert!(is_identifier(&id));
        assert_eq!(id, id.to_ascii_lowercase());
    }

    #[test]
    fn identifiers_do_not_repeat() {
        let ids: HashSet<String> = (0..1000).map(|_| new_identifier()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn rejects_non_canonical_forms() {
        assert!(!is_identifier(""));
        assert!(!is_identifier("not-a-uuid"));
        assert!(!is_identifier("67e5504410b1426f9247bb680e5fe0c8"));
        assert!(!is_identifier("{67e55044-10b1-426f-9247-bb680e5fe0c8}"));
        assert!(is_identifier("67e55044-10b1-426f-9247-bb680e5fe0c8"));
    }
}
